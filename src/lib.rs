// Watermarking Library
//
// Stamps text watermarks onto photos and files the results into a local
// media library.

pub mod config;
pub mod constants;
pub mod error;
pub mod guard;
pub mod logging;
pub mod media;
pub mod pipeline;
pub mod video;
pub mod watermark;
