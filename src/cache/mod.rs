//! In-memory caching layer for card images

pub mod image_cache;

pub use image_cache::{ImageCache, ImageData};
