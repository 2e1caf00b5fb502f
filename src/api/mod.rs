//! HTTP clients for the explore feed and card images

pub mod explore;
pub mod image;

pub use explore::{fetch_explore_data_from, ExploreClient};
pub use image::{fetch_image, HttpImageFetcher, ImageFetcher};
