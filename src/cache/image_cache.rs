use crate::api::image::{HttpImageFetcher, ImageFetcher};
use image::{DynamicImage, GenericImageView};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Decoded image, cheap to clone and share between rows
#[derive(Clone)]
pub struct ImageData {
    image: Arc<DynamicImage>,
}

impl ImageData {
    /// Decode encoded image bytes (PNG, JPEG, GIF, WebP)
    pub fn decode(bytes: &[u8]) -> image::ImageResult<Self> {
        Ok(Self::from(image::load_from_memory(bytes)?))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Height over width, used to size the row's image area
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.image.dimensions();
        if width == 0 {
            return 0.0;
        }
        height as f32 / width as f32
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Whether both handles share the same decoded pixels
    pub fn ptr_eq(&self, other: &ImageData) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}

impl From<DynamicImage> for ImageData {
    fn from(image: DynamicImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Process-lifetime image cache keyed by image URL.
///
/// Entries are only added on a successful fetch and decode, and are never
/// evicted. Concurrent misses for the same URL are not coalesced; the last
/// write wins.
pub struct ImageCache<F: ImageFetcher = HttpImageFetcher> {
    fetcher: F,
    images: Mutex<HashMap<String, ImageData>>,
}

impl<F: ImageFetcher> ImageCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            images: Mutex::new(HashMap::new()),
        }
    }

    fn images(&self) -> MutexGuard<'_, HashMap<String, ImageData>> {
        // A panic while holding the lock cannot leave the map half-written
        self.images.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get a cached image
    pub fn get(&self, url: &str) -> Option<ImageData> {
        self.images().get(url).cloned()
    }

    /// Store an image in the cache
    pub fn insert(&self, url: &str, image: ImageData) {
        self.images().insert(url.to_string(), image);
    }

    pub fn contains(&self, url: &str) -> bool {
        self.images().contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.images().len()
    }

    pub fn is_empty(&self) -> bool {
        self.images().is_empty()
    }

    /// Load an image, checking the cache first.
    ///
    /// Every failure (bad URL, transport, status, undecodable bytes) yields
    /// `None`; image problems never surface as errors.
    pub async fn load_image(&self, url: &str) -> Option<ImageData> {
        if let Some(image) = self.get(url) {
            log::debug!("Image cache hit for {}", url);
            return Some(image);
        }

        log::info!("Image cache miss for {}, fetching", url);
        let bytes = match self.fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to load image {}: {}", url, e);
                return None;
            }
        };

        match ImageData::decode(&bytes) {
            Ok(image) => {
                log::debug!(
                    "Cached image {} ({}x{})",
                    url,
                    image.width(),
                    image.height()
                );
                self.insert(url, image.clone());
                Some(image)
            }
            Err(e) => {
                log::warn!("Failed to decode image {}: {}", url, e);
                None
            }
        }
    }
}
