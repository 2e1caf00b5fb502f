use super::row::{render_row, CardRow};
use crate::cache::ImageData;
use crate::models::ExploreCard;

/// Image area height used until an image arrives, and its lower bound after
pub const MIN_IMAGE_HEIGHT: f32 = 200.0;

/// Outcome of offering an arrived image to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageApply {
    /// The slot still shows the card and now displays the image
    Applied,
    /// The slot was reassigned since the request; the image was dropped
    Stale,
    /// The slot still shows the card but the image could not be loaded
    Unavailable,
}

/// A reusable display slot for one row.
///
/// The slot remembers which card it shows by the card's identity key, so an
/// image requested for an earlier occupant can be recognised and dropped.
#[derive(Debug, Default)]
pub struct RowSlot {
    card_id: Option<String>,
    row: Option<CardRow>,
    image: Option<ImageData>,
}

impl RowSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `card` in this slot, image pending
    pub fn configure(&mut self, card: &ExploreCard) {
        self.card_id = Some(card.id().to_string());
        self.row = Some(CardRow::from_card(card));
        self.image = None;
    }

    /// Rebuild the row from a newer copy of the card, keeping the image
    /// if the slot already shows that card
    pub fn refresh(&mut self, card: &ExploreCard) {
        if self.is_displaying(card.id()) {
            self.row = Some(CardRow::from_card(card));
        } else {
            self.configure(card);
        }
    }

    pub fn prepare_for_reuse(&mut self) {
        self.card_id = None;
        self.row = None;
        self.image = None;
    }

    pub fn card_id(&self) -> Option<&str> {
        self.card_id.as_deref()
    }

    pub fn is_displaying(&self, card_id: &str) -> bool {
        self.card_id.as_deref() == Some(card_id)
    }

    pub fn row(&self) -> Option<&CardRow> {
        self.row.as_ref()
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    /// Offer an image loaded for `card_id`
    pub fn apply_image(&mut self, card_id: &str, image: Option<ImageData>) -> ImageApply {
        if !self.is_displaying(card_id) {
            log::debug!(
                "Discarding image for {}, slot now shows {:?}",
                card_id,
                self.card_id
            );
            return ImageApply::Stale;
        }
        match image {
            Some(image) => {
                self.image = Some(image);
                ImageApply::Applied
            }
            None => ImageApply::Unavailable,
        }
    }

    /// Height of the image area at `available_width`, keeping the image's aspect ratio
    pub fn image_height(&self, available_width: f32) -> f32 {
        match &self.image {
            Some(image) => (available_width * image.aspect_ratio()).max(MIN_IMAGE_HEIGHT),
            None => MIN_IMAGE_HEIGHT,
        }
    }

    pub fn render(&self) -> Option<String> {
        self.row
            .as_ref()
            .map(|row| render_row(row, self.image.as_ref()))
    }
}
