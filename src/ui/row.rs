use crate::cache::ImageData;
use crate::models::ExploreCard;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MARKUP_TAG: Regex = Regex::new(r"<[^>]+>").expect("markup tag pattern");
}

/// Remove HTML tags, keeping their text content
pub fn strip_markup(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}

/// A content item as shown on a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowButton {
    pub label: String,
    pub target: String,
}

/// What one row displays for a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    pub top_description: Option<String>,
    pub title: String,
    pub promo_message: Option<String>,
    /// Markup already stripped
    pub bottom_description: Option<String>,
    pub buttons: Vec<RowButton>,
}

impl CardRow {
    pub fn from_card(card: &ExploreCard) -> Self {
        Self {
            top_description: card.top_description.clone(),
            title: card.title.clone(),
            promo_message: card.promo_message.clone(),
            bottom_description: card.bottom_description.as_deref().map(strip_markup),
            buttons: card
                .content_items()
                .iter()
                .map(|item| RowButton {
                    label: item.title.clone(),
                    target: item.target.clone(),
                })
                .collect(),
        }
    }
}

/// Render a row as text, top to bottom in on-screen order
pub fn render_row(row: &CardRow, image: Option<&ImageData>) -> String {
    let mut lines = Vec::new();

    match image {
        Some(image) => lines.push(format!("[image {}x{}]", image.width(), image.height())),
        None => lines.push("[loading image]".to_string()),
    }
    if let Some(top) = &row.top_description {
        lines.push(top.clone());
    }
    lines.push(row.title.clone());
    if let Some(promo) = &row.promo_message {
        lines.push(promo.clone());
    }
    if let Some(bottom) = &row.bottom_description {
        lines.push(bottom.clone());
    }
    if !row.buttons.is_empty() {
        let buttons: Vec<String> = row
            .buttons
            .iter()
            .map(|b| format!("[{}]", b.label))
            .collect();
        lines.push(buttons.join(" "));
    }

    lines.join("\n")
}
