//! Headless presentation layer for the explore screen
//!
//! Row view data, reusable row slots guarded against stale image arrivals,
//! the background image loader and content-item actions. Rendering is plain
//! text; a graphical front end would consume the same pieces.

mod action;
mod loader;
mod row;
mod screen;
mod slot;

pub use action::{activate, ActionDispatcher, LogDispatcher};
pub use loader::{DrainStats, ImageLoader, LoadedImage};
pub use row::{render_row, strip_markup, CardRow, RowButton};
pub use screen::{ExploreScreen, ScreenEvent, ScreenStatus, RETRY_MESSAGE};
pub use slot::{ImageApply, RowSlot, MIN_IMAGE_HEIGHT};
