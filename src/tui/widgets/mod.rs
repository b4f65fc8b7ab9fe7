//! TUI Widgets
//!
//! Cards and modal dialogs for the corpus market TUI.

mod acknowledgment;
mod application_form;
mod cards;

pub use acknowledgment::render_acknowledgment;
pub use application_form::render_application_form;
pub use cards::{render_category_card, render_dataset_card, CardKind, DATASET_CARD_HEIGHT};
