// Corpus Market - catalog browser for the Taiwan Chinese corpus data market

pub mod application;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod models;
pub mod navigation;
pub mod types;
pub mod utils;
pub mod tui;       // Terminal User Interface

// Re-exports for convenience
pub use catalog::{Catalog, Category, RankingField};
pub use config::Config;
pub use models::{DatasetCollection, DatasetId, DatasetRecord};
pub use types::{AppError, AppResult};
