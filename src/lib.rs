//! Scrapes compound and property listings from the Nawy search pages.
//!
//! Each configured region/kind is a [`ScrapeTarget`]. A [`ListingScraper`]
//! opens the page in headless Chrome, scrolls the result list until it is
//! loaded, extracts one record per card and writes them as a JSON array.
//! [`tools::ToolRegistry`] exposes every target as a zero-argument tool.

pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod models;
pub mod scrapers;
pub mod tools;
pub mod writer;

pub use config::ScoutConfig;
pub use error::{Result, ScrapeError};
pub use extract::Extractor;
pub use models::{CompoundRecord, ListingKind, ListingRecord, PropertyRecord, SaleType, SENTINEL};
pub use scrapers::{ChromeLauncher, ListingScraper, ScrapeTarget};
pub use tools::{Tool, ToolRegistry, ToolResponse};
pub use writer::{BatchWriter, WriteSummary};
