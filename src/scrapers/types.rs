use crate::models::ListingKind;
use serde::{Deserialize, Serialize};

const NORTH_AREAS: &str = "12%2C32%2C33%2C34%2C35%2C36%2C37";
const EAST_AREAS: &str = "2%2C9%2C10%2C16%2C8%2C28%2C41%2C44";
const WEST_AREAS: &str = "1%2C26%2C38%2C39%2C40%2C42";

/// One search page to scrape and where its records go
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapeTarget {
    /// Short identifier used in logs
    pub name: String,
    /// Name the tool is registered under
    pub tool_name: String,
    pub description: String,
    /// Search page URL
    pub url: String,
    pub kind: ListingKind,
    /// File name written under the output directory
    pub output: String,
    /// Stop scrolling once this many cards are rendered
    pub min_items: usize,
    /// Number of leading cards to drop before extraction, for resuming a
    /// run that already covered them. Zero scrapes everything.
    #[serde(default)]
    pub skip: usize,
}

impl ScrapeTarget {
    fn compounds(name: &str, tool_name: &str, query: &str, output: &str) -> Self {
        Self {
            name: name.to_string(),
            tool_name: tool_name.to_string(),
            description: format!(
                "Scrapes compound listings from Nawy and saves them to {}",
                output
            ),
            url: format!("https://www.nawy.com/search?{}", query),
            kind: ListingKind::Compound,
            output: output.to_string(),
            min_items: 650,
            skip: 0,
        }
    }

    fn properties(name: &str, tool_name: &str, areas: &str, output: &str) -> Self {
        Self {
            name: name.to_string(),
            tool_name: tool_name.to_string(),
            description: format!(
                "Scrapes property listings from Nawy and saves them to {}",
                output
            ),
            url: format!(
                "https://www.nawy.com/search?category=property&areas={}",
                areas
            ),
            kind: ListingKind::Property,
            output: output.to_string(),
            min_items: 3000,
            skip: 0,
        }
    }

    /// The Nawy regions scraped out of the box
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::compounds(
                "compounds",
                "Scrape Nawy Compounds",
                "category=compound",
                "compounds.json",
            ),
            Self::compounds(
                "north-compounds",
                "Scrape Nawy Compounds North",
                &format!("category=compound&areas={}", NORTH_AREAS),
                "compounds_north.json",
            ),
            Self::compounds(
                "east-compounds",
                "Scrape Nawy Compounds East",
                &format!("category=compound&areas={}", EAST_AREAS),
                "compounds_east.json",
            ),
            // The west search has never carried a category filter; only
            // compound links are picked up from it anyway.
            Self::compounds(
                "west-compounds",
                "Scrape Nawy Compounds West",
                &format!("areas={}", WEST_AREAS),
                "compounds_west.json",
            ),
            Self::properties(
                "north-properties",
                "Scrape Nawy Property Listings North",
                NORTH_AREAS,
                "property_listings_north.json",
            ),
            Self::properties(
                "east-properties",
                "Scrape Nawy Property Listings East",
                EAST_AREAS,
                "property_listings_east.json",
            ),
            Self::properties(
                "west-properties",
                "Scrape Nawy Property Listings West",
                WEST_AREAS,
                "property_listings_west.json",
            ),
        ]
    }
}
