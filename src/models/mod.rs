use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for any optional field that could not be located on a card.
pub const SENTINEL: &str = "N/A";

/// What a search page lists
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Compound,
    Property,
}

impl ListingKind {
    /// Path fragment every detail link of this kind contains
    pub fn link_pattern(self) -> &'static str {
        match self {
            ListingKind::Compound => "/compound/",
            ListingKind::Property => "/property/",
        }
    }

    /// CSS selector for the card anchors of this kind
    pub fn link_selector(self) -> String {
        format!("a[href*='{}']", self.link_pattern())
    }

    /// Word used when reporting how many records were saved
    pub fn record_noun(self) -> &'static str {
        match self {
            ListingKind::Compound => "projects",
            ListingKind::Property => "properties",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            ListingKind::Compound => "compounds",
            ListingKind::Property => "properties",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingKind::Compound => f.write_str("compound"),
            ListingKind::Property => f.write_str("property"),
        }
    }
}

/// A compound (multi-unit project) card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundRecord {
    #[serde(rename = "Area")]
    pub area: String,
    #[serde(rename = "Project Name")]
    pub project_name: String,
    #[serde(rename = "Developer Name")]
    pub developer_name: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Property Types")]
    pub property_types: Vec<String>,
    #[serde(rename = "Developer Start Price")]
    pub developer_start_price: String,
    #[serde(rename = "Resale Start Price")]
    pub resale_start_price: String,
    /// Not shown on search cards; kept empty so every file has the column.
    #[serde(rename = "Land Area")]
    pub land_area: String,
    #[serde(rename = "Detail Page URL")]
    pub detail_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleType {
    #[serde(rename = "Developer Sale")]
    DeveloperSale,
    #[serde(rename = "Resale")]
    Resale,
}

/// A standalone unit card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(rename = "Area")]
    pub area: String,
    #[serde(rename = "Property Type")]
    pub property_type: String,
    #[serde(rename = "Project Name")]
    pub project_name: String,
    #[serde(rename = "BUA")]
    pub bua: String,
    #[serde(rename = "Beds")]
    pub beds: String,
    #[serde(rename = "Bathrooms")]
    pub bathrooms: String,
    #[serde(rename = "Down Payment")]
    pub down_payment: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Sale Type")]
    pub sale_type: SaleType,
    #[serde(rename = "Detail Page URL")]
    pub detail_url: String,
}

/// One extracted card, serialized as a flat JSON object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingRecord {
    Compound(CompoundRecord),
    Property(PropertyRecord),
}

impl ListingRecord {
    pub fn detail_url(&self) -> &str {
        match self {
            ListingRecord::Compound(c) => &c.detail_url,
            ListingRecord::Property(p) => &p.detail_url,
        }
    }
}
