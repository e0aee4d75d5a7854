//! Runtime configuration.
//!
//! Everything has a default matching the live Nawy site, so the TOML file only
//! needs the parts that differ. Class selectors live here because the site's
//! generated class names change with every deploy.

use crate::error::{Result, ScrapeError};
use crate::extract::Extractor;
use crate::scrapers::types::ScrapeTarget;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Directory the JSON files are written to
    pub output_dir: PathBuf,
    /// Origin that relative detail links are resolved against
    pub base_url: String,
    /// When set, the rendered page is saved here before extraction
    pub debug_dir: Option<PathBuf>,
    pub browser: BrowserSettings,
    pub loader: LoaderSettings,
    pub selectors: Selectors,
    pub targets: Vec<ScrapeTarget>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            base_url: "https://www.nawy.com".to_string(),
            debug_dir: None,
            browser: BrowserSettings::default(),
            loader: LoaderSettings::default(),
            selectors: Selectors::default(),
            targets: ScrapeTarget::defaults(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub headless: bool,
    pub sandbox: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// How long to wait for the cards container after navigation
    pub container_timeout_secs: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            window_width: 1920,
            window_height: 1080,
            container_timeout_secs: 15,
        }
    }
}

impl BrowserSettings {
    pub fn container_timeout(&self) -> Duration {
        Duration::from_secs(self.container_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    pub settle_delay_ms: u64,
    pub max_total_wait_secs: u64,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: 2000,
            max_total_wait_secs: 1800,
        }
    }
}

impl LoaderSettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn max_total_wait(&self) -> Duration {
        Duration::from_secs(self.max_total_wait_secs)
    }
}

/// CSS selectors for every element the loader and extractor look up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Selectors {
    /// Present once the result list has mounted
    pub cards_container: String,
    /// The element that actually scrolls
    pub scroll_container: String,
    /// Inner list holding the rendered cards, inside `scroll_container`
    pub inner_list: String,

    pub area: String,
    pub name: String,
    pub summary: String,
    pub property_type: String,
    pub card_footer: String,
    pub price_block: String,
    pub price_label: String,
    pub price_value: String,

    /// Area heading that precedes property cards
    pub preceding_area: String,
    pub details: String,
    pub detail_cell: String,
    pub down_payment: String,
    pub price_container: String,
    pub tag: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            cards_container: "div.cards-container".into(),
            scroll_container: "div.sc-88b4dfdb-0.cgVQXi".into(),
            inner_list: "div.sc-93b4050e-0.iJSftd".into(),
            area: ".area".into(),
            name: ".name".into(),
            summary: "h2".into(),
            property_type: "span.property-type".into(),
            card_footer: "div.card-footer".into(),
            price_block: "div.sc-a18c0201-0.HytCg".into(),
            price_label: "div.price-text".into(),
            price_value: "span.price".into(),
            preceding_area: "div.area".into(),
            details: "div.sc-234f71bd-1.fkOmQT".into(),
            detail_cell: "div".into(),
            down_payment: "div.down-payment-container".into(),
            price_container: "div.price-container".into(),
            tag: "p.tag".into(),
        }
    }
}

impl ScoutConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ScrapeError::Config(format!("TOML parsing error: {}", e)))
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::Config(format!("invalid base_url `{}`: {}", self.base_url, e)))
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.base_url()?;
        Extractor::new(&self.selectors, base)?;

        if self.targets.is_empty() {
            return Err(ScrapeError::Config("at least one target is required".into()));
        }
        if self.loader.max_total_wait_secs == 0 {
            return Err(ScrapeError::Config("loader.max_total_wait_secs must be positive".into()));
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if !seen.insert(target.tool_name.as_str()) {
                return Err(ScrapeError::Config(format!(
                    "duplicate tool name `{}`",
                    target.tool_name
                )));
            }
            if target.min_items == 0 {
                return Err(ScrapeError::Config(format!(
                    "target `{}`: min_items must be positive",
                    target.name
                )));
            }
            let output = Path::new(&target.output);
            if target.output.is_empty() || output.file_name() != Some(output.as_os_str()) {
                return Err(ScrapeError::Config(format!(
                    "target `{}`: output `{}` must be a plain file name",
                    target.name, target.output
                )));
            }
            Url::parse(&target.url).map_err(|e| {
                ScrapeError::Config(format!("target `{}`: invalid url: {}", target.name, e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingKind;

    #[test]
    fn default_config_is_valid() {
        let config = ScoutConfig::default();
        config.validate().unwrap();
        assert_eq!(config.loader.settle_delay(), Duration::from_secs(2));
        assert_eq!(config.loader.max_total_wait(), Duration::from_secs(1800));
        assert_eq!(config.targets.len(), 7);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ScoutConfig::from_toml_str(
            r#"
            output_dir = "out"

            [loader]
            settle_delay_ms = 500

            [selectors]
            scroll_container = "div.results"

            [[targets]]
            name = "north-properties"
            tool_name = "Scrape Nawy Property Listings North"
            description = "Remaining north properties"
            url = "https://www.nawy.com/search?category=property&areas=12"
            kind = "property"
            output = "property_listings_north.json"
            min_items = 3000
            skip = 1632
            "#,
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.loader.settle_delay_ms, 500);
        assert_eq!(config.loader.max_total_wait_secs, 1800);
        assert_eq!(config.selectors.scroll_container, "div.results");
        assert_eq!(config.selectors.inner_list, "div.sc-93b4050e-0.iJSftd");
        assert_eq!(config.targets.len(), 1);
        let target = &config.targets[0];
        assert_eq!(target.tool_name, "Scrape Nawy Property Listings North");
        assert_eq!(target.kind, ListingKind::Property);
        assert_eq!(target.skip, 1632);
    }

    #[test]
    fn example_file_parses() {
        let config = ScoutConfig::from_toml_str(include_str!("../scout.example.toml")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.debug_dir, Some(PathBuf::from("debug")));
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.targets[1].skip, 0);
    }

    #[test]
    fn rejects_duplicate_tool_names() {
        let mut config = ScoutConfig::default();
        let copy = config.targets[0].clone();
        config.targets.push(copy);
        assert!(matches!(config.validate(), Err(ScrapeError::Config(_))));
    }

    #[test]
    fn rejects_output_paths() {
        let mut config = ScoutConfig::default();
        config.targets[0].output = "../escape.json".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_selector() {
        let mut config = ScoutConfig::default();
        config.selectors.price_block = "div..broken".into();
        assert!(matches!(config.validate(), Err(ScrapeError::Selector { .. })));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = ScoutConfig::from_toml_str("output_dir = [").unwrap_err();
        assert!(err.to_string().starts_with("configuration error"));
    }
}
