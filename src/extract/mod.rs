//! Turns a fully loaded search page into listing records.

pub mod dom;
pub mod text;

use crate::config::Selectors;
use crate::error::{Result, ScrapeError};
use crate::models::{
    CompoundRecord, ListingKind, ListingRecord, PropertyRecord, SaleType, SENTINEL,
};
use dom::{find_next, find_previous, first_match, joined_text, stripped_text};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn or_sentinel(value: Option<String>) -> String {
    value.unwrap_or_else(|| SENTINEL.to_string())
}

/// Blank text counts as missing on compound cards.
fn non_blank(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Compiled selectors plus the origin detail links are resolved against
#[derive(Debug)]
pub struct Extractor {
    base_url: Url,
    cards_container: Selector,
    compound_link: Selector,
    property_link: Selector,
    area: Selector,
    name: Selector,
    summary: Selector,
    property_type: Selector,
    card_footer: Selector,
    price_block: Selector,
    price_label: Selector,
    price_value: Selector,
    preceding_area: Selector,
    details: Selector,
    detail_cell: Selector,
    down_payment: Selector,
    price_container: Selector,
    tag: Selector,
}

impl Extractor {
    pub fn new(selectors: &Selectors, base_url: Url) -> Result<Self> {
        Ok(Self {
            base_url,
            cards_container: parse_selector(&selectors.cards_container)?,
            compound_link: parse_selector(&ListingKind::Compound.link_selector())?,
            property_link: parse_selector(&ListingKind::Property.link_selector())?,
            area: parse_selector(&selectors.area)?,
            name: parse_selector(&selectors.name)?,
            summary: parse_selector(&selectors.summary)?,
            property_type: parse_selector(&selectors.property_type)?,
            card_footer: parse_selector(&selectors.card_footer)?,
            price_block: parse_selector(&selectors.price_block)?,
            price_label: parse_selector(&selectors.price_label)?,
            price_value: parse_selector(&selectors.price_value)?,
            preceding_area: parse_selector(&selectors.preceding_area)?,
            details: parse_selector(&selectors.details)?,
            detail_cell: parse_selector(&selectors.detail_cell)?,
            down_payment: parse_selector(&selectors.down_payment)?,
            price_container: parse_selector(&selectors.price_container)?,
            tag: parse_selector(&selectors.tag)?,
        })
    }

    /// Extracts one record per distinct detail link.
    ///
    /// The first `skip` card anchors are dropped before anything else. A card
    /// that fails to map is logged and skipped; the pass only fails when no
    /// anchors or no records are left.
    pub fn extract(&self, html: &str, kind: ListingKind, skip: usize) -> Result<Vec<ListingRecord>> {
        let document = Html::parse_document(html);
        let container = document
            .select(&self.cards_container)
            .next()
            .ok_or(ScrapeError::ContainerNotFound)?;

        let link = match kind {
            ListingKind::Compound => &self.compound_link,
            ListingKind::Property => &self.property_link,
        };
        let cards: Vec<ElementRef<'_>> = container.select(link).skip(skip).collect();
        info!("Found {} {} cards (skipped {})", cards.len(), kind, skip);

        if cards.is_empty() {
            return Err(ScrapeError::NoListings { kind });
        }

        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for (idx, card) in cards.iter().enumerate() {
            let href = match card.value().attr("href") {
                Some(href) if !href.is_empty() => href,
                _ => continue,
            };
            if !seen.insert(href) {
                continue;
            }

            let detail_url = match self.base_url.join(href) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    warn!("Skipping card {} ({}): {}", idx, href, e);
                    continue;
                }
            };

            let record = match kind {
                ListingKind::Compound => ListingRecord::Compound(self.compound(*card, detail_url)),
                ListingKind::Property => ListingRecord::Property(self.property(*card, detail_url)),
            };
            debug!("Card {}: {}", idx, record.detail_url());
            records.push(record);
        }

        if records.is_empty() {
            return Err(ScrapeError::NoValidRecords { kind });
        }

        info!("Extracted {} {} records", records.len(), kind);
        Ok(records)
    }

    fn compound(&self, card: ElementRef<'_>, detail_url: String) -> CompoundRecord {
        let area = first_match(card, &self.area).map(stripped_text).and_then(non_blank);
        let name = first_match(card, &self.name).map(stripped_text).and_then(non_blank);
        let summary = find_next(card, &self.summary).map(stripped_text).and_then(non_blank);

        let property_types = card.select(&self.property_type).map(stripped_text).collect();

        let mut developer_price = None;
        let mut resale_price = None;
        if let Some(footer) = find_next(card, &self.card_footer) {
            for block in footer.select(&self.price_block) {
                let label = first_match(block, &self.price_label);
                let value = first_match(block, &self.price_value);
                if let (Some(label), Some(value)) = (label, value) {
                    let label = label.text().collect::<String>();
                    if label.contains("Developer Start Price") {
                        developer_price = non_blank(stripped_text(value));
                    } else if label.contains("Resale Start Price") {
                        resale_price = non_blank(stripped_text(value));
                    }
                }
            }
        }

        let developer_name = summary.as_deref().and_then(text::developer_name);

        CompoundRecord {
            area: or_sentinel(area),
            project_name: or_sentinel(name),
            developer_name: or_sentinel(developer_name),
            summary: or_sentinel(summary),
            property_types,
            developer_start_price: or_sentinel(developer_price),
            resale_start_price: or_sentinel(resale_price),
            land_area: String::new(),
            detail_url,
        }
    }

    fn property(&self, card: ElementRef<'_>, detail_url: String) -> PropertyRecord {
        let area = find_previous(card, &self.preceding_area).map(stripped_text);

        let (property_type, project_name) = match first_match(card, &self.name) {
            Some(name) => {
                let (kind, project) = text::split_name(&stripped_text(name));
                (kind, or_sentinel(project))
            }
            None => (SENTINEL.to_string(), SENTINEL.to_string()),
        };

        let mut bua = SENTINEL.to_string();
        let mut beds = SENTINEL.to_string();
        let mut bathrooms = SENTINEL.to_string();
        if let Some(details) = first_match(card, &self.details) {
            let cells: Vec<String> = details.select(&self.detail_cell).map(stripped_text).collect();
            if let [first, second, third, ..] = cells.as_slice() {
                bua = first.clone();
                beds = second.clone();
                bathrooms = third.clone();
            }
        }

        let footer = find_next(card, &self.card_footer);
        let down_payment = footer
            .and_then(|f| first_match(f, &self.down_payment))
            .map(|dp| joined_text(dp, " "));
        let price = footer
            .and_then(|f| first_match(f, &self.price_container))
            .and_then(|pc| first_match(pc, &self.price_value))
            .map(|span| text::normalize_price(&joined_text(span, " ")));

        let resale = card
            .select(&self.tag)
            .any(|tag| stripped_text(tag).to_lowercase().contains("resale"));

        PropertyRecord {
            area: or_sentinel(area),
            property_type,
            project_name,
            bua,
            beds,
            bathrooms,
            down_payment: or_sentinel(down_payment),
            price: or_sentinel(price),
            sale_type: if resale { SaleType::Resale } else { SaleType::DeveloperSale },
            detail_url,
        }
    }
}
