use crate::config::ScoutConfig;
use crate::error::Result;
use crate::extract::Extractor;
use crate::scrapers::loader::IncrementalLoader;
use crate::scrapers::traits::{PageSession, SessionLauncher, SessionRequest};
use crate::scrapers::types::ScrapeTarget;
use crate::writer::{BatchWriter, WriteSummary};
use tracing::{info, info_span, warn};

/// Drives one search page from launch to JSON file
pub struct ListingScraper<L> {
    launcher: L,
    config: ScoutConfig,
    extractor: Extractor,
    writer: BatchWriter,
}

impl<L: SessionLauncher> ListingScraper<L> {
    pub fn new(launcher: L, config: ScoutConfig) -> Result<Self> {
        let extractor = Extractor::new(&config.selectors, config.base_url()?)?;
        let writer = BatchWriter::new(config.output_dir.clone());
        Ok(Self {
            launcher,
            config,
            extractor,
            writer,
        })
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// Loads, extracts and writes one target.
    ///
    /// The browser session is closed before extraction starts, and on every
    /// early return.
    pub fn scrape(&self, target: &ScrapeTarget) -> Result<WriteSummary> {
        let _span = info_span!("scrape", target = %target.name).entered();
        let html = self.load_page(target)?;

        if let Some(dir) = &self.config.debug_dir {
            self.save_debug_page(dir, target, &html);
        }

        let records = self.extractor.extract(&html, target.kind, target.skip)?;
        self.writer.write(target.kind, &target.output, &records)
    }

    fn load_page(&self, target: &ScrapeTarget) -> Result<String> {
        let request = SessionRequest {
            url: &target.url,
            kind: target.kind,
            selectors: &self.config.selectors,
            browser: &self.config.browser,
        };
        let session = self.launcher.open(&request)?;

        let loader = IncrementalLoader::new(
            target.min_items,
            self.config.loader.max_total_wait(),
            self.config.loader.settle_delay(),
        );
        let outcome = loader.load(&session)?;
        info!("Loading finished with {} items: {:?}", outcome.count(), outcome);

        session.page_source()
    }

    fn save_debug_page(&self, dir: &std::path::Path, target: &ScrapeTarget, html: &str) {
        let path = dir.join(format!("{}.html", target.name));
        let saved = std::fs::create_dir_all(dir).and_then(|_| std::fs::write(&path, html));
        match saved {
            Ok(()) => info!("Saved page HTML to {} ({} bytes)", path.display(), html.len()),
            Err(e) => warn!("Could not save page HTML to {}: {}", path.display(), e),
        }
    }
}
