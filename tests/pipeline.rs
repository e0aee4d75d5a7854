use nawy_scout::scrapers::{ListPage, PageSession, SessionLauncher, SessionRequest};
use nawy_scout::{ListingKind, ListingRecord, ListingScraper, ScoutConfig, ScrapeError, ScrapeTarget, ToolRegistry, ToolResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

const COMPOUNDS: &str = include_str!("fixtures/compounds.html");

#[derive(Default)]
struct Counters {
    opened: AtomicUsize,
    live: AtomicUsize,
    scrolls: AtomicUsize,
}

/// Serves canned HTML and a fixed item count
struct FakeLauncher {
    html: String,
    items: Option<usize>,
    counters: Arc<Counters>,
}

struct FakeSession {
    html: String,
    items: Option<usize>,
    counters: Arc<Counters>,
}

impl SessionLauncher for FakeLauncher {
    type Session = FakeSession;

    fn open(&self, request: &SessionRequest<'_>) -> nawy_scout::Result<FakeSession> {
        assert!(request.url.starts_with("https://www.nawy.com/search"));
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession {
            html: self.html.clone(),
            items: self.items,
            counters: Arc::clone(&self.counters),
        })
    }
}

impl ListPage for FakeSession {
    fn count_items(&self) -> nawy_scout::Result<usize> {
        self.items.ok_or(ScrapeError::ContainerNotFound)
    }

    fn scroll_to_bottom(&self) -> nawy_scout::Result<()> {
        self.counters.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl PageSession for FakeSession {
    fn page_source(&self) -> nawy_scout::Result<String> {
        Ok(self.html.clone())
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
    }
}

fn target(kind: ListingKind, output: &str) -> ScrapeTarget {
    ScrapeTarget {
        name: "test".into(),
        tool_name: "Scrape Test".into(),
        description: "Test target".into(),
        url: "https://www.nawy.com/search?category=compound".into(),
        kind,
        output: output.into(),
        min_items: 650,
        skip: 0,
    }
}

fn setup(html: &str, items: Option<usize>) -> (TempDir, Arc<Counters>, ListingScraper<FakeLauncher>) {
    let dir = TempDir::new().unwrap();
    let mut config = ScoutConfig::default();
    config.output_dir = dir.path().to_path_buf();
    config.loader.settle_delay_ms = 0;
    config.loader.max_total_wait_secs = 5;
    config.targets = vec![target(ListingKind::Compound, "compounds_test.json")];

    let counters = Arc::new(Counters::default());
    let launcher = FakeLauncher {
        html: html.to_string(),
        items,
        counters: Arc::clone(&counters),
    };
    let scraper = ListingScraper::new(launcher, config).unwrap();
    (dir, counters, scraper)
}

#[test]
fn scrape_writes_file_and_releases_session() {
    let (dir, counters, scraper) = setup(COMPOUNDS, Some(5));
    let summary = scraper.scrape(&target(ListingKind::Compound, "compounds_test.json")).unwrap();

    assert_eq!(summary.count, 3);
    assert_eq!(summary.path, dir.path().join("compounds_test.json"));
    assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
    assert_eq!(counters.live.load(Ordering::SeqCst), 0);
    // Count never grows, so one scroll detects the stall.
    assert_eq!(counters.scrolls.load(Ordering::SeqCst), 1);

    let written: Vec<ListingRecord> =
        serde_json::from_str(&std::fs::read_to_string(&summary.path).unwrap()).unwrap();
    assert_eq!(written.len(), 3);
}

#[test]
fn empty_page_writes_nothing() {
    let html = r#"<div class="cards-container"></div>"#;
    let (dir, counters, scraper) = setup(html, Some(0));
    let err = scraper.scrape(&target(ListingKind::Compound, "compounds_test.json")).unwrap_err();

    assert!(matches!(err, ScrapeError::NoListings { .. }));
    assert!(!dir.path().join("compounds_test.json").exists());
    assert_eq!(counters.live.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_container_fails_and_releases() {
    let (dir, counters, scraper) = setup(COMPOUNDS, None);
    let err = scraper.scrape(&target(ListingKind::Compound, "compounds_test.json")).unwrap_err();

    assert!(matches!(err, ScrapeError::ContainerNotFound));
    assert_eq!(counters.scrolls.load(Ordering::SeqCst), 0);
    assert_eq!(counters.live.load(Ordering::SeqCst), 0);
    assert!(!dir.path().join("compounds_test.json").exists());
}

#[test]
fn debug_dir_keeps_rendered_page() {
    let dir = TempDir::new().unwrap();
    let mut config = ScoutConfig::default();
    config.output_dir = dir.path().join("out");
    config.debug_dir = Some(dir.path().join("debug"));
    config.loader.settle_delay_ms = 0;

    let launcher = FakeLauncher {
        html: COMPOUNDS.to_string(),
        items: Some(700),
        counters: Arc::new(Counters::default()),
    };
    let scraper = ListingScraper::new(launcher, config).unwrap();
    scraper.scrape(&target(ListingKind::Compound, "c.json")).unwrap();

    let saved = std::fs::read_to_string(dir.path().join("debug/test.html")).unwrap();
    assert_eq!(saved, COMPOUNDS);
}

#[tokio::test]
async fn tools_answer_in_json() {
    let (dir, _counters, scraper) = setup(COMPOUNDS, Some(5));
    let registry = ToolRegistry::for_targets(scraper);
    assert_eq!(registry.names(), vec!["Scrape Test"]);

    let raw = registry.get("Scrape Test").unwrap().call().await;
    assert_eq!(
        raw,
        r#"{"message":"Extracted 3 projects and saved to compounds_test.json","count":3}"#
    );
    assert!(dir.path().join("compounds_test.json").exists());
}

#[tokio::test]
async fn failing_tool_reports_error_string() {
    let (_dir, _counters, scraper) = setup(COMPOUNDS, None);
    let registry = ToolRegistry::for_targets(scraper);

    let runs = registry.run_sequence(&["Scrape Test"]).await;
    assert_eq!(
        runs[0].response,
        ToolResponse::Failure {
            error: "No cards container found on the page".into()
        }
    );
}
