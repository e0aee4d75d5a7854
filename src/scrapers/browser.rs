use crate::config::{BrowserSettings, Selectors};
use crate::error::{Result, ScrapeError};
use crate::scrapers::traits::{ListPage, PageSession, SessionLauncher, SessionRequest};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Slack on top of the loader budget before Chrome's idle watchdog fires
const IDLE_MARGIN: Duration = Duration::from_secs(60);

/// Launches a fresh headless Chrome for every session
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    /// Longest stretch the loader may keep the page busy
    pub max_total_wait: Duration,
}

impl ChromeLauncher {
    pub fn new(max_total_wait: Duration) -> Self {
        Self { max_total_wait }
    }

    fn launch_browser(&self, settings: &BrowserSettings) -> Result<Browser> {
        let options = LaunchOptions::default_builder()
            .headless(settings.headless)
            .sandbox(settings.sandbox)
            .window_size(Some((settings.window_width, settings.window_height)))
            .idle_browser_timeout(self.max_total_wait + IDLE_MARGIN)
            .build()
            .map_err(|e| ScrapeError::browser("Failed to build launch options", e))?;

        Browser::new(options).map_err(|e| ScrapeError::browser("Failed to launch Chrome browser", e))
    }
}

impl SessionLauncher for ChromeLauncher {
    type Session = BrowserSession;

    fn open(&self, request: &SessionRequest<'_>) -> Result<BrowserSession> {
        info!("Launching headless Chrome...");
        let browser = self.launch_browser(request.browser)?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::browser("Failed to open tab", e))?;

        info!("Opening {}", request.url);
        tab.navigate_to(request.url)
            .map_err(|e| ScrapeError::browser("Failed to navigate", e))?;
        tab.wait_until_navigated()
            .map_err(|e| ScrapeError::browser("Navigation did not finish", e))?;

        let timeout = request.browser.container_timeout();
        if let Err(e) = tab.wait_for_element_with_custom_timeout(&request.selectors.cards_container, timeout) {
            warn!("Cards container did not appear within {:?}: {}", timeout, e);
            return Err(ScrapeError::ContainerNotFound);
        }

        Ok(BrowserSession {
            count_script: count_script(request.selectors, &request.kind.link_selector()),
            scroll_script: scroll_script(request.selectors),
            tab,
            browser,
        })
    }
}

/// JSON-quotes a selector for embedding in a script
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Evaluates to the number of rendered items, or -1 when a container is missing
fn count_script(selectors: &Selectors, item: &str) -> String {
    format!(
        r#"(() => {{
            const scroller = document.querySelector({scroll});
            if (!scroller) return -1;
            const list = scroller.querySelector({inner});
            if (!list) return -1;
            return list.querySelectorAll({item}).length;
        }})()"#,
        scroll = js_string(&selectors.scroll_container),
        inner = js_string(&selectors.inner_list),
        item = js_string(item),
    )
}

fn scroll_script(selectors: &Selectors) -> String {
    format!(
        r#"(() => {{
            const scroller = document.querySelector({scroll});
            if (!scroller) return false;
            scroller.scrollTop = scroller.scrollHeight;
            return true;
        }})()"#,
        scroll = js_string(&selectors.scroll_container),
    )
}

/// Reads the value returned by the count script
fn item_count(value: &serde_json::Value) -> Result<usize> {
    match value.as_i64() {
        Some(n) if n >= 0 => Ok(n as usize),
        Some(_) => Err(ScrapeError::ContainerNotFound),
        None => Err(ScrapeError::Browser(format!("unexpected item count {}", value))),
    }
}

/// `false` from the scroll script means the scroller is gone
fn scroll_result(value: &serde_json::Value) -> Result<()> {
    match value.as_bool() {
        Some(true) => Ok(()),
        _ => Err(ScrapeError::ContainerNotFound),
    }
}

/// One Chrome process with one open tab
///
/// Dropping the session closes the tab and shuts the browser down.
pub struct BrowserSession {
    count_script: String,
    scroll_script: String,
    tab: Arc<Tab>,
    // Held for its Drop, which kills the Chrome process.
    #[allow(dead_code)]
    browser: Browser,
}

impl BrowserSession {
    fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| ScrapeError::browser("Script evaluation failed", e))?;
        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }
}

impl ListPage for BrowserSession {
    fn count_items(&self) -> Result<usize> {
        item_count(&self.evaluate(&self.count_script)?)
    }

    fn scroll_to_bottom(&self) -> Result<()> {
        scroll_result(&self.evaluate(&self.scroll_script)?)
    }
}

impl PageSession for BrowserSession {
    fn page_source(&self) -> Result<String> {
        self.tab
            .get_content()
            .map_err(|e| ScrapeError::browser("Could not read page HTML", e))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        debug!("Closing browser session");
        if let Err(e) = self.tab.close(false) {
            debug!("Tab close failed: {}", e);
        }
    }
}
