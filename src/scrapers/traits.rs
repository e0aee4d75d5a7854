use crate::config::{BrowserSettings, Selectors};
use crate::error::Result;
use crate::models::ListingKind;

/// A rendered search page that can be measured and scrolled
pub trait ListPage {
    /// Number of card anchors currently rendered in the list.
    ///
    /// Fails with `ContainerNotFound` when the scroll container or the inner
    /// list is gone.
    fn count_items(&self) -> Result<usize>;

    /// Scroll the list container to its bottom to trigger the next batch.
    fn scroll_to_bottom(&self) -> Result<()>;
}

/// An open page, held for the length of one scrape
///
/// Implementations release their browser resources on drop.
pub trait PageSession: ListPage {
    /// Full HTML of the document as currently rendered
    fn page_source(&self) -> Result<String>;
}

/// Everything a launcher needs to open a target page
#[derive(Debug, Clone, Copy)]
pub struct SessionRequest<'a> {
    pub url: &'a str,
    pub kind: ListingKind,
    pub selectors: &'a Selectors,
    pub browser: &'a BrowserSettings,
}

/// Opens a page and waits until its cards container is present
pub trait SessionLauncher: Send + Sync {
    type Session: PageSession;

    fn open(&self, request: &SessionRequest<'_>) -> Result<Self::Session>;
}
