pub mod browser;
pub mod loader;
pub mod nawy;
pub mod traits;
pub mod types;

pub use browser::{BrowserSession, ChromeLauncher};
pub use loader::{IncrementalLoader, LoadOutcome};
pub use nawy::ListingScraper;
pub use traits::{ListPage, PageSession, SessionLauncher, SessionRequest};
pub use types::ScrapeTarget;
