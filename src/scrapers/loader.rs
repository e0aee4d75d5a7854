use crate::error::Result;
use crate::scrapers::traits::ListPage;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How a loading pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// At least the requested number of items is rendered
    Reached(usize),
    /// A scroll brought no new items
    Stalled(usize),
    /// The total wait budget ran out first
    TimedOut(usize),
}

impl LoadOutcome {
    pub fn count(self) -> usize {
        match self {
            LoadOutcome::Reached(n) | LoadOutcome::Stalled(n) | LoadOutcome::TimedOut(n) => n,
        }
    }
}

/// Scrolls an infinite list until enough items are rendered or it stops growing
#[derive(Debug, Clone)]
pub struct IncrementalLoader {
    pub min_items: usize,
    pub max_total_wait: Duration,
    pub settle_delay: Duration,
}

impl IncrementalLoader {
    pub fn new(min_items: usize, max_total_wait: Duration, settle_delay: Duration) -> Self {
        Self {
            min_items,
            max_total_wait,
            settle_delay,
        }
    }

    /// Polls, scrolls and settles until the goal, a stall or the budget.
    ///
    /// Falling short of `min_items` is not an error. Errors from the page
    /// (a vanished container, a dead browser) end the pass immediately.
    pub fn load<P: ListPage + ?Sized>(&self, page: &P) -> Result<LoadOutcome> {
        let started = Instant::now();
        let mut rounds = 0usize;

        loop {
            let count = page.count_items()?;
            if count >= self.min_items {
                info!("Loaded {} items (goal {}) after {} scrolls", count, self.min_items, rounds);
                return Ok(LoadOutcome::Reached(count));
            }

            page.scroll_to_bottom()?;
            rounds += 1;

            let remaining = self.max_total_wait.saturating_sub(started.elapsed());
            thread::sleep(self.settle_delay.min(remaining));

            let new_count = page.count_items()?;
            debug!("Scroll {}: {} -> {} items", rounds, count, new_count);

            if new_count == count {
                info!("List stopped growing at {} items after {} scrolls", new_count, rounds);
                return Ok(LoadOutcome::Stalled(new_count));
            }
            if started.elapsed() >= self.max_total_wait {
                info!("Gave up after {:?} with {} items", self.max_total_wait, new_count);
                return Ok(LoadOutcome::TimedOut(new_count));
            }
        }
    }
}
