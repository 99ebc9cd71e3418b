// src/crawl/session.rs
// =============================================================================
// This module holds the state of one crawl run.
//
// Two sets are shared by every crawl task:
// - VisitedSet: URLs that already have a task (never crawled twice)
// - EmailSet: every address found so far (no duplicates)
//
// Both wrap a HashSet in a Mutex. try_insert() checks and inserts under the
// same lock, so when two tasks race on one URL exactly one of them wins.
//
// A CrawlSession bundles the sets with the config and the fetcher. Each
// session is independent, so tests can run many of them side by side.
//
// Rust concepts:
// - Arc<T>: Shared ownership across tokio tasks
// - Mutex<T>: Only one task touches the set at a time
// - Atomics: Lock-free counters for stats
// =============================================================================

use crate::config::CrawlConfig;
use crate::fetch::Fetcher;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

// A string set that many tasks can insert into at once
#[derive(Debug, Default)]
struct SharedSet {
    items: Mutex<HashSet<String>>,
}

impl SharedSet {
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panicking task can't leave a HashSet half-inserted, so a
        // poisoned lock still holds a valid set
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn try_insert(&self, item: &str) -> bool {
        let mut items = self.lock();
        if items.contains(item) {
            false
        } else {
            items.insert(item.to_string())
        }
    }

    fn contains(&self, item: &str) -> bool {
        self.lock().contains(item)
    }

    fn sorted(&self) -> Vec<String> {
        let mut items: Vec<String> = self.lock().iter().cloned().collect();
        items.sort();
        items
    }
}

/// URLs that have been dispatched in this session
#[derive(Debug, Default)]
pub struct VisitedSet(SharedSet);

impl VisitedSet {
    /// Returns true if this call added the URL, false if it was already there
    pub fn try_insert(&self, url: &str) -> bool {
        self.0.try_insert(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.0.contains(url)
    }

    /// All URLs, sorted ascending
    pub fn snapshot(&self) -> Vec<String> {
        self.0.sorted()
    }
}

/// Unique email addresses found in this session
#[derive(Debug, Default)]
pub struct EmailSet(SharedSet);

impl EmailSet {
    /// Returns true if this call added the address, false if it was already there
    pub fn try_insert(&self, email: &str) -> bool {
        self.0.try_insert(email)
    }

    /// Adds several addresses, returns how many were new
    pub fn merge<I>(&self, emails: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        emails
            .into_iter()
            .filter(|email| self.try_insert(email.as_ref()))
            .count()
    }

    /// All addresses, sorted ascending
    pub fn snapshot(&self) -> Vec<String> {
        self.0.sorted()
    }
}

// Counters for the end-of-run summary
#[derive(Debug, Default)]
pub struct CrawlStats {
    dispatched: AtomicUsize,
    fetched: AtomicUsize,
    skipped: AtomicUsize,
}

impl CrawlStats {
    pub fn task_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn page_fetched(&self) {
        self.fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn page_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            tasks_dispatched: self.dispatched.load(Ordering::Relaxed),
            pages_fetched: self.fetched.load(Ordering::Relaxed),
            pages_skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub tasks_dispatched: usize,
    pub pages_fetched: usize,
    pub pages_skipped: usize,
}

// Everything the crawl tasks share
#[derive(Debug, Default)]
pub(super) struct SharedState {
    pub visited: VisitedSet,
    pub emails: EmailSet,
    pub stats: CrawlStats,
}

/// The result of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// Unique addresses, sorted ascending
    pub emails: Vec<String>,
    /// Every distinct URL that got a task, sorted
    pub visited: Vec<String>,
    #[serde(flatten)]
    pub stats: StatsSnapshot,
    /// The run was cut short by its deadline
    pub deadline_hit: bool,
}

/// One crawl run: config, fetcher and the shared sets
pub struct CrawlSession {
    pub(super) config: CrawlConfig,
    pub(super) fetcher: Arc<dyn Fetcher>,
    pub(super) state: Arc<SharedState>,
}

impl CrawlSession {
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        CrawlSession {
            config,
            fetcher,
            state: Arc::new(SharedState::default()),
        }
    }

    pub(super) fn report(&self, deadline_hit: bool) -> CrawlReport {
        CrawlReport {
            emails: self.state.emails.snapshot(),
            visited: self.state.visited.snapshot(),
            stats: self.state.stats.snapshot(),
            deadline_hit,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why std::sync::Mutex and not tokio::sync::Mutex?
//    - The lock is never held across an .await
//    - A std Mutex is faster for short critical sections like this
//
// 2. What is a poisoned lock?
//    - If a thread panics while holding a Mutex, the Mutex is marked poisoned
//    - lock() then returns Err, but the data inside is still reachable
//
// 3. What is Ordering::Relaxed?
//    - The weakest memory ordering for atomics
//    - Fine for counters we only read at the end of the run
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_insert_only_once() {
        let visited = VisitedSet::default();
        assert!(visited.try_insert("https://example.com/"));
        assert!(!visited.try_insert("https://example.com/"));
        assert_eq!(visited.snapshot(), vec!["https://example.com/"]);
        assert!(visited.contains("https://example.com/"));
    }

    #[test]
    fn test_email_snapshot_is_sorted() {
        let emails = EmailSet::default();
        let added = emails.merge(["d@x.com", "b@x.com", "a@x.com", "b@x.com", "C@x.com"]);
        assert_eq!(added, 4);
        assert_eq!(
            emails.snapshot(),
            vec!["C@x.com", "a@x.com", "b@x.com", "d@x.com"]
        );
    }

    #[test]
    fn test_concurrent_inserts_have_one_winner() {
        let visited = Arc::new(VisitedSet::default());

        let winners: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let visited = Arc::clone(&visited);
                    scope.spawn(move || {
                        (0..100)
                            .filter(|i| visited.try_insert(&format!("https://example.com/{}", i)))
                            .count()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(winners, 100);
        assert_eq!(visited.snapshot().len(), 100);
    }

    #[test]
    fn test_stats_snapshot() {
        let stats = CrawlStats::default();
        stats.task_dispatched();
        stats.task_dispatched();
        stats.page_fetched();
        stats.page_skipped();
        assert_eq!(
            stats.snapshot(),
            StatsSnapshot {
                tasks_dispatched: 2,
                pages_fetched: 1,
                pages_skipped: 1,
            }
        );
    }
}
