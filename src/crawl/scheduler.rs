// src/crawl/scheduler.rs
// =============================================================================
// This module is the crawl engine.
//
// How it works:
// 1. Every seed URL becomes a CrawlTask with the full depth budget
// 2. A task is dispatched only if its URL wins the VisitedSet insert
// 3. Each dispatched task runs on its own tokio task:
//    fetch -> collect emails -> resolve links -> return child tasks
// 4. The scheduler collects finished tasks from a JoinSet (the frontier)
//    and dispatches their children with one less hop of depth
// 5. Repeat until the frontier is empty (or the run deadline passes)
//
// A Semaphore caps how many fetches are in flight at once, so a page with
// thousands of links can't open thousands of sockets.
//
// Rust concepts:
// - JoinSet: A collection of spawned tasks we can await one by one
// - Semaphore: Counting lock, each fetch holds one permit
// - checked_sub: Depth can't go below zero, we get None instead
// =============================================================================

use super::session::{CrawlReport, CrawlSession, SharedState};
use crate::extract::{self, Page};
use crate::fetch::Fetcher;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};
use url::Url;

// A URL waiting to be crawled
#[derive(Debug, Clone)]
struct CrawlTask {
    url: String,
    // The seed this task descends from; links are resolved against it
    base_url: Arc<Url>,
    depth_remaining: u32,
}

impl CrawlTask {
    fn seed(seed: &Url, depth: u32) -> Self {
        CrawlTask {
            url: seed.to_string(),
            base_url: Arc::new(seed.clone()),
            depth_remaining: depth,
        }
    }
}

// What a worker needs, cloned into every spawned task
#[derive(Clone)]
struct Worker {
    state: Arc<SharedState>,
    fetcher: Arc<dyn Fetcher>,
    limiter: Arc<Semaphore>,
}

impl CrawlSession {
    /// Crawls every seed and returns the sorted email list
    ///
    /// Seeds share this session's visited and email sets, so a page reachable
    /// from two seeds is fetched only once.
    pub async fn run(&self, seeds: &[Url]) -> CrawlReport {
        let worker = Worker {
            state: Arc::clone(&self.state),
            fetcher: Arc::clone(&self.fetcher),
            limiter: Arc::new(Semaphore::new(self.config.max_concurrency.max(1))),
        };

        let mut frontier = JoinSet::new();
        for seed in seeds {
            worker.dispatch(&mut frontier, CrawlTask::seed(seed, self.config.depth));
        }

        let deadline = self.config.deadline.map(|limit| Instant::now() + limit);
        let mut deadline_hit = false;

        loop {
            let next = match deadline {
                Some(at) => {
                    let waited = timeout_at(at, frontier.join_next()).await;
                    match waited {
                        Ok(next) => next,
                        Err(_elapsed) => {
                            tracing::warn!(
                                in_flight = frontier.len(),
                                "Crawl deadline reached, stopping remaining tasks"
                            );
                            frontier.abort_all();
                            deadline_hit = true;
                            break;
                        }
                    }
                }
                None => frontier.join_next().await,
            };

            let Some(joined) = next else {
                break;
            };

            match joined {
                Ok(children) => {
                    for child in children {
                        worker.dispatch(&mut frontier, child);
                    }
                }
                // A crashed task only loses its own page
                Err(e) if e.is_panic() => tracing::error!(error = %e, "Crawl task panicked"),
                Err(_) => {}
            }
        }

        // Drain aborted tasks so nothing outlives the run
        while frontier.join_next().await.is_some() {}

        self.report(deadline_hit)
    }
}

impl Worker {
    // Registers the URL in the visited set and spawns its task
    // If another task got there first, nothing happens
    fn dispatch(&self, frontier: &mut JoinSet<Vec<CrawlTask>>, task: CrawlTask) {
        if !self.state.visited.try_insert(&task.url) {
            tracing::debug!(url = %task.url, "Already visited");
            return;
        }

        self.state.stats.task_dispatched();
        let worker = self.clone();
        frontier.spawn(async move { worker.process(task).await });
    }

    // Fetches one page, records its emails and returns the links to follow
    async fn process(self, task: CrawlTask) -> Vec<CrawlTask> {
        let html = {
            // Only the fetch counts against the concurrency cap
            let Ok(_permit) = self.limiter.acquire().await else {
                return Vec::new();
            };
            tracing::info!(url = %task.url, depth = task.depth_remaining, "Scraping URL");
            self.fetcher.fetch(&task.url).await
        };

        let Some(html) = html else {
            self.state.stats.page_skipped();
            return Vec::new();
        };
        self.state.stats.page_fetched();

        let page = Page::parse(&html);
        self.collect_emails(&task, &page);
        self.expand_links(&task, &page)
    }

    fn collect_emails(&self, task: &CrawlTask, page: &Page) {
        let found = extract::extract_from_text(&page.text);
        if !found.is_empty() {
            tracing::info!(url = %task.url, emails = ?found, "Emails found");
        }
        self.state.emails.merge(&found);

        for href in page.hrefs.iter().filter(|href| extract::is_mailto(href)) {
            if let Some(email) = extract::extract_from_mailto(href) {
                if self.state.emails.try_insert(&email) {
                    tracing::debug!(url = %task.url, email = %email, "Email found in mailto link");
                }
            }
        }
    }

    fn expand_links(&self, task: &CrawlTask, page: &Page) -> Vec<CrawlTask> {
        // Depth 0: this page is a leaf
        let Some(child_depth) = task.depth_remaining.checked_sub(1) else {
            return Vec::new();
        };

        let mut children = Vec::new();

        for href in page.hrefs.iter().filter(|href| !extract::is_mailto(href)) {
            let Some(link) = extract::resolve(href, &task.base_url) else {
                tracing::debug!(href = %href, "Skipping malformed link");
                continue;
            };

            if !link.same_origin {
                tracing::debug!(url = %link.url, "Skipping off-origin link");
            } else if link.is_image {
                tracing::debug!(url = %link.url, "Skipping image link");
            } else if !self.state.visited.contains(&link.url) {
                children.push(CrawlTask {
                    url: link.url,
                    base_url: Arc::clone(&task.base_url),
                    depth_remaining: child_depth,
                });
            }
        }

        children
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why return child tasks instead of spawning them inside the worker?
//    - The JoinSet lives in run(), and only run() can push into it
//    - Workers stay simple: page in, links out
//
// 2. What is let-else?
//    - let Some(x) = value else { return ...; };
//    - Binds x if the pattern matches, otherwise runs the else block
//    - The else block must leave the function (return, break, continue)
//
// 3. Why Arc<Url> for base_url?
//    - Every task from one seed shares the same base URL
//    - Cloning an Arc bumps a counter instead of copying the URL
//
// 4. What does abort_all() do?
//    - Cancels every task still in the JoinSet at its next .await
//    - join_next() then returns a "cancelled" error for each of them
// -----------------------------------------------------------------------------
