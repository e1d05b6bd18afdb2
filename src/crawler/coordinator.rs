//! Crawler coordinator - depth-bounded, dedup-guarded concurrent expansion
//!
//! The coordinator owns everything shared between branches of one crawl:
//! - The visited set (atomic test-and-set per address)
//! - The frontier and the bounded worker pool draining it
//! - The join barrier `wait()` blocks on
//! - The records of finished units
//!
//! `crawl()` never blocks: it claims the address and queues a task. Workers
//! fetch, extract links and feed newly claimed children back into the
//! frontier before releasing their own unit, so the barrier only reaches zero
//! once the whole tree has drained.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::barrier::JoinBarrier;
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::parser::{parse_page, parse_page_resolved, ParsedPage};
use crate::crawler::scheduler::{CrawlTask, Frontier, ScheduledTask, Scheduler};
use crate::output::{CrawlRecord, CrawlReport};
use crate::state::{VisitState, VisitedSet};
use crate::url::is_http_address;
use crate::WebcError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::{CancellationToken, DropGuard};
use url::Url;

/// Runtime knobs for one coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Maximum number of fetches in flight at once
    pub max_concurrent_fetches: usize,

    /// Resolve relative link targets against the page address
    pub resolve_relative: bool,

    /// Cancel the crawl this long after the coordinator is created
    pub deadline: Option<Duration>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        CrawlOptions::from(&CrawlerConfig::default())
    }
}

impl From<&CrawlerConfig> for CrawlOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_concurrent_fetches: config.max_concurrent_fetches as usize,
            resolve_relative: config.resolve_relative,
            deadline: config.deadline(),
        }
    }
}

/// Main crawler coordinator structure
///
/// Must be created inside a tokio runtime: construction spawns the
/// dispatcher that drains the frontier. Dropping the coordinator stops it.
pub struct Coordinator {
    inner: Arc<Inner>,
    _shutdown: DropGuard,
}

/// State shared between the coordinator handle, the dispatcher and workers
struct Inner {
    fetcher: Arc<dyn Fetch>,
    visited: VisitedSet,
    frontier: Frontier,
    barrier: JoinBarrier,
    records: Mutex<Vec<CrawlRecord>>,
    cancel: CancellationToken,
    resolve_relative: bool,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Transport used for every fetch
    /// * `options` - Concurrency ceiling, link resolution and deadline
    pub fn new(fetcher: Arc<dyn Fetch>, options: CrawlOptions) -> Self {
        Self::with_cancellation(fetcher, options, CancellationToken::new())
    }

    /// Creates a coordinator that also stops when `cancel` is triggered
    pub fn with_cancellation(
        fetcher: Arc<dyn Fetch>,
        options: CrawlOptions,
        cancel: CancellationToken,
    ) -> Self {
        let (frontier, scheduler) = Scheduler::new(options.max_concurrent_fetches);
        let shutdown = CancellationToken::new();

        let inner = Arc::new(Inner {
            fetcher,
            visited: VisitedSet::new(),
            frontier,
            barrier: JoinBarrier::new(),
            records: Mutex::new(Vec::new()),
            cancel,
            resolve_relative: options.resolve_relative,
        });

        tokio::spawn(dispatch(Arc::clone(&inner), scheduler, shutdown.clone()));

        if let Some(deadline) = options.deadline {
            tokio::spawn(enforce_deadline(
                deadline,
                inner.cancel.clone(),
                shutdown.clone(),
            ));
        }

        Self {
            inner,
            _shutdown: shutdown.drop_guard(),
        }
    }

    /// Schedules `address` for crawling with the given depth budget
    ///
    /// Returns immediately. Nothing is scheduled when the budget is zero or
    /// the address was already claimed by this coordinator.
    ///
    /// # Returns
    ///
    /// True if a new task was queued
    pub fn crawl(&self, address: &str, remaining_depth: u32) -> bool {
        self.inner.schedule(address, remaining_depth)
    }

    /// Waits until every scheduled task, transitively, has finished
    ///
    /// Returns the records of all units that finished since the previous
    /// call. Fetch failures are inside the report, never returned as errors.
    pub async fn wait(&self) -> CrawlReport {
        self.inner.barrier.wait().await;
        let records = std::mem::take(&mut *self.inner.lock_records());
        CrawlReport::new(records)
    }

    /// Cooperatively aborts the crawl
    ///
    /// Queued tasks finish as cancelled without fetching and in-flight
    /// fetches are abandoned. `wait()` still returns.
    pub fn cancel(&self) {
        self.inner.cancel.cancel();
    }

    /// Token that cancels this crawl when triggered
    pub fn cancellation_token(&self) -> CancellationToken {
        self.inner.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    /// The set of addresses this coordinator has claimed
    pub fn visited(&self) -> &VisitedSet {
        &self.inner.visited
    }

    /// Number of units queued or running
    pub fn outstanding(&self) -> usize {
        self.inner.barrier.outstanding()
    }
}

impl Inner {
    /// Depth check, atomic claim, barrier registration and enqueue
    fn schedule(&self, address: &str, remaining_depth: u32) -> bool {
        if remaining_depth == 0 {
            tracing::trace!("Depth budget exhausted at {}", address);
            return false;
        }

        if !self.visited.try_visit(address) {
            tracing::trace!("Already visited: {}", address);
            return false;
        }

        let task = CrawlTask::new(address.to_string(), remaining_depth, self.barrier.register());

        match self.frontier.push(task) {
            Ok(()) => {
                tracing::debug!("Queued {} (remaining depth {})", address, remaining_depth);
                true
            }
            Err(task) => {
                // Dispatcher is gone; the task's unit is released as it drops here
                tracing::warn!("Frontier closed, dropping {}", task.address());
                self.visited.finish(task.address(), VisitState::Failed);
                false
            }
        }
    }

    /// Runs one fetch-and-expand unit
    async fn process(&self, scheduled: ScheduledTask) {
        let ScheduledTask { task, _permit } = scheduled;

        let record = if self.cancel.is_cancelled() {
            tracing::debug!("Skipping {}: crawl cancelled", task.address());
            CrawlRecord::cancelled(&task)
        } else {
            self.fetch_and_expand(&task).await
        };

        self.visited
            .finish(task.address(), record.outcome.visit_state());
        self.lock_records().push(record);
        // `task` drops last, releasing its barrier unit after the record is stored
    }

    async fn fetch_and_expand(&self, task: &CrawlTask) -> CrawlRecord {
        tracing::info!("visiting {}", task.address());

        let fetched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            result = self.fetcher.fetch(task.address()) => Some(result),
        };

        let content = match fetched {
            None => {
                tracing::debug!("Abandoned fetch of {}: crawl cancelled", task.address());
                return CrawlRecord::cancelled(task);
            }
            Some(Err(e)) => {
                tracing::warn!("{}", e);
                return CrawlRecord::failed(task, e);
            }
            Some(Ok(content)) => content,
        };

        let page = self.parse(task.address(), &content);

        let mut queued = 0;
        for link in &page.links {
            if is_http_address(link) && self.schedule(link, task.remaining_depth() - 1) {
                queued += 1;
            }
        }

        tracing::debug!(
            "{}: {} links found, {} new tasks queued",
            task.address(),
            page.links.len(),
            queued
        );

        CrawlRecord::succeeded(task, page.title, page.links)
    }

    fn parse(&self, address: &str, content: &str) -> ParsedPage {
        if self.resolve_relative {
            if let Ok(base) = Url::parse(address) {
                return parse_page_resolved(content, &base);
            }
        }
        parse_page(content)
    }

    fn lock_records(&self) -> MutexGuard<'_, Vec<CrawlRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drains the frontier, running each task on its own tokio task
async fn dispatch(inner: Arc<Inner>, mut scheduler: Scheduler, shutdown: CancellationToken) {
    loop {
        let scheduled = tokio::select! {
            _ = shutdown.cancelled() => break,
            next = scheduler.next_task() => match next {
                Some(scheduled) => scheduled,
                None => break,
            },
        };

        let inner = Arc::clone(&inner);
        tokio::spawn(async move {
            inner.process(scheduled).await;
        });
    }

    tracing::debug!("Dispatcher stopped");
}

/// Cancels the crawl once the deadline passes
async fn enforce_deadline(
    deadline: Duration,
    cancel: CancellationToken,
    shutdown: CancellationToken,
) {
    tokio::select! {
        _ = tokio::time::sleep(deadline) => {
            tracing::warn!("Crawl deadline of {:?} reached, cancelling", deadline);
            cancel.cancel();
        }
        _ = shutdown.cancelled() => {}
        _ = cancel.cancelled() => {}
    }
}

/// Runs the main crawl operation
///
/// This function orchestrates the entire crawl process:
///
/// 1. Build the HTTP client from the configuration
/// 2. Create a coordinator with the configured concurrency and deadline
/// 3. Schedule the seed with `max-depth` as its budget
/// 4. Wait for the whole tree to drain
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The address to start from
///
/// # Returns
///
/// * `Ok(CrawlReport)` - One record per fetched address
/// * `Err(WebcError)` - The HTTP client could not be built
///
/// # Example
///
/// ```no_run
/// use webc::config::Config;
/// use webc::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(&Config::default(), "https://example.com/").await?;
/// println!("{} pages fetched", report.succeeded);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, seed: &str) -> Result<CrawlReport, WebcError> {
    let fetcher = HttpFetcher::from_config(config)?;
    let coordinator = Coordinator::new(Arc::new(fetcher), CrawlOptions::from(&config.crawler));
    Ok(crawl_to_completion(&coordinator, seed, config.crawler.max_depth).await)
}

/// Schedules the seed on an existing coordinator and waits for the report
pub async fn crawl_to_completion(
    coordinator: &Coordinator,
    seed: &str,
    max_depth: u32,
) -> CrawlReport {
    tracing::info!("Starting crawl of {} (max depth {})", seed, max_depth);
    let start_time = std::time::Instant::now();

    coordinator.crawl(seed, max_depth);
    let report = coordinator.wait().await;

    tracing::info!(
        "Crawl completed: {} succeeded, {} failed, {} cancelled in {:?}",
        report.succeeded,
        report.failed,
        report.cancelled,
        start_time.elapsed()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::{FetchError, FetchErrorKind};
    use crate::output::CrawlOutcome;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory page graph with per-address fetch counters
    #[derive(Default)]
    struct PageGraph {
        pages: HashMap<String, Result<String, FetchErrorKind>>,
        fetches: Mutex<HashMap<String, usize>>,
        delay: Option<Duration>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl PageGraph {
        fn new() -> Self {
            Self::default()
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Adds a page linking to each of `links`
        fn page(mut self, address: &str, links: &[&str]) -> Self {
            let body: String = links
                .iter()
                .map(|l| format!(r#"<a href="{}">link</a>"#, l))
                .collect();
            self.pages.insert(
                address.to_string(),
                Ok(format!("<html><body>{}</body></html>", body)),
            );
            self
        }

        fn raw(mut self, address: &str, body: &str) -> Self {
            self.pages.insert(address.to_string(), Ok(body.to_string()));
            self
        }

        fn failing(mut self, address: &str, kind: FetchErrorKind) -> Self {
            self.pages.insert(address.to_string(), Err(kind));
            self
        }

        fn fetch_count(&self, address: &str) -> usize {
            self.fetches
                .lock()
                .unwrap()
                .get(address)
                .copied()
                .unwrap_or(0)
        }

        fn total_fetches(&self) -> usize {
            self.fetches.lock().unwrap().values().sum()
        }
    }

    #[async_trait]
    impl Fetch for PageGraph {
        async fn fetch(&self, address: &str) -> Result<String, FetchError> {
            *self
                .fetches
                .lock()
                .unwrap()
                .entry(address.to_string())
                .or_insert(0) += 1;

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match self.pages.get(address) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(kind)) => Err(FetchError::new(address, kind.clone())),
                None => Err(FetchError::new(address, FetchErrorKind::HttpStatus(404))),
            }
        }
    }

    fn coordinator(graph: &Arc<PageGraph>) -> Coordinator {
        Coordinator::new(graph.clone(), CrawlOptions::default())
    }

    async fn wait_bounded(coordinator: &Coordinator) -> CrawlReport {
        tokio::time::timeout(Duration::from_secs(10), coordinator.wait())
            .await
            .expect("crawl did not terminate")
    }

    #[tokio::test]
    async fn test_diamond_fetches_shared_child_once() {
        let graph = Arc::new(
            PageGraph::new()
                .with_delay(Duration::from_millis(10))
                .page("https://a.test/", &["https://b.test/", "https://c.test/"])
                .page("https://b.test/", &["https://d.test/"])
                .page("https://c.test/", &["https://d.test/"])
                .page("https://d.test/", &[]),
        );
        let coordinator = coordinator(&graph);

        coordinator.crawl("https://a.test/", 3);
        let report = wait_bounded(&coordinator).await;

        assert_eq!(graph.fetch_count("https://d.test/"), 1);
        assert_eq!(graph.total_fetches(), 4);
        assert_eq!(report.succeeded, 4);
        assert!(report.all_succeeded());
    }

    #[tokio::test]
    async fn test_zero_depth_fetches_nothing() {
        let graph = Arc::new(PageGraph::new().page("https://a.test/", &[]));
        let coordinator = coordinator(&graph);

        assert!(!coordinator.crawl("https://a.test/", 0));
        let report = wait_bounded(&coordinator).await;

        assert_eq!(graph.total_fetches(), 0);
        assert!(report.is_empty());
        // Nothing is recorded at the boundary
        assert!(!coordinator.visited().contains("https://a.test/"));
    }

    #[tokio::test]
    async fn test_depth_bounds_chain() {
        // Chain of N + 2 nodes crawled with depth N
        let depth = 3;
        let nodes: Vec<String> = (0..depth + 2).map(|i| format!("https://n{}.test/", i)).collect();
        let mut graph = PageGraph::new();
        for pair in nodes.windows(2) {
            graph = graph.page(&pair[0], &[pair[1].as_str()]);
        }
        graph = graph.page(nodes.last().unwrap(), &[]);
        let graph = Arc::new(graph);
        let coordinator = coordinator(&graph);

        coordinator.crawl(&nodes[0], depth as u32);
        let report = wait_bounded(&coordinator).await;

        // Depth N fetches the seed and the N - 1 hops after it
        for node in &nodes[..depth] {
            assert_eq!(graph.fetch_count(node), 1, "{} should be fetched", node);
        }
        for node in &nodes[depth..] {
            assert_eq!(graph.fetch_count(node), 0, "{} is beyond the budget", node);
        }
        assert_eq!(report.total(), depth);
        assert_eq!(report.get(&nodes[0]).unwrap().remaining_depth, depth as u32);
        assert_eq!(report.get(&nodes[depth - 1]).unwrap().remaining_depth, 1);
    }

    #[tokio::test]
    async fn test_failure_is_isolated_to_its_branch() {
        let graph = Arc::new(
            PageGraph::new()
                .page("https://a.test/", &["https://b.test/", "https://c.test/"])
                .failing(
                    "https://b.test/",
                    FetchErrorKind::Connect("refused".to_string()),
                )
                .page("https://c.test/", &["https://c1.test/"])
                .page("https://c1.test/", &[]),
        );
        let coordinator = coordinator(&graph);

        coordinator.crawl("https://a.test/", 3);
        let report = wait_bounded(&coordinator).await;

        assert_eq!(graph.fetch_count("https://c.test/"), 1);
        assert_eq!(graph.fetch_count("https://c1.test/"), 1);
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.failed, 1);

        let failed = report.get("https://b.test/").unwrap();
        assert_eq!(failed.outcome, CrawlOutcome::Failed);
        let error = failed.error.as_ref().unwrap();
        assert_eq!(error.address, "https://b.test/");
        assert!(matches!(error.kind, FetchErrorKind::Connect(_)));

        assert_eq!(
            coordinator.visited().state("https://b.test/"),
            Some(VisitState::Failed)
        );
        assert_eq!(
            coordinator.visited().state("https://c1.test/"),
            Some(VisitState::Succeeded)
        );
    }

    #[tokio::test]
    async fn test_failed_seed_still_completes() {
        let graph = Arc::new(PageGraph::new());
        let coordinator = coordinator(&graph);

        coordinator.crawl("https://missing.test/", 2);
        let report = wait_bounded(&coordinator).await;

        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 0);
        assert!(!report.all_succeeded());
    }

    #[tokio::test]
    async fn test_non_http_links_not_followed_or_recorded() {
        let graph = Arc::new(
            PageGraph::new()
                .raw(
                    "https://a.test/",
                    r#"<a href="mailto:x@a.test">m</a>
                       <a href="/relative">r</a>
                       <a href="javascript:void(0)">j</a>
                       <a href="https://b.test/">b</a>"#,
                )
                .page("https://b.test/", &[]),
        );
        let coordinator = coordinator(&graph);

        coordinator.crawl("https://a.test/", 2);
        let report = wait_bounded(&coordinator).await;

        assert_eq!(graph.total_fetches(), 2);
        assert_eq!(
            report.get("https://a.test/").unwrap().discovered_links,
            vec!["https://b.test/".to_string()]
        );
        assert!(!coordinator.visited().contains("mailto:x@a.test"));
        assert!(!coordinator.visited().contains("/relative"));
        assert_eq!(coordinator.visited().len(), 2);
    }

    #[tokio::test]
    async fn test_cycles_terminate() {
        let graph = Arc::new(
            PageGraph::new()
                .with_delay(Duration::from_millis(1))
                .page(
                    "https://a.test/",
                    &["https://a.test/", "https://b.test/"],
                )
                .page("https://b.test/", &["https://a.test/", "https://c.test/"])
                .page("https://c.test/", &["https://b.test/", "https://c.test/"]),
        );
        let coordinator = coordinator(&graph);

        coordinator.crawl("https://a.test/", 50);
        let report = wait_bounded(&coordinator).await;

        assert_eq!(report.total(), 3);
        assert_eq!(graph.fetch_count("https://a.test/"), 1);
        assert_eq!(graph.fetch_count("https://b.test/"), 1);
        assert_eq!(graph.fetch_count("https://c.test/"), 1);
    }

    #[tokio::test]
    async fn test_recrawl_of_visited_address_is_noop() {
        let graph = Arc::new(PageGraph::new().page("https://a.test/", &[]));
        let coordinator = coordinator(&graph);

        assert!(coordinator.crawl("https://a.test/", 2));
        let first = wait_bounded(&coordinator).await;
        assert_eq!(first.total(), 1);

        assert!(!coordinator.crawl("https://a.test/", 2));
        let second = wait_bounded(&coordinator).await;

        assert!(second.is_empty());
        assert_eq!(graph.fetch_count("https://a.test/"), 1);
    }

    #[tokio::test]
    async fn test_boundary_link_is_explorable_later() {
        // b is first seen with no budget left, so it is not claimed
        let graph = Arc::new(
            PageGraph::new()
                .page("https://a.test/", &["https://b.test/"])
                .page("https://b.test/", &[]),
        );
        let coordinator = coordinator(&graph);

        coordinator.crawl("https://a.test/", 1);
        wait_bounded(&coordinator).await;
        assert_eq!(graph.fetch_count("https://b.test/"), 0);
        assert!(!coordinator.visited().contains("https://b.test/"));

        coordinator.crawl("https://b.test/", 1);
        wait_bounded(&coordinator).await;
        assert_eq!(graph.fetch_count("https://b.test/"), 1);
    }

    #[tokio::test]
    async fn test_concurrency_ceiling_respected() {
        let children: Vec<String> = (0..20).map(|i| format!("https://c{}.test/", i)).collect();
        let child_refs: Vec<&str> = children.iter().map(String::as_str).collect();
        let mut graph = PageGraph::new()
            .with_delay(Duration::from_millis(20))
            .page("https://root.test/", &child_refs);
        for child in &children {
            graph = graph.page(child, &[]);
        }
        let graph = Arc::new(graph);

        let options = CrawlOptions {
            max_concurrent_fetches: 3,
            ..CrawlOptions::default()
        };
        let coordinator = Coordinator::new(graph.clone(), options);

        coordinator.crawl("https://root.test/", 2);
        let report = wait_bounded(&coordinator).await;

        assert_eq!(report.succeeded, 21);
        let peak = graph.max_in_flight.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak in-flight fetches was {}", peak);
        assert!(peak >= 2, "fetches never overlapped (peak {})", peak);
    }

    #[tokio::test]
    async fn test_cancel_stops_new_fetches() {
        let children: Vec<String> = (0..10).map(|i| format!("https://c{}.test/", i)).collect();
        let child_refs: Vec<&str> = children.iter().map(String::as_str).collect();
        let mut graph = PageGraph::new()
            .with_delay(Duration::from_millis(200))
            .page("https://root.test/", &child_refs);
        for child in &children {
            graph = graph.page(child, &[]);
        }
        let graph = Arc::new(graph);

        let options = CrawlOptions {
            max_concurrent_fetches: 1,
            ..CrawlOptions::default()
        };
        let coordinator = Coordinator::new(graph.clone(), options);

        coordinator.crawl("https://root.test/", 2);
        // Let the root finish and a child start
        tokio::time::sleep(Duration::from_millis(300)).await;
        coordinator.cancel();

        let report = wait_bounded(&coordinator).await;

        assert!(coordinator.is_cancelled());
        assert_eq!(report.get("https://root.test/").unwrap().outcome, CrawlOutcome::Succeeded);
        assert!(report.cancelled >= 9, "cancelled {}", report.cancelled);
        assert!(graph.total_fetches() <= 2);
        assert_eq!(report.total(), 11);
        assert_eq!(coordinator.visited().in_progress(), 0);
    }

    #[tokio::test]
    async fn test_deadline_cancels_crawl() {
        let graph = Arc::new(
            PageGraph::new()
                .with_delay(Duration::from_secs(30))
                .page("https://slow.test/", &[]),
        );
        let options = CrawlOptions {
            deadline: Some(Duration::from_millis(50)),
            ..CrawlOptions::default()
        };
        let coordinator = Coordinator::new(graph.clone(), options);

        coordinator.crawl("https://slow.test/", 1);
        let report = wait_bounded(&coordinator).await;

        assert_eq!(report.cancelled, 1);
        assert_eq!(
            coordinator.visited().state("https://slow.test/"),
            Some(VisitState::Failed)
        );
    }

    #[tokio::test]
    async fn test_resolve_relative_follows_relative_links() {
        let graph = Arc::new(
            PageGraph::new()
                .raw("https://a.test/dir/", r#"<a href="next">n</a>"#)
                .page("https://a.test/dir/next", &[]),
        );
        let options = CrawlOptions {
            resolve_relative: true,
            ..CrawlOptions::default()
        };
        let coordinator = Coordinator::new(graph.clone(), options);

        coordinator.crawl("https://a.test/dir/", 2);
        let report = wait_bounded(&coordinator).await;

        assert_eq!(report.succeeded, 2);
        assert_eq!(graph.fetch_count("https://a.test/dir/next"), 1);
    }

    #[tokio::test]
    async fn test_title_captured_in_record() {
        let graph = Arc::new(PageGraph::new().raw(
            "https://a.test/",
            "<html><head><title>Home</title></head><body></body></html>",
        ));
        let coordinator = coordinator(&graph);

        coordinator.crawl("https://a.test/", 1);
        let report = wait_bounded(&coordinator).await;

        assert_eq!(
            report.get("https://a.test/").unwrap().title.as_deref(),
            Some("Home")
        );
    }

    #[tokio::test]
    async fn test_outstanding_drains_to_zero() {
        let graph = Arc::new(
            PageGraph::new()
                .with_delay(Duration::from_millis(20))
                .page("https://a.test/", &["https://b.test/"])
                .page("https://b.test/", &[]),
        );
        let coordinator = coordinator(&graph);

        coordinator.crawl("https://a.test/", 2);
        assert!(coordinator.outstanding() >= 1);

        wait_bounded(&coordinator).await;
        assert_eq!(coordinator.outstanding(), 0);
    }
}
