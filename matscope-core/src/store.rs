//! Bounded in-memory store of recently generated reports

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::reports::GeneratedReportArtifact;

/// Number of artifacts retained
pub const REPORT_STORE_CAPACITY: usize = 10;

/// Most-recent-first list of generated artifacts.
///
/// Inserting beyond capacity silently evicts the oldest entry.
#[derive(Debug)]
pub struct ReportStore {
    capacity: usize,
    reports: Mutex<VecDeque<Arc<GeneratedReportArtifact>>>,
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore {
    pub fn new() -> Self {
        Self::with_capacity(REPORT_STORE_CAPACITY)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            reports: Mutex::new(VecDeque::with_capacity(capacity + 1)),
        }
    }

    /// Insert a finished artifact at the front
    pub async fn add(&self, artifact: Arc<GeneratedReportArtifact>) {
        let mut reports = self.reports.lock().await;
        reports.push_front(artifact);
        while reports.len() > self.capacity {
            if let Some(evicted) = reports.pop_back() {
                tracing::debug!("Evicted report {} from store", evicted.display_name);
            }
        }
    }

    /// Snapshot of the stored artifacts, newest first
    pub async fn list(&self) -> Vec<Arc<GeneratedReportArtifact>> {
        self.reports.lock().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.reports.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.lock().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;

    fn artifact(name: &str) -> Arc<GeneratedReportArtifact> {
        Arc::new(GeneratedReportArtifact::new(name, ReportFormat::Pdf, Vec::new()))
    }

    #[tokio::test]
    async fn test_newest_first() {
        let store = ReportStore::new();
        store.add(artifact("first")).await;
        store.add(artifact("second")).await;

        let names: Vec<_> = store
            .list()
            .await
            .iter()
            .map(|a| a.display_name.clone())
            .collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_evicts_oldest_past_capacity() {
        let store = ReportStore::new();
        let first = artifact("report-0");
        store.add(first.clone()).await;
        for i in 1..=REPORT_STORE_CAPACITY {
            store.add(artifact(&format!("report-{}", i))).await;
        }

        let reports = store.list().await;
        assert_eq!(reports.len(), REPORT_STORE_CAPACITY);
        assert!(!reports.iter().any(|a| a.id == first.id));
        assert_eq!(reports[0].display_name, "report-10");
        assert_eq!(reports[9].display_name, "report-1");
    }

    #[tokio::test]
    async fn test_list_is_a_copy() {
        let store = ReportStore::new();
        store.add(artifact("kept")).await;

        let mut snapshot = store.list().await;
        snapshot.clear();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_respect_capacity() {
        let store = Arc::new(ReportStore::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.add(artifact(&format!("r{}", i))).await;
            }));
        }
        for handle in handles {
            handle.await.expect("task should complete");
        }
        assert_eq!(store.len().await, REPORT_STORE_CAPACITY);
    }
}
