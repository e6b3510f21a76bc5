//! Queue-report store: a last-parameters cache over the antrean report.
//!
//! A fetch is skipped when the requested date pair equals the key of the
//! last successful fetch, unless the caller forces a refresh. Fetches that
//! pass the guard take a sequence token; only the response for the newest
//! token is applied, so a slow older request can never overwrite a newer
//! result. A cache hit issued while a fetch is in flight also takes a token,
//! so the in-flight response is discarded.

use std::fmt;

use tokio::sync::RwLock;
use tracing::{debug, error, info};

use super::records_from_payload;
use crate::transport::{BpjsApi, Transport};
use crate::types::Record;

/// Parameters of the last successful report fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportKey {
    pub tgl_awal: String,
    pub tgl_akhir: String,
}

impl ReportKey {
    pub fn new(tgl_awal: &str, tgl_akhir: &str) -> Self {
        Self {
            tgl_awal: tgl_awal.to_string(),
            tgl_akhir: tgl_akhir.to_string(),
        }
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.tgl_awal, self.tgl_akhir)
    }
}

/// Observable state of a `ReportStore`.
#[derive(Debug, Clone, Default)]
pub struct ReportState {
    pub records: Vec<Record>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_key: Option<ReportKey>,
}

#[derive(Debug, Default)]
struct Inner {
    state: ReportState,
    latest: u64,
}

#[derive(Debug, Default)]
pub struct ReportStore {
    inner: RwLock<Inner>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the report for `[tgl_awal, tgl_akhir]` unless it is cached.
    ///
    /// Failures do not surface as `Err`: they land in `ReportState::error`
    /// with the collection cleared and the cache key unset. The returned
    /// value is the state after this call settled.
    pub async fn fetch<T: Transport>(
        &self,
        api: &BpjsApi<T>,
        tgl_awal: &str,
        tgl_akhir: &str,
        force_refresh: bool,
    ) -> ReportState {
        let key = ReportKey::new(tgl_awal, tgl_akhir);

        let token = {
            let mut inner = self.inner.write().await;
            if !force_refresh && inner.state.last_key.as_ref() == Some(&key) {
                if inner.state.loading {
                    // A cache hit is the newest request; whatever is in flight
                    // must not replace it.
                    inner.latest += 1;
                    inner.state.loading = false;
                    debug!(%key, "using cached report, superseding in-flight fetch");
                } else {
                    debug!(%key, "using cached report");
                }
                return inner.state.clone();
            }
            inner.latest += 1;
            inner.state.loading = true;
            inner.state.error = None;
            inner.latest
        };

        let result = api.queue_report(tgl_awal, tgl_akhir).await;

        let mut inner = self.inner.write().await;
        if token != inner.latest {
            debug!(%key, token, latest = inner.latest, "discarding stale report response");
            return inner.state.clone();
        }

        match result {
            Ok(payload) => {
                inner.state.records = records_from_payload(payload);
                info!(%key, rows = inner.state.records.len(), "report loaded");
                inner.state.last_key = Some(key);
            }
            Err(err) => {
                error!(%key, error = %err, "report fetch failed");
                inner.state.error = Some(err.to_string());
                inner.state.records.clear();
                inner.state.last_key = None;
            }
        }
        inner.state.loading = false;
        inner.state.clone()
    }

    pub async fn snapshot(&self) -> ReportState {
        self.inner.read().await.state.clone()
    }

    pub async fn records(&self) -> Vec<Record> {
        self.inner.read().await.state.records.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.state.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.state.error.clone()
    }

    pub async fn last_key(&self) -> Option<ReportKey> {
        self.inner.read().await.state.last_key.clone()
    }

    /// Drop cached data. Responses still in flight are discarded on arrival.
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        inner.latest += 1;
        inner.state = ReportState::default();
    }
}
