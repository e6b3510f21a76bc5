//! Session-scoped stores over the BPJS API.
//!
//! # Design
//! Stores own no transport; every action borrows a `BpjsApi`. `Session`
//! bundles one API with one of each store and is the context object callers
//! pass around. A fresh `Session` starts with empty stores, so tests never
//! see each other's cached data.

pub mod doctor;
pub mod report;

use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::transport::{BpjsApi, Transport};
use crate::types::Record;

pub use doctor::{DoctorStore, FieldMapping, LookupMap};
pub use report::{ReportKey, ReportState, ReportStore};

/// Coerce a payload to a record list; anything but an array becomes empty.
pub(crate) fn records_from_payload(payload: Value) -> Vec<Record> {
    match payload {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            debug!(payload = %other, "payload is not a list, treating as empty");
            Vec::new()
        }
    }
}

pub struct Session<T> {
    api: BpjsApi<T>,
    reports: ReportStore,
    doctors: DoctorStore,
}

impl<T: Transport> Session<T> {
    pub fn new(api: BpjsApi<T>) -> Self {
        Self {
            api,
            reports: ReportStore::new(),
            doctors: DoctorStore::new(),
        }
    }

    pub fn with_doctor_mapping(api: BpjsApi<T>, mapping: FieldMapping) -> Self {
        Self {
            api,
            reports: ReportStore::new(),
            doctors: DoctorStore::with_mapping(mapping),
        }
    }

    pub fn api(&self) -> &BpjsApi<T> {
        &self.api
    }

    pub fn reports(&self) -> &ReportStore {
        &self.reports
    }

    pub fn doctors(&self) -> &DoctorStore {
        &self.doctors
    }

    pub async fn fetch_report(&self, tgl_awal: &str, tgl_akhir: &str, force_refresh: bool) -> ReportState {
        self.reports
            .fetch(&self.api, tgl_awal, tgl_akhir, force_refresh)
            .await
    }

    pub async fn ensure_doctors(&self) -> Result<(), ApiError> {
        self.doctors.ensure_loaded(&self.api).await
    }

    pub async fn doctor_name(&self, code: &str) -> String {
        self.doctors.lookup(code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::testing::{api, ScriptedTransport};

    #[test]
    fn records_from_payload_coerces_shapes() {
        assert_eq!(records_from_payload(serde_json::json!([1, 2])).len(), 2);
        assert!(records_from_payload(Value::Null).is_empty());
        assert!(records_from_payload(serde_json::json!({"list": [1]})).is_empty());
        assert!(records_from_payload(serde_json::json!("text")).is_empty());
    }

    #[tokio::test]
    async fn sessions_do_not_share_cache() {
        let first = Session::new(api(ScriptedTransport::ok(r#"{"response":[{"a":1}]}"#)));
        let second = Session::new(api(ScriptedTransport::ok(r#"{"response":[]}"#)));

        first.fetch_report("2024-01-01", "2024-01-31", false).await;
        let state = second.reports().snapshot().await;

        assert!(state.records.is_empty());
        assert!(state.last_key.is_none());
    }

    #[tokio::test]
    async fn session_routes_report_and_doctor_calls() {
        let session = Session::new(api(ScriptedTransport::new(|req| {
            let body = if req.path.ends_with("/bpjs/dokter") {
                r#"{"response":[{"kodedokter":"D1","namadokter":"Dr. A"}]}"#
            } else {
                r#"{"response":[{"kodedokter":"D1"}]}"#
            };
            Ok(HttpResponse::new(200, body))
        })));

        let state = session.fetch_report("2024-01-01", "2024-01-31", false).await;
        session.ensure_doctors().await.unwrap();

        let code = state.records[0]["kodedokter"].as_str().unwrap();
        assert_eq!(session.doctor_name(code).await, "Dr. A");
        assert_eq!(session.api().transport().calls(), 2);
    }
}
