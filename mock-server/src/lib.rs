//! In-memory stand-in for the BPJS proxy backend.
//!
//! Serves every endpoint the client consumes under `/api/bpjs`, answering
//! from seeded fixtures with the `{ "response": ... }` envelope.

pub mod fixtures;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

use fixtures::Fixtures;

#[derive(Deserialize)]
pub struct CancelRequest {
    pub kodebooking: String,
    pub keterangan: String,
}

#[derive(Clone)]
pub struct MockState {
    db: Arc<RwLock<Fixtures>>,
    report_hits: Arc<AtomicUsize>,
}

impl MockState {
    pub fn seeded() -> Self {
        Self {
            db: Arc::new(RwLock::new(Fixtures::seeded())),
            report_hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of queue-report requests served so far.
    pub fn report_hits(&self) -> usize {
        self.report_hits.load(Ordering::SeqCst)
    }
}

pub fn app() -> Router {
    app_with_state(MockState::seeded())
}

pub fn app_with_state(state: MockState) -> Router {
    let bpjs = Router::new()
        .route("/peserta/{nik}/{tgl_sep}", get(get_participant))
        .route("/monitoring/kunjungan/{tgl}/{jenis}", get(monitoring_visits))
        .route(
            "/monitoring/historipelayanan/{no_kartu}/{mulai}/{akhir}",
            get(visit_history),
        )
        .route(
            "/rencanakontrol/nokp/{bulan}/{tahun}/{no_kartu}/{filter}",
            get(control_plans_by_card),
        )
        .route("/rencanakontrol/{awal}/{akhir}/{filter}", get(control_plans_by_date))
        .route("/antrean/{awal}/{akhir}", post(queue_report))
        .route("/batal", post(cancel_queue))
        .route("/dokter", get(list_doctors));
    Router::new().nest("/api/bpjs", bpjs).with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, MockState::seeded()).await
}

pub async fn run_with_state(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

fn envelope(payload: Value) -> Json<Value> {
    Json(json!({ "response": payload }))
}

fn not_found(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "metaData": { "code": 201, "message": message },
            "response": null
        })),
    )
}

fn field<'a>(record: &'a Value, name: &str) -> &'a str {
    record.get(name).and_then(Value::as_str).unwrap_or_default()
}

/// ISO dates compare correctly as strings.
fn within(date: &str, from: &str, to: &str) -> bool {
    !date.is_empty() && from <= date && date <= to
}

fn year_month(date: &str) -> Option<(u32, u32)> {
    let year = date.get(0..4)?.parse().ok()?;
    let month = date.get(5..7)?.parse().ok()?;
    Some((year, month))
}

fn control_date_field(filter: &str) -> &'static str {
    if filter == "1" {
        "tglTerbitKontrol"
    } else {
        "tglRencanaKontrol"
    }
}

async fn get_participant(
    State(state): State<MockState>,
    Path((nik, tgl_sep)): Path<(String, String)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let db = state.db.read().await;
    let participant = db
        .participants
        .iter()
        .find(|p| field(p, "nik") == nik)
        .cloned()
        .ok_or_else(|| not_found("Peserta tidak ditemukan"))?;
    Ok(envelope(json!({ "peserta": participant, "tglSEP": tgl_sep })))
}

async fn monitoring_visits(
    State(state): State<MockState>,
    Path((tgl, jenis)): Path<(String, String)>,
) -> Json<Value> {
    let db = state.db.read().await;
    let sep: Vec<Value> = db
        .visits
        .iter()
        .filter(|v| field(v, "tglSep") == tgl && field(v, "jnsPelayanan") == jenis)
        .cloned()
        .collect();
    envelope(json!({ "sep": sep }))
}

async fn visit_history(
    State(state): State<MockState>,
    Path((no_kartu, mulai, akhir)): Path<(String, String, String)>,
) -> Json<Value> {
    let db = state.db.read().await;
    let histori: Vec<Value> = db
        .history
        .iter()
        .filter(|h| field(h, "noKartu") == no_kartu && within(field(h, "tglSep"), &mulai, &akhir))
        .cloned()
        .collect();
    envelope(json!({ "histori": histori }))
}

async fn control_plans_by_card(
    State(state): State<MockState>,
    Path((bulan, tahun, no_kartu, filter)): Path<(String, String, String, String)>,
) -> Json<Value> {
    let wanted = (tahun.parse::<u32>().ok(), bulan.parse::<u32>().ok());
    let date_field = control_date_field(&filter);
    let db = state.db.read().await;
    let list: Vec<Value> = db
        .control_plans
        .iter()
        .filter(|c| field(c, "noKartu") == no_kartu)
        .filter(|c| {
            year_month(field(c, date_field)).map(|(y, m)| (Some(y), Some(m))) == Some(wanted)
        })
        .cloned()
        .collect();
    envelope(json!({ "list": list }))
}

async fn control_plans_by_date(
    State(state): State<MockState>,
    Path((awal, akhir, filter)): Path<(String, String, String)>,
) -> Json<Value> {
    let date_field = control_date_field(&filter);
    let db = state.db.read().await;
    let list: Vec<Value> = db
        .control_plans
        .iter()
        .filter(|c| within(field(c, date_field), &awal, &akhir))
        .cloned()
        .collect();
    envelope(json!({ "list": list }))
}

async fn queue_report(
    State(state): State<MockState>,
    Path((awal, akhir)): Path<(String, String)>,
) -> Json<Value> {
    state.report_hits.fetch_add(1, Ordering::SeqCst);
    let db = state.db.read().await;
    let rows: Vec<Value> = db
        .queue
        .iter()
        .filter(|q| within(field(q, "tanggal"), &awal, &akhir))
        .cloned()
        .collect();
    info!(%awal, %akhir, rows = rows.len(), "queue report");
    envelope(Value::Array(rows))
}

async fn cancel_queue(
    State(state): State<MockState>,
    Json(input): Json<CancelRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut db = state.db.write().await;
    let booking = db
        .queue
        .iter_mut()
        .find(|q| field(q, "kodebooking") == input.kodebooking)
        .ok_or_else(|| not_found("Antrean tidak ditemukan"))?;
    booking["status"] = json!("Batal");
    booking["keterangan"] = json!(input.keterangan);
    Ok(envelope(json!({
        "kodebooking": input.kodebooking,
        "status": "Batal",
        "keterangan": input.keterangan
    })))
}

async fn list_doctors(State(state): State<MockState>) -> Json<Value> {
    let db = state.db.read().await;
    envelope(Value::Array(db.doctors.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_is_inclusive() {
        assert!(within("2024-01-01", "2024-01-01", "2024-01-31"));
        assert!(within("2024-01-31", "2024-01-01", "2024-01-31"));
        assert!(!within("2024-02-01", "2024-01-01", "2024-01-31"));
        assert!(!within("", "", "2024-01-31"));
    }

    #[test]
    fn year_month_parses_iso_dates() {
        assert_eq!(year_month("2024-02-05"), Some((2024, 2)));
        assert_eq!(year_month("02/2024"), None);
    }

    #[test]
    fn control_filter_selects_date_field() {
        assert_eq!(control_date_field("1"), "tglTerbitKontrol");
        assert_eq!(control_date_field("2"), "tglRencanaKontrol");
    }

    #[test]
    fn cancel_request_rejects_missing_kodebooking() {
        let result: Result<CancelRequest, _> = serde_json::from_str(r#"{"keterangan":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn seeded_state_starts_without_hits() {
        assert_eq!(MockState::seeded().report_hits(), 0);
    }
}
