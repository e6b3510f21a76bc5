//! Stateless HTTP request builder and response parser for the BPJS proxy.
//!
//! # Design
//! `BpjsClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint has a `build_*` method producing an `HttpRequest`;
//! all endpoints share one envelope parser since the proxy wraps every
//! payload the same way. Positional parameters are inserted into the path
//! verbatim, without validation or escaping.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CancelQueue, ControlFilter, Envelope, ServiceType};

/// Synchronous, stateless client for the BPJS proxy API.
#[derive(Debug, Clone)]
pub struct BpjsClient {
    base_url: String,
}

impl BpjsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_participant(&self, nik: &str, tgl_sep: &str) -> HttpRequest {
        self.get(format!("/bpjs/peserta/{nik}/{tgl_sep}"))
    }

    pub fn build_monitoring_visits(&self, tgl_monitor: &str, jenis: ServiceType) -> HttpRequest {
        self.get(format!("/bpjs/monitoring/kunjungan/{tgl_monitor}/{jenis}"))
    }

    pub fn build_visit_history(&self, no_kartu: &str, tgl_mulai: &str, tgl_akhir: &str) -> HttpRequest {
        self.get(format!(
            "/bpjs/monitoring/historipelayanan/{no_kartu}/{tgl_mulai}/{tgl_akhir}"
        ))
    }

    pub fn build_control_plans_by_card(
        &self,
        bulan: &str,
        tahun: &str,
        no_kartu: &str,
        filter: ControlFilter,
    ) -> HttpRequest {
        self.get(format!(
            "/bpjs/rencanakontrol/nokp/{bulan}/{tahun}/{no_kartu}/{filter}"
        ))
    }

    pub fn build_control_plans_by_date(
        &self,
        tgl_awal: &str,
        tgl_akhir: &str,
        filter: ControlFilter,
    ) -> HttpRequest {
        self.get(format!("/bpjs/rencanakontrol/{tgl_awal}/{tgl_akhir}/{filter}"))
    }

    /// The queue report is a POST with an empty body; the proxy treats it as
    /// a query against BPJS rather than a write.
    pub fn build_queue_report(&self, tgl_awal: &str, tgl_akhir: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/bpjs/antrean/{tgl_awal}/{tgl_akhir}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_cancel_queue(&self, input: &CancelQueue) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/bpjs/batal", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_list_doctors(&self) -> HttpRequest {
        self.get("/bpjs/dokter".to_string())
    }

    /// Unwrap the `response` field of a proxy reply.
    ///
    /// Any 2xx is accepted. An empty 2xx body yields `Value::Null`, as does a
    /// missing or null `response` field.
    pub fn parse_envelope(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        let envelope: Envelope =
            serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(envelope.response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
