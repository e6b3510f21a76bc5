//! The I/O seam and the async API built on top of it.
//!
//! # Design
//! `Transport` is the only place a network round-trip happens. The core
//! crate ships no implementation: the CLI plugs in a reqwest-backed one,
//! tests plug in scripted or ureq-backed ones. `BpjsApi` pairs a transport
//! with `BpjsClient` and exposes one async method per endpoint, each
//! returning the unwrapped `response` payload.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::client::BpjsClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CancelQueue, ControlFilter, ServiceType};

/// Executes a plain-data request and returns the plain-data response.
///
/// Implementations return non-2xx responses as `Ok`; status interpretation
/// belongs to `BpjsClient::parse_envelope`. `Err` is reserved for failures
/// where no response exists.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request).await
    }
}

/// Async facade over every proxy endpoint.
pub struct BpjsApi<T> {
    client: BpjsClient,
    transport: T,
}

impl<T: Transport> BpjsApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: BpjsClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &BpjsClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        self.client.parse_envelope(response)
    }

    pub async fn get_participant(&self, nik: &str, tgl_sep: &str) -> Result<Value, ApiError> {
        self.send(self.client.build_get_participant(nik, tgl_sep)).await
    }

    pub async fn monitoring_visits(&self, tgl_monitor: &str, jenis: ServiceType) -> Result<Value, ApiError> {
        self.send(self.client.build_monitoring_visits(tgl_monitor, jenis)).await
    }

    pub async fn visit_history(
        &self,
        no_kartu: &str,
        tgl_mulai: &str,
        tgl_akhir: &str,
    ) -> Result<Value, ApiError> {
        self.send(self.client.build_visit_history(no_kartu, tgl_mulai, tgl_akhir))
            .await
    }

    pub async fn control_plans_by_card(
        &self,
        bulan: &str,
        tahun: &str,
        no_kartu: &str,
        filter: ControlFilter,
    ) -> Result<Value, ApiError> {
        self.send(self.client.build_control_plans_by_card(bulan, tahun, no_kartu, filter))
            .await
    }

    pub async fn control_plans_by_date(
        &self,
        tgl_awal: &str,
        tgl_akhir: &str,
        filter: ControlFilter,
    ) -> Result<Value, ApiError> {
        self.send(self.client.build_control_plans_by_date(tgl_awal, tgl_akhir, filter))
            .await
    }

    pub async fn queue_report(&self, tgl_awal: &str, tgl_akhir: &str) -> Result<Value, ApiError> {
        self.send(self.client.build_queue_report(tgl_awal, tgl_akhir)).await
    }

    pub async fn cancel_queue(&self, input: &CancelQueue) -> Result<Value, ApiError> {
        let request = self.client.build_cancel_queue(input)?;
        self.send(request).await
    }

    pub async fn list_doctors(&self) -> Result<Value, ApiError> {
        self.send(self.client.build_list_doctors()).await
    }
}
