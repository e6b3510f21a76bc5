//! Client core for the BPJS query proxy.
//!
//! # Overview
//! `BpjsClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `BpjsApi` runs those
//! requests through a pluggable `Transport`, and the stores in `store` cache
//! what comes back for the length of a `Session`.
//!
//! # Design
//! - `BpjsClient` is stateless; it holds only `base_url`.
//! - Every endpoint has a `build_*` method; all replies share the
//!   `{ "response": ... }` envelope and one parser.
//! - Payloads stay loosely typed (`serde_json::Value`).
//! - `ReportStore` memoizes the queue report on its date pair and applies
//!   only the newest in-flight response.
//! - `DoctorStore` loads the practitioner list once and resolves codes to
//!   names, echoing unknown codes.

pub mod client;
pub mod error;
pub mod format;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::BpjsClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{DoctorStore, FieldMapping, LookupMap, ReportKey, ReportState, ReportStore, Session};
pub use transport::{BpjsApi, Transport};
pub use types::{CancelQueue, ControlFilter, Envelope, Record, ServiceType};
