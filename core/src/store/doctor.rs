//! Practitioner directory: fetched once, folded into a code → name map.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use super::records_from_payload;
use crate::error::ApiError;
use crate::transport::{BpjsApi, Transport};
use crate::types::Record;

/// Ordered candidate field names for the key and the display value.
///
/// The first candidate holding a non-empty string or a number wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub key_fields: Vec<String>,
    pub value_fields: Vec<String>,
}

impl FieldMapping {
    pub fn new(key_fields: &[&str], value_fields: &[&str]) -> Self {
        Self {
            key_fields: key_fields.iter().map(|f| f.to_string()).collect(),
            value_fields: value_fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn key_of(&self, record: &Record) -> Option<String> {
        first_present(record, &self.key_fields)
    }

    pub fn value_of(&self, record: &Record) -> Option<String> {
        first_present(record, &self.value_fields)
    }
}

impl Default for FieldMapping {
    /// HFIS rows carry `kodedokter`/`namadokter`; the hospital roster uses
    /// `vc_nid_bpjs`/`dokter`.
    fn default() -> Self {
        Self::new(&["kodedokter", "vc_nid_bpjs"], &["namadokter", "dokter"])
    }
}

fn first_present(record: &Record, fields: &[String]) -> Option<String> {
    fields.iter().find_map(|field| match record.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Code → display-name map with echo-on-miss lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupMap {
    entries: HashMap<String, String>,
}

impl LookupMap {
    /// Fold `records` into a map. Records lacking a key or a display value
    /// are skipped; a later record overwrites an earlier one with the same
    /// key.
    pub fn build(records: &[Record], mapping: &FieldMapping) -> Self {
        let entries = records.iter().fold(HashMap::new(), |mut acc, record| {
            if let (Some(key), Some(value)) = (mapping.key_of(record), mapping.value_of(record)) {
                acc.insert(key, value);
            }
            acc
        });
        Self { entries }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// The mapped name, or `code` itself when unknown.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).unwrap_or(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
struct DoctorState {
    doctors: Vec<Record>,
    map: LookupMap,
    loaded: bool,
}

/// Loads the practitioner list on first use and answers name lookups.
///
/// `load_gate` is held across the fetch so concurrent `ensure_loaded`
/// callers share a single request; lookups only take `state` and are never
/// blocked by a load in flight.
#[derive(Debug, Default)]
pub struct DoctorStore {
    mapping: FieldMapping,
    state: RwLock<DoctorState>,
    load_gate: Mutex<()>,
}

impl DoctorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(mapping: FieldMapping) -> Self {
        Self {
            mapping,
            ..Self::default()
        }
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Fetch and index the practitioner list unless already loaded.
    ///
    /// On failure the store stays unloaded so a later call retries.
    pub async fn ensure_loaded<T: Transport>(&self, api: &BpjsApi<T>) -> Result<(), ApiError> {
        if self.state.read().await.loaded {
            return Ok(());
        }

        let _gate = self.load_gate.lock().await;
        if self.state.read().await.loaded {
            debug!("doctor list loaded by a concurrent caller");
            return Ok(());
        }

        let payload = api.list_doctors().await.map_err(|err| {
            error!(error = %err, "doctor list fetch failed");
            err
        })?;
        let doctors = records_from_payload(payload);
        let map = LookupMap::build(&doctors, &self.mapping);
        info!(doctors = doctors.len(), mapped = map.len(), "doctor list loaded");

        let mut state = self.state.write().await;
        state.doctors = doctors;
        state.map = map;
        state.loaded = true;
        Ok(())
    }

    pub async fn lookup(&self, code: &str) -> String {
        self.state.read().await.map.display_name(code).to_string()
    }

    pub async fn lookup_map(&self) -> LookupMap {
        self.state.read().await.map.clone()
    }

    pub async fn doctors(&self) -> Vec<Record> {
        self.state.read().await.doctors.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.loaded
    }

    /// Clear the loaded flag; the next `ensure_loaded` refetches. The
    /// current map keeps answering lookups until then.
    pub async fn reset(&self) {
        self.state.write().await.loaded = false;
    }
}
