//! Domain types for the BPJS proxy API.
//!
//! Payloads are deliberately loose: the proxy forwards whatever BPJS returns,
//! so records stay as `serde_json::Value`. Only the request-side inputs that
//! carry a closed set of values get real types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single loosely-typed record from a response payload.
pub type Record = Value;

/// Every proxy response body is wrapped as `{ "response": <payload> }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub response: Value,
}

/// Request payload for cancelling a queue booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelQueue {
    pub kodebooking: String,
    pub keterangan: String,
}

/// `jenisLayanan` for visit monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    /// Rawat inap.
    Inpatient,
    /// Rawat jalan.
    Outpatient,
}

impl ServiceType {
    pub fn code(self) -> u8 {
        match self {
            ServiceType::Inpatient => 1,
            ServiceType::Outpatient => 2,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "inap" | "ranap" | "inpatient" => Ok(ServiceType::Inpatient),
            "2" | "jalan" | "rajal" | "outpatient" => Ok(ServiceType::Outpatient),
            other => Err(format!("unknown service type: {other}")),
        }
    }
}

/// `filter` for control-schedule queries: which date the range applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFilter {
    /// Tanggal entri.
    EntryDate,
    /// Tanggal rencana kontrol.
    ControlDate,
}

impl ControlFilter {
    pub fn code(self) -> u8 {
        match self {
            ControlFilter::EntryDate => 1,
            ControlFilter::ControlDate => 2,
        }
    }
}

impl fmt::Display for ControlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ControlFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "entri" | "entry" => Ok(ControlFilter::EntryDate),
            "2" | "kontrol" | "control" => Ok(ControlFilter::ControlDate),
            other => Err(format!("unknown control filter: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_missing_response_is_null() {
        let env: Envelope = serde_json::from_str(r#"{"metaData":{"code":200}}"#).unwrap();
        assert!(env.response.is_null());
    }

    #[test]
    fn cancel_queue_serializes_field_names() {
        let body = CancelQueue {
            kodebooking: "B-001".to_string(),
            keterangan: "pasien batal".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["kodebooking"], "B-001");
        assert_eq!(json["keterangan"], "pasien batal");
    }

    #[test]
    fn service_type_parses_codes_and_names() {
        assert_eq!("1".parse::<ServiceType>().unwrap(), ServiceType::Inpatient);
        assert_eq!("Jalan".parse::<ServiceType>().unwrap(), ServiceType::Outpatient);
        assert!("3".parse::<ServiceType>().is_err());
        assert_eq!(ServiceType::Outpatient.to_string(), "2");
    }

    #[test]
    fn control_filter_parses_codes_and_names() {
        assert_eq!("entri".parse::<ControlFilter>().unwrap(), ControlFilter::EntryDate);
        assert_eq!("2".parse::<ControlFilter>().unwrap(), ControlFilter::ControlDate);
        assert!("".parse::<ControlFilter>().is_err());
    }
}
