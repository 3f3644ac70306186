mod models;
mod validator;

pub use models::*;
pub use validator::{SourceValidator, ValidationReport};

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::Result;

const EMBEDDED_DONORS: &str = include_str!("../../data/donors.json");
const EMBEDDED_DONATIONS: &str = include_str!("../../data/donations.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Donor,
    Donation,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Donor => f.write_str("donor"),
            Self::Donation => f.write_str("donation"),
        }
    }
}

/// An array element that could not be read as a record. The import goes on
/// without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub kind: RecordKind,
    /// 1-based position in its source array
    pub position: usize,
    pub legacy_id: String,
    pub reason: String,
}

/// The two source arrays of a seed run.
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub donors: Vec<DonorRecord>,
    pub donations: Vec<DonationRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl SourceData {
    /// Each input must be a JSON array. Elements are read one by one; a
    /// malformed element lands in `rejected` instead of failing the parse.
    pub fn parse(donors_json: &str, donations_json: &str) -> Result<Self> {
        let donor_values: Vec<Value> = serde_json::from_str(donors_json)?;
        let donation_values: Vec<Value> = serde_json::from_str(donations_json)?;

        let mut rejected = Vec::new();
        let donors = read_records(donor_values, RecordKind::Donor, "legacyId", &mut rejected);
        let donations = read_records(
            donation_values,
            RecordKind::Donation,
            "donorLegacyId",
            &mut rejected,
        );

        Ok(Self {
            donors,
            donations,
            rejected,
        })
    }

    pub fn rejected_of(&self, kind: RecordKind) -> impl Iterator<Item = &RejectedRecord> {
        self.rejected.iter().filter(move |r| r.kind == kind)
    }

    /// The data set compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_DONORS, EMBEDDED_DONATIONS)
    }

    /// Embedded data, with either array replaced by a file when given
    pub async fn load(donors: Option<&Path>, donations: Option<&Path>) -> Result<Self> {
        let donors_json = match donors {
            Some(path) => {
                info!("Loading donors from: {}", path.display());
                tokio::fs::read_to_string(path).await?
            }
            None => EMBEDDED_DONORS.to_string(),
        };
        let donations_json = match donations {
            Some(path) => {
                info!("Loading donations from: {}", path.display());
                tokio::fs::read_to_string(path).await?
            }
            None => EMBEDDED_DONATIONS.to_string(),
        };

        let data = Self::parse(&donors_json, &donations_json)?;
        info!(
            "Loaded {} donor record(s) and {} donation record(s)",
            data.donors.len(),
            data.donations.len()
        );
        if !data.rejected.is_empty() {
            warn!("{} source record(s) could not be read", data.rejected.len());
        }

        Ok(data)
    }
}

fn read_records<T: DeserializeOwned>(
    values: Vec<Value>,
    kind: RecordKind,
    id_field: &str,
    rejected: &mut Vec<RejectedRecord>,
) -> Vec<T> {
    let mut records = Vec::with_capacity(values.len());

    for (idx, value) in values.into_iter().enumerate() {
        let legacy_id = match value.get(id_field) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        match serde_json::from_value::<T>(value) {
            Ok(record) => records.push(record),
            Err(e) => rejected.push(RejectedRecord {
                kind,
                position: idx + 1,
                legacy_id,
                reason: e.to_string(),
            }),
        }
    }

    records
}
