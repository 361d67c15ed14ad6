//! Unit read model and write payloads.

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::identifiers::{BuildingId, UnitId};
use super::theme::{TrafficLight, TrafficLightError};

/// Percentages are stored server-side with two decimals.
const SIGNATURE_PERCENTAGE_TOLERANCE: f64 = 0.01;

/// Naive timestamp layout emitted by the API for `created_at`.
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Lifecycle status of a unit in the signing campaign.
///
/// Unknown values decode into [`UnitStatus::Other`] verbatim so that a newer
/// server never breaks decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnitStatus {
    /// No owner has been contacted yet.
    NotContacted,
    /// Owners are negotiating terms.
    Negotiating,
    /// Owners agreed to sign but have not signed.
    AgreedToSign,
    /// Some, but not all, owners signed.
    PartiallySigned,
    /// Every current owner signed.
    Signed,
    /// The agreement is finalised.
    Finalized,
    /// Owners refused to sign.
    Refused,
    /// The unit is excluded from the campaign.
    Inactive,
    /// A status this client does not know about.
    Other(String),
}

impl UnitStatus {
    /// Wire representation of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotContacted => "NOT_CONTACTED",
            Self::Negotiating => "NEGOTIATING",
            Self::AgreedToSign => "AGREED_TO_SIGN",
            Self::PartiallySigned => "PARTIALLY_SIGNED",
            Self::Signed => "SIGNED",
            Self::Finalized => "FINALIZED",
            Self::Refused => "REFUSED",
            Self::Inactive => "INACTIVE",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for UnitStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "NOT_CONTACTED" => Self::NotContacted,
            "NEGOTIATING" => Self::Negotiating,
            "AGREED_TO_SIGN" => Self::AgreedToSign,
            "PARTIALLY_SIGNED" => Self::PartiallySigned,
            "SIGNED" => Self::Signed,
            "FINALIZED" => Self::Finalized,
            "REFUSED" => Self::Refused,
            "INACTIVE" => Self::Inactive,
            _ => Self::Other(value),
        }
    }
}

impl From<UnitStatus> for String {
    fn from(value: UnitStatus) -> Self {
        match value {
            UnitStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical property unit, as returned by the units endpoints.
///
/// ## Invariants
/// The server is expected to keep `owners_signed <= total_owners` and
/// `signature_percentage ≈ owners_signed / total_owners × 100`. Decoding does
/// not enforce either; use [`Unit::signature_progress_is_consistent`] to check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique unit identifier.
    pub unit_id: UnitId,
    /// Building this unit belongs to.
    pub building_id: BuildingId,
    /// Floor number, when recorded.
    pub floor_number: Option<i32>,
    /// Apartment number within the building.
    pub unit_number: String,
    /// Floor area in square metres, when recorded.
    pub area_sqm: Option<f64>,
    /// Campaign status of the unit.
    pub unit_status: UnitStatus,
    /// Number of current owners.
    pub total_owners: u32,
    /// Number of current owners who signed.
    pub owners_signed: u32,
    /// Share of owners who signed, in percent.
    pub signature_percentage: f64,
    /// Creation timestamp exactly as sent by the server.
    pub created_at: String,
}

impl Unit {
    /// Signature percentage implied by the owner counts.
    ///
    /// Returns `0.0` when the unit has no owners.
    #[expect(
        clippy::float_arithmetic,
        reason = "percentage is a ratio of owner counts"
    )]
    pub fn expected_signature_percentage(&self) -> f64 {
        if self.total_owners == 0 {
            return 0.0;
        }
        f64::from(self.owners_signed) / f64::from(self.total_owners) * 100.0
    }

    /// Whether the owner counts and the reported percentage agree.
    #[expect(
        clippy::float_arithmetic,
        reason = "tolerance comparison between two percentages"
    )]
    pub fn signature_progress_is_consistent(&self) -> bool {
        self.owners_signed <= self.total_owners
            && (self.signature_percentage - self.expected_signature_percentage()).abs()
                <= SIGNATURE_PERCENTAGE_TOLERANCE
    }

    /// Parse `created_at` as a UTC-naive timestamp.
    ///
    /// Accepts RFC 3339 strings and the naive ISO-8601 form the API emits.
    /// Returns `None` when neither layout matches.
    pub fn created_at_timestamp(&self) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|parsed| parsed.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(&self.created_at, NAIVE_TIMESTAMP_FORMAT))
            .ok()
    }

    /// Classify the unit's signature progress against campaign thresholds.
    pub fn traffic_light(
        &self,
        required_majority: f64,
        critical_threshold: f64,
    ) -> Result<TrafficLight, TrafficLightError> {
        TrafficLight::classify(
            self.signature_percentage,
            required_majority,
            critical_threshold,
        )
    }
}

/// Payload for creating a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUnit {
    /// Building the unit is created in.
    pub building_id: BuildingId,
    /// Floor number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<i32>,
    /// Apartment number within the building.
    pub unit_number: String,
    /// Free-form unit code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
    /// Floor area in square metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sqm: Option<f64>,
    /// Number of rooms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_count: Option<u32>,
    /// Estimated value in shekels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_value_ils: Option<f64>,
}

impl NewUnit {
    /// Start a payload with the two required fields.
    pub fn new(building_id: BuildingId, unit_number: impl Into<String>) -> Self {
        Self {
            building_id,
            floor_number: None,
            unit_number: unit_number.into(),
            unit_code: None,
            area_sqm: None,
            room_count: None,
            estimated_value_ils: None,
        }
    }
}

/// Partial update for a unit; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitChanges {
    /// New floor number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<i32>,
    /// New apartment number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,
    /// New unit code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
    /// New floor area in square metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sqm: Option<f64>,
    /// New room count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_count: Option<u32>,
    /// New estimated value in shekels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_value_ils: Option<f64>,
}
