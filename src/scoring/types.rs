use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    BridgingDecision, ClinicalProfile, InrReading, LimbAssessmentInput, LimbStage,
    ProcedureBleedRisk, ProcedureType, RiskCategory, TtrMethod,
};

// ---------------------------------------------------------------------------
// ScoringError
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Missing required attribute: {field}")]
    MissingAttribute { field: String },

    #[error("{field} = {value} is outside the allowed range {allowed}")]
    OutOfDomain {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("Unrecognized {field}: {value}")]
    UnrecognizedVariant { field: String, value: String },

    #[error("Invalid band table: {0}")]
    InvalidBandTable(String),

    #[error("Reference data load failed ({0}): {1}")]
    ReferenceDataLoad(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    ReferenceDataParse(String, String),
}

impl ScoringError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingAttribute {
            field: field.into(),
        }
    }

    pub(crate) fn out_of_domain(field: &str, value: impl ToString, allowed: &str) -> Self {
        Self::OutOfDomain {
            field: field.into(),
            value: value.to_string(),
            allowed: allowed.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// RiskScore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreUnit {
    Percent,
}

/// A bounded score with its declared clamp range.
///
/// Only constructible through [`RiskScore::clamped`], so `min <= value <= max`
/// always holds and the value is never NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskScore {
    value: f64,
    unit: ScoreUnit,
    min: f64,
    max: f64,
}

impl RiskScore {
    /// Clamp a raw model output into `[min, max]` percent.
    /// Callers pass constant bounds with `min <= max`.
    pub(crate) fn clamped(raw: f64, min: f64, max: f64) -> Self {
        let value = if raw.is_nan() { min } else { raw.clamp(min, max) };
        Self {
            value,
            unit: ScoreUnit::Percent,
            min,
            max,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> ScoreUnit {
        self.unit
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn at_floor(&self) -> bool {
        self.value == self.min
    }

    pub fn at_ceiling(&self) -> bool {
        self.value == self.max
    }

    /// True when the model output was pinned to either bound.
    pub fn saturated(&self) -> bool {
        self.at_floor() || self.at_ceiling()
    }
}

// ---------------------------------------------------------------------------
// Ordinal inputs
// ---------------------------------------------------------------------------

macro_rules! bounded_ordinal {
    ($(#[$meta:meta])* $name:ident, $min:literal, $max:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub struct $name(u8);

        impl $name {
            pub const MIN: u8 = $min;
            pub const MAX: u8 = $max;

            /// Range-check a raw value; `field` names the attribute in the error.
            pub fn new(value: i32, field: &str) -> Result<Self, ScoringError> {
                if (Self::MIN as i32..=Self::MAX as i32).contains(&value) {
                    Ok(Self(value as u8))
                } else {
                    Err(ScoringError::out_of_domain(
                        field,
                        value,
                        concat!("[", $min, ", ", $max, "]"),
                    ))
                }
            }

            /// For point counts built in-crate, which cannot exceed the range.
            pub(crate) fn saturating(value: u8) -> Self {
                Self(value.min(Self::MAX))
            }

            pub fn value(&self) -> u8 {
                self.0
            }
        }
    };
}

bounded_ordinal!(
    /// Wound, ischemia or foot-infection severity grade.
    OrdinalGrade,
    0,
    3
);

bounded_ordinal!(
    /// CHA₂DS₂-VASc-style stroke-risk point count.
    StrokeRiskScore,
    0,
    9
);

bounded_ordinal!(
    /// HAS-BLED-style bleeding-risk point count.
    BleedingRiskScore,
    0,
    9
);

// ---------------------------------------------------------------------------
// Model results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurgicalRiskResult {
    pub mortality: RiskScore,
    pub morbidity: RiskScore,
    pub category: RiskCategory,
    pub recommendation: String,
    /// One entry per contributing condition, in evaluation order.
    pub risk_factors: Vec<String>,
    pub protective_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgingPlan {
    pub decision: BridgingDecision,
    pub protocol: String,
    pub stroke_score: u8,
    pub bleeding_score: u8,
    pub stroke_category: RiskCategory,
    pub bleeding_category: RiskCategory,
    pub procedure_bleed_risk: ProcedureBleedRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TherapeuticRangeSummary {
    pub time_in_range: RiskScore,
    pub method: TtrMethod,
    pub reading_count: usize,
    pub poor_control: bool,
    /// Present only when control is poor.
    pub advisory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimbRiskResult {
    pub stage: LimbStage,
    pub amputation_risk: RiskScore,
    pub amputation_category: RiskCategory,
    pub amputation_recommendation: String,
    /// Computed by its own rule set; not `100 - amputation_risk`.
    pub limb_salvage_rate: RiskScore,
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// ScoringRecord
// ---------------------------------------------------------------------------

/// Envelope stamped by the engine around a deterministic model result.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringRecord<T> {
    pub id: Uuid,
    pub scored_at: NaiveDateTime,
    pub processing_time_ms: u64,
    pub result: T,
}

// ---------------------------------------------------------------------------
// RiskEngine trait
// ---------------------------------------------------------------------------

/// Entry point for presentation collaborators: validate, then run one model.
pub trait RiskEngine {
    /// Validate a clinical profile and estimate surgical mortality/morbidity.
    fn score_surgical(
        &self,
        profile: &ClinicalProfile,
    ) -> Result<ScoringRecord<SurgicalRiskResult>, ScoringError>;

    /// Score many profiles independently; one result per input, in input order.
    fn score_surgical_batch(
        &self,
        profiles: &[ClinicalProfile],
    ) -> Vec<Result<ScoringRecord<SurgicalRiskResult>, ScoringError>>;

    /// Range-check the ordinal scores and decide on periprocedural bridging.
    fn plan_bridging(
        &self,
        stroke_risk: i32,
        bleeding_risk: i32,
        procedure_risk: ProcedureBleedRisk,
    ) -> Result<ScoringRecord<BridgingPlan>, ScoringError>;

    /// As `plan_bridging`, with the bleeding classification taken from the
    /// procedure's default.
    fn plan_bridging_for_procedure(
        &self,
        stroke_risk: i32,
        bleeding_risk: i32,
        procedure: ProcedureType,
    ) -> Result<ScoringRecord<BridgingPlan>, ScoringError>;

    /// Percentage of time a monitored value stayed inside its target band.
    fn time_in_therapeutic_range(
        &self,
        readings: &[InrReading],
        method: TtrMethod,
    ) -> Result<ScoringRecord<TherapeuticRangeSummary>, ScoringError>;

    /// Stage the limb and estimate amputation risk and limb salvage.
    fn assess_limb(
        &self,
        input: &LimbAssessmentInput,
    ) -> Result<ScoringRecord<LimbRiskResult>, ScoringError>;
}
