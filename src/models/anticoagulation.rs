use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated lab reading (typically INR) with the target band in force that day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InrReading {
    pub date: NaiveDate,
    pub value: f64,
    pub target_low: f64,
    pub target_high: f64,
}

impl InrReading {
    pub fn new(date: NaiveDate, value: f64, target_low: f64, target_high: f64) -> Self {
        Self {
            date,
            value,
            target_low,
            target_high,
        }
    }

    /// Inclusive on both ends of the target band.
    pub fn in_range(&self) -> bool {
        self.value >= self.target_low && self.value <= self.target_high
    }
}

/// Inputs to the CHA₂DS₂-VASc stroke-risk count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeRiskFactors {
    pub congestive_heart_failure: bool,
    pub hypertension: bool,
    pub age_75_or_older: bool,
    pub age_65_to_74: bool,
    pub diabetes: bool,
    pub prior_stroke_or_tia: bool,
    pub vascular_disease: bool,
    pub female: bool,
}

/// Inputs to the HAS-BLED bleeding-risk count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BleedingRiskFactors {
    pub uncontrolled_hypertension: bool,
    pub abnormal_renal_function: bool,
    pub abnormal_liver_function: bool,
    pub prior_stroke: bool,
    pub bleeding_history: bool,
    pub labile_inr: bool,
    pub elderly: bool,
    pub antiplatelet_or_nsaid: bool,
    pub alcohol_excess: bool,
}
