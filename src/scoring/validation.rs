use crate::models::{ClinicalProfile, InrReading, ProcedureType, Sex, ValidatedProfile};

use super::types::{OrdinalGrade, ScoringError};

const AGE_RANGE: (f64, f64) = (0.0, 120.0);
const EJECTION_FRACTION_RANGE: (f64, f64) = (0.0, 100.0);
const CREATININE_RANGE: (f64, f64) = (0.0, 30.0);
const NYHA_RANGE: (i32, i32) = (1, 4);

/// Check a clinical profile before any model runs.
///
/// Out-of-range values are rejected, never clamped. Creatinine is required
/// only when the patient is not on dialysis.
pub fn validate(profile: &ClinicalProfile) -> Result<ValidatedProfile, ScoringError> {
    let result = validate_inner(profile);
    if let Err(e) = &result {
        tracing::debug!(error = %e, "Clinical profile rejected");
    }
    result
}

fn validate_inner(profile: &ClinicalProfile) -> Result<ValidatedProfile, ScoringError> {
    let age = require_in_range("age", profile.age, AGE_RANGE)?;
    let sex: Sex = require("sex", profile.sex.as_deref())?.parse()?;
    let ejection_fraction =
        require_in_range("ejection_fraction", profile.ejection_fraction, EJECTION_FRACTION_RANGE)?;

    let nyha = require("nyha_class", profile.nyha_class)?;
    if !(NYHA_RANGE.0..=NYHA_RANGE.1).contains(&nyha) {
        return Err(ScoringError::out_of_domain(
            "nyha_class",
            nyha,
            &format!("[{}, {}]", NYHA_RANGE.0, NYHA_RANGE.1),
        ));
    }

    let creatinine = if profile.dialysis {
        profile
            .creatinine
            .map(|c| check_range("creatinine", c, CREATININE_RANGE))
            .transpose()?
    } else {
        Some(require_in_range("creatinine", profile.creatinine, CREATININE_RANGE)?)
    };

    let procedure: ProcedureType = require("procedure", profile.procedure.as_deref())?.parse()?;

    Ok(ValidatedProfile {
        age,
        sex,
        ejection_fraction,
        nyha_class: nyha as u8,
        creatinine,
        dialysis: profile.dialysis,
        diabetes: profile.diabetes,
        chronic_lung_disease: profile.chronic_lung_disease,
        carotid_disease: profile.carotid_disease,
        peripheral_vascular_disease: profile.peripheral_vascular_disease,
        prior_cardiac_surgery: profile.prior_cardiac_surgery,
        procedure,
    })
}

fn require<T>(field: &str, value: Option<T>) -> Result<T, ScoringError> {
    value.ok_or_else(|| ScoringError::missing(field))
}

fn require_in_range(
    field: &str,
    value: Option<f64>,
    range: (f64, f64),
) -> Result<f64, ScoringError> {
    check_range(field, require(field, value)?, range)
}

/// Non-finite values are always out of domain.
fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<f64, ScoringError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(ScoringError::out_of_domain(
            field,
            value,
            &format!("[{min}, {max}]"),
        ))
    }
}

/// Range-check a wound / ischemia / infection triple, in that order.
pub fn validate_wifi_grades(
    wound: i32,
    ischemia: i32,
    infection: i32,
) -> Result<(OrdinalGrade, OrdinalGrade, OrdinalGrade), ScoringError> {
    Ok((
        OrdinalGrade::new(wound, "wound_grade")?,
        OrdinalGrade::new(ischemia, "ischemia_grade")?,
        OrdinalGrade::new(infection, "infection_grade")?,
    ))
}

/// Check a dated reading series: non-empty, finite non-negative values,
/// ordered target bands and dates that never go backwards.
pub fn validate_inr_readings(readings: &[InrReading]) -> Result<(), ScoringError> {
    if readings.is_empty() {
        return Err(ScoringError::missing("readings"));
    }

    for (i, reading) in readings.iter().enumerate() {
        if !reading.value.is_finite() || reading.value < 0.0 {
            return Err(ScoringError::out_of_domain(
                &format!("readings[{i}].value"),
                reading.value,
                "finite, >= 0",
            ));
        }
        if !(reading.target_low.is_finite() && reading.target_high.is_finite())
            || reading.target_low > reading.target_high
        {
            return Err(ScoringError::out_of_domain(
                &format!("readings[{i}].target"),
                format!("[{}, {}]", reading.target_low, reading.target_high),
                "finite, low <= high",
            ));
        }
    }

    if let Some(i) = readings.windows(2).position(|w| w[1].date < w[0].date) {
        return Err(ScoringError::out_of_domain(
            &format!("readings[{}].date", i + 1),
            readings[i + 1].date,
            "on or after the previous reading",
        ));
    }

    Ok(())
}
