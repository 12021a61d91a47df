use serde::{Deserialize, Serialize};

use super::enums::{ProcedureType, Sex};

/// Raw clinical attributes as assembled by the caller from patient data.
///
/// Numeric and tag fields are optional so an absent value can be reported
/// by name. Comorbidity flags default to `false` when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalProfile {
    pub age: Option<f64>,
    pub sex: Option<String>,
    /// Left ventricular ejection fraction, percent.
    pub ejection_fraction: Option<f64>,
    pub nyha_class: Option<i32>,
    /// Serum creatinine, mg/dL.
    pub creatinine: Option<f64>,
    #[serde(default)]
    pub dialysis: bool,
    #[serde(default)]
    pub diabetes: bool,
    #[serde(default)]
    pub chronic_lung_disease: bool,
    #[serde(default)]
    pub carotid_disease: bool,
    #[serde(default)]
    pub peripheral_vascular_disease: bool,
    #[serde(default)]
    pub prior_cardiac_surgery: bool,
    pub procedure: Option<String>,
}

/// A clinical profile whose every attribute has been checked.
///
/// Only produced by [`crate::scoring::validate`]; the models accept nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedProfile {
    pub(crate) age: f64,
    pub(crate) sex: Sex,
    pub(crate) ejection_fraction: f64,
    pub(crate) nyha_class: u8,
    /// Absent only when the patient is on dialysis.
    pub(crate) creatinine: Option<f64>,
    pub(crate) dialysis: bool,
    pub(crate) diabetes: bool,
    pub(crate) chronic_lung_disease: bool,
    pub(crate) carotid_disease: bool,
    pub(crate) peripheral_vascular_disease: bool,
    pub(crate) prior_cardiac_surgery: bool,
    pub(crate) procedure: ProcedureType,
}

impl ValidatedProfile {
    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn ejection_fraction(&self) -> f64 {
        self.ejection_fraction
    }

    pub fn nyha_class(&self) -> u8 {
        self.nyha_class
    }

    pub fn creatinine(&self) -> Option<f64> {
        self.creatinine
    }

    pub fn dialysis(&self) -> bool {
        self.dialysis
    }

    pub fn diabetes(&self) -> bool {
        self.diabetes
    }

    pub fn chronic_lung_disease(&self) -> bool {
        self.chronic_lung_disease
    }

    pub fn carotid_disease(&self) -> bool {
        self.carotid_disease
    }

    pub fn peripheral_vascular_disease(&self) -> bool {
        self.peripheral_vascular_disease
    }

    pub fn prior_cardiac_surgery(&self) -> bool {
        self.prior_cardiac_surgery
    }

    pub fn procedure(&self) -> ProcedureType {
        self.procedure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comorbidity_flags_default_to_false() {
        let profile: ClinicalProfile = serde_json::from_str(
            r#"{"age": 71, "sex": "male", "ejection_fraction": 55, "nyha_class": 2,
                "creatinine": 1.1, "procedure": "savr"}"#,
        )
        .unwrap();
        assert_eq!(profile.age, Some(71.0));
        assert!(!profile.dialysis);
        assert!(!profile.prior_cardiac_surgery);
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let profile: ClinicalProfile = serde_json::from_str(r#"{"diabetes": true}"#).unwrap();
        assert!(profile.age.is_none());
        assert!(profile.procedure.is_none());
        assert!(profile.diabetes);
    }
}
