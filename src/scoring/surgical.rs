use crate::models::{Sex, ValidatedProfile};

use super::categorizer::{categorize, BandTable};
use super::types::{RiskScore, SurgicalRiskResult};

/// Baseline 30-day mortality before any risk factor, percent.
pub const BASE_MORTALITY: f64 = 1.5;
pub const MORTALITY_MIN: f64 = 0.5;
pub const MORTALITY_MAX: f64 = 25.0;
/// Morbidity is derived from the clamped mortality.
pub const MORBIDITY_MULTIPLIER: f64 = 2.5;
pub const MORBIDITY_MIN: f64 = MORTALITY_MIN * MORBIDITY_MULTIPLIER;
pub const MORBIDITY_MAX: f64 = 50.0;
pub const FEMALE_MULTIPLIER: f64 = 0.9;

/// Creatinine (mg/dL) above which renal dysfunction counts, when not on dialysis.
const CREATININE_THRESHOLD: f64 = 2.0;

/// Tiers that must not stack: within a group only the first firing rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Age,
    LvFunction,
    Renal,
    Nyha,
}

/// One additive risk factor: when `applies` holds, add `increment` and record `label`.
struct RiskRule {
    label: &'static str,
    increment: f64,
    tier: Option<Tier>,
    applies: fn(&ValidatedProfile) -> bool,
}

/// Additive factors in evaluation order. Within a tier the worse condition
/// comes first so it wins.
const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        label: "age ≥80",
        increment: 4.0,
        tier: Some(Tier::Age),
        applies: |p| p.age >= 80.0,
    },
    RiskRule {
        label: "age 70-79",
        increment: 2.5,
        tier: Some(Tier::Age),
        applies: |p| p.age >= 70.0,
    },
    RiskRule {
        label: "age 60-69",
        increment: 1.0,
        tier: Some(Tier::Age),
        applies: |p| p.age >= 60.0,
    },
    RiskRule {
        label: "severe LV dysfunction",
        increment: 4.0,
        tier: Some(Tier::LvFunction),
        applies: |p| p.ejection_fraction < 30.0,
    },
    RiskRule {
        label: "moderate LV dysfunction",
        increment: 2.0,
        tier: Some(Tier::LvFunction),
        applies: |p| p.ejection_fraction < 40.0,
    },
    RiskRule {
        label: "dialysis-dependent renal failure",
        increment: 5.0,
        tier: Some(Tier::Renal),
        applies: |p| p.dialysis,
    },
    RiskRule {
        label: "elevated creatinine",
        increment: 2.0,
        tier: Some(Tier::Renal),
        applies: |p| p.creatinine.is_some_and(|c| c > CREATININE_THRESHOLD),
    },
    RiskRule {
        label: "diabetes mellitus",
        increment: 1.5,
        tier: None,
        applies: |p| p.diabetes,
    },
    RiskRule {
        label: "chronic lung disease",
        increment: 2.0,
        tier: None,
        applies: |p| p.chronic_lung_disease,
    },
    RiskRule {
        label: "carotid disease",
        increment: 1.0,
        tier: None,
        applies: |p| p.carotid_disease,
    },
    RiskRule {
        label: "peripheral vascular disease",
        increment: 1.5,
        tier: None,
        applies: |p| p.peripheral_vascular_disease,
    },
    RiskRule {
        label: "prior cardiac surgery",
        increment: 3.0,
        tier: None,
        applies: |p| p.prior_cardiac_surgery,
    },
    RiskRule {
        label: "NYHA class IV",
        increment: 3.0,
        tier: Some(Tier::Nyha),
        applies: |p| p.nyha_class == 4,
    },
    RiskRule {
        label: "NYHA class III",
        increment: 1.5,
        tier: Some(Tier::Nyha),
        applies: |p| p.nyha_class == 3,
    },
];

/// Sum the additive rules once each, honoring tier exclusivity.
/// Returns the raw increment total and the fired labels in order.
fn apply_risk_rules(profile: &ValidatedProfile) -> (f64, Vec<String>) {
    let mut total = 0.0;
    let mut labels = Vec::new();
    let mut fired_tiers: Vec<Tier> = Vec::new();

    for rule in RISK_RULES {
        if let Some(tier) = rule.tier {
            if fired_tiers.contains(&tier) {
                continue;
            }
        }
        if (rule.applies)(profile) {
            total += rule.increment;
            labels.push(rule.label.to_string());
            if let Some(tier) = rule.tier {
                fired_tiers.push(tier);
            }
        }
    }

    (total, labels)
}

/// Estimate 30-day mortality and morbidity for the planned procedure.
///
/// Increments are additive and applied once each; the sex and procedure
/// multipliers follow; mortality is clamped once at the end and morbidity is
/// derived from the clamped value.
pub fn score_surgical_risk(profile: &ValidatedProfile, bands: &BandTable) -> SurgicalRiskResult {
    let (increments, risk_factors) = apply_risk_rules(profile);
    let mut protective_factors = Vec::new();

    if profile.age < 60.0 {
        protective_factors.push("age <60".to_string());
    }

    let mut mortality = BASE_MORTALITY + increments;

    if profile.sex == Sex::Female {
        mortality *= FEMALE_MULTIPLIER;
        protective_factors.push("female sex".to_string());
    }

    let procedure_multiplier = profile.procedure.mortality_multiplier();
    mortality *= procedure_multiplier;
    if procedure_multiplier < 1.0 {
        protective_factors.push(profile.procedure.display_name().to_string());
    }

    let mortality = RiskScore::clamped(mortality, MORTALITY_MIN, MORTALITY_MAX);
    let morbidity = RiskScore::clamped(
        mortality.value() * MORBIDITY_MULTIPLIER,
        MORBIDITY_MIN,
        MORBIDITY_MAX,
    );

    let (category, recommendation) = categorize(mortality.value(), bands);

    SurgicalRiskResult {
        mortality,
        morbidity,
        category,
        recommendation: recommendation.to_string(),
        risk_factors,
        protective_factors,
    }
}
