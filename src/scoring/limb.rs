//! WIfI limb staging, amputation risk and limb-salvage estimates.
//!
//! Amputation risk and limb salvage come from two separately tuned rule
//! sets. They describe different outcomes and are not complements:
//! `salvage + amputation` need not equal 100.

use crate::models::{
    ConduitAvailability, InfectionControl, LesionComplexity, LimbAssessmentInput,
    LimbComorbidities, LimbStage, Runoff,
};

use super::categorizer::{categorize, BandTable};
use super::messages::MessageTemplates;
use super::types::{LimbRiskResult, OrdinalGrade, RiskScore, ScoringError};
use super::validation::validate_wifi_grades;

pub const AMPUTATION_MIN: f64 = 5.0;
pub const AMPUTATION_MAX: f64 = 90.0;
pub const SALVAGE_BASE: f64 = 85.0;
pub const SALVAGE_MIN: f64 = 40.0;
pub const SALVAGE_MAX: f64 = 95.0;

// ---------------------------------------------------------------------------
// Staging
// ---------------------------------------------------------------------------

/// Derive the clinical stage from wound, ischemia and foot-infection grades.
///
/// First match wins: any grade 3, or two or more grades at 2+, is stage 4;
/// otherwise the highest grade decides (2 -> 3, 1 -> 2, 0 -> 1).
pub fn stage_limb_ischemia(
    wound: OrdinalGrade,
    ischemia: OrdinalGrade,
    infection: OrdinalGrade,
) -> LimbStage {
    let grades = [wound.value(), ischemia.value(), infection.value()];
    let max = grades.iter().copied().max().unwrap_or(0);
    let at_least_two = grades.iter().filter(|g| **g >= 2).count();

    if max == 3 || at_least_two >= 2 {
        LimbStage::Stage4
    } else if max == 2 {
        LimbStage::Stage3
    } else if max == 1 {
        LimbStage::Stage2
    } else {
        LimbStage::Stage1
    }
}

// ---------------------------------------------------------------------------
// Amputation risk
// ---------------------------------------------------------------------------

fn amputation_stage_base(stage: LimbStage) -> f64 {
    match stage {
        LimbStage::Stage1 => 5.0,
        LimbStage::Stage2 => 10.0,
        LimbStage::Stage3 => 25.0,
        LimbStage::Stage4 => 50.0,
    }
}

fn amputation_lesion_increment(lesion: LesionComplexity) -> f64 {
    match lesion {
        LesionComplexity::A => 0.0,
        LesionComplexity::B => 5.0,
        LesionComplexity::C => 10.0,
        LesionComplexity::D => 15.0,
    }
}

fn amputation_runoff_adjustment(runoff: Runoff) -> f64 {
    match runoff {
        Runoff::Three => -10.0,
        Runoff::Two => 0.0,
        Runoff::Single => 10.0,
    }
}

fn infection_control_penalty(control: InfectionControl) -> f64 {
    match control {
        InfectionControl::Adequate => 0.0,
        InfectionControl::Pending => 5.0,
        InfectionControl::Inadequate => 15.0,
    }
}

/// Comorbidity increments as (present, increment) pairs.
fn amputation_comorbidity_increments(c: &LimbComorbidities) -> [(bool, f64); 4] {
    [
        (c.diabetes, 10.0),
        (c.dialysis, 15.0),
        (c.immunocompromised, 10.0),
        (c.active_smoker, 5.0),
    ]
}

/// Estimated major amputation risk, percent, clamped to `[5, 90]`.
pub fn estimate_amputation_risk(
    stage: LimbStage,
    lesion: LesionComplexity,
    comorbidities: &LimbComorbidities,
    runoff: Runoff,
    infection_control: InfectionControl,
) -> RiskScore {
    let comorbidity: f64 = amputation_comorbidity_increments(comorbidities)
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, increment)| increment)
        .sum();

    let raw = amputation_stage_base(stage)
        + amputation_lesion_increment(lesion)
        + comorbidity
        + amputation_runoff_adjustment(runoff)
        + infection_control_penalty(infection_control);

    RiskScore::clamped(raw, AMPUTATION_MIN, AMPUTATION_MAX)
}

// ---------------------------------------------------------------------------
// Limb salvage
// ---------------------------------------------------------------------------

fn salvage_stage_adjustment(stage: LimbStage) -> f64 {
    match stage {
        LimbStage::Stage1 => 5.0,
        LimbStage::Stage2 => 0.0,
        LimbStage::Stage3 => -10.0,
        LimbStage::Stage4 => -20.0,
    }
}

fn salvage_lesion_adjustment(lesion: LesionComplexity) -> f64 {
    match lesion {
        LesionComplexity::A => 5.0,
        LesionComplexity::B => 0.0,
        LesionComplexity::C => -10.0,
        LesionComplexity::D => -25.0,
    }
}

fn salvage_runoff_adjustment(runoff: Runoff) -> f64 {
    match runoff {
        Runoff::Three => 5.0,
        Runoff::Two => 0.0,
        Runoff::Single => -10.0,
    }
}

/// Estimated limb-salvage rate, percent, clamped to `[40, 95]`.
pub fn estimate_limb_salvage_rate(
    stage: LimbStage,
    lesion: LesionComplexity,
    runoff: Runoff,
    conduit: ConduitAvailability,
    comorbidities: &LimbComorbidities,
) -> RiskScore {
    let mut raw = SALVAGE_BASE
        + salvage_stage_adjustment(stage)
        + salvage_lesion_adjustment(lesion)
        + salvage_runoff_adjustment(runoff);

    if conduit == ConduitAvailability::Available {
        raw += 5.0;
    }
    if comorbidities.diabetes {
        raw -= 5.0;
    }
    if comorbidities.dialysis {
        raw -= 10.0;
    }
    if comorbidities.active_smoker {
        raw -= 5.0;
    }

    RiskScore::clamped(raw, SALVAGE_MIN, SALVAGE_MAX)
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// Advisory strings from independent triggers, in trigger-check order.
/// An empty list is valid.
pub fn limb_recommendations(
    stage: LimbStage,
    lesion: LesionComplexity,
    runoff: Runoff,
    comorbidities: &LimbComorbidities,
) -> Vec<String> {
    let triggers = [
        (stage >= LimbStage::Stage3, MessageTemplates::LIMB_URGENT_REVASCULARIZATION),
        (lesion == LesionComplexity::D, MessageTemplates::LIMB_MULTIDISCIPLINARY),
        (runoff == Runoff::Single, MessageTemplates::LIMB_WOUND_CARE),
        (
            comorbidities.diabetes && comorbidities.active_smoker,
            MessageTemplates::LIMB_RISK_FACTOR_MODIFICATION,
        ),
    ];

    triggers
        .into_iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, text)| text.to_string())
        .collect()
}

/// Validate the WIfI grades, stage the limb and run both estimates.
pub fn assess_limb(
    input: &LimbAssessmentInput,
    amputation_bands: &BandTable,
) -> Result<LimbRiskResult, ScoringError> {
    let (wound, ischemia, infection) =
        validate_wifi_grades(input.wound_grade, input.ischemia_grade, input.infection_grade)?;
    let stage = stage_limb_ischemia(wound, ischemia, infection);

    let amputation_risk = estimate_amputation_risk(
        stage,
        input.lesion,
        &input.comorbidities,
        input.runoff,
        input.infection_control,
    );
    let limb_salvage_rate = estimate_limb_salvage_rate(
        stage,
        input.lesion,
        input.runoff,
        input.conduit,
        &input.comorbidities,
    );
    let (amputation_category, amputation_recommendation) =
        categorize(amputation_risk.value(), amputation_bands);

    Ok(LimbRiskResult {
        stage,
        amputation_risk,
        amputation_category,
        amputation_recommendation: amputation_recommendation.to_string(),
        limb_salvage_rate,
        recommendations: limb_recommendations(
            stage,
            input.lesion,
            input.runoff,
            &input.comorbidities,
        ),
    })
}
