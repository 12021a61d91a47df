use crate::models::{
    BleedingRiskFactors, BridgingDecision, ProcedureBleedRisk, RiskCategory, StrokeRiskFactors,
};

use super::categorizer::categorize;
use super::messages::MessageTemplates;
use super::reference::ScoringReference;
use super::types::{BleedingRiskScore, BridgingPlan, StrokeRiskScore};

/// Domain shared by the stroke and bleeding point counts.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 9.0;

/// One row of the bridging decision table, matched on the categorized
/// stroke and bleeding scores.
struct DecisionRule {
    applies: fn(RiskCategory, RiskCategory) -> bool,
    decision: BridgingDecision,
}

/// Evaluated top to bottom; the first matching row wins and anything left
/// over is `Consider`. With the built-in bands this reads:
///
/// | stroke | bleeding | decision |
/// |--------|----------|----------|
/// | ≥ 4    | < 3      | Bridge   |
/// | ≤ 2    | any      | NoBridge |
/// | any    | ≥ 3      | NoBridge |
/// | 3      | < 3      | Consider |
const DECISION_TABLE: &[DecisionRule] = &[
    DecisionRule {
        applies: |stroke, bleeding| stroke == RiskCategory::High && bleeding < RiskCategory::High,
        decision: BridgingDecision::Bridge,
    },
    DecisionRule {
        applies: |stroke, bleeding| stroke == RiskCategory::Low || bleeding == RiskCategory::High,
        decision: BridgingDecision::NoBridge,
    },
];

/// Decide whether periprocedural anticoagulation bridging is indicated.
///
/// Stroke and bleeding risk interact only through the threshold comparisons
/// of the decision table; there is no weighted combination.
pub fn decide_bridging(
    stroke: StrokeRiskScore,
    bleeding: BleedingRiskScore,
    procedure: ProcedureBleedRisk,
    reference: &ScoringReference,
) -> BridgingPlan {
    let (stroke_category, _) = categorize(f64::from(stroke.value()), &reference.stroke);
    let (bleeding_category, _) = categorize(f64::from(bleeding.value()), &reference.bleeding);

    let decision = DECISION_TABLE
        .iter()
        .find(|rule| (rule.applies)(stroke_category, bleeding_category))
        .map(|rule| rule.decision)
        .unwrap_or(BridgingDecision::Consider);

    let protocol = match decision {
        BridgingDecision::Bridge => bridge_protocol(procedure),
        BridgingDecision::NoBridge => MessageTemplates::NO_BRIDGE_PROTOCOL.to_string(),
        BridgingDecision::Consider => {
            MessageTemplates::consider_protocol(stroke.value(), bleeding.value())
        }
    };

    BridgingPlan {
        decision,
        protocol,
        stroke_score: stroke.value(),
        bleeding_score: bleeding.value(),
        stroke_category,
        bleeding_category,
        procedure_bleed_risk: procedure,
    }
}

/// Higher procedural bleeding risk means a longer pre-procedure interruption
/// and a later heparin restart.
fn bridge_protocol(procedure: ProcedureBleedRisk) -> String {
    match procedure {
        ProcedureBleedRisk::High => MessageTemplates::bridge_protocol(5, "48-72 hours"),
        ProcedureBleedRisk::Moderate => MessageTemplates::bridge_protocol(3, "24 hours"),
        ProcedureBleedRisk::Low => MessageTemplates::BRIDGE_LOW_BLEED_PROCEDURE.to_string(),
    }
}

/// CHA₂DS₂-VASc point count. Age 75+ scores 2 and supersedes the 65-74 point.
pub fn cha2ds2_vasc(factors: &StrokeRiskFactors) -> StrokeRiskScore {
    let age_points = if factors.age_75_or_older {
        2
    } else if factors.age_65_to_74 {
        1
    } else {
        0
    };
    let points = u8::from(factors.congestive_heart_failure)
        + u8::from(factors.hypertension)
        + age_points
        + u8::from(factors.diabetes)
        + 2 * u8::from(factors.prior_stroke_or_tia)
        + u8::from(factors.vascular_disease)
        + u8::from(factors.female);
    StrokeRiskScore::saturating(points)
}

/// HAS-BLED point count, one point per factor.
pub fn has_bled(factors: &BleedingRiskFactors) -> BleedingRiskScore {
    let points = [
        factors.uncontrolled_hypertension,
        factors.abnormal_renal_function,
        factors.abnormal_liver_function,
        factors.prior_stroke,
        factors.bleeding_history,
        factors.labile_inr,
        factors.elderly,
        factors.antiplatelet_or_nsaid,
        factors.alcohol_excess,
    ]
    .into_iter()
    .filter(|present| *present)
    .count();
    BleedingRiskScore::saturating(points as u8)
}
