use std::time::Instant;

use chrono::Local;
use uuid::Uuid;

use crate::models::{
    ClinicalProfile, InrReading, LimbAssessmentInput, ProcedureBleedRisk, ProcedureType, TtrMethod,
};

use super::bridging::decide_bridging;
use super::limb::assess_limb;
use super::reference::ScoringReference;
use super::surgical::score_surgical_risk;
use super::therapeutic::compute_time_in_therapeutic_range;
use super::types::{
    BleedingRiskScore, BridgingPlan, LimbRiskResult, RiskEngine, ScoringError, ScoringRecord,
    StrokeRiskScore, SurgicalRiskResult, TherapeuticRangeSummary,
};
use super::validation::validate;

/// Default implementation of the risk engine.
/// Holds immutable band tables; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct DefaultRiskEngine {
    pub(crate) reference: ScoringReference,
}

impl DefaultRiskEngine {
    pub fn new(reference: ScoringReference) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ScoringReference {
        &self.reference
    }

    /// Stamp a result with an id, timestamp and elapsed time.
    fn record<T>(result: T, start: Instant) -> ScoringRecord<T> {
        ScoringRecord {
            id: Uuid::new_v4(),
            scored_at: Local::now().naive_local(),
            processing_time_ms: start.elapsed().as_millis() as u64,
            result,
        }
    }
}

impl RiskEngine for DefaultRiskEngine {
    fn score_surgical(
        &self,
        profile: &ClinicalProfile,
    ) -> Result<ScoringRecord<SurgicalRiskResult>, ScoringError> {
        let start = Instant::now();

        let validated = validate(profile)?;
        let result = score_surgical_risk(&validated, &self.reference.surgical);

        tracing::info!(
            procedure = %validated.procedure(),
            mortality = result.mortality.value(),
            saturated = result.mortality.saturated(),
            category = result.category.as_str(),
            risk_factors = result.risk_factors.len(),
            "Surgical risk scored"
        );

        Ok(Self::record(result, start))
    }

    fn score_surgical_batch(
        &self,
        profiles: &[ClinicalProfile],
    ) -> Vec<Result<ScoringRecord<SurgicalRiskResult>, ScoringError>> {
        let results: Vec<_> = profiles.iter().map(|p| self.score_surgical(p)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            tracing::warn!(
                total = profiles.len(),
                failed,
                "Surgical batch contained invalid profiles"
            );
        }

        results
    }

    fn plan_bridging(
        &self,
        stroke_risk: i32,
        bleeding_risk: i32,
        procedure_risk: ProcedureBleedRisk,
    ) -> Result<ScoringRecord<BridgingPlan>, ScoringError> {
        let start = Instant::now();

        let stroke = StrokeRiskScore::new(stroke_risk, "stroke_risk")?;
        let bleeding = BleedingRiskScore::new(bleeding_risk, "bleeding_risk")?;
        let plan = decide_bridging(stroke, bleeding, procedure_risk, &self.reference);

        tracing::info!(
            stroke = stroke.value(),
            bleeding = bleeding.value(),
            procedure_risk = %procedure_risk,
            decision = plan.decision.as_str(),
            "Bridging decision made"
        );

        Ok(Self::record(plan, start))
    }

    fn plan_bridging_for_procedure(
        &self,
        stroke_risk: i32,
        bleeding_risk: i32,
        procedure: ProcedureType,
    ) -> Result<ScoringRecord<BridgingPlan>, ScoringError> {
        let bleed_risk = procedure.bleed_risk();
        tracing::debug!(
            procedure = %procedure,
            bleed_risk = %bleed_risk,
            "Procedure bleed risk resolved"
        );
        self.plan_bridging(stroke_risk, bleeding_risk, bleed_risk)
    }

    fn time_in_therapeutic_range(
        &self,
        readings: &[InrReading],
        method: TtrMethod,
    ) -> Result<ScoringRecord<TherapeuticRangeSummary>, ScoringError> {
        let start = Instant::now();

        let summary = compute_time_in_therapeutic_range(readings, method)?;

        tracing::info!(
            readings = summary.reading_count,
            method = %method,
            time_in_range = summary.time_in_range.value(),
            poor_control = summary.poor_control,
            "Time in therapeutic range computed"
        );

        Ok(Self::record(summary, start))
    }

    fn assess_limb(
        &self,
        input: &LimbAssessmentInput,
    ) -> Result<ScoringRecord<LimbRiskResult>, ScoringError> {
        let start = Instant::now();

        let result = assess_limb(input, &self.reference.amputation)?;

        tracing::info!(
            stage = result.stage.number(),
            amputation_risk = result.amputation_risk.value(),
            amputation_saturated = result.amputation_risk.saturated(),
            limb_salvage_rate = result.limb_salvage_rate.value(),
            recommendations = result.recommendations.len(),
            "Limb assessment complete"
        );

        Ok(Self::record(result, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BridgingDecision, ConduitAvailability, InfectionControl, LesionComplexity,
        LimbComorbidities, LimbStage, RiskCategory, Runoff,
    };

    fn engine() -> DefaultRiskEngine {
        DefaultRiskEngine::new(ScoringReference::builtin())
    }

    fn profile(age: f64) -> ClinicalProfile {
        ClinicalProfile {
            age: Some(age),
            sex: Some("male".into()),
            ejection_fraction: Some(55.0),
            nyha_class: Some(1),
            creatinine: Some(1.0),
            procedure: Some("cabg".into()),
            ..Default::default()
        }
    }

    #[test]
    fn score_surgical_validates_first() {
        let bad = ClinicalProfile {
            procedure: None,
            ..profile(60.0)
        };
        assert_eq!(
            engine().score_surgical(&bad).unwrap_err(),
            ScoringError::missing("procedure")
        );
    }

    #[test]
    fn score_surgical_wraps_result() {
        let record = engine().score_surgical(&profile(75.0)).unwrap();
        assert_eq!(record.result.risk_factors, vec!["age 70-79"]);
        // 1.5 + 2.5 sits exactly on the intermediate lower bound
        assert_eq!(record.result.mortality.value(), 4.0);
        assert_eq!(record.result.category, RiskCategory::Intermediate);
        assert!(!record.id.is_nil());
    }

    #[test]
    fn batch_keeps_input_order_and_isolates_failures() {
        let profiles = vec![
            profile(50.0),
            ClinicalProfile {
                age: Some(-3.0),
                ..profile(50.0)
            },
            profile(85.0),
        ];
        let results = engine().score_surgical_batch(&profiles);
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().result.risk_factors.is_empty());
        assert!(matches!(results[1], Err(ScoringError::OutOfDomain { .. })));
        assert_eq!(
            results[2].as_ref().unwrap().result.risk_factors,
            vec!["age ≥80"]
        );
    }

    #[test]
    fn plan_bridging_range_checks_scores() {
        let err = engine()
            .plan_bridging(12, 0, ProcedureBleedRisk::Low)
            .unwrap_err();
        assert!(matches!(
            err,
            ScoringError::OutOfDomain { field, .. } if field == "stroke_risk"
        ));

        let record = engine()
            .plan_bridging(5, 1, ProcedureBleedRisk::High)
            .unwrap();
        assert_eq!(record.result.decision, BridgingDecision::Bridge);
    }

    #[test]
    fn bridging_for_procedure_uses_its_bleed_risk() {
        let colonoscopy = engine()
            .plan_bridging_for_procedure(5, 1, ProcedureType::Colonoscopy)
            .unwrap();
        assert_eq!(colonoscopy.result.procedure_bleed_risk, ProcedureBleedRisk::Low);
        assert_eq!(
            colonoscopy.result.protocol,
            engine()
                .plan_bridging(5, 1, ProcedureBleedRisk::Low)
                .unwrap()
                .result
                .protocol
        );

        let tavr = engine()
            .plan_bridging_for_procedure(5, 1, ProcedureType::Tavr)
            .unwrap();
        assert!(tavr.result.protocol.contains("hold warfarin 3 days"));

        let redo = engine()
            .plan_bridging_for_procedure(5, 1, ProcedureType::RedoCardiac)
            .unwrap();
        assert_eq!(redo.result.procedure_bleed_risk, ProcedureBleedRisk::High);
        assert!(redo.result.protocol.contains("hold warfarin 5 days"));
    }

    #[test]
    fn bridging_for_procedure_still_range_checks() {
        assert!(engine()
            .plan_bridging_for_procedure(2, 10, ProcedureType::Cabg)
            .is_err());
    }

    #[test]
    fn assess_limb_through_engine() {
        let input = LimbAssessmentInput {
            wound_grade: 1,
            ischemia_grade: 0,
            infection_grade: 0,
            lesion: LesionComplexity::A,
            runoff: Runoff::Three,
            conduit: ConduitAvailability::Available,
            infection_control: InfectionControl::Adequate,
            comorbidities: LimbComorbidities::default(),
        };
        let record = engine().assess_limb(&input).unwrap();
        assert_eq!(record.result.stage, LimbStage::Stage2);
        assert_eq!(record.result.amputation_risk.value(), 5.0);
        assert!(record.result.recommendations.is_empty());
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DefaultRiskEngine>();
    }
}
