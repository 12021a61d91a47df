/// Narrative templates for recommendations and protocols.
/// Wording is advisory and clinician-facing; every string is selected
/// deterministically from a category, decision or trigger.
pub struct MessageTemplates;

impl MessageTemplates {
    // -- surgical bands ----------------------------------------------------

    pub const SURGICAL_LOW: &'static str =
        "Standard surgical candidate. Proceed with routine preoperative evaluation.";

    pub const SURGICAL_INTERMEDIATE: &'static str =
        "Heart team review recommended. Consider a transcatheter or less invasive alternative \
         and optimize comorbidities before surgery.";

    pub const SURGICAL_HIGH: &'static str =
        "High operative risk. Heart team evaluation required; favor a transcatheter approach \
         or medical management where appropriate.";

    // -- stroke / bleeding bands -----------------------------------------

    pub const STROKE_LOW: &'static str =
        "Low thromboembolic risk. Brief interruption of anticoagulation is generally safe.";

    pub const STROKE_INTERMEDIATE: &'static str =
        "Intermediate thromboembolic risk. Weigh bridging against procedural bleeding risk.";

    pub const STROKE_HIGH: &'static str =
        "High thromboembolic risk. Minimize time without anticoagulant coverage.";

    pub const BLEEDING_LOW: &'static str =
        "Acceptable bleeding risk for periprocedural heparin bridging.";

    pub const BLEEDING_HIGH: &'static str =
        "Elevated bleeding risk. Avoid bridging agents and address modifiable bleeding factors.";

    // -- amputation bands ------------------------------------------------

    pub const AMPUTATION_LOW: &'static str =
        "Limb threat is limited. Continue wound care and surveillance.";

    pub const AMPUTATION_INTERMEDIATE: &'static str =
        "Meaningful limb threat. Expedite vascular imaging and revascularization planning.";

    pub const AMPUTATION_HIGH: &'static str =
        "Major amputation risk is high. Prioritize limb-salvage intervention and discuss goals \
         of care.";

    // -- bridging protocols ---------------------------------------------

    /// Protocol text when bridging is indicated; interruption lengthens with
    /// procedural bleeding risk.
    pub fn bridge_protocol(procedure_days_hold: u8, resume_hours: &str) -> String {
        format!(
            "Bridge: hold warfarin {procedure_days_hold} days before the procedure. Start \
             therapeutic low-molecular-weight heparin when INR falls below range; give the last \
             dose 24 hours pre-procedure. Resume warfarin the evening after, and restart heparin \
             {resume_hours} post-procedure once hemostasis is secure, until INR is therapeutic."
        )
    }

    pub const BRIDGE_LOW_BLEED_PROCEDURE: &'static str =
        "Bridge only if interrupted: low-bleeding-risk procedure, continue anticoagulation \
         without interruption where feasible. If it must be held, hold warfarin 3 days and cover \
         with low-molecular-weight heparin, last dose 24 hours pre-procedure, resuming 24 hours \
         after.";

    pub const NO_BRIDGE_PROTOCOL: &'static str =
        "No bridging: stop the oral anticoagulant before the procedure according to agent and \
         renal function (warfarin 5 days, DOAC 24-48 hours) and resume 24-72 hours afterward once \
         hemostasis is secure. No parenteral bridging agent.";

    pub fn consider_protocol(stroke: u8, bleeding: u8) -> String {
        format!(
            "Consider bridging: intermediate balance between thromboembolic risk (stroke score \
             {stroke}) and bleeding risk (bleeding score {bleeding}). Decide on an individualized \
             basis, weighing prior thromboembolic events, valve type and procedural bleeding risk."
        )
    }

    // -- limb advisories ---------------------------------------------------

    pub const LIMB_URGENT_REVASCULARIZATION: &'static str =
        "Urgent vascular surgery consultation for revascularization.";

    pub const LIMB_MULTIDISCIPLINARY: &'static str =
        "Complex anatomy: multidisciplinary limb-salvage team planning recommended.";

    pub const LIMB_WOUND_CARE: &'static str =
        "Limited run-off: aggressive wound care and close surveillance.";

    pub const LIMB_RISK_FACTOR_MODIFICATION: &'static str =
        "Risk factor modification: smoking cessation and intensive glycemic control.";

    // -- therapeutic range ------------------------------------------------

    pub fn poor_control(percent: f64) -> String {
        format!(
            "Time in therapeutic range is {percent:.0}%, below the 60% threshold. Review \
             adherence, interacting drugs and the choice of anticoagulant."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_protocol_mentions_hold_window() {
        let text = MessageTemplates::bridge_protocol(5, "48-72 hours");
        assert!(text.contains("hold warfarin 5 days"));
        assert!(text.contains("48-72 hours"));
    }

    #[test]
    fn consider_protocol_names_both_scores() {
        let text = MessageTemplates::consider_protocol(3, 2);
        assert!(text.contains("stroke score 3"));
        assert!(text.contains("bleeding score 2"));
        assert!(text.contains("individualized"));
    }

    #[test]
    fn poor_control_rounds_percentage() {
        assert!(MessageTemplates::poor_control(42.4).contains("42%"));
    }
}
