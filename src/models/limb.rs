use serde::{Deserialize, Serialize};

use super::enums::{ConduitAvailability, InfectionControl, LesionComplexity, Runoff};

/// Patient-level conditions that modify limb outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimbComorbidities {
    #[serde(default)]
    pub diabetes: bool,
    #[serde(default)]
    pub dialysis: bool,
    #[serde(default)]
    pub immunocompromised: bool,
    #[serde(default)]
    pub active_smoker: bool,
}

/// Everything needed for a full limb-threat assessment.
///
/// WIfI grades arrive as raw integers and are range-checked before staging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimbAssessmentInput {
    pub wound_grade: i32,
    pub ischemia_grade: i32,
    pub infection_grade: i32,
    pub lesion: LesionComplexity,
    pub runoff: Runoff,
    pub conduit: ConduitAvailability,
    pub infection_control: InfectionControl,
    #[serde(default)]
    pub comorbidities: LimbComorbidities,
}
