//! Input and output vocabulary shared by the scoring models.
//!
//! Raw caller-supplied records (`ClinicalProfile`, `LimbAssessmentInput`,
//! `InrReading`) and the closed tag enums they resolve into.

mod anticoagulation;
pub mod enums;
mod limb;
mod profile;

pub use anticoagulation::*;
pub use enums::*;
pub use limb::*;
pub use profile::*;
