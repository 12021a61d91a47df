//! Clinical risk stratification: three independent rule-based models.
//!
//! 1. Surgical risk: 30-day mortality and morbidity from weighted
//!    comorbidity and procedure factors
//! 2. Bridging: periprocedural anticoagulation decision from stroke and
//!    bleeding scores, plus time in therapeutic range
//! 3. Limb ischemia: WIfI staging feeding amputation-risk and
//!    limb-salvage estimates
//!
//! Every model is a pure function of validated input. Inputs pass through
//! `validation` first; scores are turned into bands by the shared
//! `categorizer`.

pub mod bridging;
pub mod categorizer;
pub mod engine;
pub mod limb;
pub mod messages;
pub mod reference;
pub mod surgical;
pub mod therapeutic;
pub mod types;
pub mod validation;

pub use bridging::{cha2ds2_vasc, decide_bridging, has_bled};
pub use categorizer::{categorize, Band, BandTable};
pub use engine::DefaultRiskEngine;
pub use limb::{
    assess_limb, estimate_amputation_risk, estimate_limb_salvage_rate, limb_recommendations,
    stage_limb_ischemia,
};
pub use reference::ScoringReference;
pub use surgical::score_surgical_risk;
pub use therapeutic::compute_time_in_therapeutic_range;
pub use types::*;
pub use validation::{validate, validate_inr_readings, validate_wifi_grades};
