use serde::{Deserialize, Serialize};

use crate::scoring::ScoringError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The field literal names the attribute reported when parsing fails.
macro_rules! str_enum {
    ($name:ident, $field:literal { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ScoringError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ScoringError::UnrecognizedVariant {
                        field: $field.into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Sex, "sex" {
    Male => "male",
    Female => "female",
});

str_enum!(ProcedureType, "procedure" {
    Savr => "savr",
    Tavr => "tavr",
    Cabg => "cabg",
    CabgValve => "cabg_valve",
    MitralRepair => "mitral_repair",
    MitralReplacement => "mitral_replacement",
    DoubleValve => "double_valve",
    RedoCardiac => "redo_cardiac",
    Colonoscopy => "colonoscopy",
    PeripheralRevascularization => "peripheral_revascularization",
});

str_enum!(ProcedureBleedRisk, "procedure_bleed_risk" {
    Low => "low",
    Moderate => "moderate",
    High => "high",
});

str_enum!(RiskCategory, "risk_category" {
    Low => "low",
    Intermediate => "intermediate",
    High => "high",
    Prohibitive => "prohibitive",
});

str_enum!(BridgingDecision, "bridging_decision" {
    Bridge => "bridge",
    NoBridge => "no_bridge",
    Consider => "consider",
});

str_enum!(LimbStage, "limb_stage" {
    Stage1 => "stage1",
    Stage2 => "stage2",
    Stage3 => "stage3",
    Stage4 => "stage4",
});

str_enum!(LesionComplexity, "lesion_complexity" {
    A => "a",
    B => "b",
    C => "c",
    D => "d",
});

str_enum!(Runoff, "runoff" {
    Single => "single",
    Two => "two",
    Three => "three",
});

str_enum!(InfectionControl, "infection_control" {
    Adequate => "adequate",
    Pending => "pending",
    Inadequate => "inadequate",
});

str_enum!(ConduitAvailability, "conduit" {
    Available => "available",
    Unavailable => "unavailable",
});

str_enum!(TtrMethod, "ttr_method" {
    ReadingFraction => "reading_fraction",
    LinearInterpolation => "linear_interpolation",
});

impl ProcedureType {
    /// Multiplicative adjustment applied to the surgical mortality estimate.
    pub fn mortality_multiplier(&self) -> f64 {
        match self {
            Self::Savr => 1.0,
            Self::Tavr => 0.75,
            Self::Cabg => 1.0,
            Self::CabgValve => 1.4,
            Self::MitralRepair => 0.9,
            Self::MitralReplacement => 1.2,
            Self::DoubleValve => 1.5,
            Self::RedoCardiac => 1.3,
            Self::Colonoscopy => 0.2,
            Self::PeripheralRevascularization => 0.8,
        }
    }

    /// Default periprocedural bleeding-risk classification.
    pub fn bleed_risk(&self) -> ProcedureBleedRisk {
        match self {
            Self::Colonoscopy => ProcedureBleedRisk::Low,
            Self::Tavr | Self::PeripheralRevascularization => ProcedureBleedRisk::Moderate,
            Self::Savr
            | Self::Cabg
            | Self::CabgValve
            | Self::MitralRepair
            | Self::MitralReplacement
            | Self::DoubleValve
            | Self::RedoCardiac => ProcedureBleedRisk::High,
        }
    }

    /// Human-readable name used in factor lists.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Savr => "surgical aortic valve replacement",
            Self::Tavr => "transcatheter aortic valve replacement",
            Self::Cabg => "coronary artery bypass grafting",
            Self::CabgValve => "CABG with valve surgery",
            Self::MitralRepair => "mitral valve repair",
            Self::MitralReplacement => "mitral valve replacement",
            Self::DoubleValve => "double valve surgery",
            Self::RedoCardiac => "redo cardiac surgery",
            Self::Colonoscopy => "colonoscopy",
            Self::PeripheralRevascularization => "peripheral revascularization",
        }
    }
}

impl RiskCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Intermediate => "Intermediate",
            Self::High => "High",
            Self::Prohibitive => "Prohibitive",
        }
    }
}

impl LimbStage {
    /// Clinical stage number (1-4).
    pub fn number(&self) -> u8 {
        match self {
            Self::Stage1 => 1,
            Self::Stage2 => 2,
            Self::Stage3 => 3,
            Self::Stage4 => 4,
        }
    }
}
