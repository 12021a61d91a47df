use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::RiskCategory;

use super::bridging::{SCORE_MAX, SCORE_MIN};
use super::categorizer::{Band, BandTable};
use super::limb::{AMPUTATION_MAX, AMPUTATION_MIN};
use super::messages::MessageTemplates;
use super::surgical::{MORTALITY_MAX, MORTALITY_MIN};
use super::types::ScoringError;

/// File name looked up inside the data directory for band overrides.
pub const BANDS_FILE: &str = "risk_bands.json";

/// Band tables consumed by the categorizer, one per scored quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringReference {
    pub surgical: BandTable,
    pub stroke: BandTable,
    pub bleeding: BandTable,
    pub amputation: BandTable,
}

/// On-disk shape: any table may be omitted to keep the built-in one.
#[derive(Debug, Deserialize)]
struct BandOverrides {
    surgical: Option<BandTable>,
    stroke: Option<BandTable>,
    bleeding: Option<BandTable>,
    amputation: Option<BandTable>,
}

impl Default for ScoringReference {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScoringReference {
    /// The built-in tables.
    pub fn builtin() -> Self {
        Self {
            surgical: BandTable::from_parts(
                MORTALITY_MIN,
                MORTALITY_MAX,
                vec![
                    Band::below(4.0, RiskCategory::Low, MessageTemplates::SURGICAL_LOW),
                    Band::up_to(
                        8.0,
                        RiskCategory::Intermediate,
                        MessageTemplates::SURGICAL_INTERMEDIATE,
                    ),
                    Band::up_to(MORTALITY_MAX, RiskCategory::High, MessageTemplates::SURGICAL_HIGH),
                ],
            ),
            stroke: BandTable::from_parts(
                SCORE_MIN,
                SCORE_MAX,
                vec![
                    Band::up_to(2.0, RiskCategory::Low, MessageTemplates::STROKE_LOW),
                    Band::below(
                        4.0,
                        RiskCategory::Intermediate,
                        MessageTemplates::STROKE_INTERMEDIATE,
                    ),
                    Band::up_to(SCORE_MAX, RiskCategory::High, MessageTemplates::STROKE_HIGH),
                ],
            ),
            bleeding: BandTable::from_parts(
                SCORE_MIN,
                SCORE_MAX,
                vec![
                    Band::below(3.0, RiskCategory::Low, MessageTemplates::BLEEDING_LOW),
                    Band::up_to(SCORE_MAX, RiskCategory::High, MessageTemplates::BLEEDING_HIGH),
                ],
            ),
            amputation: BandTable::from_parts(
                AMPUTATION_MIN,
                AMPUTATION_MAX,
                vec![
                    Band::below(25.0, RiskCategory::Low, MessageTemplates::AMPUTATION_LOW),
                    Band::below(
                        50.0,
                        RiskCategory::Intermediate,
                        MessageTemplates::AMPUTATION_INTERMEDIATE,
                    ),
                    Band::up_to(
                        AMPUTATION_MAX,
                        RiskCategory::High,
                        MessageTemplates::AMPUTATION_HIGH,
                    ),
                ],
            ),
        }
    }

    /// Load band overrides from `risk_bands.json` in `dir`, layered over the
    /// built-in tables.
    ///
    /// Each override must cover the same domain as the model it feeds. The
    /// stroke and bleeding tables drive the bridging decision, so they are
    /// only replaceable in their recommendation text: their cut points must
    /// stay where the decision rule puts them.
    pub fn load(dir: &Path) -> Result<Self, ScoringError> {
        let path = dir.join(BANDS_FILE);
        let json = std::fs::read_to_string(&path).map_err(|e| {
            ScoringError::ReferenceDataLoad(path.display().to_string(), e.to_string())
        })?;
        let overrides: BandOverrides = serde_json::from_str(&json)
            .map_err(|e| ScoringError::ReferenceDataParse(BANDS_FILE.into(), e.to_string()))?;

        let mut reference = Self::builtin();
        if let Some(table) = overrides.surgical {
            expect_domain(&table, &reference.surgical, "surgical")?;
            reference.surgical = table;
        }
        if let Some(table) = overrides.stroke {
            expect_same_cuts(&table, &reference.stroke, "stroke")?;
            reference.stroke = table;
        }
        if let Some(table) = overrides.bleeding {
            expect_same_cuts(&table, &reference.bleeding, "bleeding")?;
            reference.bleeding = table;
        }
        if let Some(table) = overrides.amputation {
            expect_domain(&table, &reference.amputation, "amputation")?;
            reference.amputation = table;
        }

        tracing::info!(path = %path.display(), "Loaded risk band overrides");
        Ok(reference)
    }

    /// Load overrides when the file exists; otherwise, or when it is
    /// rejected, use the built-in tables.
    pub fn load_or_builtin(dir: &Path) -> Self {
        if !dir.join(BANDS_FILE).exists() {
            return Self::builtin();
        }
        match Self::load(dir) {
            Ok(reference) => reference,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring risk band overrides, using built-in tables");
                Self::builtin()
            }
        }
    }
}

fn expect_domain(table: &BandTable, builtin: &BandTable, name: &str) -> Result<(), ScoringError> {
    if table.min() != builtin.min() || table.max() != builtin.max() {
        return Err(ScoringError::InvalidBandTable(format!(
            "{name} table must cover [{}, {}], got [{}, {}]",
            builtin.min(),
            builtin.max(),
            table.min(),
            table.max()
        )));
    }
    Ok(())
}

fn expect_same_cuts(
    table: &BandTable,
    builtin: &BandTable,
    name: &str,
) -> Result<(), ScoringError> {
    expect_domain(table, builtin, name)?;
    let same = table.bands().len() == builtin.bands().len()
        && table.bands().iter().zip(builtin.bands()).all(|(a, b)| {
            a.upper == b.upper && a.inclusive == b.inclusive && a.category == b.category
        });
    if !same {
        return Err(ScoringError::InvalidBandTable(format!(
            "{name} table cut points are fixed by the bridging rule"
        )));
    }
    Ok(())
}
