use serde::{Deserialize, Serialize};

use crate::models::RiskCategory;

use super::types::ScoringError;

/// One band of a categorization table: scores up to `upper` (inclusive or
/// exclusive) fall into `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub upper: f64,
    pub inclusive: bool,
    pub category: RiskCategory,
    pub recommendation: String,
}

impl Band {
    pub fn below(upper: f64, category: RiskCategory, recommendation: &str) -> Self {
        Self {
            upper,
            inclusive: false,
            category,
            recommendation: recommendation.into(),
        }
    }

    pub fn up_to(upper: f64, category: RiskCategory, recommendation: &str) -> Self {
        Self {
            upper,
            inclusive: true,
            category,
            recommendation: recommendation.into(),
        }
    }

    fn contains(&self, score: f64) -> bool {
        if self.inclusive {
            score <= self.upper
        } else {
            score < self.upper
        }
    }
}

/// Ordered, contiguous bands covering a declared domain `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBandTable")]
pub struct BandTable {
    min: f64,
    max: f64,
    bands: Vec<Band>,
}

#[derive(Deserialize)]
struct RawBandTable {
    min: f64,
    max: f64,
    bands: Vec<Band>,
}

impl TryFrom<RawBandTable> for BandTable {
    type Error = ScoringError;

    fn try_from(raw: RawBandTable) -> Result<Self, Self::Error> {
        BandTable::new(raw.min, raw.max, raw.bands)
    }
}

impl BandTable {
    /// Build a table, checking it is exhaustive over `[min, max]`.
    ///
    /// Bands must be non-empty, have strictly ascending upper bounds inside the
    /// domain, never step down in category, and the last band must end at
    /// `max` inclusively.
    pub fn new(min: f64, max: f64, bands: Vec<Band>) -> Result<Self, ScoringError> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(ScoringError::InvalidBandTable(format!(
                "domain [{min}, {max}] is not a finite interval"
            )));
        }
        let Some(last) = bands.last() else {
            return Err(ScoringError::InvalidBandTable("no bands".into()));
        };
        if last.upper != max || !last.inclusive {
            return Err(ScoringError::InvalidBandTable(format!(
                "last band must end at {max} inclusively"
            )));
        }

        let mut previous: Option<&Band> = None;
        for band in &bands {
            if !band.upper.is_finite() || band.upper < min || band.upper > max {
                return Err(ScoringError::InvalidBandTable(format!(
                    "band upper bound {} lies outside [{min}, {max}]",
                    band.upper
                )));
            }
            if let Some(prev) = previous {
                if band.upper <= prev.upper {
                    return Err(ScoringError::InvalidBandTable(format!(
                        "upper bounds must ascend ({} after {})",
                        band.upper, prev.upper
                    )));
                }
                if band.category < prev.category {
                    return Err(ScoringError::InvalidBandTable(format!(
                        "category {} follows {}",
                        band.category.label(),
                        prev.category.label()
                    )));
                }
            }
            previous = Some(band);
        }

        Ok(Self { min, max, bands })
    }

    /// Build a table whose contiguity the caller already guarantees.
    pub(crate) fn from_parts(min: f64, max: f64, bands: Vec<Band>) -> Self {
        Self { min, max, bands }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }
}

/// Map a score onto its band: `(category, recommendation)`.
///
/// Exactly one band matches any score in the table's domain. Scores below the
/// domain resolve to the first band, above it to the last.
pub fn categorize(score: f64, table: &BandTable) -> (RiskCategory, &str) {
    let band = table
        .bands
        .iter()
        .find(|b| b.contains(score))
        .or_else(|| table.bands.last());
    match band {
        Some(band) => (band.category, band.recommendation.as_str()),
        // Tables are never empty; fail towards the most severe category.
        None => (RiskCategory::Prohibitive, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_band_table() -> BandTable {
        BandTable::new(
            0.5,
            25.0,
            vec![
                Band::below(4.0, RiskCategory::Low, "low"),
                Band::up_to(8.0, RiskCategory::Intermediate, "intermediate"),
                Band::up_to(25.0, RiskCategory::High, "high"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn boundaries_follow_declared_inclusivity() {
        let table = three_band_table();
        assert_eq!(categorize(3.99, &table).0, RiskCategory::Low);
        assert_eq!(categorize(4.0, &table).0, RiskCategory::Intermediate);
        assert_eq!(categorize(8.0, &table).0, RiskCategory::Intermediate);
        assert_eq!(categorize(8.01, &table).0, RiskCategory::High);
        assert_eq!(categorize(25.0, &table).0, RiskCategory::High);
    }

    #[test]
    fn recommendation_comes_from_matching_band() {
        let table = three_band_table();
        assert_eq!(categorize(5.0, &table).1, "intermediate");
    }

    #[test]
    fn out_of_domain_scores_resolve_to_edge_bands() {
        let table = three_band_table();
        assert_eq!(categorize(0.0, &table).0, RiskCategory::Low);
        assert_eq!(categorize(99.0, &table).0, RiskCategory::High);
    }

    #[test]
    fn rejects_empty_table() {
        assert!(matches!(
            BandTable::new(0.0, 1.0, vec![]),
            Err(ScoringError::InvalidBandTable(_))
        ));
    }

    #[test]
    fn rejects_table_not_reaching_max() {
        let result = BandTable::new(
            0.0,
            10.0,
            vec![Band::up_to(9.0, RiskCategory::Low, "low")],
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_exclusive_last_band() {
        let result = BandTable::new(
            0.0,
            10.0,
            vec![Band::below(10.0, RiskCategory::Low, "low")],
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_ascending_bounds() {
        let result = BandTable::new(
            0.0,
            10.0,
            vec![
                Band::below(5.0, RiskCategory::Low, "low"),
                Band::below(5.0, RiskCategory::Intermediate, "mid"),
                Band::up_to(10.0, RiskCategory::High, "high"),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_descending_categories() {
        let result = BandTable::new(
            0.0,
            10.0,
            vec![
                Band::below(5.0, RiskCategory::High, "high"),
                Band::up_to(10.0, RiskCategory::Low, "low"),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn deserialization_runs_construction_checks() {
        let good = r#"{"min": 0, "max": 9, "bands": [
            {"upper": 3, "inclusive": false, "category": "low", "recommendation": "ok"},
            {"upper": 9, "inclusive": true, "category": "high", "recommendation": "watch"}
        ]}"#;
        let table: BandTable = serde_json::from_str(good).unwrap();
        assert_eq!(categorize(3.0, &table).0, RiskCategory::High);

        let bad = r#"{"min": 0, "max": 9, "bands": [
            {"upper": 3, "inclusive": false, "category": "low", "recommendation": "ok"}
        ]}"#;
        assert!(serde_json::from_str::<BandTable>(bad).is_err());
    }
}
