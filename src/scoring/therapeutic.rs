use crate::models::{InrReading, TtrMethod};

use super::messages::MessageTemplates;
use super::types::{RiskScore, ScoringError, TherapeuticRangeSummary};
use super::validation::validate_inr_readings;

/// Below this percentage anticoagulation control is flagged as poor.
pub const POOR_CONTROL_THRESHOLD: f64 = 60.0;

/// Percentage of time a monitored value spent inside its target band.
///
/// Independent of the bridging decision; used only to flag poor control.
pub fn compute_time_in_therapeutic_range(
    readings: &[InrReading],
    method: TtrMethod,
) -> Result<TherapeuticRangeSummary, ScoringError> {
    validate_inr_readings(readings)?;

    let percent = match method {
        TtrMethod::ReadingFraction => reading_fraction(readings),
        TtrMethod::LinearInterpolation => {
            linear_interpolation(readings).unwrap_or_else(|| reading_fraction(readings))
        }
    };

    let time_in_range = RiskScore::clamped(percent, 0.0, 100.0);
    let poor_control = time_in_range.value() < POOR_CONTROL_THRESHOLD;

    Ok(TherapeuticRangeSummary {
        time_in_range,
        method,
        reading_count: readings.len(),
        poor_control,
        advisory: poor_control.then(|| MessageTemplates::poor_control(time_in_range.value())),
    })
}

/// Share of readings inside their band.
fn reading_fraction(readings: &[InrReading]) -> f64 {
    let in_range = readings.iter().filter(|r| r.in_range()).count();
    in_range as f64 / readings.len() as f64 * 100.0
}

/// Rosendaal method: interpolate daily values between consecutive readings
/// and count the days in range, using the band in force at the start of
/// each interval. `None` when the readings span no days.
fn linear_interpolation(readings: &[InrReading]) -> Option<f64> {
    let mut total_days: i64 = 0;
    let mut days_in_range: i64 = 0;

    for pair in readings.windows(2) {
        let (start, end) = (&pair[0], &pair[1]);
        let span = (end.date - start.date).num_days();
        if span == 0 {
            continue;
        }
        let step = (end.value - start.value) / span as f64;
        days_in_range += days_in_band(start.value, step, span, start.target_low, start.target_high);
        total_days += span;
    }

    (total_days > 0).then(|| days_in_range as f64 / total_days as f64 * 100.0)
}

/// Number of days `d` in `[0, span)` with `low <= start + step * d <= high`.
///
/// Solved per interval rather than walked day by day, so the cost does not
/// depend on how far apart the readings are.
fn days_in_band(start: f64, step: f64, span: i64, low: f64, high: f64) -> i64 {
    if step == 0.0 {
        return if (low..=high).contains(&start) { span } else { 0 };
    }

    let to_low = (low - start) / step;
    let to_high = (high - start) / step;
    let (first, last) = if step > 0.0 {
        (to_low, to_high)
    } else {
        (to_high, to_low)
    };

    let first = first.ceil().max(0.0);
    let last = last.floor().min((span - 1) as f64);
    if last < first {
        0
    } else {
        (last - first) as i64 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(day: u32, value: f64) -> InrReading {
        InrReading::new(
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            value,
            2.0,
            3.0,
        )
    }

    #[test]
    fn reading_fraction_counts_in_range_readings() {
        let readings = [
            reading(1, 2.5),
            reading(8, 1.6),
            reading(15, 2.0),
            reading(22, 3.4),
        ];
        let summary =
            compute_time_in_therapeutic_range(&readings, TtrMethod::ReadingFraction).unwrap();
        assert_eq!(summary.time_in_range.value(), 50.0);
        assert_eq!(summary.reading_count, 4);
        assert!(summary.poor_control);
        assert!(summary.advisory.is_some());
    }

    #[test]
    fn all_in_range_is_good_control() {
        let readings = [reading(1, 2.2), reading(8, 2.8), reading(15, 2.5)];
        let summary =
            compute_time_in_therapeutic_range(&readings, TtrMethod::ReadingFraction).unwrap();
        assert_eq!(summary.time_in_range.value(), 100.0);
        assert!(!summary.poor_control);
        assert!(summary.advisory.is_none());
    }

    #[test]
    fn sixty_percent_is_not_poor() {
        let readings = [
            reading(1, 2.5),
            reading(2, 2.5),
            reading(3, 2.5),
            reading(4, 1.0),
            reading(5, 4.0),
        ];
        let summary =
            compute_time_in_therapeutic_range(&readings, TtrMethod::ReadingFraction).unwrap();
        assert_eq!(summary.time_in_range.value(), 60.0);
        assert!(!summary.poor_control);
    }

    #[test]
    fn interpolation_counts_days_between_readings() {
        // 1.0 -> 3.0 over 10 days: daily values 1.0, 1.2, ... 2.8; days 5..=9 in range.
        let readings = [reading(1, 1.0), reading(11, 3.0)];
        let summary =
            compute_time_in_therapeutic_range(&readings, TtrMethod::LinearInterpolation).unwrap();
        assert_eq!(summary.time_in_range.value(), 50.0);
        assert_eq!(summary.method, TtrMethod::LinearInterpolation);
    }

    #[test]
    fn interpolation_falling_values_count_from_the_top() {
        // 4.0 -> 1.0 over 30 days: daily values 4.0, 3.9, ... 1.1; days 10..=20 in range.
        let readings = [reading(1, 4.0), reading(31, 1.0)];
        let summary =
            compute_time_in_therapeutic_range(&readings, TtrMethod::LinearInterpolation).unwrap();
        assert!((summary.time_in_range.value() - 11.0 / 30.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn interpolation_flat_interval_is_all_or_nothing() {
        let inside = [reading(1, 2.5), reading(20, 2.5)];
        let outside = [reading(1, 3.5), reading(20, 3.5)];
        let summary =
            compute_time_in_therapeutic_range(&inside, TtrMethod::LinearInterpolation).unwrap();
        assert_eq!(summary.time_in_range.value(), 100.0);
        let summary =
            compute_time_in_therapeutic_range(&outside, TtrMethod::LinearInterpolation).unwrap();
        assert_eq!(summary.time_in_range.value(), 0.0);
    }

    #[test]
    fn days_in_band_matches_daily_walk() {
        let walk = |start: f64, step: f64, span: i64| {
            (0..span)
                .filter(|d| (2.0..=3.0).contains(&(start + step * *d as f64)))
                .count() as i64
        };
        for (start, end, span) in [
            (1.0, 3.0, 10),
            (3.4, 1.6, 7),
            (2.2, 2.9, 3),
            (0.5, 5.0, 44),
            (4.0, 3.1, 12),
            (1.9, 1.9, 5),
        ] {
            let step = (end - start) / span as f64;
            assert_eq!(
                days_in_band(start, step, span, 2.0, 3.0),
                walk(start, step, span),
                "start {start} end {end} span {span}"
            );
        }
    }

    #[test]
    fn interpolation_over_full_date_range_is_immediate() {
        let readings = [
            InrReading::new(NaiveDate::MIN, 2.5, 2.0, 3.0),
            InrReading::new(NaiveDate::MAX, 2.5, 2.0, 3.0),
        ];
        let started = std::time::Instant::now();
        let summary =
            compute_time_in_therapeutic_range(&readings, TtrMethod::LinearInterpolation).unwrap();
        assert_eq!(summary.time_in_range.value(), 100.0);
        assert!(started.elapsed() < std::time::Duration::from_millis(50));
    }

    #[test]
    fn interpolation_over_a_century_ramp() {
        // 1.0 -> 4.0 across 100 years: a third of the ramp lies in [2, 3].
        let readings = [
            InrReading::new(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 1.0, 2.0, 3.0),
            InrReading::new(NaiveDate::from_ymd_opt(2100, 1, 1).unwrap(), 4.0, 2.0, 3.0),
        ];
        let summary =
            compute_time_in_therapeutic_range(&readings, TtrMethod::LinearInterpolation).unwrap();
        assert!((summary.time_in_range.value() - 100.0 / 3.0).abs() < 0.01);
        assert!(summary.poor_control);
    }

    #[test]
    fn interpolation_single_reading_falls_back() {
        let summary =
            compute_time_in_therapeutic_range(&[reading(1, 2.5)], TtrMethod::LinearInterpolation)
                .unwrap();
        assert_eq!(summary.time_in_range.value(), 100.0);
    }

    #[test]
    fn empty_series_is_missing_attribute() {
        let err = compute_time_in_therapeutic_range(&[], TtrMethod::ReadingFraction).unwrap_err();
        assert!(matches!(err, ScoringError::MissingAttribute { .. }));
    }
}
