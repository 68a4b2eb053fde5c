//! Trend analysis
//!
//! Compares the average of the most recent points of a chronological score
//! series against the average of its earlier points and classifies each
//! dimension as improving, declining or stable.
//!
//! For short series the two windows overlap; this is an accepted approximation.

use crate::error::EngineError;
use crate::types::{TrendAnalysis, TrendPeriod, TrendPoint, TrendStatus};

/// Number of trailing points in the recent window
pub const RECENT_WINDOW: usize = 3;

/// Minimum number of leading points in the earlier window
pub const MIN_EARLIER_WINDOW: usize = 3;

/// Percentage change beyond which a dimension is no longer stable
pub const STATUS_THRESHOLD_PCT: f64 = 2.0;

/// Data points at which the confidence score saturates
const CONFIDENCE_FULL_POINTS: f64 = 30.0;

/// Analyze a chronological (oldest first) score series.
///
/// - recent window: last 3 points
/// - earlier window: first `max(3, n / 2)` points
/// - change: `(recent_avg - earlier_avg) / earlier_avg * 100`, 0 when the
///   earlier average is 0 or the ratio is not finite
///
/// Returns [`EngineError::EmptyTrendSeries`] for an empty series and
/// [`EngineError::InvalidInput`] when a score is not finite.
pub fn analyze_trend_data(
    points: &[TrendPoint],
    period: TrendPeriod,
) -> Result<TrendAnalysis, EngineError> {
    if points.is_empty() {
        return Err(EngineError::EmptyTrendSeries);
    }

    if let Some(bad) = points
        .iter()
        .find(|p| !p.mental.is_finite() || !p.physical.is_finite())
    {
        return Err(EngineError::InvalidInput(format!(
            "non-finite score at point '{}'",
            bad.label
        )));
    }

    let recent = &points[points.len().saturating_sub(RECENT_WINDOW)..];
    let earlier_len = MIN_EARLIER_WINDOW.max(points.len() / 2).min(points.len());
    let earlier = &points[..earlier_len];

    let recent_mental = average(recent, |p| p.mental);
    let recent_physical = average(recent, |p| p.physical);
    let earlier_mental = average(earlier, |p| p.mental);
    let earlier_physical = average(earlier, |p| p.physical);

    let mental_trend = percent_change(earlier_mental, recent_mental);
    let physical_trend = percent_change(earlier_physical, recent_physical);

    Ok(TrendAnalysis {
        mental_trend,
        physical_trend,
        current_mental: rounded_score(recent_mental),
        current_physical: rounded_score(recent_physical),
        period,
        mental_status: classify(mental_trend),
        physical_status: classify(physical_trend),
    })
}

/// Classify a percentage change with symmetric thresholds
pub fn classify(change_pct: f64) -> TrendStatus {
    if change_pct > STATUS_THRESHOLD_PCT {
        TrendStatus::Improving
    } else if change_pct < -STATUS_THRESHOLD_PCT {
        TrendStatus::Declining
    } else {
        TrendStatus::Stable
    }
}

/// One-line summary, e.g. `Mental: ↑ 17.6% | Physical: ↓ 2.0%`
pub fn format_trend_display(trend: &TrendAnalysis) -> String {
    format!(
        "Mental: {} {:.1}% | Physical: {} {:.1}%",
        arrow(trend.mental_trend),
        trend.mental_trend.abs(),
        arrow(trend.physical_trend),
        trend.physical_trend.abs()
    )
}

/// Confidence (0-100) in insights drawn from a series.
///
/// Averages data sufficiency (saturating at 30 points) with stability
/// (`100 - volatility * 10`, floored at 20).
pub fn calculate_confidence_score(data_points: usize, trend_stability: f64) -> u8 {
    let data_confidence = (data_points as f64 / CONFIDENCE_FULL_POINTS * 100.0).min(100.0);
    let stability_confidence = (100.0 - trend_stability * 10.0).max(20.0);

    ((data_confidence + stability_confidence) / 2.0)
        .clamp(0.0, 100.0)
        .round() as u8
}

fn average(points: &[TrendPoint], value: impl Fn(&TrendPoint) -> f64) -> f64 {
    points.iter().map(value).sum::<f64>() / points.len() as f64
}

fn percent_change(earlier: f64, recent: f64) -> f64 {
    if earlier == 0.0 {
        return 0.0;
    }
    let change = (recent - earlier) / earlier * 100.0;
    // subnormal averages overflow the division
    if change.is_finite() {
        change
    } else {
        0.0
    }
}

fn rounded_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

fn arrow(change: f64) -> &'static str {
    if change > 0.0 {
        "↑"
    } else if change < 0.0 {
        "↓"
    } else {
        "→"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn series(values: &[(f64, f64)]) -> Vec<TrendPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &(mental, physical))| TrendPoint::new(format!("Day {}", i + 1), mental, physical))
            .collect()
    }

    #[test]
    fn test_improving_mental_trend() {
        let points = series(&[
            (70.0, 60.0),
            (70.0, 60.0),
            (70.0, 60.0),
            (80.0, 65.0),
            (82.0, 68.0),
            (85.0, 70.0),
        ]);

        let analysis = analyze_trend_data(&points, TrendPeriod::Weekly).unwrap();

        // recent mental avg 82.33 vs earlier 70
        assert!((analysis.mental_trend - 17.619).abs() < 0.01);
        assert_eq!(analysis.current_mental, 82);
        assert_eq!(analysis.current_physical, 68);
        assert_eq!(analysis.mental_status, TrendStatus::Improving);
        assert_eq!(analysis.physical_status, TrendStatus::Improving);
        assert_eq!(analysis.period, TrendPeriod::Weekly);
    }

    #[test]
    fn test_declining_and_stable() {
        let points = series(&[
            (80.0, 60.0),
            (80.0, 60.0),
            (80.0, 60.0),
            (80.0, 60.0),
            (70.0, 61.0),
            (70.0, 61.0),
            (70.0, 61.0),
        ]);

        let analysis = analyze_trend_data(&points, TrendPeriod::Monthly).unwrap();
        assert_eq!(analysis.mental_status, TrendStatus::Declining);
        // +1.67% stays inside the stable band
        assert_eq!(analysis.physical_status, TrendStatus::Stable);
    }

    #[test]
    fn test_earlier_window_grows_with_length() {
        // 10 points: earlier window = first 5, recent = last 3
        let mut values = vec![(50.0, 50.0); 5];
        values.extend(vec![(60.0, 60.0); 2]);
        values.extend(vec![(75.0, 75.0); 3]);
        let analysis = analyze_trend_data(&series(&values), TrendPeriod::Yearly).unwrap();
        assert!((analysis.mental_trend - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_series_windows_overlap() {
        let points = series(&[(60.0, 50.0), (66.0, 55.0)]);
        let analysis = analyze_trend_data(&points, TrendPeriod::Weekly).unwrap();
        assert_eq!(analysis.mental_trend, 0.0);
        assert_eq!(analysis.mental_status, TrendStatus::Stable);
        assert_eq!(analysis.current_mental, 63);
    }

    #[test]
    fn test_single_point() {
        let points = series(&[(72.0, 64.0)]);
        let analysis = analyze_trend_data(&points, TrendPeriod::Weekly).unwrap();
        assert_eq!(analysis.current_mental, 72);
        assert_eq!(analysis.physical_status, TrendStatus::Stable);
    }

    #[test]
    fn test_empty_series_rejected() {
        let result = analyze_trend_data(&[], TrendPeriod::Weekly);
        assert!(matches!(result, Err(EngineError::EmptyTrendSeries)));
    }

    #[test]
    fn test_zero_earlier_average_is_no_change() {
        let points = series(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (0.0, 0.0),
            (40.0, 30.0),
            (50.0, 30.0),
            (60.0, 30.0),
        ]);
        let analysis = analyze_trend_data(&points, TrendPeriod::Weekly).unwrap();
        assert_eq!(analysis.mental_trend, 0.0);
        assert_eq!(analysis.physical_trend, 0.0);
        assert_eq!(analysis.mental_status, TrendStatus::Stable);
        assert_eq!(analysis.current_mental, 50);
    }

    #[test]
    fn test_non_finite_rejected() {
        let points = series(&[(70.0, f64::NAN), (70.0, 60.0), (71.0, 61.0)]);
        let result = analyze_trend_data(&points, TrendPeriod::Weekly);
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_classify_thresholds_are_strict() {
        assert_eq!(classify(2.0), TrendStatus::Stable);
        assert_eq!(classify(-2.0), TrendStatus::Stable);
        assert_eq!(classify(2.01), TrendStatus::Improving);
        assert_eq!(classify(-2.01), TrendStatus::Declining);
    }

    #[test]
    fn test_format_trend_display() {
        let analysis = TrendAnalysis {
            mental_trend: 17.619,
            physical_trend: -2.0,
            current_mental: 82,
            current_physical: 68,
            period: TrendPeriod::Weekly,
            mental_status: TrendStatus::Improving,
            physical_status: TrendStatus::Stable,
        };
        assert_eq!(
            format_trend_display(&analysis),
            "Mental: ↑ 17.6% | Physical: ↓ 2.0%"
        );

        let flat = TrendAnalysis {
            mental_trend: 0.0,
            physical_trend: 0.0,
            ..analysis
        };
        assert_eq!(format_trend_display(&flat), "Mental: → 0.0% | Physical: → 0.0%");
    }

    #[test]
    fn test_subnormal_earlier_average_stays_finite() {
        let points = series(&[
            (1e-310, 50.0),
            (0.0, 50.0),
            (0.0, 50.0),
            (50.0, 50.0),
            (50.0, 50.0),
            (50.0, 50.0),
        ]);

        let analysis = analyze_trend_data(&points, TrendPeriod::Weekly).unwrap();
        assert!(analysis.mental_trend.is_finite());
        assert_eq!(analysis.mental_trend, 0.0);
        assert_eq!(analysis.mental_status, TrendStatus::Stable);

        let json = serde_json::to_string(&analysis).unwrap();
        let back: TrendAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, analysis);
    }

    #[test]
    fn test_confidence_score() {
        assert_eq!(calculate_confidence_score(30, 0.0), 100);
        assert_eq!(calculate_confidence_score(15, 5.0), 50);
        assert_eq!(calculate_confidence_score(0, 20.0), 10);
    }
}
