use std::collections::BTreeMap;

use crate::models::{CoachDaySummary, DailyMoodFocus};

/// Pearson correlation between daily plan commitments and daily focus
/// minutes, joined on matching days.
///
/// Needs at least 2 paired days and non-zero variance on both sides;
/// anything sparser yields `None`, which is an expected condition rather
/// than an error. The result is clamped to [-1, 1] to absorb
/// floating-point overshoot.
pub fn correlate(coach_days: &[CoachDaySummary], focus_days: &[DailyMoodFocus]) -> Option<f64> {
    let focus_by_day: BTreeMap<_, _> = focus_days.iter().map(|d| (d.day, d)).collect();

    let pairs: Vec<(f64, f64)> = coach_days
        .iter()
        .filter_map(|coach| {
            focus_by_day
                .get(&coach.day)
                .map(|focus| (coach.plans_committed as f64, focus.total_duration as f64))
        })
        .collect();

    pearson(&pairs)
}

fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn coach_day(day: u32, plans: usize) -> CoachDaySummary {
        CoachDaySummary {
            day: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            journaling_entries: plans + 1,
            reframes: 0,
            plans_committed: plans,
            top_tags: Vec::new(),
        }
    }

    fn focus_day(day: u32, minutes: u32) -> DailyMoodFocus {
        DailyMoodFocus {
            day: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            session_count: 1,
            total_duration: minutes,
            avg_duration: minutes as f64,
        }
    }

    #[test]
    fn fewer_than_two_pairs_yields_none() {
        assert_eq!(correlate(&[], &[]), None);
        assert_eq!(correlate(&[coach_day(1, 2)], &[focus_day(1, 50)]), None);
        // Days that do not join do not count as pairs.
        assert_eq!(
            correlate(
                &[coach_day(1, 2), coach_day(2, 3)],
                &[focus_day(1, 50), focus_day(9, 80)]
            ),
            None
        );
    }

    #[test]
    fn zero_variance_yields_none() {
        let coach = [coach_day(1, 2), coach_day(2, 2), coach_day(3, 2)];
        let focus = [focus_day(1, 30), focus_day(2, 60), focus_day(3, 90)];
        assert_eq!(correlate(&coach, &focus), None);
    }

    #[test]
    fn proportional_series_correlate_to_one() {
        let coach = [coach_day(1, 1), coach_day(2, 2), coach_day(3, 3)];
        let focus = [focus_day(1, 25), focus_day(2, 50), focus_day(3, 75)];
        let r = correlate(&coach, &focus).unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn inverse_series_correlate_negatively_within_bounds() {
        let coach = [coach_day(1, 3), coach_day(2, 2), coach_day(3, 1)];
        let focus = [focus_day(1, 10), focus_day(2, 40), focus_day(3, 70)];
        let r = correlate(&coach, &focus).unwrap();
        assert!((-1.0..=1.0).contains(&r));
        assert!(r < 0.0);
    }
}
