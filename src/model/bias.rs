//! # Winning-hit bias
//!
//! A bout fenced to a target stops as soon as one side reaches it. The winner
//! cannot make any more hits, so the fraction of hits measured in such a bout
//! is skewed in favour of the winner. The table below holds, for every true
//! expectation value (row, in steps of 0.01) and target (column, 1 to 15), the
//! apparent result one would observe on average. Substituting the apparent
//! value for the expectation makes the comparison with the measured result
//! fair again.

use lazy_static::lazy_static;

use crate::model::{
    constants::{BIAS_MAX_TARGET, BIAS_TABLE_ROWS},
    structures::contest::Contest
};

lazy_static! {
    static ref BIAS_TABLE: Vec<[f64; BIAS_MAX_TARGET as usize]> = (0..BIAS_TABLE_ROWS)
        .map(|row| {
            let mut columns = [0.0; BIAS_MAX_TARGET as usize];
            for (column, value) in columns.iter_mut().enumerate() {
                *value = race(row as f64 / 100.0, column as u32 + 1).apparent_result;
            }
            columns
        })
        .collect();
}

/// Outcome of a bout fenced to a target when every single hit goes to the
/// first participant with a fixed probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceOutcome {
    /// Expected fraction of hits made by the first participant
    pub apparent_result: f64,
    /// Probability that the first participant reaches the target first
    pub winning_chance: f64
}

/// Sums over all final scores `target:k` and `k:target` with `k < target`.
/// The number of hit orders ending in `target:k` is `C(target-1+k, k)`.
pub fn race(hit_probability: f64, target: u32) -> RaceOutcome {
    let p = hit_probability;
    let q = 1.0 - p;
    let n = target as i32;

    let mut apparent_result = 0.0;
    let mut winning_chance = 0.0;
    // C(n-1+k, k), updated incrementally
    let mut orders = 1.0;
    for k in 0..n {
        if k > 0 {
            orders *= (n - 1 + k) as f64 / k as f64;
        }
        let first_wins = orders * p.powi(n) * q.powi(k);
        let second_wins = orders * q.powi(n) * p.powi(k);
        let total = (n + k) as f64;

        apparent_result += first_wins * n as f64 / total + second_wins * k as f64 / total;
        winning_chance += first_wins;
    }

    RaceOutcome {
        apparent_result,
        winning_chance
    }
}

/// Looks up the apparent result for `expectation` in the column of `target`,
/// interpolating linearly between the two bracketing rows.
pub fn apparent_expectation(expectation: f64, target: u32) -> f64 {
    let column = (target.clamp(1, BIAS_MAX_TARGET) - 1) as usize;
    let position = (expectation * 100.0).clamp(0.0, (BIAS_TABLE_ROWS - 1) as f64);
    let lower = (position.floor() as usize).min(BIAS_TABLE_ROWS - 2);
    let fraction = position - lower as f64;

    let below = BIAS_TABLE[lower][column];
    let above = BIAS_TABLE[lower + 1][column];

    below + (above - below) * fraction
}

/// Returns the expectation value to compare the bout's result with. Only
/// bouts that were stopped by reaching a target of at most 15 are corrected.
pub fn corrected_expectation(expectation: f64, contest: &Contest) -> f64 {
    if contest.reached_target() && contest.fenced_to <= BIAS_MAX_TARGET && expectation < 1.0 {
        apparent_expectation(expectation, contest.fenced_to)
    } else {
        expectation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::generate_contest;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_table_is_symmetric_around_even() {
        for target in 1..=BIAS_MAX_TARGET {
            assert_abs_diff_eq!(apparent_expectation(0.5, target), 0.5, epsilon = 1e-12);
            assert_abs_diff_eq!(
                apparent_expectation(0.3, target) + apparent_expectation(0.7, target),
                1.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_table_bounds() {
        assert_abs_diff_eq!(apparent_expectation(0.0, 5), 0.0);
        assert_abs_diff_eq!(apparent_expectation(1.0, 5), 1.0);
    }

    #[test]
    fn test_stopping_favours_the_stronger() {
        // In a bout to 5, the stronger side is stopped early and cannot lose
        // hits anymore, so its share of hits looks better than it is.
        let apparent = apparent_expectation(0.6, 5);

        assert!(apparent > 0.6);
        assert!(apparent < 0.7);
    }

    #[test]
    fn test_target_of_one() {
        // A bout to 1 ends 1:0 or 0:1, so the apparent result is the hit probability
        assert_abs_diff_eq!(apparent_expectation(0.37, 1), 0.37, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolation_between_rows() {
        let below = apparent_expectation(0.62, 10);
        let above = apparent_expectation(0.63, 10);

        assert_abs_diff_eq!(apparent_expectation(0.6225, 10), below + (above - below) * 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_winning_chance() {
        let even = race(0.5, 15);
        let strong = race(0.6, 5);

        assert_abs_diff_eq!(even.winning_chance, 0.5, epsilon = 1e-12);
        assert!(strong.winning_chance > 0.6);
        assert_abs_diff_eq!(race(0.6, 1).winning_chance, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_correction_conditions() {
        let decided = generate_contest("2024/01/01", "A", "B", 5, 3, 5);
        let undecided = generate_contest("2024/01/01", "A", "B", 4, 3, 5);
        let relay = generate_contest("2024/01/01", "A", "B", 5, 3, 0);
        let long = generate_contest("2024/01/01", "A", "B", 20, 13, 20);

        assert_ne!(corrected_expectation(0.6, &decided), 0.6);
        assert_eq!(corrected_expectation(0.6, &undecided), 0.6);
        assert_eq!(corrected_expectation(0.6, &relay), 0.6);
        assert_eq!(corrected_expectation(0.6, &long), 0.6);
        assert_eq!(corrected_expectation(1.0, &decided), 1.0);
    }
}
