use chrono::NaiveDate;
use tracing::info;

use crate::{
    error::{FeloError, Result},
    model::{
        bootstrap::bootstrap,
        engine::RatingEngine,
        history::RatingHistory,
        structures::{
            contest::Contest,
            parameters::Parameters,
            participant::{Participant, Roster},
            settings::Settings
        }
    }
};

pub mod bias;
pub mod bootstrap;
pub mod constants;
pub mod engine;
pub mod freshman;
pub mod history;
pub mod leaderboard;
pub mod prognosis;
pub mod structures;

/// Expected fraction of hits of the first participant in a bout with the
/// second, following the logistic curve of the Elo system.
pub fn expectation_value(rating_first: f64, rating_second: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_second - rating_first) / constants::LOGISTIC_SCALE))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateOptions {
    /// Search self-consistent initial ratings before the final pass
    pub bootstrap: bool,
    /// Return the freshmen with their estimates instead of the leaderboard
    pub estimate_freshmen: bool,
    pub max_cycles: usize,
    /// "Today" for the plot window of the rating history. Without it, the
    /// window is only bounded by the earliest plot date.
    pub reference_date: Option<NaiveDate>
}

impl Default for UpdateOptions {
    fn default() -> Self {
        UpdateOptions {
            bootstrap: false,
            estimate_freshmen: false,
            max_cycles: constants::DEFAULT_MAX_CYCLES,
            reference_date: None
        }
    }
}

/// Everything one computation produces.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub settings: Settings,
    /// All participants in roster order, after the final pass
    pub participants: Vec<Participant>,
    pub history: RatingHistory,
    /// Number of bootstrapping cycles, if bootstrapping was requested
    pub bootstrap_cycles: Option<usize>
}

impl Calculation {
    pub fn leaderboard(&self) -> Vec<&Participant> {
        leaderboard::leaderboard(&self.participants, &self.settings)
    }

    pub fn freshmen(&self) -> Vec<&Participant> {
        leaderboard::freshmen(&self.participants, &self.settings)
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn rating_exact(&self, name: &str) -> Option<f64> {
        self.participant(name).map(|p| p.rating_exact(&self.settings))
    }
}

/// Runs the whole bout history. With bootstrapping, the final pass starts
/// from the converged initial ratings.
///
/// Nothing is returned on error, so a failed computation never leaves half
/// updated ratings behind.
pub fn calculate(
    parameters: &Parameters,
    roster: &Roster,
    contests: &[Contest],
    options: UpdateOptions
) -> Result<Calculation> {
    if options.bootstrap && options.estimate_freshmen {
        return Err(FeloError::Configuration(
            "bootstrapping and estimating freshmen cannot be done at the same time".to_string()
        ));
    }

    let settings = Settings::from_parameters(parameters)?;

    let (initial_ratings, bootstrap_cycles) = if options.bootstrap {
        let result = bootstrap(&settings, roster, contests, options.max_cycles)?;
        (result.initial_ratings, Some(result.cycles))
    } else {
        (Default::default(), None)
    };

    let mut engine =
        RatingEngine::with_initial_ratings(&settings, roster, &initial_ratings).record_history(options.reference_date);
    engine.process(contests)?;
    let (participants, history) = engine.into_parts();

    info!(
        group = %settings.group_name,
        participants = participants.len(),
        contests = contests.len(),
        "Ratings calculated"
    );

    Ok(Calculation {
        settings,
        participants,
        history,
        bootstrap_cycles
    })
}

/// Runs the whole bout history and returns the visible, rated participants
/// by descending rating, or all freshmen when estimating them.
pub fn update(
    parameters: &Parameters,
    roster: &Roster,
    contests: &[Contest],
    options: UpdateOptions
) -> Result<Vec<Participant>> {
    let calculation = calculate(parameters, roster, contests, options)?;
    let ranked = if options.estimate_freshmen {
        calculation.freshmen()
    } else {
        calculation.leaderboard()
    };

    Ok(ranked.into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{generate_contest, generate_roster};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_expectation_value() {
        assert_abs_diff_eq!(expectation_value(1500.0, 1500.0), 0.5);
        assert_abs_diff_eq!(expectation_value(1900.0, 1500.0), 10.0 / 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            expectation_value(1620.0, 1480.0) + expectation_value(1480.0, 1620.0),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_update_returns_leaderboard() {
        let roster = generate_roster(&[("A", 1500.0), ("B", 1500.0), ("C", 0.0)]);
        let contests = vec![
            generate_contest("2024/01/01", "B", "A", 5, 3, 5),
            generate_contest("2024/01/01", "C", "A", 5, 0, 5),
        ];

        let ranked = update(&Parameters::default(), &roster, &contests, UpdateOptions::default()).unwrap();

        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_update_returns_freshmen() {
        let roster = generate_roster(&[("A", 1500.0), ("C", 0.0)]);
        let contests = vec![generate_contest("2024/01/01", "C", "A", 5, 0, 5)];
        let options = UpdateOptions {
            estimate_freshmen: true,
            ..UpdateOptions::default()
        };

        let ranked = update(&Parameters::default(), &roster, &contests, options).unwrap();

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "C");
    }

    #[test]
    fn test_update_with_huge_scores() {
        let file = crate::format::parse("===\nA\t1500\nB\t1500\n===\n2024/01/01\tA -- B\t4294967295:1\n").unwrap();

        let ranked = update(&file.parameters, &file.roster, &file.contests, UpdateOptions::default()).unwrap();

        assert_eq!(ranked[0].name, "A");
    }

    #[test]
    fn test_bootstrap_and_estimate_are_exclusive() {
        let roster = generate_roster(&[("A", 1500.0)]);
        let options = UpdateOptions {
            bootstrap: true,
            estimate_freshmen: true,
            ..UpdateOptions::default()
        };

        let error = calculate(&Parameters::default(), &roster, &[], options).unwrap_err();

        assert!(matches!(error, FeloError::Configuration(_)));
    }

    #[test]
    fn test_calculate_with_bootstrap() {
        let roster = generate_roster(&[("A", 1500.0), ("B", 1500.0)]);
        let contests = vec![generate_contest("2024/01/01", "A", "B", 5, 3, 5)];
        let options = UpdateOptions {
            bootstrap: true,
            ..UpdateOptions::default()
        };

        let calculation = calculate(&Parameters::default(), &roster, &contests, options).unwrap();

        assert!(calculation.bootstrap_cycles.is_some());
        let a = calculation.rating_exact("A").unwrap();
        let b = calculation.rating_exact("B").unwrap();
        assert!(a > b);
        assert_abs_diff_eq!(a + b, 3000.0, epsilon = 1e-6);
        assert_eq!(calculation.history.points.len(), 1);
    }
}
