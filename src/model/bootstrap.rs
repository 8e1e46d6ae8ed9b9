use std::collections::HashMap;

use tracing::{debug, info};

use crate::{
    error::{FeloError, Result},
    model::{
        engine::RatingEngine,
        structures::{contest::Contest, participant::Roster, settings::Settings}
    }
};

/// Result of a converged bootstrapping run.
#[derive(Debug, Clone, PartialEq)]
pub struct Bootstrap {
    /// Number of passes needed
    pub cycles: usize,
    /// Initial ratings that reproduce themselves (within the convergence
    /// threshold) when the whole history is run from them
    pub initial_ratings: HashMap<String, f64>
}

/// # Bootstrapping
///
/// Searches starting ratings that are consistent with the whole bout
/// history: the history is run again and again, each time from the ratings
/// the previous pass ended with, until no rating moves by more than the
/// convergence threshold anymore.
///
/// Every pass starts from fresh participants built from the roster, so no
/// weighting or freshman evidence is carried from one pass to the next.
/// Exhausting `max_cycles` is an error: it means the data has no fixed point
/// that the iteration can find.
pub fn bootstrap(settings: &Settings, roster: &Roster, contests: &[Contest], max_cycles: usize) -> Result<Bootstrap> {
    let mut initial_ratings = RatingEngine::new(settings, roster).exact_ratings();

    for cycle in 1..=max_cycles {
        let mut engine = RatingEngine::with_initial_ratings(settings, roster, &initial_ratings);
        engine.process(contests)?;
        let ratings = engine.exact_ratings();

        let max_change = ratings
            .iter()
            .map(|(name, rating)| (rating - initial_ratings.get(name).copied().unwrap_or_default()).abs())
            .fold(0.0, f64::max);
        debug!(cycle, max_change, "Bootstrapping cycle finished");

        if max_change < settings.convergence_threshold {
            info!(cycles = cycle, "Bootstrapping converged");
            return Ok(Bootstrap {
                cycles: cycle,
                initial_ratings
            });
        }

        initial_ratings = ratings;
    }

    Err(FeloError::Convergence { cycles: max_cycles })
}
