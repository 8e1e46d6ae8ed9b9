use crate::model::{
    constants::{FRESHMAN_SHRINKAGE, FRESHMAN_SPREAD},
    structures::{participant::FreshmanEvidence, settings::Settings}
};

/// Adds the outcome of one bout against a rated opponent.
///
/// `result_deviation` is the freshman's result minus 0.5, seen from the
/// freshman's side.
pub fn accumulate(evidence: &mut FreshmanEvidence, result_deviation: f64, weighting: f64, opponent_rating: f64) {
    evidence.total_weighting += weighting;
    evidence.total_result += result_deviation * weighting;
    evidence.total_felo_rating_opponents += opponent_rating * weighting;
}

/// # Initial rating of a freshman
///
/// The estimate is the average opponent rating, shifted by the average result
/// deviation. The shift is shrunk while there is little evidence:
///
/// - `A` = total result / total weighting
/// - `B` = total weighting / (total weighting + 2)
/// - estimate = average opponent rating + A * B * 700
///
/// Below the configured minimum weighting there is no estimate, and 0 is
/// returned.
pub fn estimate(evidence: &FreshmanEvidence, settings: &Settings) -> f64 {
    if evidence.total_weighting < settings.minimum_weighting_freshman {
        return 0.0;
    }

    let a = evidence.total_result / evidence.total_weighting;
    let b = evidence.total_weighting / (evidence.total_weighting + FRESHMAN_SHRINKAGE);
    let average_felo_rating_opponents = evidence.total_felo_rating_opponents / evidence.total_weighting;

    average_felo_rating_opponents + a * b * FRESHMAN_SPREAD
}
