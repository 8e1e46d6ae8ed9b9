use serde::Serialize;

use crate::{
    error::{FeloError, Result},
    model::{bias, constants::BIAS_MAX_TARGET, expectation_value}
};

/// Most probable outcome of a bout fenced to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prognosis {
    pub points_first: u32,
    pub points_second: u32,
    /// Winning chance of the first participant, in percent
    pub winning_chance: u32
}

/// Estimates the result of a bout between two ratings.
///
/// The favourite gets the target score, the other side the share of hits the
/// expectation value leaves for it. A drawn score line is broken in favour of
/// the participant with the better winning chance.
pub fn prognosticate(rating_first: f64, rating_second: f64, fenced_to: u32) -> Result<Prognosis> {
    if fenced_to == 0 || fenced_to > BIAS_MAX_TARGET {
        return Err(FeloError::Format(format!(
            "cannot prognosticate a bout fenced to {}, the target must be between 1 and {}",
            fenced_to, BIAS_MAX_TARGET
        )));
    }

    let expectation_first = expectation_value(rating_first, rating_second);
    let target = fenced_to as f64;
    let (mut points_first, mut points_second) = if expectation_first > 0.5 {
        (fenced_to, (target * (1.0 / expectation_first - 1.0)).round() as u32)
    } else {
        ((target / (1.0 / expectation_first - 1.0)).round() as u32, fenced_to)
    };

    let winning_chance = bias::race(expectation_first, fenced_to).winning_chance;
    if points_first == points_second {
        if winning_chance > 0.5 {
            points_second -= 1;
        } else {
            points_first -= 1;
        }
    }

    Ok(Prognosis {
        points_first,
        points_second,
        winning_chance: (winning_chance * 100.0).round() as u32
    })
}
