use std::cmp::Ordering;

use serde::Serialize;

use crate::model::structures::{participant::Participant, settings::Settings};

/// Visible, rated participants, best first.
pub fn leaderboard<'p>(participants: &'p [Participant], settings: &Settings) -> Vec<&'p Participant> {
    ranked(participants.iter().filter(|p| !p.hidden && !p.is_freshman()), settings)
}

/// All freshmen, best estimate first.
pub fn freshmen<'p>(participants: &'p [Participant], settings: &Settings) -> Vec<&'p Participant> {
    ranked(participants.iter().filter(|p| p.is_freshman()), settings)
}

/// Sorts by exact rating, descending. Equal ratings are ordered by name so
/// that the order is total.
fn ranked<'p>(participants: impl Iterator<Item = &'p Participant>, settings: &Settings) -> Vec<&'p Participant> {
    let mut ranked: Vec<(&Participant, f64)> = participants.map(|p| (p, p.rating_exact(settings))).collect();
    ranked.sort_by(|(p1, r1), (p2, r2)| compare(*r1, &p1.name, *r2, &p2.name));

    ranked.into_iter().map(|(p, _)| p).collect()
}

fn compare(rating_1: f64, name_1: &str, rating_2: f64, name_2: &str) -> Ordering {
    rating_2.total_cmp(&rating_1).then_with(|| name_1.cmp(name_2))
}

/// One row of a printed leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub rating: i64,
    pub rating_exact: f64,
    pub total_weighting: f64,
    pub freshman: bool
}

pub fn standings(ranked: &[&Participant], settings: &Settings) -> Vec<Standing> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, p)| Standing {
            rank: i + 1,
            name: p.name.clone(),
            rating: p.rating(settings),
            rating_exact: p.rating_exact(settings),
            total_weighting: p.total_weighting(),
            freshman: p.is_freshman()
        })
        .collect()
}
