use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::model::{freshman, structures::settings::Settings};

/// A participant as listed in the roster section of a Felo file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub name: String,
    /// Hidden participants are left out of leaderboards but rated as usual
    pub hidden: bool,
    /// 0 marks a freshman
    pub initial_rating: f64,
    /// Prior evidence, e.g. from bouts before the start of the file
    pub initial_weighting: f64
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, initial_rating: f64) -> RosterEntry {
        RosterEntry {
            name: name.into(),
            hidden: false,
            initial_rating,
            initial_weighting: 0.0
        }
    }

    pub fn is_freshman(&self) -> bool {
        self.initial_rating == 0.0
    }
}

/// Which participants [`Roster::adopt_ratings`] touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adoption {
    /// Every participant, e.g. after bootstrapping
    All,
    /// Freshmen only, e.g. after estimating them
    Freshmen
}

/// All participants of a Felo file, keyed by name in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    entries: IndexMap<String, RosterEntry>
}

impl Roster {
    pub fn new() -> Roster {
        Roster::default()
    }

    /// Adds an entry. Returns the entry back if the name is already taken.
    pub fn insert(&mut self, entry: RosterEntry) -> Result<(), RosterEntry> {
        if self.entries.contains_key(&entry.name) {
            return Err(entry);
        }

        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RosterEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.values()
    }

    /// Entries sorted by name, as they are written to a Felo file.
    pub fn sorted(&self) -> Vec<&RosterEntry> {
        self.entries.values().sorted_by(|a, b| a.name.cmp(&b.name)).collect()
    }

    /// Copies computed ratings back as new initial ratings, rounded to
    /// integers. This is how a freshman gets promoted: once its estimate is
    /// non-zero, it is no longer a freshman when the roster is read next time.
    pub fn adopt_ratings(&mut self, participants: &[Participant], settings: &Settings, adoption: Adoption) {
        for participant in participants {
            if adoption == Adoption::Freshmen && !participant.is_freshman() {
                continue;
            }

            if let Some(entry) = self.entries.get_mut(&participant.name) {
                entry.initial_rating = participant.rating(settings) as f64;
            }
        }
    }
}

/// Evidence collected for a freshman, from which its rating is estimated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FreshmanEvidence {
    pub total_weighting: f64,
    /// Weighted sum of the deviations of the results from 0.5
    pub total_result: f64,
    /// Weighted sum of the opponents' ratings
    pub total_felo_rating_opponents: f64
}

/// Rating state of a participant during one computation pass.
///
/// Committed values are what later days see. The preliminary values collect
/// the changes of the day being processed and become committed once the day
/// is over.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub name: String,
    pub hidden: bool,
    pub(crate) rating: f64,
    pub(crate) rating_preliminary: f64,
    pub(crate) total_weighting: f64,
    pub(crate) total_weighting_preliminary: f64,
    pub(crate) top_tier: bool,
    pub(crate) evidence: Option<FreshmanEvidence>
}

impl Participant {
    pub fn new(entry: &RosterEntry, settings: &Settings) -> Participant {
        Self::with_initial_rating(entry, entry.initial_rating, settings)
    }

    /// Builds the participant with another initial rating than the roster's,
    /// which is what bootstrapping does. Freshmen stay freshmen.
    pub fn with_initial_rating(entry: &RosterEntry, initial_rating: f64, settings: &Settings) -> Participant {
        let mut participant = Participant {
            name: entry.name.clone(),
            hidden: entry.hidden,
            rating: 0.0,
            rating_preliminary: 0.0,
            total_weighting: entry.initial_weighting,
            total_weighting_preliminary: entry.initial_weighting,
            top_tier: false,
            evidence: None
        };

        if entry.is_freshman() {
            participant.evidence = Some(FreshmanEvidence::default());
        } else {
            participant.set_rating(initial_rating, settings);
        }

        participant
    }

    pub fn is_freshman(&self) -> bool {
        self.evidence.is_some()
    }

    pub fn evidence(&self) -> Option<&FreshmanEvidence> {
        self.evidence.as_ref()
    }

    pub fn total_weighting(&self) -> f64 {
        self.total_weighting
    }

    /// Whether the top tier was ever reached. It is never revoked, even if
    /// the rating falls below the threshold again.
    pub fn is_top_tier(&self) -> bool {
        self.top_tier
    }

    /// The rating with its decimal fraction. For freshmen this is the
    /// estimate, or 0 while there is not enough evidence.
    pub fn rating_exact(&self, settings: &Settings) -> f64 {
        match &self.evidence {
            Some(evidence) => freshman::estimate(evidence, settings),
            None => self.rating
        }
    }

    pub fn rating(&self, settings: &Settings) -> i64 {
        self.rating_exact(settings).round() as i64
    }

    pub fn k_factor(&self, settings: &Settings) -> f64 {
        if self.total_weighting < settings.weighting_newcomer {
            settings.k_factor_newcomer
        } else if self.top_tier {
            settings.k_factor_top
        } else {
            settings.k_factor_rest
        }
    }

    pub(crate) fn add_evidence(&mut self, result_deviation: f64, weighting: f64, opponent_rating: f64) {
        if let Some(evidence) = self.evidence.as_mut() {
            freshman::accumulate(evidence, result_deviation, weighting, opponent_rating);
            self.total_weighting += weighting;
            self.total_weighting_preliminary = self.total_weighting;
        }
    }

    /// Takes over the preliminary values of the finished day.
    pub(crate) fn commit(&mut self, settings: &Settings) {
        self.set_rating(self.rating_preliminary, settings);
        self.total_weighting = self.total_weighting_preliminary;
    }

    fn set_rating(&mut self, rating: f64, settings: &Settings) {
        self.rating = rating.max(settings.minimum_rating);
        self.rating_preliminary = self.rating;
        if self.rating >= settings.rating_top {
            self.top_tier = true;
        }
    }
}
