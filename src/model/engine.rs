use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    error::{FeloError, Result},
    model::{
        bias,
        constants::NEUTRAL_RESULT,
        expectation_value,
        history::{HistoryRecorder, RatingHistory},
        structures::{
            contest::Contest,
            participant::{Participant, Roster},
            settings::Settings
        }
    }
};

/// Runs the rating rule over a bout history, one pass.
///
/// The engine owns the participants of the pass, built fresh from a roster,
/// and the set of participants whose preliminary values still have to be
/// committed.
pub struct RatingEngine<'a> {
    settings: &'a Settings,
    participants: Vec<Participant>,
    positions: HashMap<String, usize>,
    pending: BTreeSet<usize>,
    history: Option<HistoryRecorder>
}

impl<'a> RatingEngine<'a> {
    pub fn new(settings: &'a Settings, roster: &Roster) -> RatingEngine<'a> {
        Self::with_initial_ratings(settings, roster, &HashMap::new())
    }

    /// Like [`RatingEngine::new`], but rated participants found in
    /// `initial_ratings` start from that rating instead of the roster's.
    pub fn with_initial_ratings(
        settings: &'a Settings,
        roster: &Roster,
        initial_ratings: &HashMap<String, f64>
    ) -> RatingEngine<'a> {
        let participants: Vec<Participant> = roster
            .iter()
            .map(|entry| {
                let initial_rating = initial_ratings
                    .get(&entry.name)
                    .copied()
                    .unwrap_or(entry.initial_rating);
                Participant::with_initial_rating(entry, initial_rating, settings)
            })
            .collect();
        let positions = participants
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();

        RatingEngine {
            settings,
            participants,
            positions,
            pending: BTreeSet::new(),
            history: None
        }
    }

    /// Records the rating history while processing. See [`HistoryRecorder`].
    pub fn record_history(mut self, reference_date: Option<NaiveDate>) -> Self {
        self.history = Some(HistoryRecorder::new(&self.participants, self.settings, reference_date));
        self
    }

    /// # Felo rating processing
    ///
    /// Bouts are processed in chronological order of their calendar day. The
    /// sub-day index is ignored, bouts of the same day keep their order.
    ///
    /// All bouts of one day are rated against the ratings committed at the end
    /// of the previous day, so their order within the day does not matter.
    /// The changes are collected as preliminary values and committed once the
    /// day is over.
    pub fn process(&mut self, contests: &[Contest]) -> Result<()> {
        let days = contests
            .iter()
            .sorted_by_key(|contest| contest.date.calendar_day())
            .chunk_by(|contest| contest.date.calendar_day());

        for (_, day) in &days {
            let day: Vec<&Contest> = day.collect();
            for contest in &day {
                self.set_preliminary_ratings(contest)?;
            }
            self.commit();

            if let Some(history) = self.history.as_mut() {
                history.record(day[0].date, &self.participants, self.settings);
            }
        }

        Ok(())
    }

    fn set_preliminary_ratings(&mut self, contest: &Contest) -> Result<()> {
        let first = self.position(&contest.first)?;
        let second = self.position(&contest.second)?;
        let weighting = contest.weighting();
        let result_first = contest.result_first();

        match (self.participants[first].is_freshman(), self.participants[second].is_freshman()) {
            (true, true) => {
                // Two freshmen, so the bout cannot be counted at all
                trace!(first = %contest.first, second = %contest.second, "Skipping bout between freshmen");
            }
            (true, false) => {
                let opponent_rating = self.participants[second].rating_exact(self.settings);
                self.participants[first].add_evidence(result_first - NEUTRAL_RESULT, weighting, opponent_rating);
            }
            (false, true) => {
                let opponent_rating = self.participants[first].rating_exact(self.settings);
                self.participants[second].add_evidence(NEUTRAL_RESULT - result_first, weighting, opponent_rating);
            }
            (false, false) => {
                // Committed (rather than preliminary) ratings are used for the
                // calculation. Only the results go to the preliminary values.
                let rating_first = self.participants[first].rating_exact(self.settings);
                let rating_second = self.participants[second].rating_exact(self.settings);
                let expectation_first =
                    bias::corrected_expectation(expectation_value(rating_first, rating_second), contest);
                let delta =
                    self.participants[first].k_factor(self.settings) * (result_first - expectation_first) * weighting;

                self.participants[first].rating_preliminary += delta;
                self.participants[first].total_weighting_preliminary += weighting;
                self.participants[second].rating_preliminary -= delta;
                self.participants[second].total_weighting_preliminary += weighting;

                self.pending.insert(first);
                self.pending.insert(second);
            }
        }

        Ok(())
    }

    /// Commits the preliminary values of every participant touched since the
    /// last commit.
    fn commit(&mut self) {
        for i in std::mem::take(&mut self.pending) {
            let participant = &mut self.participants[i];
            participant.commit(self.settings);
            debug!(
                name = %participant.name,
                rating = participant.rating,
                total_weighting = participant.total_weighting,
                "Committed rating"
            );
        }
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| FeloError::Format(format!("participant \"{}\" is unknown", name)))
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.positions.get(name).map(|i| &self.participants[*i])
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Current exact ratings of all participants, keyed by name.
    pub fn exact_ratings(&self) -> HashMap<String, f64> {
        self.participants
            .iter()
            .map(|p| (p.name.clone(), p.rating_exact(self.settings)))
            .collect()
    }

    pub fn into_parts(self) -> (Vec<Participant>, RatingHistory) {
        let history = self.history.map(HistoryRecorder::finish).unwrap_or_default();
        (self.participants, history)
    }
}
