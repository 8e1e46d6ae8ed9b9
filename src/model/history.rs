use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::model::structures::{contest::ContestDate, participant::Participant, settings::Settings};

/// Ratings of all plotted participants at the end of one bout day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: ContestDate,
    pub julian_day: i64,
    /// Whether the x axis gets a label at this point
    pub labelled: bool,
    pub ratings: Vec<f64>
}

/// The development of the ratings over time, as consumed by plotting tools.
/// One column per visible, rated participant, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatingHistory {
    pub columns: Vec<String>,
    pub points: Vec<HistoryPoint>
}

impl RatingHistory {
    /// Tab-separated data table: the Julian day, then one rating per column.
    pub fn to_data_table(&self) -> String {
        self.points
            .iter()
            .map(|point| {
                std::iter::once(point.julian_day.to_string())
                    .chain(point.ratings.iter().map(|rating| rating.to_string()))
                    .join("\t")
            })
            .map(|line| line + "\n")
            .collect()
    }

    /// Axis labels as `(julian day, "D.M.YYYY")`.
    pub fn labels(&self) -> Vec<(i64, String)> {
        self.points
            .iter()
            .filter(|point| point.labelled)
            .map(|point| {
                (
                    point.julian_day,
                    format!("{}.{}.{}", point.date.day, point.date.month, point.date.year)
                )
            })
            .collect()
    }
}

/// Collects [`HistoryPoint`]s while the engine commits bout days.
#[derive(Debug, Clone)]
pub(crate) struct HistoryRecorder {
    columns: Vec<usize>,
    earliest: (i32, u32, u32),
    maximal_days: i64,
    tics_distance: i64,
    reference_day: Option<i64>,
    last_label: Option<i64>,
    history: RatingHistory
}

impl HistoryRecorder {
    pub fn new(participants: &[Participant], settings: &Settings, reference_date: Option<NaiveDate>) -> Self {
        let columns: Vec<usize> = participants
            .iter()
            .positions(|p| !p.hidden && !p.is_freshman())
            .collect();

        HistoryRecorder {
            history: RatingHistory {
                columns: columns.iter().map(|i| participants[*i].name.clone()).collect(),
                points: Vec::new()
            },
            columns,
            earliest: settings.plot_earliest_date.calendar_day(),
            maximal_days: settings.plot_maximal_days,
            tics_distance: settings.plot_tics_distance,
            reference_day: reference_date.and_then(|date| ContestDate::from(date).julian_day()),
            last_label: None
        }
    }

    /// Records the state after `date` was committed, if the date lies in the
    /// plot window.
    pub fn record(&mut self, date: ContestDate, participants: &[Participant], settings: &Settings) {
        let Some(julian_day) = date.julian_day() else {
            return;
        };
        if date.calendar_day() < self.earliest {
            return;
        }
        if let Some(reference_day) = self.reference_day {
            if reference_day - julian_day > self.maximal_days {
                return;
            }
        }

        let labelled = self
            .last_label
            .map_or(true, |last| julian_day - last >= self.tics_distance);
        if labelled {
            self.last_label = Some(julian_day);
        }

        self.history.points.push(HistoryPoint {
            date,
            julian_day,
            labelled,
            ratings: self
                .columns
                .iter()
                .map(|i| participants[*i].rating_exact(settings))
                .collect()
        });
    }

    pub fn finish(self) -> RatingHistory {
        self.history
    }
}
