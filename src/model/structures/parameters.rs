use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

use crate::model::constants::*;

/// The parameter keys the rating model knows about. Any other key in a Felo
/// file is kept and written back but otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum ParameterKey {
    #[strum(serialize = "k-factor top")]
    KFactorTop,
    #[strum(serialize = "rating top")]
    RatingTop,
    #[strum(serialize = "k-factor rest")]
    KFactorRest,
    #[strum(serialize = "k-factor newcomer")]
    KFactorNewcomer,
    #[strum(serialize = "weighting newcomer")]
    WeightingNewcomer,
    #[strum(serialize = "minimum rating")]
    MinimumRating,
    #[strum(serialize = "minimum weighting freshman")]
    MinimumWeightingFreshman,
    #[strum(serialize = "convergence threshold")]
    ConvergenceThreshold,
    #[strum(serialize = "group name")]
    GroupName,
    #[strum(serialize = "output directory")]
    OutputDirectory,
    #[strum(serialize = "plot tics distance")]
    PlotTicsDistance,
    #[strum(serialize = "plot earliest date")]
    PlotEarliestDate,
    #[strum(serialize = "plot maximal days")]
    PlotMaximalDays
}

impl ParameterKey {
    pub fn default_value(&self) -> ParameterValue {
        match self {
            ParameterKey::KFactorTop => ParameterValue::Integer(DEFAULT_K_FACTOR_TOP),
            ParameterKey::RatingTop => ParameterValue::Integer(DEFAULT_RATING_TOP),
            ParameterKey::KFactorRest => ParameterValue::Integer(DEFAULT_K_FACTOR_REST),
            ParameterKey::KFactorNewcomer => ParameterValue::Integer(DEFAULT_K_FACTOR_NEWCOMER),
            ParameterKey::WeightingNewcomer => ParameterValue::Float(DEFAULT_WEIGHTING_NEWCOMER),
            ParameterKey::MinimumRating => ParameterValue::Integer(DEFAULT_MINIMUM_RATING),
            ParameterKey::MinimumWeightingFreshman => ParameterValue::Float(DEFAULT_MINIMUM_WEIGHTING_FRESHMAN),
            ParameterKey::ConvergenceThreshold => ParameterValue::Float(DEFAULT_CONVERGENCE_THRESHOLD),
            ParameterKey::GroupName => ParameterValue::Text(DEFAULT_GROUP_NAME.to_string()),
            ParameterKey::OutputDirectory => ParameterValue::Text(DEFAULT_OUTPUT_DIRECTORY.to_string()),
            ParameterKey::PlotTicsDistance => ParameterValue::Integer(DEFAULT_PLOT_TICS_DISTANCE),
            ParameterKey::PlotEarliestDate => ParameterValue::Text(DEFAULT_PLOT_EARLIEST_DATE.to_string()),
            ParameterKey::PlotMaximalDays => ParameterValue::Integer(DEFAULT_PLOT_MAXIMAL_DAYS)
        }
    }
}

/// A loosely typed parameter value. Text from a Felo file is coerced to the
/// first type that accepts it, in the order integer, float, text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Float(f64),
    Text(String)
}

impl ParameterValue {
    pub fn coerce(raw: &str) -> ParameterValue {
        if let Ok(value) = raw.parse::<i64>() {
            return ParameterValue::Integer(value);
        }
        if let Ok(value) = raw.parse::<f64>() {
            return ParameterValue::Float(value);
        }

        ParameterValue::Text(raw.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Integer(value) => Some(*value as f64),
            ParameterValue::Float(value) => Some(*value),
            ParameterValue::Text(_) => None
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(value) => write!(f, "{}", value),
            // Debug keeps the decimal point, so the value is read back as a float
            ParameterValue::Float(value) => write!(f, "{:?}", value),
            ParameterValue::Text(value) => write!(f, "{}", value)
        }
    }
}

/// Parameters of a Felo file.
///
/// Explicitly given values and defaults are stored apart so that only the
/// given ones are written back to the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    given: IndexMap<String, ParameterValue>,
    defaults: IndexMap<String, ParameterValue>
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new(IndexMap::new())
    }
}

impl Parameters {
    pub fn new(given: IndexMap<String, ParameterValue>) -> Parameters {
        let defaults = ParameterKey::iter()
            .map(|key| (key.as_ref().to_string(), key.default_value()))
            .collect();

        Parameters { given, defaults }
    }

    /// Replaces the default of `key`. Explicitly given values still win.
    pub fn set_default(&mut self, key: ParameterKey, value: ParameterValue) {
        self.defaults.insert(key.as_ref().to_string(), value);
    }

    /// Sets a value explicitly, so that it is persisted on serialization.
    pub fn set(&mut self, key: impl Into<String>, value: ParameterValue) {
        self.given.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.given.get(key).or_else(|| self.defaults.get(key))
    }

    pub fn value(&self, key: ParameterKey) -> &ParameterValue {
        match self.get(key.as_ref()) {
            Some(value) => value,
            None => unreachable!("every parameter key has a default")
        }
    }

    pub fn is_given(&self, key: &str) -> bool {
        self.given.contains_key(key)
    }

    pub fn given(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.given.iter()
    }

    pub fn given_keys(&self) -> Vec<String> {
        self.given.keys().cloned().collect()
    }

    /// All parameters, given ones first, then the remaining defaults.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.given
            .iter()
            .chain(self.defaults.iter().filter(|(key, _)| !self.given.contains_key(*key)))
    }
}
