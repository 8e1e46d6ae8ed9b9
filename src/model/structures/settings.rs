use std::path::PathBuf;

use crate::{
    error::{FeloError, Result},
    model::structures::{
        contest::ContestDate,
        parameters::{ParameterKey, ParameterValue, Parameters}
    }
};

/// Typed view of the [`Parameters`] the rating model needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub k_factor_top: f64,
    pub rating_top: f64,
    pub k_factor_rest: f64,
    pub k_factor_newcomer: f64,
    /// Participants with less total weighting are rated with the newcomer k-factor
    pub weighting_newcomer: f64,
    pub minimum_rating: f64,
    /// Freshmen need at least this much weighting for a rating estimate
    pub minimum_weighting_freshman: f64,
    pub convergence_threshold: f64,
    pub group_name: String,
    pub output_directory: PathBuf,
    pub plot_tics_distance: i64,
    pub plot_earliest_date: ContestDate,
    pub plot_maximal_days: i64
}

impl Default for Settings {
    fn default() -> Self {
        // The built-in defaults are always valid
        match Settings::from_parameters(&Parameters::default()) {
            Ok(settings) => settings,
            Err(e) => unreachable!("default parameters are invalid: {}", e)
        }
    }
}

impl Settings {
    pub fn from_parameters(parameters: &Parameters) -> Result<Settings> {
        Ok(Settings {
            k_factor_top: number(parameters, ParameterKey::KFactorTop)?,
            rating_top: number(parameters, ParameterKey::RatingTop)?,
            k_factor_rest: number(parameters, ParameterKey::KFactorRest)?,
            k_factor_newcomer: number(parameters, ParameterKey::KFactorNewcomer)?,
            weighting_newcomer: number(parameters, ParameterKey::WeightingNewcomer)?,
            minimum_rating: number(parameters, ParameterKey::MinimumRating)?,
            minimum_weighting_freshman: number(parameters, ParameterKey::MinimumWeightingFreshman)?,
            convergence_threshold: number(parameters, ParameterKey::ConvergenceThreshold)?,
            group_name: parameters.value(ParameterKey::GroupName).to_string(),
            output_directory: PathBuf::from(parameters.value(ParameterKey::OutputDirectory).to_string()),
            plot_tics_distance: number(parameters, ParameterKey::PlotTicsDistance)? as i64,
            plot_earliest_date: parameters.value(ParameterKey::PlotEarliestDate).to_string().parse()?,
            plot_maximal_days: number(parameters, ParameterKey::PlotMaximalDays)? as i64
        })
    }
}

fn number(parameters: &Parameters, key: ParameterKey) -> Result<f64> {
    match parameters.value(key) {
        ParameterValue::Text(text) => Err(FeloError::Format(format!(
            "parameter \"{}\" must be a number, not \"{}\"",
            key.as_ref(),
            text
        ))),
        value => Ok(value.as_f64().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.k_factor_top, 25.0);
        assert_eq!(settings.rating_top, 2400.0);
        assert_eq!(settings.k_factor_rest, 32.0);
        assert_eq!(settings.k_factor_newcomer, 40.0);
        assert_eq!(settings.minimum_rating, 1200.0);
        assert_eq!(settings.convergence_threshold, 0.001);
        assert_eq!(settings.group_name, "Felo");
        assert_eq!(settings.plot_earliest_date, ContestDate::new(1500, 0, 0));
        assert_eq!(settings.plot_maximal_days, 366);
    }

    #[test]
    fn test_text_in_numeric_parameter_is_rejected() {
        let mut parameters = Parameters::default();
        parameters.set("k-factor rest", ParameterValue::Text("many".to_string()));

        let error = Settings::from_parameters(&parameters).unwrap_err();

        assert!(matches!(error, FeloError::Format(_)));
        assert!(error.to_string().contains("k-factor rest"));
    }

    #[test]
    fn test_integer_accepted_for_float_parameter() {
        let mut parameters = Parameters::default();
        parameters.set("weighting newcomer", ParameterValue::Integer(20));

        let settings = Settings::from_parameters(&parameters).unwrap();

        assert_eq!(settings.weighting_newcomer, 20.0);
    }
}
