use approx::assert_abs_diff_eq;
use felo::{
    calculate, parse,
    model::{
        bootstrap::bootstrap,
        engine::RatingEngine,
        prognosis::prognosticate,
        structures::{participant::Adoption, settings::Settings}
    },
    update, FeloError, UpdateOptions
};

mod common;

use common::{init_test_env, EPEE_FILE};

#[test]
fn test_leaderboard_from_file() {
    init_test_env();
    let file = parse(EPEE_FILE).unwrap();

    let ranked = update(&file.parameters, &file.roster, &file.contests, UpdateOptions::default()).unwrap();

    let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Anna"));
    assert!(names.contains(&"Bert"));
    let settings = Settings::from_parameters(&file.parameters).unwrap();
    assert!(ranked[0].rating_exact(&settings) >= ranked[1].rating_exact(&settings));
}

#[test]
fn test_rated_bouts_keep_the_rating_sum() {
    init_test_env();
    let file = parse(EPEE_FILE).unwrap();

    let calculation = calculate(&file.parameters, &file.roster, &file.contests, UpdateOptions::default()).unwrap();

    let sum: f64 = ["Anna", "Bert", "Carl"]
        .iter()
        .map(|name| calculation.rating_exact(name).unwrap())
        .sum();
    assert_abs_diff_eq!(sum, 4800.0, epsilon = 1e-9);
    assert!(calculation.participant("Carl").unwrap().hidden);
}

#[test]
fn test_freshman_estimate_from_file() {
    init_test_env();
    let file = parse(EPEE_FILE).unwrap();
    let options = UpdateOptions {
        estimate_freshmen: true,
        ..UpdateOptions::default()
    };

    let calculation = calculate(&file.parameters, &file.roster, &file.contests, options).unwrap();
    let freshmen = calculation.freshmen();

    assert_eq!(freshmen.len(), 1);
    assert_eq!(freshmen[0].name, "Dora");
    let estimate = freshmen[0].rating_exact(&calculation.settings);
    // Dora won both bouts, so the estimate lies above the opponents' average
    assert!(estimate > 1650.0, "estimate {}", estimate);
    assert!(estimate < 1800.0, "estimate {}", estimate);

    let mut roster = file.roster.clone();
    roster.adopt_ratings(&calculation.participants, &calculation.settings, Adoption::Freshmen);
    assert_eq!(roster.get("Dora").unwrap().initial_rating, estimate.round());
    assert_eq!(roster.get("Anna").unwrap().initial_rating, 1700.0);
}

#[test]
fn test_freshman_without_enough_evidence() {
    init_test_env();
    let text = EPEE_FILE.replace("minimum weighting freshman\t2.0", "minimum weighting freshman\t10");
    let file = parse(&text).unwrap();
    let options = UpdateOptions {
        estimate_freshmen: true,
        ..UpdateOptions::default()
    };

    let ranked = update(&file.parameters, &file.roster, &file.contests, options).unwrap();

    let settings = Settings::from_parameters(&file.parameters).unwrap();
    assert_eq!(ranked[0].rating_exact(&settings), 0.0);
}

#[test]
fn test_bootstrap_reaches_a_fixed_point() {
    init_test_env();
    let file = parse(EPEE_FILE).unwrap();
    let settings = Settings::from_parameters(&file.parameters).unwrap();

    let result = bootstrap(&settings, &file.roster, &file.contests, 1000).unwrap();

    let mut engine = RatingEngine::with_initial_ratings(&settings, &file.roster, &result.initial_ratings);
    engine.process(&file.contests).unwrap();
    for name in ["Anna", "Bert", "Carl"] {
        let start = result.initial_ratings[name];
        let end = engine.participant(name).unwrap().rating_exact(&settings);
        assert!((end - start).abs() < 2.0 * settings.convergence_threshold, "{}: {} -> {}", name, start, end);
    }

    let sum: f64 = ["Anna", "Bert", "Carl"].iter().map(|name| result.initial_ratings[*name]).sum();
    assert_abs_diff_eq!(sum, 4800.0, epsilon = 1e-6);
}

#[test]
fn test_bootstrap_and_estimate_together_fail() {
    init_test_env();
    let file = parse(EPEE_FILE).unwrap();
    let options = UpdateOptions {
        bootstrap: true,
        estimate_freshmen: true,
        ..UpdateOptions::default()
    };

    let error = update(&file.parameters, &file.roster, &file.contests, options).unwrap_err();

    assert!(matches!(error, FeloError::Configuration(_)));
}

#[test]
fn test_unknown_parameter_value_fails_the_calculation() {
    init_test_env();
    let text = EPEE_FILE.replace("minimum weighting freshman\t2.0", "minimum rating\tlow");
    let file = parse(&text).unwrap();

    let error = update(&file.parameters, &file.roster, &file.contests, UpdateOptions::default()).unwrap_err();

    assert!(matches!(error, FeloError::Format(_)));
}

#[test]
fn test_history_follows_the_bout_days() {
    init_test_env();
    let file = parse(EPEE_FILE).unwrap();

    let calculation = calculate(&file.parameters, &file.roster, &file.contests, UpdateOptions::default()).unwrap();
    let history = &calculation.history;

    assert_eq!(history.columns, vec!["Anna".to_string(), "Bert".to_string()]);
    assert_eq!(history.points.len(), 3);
    assert_eq!(history.labels().len(), 3);
    let last = history.points.last().unwrap();
    assert_eq!(last.ratings[0], calculation.rating_exact("Anna").unwrap());
    assert_eq!(history.to_data_table().lines().count(), 3);
}

#[test]
fn test_prognosis_between_rated_participants() {
    init_test_env();
    let file = parse(EPEE_FILE).unwrap();
    let calculation = calculate(&file.parameters, &file.roster, &file.contests, UpdateOptions::default()).unwrap();
    let anna = calculation.rating_exact("Anna").unwrap();
    let bert = calculation.rating_exact("Bert").unwrap();

    let forward = prognosticate(anna, bert, 15).unwrap();
    let backward = prognosticate(bert, anna, 15).unwrap();

    assert_eq!(forward.points_first, backward.points_second);
    assert_eq!(forward.points_second, backward.points_first);
    assert_ne!(forward.points_first, forward.points_second);
}
