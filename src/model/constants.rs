// Model constants
pub const LOGISTIC_SCALE: f64 = 400.0;
/// Sum of both scores of a targeted bout divided by this gives the number of
/// equivalent 5-hit bouts.
pub const POINTS_PER_WEIGHTING: f64 = 6.76;
pub const UNTARGETED_WEIGHTING: f64 = 1.0;
pub const NEUTRAL_RESULT: f64 = 0.5;
pub const FRESHMAN_SPREAD: f64 = 700.0;
pub const FRESHMAN_SHRINKAGE: f64 = 2.0;
pub const BIAS_MAX_TARGET: u32 = 15;
pub const BIAS_TABLE_ROWS: usize = 101;
// Default parameters
pub const DEFAULT_K_FACTOR_TOP: i64 = 25;
pub const DEFAULT_RATING_TOP: i64 = 2400;
pub const DEFAULT_K_FACTOR_REST: i64 = 32;
pub const DEFAULT_K_FACTOR_NEWCOMER: i64 = 40;
pub const DEFAULT_WEIGHTING_NEWCOMER: f64 = 15.0;
pub const DEFAULT_MINIMUM_RATING: i64 = 1200;
pub const DEFAULT_MINIMUM_WEIGHTING_FRESHMAN: f64 = 10.0;
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 0.001;
pub const DEFAULT_GROUP_NAME: &str = "Felo";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = ".";
pub const DEFAULT_PLOT_TICS_DISTANCE: i64 = 7;
pub const DEFAULT_PLOT_EARLIEST_DATE: &str = "1500/00/00";
pub const DEFAULT_PLOT_MAXIMAL_DAYS: i64 = 366;
pub const DEFAULT_MAX_CYCLES: usize = 1000;
