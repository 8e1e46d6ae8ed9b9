use std::{fs, process::ExitCode};

use chrono::Local;
use clap::Parser;
use felo::{
    error::{FeloError, Result},
    io::{read_felo_file, write_back_roster, write_felo_file},
    model::{
        calculate,
        leaderboard::{standings, Standing},
        structures::participant::Adoption,
        UpdateOptions
    }
};
use serde::Serialize;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::args::Args;

mod args;

/// Result list of one Felo file.
#[derive(Debug, Serialize)]
struct Report {
    group: String,
    standings: Vec<Standing>
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if args.write_back && !args.bootstrap && !args.estimate_freshmen {
        return Err(FeloError::Configuration(
            "writing back needs --bootstrap or --estimate-freshmen".to_string()
        ));
    }

    let options = UpdateOptions {
        bootstrap: args.bootstrap,
        estimate_freshmen: args.estimate_freshmen,
        max_cycles: args.max_cycles,
        reference_date: Some(Local::now().date_naive())
    };

    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        debug!(path = %path.display(), "Rating Felo file");
        let mut file = read_felo_file(path)?;
        if args.reformat {
            write_felo_file(path, &file.parameters, &file.roster, &file.contests)?;
        }

        let calculation = calculate(&file.parameters, &file.roster, &file.contests, options)?;

        if args.write_back {
            let adoption = if args.bootstrap {
                Adoption::All
            } else {
                Adoption::Freshmen
            };
            file.roster.adopt_ratings(&calculation.participants, &calculation.settings, adoption);
            write_back_roster(path, &file.roster)?;
        }

        let ranked = if args.estimate_freshmen {
            calculation.freshmen()
        } else {
            calculation.leaderboard()
        };
        reports.push(Report {
            group: calculation.settings.group_name.clone(),
            standings: standings(&ranked, &calculation.settings)
        });
    }

    let text = if args.json {
        serde_json::to_string_pretty(&reports).map_err(|e| FeloError::Format(e.to_string()))? + "\n"
    } else {
        render(&reports)
    };

    match &args.output {
        Some(path) => fs::write(path, text)?,
        None => print!("{}", text)
    }

    Ok(())
}

/// Plain result lists. The group name heads each list when there are
/// several.
fn render(reports: &[Report]) -> String {
    let mut text = String::new();
    for (i, report) in reports.iter().enumerate() {
        if reports.len() > 1 {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(&format!("{}:\n", report.group));
        }

        for standing in &report.standings {
            text.push_str(&format!("    {:<19}\t{}\n", standing.name, standing.rating));
        }
    }

    text
}
