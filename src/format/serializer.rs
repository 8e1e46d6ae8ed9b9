use itertools::Itertools;

use crate::{
    error::{FeloError, Result},
    format::{clean_up_line, is_delimiter},
    model::structures::{
        contest::Contest,
        parameters::Parameters,
        participant::{Roster, RosterEntry}
    }
};

const TAB_WIDTH: usize = 8;
const DELIMITER_WIDTH: usize = 52;

/// Renders a complete Felo file. Only explicitly given parameters are
/// written, so defaults stay defaults.
pub fn serialize(parameters: &Parameters, roster: &Roster, contests: &[Contest]) -> String {
    let mut text = String::from("# Parameters\n\n");
    for (name, value) in parameters.given().sorted_by_key(|(name, _)| name.to_uppercase()) {
        text.push_str(&format!("{}{}\n", fill_with_tabs(name, 4), value));
    }
    text.push('\n');

    text.push_str(&delimiter());
    text.push_str(&render_roster(roster));

    text.push_str(&delimiter());
    text.push_str("# Bouts\n\n");
    let contests: Vec<&Contest> = contests.iter().sorted_by_key(|contest| contest.date).collect();
    for (i, contest) in contests.iter().enumerate() {
        if i > 0 && contests[i - 1].date.calendar_day() != contest.date.calendar_day() {
            text.push('\n');
        }
        text.push_str(&render_contest(contest));
        text.push('\n');
    }

    text
}

/// Replaces the roster section of `original` and leaves everything else,
/// comments included, exactly as it was.
///
/// The text must contain exactly two delimiter lines.
pub fn rewrite_roster(original: &str, roster: &Roster) -> Result<String> {
    let lines: Vec<&str> = original.split_inclusive('\n').collect();
    let delimiters: Vec<usize> = lines
        .iter()
        .positions(|line| is_delimiter(clean_up_line(line)))
        .collect();

    let &[start, end] = &delimiters[..] else {
        return Err(FeloError::Format(format!(
            "expected exactly two delimiter lines, found {}",
            delimiters.len()
        )));
    };

    let mut text: String = lines[..=start].concat();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&render_roster(roster));
    text.push_str(&lines[end..].concat());

    Ok(text)
}

/// Pads `text` with tabs up to tab column `tab_column` (not a character
/// column: column 4 starts at character 32). At least one tab is added.
pub fn fill_with_tabs(text: &str, tab_column: usize) -> String {
    let tabs = tab_column.saturating_sub(expanded_width(text) / TAB_WIDTH).max(1);
    format!("{}{}", text, "\t".repeat(tabs))
}

fn expanded_width(text: &str) -> usize {
    text.chars().fold(0, |width, c| {
        if c == '\t' {
            (width / TAB_WIDTH + 1) * TAB_WIDTH
        } else {
            width + 1
        }
    })
}

fn delimiter() -> String {
    format!("{}\n", "=".repeat(DELIMITER_WIDTH))
}

fn render_roster(roster: &Roster) -> String {
    let mut text = String::from("# Initial ratings\n# Names of hidden participants in parentheses\n\n");
    for entry in roster.sorted() {
        text.push_str(&render_roster_entry(entry));
        text.push('\n');
    }
    text.push('\n');

    text
}

fn render_roster_entry(entry: &RosterEntry) -> String {
    let name = if entry.hidden {
        format!("({})", entry.name)
    } else {
        entry.name.clone()
    };

    let mut line = format!("{}{}", fill_with_tabs(&name, 3), entry.initial_rating);
    if entry.initial_weighting != 0.0 {
        line.push_str(&format!(" ({})", entry.initial_weighting));
    }

    line
}

fn render_contest(contest: &Contest) -> String {
    let names = format!(
        "{}{} -- {}",
        fill_with_tabs(&contest.date.to_string(), 2),
        contest.first,
        contest.second
    );
    let mut line = format!(
        "{}{}:{}",
        fill_with_tabs(&names, 5),
        contest.points_first,
        contest.points_second
    );
    if contest.fenced_to == 0 || !contest.reached_target() {
        line.push_str(&format!("/{}", contest.fenced_to));
    }

    line
}
