use std::path::Path;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

use crate::{
    error::{FeloError, Result},
    format::{clean_up_line, is_delimiter, FeloFile},
    model::structures::{
        contest::{Contest, ContestDate},
        parameters::{ParameterKey, ParameterValue, Parameters},
        participant::{Roster, RosterEntry}
    }
};

lazy_static! {
    static ref ITEM_LINE: Regex = Regex::new(r"^(?P<name>[^\t]+?)\s*\t+\s*(?P<value>.+?)$").unwrap();
    static ref ROSTER_VALUE: Regex = Regex::new(r"^(?P<rating>[^\s(]+)(?:\s*\((?P<weighting>[^)]*)\))?$").unwrap();
    static ref CONTEST_LINE: Regex = Regex::new(concat!(
        r"^(?P<date>\d{4}/\d{1,2}/[\d.]{1,5})\s*\t+\s*",
        r"(?P<first>.+?)\s*--\s*(?P<second>.+?)\s*\t+\s*",
        r"(?P<points_first>\d+):(?P<points_second>\d+)(?:/(?P<fenced_to>\d+))?$"
    ))
    .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Parameters,
    Roster,
    Contests
}

/// Parses the text of a Felo file.
pub fn parse(text: &str) -> Result<FeloFile> {
    parse_with_source(text, None)
}

/// Parses the text of a Felo file read from `source`. The path only
/// provides the defaults of the group name and the output directory.
pub fn parse_with_source(text: &str, source: Option<&Path>) -> Result<FeloFile> {
    let mut section = Section::Parameters;
    let mut given = IndexMap::new();
    let mut roster = Roster::new();
    let mut contests = Vec::new();

    for (i, raw_line) in text.lines().enumerate() {
        let number = i + 1;
        let line = clean_up_line(raw_line);
        if line.is_empty() {
            continue;
        }

        if is_delimiter(line) {
            section = match section {
                Section::Parameters => Section::Roster,
                Section::Roster => Section::Contests,
                Section::Contests => {
                    return Err(FeloError::line(number, "the bouts must be the last section"));
                }
            };
            continue;
        }

        match section {
            Section::Parameters => {
                let (name, value) = parse_item(line, number, "name <TAB> value")?;
                given.insert(name.to_string(), ParameterValue::coerce(value));
            }
            Section::Roster => {
                let entry = parse_roster_entry(line, number)?;
                if let Err(entry) = roster.insert(entry) {
                    return Err(FeloError::line(
                        number,
                        format!("participant \"{}\" is listed twice", entry.name)
                    ));
                }
            }
            Section::Contests => contests.push(parse_contest(line, number, &roster)?)
        }
    }

    let given_keys: Vec<String> = given.keys().cloned().collect();
    let mut parameters = Parameters::new(given);
    if let Some(path) = source {
        apply_source_defaults(&mut parameters, path);
    }

    debug!(
        parameters = given_keys.len(),
        participants = roster.len(),
        contests = contests.len(),
        "Parsed Felo file"
    );

    Ok(FeloFile {
        parameters,
        given_keys,
        roster,
        contests
    })
}

fn parse_item<'l>(line: &'l str, number: usize, pattern: &str) -> Result<(&'l str, &'l str)> {
    let captures = ITEM_LINE
        .captures(line)
        .ok_or_else(|| FeloError::line(number, format!("line must be of the form \"{}\"", pattern)))?;

    match (captures.name("name"), captures.name("value")) {
        (Some(name), Some(value)) => Ok((name.as_str(), value.as_str())),
        _ => Err(FeloError::line(number, format!("line must be of the form \"{}\"", pattern)))
    }
}

fn parse_roster_entry(line: &str, number: usize) -> Result<RosterEntry> {
    let (name, value) = parse_item(line, number, "name <TAB> initial rating")?;

    let (name, hidden) = match name.strip_prefix('(').and_then(|n| n.strip_suffix(')')) {
        Some(inner) => (inner.trim(), true),
        None => (name, false)
    };
    if name.is_empty() {
        return Err(FeloError::line(number, "participant without a name"));
    }

    let captures = ROSTER_VALUE.captures(value).ok_or_else(|| {
        FeloError::Format(format!("initial rating \"{}\" of \"{}\" is not a number", value, name))
    })?;
    let initial_rating = parse_number(&captures["rating"], "initial rating", name)?;
    let initial_weighting = match captures.name("weighting") {
        Some(weighting) => parse_number(weighting.as_str(), "initial weighting", name)?,
        None => 0.0
    };

    Ok(RosterEntry {
        name: name.to_string(),
        hidden,
        initial_rating,
        initial_weighting
    })
}

fn parse_number(text: &str, what: &str, name: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FeloError::Format(format!("{} \"{}\" of \"{}\" is not a number", what, text, name)))
}

fn parse_contest(line: &str, number: usize, roster: &Roster) -> Result<Contest> {
    let captures = CONTEST_LINE.captures(line).ok_or_else(|| {
        FeloError::line(
            number,
            "line must be of the form \"YYYY/MM/DD <TAB> name1 -- name2 <TAB> points1:points2\""
        )
    })?;

    let date: ContestDate = captures["date"]
        .parse()
        .map_err(|e: FeloError| FeloError::line(number, e.to_string()))?;
    let points_first = parse_points(&captures, "points_first", number)?;
    let points_second = parse_points(&captures, "points_second", number)?;
    let fenced_to = match captures.name("fenced_to") {
        Some(_) => {
            let fenced_to = parse_points(&captures, "fenced_to", number)?;
            if fenced_to > 0 && (points_first > fenced_to || points_second > fenced_to) {
                return Err(FeloError::line(number, "a score is higher than the winning points"));
            }
            fenced_to
        }
        None => points_first.max(points_second)
    };

    let first = &captures["first"];
    let second = &captures["second"];
    for name in [first, second] {
        if !roster.contains(name) {
            return Err(FeloError::line(number, format!("participant \"{}\" is unknown", name)));
        }
    }
    if first == second {
        return Err(FeloError::line(number, format!("participant \"{}\" cannot fence against themselves", first)));
    }

    Ok(Contest {
        date,
        first: first.to_string(),
        second: second.to_string(),
        points_first,
        points_second,
        fenced_to
    })
}

fn parse_points(captures: &Captures, group: &str, number: usize) -> Result<u32> {
    captures[group]
        .parse()
        .map_err(|_| FeloError::line(number, format!("\"{}\" is too large", &captures[group])))
}

/// The group name defaults to the capitalized file stem, the output
/// directory to the directory of the file.
fn apply_source_defaults(parameters: &mut Parameters, path: &Path) {
    if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
        parameters.set_default(ParameterKey::GroupName, ParameterValue::Text(capitalize(stem)));
    }

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        _ => ".".to_string()
    };
    parameters.set_default(ParameterKey::OutputDirectory, ParameterValue::Text(directory));
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new()
    }
}
