//! The Felo file format.
//!
//! A Felo file has three sections: parameters, initial ratings (the roster)
//! and bouts. Sections are separated by delimiter lines, and `#` starts a
//! comment that runs to the end of the line.

use crate::model::structures::{contest::Contest, parameters::Parameters, participant::Roster};

pub mod parser;
pub mod serializer;

pub use parser::{parse, parse_with_source};
pub use serializer::{rewrite_roster, serialize};

/// A line whose first significant character is one of these separates two
/// sections.
pub const DELIMITERS: &str = "-=._:;,+*'~\"`´/\\%$!";

/// Everything read from a Felo file.
#[derive(Debug, Clone, PartialEq)]
pub struct FeloFile {
    pub parameters: Parameters,
    /// Keys that were explicitly given in the file, in file order
    pub given_keys: Vec<String>,
    pub roster: Roster,
    pub contests: Vec<Contest>
}

/// Strips the comment and surrounding whitespace from a line.
pub fn clean_up_line(line: &str) -> &str {
    match line.find('#') {
        Some(position) => line[..position].trim(),
        None => line.trim()
    }
}

/// Whether a cleaned up line separates two sections.
pub fn is_delimiter(line: &str) -> bool {
    line.chars().next().is_some_and(|c| DELIMITERS.contains(c))
}
