use crate::model::structures::{
    contest::{Contest, ContestDate},
    participant::{Roster, RosterEntry}
};

pub fn generate_roster_entry(name: &str, initial_rating: f64) -> RosterEntry {
    RosterEntry::new(name, initial_rating)
}

pub fn generate_roster(entries: &[(&str, f64)]) -> Roster {
    let mut roster = Roster::new();
    for (name, rating) in entries {
        if roster.insert(generate_roster_entry(name, *rating)).is_err() {
            panic!("Duplicate roster entry {}", name);
        }
    }

    roster
}

pub fn generate_contest(
    date: &str,
    first: &str,
    second: &str,
    points_first: u32,
    points_second: u32,
    fenced_to: u32
) -> Contest {
    let date: ContestDate = date.parse().unwrap_or_else(|e| panic!("Invalid test date {}: {}", date, e));

    Contest {
        date,
        first: first.to_string(),
        second: second.to_string(),
        points_first,
        points_second,
        fenced_to
    }
}

/// A small Felo file with comments, a hidden participant, a freshman, and
/// bouts on three days.
pub const SAMPLE_FELO_FILE: &str = "\
# Parameters

group name\t\t\tFlorett
k-factor rest\t\t\t30
minimum weighting freshman\t1.5

====================================================
# Initial ratings

Anna\t\t1700
Bert\t\t1600 (20)
(Carl)\t\t1500
Dora\t\t0

====================================================
# Bouts

2006/11/23\tAnna -- Bert\t\t5:3
2006/11/23\tBert -- Carl\t\t2:5
2006/11/23.5\tAnna -- Dora\t\t5:4
2006/11/30\tCarl -- Anna\t\t10:8
2006/11/30\tDora -- Bert\t\t5:1   # a good day

2006/12/07\tAnna -- Bert\t\t3:2/0
";
