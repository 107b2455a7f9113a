//! Fixed cabin layout: rows 1-10, columns A-F, 60 seats per flight.
//!
//! Seat occupancy is always derived from the booking set; this module only
//! knows the label grammar and the row-major ordering used for sorting and
//! suggestions.

use std::collections::HashSet;

pub const ROWS: u32 = 10;
pub const COLUMNS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
pub const TOTAL_SEATS: i32 = (ROWS as i32) * (COLUMNS.len() as i32);

/// Parse a seat label into its (row, column) pair.
///
/// The grammar is strict: row 1-10 with no leading zero, followed by a
/// single column letter A-F. `"11A"`, `"1G"`, `"01A"` and `"5a"` are all
/// rejected.
pub fn parse_label(label: &str) -> Option<(u32, char)> {
    let column = label.chars().last()?;
    if !COLUMNS.contains(&column) {
        return None;
    }

    let row_part = &label[..label.len() - column.len_utf8()];
    let row = match row_part {
        "10" => 10,
        r if r.len() == 1 => {
            let d = r.chars().next()?.to_digit(10)?;
            if d == 0 {
                return None;
            }
            d
        }
        _ => return None,
    };

    Some((row, column))
}

pub fn is_valid_label(label: &str) -> bool {
    parse_label(label).is_some()
}

/// All seat labels in row-major order: 1A..1F, 2A..2F, ..., 10A..10F.
pub fn all_labels() -> impl Iterator<Item = String> {
    (1..=ROWS).flat_map(|row| COLUMNS.iter().map(move |col| format!("{}{}", row, col)))
}

/// Sort labels by (row ascending, column ascending), so "10F" comes after
/// "2C" rather than before it. Labels that fail to parse sort last.
pub fn sort_labels(labels: &mut [String]) {
    labels.sort_by_key(|label| parse_label(label).unwrap_or((u32::MAX, 'Z')));
}

/// First free seat in row-major order, or `None` when every seat is booked.
pub fn first_free(booked: &[String]) -> Option<String> {
    let taken: HashSet<&str> = booked.iter().map(String::as_str).collect();
    all_labels().find(|label| !taken.contains(label.as_str()))
}
