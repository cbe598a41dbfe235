use std::sync::LazyLock;

use regex::Regex;

use crate::tle::{ElementSet, TleError, LINE_LENGTH, UNKNOWN_NAME};

// Line 1 run followed by a line 2 run anywhere in a flattened blob.
static TLE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(1\s+\d{5}[U ]\s.*?)(2\s+\d{5}\s.*)").expect("static TLE pattern")
});

/// Locate a name/line1/line2 triple in arbitrary element-set text.
///
/// Accepted shapes, tried in order:
/// - two lines `1 ...` / `2 ...` (name defaults to `UNKNOWN`)
/// - a title line followed by `1 ...` / `2 ...`
/// - one blob holding both runs, newlines treated as plain whitespace
pub fn normalize(raw: &str) -> Result<ElementSet, TleError> {
    let raw = raw.trim();
    let lines: Vec<&str> = raw
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() >= 2 && lines[0].starts_with("1 ") && lines[1].starts_with("2 ") {
        return Ok(ElementSet::new(UNKNOWN_NAME, lines[0], lines[1]));
    }
    if lines.len() >= 3 && lines[1].starts_with("1 ") && lines[2].starts_with("2 ") {
        return Ok(ElementSet::new(lines[0], lines[1], lines[2]));
    }

    let flattened = raw.replace(['\r', '\n'], " ");
    let caps = TLE_PAIR.captures(&flattened).ok_or(TleError::Unparseable)?;
    Ok(ElementSet::new(
        UNKNOWN_NAME,
        caps[1].trim(),
        caps[2].trim(),
    ))
}

/// Structural checks that must hold before any column is read numerically.
pub fn validate(set: ElementSet) -> Result<ElementSet, TleError> {
    check_line(&set.line1, 1)?;
    check_line(&set.line2, 2)?;
    Ok(set)
}

pub fn parse_and_validate(raw: &str) -> Result<ElementSet, TleError> {
    validate(normalize(raw)?)
}

fn check_line(line: &str, number: u8) -> Result<(), TleError> {
    if !line.is_ascii() {
        return Err(TleError::NonAscii { line: number });
    }
    let prefix = if number == 1 { "1 " } else { "2 " };
    if !line.starts_with(prefix) {
        return Err(TleError::LinePrefix { line: number });
    }
    if line.len() != LINE_LENGTH {
        return Err(TleError::LineLength {
            line: number,
            len: line.len(),
        });
    }
    Ok(())
}
