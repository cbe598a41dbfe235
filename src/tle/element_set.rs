use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::tle::TleError;

/// Length of both data lines, checksum digit included.
pub const LINE_LENGTH: usize = 69;

/// Name given to element sets supplied without a title line.
pub const UNKNOWN_NAME: &str = "UNKNOWN";

/// Mean motion (rev/day), 1-based inclusive columns 53..=63 of line 2.
pub(crate) const MEAN_MOTION_COLUMNS: (usize, usize) = (53, 63);

/// A named two-line element set.
///
/// Instances are only ever replaced, never edited in place: the maneuver
/// synthesizer derives a new set from the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ElementSet {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl ElementSet {
    pub fn new(name: impl Into<String>, line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// Revolutions per day as encoded in line 2.
    pub fn mean_motion(&self) -> Result<f64, TleError> {
        read_mean_motion(&self.line2)
    }

    /// Catalog number field of line 1 (columns 3..=7), trimmed.
    pub fn catalog_number(&self) -> &str {
        self.line1.get(2..7).map(str::trim).unwrap_or_default()
    }

    /// Three-line text block, the shape returned to API callers.
    pub fn to_block(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.name, self.line1, self.line2)
    }
}

pub(crate) fn read_mean_motion(line2: &str) -> Result<f64, TleError> {
    let (start, end) = MEAN_MOTION_COLUMNS;
    let field = line2
        .get(start - 1..end)
        .ok_or_else(|| TleError::MeanMotion(line2.to_string()))?;
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| TleError::MeanMotion(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn reads_mean_motion_columns() {
        let set = ElementSet::new("ISS (ZARYA)", ISS_LINE1, ISS_LINE2);
        assert_eq!(set.mean_motion().unwrap(), 15.72125391);
        assert_eq!(set.catalog_number(), "25544");
    }

    #[test]
    fn short_line_has_no_mean_motion() {
        let set = ElementSet::new(UNKNOWN_NAME, ISS_LINE1, "2 25544  51.6416");
        assert!(matches!(set.mean_motion(), Err(TleError::MeanMotion(_))));
    }

    #[test]
    fn block_joins_name_and_lines() {
        let set = ElementSet::new("ISS", ISS_LINE1, ISS_LINE2);
        assert_eq!(set.to_block(), format!("ISS\n{ISS_LINE1}\n{ISS_LINE2}"));
    }
}
