use crate::tle::element_set::{read_mean_motion, MEAN_MOTION_COLUMNS};
use crate::tle::{TleError, LINE_LENGTH};

const FIELD_WIDTH: usize = MEAN_MOTION_COLUMNS.1 - MEAN_MOTION_COLUMNS.0 + 1;
const CHECKSUMMED: usize = LINE_LENGTH - 1;

/// Modulo-10 checksum over the first 68 columns.
///
/// Digits count their value, `-` counts one, everything else counts zero.
pub fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .bytes()
        .take(CHECKSUMMED)
        .map(|b| match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// Rewrite the mean motion field of line 2 and recompute its checksum.
///
/// Only columns 53..=63 and 69 change. Lines shorter than 68 columns are
/// padded with spaces so the result is always exactly 69 characters.
pub fn set_mean_motion(line2: &str, mean_motion: f64) -> Result<String, TleError> {
    if !line2.is_ascii() {
        return Err(TleError::NonAscii { line: 2 });
    }
    let field = format!("{:>width$.8}", mean_motion, width = FIELD_WIDTH);
    if !mean_motion.is_finite() || field.len() != FIELD_WIDTH {
        return Err(TleError::FieldOverflow(mean_motion));
    }

    let (start, end) = MEAN_MOTION_COLUMNS;
    let mut padded = format!("{:<width$}", line2, width = CHECKSUMMED);
    padded.truncate(CHECKSUMMED);
    padded.replace_range(start - 1..end, &field);

    let digit = checksum(&padded);
    padded.push(char::from(b'0' + digit));
    Ok(padded)
}

/// Add `delta` rev/day to the mean motion already encoded in line 2.
pub fn adjust_mean_motion(line2: &str, delta: f64) -> Result<String, TleError> {
    let current = read_mean_motion(line2)?;
    set_mean_motion(line2, current + delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    const L1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const L2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn trailing_digit(line: &str) -> u8 {
        line.as_bytes()[LINE_LENGTH - 1] - b'0'
    }

    #[test]
    fn known_lines_checksum() {
        assert_eq!(checksum(L1), 7);
        assert_eq!(checksum(L2), 7);
    }

    #[test]
    fn minus_counts_one_and_punctuation_counts_zero() {
        assert_eq!(checksum("-"), 1);
        assert_eq!(checksum("+.- 9"), 0);
        assert_eq!(checksum("12345"), 5);
    }

    #[test]
    fn checksum_ignores_column_69() {
        let mut altered = L2[..68].to_string();
        altered.push('0');
        assert_eq!(checksum(&altered), checksum(L2));
    }

    #[test]
    fn golden_small_increase() {
        assert_eq!(
            set_mean_motion(L2, 15.72130391).unwrap(),
            "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72130391563533"
        );
    }

    #[test]
    fn golden_geo_value_is_left_padded() {
        assert_eq!(
            set_mean_motion(L2, 1.00271234).unwrap(),
            "2 25544  51.6416 247.4627 0006703 130.5360 325.0288  1.00271234563531"
        );
    }

    #[test]
    fn golden_negative_value() {
        assert_eq!(
            set_mean_motion(L2, -1.5).unwrap(),
            "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 -1.50000000563538"
        );
    }

    #[test]
    fn only_field_and_checksum_change() {
        for value in [0.5, 2.00563457, 9.99999999, 15.5, -3.25] {
            let out = set_mean_motion(L2, value).unwrap();
            assert_eq!(out.len(), LINE_LENGTH);
            assert_eq!(&out[..52], &L2[..52]);
            assert_eq!(&out[63..68], &L2[63..68]);
            assert_eq!(read_mean_motion(&out).unwrap(), format!("{value:.8}").parse::<f64>().unwrap());
            assert_eq!(trailing_digit(&out), checksum(&out));
        }
    }

    #[test]
    fn short_line_is_padded_to_full_length() {
        let out = set_mean_motion(&L2[..60], 15.5).unwrap();
        assert_eq!(out.len(), LINE_LENGTH);
        assert_eq!(&out[52..63], "15.50000000");
        assert_eq!(&out[63..68], "     ");
        assert_eq!(trailing_digit(&out), checksum(&out));
    }

    #[test]
    fn overflowing_value_is_rejected() {
        assert_eq!(
            set_mean_motion(L2, 100.0),
            Err(TleError::FieldOverflow(100.0))
        );
        assert!(set_mean_motion(L2, f64::NAN).is_err());
    }

    #[test]
    fn adjust_adds_delta() {
        let out = adjust_mean_motion(L2, 0.00005).unwrap();
        assert_eq!(&out[52..63], "15.72130391");
        assert_eq!(trailing_digit(&out), checksum(&out));
    }
}
