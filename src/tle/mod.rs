mod checksum;
mod element_set;
mod error;
mod normalize;

pub use checksum::{adjust_mean_motion, checksum};
pub use element_set::{ElementSet, LINE_LENGTH, UNKNOWN_NAME};
pub use error::TleError;
pub use normalize::parse_and_validate;
