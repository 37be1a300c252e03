//! Domain checks on bound parameters.
//!
//! Every frequency range must sit inside the CBRS band and span at least
//! `MIN_BAND_WIDTH_MHZ`. All entries are checked; nothing short-circuits, so
//! the caller sees every violation at once.

use crate::params::bind::field_path;
use crate::params::catalog::NodeType;
use crate::params::decl::{FREQ_MAX, FREQ_MIN, FREQ_RANGES};
use crate::params::error::{ParameterError, ValidationReport};
use crate::params::value::{BoundParams, FrequencyRange, RadioSelection};

pub const BAND_MIN_MHZ: f64 = 3400.0;
pub const BAND_MAX_MHZ: f64 = 3800.0;
pub const MIN_BAND_WIDTH_MHZ: f64 = 1.0;

/// Parameters that passed every check. Only `validate` constructs this, so
/// assembly can never see an unchecked range.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParams {
    nodetype: NodeType,
    freq_ranges: Vec<FrequencyRange>,
    radios: Vec<RadioSelection>,
}

impl ValidatedParams {
    pub fn nodetype(&self) -> NodeType {
        self.nodetype
    }

    pub fn freq_ranges(&self) -> &[FrequencyRange] {
        &self.freq_ranges
    }

    pub fn radios(&self) -> &[RadioSelection] {
        &self.radios
    }
}

pub fn validate(params: BoundParams) -> Result<ValidatedParams, ValidationReport> {
    let mut errors = Vec::new();
    for (i, range) in params.freq_ranges.iter().enumerate() {
        errors.extend(check_range(i, range));
    }
    ValidationReport::into_result(errors)?;

    Ok(ValidatedParams {
        nodetype: params.nodetype,
        freq_ranges: params.freq_ranges,
        radios: params.radios,
    })
}

/// Errors for the i-th range: at most one band error and one width error.
pub fn check_range(i: usize, range: &FrequencyRange) -> Vec<ParameterError> {
    let fields = || {
        vec![
            field_path(FREQ_RANGES, i, FREQ_MIN),
            field_path(FREQ_RANGES, i, FREQ_MAX),
        ]
    };

    let mut errors = Vec::new();
    if !in_band(range.freq_min) || !in_band(range.freq_max) {
        errors.push(ParameterError::range(
            format!(
                "Frequencies must be between {} and {} MHz",
                BAND_MIN_MHZ, BAND_MAX_MHZ
            ),
            fields(),
        ));
    }
    if range.width() < MIN_BAND_WIDTH_MHZ {
        errors.push(ParameterError::range(
            format!(
                "Minimum and maximum frequencies must be separated by at least {} MHz",
                MIN_BAND_WIDTH_MHZ
            ),
            fields(),
        ));
    }
    errors
}

fn in_band(mhz: f64) -> bool {
    (BAND_MIN_MHZ..=BAND_MAX_MHZ).contains(&mhz)
}
