use crate::params::catalog::{NodeType, RadioSite};
use serde::Serialize;

/// A requested band, in MHz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyRange {
    pub freq_min: f64,
    pub freq_max: f64,
}

impl FrequencyRange {
    pub fn new(freq_min: f64, freq_max: f64) -> Self {
        Self { freq_min, freq_max }
    }

    pub fn width(&self) -> f64 {
        self.freq_max - self.freq_min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadioSelection {
    pub radio_name: RadioSite,
}

/// Parameters after binding: every value has its declared type, lists meet
/// their minimum count, but domain constraints are not yet checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundParams {
    pub nodetype: NodeType,
    pub freq_ranges: Vec<FrequencyRange>,
    pub radios: Vec<RadioSelection>,
}
