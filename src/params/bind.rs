//! Binding caller-supplied values against the declared parameters.
//!
//! JSON shape accepted (every key optional, see `decl` for defaults):
//! {
//!   "nodetype": "d740",
//!   "freq_ranges": [ { "freq_min": 3550.0, "freq_max": "3560 MHz" } ],
//!   "radios": [ { "radio_name": "cbrssdr1-bes" } ]
//! }
//!
//! Bandwidth members take a number (MHz) or a string with an optional
//! Hz/kHz/MHz/GHz suffix, and are rounded to the nearest kilohertz.

use crate::Result;
use crate::params::catalog::{NodeType, RadioSite};
use crate::params::decl::{
    DEFAULT_FREQ_MAX, DEFAULT_FREQ_MIN, FREQ_MAX, FREQ_MIN, FREQ_RANGES, NODETYPE, RADIO_NAME,
    RADIOS,
};
use crate::params::error::{ParameterError, ValidationReport};
use crate::params::value::{BoundParams, FrequencyRange, RadioSelection};

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParams {
    #[serde(default)]
    pub nodetype: Option<String>,

    #[serde(default)]
    pub freq_ranges: Option<Vec<RawRange>>,

    #[serde(default)]
    pub radios: Option<Vec<RawRadio>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRange {
    #[serde(default)]
    pub freq_min: Option<BandwidthValue>,

    #[serde(default)]
    pub freq_max: Option<BandwidthValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRadio {
    #[serde(default)]
    pub radio_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BandwidthValue {
    Number(f64),
    Text(String),
}

impl RawParams {
    /// Read a JSON parameter file.
    pub fn from_file(path: &str) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read parameter file {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("parse parameter file {}", path))
    }

    /// Command-line values replace whole parameters from the file.
    pub fn overlay(
        mut self,
        nodetype: Option<String>,
        freq_ranges: Vec<RawRange>,
        radios: Vec<String>,
    ) -> Self {
        if nodetype.is_some() {
            self.nodetype = nodetype;
        }
        if !freq_ranges.is_empty() {
            self.freq_ranges = Some(freq_ranges);
        }
        if !radios.is_empty() {
            self.radios = Some(
                radios
                    .into_iter()
                    .map(|name| RawRadio {
                        radio_name: Some(name),
                    })
                    .collect(),
            );
        }
        self
    }
}

impl RawRange {
    /// Parse a `min:max` pair, e.g. `3550:3560` or `3.55GHz:3.56GHz`.
    pub fn from_pair(s: &str) -> std::result::Result<Self, String> {
        let (lo, hi) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <min>:<max>, got {:?}", s))?;
        Ok(Self {
            freq_min: Some(BandwidthValue::Text(lo.trim().to_string())),
            freq_max: Some(BandwidthValue::Text(hi.trim().to_string())),
        })
    }
}

/// Binds `RawParams` into typed parameters, collecting every bind error.
pub struct Binder {
    bandwidth_re: Regex,
}

impl Binder {
    pub fn new() -> Result<Self> {
        // Capture:
        // 1) number, optionally signed and fractional
        // 2) unit prefix before "Hz" (k, M, G or none)
        const BANDWIDTH_RE: &str = r#"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+))\s*(?i:([kmg]?)hz)?\s*$"#;
        Ok(Self {
            bandwidth_re: Regex::new(BANDWIDTH_RE)?,
        })
    }

    pub fn bind(&self, raw: &RawParams) -> std::result::Result<BoundParams, ValidationReport> {
        let mut errors = Vec::new();

        let nodetype = match raw.nodetype.as_deref() {
            None => NodeType::default(),
            Some(name) => NodeType::from_name(name).unwrap_or_else(|| {
                errors.push(ParameterError::bind(
                    format!("unknown node type {:?}", name),
                    NODETYPE,
                ));
                NodeType::default()
            }),
        };

        let freq_ranges = match &raw.freq_ranges {
            None => vec![FrequencyRange::new(DEFAULT_FREQ_MIN, DEFAULT_FREQ_MAX)],
            Some(list) => {
                if list.is_empty() {
                    errors.push(ParameterError::bind(
                        "at least 1 frequency range is required",
                        FREQ_RANGES,
                    ));
                }
                let mut out = Vec::with_capacity(list.len());
                for (i, range) in list.iter().enumerate() {
                    let freq_min = self.bind_bandwidth(
                        range.freq_min.as_ref(),
                        DEFAULT_FREQ_MIN,
                        field_path(FREQ_RANGES, i, FREQ_MIN),
                        &mut errors,
                    );
                    let freq_max = self.bind_bandwidth(
                        range.freq_max.as_ref(),
                        DEFAULT_FREQ_MAX,
                        field_path(FREQ_RANGES, i, FREQ_MAX),
                        &mut errors,
                    );
                    if let (Some(freq_min), Some(freq_max)) = (freq_min, freq_max) {
                        out.push(FrequencyRange::new(freq_min, freq_max));
                    }
                }
                out
            }
        };

        let raw_radios = raw.radios.as_deref().unwrap_or_default();
        if raw_radios.is_empty() {
            errors.push(ParameterError::bind(
                "at least 1 radio is required",
                RADIOS,
            ));
        }
        let mut radios = Vec::with_capacity(raw_radios.len());
        for (i, radio) in raw_radios.iter().enumerate() {
            let site = match radio.radio_name.as_deref() {
                None => Some(RadioSite::default()),
                Some(id) => RadioSite::from_id(id).or_else(|| {
                    errors.push(ParameterError::bind(
                        format!("unknown radio {:?}", id),
                        field_path(RADIOS, i, RADIO_NAME),
                    ));
                    None
                }),
            };
            if let Some(radio_name) = site {
                radios.push(RadioSelection { radio_name });
            }
        }

        ValidationReport::into_result(errors)?;
        Ok(BoundParams {
            nodetype,
            freq_ranges,
            radios,
        })
    }

    fn bind_bandwidth(
        &self,
        value: Option<&BandwidthValue>,
        default: f64,
        field: String,
        errors: &mut Vec<ParameterError>,
    ) -> Option<f64> {
        let (mhz, shown) = match value {
            None => return Some(default),
            Some(BandwidthValue::Number(n)) => (Some(*n), n.to_string()),
            Some(BandwidthValue::Text(s)) => (self.parse_mhz(s), format!("{:?}", s)),
        };
        match mhz.filter(|v| v.is_finite()) {
            Some(v) => Some(round_to_khz(v)),
            None => {
                errors.push(ParameterError::bind(
                    format!("not a bandwidth value: {}", shown),
                    field,
                ));
                None
            }
        }
    }

    /// Parse "3550", "3550.5 MHz", "3.55GHz", "3550000 kHz" into MHz.
    fn parse_mhz(&self, s: &str) -> Option<f64> {
        let caps = self.bandwidth_re.captures(s)?;
        let number: f64 = caps.get(1)?.as_str().parse().ok()?;
        let prefix = caps.get(2).map(|m| m.as_str().to_ascii_lowercase());
        match prefix.as_deref() {
            None | Some("m") => Some(number),
            Some("") => Some(number / 1e6),
            Some("k") => Some(number / 1e3),
            Some("g") => Some(number * 1e3),
            Some(_) => None,
        }
    }
}

fn round_to_khz(mhz: f64) -> f64 {
    (mhz * 1000.0).round() / 1000.0
}

pub fn field_path(list: &str, index: usize, member: &str) -> String {
    format!("{}[{}].{}", list, index, member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn bind_json(json: &str) -> std::result::Result<BoundParams, ValidationReport> {
        let raw: RawParams = serde_json::from_str(json).unwrap();
        Binder::new().unwrap().bind(&raw)
    }

    #[test]
    fn defaults_fill_missing_parameters() {
        let bound = bind_json(r#"{ "radios": [ {} ] }"#).unwrap();
        assert_eq!(
            bound,
            BoundParams {
                nodetype: NodeType::D740,
                freq_ranges: vec![FrequencyRange::new(3550.0, 3560.0)],
                radios: vec![RadioSelection {
                    radio_name: RadioSite::Bes
                }],
            }
        );
    }

    #[test]
    fn binds_explicit_values_in_order() {
        let bound = bind_json(
            r#"{
                "nodetype": "d430",
                "freq_ranges": [
                    { "freq_min": 3400, "freq_max": 3410 },
                    { "freq_min": "3.7GHz", "freq_max": "3710 MHz" }
                ],
                "radios": [
                    { "radio_name": "cbrssdr1-ustar" },
                    { "radio_name": "cbrssdr1-ustar" },
                    { "radio_name": "cbrssdr1-hospital" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(bound.nodetype, NodeType::D430);
        assert_eq!(
            bound.freq_ranges,
            vec![
                FrequencyRange::new(3400.0, 3410.0),
                FrequencyRange::new(3700.0, 3710.0),
            ]
        );
        let sites: Vec<RadioSite> = bound.radios.iter().map(|r| r.radio_name).collect();
        assert_eq!(
            sites,
            vec![RadioSite::Ustar, RadioSite::Ustar, RadioSite::Hospital]
        );
    }

    #[test]
    fn bandwidth_units_and_rounding() {
        let binder = Binder::new().unwrap();
        assert_eq!(binder.parse_mhz("3550"), Some(3550.0));
        assert_eq!(binder.parse_mhz(" 3550.5 mhz "), Some(3550.5));
        assert_eq!(binder.parse_mhz("3550000kHz"), Some(3550.0));
        assert_eq!(binder.parse_mhz("3550000000 Hz"), Some(3550.0));
        assert_eq!(binder.parse_mhz("3550 furlongs"), None);
        assert_eq!(binder.parse_mhz(""), None);
        assert_eq!(round_to_khz(3550.00049), 3550.0);
        assert_eq!(round_to_khz(3550.0006), 3550.001);
    }

    #[test]
    fn bind_errors_are_collected_with_field_paths() {
        let report = bind_json(
            r#"{
                "nodetype": "d820",
                "freq_ranges": [ { "freq_min": "lots", "freq_max": 3560 } ],
                "radios": [ { "radio_name": "cbrssdr1-moon" } ]
            }"#,
        )
        .unwrap_err();

        let fields: Vec<&str> = report
            .errors
            .iter()
            .map(|e| e.fields[0].as_str())
            .collect();
        assert_eq!(
            fields,
            vec!["nodetype", "freq_ranges[0].freq_min", "radios[0].radio_name"]
        );
        assert!(report.errors.iter().all(|e| e.kind == ErrorKind::BindError));
    }

    #[test]
    fn lists_below_minimum_are_rejected() {
        let report = bind_json(r#"{ "freq_ranges": [] }"#).unwrap_err();
        let fields: Vec<&str> = report
            .errors
            .iter()
            .map(|e| e.fields[0].as_str())
            .collect();
        assert_eq!(fields, vec!["freq_ranges", "radios"]);
    }

    #[test]
    fn overlay_replaces_whole_parameters() {
        let raw: RawParams = serde_json::from_str(
            r#"{ "nodetype": "d430", "radios": [ { "radio_name": "cbrssdr1-meb" } ] }"#,
        )
        .unwrap();
        let raw = raw.overlay(
            None,
            vec![RawRange::from_pair("3600:3610").unwrap()],
            vec!["cbrssdr1-smt".into(), "cbrssdr1-fm".into()],
        );
        let bound = Binder::new().unwrap().bind(&raw).unwrap();
        assert_eq!(bound.nodetype, NodeType::D430);
        assert_eq!(bound.freq_ranges, vec![FrequencyRange::new(3600.0, 3610.0)]);
        let sites: Vec<RadioSite> = bound.radios.iter().map(|r| r.radio_name).collect();
        assert_eq!(sites, vec![RadioSite::Smt, RadioSite::Fm]);
    }

    #[test]
    fn pair_argument_needs_separator() {
        assert!(RawRange::from_pair("3550-3560").is_err());
        let range = RawRange::from_pair("3550 : 3560MHz").unwrap();
        assert_eq!(
            range.freq_max,
            Some(BandwidthValue::Text("3560MHz".to_string()))
        );
    }
}
