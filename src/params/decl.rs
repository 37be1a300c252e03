//! Declared parameters of the profile.
//!
//! These are the parameters a caller may bind. The `params` subcommand prints
//! them as JSON so a front end can render a form without reading this code.

use crate::params::catalog::{NodeType, RadioSite};
use serde::Serialize;
use serde_json::{Value, json};

pub const NODETYPE: &str = "nodetype";
pub const FREQ_RANGES: &str = "freq_ranges";
pub const FREQ_MIN: &str = "freq_min";
pub const FREQ_MAX: &str = "freq_max";
pub const RADIOS: &str = "radios";
pub const RADIO_NAME: &str = "radio_name";

/// Default range bound when `freq_ranges` is not supplied.
pub const DEFAULT_FREQ_MIN: f64 = 3550.0;
pub const DEFAULT_FREQ_MAX: f64 = 3560.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Bandwidth,
    Struct,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegalValue {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamDecl {
    pub name: &'static str,
    pub prompt: &'static str,
    pub kind: ParamKind,
    pub default: Value,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legal_values: Vec<LegalValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,

    /// Set for multi-value struct parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_value_title: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<ParamDecl>,
}

impl ParamDecl {
    fn scalar(name: &'static str, prompt: &'static str, kind: ParamKind, default: Value) -> Self {
        Self {
            name,
            prompt,
            kind,
            default,
            legal_values: Vec::new(),
            description: None,
            multi_value_title: None,
            min: None,
            members: Vec::new(),
        }
    }
}

/// All parameters, in the order a form should present them.
pub fn declarations() -> Vec<ParamDecl> {
    let mut nodetype = ParamDecl::scalar(
        NODETYPE,
        "Compute node type",
        ParamKind::String,
        json!(NodeType::default().as_str()),
    );
    nodetype.description = Some("Type of compute node to be paired with the X310 Radios");
    nodetype.legal_values = NodeType::ALL
        .iter()
        .map(|t| LegalValue {
            value: t.as_str().to_string(),
            label: t.as_str().to_string(),
        })
        .collect();

    let rounding = Some("Values are rounded to the nearest kilohertz.");
    let mut freq_min = ParamDecl::scalar(
        FREQ_MIN,
        "Frequency Min",
        ParamKind::Bandwidth,
        json!(DEFAULT_FREQ_MIN),
    );
    freq_min.description = rounding;
    let mut freq_max = ParamDecl::scalar(
        FREQ_MAX,
        "Frequency Max",
        ParamKind::Bandwidth,
        json!(DEFAULT_FREQ_MAX),
    );
    freq_max.description = rounding;

    let mut freq_ranges = ParamDecl::scalar(
        FREQ_RANGES,
        "Range",
        ParamKind::Struct,
        json!([{ "freq_min": DEFAULT_FREQ_MIN, "freq_max": DEFAULT_FREQ_MAX }]),
    );
    freq_ranges.multi_value_title = Some("Frequency ranges for over-the-air operation.");
    freq_ranges.min = Some(1);
    freq_ranges.members = vec![freq_min, freq_max];

    let mut radio_name = ParamDecl::scalar(
        RADIO_NAME,
        "Rooftop base-station X310",
        ParamKind::String,
        json!(RadioSite::default().id()),
    );
    radio_name.legal_values = RadioSite::ALL
        .iter()
        .map(|s| LegalValue {
            value: s.id().to_string(),
            label: s.label().to_string(),
        })
        .collect();

    let mut radios = ParamDecl::scalar(RADIOS, "X310 CBRS Radios", ParamKind::Struct, json!([]));
    radios.multi_value_title = Some("CBRS Radios.");
    radios.min = Some(1);
    radios.members = vec![radio_name];

    vec![nodetype, freq_ranges, radios]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn declares_three_parameters() {
        let decls = declarations();
        let names: Vec<&str> = decls.iter().map(|d| d.name).collect();
        assert_eq!(names, vec![NODETYPE, FREQ_RANGES, RADIOS]);
        assert_eq!(decls[0].legal_values.len(), 2);
        assert_eq!(decls[1].min, Some(1));
        assert_eq!(decls[2].members[0].legal_values.len(), 9);
    }

    #[test]
    fn freq_ranges_default_is_one_entry() {
        let decls = declarations();
        let v = serde_json::to_value(&decls[1]).unwrap();
        assert_eq!(
            v["default"],
            json!([{ "freq_min": 3550.0, "freq_max": 3560.0 }])
        );
        assert_eq!(v["kind"], json!("struct"));
        assert_eq!(v["members"][0]["kind"], json!("bandwidth"));
    }
}
