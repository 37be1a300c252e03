//! Closed parameter choices: compute node types and the rooftop X310 catalog.
//!
//! Both are whitelisted strings on the wire. We keep them as enums so every
//! consumer matches exhaustively and an unknown value can only appear at bind
//! time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compute node type paired with an X310. Restricted to the types known to
/// work well with the radios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    D740,
    D430,
}

impl NodeType {
    pub const ALL: [NodeType; 2] = [NodeType::D740, NodeType::D430];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::D740 => "d740",
            NodeType::D430 => "d430",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CBRS rooftop base-station X310. Identifiers follow `cbrssdr1-<location>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RadioSite {
    #[serde(rename = "cbrssdr1-bes")]
    Bes,
    #[serde(rename = "cbrssdr1-browning")]
    Browning,
    #[serde(rename = "cbrssdr1-dentistry")]
    Dentistry,
    #[serde(rename = "cbrssdr1-fm")]
    Fm,
    #[serde(rename = "cbrssdr1-honors")]
    Honors,
    #[serde(rename = "cbrssdr1-meb")]
    Meb,
    #[serde(rename = "cbrssdr1-smt")]
    Smt,
    #[serde(rename = "cbrssdr1-ustar")]
    Ustar,
    #[serde(rename = "cbrssdr1-hospital")]
    Hospital,
}

impl RadioSite {
    /// Catalog order; the first entry is the member default for `radio_name`.
    pub const ALL: [RadioSite; 9] = [
        RadioSite::Bes,
        RadioSite::Browning,
        RadioSite::Dentistry,
        RadioSite::Fm,
        RadioSite::Honors,
        RadioSite::Meb,
        RadioSite::Smt,
        RadioSite::Ustar,
        RadioSite::Hospital,
    ];

    /// Raw site identifier, also the radio's physical component id.
    pub fn id(self) -> &'static str {
        match self {
            RadioSite::Bes => "cbrssdr1-bes",
            RadioSite::Browning => "cbrssdr1-browning",
            RadioSite::Dentistry => "cbrssdr1-dentistry",
            RadioSite::Fm => "cbrssdr1-fm",
            RadioSite::Honors => "cbrssdr1-honors",
            RadioSite::Meb => "cbrssdr1-meb",
            RadioSite::Smt => "cbrssdr1-smt",
            RadioSite::Ustar => "cbrssdr1-ustar",
            RadioSite::Hospital => "cbrssdr1-hospital",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RadioSite::Bes => "Behavioral",
            RadioSite::Browning => "Browning",
            RadioSite::Dentistry => "Dentistry",
            RadioSite::Fm => "Friendship Manor",
            RadioSite::Honors => "Honors",
            RadioSite::Meb => "MEB",
            RadioSite::Smt => "SMT",
            RadioSite::Ustar => "USTAR",
            RadioSite::Hospital => "Hospital",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

impl Default for RadioSite {
    fn default() -> Self {
        RadioSite::ALL[0]
    }
}

impl fmt::Display for RadioSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One row of the `catalog` listing.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub label: &'static str,
}

pub fn catalog() -> Vec<CatalogEntry> {
    RadioSite::ALL
        .iter()
        .map(|s| CatalogEntry {
            id: s.id(),
            label: s.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serde_names_match_site_ids() {
        for site in RadioSite::ALL {
            let json = serde_json::to_string(&site).unwrap();
            assert_eq!(json, format!("\"{}\"", site.id()));
            assert_eq!(RadioSite::from_id(site.id()), Some(site));
        }
    }

    #[test]
    fn catalog_has_nine_sites_in_order() {
        let ids: Vec<&str> = catalog().iter().map(|e| e.id).collect();
        assert_eq!(
            ids,
            vec![
                "cbrssdr1-bes",
                "cbrssdr1-browning",
                "cbrssdr1-dentistry",
                "cbrssdr1-fm",
                "cbrssdr1-honors",
                "cbrssdr1-meb",
                "cbrssdr1-smt",
                "cbrssdr1-ustar",
                "cbrssdr1-hospital",
            ]
        );
        assert_eq!(RadioSite::Fm.label(), "Friendship Manor");
    }

    #[test]
    fn node_type_whitelist() {
        assert_eq!(NodeType::default(), NodeType::D740);
        assert_eq!(NodeType::from_name("d430"), Some(NodeType::D430));
        assert_eq!(NodeType::from_name("d820"), None);
        let parsed: NodeType = serde_json::from_str("\"d740\"").unwrap();
        assert_eq!(parsed, NodeType::D740);
    }
}
