//! Request assembly from validated parameters.
//!
//! For each frequency range: one spectrum reservation.
//! For each radio selection: a compute node and its X310, joined by a
//! dedicated link. The compute side always gets 192.168.40.1/24; links are
//! per pair, so each pair is its own subnet.

use crate::params::{FrequencyRange, NodeType, RadioSite, ValidatedParams};
use crate::request::model::{Ipv4Address, Link, Node, Request, SpectrumRequest, Tour};

use log::debug;
use std::net::Ipv4Addr;

pub const DISK_IMAGE: &str = "urn:publicid:IDN+emulab.net+image+emulab-ops:UBUNTU18-64-GR38-PACK";

/// Third value of every spectrum reservation.
pub const CHANNEL_BANDWIDTH: f64 = 100.0;

pub const RADIO_IFACE: &str = "usrp_if";
pub const RADIO_IFACE_ADDR: Ipv4Addr = Ipv4Addr::new(192, 168, 40, 1);
pub const RADIO_IFACE_NETMASK: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 0);

pub const TOUR_DESCRIPTION: &str = "\
This profile allows the allocation of resources for over-the-air operation on \
the POWDER platform. Specifically, the profile has options to request the \
allocation of SDR radios in rooftop base-stations.

Map of deployment is here: https://www.powderwireless.net/map

This profile works with the CBRS band (3400 - 3800 MHz) NI/Ettus X310 \
base-station radios in POWDER. The naming scheme for these radios is \
cbrssdr1-<location>, where 'location' is one of the rooftop names shown in the \
above map. Each X310 is paired with a compute node (by default a Dell d740).";

pub fn link_name(index: usize) -> String {
    format!("radio-link-{}", index)
}

pub fn compute_node_name(site: RadioSite) -> String {
    format!("{}-comp", site.id())
}

pub fn radio_node_name(site: RadioSite) -> String {
    format!("{}-x310", site.id())
}

/// Accumulates one request. Owned by the caller and consumed by `build`.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `range` with the fixed channel bandwidth. Duplicates are kept.
    pub fn add_frequency_reservation(&mut self, range: &FrequencyRange) {
        self.request.spectrum.push(SpectrumRequest {
            frequency_low: range.freq_min,
            frequency_high: range.freq_max,
            power: CHANNEL_BANDWIDTH,
        });
    }

    /// Add `<site>-comp` + `<site>-x310` joined by `radio-link-<index>`.
    pub fn add_node_pair(&mut self, index: usize, site: RadioSite, node_type: NodeType) {
        debug!(
            "node pair {}: {} ({}) with {}",
            index,
            site.id(),
            site.label(),
            node_type
        );

        let mut link = Link::new(link_name(index));

        let mut node = Node::raw_pc(compute_node_name(site));
        node.hardware_type = Some(node_type.as_str().to_string());
        node.disk_image = Some(DISK_IMAGE.to_string());

        let idx = node.add_interface(RADIO_IFACE);
        node.interfaces[idx].addresses.push(Ipv4Address {
            address: RADIO_IFACE_ADDR,
            netmask: RADIO_IFACE_NETMASK,
        });
        link.add_interface(&node.interfaces[idx]);

        let mut radio = Node::raw_pc(radio_node_name(site));
        radio.component_id = Some(site.id().to_string());
        link.add_node(&mut radio);

        self.request.nodes.push(node);
        self.request.nodes.push(radio);
        self.request.links.push(link);
    }

    pub fn set_tour(&mut self, description: impl Into<String>) {
        self.request.tour = Some(Tour {
            description: description.into(),
        });
    }

    pub fn build(self) -> Request {
        self.request
    }
}

/// Reservations first, then node pairs, both in input order.
pub fn assemble(params: &ValidatedParams) -> Request {
    let mut builder = RequestBuilder::new();
    builder.set_tour(TOUR_DESCRIPTION);

    for range in params.freq_ranges() {
        builder.add_frequency_reservation(range);
    }
    for (i, radio) in params.radios().iter().enumerate() {
        builder.add_node_pair(i, radio.radio_name, params.nodetype());
    }

    let request = builder.build();
    debug!(
        "assembled {} spectrum reservation(s), {} node(s), {} link(s)",
        request.spectrum.len(),
        request.nodes.len(),
        request.links.len()
    );
    request
}
