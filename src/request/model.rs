//! Request object model: what the RSpec emitter serializes.
//!
//! Names follow the RSpec vocabulary: every node, interface and link carries a
//! `client_id` unique within the request.

use serde::Serialize;
use std::net::Ipv4Addr;

/// Sliver type of bare-metal nodes. Both compute nodes and X310s are raw PCs
/// from the platform's point of view.
pub const RAW_PC: &str = "raw-pc";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Request {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub spectrum: Vec<SpectrumRequest>,
    pub tour: Option<Tour>,
}

impl Request {
    pub fn node(&self, client_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.client_id == client_id)
    }

    pub fn link(&self, client_id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.client_id == client_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub client_id: String,
    pub sliver_type: &'static str,
    pub exclusive: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_image: Option<String>,

    pub interfaces: Vec<Interface>,
}

impl Node {
    pub fn raw_pc(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            sliver_type: RAW_PC,
            exclusive: true,
            component_id: None,
            hardware_type: None,
            disk_image: None,
            interfaces: Vec::new(),
        }
    }

    /// Add an interface named `<node>:<name>` and return its index.
    pub fn add_interface(&mut self, name: &str) -> usize {
        self.interfaces.push(Interface {
            client_id: format!("{}:{}", self.client_id, name),
            addresses: Vec::new(),
        });
        self.interfaces.len() - 1
    }

    /// Next auto-generated interface name (`if0`, `if1`, ...).
    pub fn next_interface_name(&self) -> String {
        format!("if{}", self.interfaces.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interface {
    pub client_id: String,
    pub addresses: Vec<Ipv4Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ipv4Address {
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub client_id: String,
    /// Client ids of the attached interfaces, in attach order.
    pub interface_refs: Vec<String>,
}

impl Link {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            interface_refs: Vec::new(),
        }
    }

    pub fn add_interface(&mut self, iface: &Interface) {
        self.interface_refs.push(iface.client_id.clone());
    }

    /// Attach `node` through a fresh auto-named interface.
    pub fn add_node(&mut self, node: &mut Node) {
        let name = node.next_interface_name();
        let idx = node.add_interface(&name);
        self.add_interface(&node.interfaces[idx]);
    }
}

/// Exclusive use of a band for the experiment's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrumRequest {
    pub frequency_low: f64,
    pub frequency_high: f64,
    pub power: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    pub description: String,
}
