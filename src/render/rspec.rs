use crate::request::model::{Interface, Link, Node, Request, SpectrumRequest, Tour};
use std::fmt::Write;

/// Render a GENI RSpec v3 request document.
///
/// The root element is a fixed template; `__BODY__` is replaced with the
/// nodes, links, spectrum reservations and tour, in that order.
pub fn render_request(request: &Request) -> anyhow::Result<String> {
    const TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rspec xmlns="http://www.geni.net/resources/rspec/3" xmlns:emulab="http://www.protogeni.net/resources/rspec/ext/emulab/1" xmlns:client="http://www.protogeni.net/resources/rspec/ext/client/1" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.geni.net/resources/rspec/3 http://www.geni.net/resources/rspec/3/request.xsd" type="request">
__BODY__</rspec>
"#;

    let mut body = String::new();
    for node in &request.nodes {
        write_node(&mut body, node)?;
    }
    for link in &request.links {
        write_link(&mut body, link)?;
    }
    for spectrum in &request.spectrum {
        write_spectrum(&mut body, spectrum)?;
    }
    if let Some(tour) = &request.tour {
        write_tour(&mut body, tour)?;
    }

    Ok(TEMPLATE.replace("__BODY__", &body))
}

fn write_node(out: &mut String, node: &Node) -> std::fmt::Result {
    write!(
        out,
        r#"  <node client_id="{}" exclusive="{}""#,
        escape(&node.client_id),
        node.exclusive
    )?;
    if let Some(component_id) = &node.component_id {
        write!(out, r#" component_id="{}""#, escape(component_id))?;
    }
    out.push_str(">\n");

    match &node.disk_image {
        Some(image) => {
            writeln!(out, r#"    <sliver_type name="{}">"#, node.sliver_type)?;
            writeln!(out, r#"      <disk_image name="{}"/>"#, escape(image))?;
            out.push_str("    </sliver_type>\n");
        }
        None => writeln!(out, r#"    <sliver_type name="{}"/>"#, node.sliver_type)?,
    }
    if let Some(hw) = &node.hardware_type {
        writeln!(out, r#"    <hardware_type name="{}"/>"#, escape(hw))?;
    }
    for iface in &node.interfaces {
        write_interface(out, iface)?;
    }

    out.push_str("  </node>\n");
    Ok(())
}

fn write_interface(out: &mut String, iface: &Interface) -> std::fmt::Result {
    if iface.addresses.is_empty() {
        return writeln!(out, r#"    <interface client_id="{}"/>"#, escape(&iface.client_id));
    }
    writeln!(out, r#"    <interface client_id="{}">"#, escape(&iface.client_id))?;
    for addr in &iface.addresses {
        writeln!(
            out,
            r#"      <ip address="{}" netmask="{}" type="ipv4"/>"#,
            addr.address, addr.netmask
        )?;
    }
    out.push_str("    </interface>\n");
    Ok(())
}

fn write_link(out: &mut String, link: &Link) -> std::fmt::Result {
    writeln!(out, r#"  <link client_id="{}">"#, escape(&link.client_id))?;
    for iref in &link.interface_refs {
        writeln!(out, r#"    <interface_ref client_id="{}"/>"#, escape(iref))?;
    }
    out.push_str("  </link>\n");
    Ok(())
}

fn write_spectrum(out: &mut String, s: &SpectrumRequest) -> std::fmt::Result {
    writeln!(
        out,
        r#"  <emulab:spectrum frequency_low="{}" frequency_high="{}" power="{}"/>"#,
        fmt_num(s.frequency_low),
        fmt_num(s.frequency_high),
        fmt_num(s.power)
    )
}

fn write_tour(out: &mut String, tour: &Tour) -> std::fmt::Result {
    out.push_str(
        "  <rspec_tour xmlns=\"http://www.protogeni.net/resources/rspec/ext/apt-tour/1\">\n",
    );
    writeln!(
        out,
        r#"    <description type="markdown">{}</description>"#,
        escape(&tour.description)
    )?;
    out.push_str("  </rspec_tour>\n");
    Ok(())
}

/// Whole numbers keep one decimal ("3550.0"); others print as-is.
fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{NodeType, RadioSite};
    use crate::request::RequestBuilder;
    use crate::request::model::SpectrumRequest;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_one_pair() {
        let mut builder = RequestBuilder::new();
        builder.add_frequency_reservation(&crate::params::FrequencyRange::new(3550.0, 3560.5));
        builder.add_node_pair(0, RadioSite::Bes, NodeType::D740);
        let xml = render_request(&builder.build()).unwrap();

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<rspec xmlns="http://www.geni.net/resources/rspec/3" xmlns:emulab="http://www.protogeni.net/resources/rspec/ext/emulab/1" xmlns:client="http://www.protogeni.net/resources/rspec/ext/client/1" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.geni.net/resources/rspec/3 http://www.geni.net/resources/rspec/3/request.xsd" type="request">
  <node client_id="cbrssdr1-bes-comp" exclusive="true">
    <sliver_type name="raw-pc">
      <disk_image name="urn:publicid:IDN+emulab.net+image+emulab-ops:UBUNTU18-64-GR38-PACK"/>
    </sliver_type>
    <hardware_type name="d740"/>
    <interface client_id="cbrssdr1-bes-comp:usrp_if">
      <ip address="192.168.40.1" netmask="255.255.255.0" type="ipv4"/>
    </interface>
  </node>
  <node client_id="cbrssdr1-bes-x310" exclusive="true" component_id="cbrssdr1-bes">
    <sliver_type name="raw-pc"/>
    <interface client_id="cbrssdr1-bes-x310:if0"/>
  </node>
  <link client_id="radio-link-0">
    <interface_ref client_id="cbrssdr1-bes-comp:usrp_if"/>
    <interface_ref client_id="cbrssdr1-bes-x310:if0"/>
  </link>
  <emulab:spectrum frequency_low="3550.0" frequency_high="3560.5" power="100.0"/>
</rspec>
"#;
        assert_eq!(xml, expected);
    }

    #[test]
    fn one_element_per_reservation_and_link() {
        let request = Request {
            spectrum: vec![
                SpectrumRequest {
                    frequency_low: 3400.0,
                    frequency_high: 3410.0,
                    power: 100.0,
                };
                3
            ],
            ..Default::default()
        };
        let xml = render_request(&request).unwrap();
        assert_eq!(xml.matches("<emulab:spectrum ").count(), 3);
        assert_eq!(xml.matches("<link ").count(), 0);
    }

    #[test]
    fn tour_text_is_escaped() {
        let mut builder = RequestBuilder::new();
        builder.set_tour("cbrssdr1-<location> & more");
        let xml = render_request(&builder.build()).unwrap();
        assert!(xml.contains(
            r#"<description type="markdown">cbrssdr1-&lt;location&gt; &amp; more</description>"#
        ));
    }

    #[test]
    fn numbers_keep_a_decimal() {
        assert_eq!(fmt_num(3550.0), "3550.0");
        assert_eq!(fmt_num(3550.125), "3550.125");
    }
}
