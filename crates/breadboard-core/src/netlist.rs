//! The electrical netlist data model.
//!
//! A netlist describes a circuit as a flat list of [`Component`]s and the
//! [`Net`]s (electrically common points) connecting their pins. It is the
//! externally supplied, immutable input of the rendering pipeline and maps
//! directly onto the JSON shape produced by upstream tooling:
//!
//! ```json
//! { "components": [{ "id": "R1", "type": "resistor", "value": "1k",
//!                    "pins": { "1": "N1", "2": "N2" } }],
//!   "nets":       [{ "id": "N1", "nodes": ["R1.1", "V1.positive"] }] }
//! ```
//!
//! Pin declaration order is significant for port placement, so the pin map
//! is an [`IndexMap`] rather than a hash map.

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// The component type tag that marks ground references.
///
/// Ground components are never rendered as component boxes; the graph
/// builder expands them into one ground stub per connection.
pub const GROUND_TYPE: &str = "ground";

/// A complete netlist: components plus the nets connecting their pins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Netlist {
    /// All components of the circuit.
    pub components: Vec<Component>,

    /// All nets of the circuit.
    pub nets: Vec<Net>,
}

impl Netlist {
    /// Looks up a component by id.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|component| component.id == id)
    }
}

/// A single circuit component with its pin-to-net assignments.
#[derive(Debug, Clone, Deserialize)]
pub struct Component {
    /// Unique component identifier, e.g. `"R1"`.
    pub id: String,

    /// Component type tag, e.g. `"resistor"` or `"ground"`.
    #[serde(rename = "type")]
    pub type_tag: String,

    /// Display value, e.g. `"10k"`. May be empty.
    #[serde(default)]
    pub value: String,

    /// Pin name to net id, in declaration order.
    #[serde(default)]
    pub pins: IndexMap<String, String>,
}

impl Component {
    /// Returns true if this component is a ground reference.
    pub fn is_ground(&self) -> bool {
        self.type_tag == GROUND_TYPE
    }

    /// Returns true if the component declares the given pin.
    pub fn has_pin(&self, pin: &str) -> bool {
        self.pins.contains_key(pin)
    }
}

/// A net: a set of pin endpoints that are electrically equivalent.
#[derive(Debug, Clone, Deserialize)]
pub struct Net {
    /// Unique net identifier, e.g. `"N1"`.
    pub id: String,

    /// Endpoint references in `"componentId.pinName"` form.
    pub nodes: Vec<String>,
}

/// Error raised when an endpoint reference string cannot be split into a
/// component id and a pin name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed endpoint reference {reference:?}: expected \"componentId.pinName\"")]
pub struct EndpointParseError {
    /// The offending reference string.
    pub reference: String,
}

/// A parsed endpoint reference, borrowing from the raw `"comp.pin"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinRef<'a> {
    /// The referenced component id.
    pub component: &'a str,

    /// The referenced pin name.
    pub pin: &'a str,
}

impl<'a> PinRef<'a> {
    /// Parses a `"componentId.pinName"` endpoint reference.
    ///
    /// The split happens at the first `'.'`, matching how upstream tooling
    /// writes references. Pin names may themselves contain dots.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointParseError`] when the reference contains no `'.'`
    /// or either side of the split is empty.
    pub fn parse(reference: &'a str) -> Result<Self, EndpointParseError> {
        match reference.split_once('.') {
            Some((component, pin)) if !component.is_empty() && !pin.is_empty() => {
                Ok(Self { component, pin })
            }
            _ => Err(EndpointParseError {
                reference: reference.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_netlist() -> Netlist {
        serde_json::from_str(
            r#"{
                "components": [
                    { "id": "R1", "type": "resistor", "value": "10k",
                      "pins": { "1": "N1", "2": "N2" } },
                    { "id": "GND", "type": "ground", "value": "",
                      "pins": { "p": "N2" } }
                ],
                "nets": [
                    { "id": "N1", "nodes": ["R1.1"] },
                    { "id": "N2", "nodes": ["R1.2", "GND.p"] }
                ]
            }"#,
        )
        .expect("sample netlist should deserialize")
    }

    #[test]
    fn test_deserialize_and_lookup() {
        let netlist = sample_netlist();

        assert_eq!(netlist.components.len(), 2);
        assert_eq!(netlist.nets.len(), 2);

        let r1 = netlist.component("R1").expect("R1 should exist");
        assert_eq!(r1.type_tag, "resistor");
        assert_eq!(r1.value, "10k");
        assert!(r1.has_pin("1"));
        assert!(!r1.has_pin("3"));
        assert!(!r1.is_ground());

        assert!(netlist.component("GND").is_some_and(Component::is_ground));
        assert!(netlist.component("missing").is_none());
    }

    #[test]
    fn test_pin_order_is_preserved() {
        let component: Component = serde_json::from_str(
            r#"{ "id": "U1", "type": "voltage", "value": "5V",
                 "pins": { "positive": "N1", "negative": "N2", "sense": "N3" } }"#,
        )
        .expect("component should deserialize");

        let pins: Vec<&str> = component.pins.keys().map(String::as_str).collect();
        assert_eq!(pins, ["positive", "negative", "sense"]);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        // A netlist without "nets" is malformed input, not an empty circuit.
        let result: Result<Netlist, _> = serde_json::from_str(r#"{ "components": [] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_pin_ref_parse() {
        let reference = PinRef::parse("R1.1").expect("valid reference");
        assert_eq!(reference.component, "R1");
        assert_eq!(reference.pin, "1");

        // Split happens at the first dot; the remainder is the pin name.
        let nested = PinRef::parse("U1.out.a").expect("valid reference");
        assert_eq!(nested.component, "U1");
        assert_eq!(nested.pin, "out.a");
    }

    #[test]
    fn test_pin_ref_parse_rejects_malformed() {
        assert!(PinRef::parse("R1").is_err());
        assert!(PinRef::parse(".1").is_err());
        assert!(PinRef::parse("R1.").is_err());
        assert!(PinRef::parse("").is_err());
    }
}
