mod bag;
pub mod getters;

// Reexports
pub use bag::{AttrValue, AttributeBag, Pair};
pub use getters::Lookup;

use serde::{Deserialize, Serialize};

// Known template attribute keys.
pub const CPU: &str = "CPU";
pub const VCPU: &str = "VCPU";
pub const MEMORY: &str = "MEMORY";
pub const DISK: &str = "DISK";
pub const NIC: &str = "NIC";
pub const NIC_ALIAS: &str = "NIC_ALIAS";
pub const VMGROUP: &str = "VMGROUP";

/// Keys mapped to a structured output field.
/// Every other scalar pair of a template is a tag.
pub const STRUCTURAL_KEYS: [&str; 7] = [CPU, VCPU, MEMORY, DISK, NIC, NIC_ALIAS, VMGROUP];

/*
* A virtual machine template as served by the catalog.
* The attribute bag is the raw, semi-structured, template body.
*/
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Template {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub attributes: AttributeBag,
}

impl Template {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            attributes: AttributeBag::default(),
        }
    }
    /// Append an attribute to the template body.
    pub fn with<V: Into<AttrValue>>(mut self, key: &str, value: V) -> Self {
        self.attributes.push(key, value);
        self
    }
}
