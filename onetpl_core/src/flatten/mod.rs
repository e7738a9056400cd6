/*
* Project a resolved template into a fixed shape output.
*
* Each part of the output is computed on its own from the template body,
* and the parts are assembled once every one of them succeeded.
*/
mod disk;
mod nic;
mod vmgroup;

// Reexports
pub use disk::{flatten_disks, DiskOutput};
pub use nic::{flatten_nic_aliases, flatten_nics, NicAliasOutput, NicOutput};
pub use vmgroup::{flatten_vmgroup, VmGroupRef};

use crate::template::{AttributeBag, Template, STRUCTURAL_KEYS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Error Handling
use log::debug;
use onetpl_error::{FieldError, ProjectionError};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TemplateOutput {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcpu: Option<i64>,
    // Memory in MiB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
    #[serde(default)]
    pub disk: Vec<DiskOutput>,
    #[serde(default)]
    pub nic: Vec<NicOutput>,
    #[serde(default)]
    pub nic_alias: Vec<NicAliasOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vmgroup: Option<VmGroupRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

/*
* Every scalar pair not mapped to a structured field.
* Pairs also used as filter constraints are kept.
* A repeated key keeps its first value, the one tag constraints match on.
*/
pub fn flatten_tags(bag: &AttributeBag) -> Option<BTreeMap<String, String>> {
    let mut tags: BTreeMap<String, String> = BTreeMap::new();
    for (k, v) in bag.scalars().filter(|(k, _)| !STRUCTURAL_KEYS.contains(k)) {
        tags.entry(k.to_owned()).or_insert(v);
    }
    match tags.is_empty() {
        true => None,
        false => Some(tags),
    }
}

impl Template {
    /**
    Flatten the template body into the output shape.
    Fails on the first nested block that can't be projected.
    */
    pub fn flatten(&self) -> Result<TemplateOutput, ProjectionError> {
        let bag = &self.attributes;
        let fail = |msg: &str| {
            let id = self.id;
            let msg = msg.to_owned();
            move |origin: FieldError| {
                ProjectionError::builder()
                    .msg(&msg)
                    .template_id(id)
                    .origin(origin)
                    .build()
            }
        };

        let disk = flatten_disks(bag).map_err(fail("failed to flatten disks"))?;
        let nic = flatten_nics(bag).map_err(fail("failed to flatten NICs"))?;
        let nic_alias = flatten_nic_aliases(bag).map_err(fail("failed to flatten NIC aliases"))?;
        let vmgroup = flatten_vmgroup(bag).map_err(fail("failed to flatten VM groups"))?;

        let output = TemplateOutput {
            id: self.id,
            name: self.name.to_owned(),
            cpu: bag.get_cpu().found(),
            vcpu: bag.get_vcpu().found(),
            memory: bag.get_memory().found(),
            disk,
            nic,
            nic_alias,
            vmgroup,
            tags: flatten_tags(bag),
        };
        debug!("Flattened template {} ({:?}).", output.id, output.name);
        Ok(output)
    }
}
