use crate::template::{AttributeBag, VMGROUP};
use serde::{Deserialize, Serialize};

// Error Handling
use log::warn;
use onetpl_error::FieldError;

/// The VM group (and role in it) a vm created from the template joins.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VmGroupRef {
    pub vmgroup_id: i64,
    pub role: String,
}

impl TryFrom<&AttributeBag> for VmGroupRef {
    type Error = FieldError;
    fn try_from(e: &AttributeBag) -> Result<Self, Self::Error> {
        Ok(Self {
            vmgroup_id: e.get_int("VMGROUP_ID").required("VMGROUP_ID", "integer")?,
            role: e.get_str("ROLE").required("ROLE", "string")?,
        })
    }
}

/*
* A template references at most one vm group.
* Extra VMGROUP blocks are an upstream defect: only the first one is used.
*/
pub fn flatten_vmgroup(bag: &AttributeBag) -> Result<Option<VmGroupRef>, FieldError> {
    let blocks = bag.try_blocks(VMGROUP)?;
    let first = match blocks.first() {
        Some(first) => *first,
        None => return Ok(None),
    };
    if blocks.len() > 1 {
        warn!(
            "template defines {} VMGROUP blocks, only the first one is used.",
            blocks.len()
        );
    }
    Ok(Some(VmGroupRef::try_from(first)?))
}
