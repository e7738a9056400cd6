use crate::template::{AttributeBag, DISK};
use serde::{Deserialize, Serialize};

// Error Handling
use onetpl_error::FieldError;

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DiskOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<i64>,
    // Size in MiB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    // Volatile disks only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatile_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatile_format: Option<String>,
}

impl TryFrom<&AttributeBag> for DiskOutput {
    type Error = FieldError;
    fn try_from(e: &AttributeBag) -> Result<Self, Self::Error> {
        Ok(Self {
            image_id: e.get_int("IMAGE_ID").optional()?,
            size: e.get_int("SIZE").optional()?,
            target: e.get_str("TARGET").optional()?,
            driver: e.get_str("DRIVER").optional()?,
            volatile_type: e.get_str("TYPE").optional()?,
            volatile_format: e.get_str("FORMAT").optional()?,
        })
    }
}

/// Every DISK block of the template, in order.
pub fn flatten_disks(bag: &AttributeBag) -> Result<Vec<DiskOutput>, FieldError> {
    bag.try_blocks(DISK)?
        .into_iter()
        .map(DiskOutput::try_from)
        .collect()
}
