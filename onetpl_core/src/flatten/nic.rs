use crate::template::{AttributeBag, Lookup, NIC, NIC_ALIAS};
use serde::{Deserialize, Serialize};

// Error Handling
use onetpl_error::FieldError;

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NicOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    // PCI passthrough
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtio_queues: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub security_groups: Vec<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NicAliasOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    // Name of the aliased NIC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub security_groups: Vec<i64>,
}

/*
* Security groups are stored as a comma separated list of ids: "0,102".
*/
fn security_groups(bag: &AttributeBag) -> Result<Vec<i64>, FieldError> {
    let key = "SECURITY_GROUPS";
    let raw = match bag.get_str(key) {
        Lookup::Found(raw) => raw,
        Lookup::Missing => return Ok(vec![]),
        Lookup::Malformed(e) => return Err(e),
    };
    let res = raw
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|e| {
            e.parse::<i64>()
                .map_err(|_| FieldError::new(key, &raw, "comma separated id list"))
        })
        .collect::<Result<Vec<i64>, FieldError>>()?;
    Ok(res)
}

impl TryFrom<&AttributeBag> for NicOutput {
    type Error = FieldError;
    fn try_from(e: &AttributeBag) -> Result<Self, Self::Error> {
        Ok(Self {
            network_id: e.get_int("NETWORK_ID").optional()?,
            network: e.get_str("NETWORK").optional()?,
            ip: e.get_str("IP").optional()?,
            mac: e.get_str("MAC").optional()?,
            model: e.get_str("MODEL").optional()?,
            physical_device: e.get_str("PCI_ID").optional()?,
            virtio_queues: e.get_str("VIRTIO_QUEUES").optional()?,
            security_groups: security_groups(e)?,
        })
    }
}

impl TryFrom<&AttributeBag> for NicAliasOutput {
    type Error = FieldError;
    fn try_from(e: &AttributeBag) -> Result<Self, Self::Error> {
        Ok(Self {
            name: e.get_str("NAME").optional()?,
            parent: e.get_str("PARENT").optional()?,
            network_id: e.get_int("NETWORK_ID").optional()?,
            network: e.get_str("NETWORK").optional()?,
            ip: e.get_str("IP").optional()?,
            mac: e.get_str("MAC").optional()?,
            security_groups: security_groups(e)?,
        })
    }
}

/// Every NIC block of the template, in order.
pub fn flatten_nics(bag: &AttributeBag) -> Result<Vec<NicOutput>, FieldError> {
    bag.try_blocks(NIC)?
        .into_iter()
        .map(NicOutput::try_from)
        .collect()
}

/// Every NIC_ALIAS block of the template, in order.
pub fn flatten_nic_aliases(bag: &AttributeBag) -> Result<Vec<NicAliasOutput>, FieldError> {
    bag.try_blocks(NIC_ALIAS)?
        .into_iter()
        .map(NicAliasOutput::try_from)
        .collect()
}
