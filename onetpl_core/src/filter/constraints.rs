use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

// Error Handling
use bon::Builder;
use log::info;
use onetpl_error::{CastError, ConstraintError, OnetplError, TomlError};

/// Template id meaning "any template".
pub const UNCONSTRAINED_ID: i64 = -1;

/*
* Caller supplied lookup criteria.
* Every field is optional, an unset field never rejects a template.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct ConstraintSet {
    #[builder(default = UNCONSTRAINED_ID)]
    pub id: i64,
    #[builder(into)]
    pub name: Option<String>,

    // Require the field whatever its value.
    #[builder(default)]
    pub has_cpu: bool,
    #[builder(default)]
    pub has_vcpu: bool,
    #[builder(default)]
    pub has_memory: bool,

    pub cpu: Option<f64>,
    pub vcpu: Option<i64>,
    /// Memory in MiB.
    pub memory: Option<i64>,

    /// Must be a subset of the template scalar pairs.
    pub tags: Option<BTreeMap<String, String>>,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            id: UNCONSTRAINED_ID,
            name: None,
            has_cpu: false,
            has_vcpu: false,
            has_memory: false,
            cpu: None,
            vcpu: None,
            memory: None,
            tags: None,
        }
    }
}

impl ConstraintSet {
    /// Identifier to narrow on, if any.
    pub fn id_filter(&self) -> Option<i64> {
        match self.id {
            UNCONSTRAINED_ID => None,
            id => Some(id),
        }
    }
    /*
     * Reject constraints that can never match a sane template.
     * Runs once, when the constraints are accepted, never during matching.
     */
    pub fn validate(&self) -> Result<(), ConstraintError> {
        if self.id < UNCONSTRAINED_ID {
            return Err(ConstraintError::new(
                "id",
                "should be a template id or -1 for any template",
            ));
        }
        if let Some(cpu) = self.cpu {
            if !(cpu > 0.0) {
                return Err(ConstraintError::new(
                    "cpu",
                    "should be strictly greater than 0",
                ));
            }
        }
        if let Some(vcpu) = self.vcpu {
            if vcpu <= 0 {
                return Err(ConstraintError::new(
                    "vcpu",
                    "should be strictly greater than 0",
                ));
            }
        }
        if let Some(memory) = self.memory {
            if memory <= 0 {
                return Err(ConstraintError::new(
                    "memory",
                    "should be strictly greater than 0",
                ));
            }
        }
        Ok(())
    }
    pub fn from_file(path: &str) -> Result<Self, OnetplError> {
        info!("Load query file {:#?}.", path);
        let string = fs::read_to_string(path)?;
        Self::from_toml(&string)
    }
    pub fn from_toml(string: &str) -> Result<Self, OnetplError> {
        let res = toml::from_str::<Self>(string);
        let item = match res {
            Ok(res) => res,
            Err(e) => {
                let err = CastError::TomlError(TomlError::new(e, string));
                return Err(err.into());
            }
        };
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Error Handling
    use miette::Result;

    #[test]
    fn default_is_unconstrained() {
        let constraints = ConstraintSet::builder().build();
        assert_eq!(constraints, ConstraintSet::default());
        assert_eq!(constraints.id_filter(), None);
        assert!(constraints.validate().is_ok());
    }

    #[test]
    fn zero_targets_are_rejected() {
        let res = ConstraintSet::builder().cpu(0.0).build().validate();
        assert_eq!(
            res.map_err(|e| e.to_string()),
            Err("cpu should be strictly greater than 0".to_owned())
        );
        assert!(ConstraintSet::builder().vcpu(0).build().validate().is_err());
        assert!(ConstraintSet::builder().memory(-5).build().validate().is_err());
        assert!(ConstraintSet::builder().id(-3).build().validate().is_err());
        assert!(ConstraintSet::builder().memory(1).build().validate().is_ok());
    }

    #[test]
    fn load_query_from_toml() -> Result<()> {
        let string = r#"
            name = "web"
            has_memory = true
            vcpu = 2

            [tags]
            env = "prod"
        "#;
        let constraints = ConstraintSet::from_toml(string)?;
        assert_eq!(
            constraints,
            ConstraintSet::builder()
                .name("web")
                .has_memory(true)
                .vcpu(2)
                .tags(BTreeMap::from([("env".to_owned(), "prod".to_owned())]))
                .build()
        );
        assert_eq!(constraints.id, UNCONSTRAINED_ID);
        Ok(())
    }

    #[test]
    fn bad_query_file_is_reported() {
        assert!(ConstraintSet::from_toml("vcpu = \"two\"").is_err());
    }
}
