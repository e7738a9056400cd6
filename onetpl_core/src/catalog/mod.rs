/*
* Sources of template catalogs.
* The catalog is listed once, before any filtering happens.
*/
use crate::template::Template;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// Error Handling
use log::{debug, info};
use onetpl_error::{CastError, LibError, OnetplError, TomlError};

pub trait CatalogProvider {
    /// Every template of the catalog. Any error is fatal to the query.
    fn list_templates(&self) -> Result<Vec<Template>, OnetplError>;
}

/// The catalog file layout: a list of `[[template]]` tables.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub template: Vec<Template>,
}

impl Catalog {
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
    pub fn from_json(string: &str) -> Result<Self, OnetplError> {
        let item = serde_json::from_str::<Self>(string)?;
        Ok(item)
    }
}

/*
* A catalog stored in a toml or json file.
* The format is guessed from the file extension, toml being the default.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCatalog {
    pub path: String,
}

impl FileCatalog {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_owned(),
        }
    }
}

impl CatalogProvider for FileCatalog {
    fn list_templates(&self) -> Result<Vec<Template>, OnetplError> {
        let path = Path::new(&self.path);
        if !path.exists() {
            let message = format!("Couldn't find catalog file {:#?}", self.path);
            let help = "Pass an existing file with --catalog or set `catalog` in the configuration.";
            return Err(LibError::builder().msg(&message).help(help).build().into());
        }
        info!("Load template catalog {:#?}.", self.path);
        let string = fs::read_to_string(path)?;

        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Catalog::from_json(&string)?,
            _ => Catalog::from_toml(&string)?,
        };
        debug!("Found {} templates.", catalog.template.len());
        Ok(catalog.template)
    }
}

/// An in memory catalog.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StaticCatalog {
    pub templates: Vec<Template>,
}

impl StaticCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_templates(&self) -> Result<Vec<Template>, OnetplError> {
        Ok(self.templates.clone())
    }
}
