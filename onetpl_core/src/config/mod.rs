pub mod load;

use crate::catalog::FileCatalog;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Error Handling
use log::debug;
use onetpl_error::{LibError, OnetplError};

pub const CONFIG_DIR: &str = "/etc/onetpl";

/*
* The onetpl cli configuration struct.
*/
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct OnetplConfig {
    /// Path to the default template catalog.
    /// Relative paths are resolved from the configuration file directory.
    pub catalog: Option<String>,

    // Directory of the loaded configuration file.
    #[serde(skip)]
    origin: Option<PathBuf>,
}

impl OnetplConfig {
    /*
     * Returns the catalog to query.
     * A command line path wins over the configured one.
     */
    pub fn get_catalog(&self, path: Option<&str>) -> Result<FileCatalog, OnetplError> {
        if let Some(path) = path {
            return Ok(FileCatalog::new(path));
        }
        match &self.catalog {
            Some(catalog) => {
                let mut full = match &self.origin {
                    Some(dir) => dir.to_owned(),
                    None => PathBuf::new(),
                };
                full.push(Path::new(catalog));
                let full = full.display().to_string();
                debug!("Use configured catalog {:#?}.", full);
                Ok(FileCatalog::new(&full))
            }
            None => {
                let message = "No template catalog to query.";
                let help = "Pass a file with --catalog or set `catalog` in the configuration.";
                Err(LibError::builder().msg(message).help(help).build().into())
            }
        }
    }
}
