use super::OnetplConfig;
// Global vars
use super::CONFIG_DIR;

// Config
use std::fs;
use std::path::{Path, PathBuf};

// Error Handling
use log::info;
use onetpl_error::{CastError, OnetplError, TomlError};

impl OnetplConfig {
    /*
     * Get config from crate directory
     */
    fn debug_path() -> PathBuf {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("onetpl.config.toml");
        path
    }
    /*
     * Get config from FHS path.
     */
    fn release_path() -> PathBuf {
        let mut path = PathBuf::from(CONFIG_DIR);
        path.push("config.toml");
        path
    }
    /// Load the configuration file, or defaults when there is none.
    pub fn get() -> Result<Self, OnetplError> {
        info!("Search config file.");

        #[cfg(debug_assertions)]
        let path = Self::debug_path();

        #[cfg(not(debug_assertions))]
        let path = Self::release_path();

        if !path.exists() {
            info!("No config file at {:#?}, using defaults.", path);
            return Ok(Self::default());
        }
        let path = path.display().to_string();
        Self::from_file(&path)
    }
    pub fn from_file(path: &str) -> Result<Self, OnetplError> {
        let string = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&string)?;
        config.origin = Path::new(path).parent().map(|e| e.to_path_buf());
        Ok(config)
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
