use crate::cli::Cli;

// Logger
use env_logger::Builder;

// Error handling
use onetpl_error::OnetplError;

/// Build logger
pub fn set_logger(cli: &Cli) -> Result<(), OnetplError> {
    // Set verbosity
    let verbosity: log::LevelFilter = cli.verbose.log_level_filter();
    let filter = verbosity.to_string().to_lowercase();
    std::env::set_var("ONETPL_LOG", filter);
    Builder::from_env("ONETPL_LOG").init();
    Ok(())
}
