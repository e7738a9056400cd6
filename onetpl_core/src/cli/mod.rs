mod types;
pub mod utils;
pub use types::*;

use crate::config::OnetplConfig;
use crate::filter::ConstraintSet;
use crate::flatten::TemplateOutput;
use crate::query;

use clap::Parser;

// Error Handling
use log::trace;
use miette::Result;
use onetpl_error::OnetplError;

impl ConstraintArgs {
    /// Command line flags layered over the query file, if any.
    pub fn to_constraints(&self) -> Result<ConstraintSet, OnetplError> {
        let res = match &self.query {
            Some(path) => self.apply(ConstraintSet::from_file(path)?),
            None => ConstraintSet::from(self),
        };
        trace!("{:#?}", res);
        Ok(res)
    }
}

impl Cli {
    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        utils::set_logger(&cli)?;
        Self::switch(cli)?;
        Ok(())
    }
    pub fn switch(cli: Cli) -> Result<(), OnetplError> {
        let config = OnetplConfig::get()?;
        let catalog = config.get_catalog(cli.catalog.as_deref())?;

        match cli.commands {
            /*
             * Operations on templates
             */
            Commands::Template(args) => match args {
                TemplateArgs::Get(args) => {
                    let constraints = args.constraints.to_constraints()?;
                    let res = query::lookup(&catalog, &constraints)?;
                    res.print(args.format)?;
                }
                TemplateArgs::Ls(args) => {
                    let constraints = args.constraints.to_constraints()?;
                    let res = query::list(&catalog, &constraints, args.sort_on, args.order)?;
                    TemplateOutput::print_list(&res, args.format)?;
                }
            },
        }
        Ok(())
    }
}
