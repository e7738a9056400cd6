/*
* Hand flattened templates over to the caller, as toml, json or a table.
*/
pub mod toml;

pub use self::toml::{to_toml, to_toml_list};

use crate::flatten::TemplateOutput;

use bat::PrettyPrinter;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

// Error Handling
use onetpl_error::OnetplError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Format {
    #[default]
    Table,
    Toml,
    Json,
}

pub fn to_json(output: &TemplateOutput) -> Result<String, OnetplError> {
    let res = serde_json::to_string_pretty(output)?;
    Ok(res)
}
pub fn to_json_list(outputs: &[TemplateOutput]) -> Result<String, OnetplError> {
    let res = serde_json::to_string_pretty(outputs)?;
    Ok(res)
}

/// Syntax highlighted print of a serialized output.
fn print(string: &str, language: &str) -> Result<(), OnetplError> {
    PrettyPrinter::new()
        .input_from_bytes(string.as_bytes())
        .language(language)
        .print()?;
    println!();
    Ok(())
}

impl TemplateOutput {
    pub fn print(&self, format: Format) -> Result<(), OnetplError> {
        match format {
            Format::Table => TemplateOutput::display(std::slice::from_ref(self))?,
            Format::Toml => print(&to_toml(self)?, "toml")?,
            Format::Json => print(&to_json(self)?, "json")?,
        };
        Ok(())
    }
    pub fn print_list(items: &[Self], format: Format) -> Result<(), OnetplError> {
        match format {
            Format::Table => TemplateOutput::display(items)?,
            Format::Toml => print(&to_toml_list(items)?, "toml")?,
            Format::Json => print(&to_json_list(items)?, "json")?,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Template;
    use pretty_assertions::assert_eq;

    // Error Handling
    use miette::{IntoDiagnostic, Result};

    #[test]
    fn json_keeps_output_shape() -> Result<()> {
        let output = Template::new(2, "db").with("CPU", "0.5").flatten()?;
        let string = to_json(&output)?;
        let back: TemplateOutput = serde_json::from_str(&string).into_diagnostic()?;
        assert_eq!(back, output);
        Ok(())
    }
}
