use crate::flatten::TemplateOutput;
use serde::Serialize;

// Error Handling
use onetpl_error::CastError;

/// Toml has no top level arrays: listings go under `[[template]]`.
#[derive(Debug, Serialize)]
struct Listing<'a> {
    template: &'a [TemplateOutput],
}

/**
* Returns a toml string from a flattened template
*/
pub fn to_toml(output: &TemplateOutput) -> Result<String, CastError> {
    let res = toml::to_string(output)?;
    Ok(res)
}
/**
* Returns a toml string from a list of flattened templates
*/
pub fn to_toml_list(outputs: &[TemplateOutput]) -> Result<String, CastError> {
    let res = toml::to_string(&Listing { template: outputs })?;
    Ok(res)
}
