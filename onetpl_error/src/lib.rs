use bon::bon;
use miette::Diagnostic;
pub use pipelight_error::{CastError, TomlError};

use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum OnetplError {
    ////////////////////////////////
    // Lib native errors
    #[error(transparent)]
    #[diagnostic(transparent)]
    LibError(#[from] LibError),

    ////////////////////////////////
    // Template resolution
    #[error(transparent)]
    #[diagnostic(transparent)]
    MatchError(#[from] MatchError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ProjectionError(#[from] ProjectionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConstraintError(#[from] ConstraintError),

    ////////////////////////////////
    // Type convertion
    #[error(transparent)]
    #[diagnostic(code(serde::error))]
    SerdeError(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(onetpl::bat::error))]
    BatError(#[from] bat::error::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CastError(#[from] CastError),

    #[error(transparent)]
    #[diagnostic(code(onetpl::io::error))]
    IoError(#[from] std::io::Error),
}

/**
The cardinality check failed after filtering and identifier narrowing.
*/
#[derive(Debug, Error, Diagnostic)]
pub enum MatchError {
    #[error("no templates match the constraints")]
    #[diagnostic(
        code(onetpl::filter::no_match),
        help("Relax the constraints or check the catalog content.")
    )]
    NoMatch,

    #[error("several templates match the constraints")]
    #[diagnostic(code(onetpl::filter::ambiguous_match))]
    AmbiguousMatch {
        ids: Vec<i64>,
        #[help]
        help: String,
    },
}
impl MatchError {
    pub fn ambiguous(ids: Vec<i64>) -> Self {
        let list = ids
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join(",");
        let help = format!("Matching template ids are:\n[{list}]\nAdd an id or a name constraint.");
        MatchError::AmbiguousMatch { ids, help }
    }
}

/**
A template attribute holding a value of an unexpected type.
*/
#[derive(Debug, Error, Diagnostic, Clone, PartialEq)]
#[error("attribute {key} = {raw:?} is not a valid {expected}")]
#[diagnostic(code(onetpl::field::error))]
pub struct FieldError {
    pub key: String,
    pub raw: String,
    pub expected: String,
}
impl FieldError {
    pub fn new(key: &str, raw: &str, expected: &str) -> Self {
        Self {
            key: key.to_owned(),
            raw: raw.to_owned(),
            expected: expected.to_owned(),
        }
    }
}

/**
A nested block of the matched template couldn't be flattened.
Carries the owning template identifier and the field level cause.
*/
#[derive(Debug, Error, Diagnostic)]
#[error("{} (template id: {})", message, template_id)]
#[diagnostic(code(onetpl::projection::error))]
pub struct ProjectionError {
    pub message: String,
    pub template_id: i64,
    #[source]
    pub origin: FieldError,
    #[help]
    pub help: String,
}
#[bon]
impl ProjectionError {
    #[builder]
    pub fn new(msg: &str, template_id: i64, origin: FieldError) -> Self {
        let help = format!(
            "Fix the {} attribute of template {} in the catalog.",
            origin.key, template_id
        );
        Self {
            message: msg.to_owned(),
            template_id,
            origin,
            help,
        }
    }
}

/**
A caller supplied constraint rejected before matching.
*/
#[derive(Debug, Error, Diagnostic)]
#[error("{field} {message}")]
#[diagnostic(code(onetpl::constraint::error))]
pub struct ConstraintError {
    pub field: String,
    pub message: String,
}
impl ConstraintError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_owned(),
            message: message.to_owned(),
        }
    }
}

/**
A root cause error with no inner origin
*/
#[derive(Debug, Error, Diagnostic)]
#[error("{}", message)]
#[diagnostic(code(onetpl::lib::error))]
pub struct LibError {
    pub message: String,
    #[help]
    pub help: String,
}
#[bon]
impl LibError {
    #[builder]
    pub fn new(msg: &str, help: &str) -> Self {
        Self {
            message: msg.to_owned(),
            help: help.to_owned(),
        }
    }
}
