use crate::value::ValueKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers.
///
/// Shape mismatches while decoding a JSON tree are not errors: those nodes are
/// dropped. Only accessor misuse and malformed URIs or templates end up here.
#[derive(Debug, Error)]
pub enum Error {
    /// A `Value` was read through the accessor of a different variant.
    #[error("expected a {expected} value, found {found}")]
    TypeMismatch { expected: ValueKind, found: ValueKind },

    #[error("invalid URI template \"{template}\": {source}")]
    TemplateSyntax {
        template: String,
        #[source]
        source: iri_string::template::Error,
    },

    #[error("invalid URI \"{uri}\": {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: iri_string::validate::Error,
    },

    /// The template engine rejected the supplied bindings, e.g. a prefix
    /// modifier applied to a list or map.
    #[error("cannot expand URI template \"{template}\": {source}")]
    Expansion {
        template: String,
        #[source]
        source: iri_string::template::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn type_mismatch(expected: ValueKind, found: ValueKind) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::TypeMismatch { .. } => "type-mismatch",
            Error::TemplateSyntax { .. } => "template-syntax-error",
            Error::InvalidUri { .. } => "invalid-uri",
            Error::Expansion { .. } => "template-expansion-error",
            Error::Json(_) => "json-syntax-error",
        }
    }
}
