//! # Error Types
//!
//! Errors raised while loading a schema document or navigating it.
//!
//! Validation failures are *not* errors: they are data, collected in a
//! [`crate::ValidationReport`]. A `SchemaError` means the schema itself (or a
//! request made against it) is unusable.
//!
//! Every load error carries the JSON-pointer location inside the schema
//! document where the problem was found, e.g. `#/$defs/CameraConfig/properties/fps`.

use thiserror::Error;

/// Error while parsing or navigating a schema document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// `type` names something outside the supported schema language.
    #[error("unknown schema type '{type_name}' at {location}")]
    UnknownType {
        /// Location of the offending node.
        location: String,
        /// The type name that was found.
        type_name: String,
    },

    /// A keyword holds a value of the wrong shape.
    #[error("invalid '{keyword}' at {location}: {reason}")]
    InvalidKeyword {
        /// Location of the offending node.
        location: String,
        /// The keyword, e.g. `minLength`.
        keyword: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A `pattern` keyword is not a valid regular expression.
    #[error("invalid pattern at {location}: {source}")]
    InvalidPattern {
        /// Location of the offending node.
        location: String,
        /// The regex compiler's complaint.
        #[source]
        source: regex::Error,
    },

    /// The node uses a schema construct this engine does not model.
    #[error("unsupported schema at {location}: {reason}")]
    Unsupported {
        /// Location of the offending node.
        location: String,
        /// What is not supported.
        reason: String,
    },

    /// No schema node governs the requested configuration path.
    #[error("no schema governs config path '{0}'")]
    PathNotInSchema(String),

    /// The configuration path is governed by a schema that does not hold
    /// dynamically-keyed entries.
    #[error("schema at config path '{path}' is a {found} node, not a dictionary")]
    NotADictionary {
        /// The configuration path that was looked up.
        path: String,
        /// Kind tag of the node that was found instead.
        found: &'static str,
    },
}
