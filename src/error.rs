use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A `KEY=VALUE` token without a `=` separator.
    #[error("not a key/value pair: '{0}'")]
    MalformedProperty(String),

    #[error("expected {expected} for {key}; got '{value}'")]
    TypeConversion {
        key: String,
        expected: &'static str,
        value: String,
    },

    #[error("type '{0}' unrecognized")]
    UnsupportedType(String),

    /// Caller asked for a scalar from a list-valued property, or vice versa.
    #[error("wrong type specified for {key}: expected {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("[QUAL] does not contain a number: '{0}'")]
    InvalidQuality(String),

    #[error("got {keys} keys but {values} values")]
    ArityMismatch { keys: usize, values: usize },

    #[error("duplicate key {0}")]
    DuplicateKey(String),

    #[error("value for {key} contains a line break")]
    InvalidValue { key: String },

    #[error("allele index {index} out of range for {len} alleles")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("missing mandatory property {0}")]
    MissingProperty(&'static str),

    #[error("malformed line: {0}")]
    MalformedLine(String),
}

impl Error {
    pub(crate) fn conversion(key: &str, expected: &'static str, value: &str) -> Self {
        Error::TypeConversion {
            key: key.to_owned(),
            expected,
            value: value.to_owned(),
        }
    }
}
