use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("`nodes` must be an array, found {0}")]
    NodesNotArray(&'static str),

    #[error("node #{index} must be an object, found {found}")]
    NodeNotObject { index: usize, found: &'static str },

    #[error("`settings` must be an object, found {0}")]
    SettingsNotObject(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// JSON type name used in shape errors
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
