use thiserror::Error;

/// Failure translating between [`tagfmt::Value`] and the object model
/// (spec error kinds `MARSHAL` / `UNMARSHAL_MODEL`).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ProtocolError {
    /// A map's type header did not match the class tag expected for
    /// the entity being decoded.
    #[error("expected class tag '{expected}', found '{found}'")]
    WrongClassTag { expected: String, found: String },

    /// A value that should have been a map (the value carries a
    /// class tag) was some other TagFmt shape.
    #[error("expected a typed map for '{expected}', found a different value shape")]
    NotAMap { expected: String },

    /// A required key was missing from a decoded map.
    #[error("missing required key '{key}' in '{class_tag}'")]
    MissingKey { class_tag: String, key: String },

    /// A key was present but held a value of the wrong TagFmt type.
    #[error("key '{key}' in '{class_tag}' has the wrong wire type")]
    WrongType { class_tag: String, key: String },

    /// A `decision`/`fulfillOn` integer did not map to a known enum
    /// variant.
    #[error("invalid decision/fulfillOn value {0}")]
    InvalidDecision(i32),
}
