//! Structured error types for rowkit.
//!
//! Engine computations degrade to safe defaults wherever possible; errors
//! are reserved for caller mistakes and host-boundary failures.

/// All errors that can occur in rowkit.
#[derive(Debug, thiserror::Error)]
pub enum RowkitError {
    /// Drag analysis was requested with invalid inputs (no items, or a
    /// dragging index outside the item list).
    #[error("Drag analysis: {0}")]
    DragAnalysis(String),

    /// A host-supplied callback failed or returned an unusable value.
    #[error("Host callback: {0}")]
    Callback(String),

    /// JSON (de)serialization error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RowkitError>;

impl From<String> for RowkitError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RowkitError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<RowkitError> for wasm_bindgen::JsValue {
    fn from(e: RowkitError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
