//! Error taxonomy for globe startup
//!
//! None of these reach JS: the web host logs them and falls back to a
//! no-op globe.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("canvas element #{0} not found")]
    CanvasNotFound(String),
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("2d context unavailable")]
    ContextUnavailable,
    #[error("invalid globe options: {0}")]
    Options(#[from] serde_json::Error),
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl GlobeError {
    /// Environment-unavailable errors mean the feature is simply absent
    pub fn is_environment(&self) -> bool {
        !matches!(self, GlobeError::Options(_))
    }
}
