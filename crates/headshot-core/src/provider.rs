//! The image transform provider seam.
//!
//! The remote AI generation service is an external collaborator: this
//! crate consumes its capability but never implements the network call.
//! Several transport revisions exist on the front-end side (multipart
//! edit, vision-analysis + generation, pure generation); all of them fit
//! behind this one trait, and retry, backoff, and rate-limit policy live
//! with the implementation, not with the pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clothing/framing style tokens the generation service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadshotStyle {
    /// Tailored business suit, studio backdrop.
    #[default]
    Traditional,
    /// Business-casual blazer.
    Modern,
    /// Open-collar shirt, softer backdrop.
    Relaxed,
}

impl HeadshotStyle {
    /// The wire token for this style.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadshotStyle::Traditional => "traditional",
            HeadshotStyle::Modern => "modern",
            HeadshotStyle::Relaxed => "relaxed",
        }
    }

    /// Parse a wire token; unknown tokens are rejected rather than
    /// defaulted, mirroring the front-end's style validation.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "traditional" => Some(HeadshotStyle::Traditional),
            "modern" => Some(HeadshotStyle::Modern),
            "relaxed" => Some(HeadshotStyle::Relaxed),
            _ => None,
        }
    }
}

/// Structured errors a transform provider can surface.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The service throttled the request; try again later.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The service rejected the request (bad image, policy, ...).
    #[error("Transform request rejected: {0}")]
    Rejected(String),

    /// Transport-level failure (network, timeout, malformed response).
    #[error("Transform transport error: {0}")]
    Transport(String),
}

/// Capability interface for the remote headshot generation service.
///
/// Accepts an encoded image plus a style token and returns a new encoded
/// image or a structured error. The adjustment pipeline only depends on
/// getting a decodable raster back.
pub trait TransformProvider {
    /// Transform an encoded image into a generated headshot.
    fn transform(&self, image: &[u8], style: HeadshotStyle) -> Result<Vec<u8>, ProviderError>;
}
