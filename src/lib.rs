//! Planboard Engine
//!
//! A headless render-capture-publish engine for AI-generated year roadmaps.
//! It renders a generated plan onto a visual surface, freezes that surface
//! into a deterministic raster image, and either wraps the capture into a
//! single-page PDF download or publishes it to a share endpoint and builds a
//! pre-filled social-post composer URL.
//!
//! # Features
//!
//! - **Capture as a capability**: rasterization sits behind the
//!   [`CaptureBackend`] trait with a built-in software adapter
//! - **Typed operation states**: generate/export/share are coordinated
//!   through explicit states with guaranteed cleanup
//! - **Worker-backed async facade**: [`StudioHandle`] drives the synchronous
//!   studio from async tasks
//!
//! # Example
//!
//! ```no_run
//! use planboard::{Studio, StudioConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StudioConfig {
//!     generate_endpoint: "http://localhost:5000/api/generate".to_string(),
//!     share_endpoint: "http://localhost:5000/api/share".to_string(),
//!     ..Default::default()
//! };
//!
//! let mut studio = Studio::new(config)?;
//! let plan = studio.generate("run a marathon in 2026")?;
//! println!("Title: {}", plan.title);
//! let path = studio.export_pdf(std::path::Path::new("."))?;
//! println!("Saved: {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod model;
pub mod rendering;
pub mod surface;

pub mod capture;
pub mod coordinator;
pub mod document;
pub mod generate;
pub mod publish;

pub mod studio;

// Async-friendly studio API (simple worker-backed abstraction)
pub mod async_api;

// Re-export the main entry points at the crate root for ergonomic use
pub use async_api::StudioHandle;
pub use capture::{CaptureBackend, SoftwareCapture, DEFAULT_PIXEL_RATIO};
pub use coordinator::{Coordinator, OpState, Operation};
pub use model::Plan;
pub use publish::{ComposerLauncher, ShareOutcome};
pub use rendering::RasterImage;
pub use studio::Studio;
pub use surface::{RenderSurface, SurfaceKind};

/// Configuration for the studio
///
/// The defaults mirror the original deployment: local generation and share
/// endpoints, a viewport the width of the plan column, 2x capture density,
/// and a 30 second exchange timeout (no exchange is allowed to hang
/// forever).
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Generation exchange endpoint
    pub generate_endpoint: String,
    /// Share exchange endpoint
    pub share_endpoint: String,
    /// Surface viewport; width fixes the plan column, height is a floor
    pub viewport: Viewport,
    /// Capture density multiplier
    pub pixel_ratio: f32,
    /// Timeout for both exchanges in milliseconds
    pub timeout_ms: u64,
    /// User agent string sent with requests
    pub user_agent: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            generate_endpoint: "http://localhost:5000/api/generate".to_string(),
            share_endpoint: "http://localhost:5000/api/share".to_string(),
            viewport: Viewport::default(),
            pixel_ratio: capture::DEFAULT_PIXEL_RATIO,
            timeout_ms: 30000,
            user_agent: "Planboard/0.1".to_string(),
        }
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 896,
            height: 640,
        }
    }
}
