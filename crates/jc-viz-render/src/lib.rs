//! # jc-viz-render
//!
//! SVG rendering for jetcorr artifacts: the EEC spectrum on log-log axes
//! with markers and x/y error bars.

pub mod axis;
pub mod canvas;
pub mod color;
pub mod config;
pub mod layout;
pub mod primitives;
pub mod spectrum;

use thiserror::Error;

pub use config::RenderConfig;

/// Rendering error type.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The artifact JSON did not parse.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    /// The artifact content cannot be drawn.
    #[error("artifact error: {0}")]
    Artifact(String),
    /// Filesystem failure while writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rendering result alias.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Render a spectrum artifact JSON string to an SVG string.
pub fn render_svg(artifact_json: &str, config: &RenderConfig) -> Result<String> {
    let artifact: jc_viz::EecSpectrumArtifact = serde_json::from_str(artifact_json)?;
    spectrum::render(&artifact, config)
}

/// Render a spectrum artifact JSON string to an SVG file.
pub fn render_to_file(
    artifact_json: &str,
    path: &std::path::Path,
    config: &RenderConfig,
) -> Result<()> {
    let svg = render_svg(artifact_json, config)?;
    std::fs::write(path, svg)?;
    Ok(())
}
