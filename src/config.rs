use std::{io::Read, path::Path};

use anyhow::Context;

use crate::{
    capture::snapshot::SNAPSHOT_FILE_NAME,
    compose::placement::OverlayPlacement,
    foundation::{
        core::Fps,
        error::{TryOnError, TryOnResult},
    },
    media::source::StreamConstraints,
};

/// Settings for one live try-on session, loadable from JSON.
///
/// Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TryOnConfig {
    /// Camera capability request.
    pub constraints: StreamConstraints,
    /// Overlay placement and opacity.
    pub placement: OverlayPlacement,
    /// Flip camera frames horizontally before drawing (selfie view).
    pub mirror: bool,
    /// Download name for snapshots.
    pub snapshot_file_name: String,
    /// Display refresh rate for the fixed-rate clock.
    pub fps: Fps,
}

impl Default for TryOnConfig {
    fn default() -> Self {
        Self {
            constraints: StreamConstraints::default(),
            placement: OverlayPlacement::default(),
            mirror: false,
            snapshot_file_name: SNAPSHOT_FILE_NAME.to_string(),
            fps: Fps::default(),
        }
    }
}

impl TryOnConfig {
    /// Check every field.
    pub fn validate(&self) -> TryOnResult<()> {
        self.constraints.validate()?;
        self.placement.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;

        let name = self.snapshot_file_name.trim();
        if name.is_empty() {
            return Err(TryOnError::validation(
                "snapshot_file_name must be non-empty",
            ));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(TryOnError::validation(
                "snapshot_file_name must be a bare file name",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_reader(reader: impl Read) -> TryOnResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)
            .map_err(|e| TryOnError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> TryOnResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        Self::from_json_reader(std::io::BufReader::new(f))
    }
}
