// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Grid configuration

use crate::error::GridError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`GridConfig::load`]
pub const CONFIG_FILE: &str = "texsurf.toml";

/// Sampling grid parameters for one tessellation pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Samples per axis
    pub step: usize,
    /// Half-extent of the sampled square `[-range, range]²`
    pub range: f32,
    /// Cut geometry at the `z = ±range` planes
    pub clip: bool,
    /// Uniformly rescale output positions into `[-display_bound, display_bound]`
    pub remap: bool,
    pub display_bound: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            step: 250,
            range: 10.0,
            clip: true,
            remap: true,
            display_bound: 10.0,
        }
    }
}

impl GridConfig {
    pub fn new(step: usize, range: f32, clip: bool) -> Self {
        Self {
            step,
            range,
            clip,
            ..Self::default()
        }
    }

    /// Rescale output into `[-bound, bound]`, or keep raw coordinates
    pub fn with_display_bound(mut self, bound: Option<f32>) -> Self {
        match bound {
            Some(bound) => {
                self.remap = true;
                self.display_bound = bound;
            }
            None => self.remap = false,
        }
        self
    }

    /// Factor applied to raw positions for presentation
    pub fn display_scale(&self) -> Option<f32> {
        self.remap.then(|| self.display_bound / self.range)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.step < 2 {
            return Err(GridError::InvalidStep(self.step));
        }
        if !(self.range.is_finite() && self.range > 0.0) {
            return Err(GridError::InvalidRange(self.range));
        }
        if self.remap && !(self.display_bound.is_finite() && self.display_bound > 0.0) {
            return Err(GridError::InvalidDisplayBound(self.display_bound));
        }
        Ok(())
    }

    /// Distance between neighbouring samples
    pub fn step_size(&self) -> f64 {
        2.0 * self.range as f64 / (self.step - 1) as f64
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: GridConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `TEXSURF_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(step) = std::env::var("TEXSURF_STEP") {
            self.step = step.parse().context("Invalid TEXSURF_STEP")?;
        }

        if let Ok(range) = std::env::var("TEXSURF_RANGE") {
            self.range = range.parse().context("Invalid TEXSURF_RANGE")?;
        }

        if let Ok(clip) = std::env::var("TEXSURF_CLIP") {
            self.clip = clip.parse().context("Invalid TEXSURF_CLIP")?;
        }

        if let Ok(remap) = std::env::var("TEXSURF_REMAP") {
            self.remap = remap.parse().context("Invalid TEXSURF_REMAP")?;
        }

        if let Ok(bound) = std::env::var("TEXSURF_DISPLAY_BOUND") {
            self.display_bound = bound.parse().context("Invalid TEXSURF_DISPLAY_BOUND")?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.step, 250);
        assert_eq!(config.display_scale(), Some(1.0));
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            GridConfig::new(1, 1.0, true).validate(),
            Err(GridError::InvalidStep(1))
        );
        assert_eq!(
            GridConfig::new(3, 0.0, true).validate(),
            Err(GridError::InvalidRange(0.0))
        );
        assert!(GridConfig::new(3, f32::NAN, true).validate().is_err());
        assert!(GridConfig::new(2, 0.5, false).validate().is_ok());
        assert_eq!(
            GridConfig::new(3, 1.0, true)
                .with_display_bound(Some(-1.0))
                .validate(),
            Err(GridError::InvalidDisplayBound(-1.0))
        );
        assert!(GridConfig::new(3, 1.0, true)
            .with_display_bound(None)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_step_size() {
        assert_eq!(GridConfig::new(3, 1.0, true).step_size(), 1.0);
        assert_eq!(GridConfig::new(5, 10.0, true).step_size(), 5.0);
    }

    #[test]
    fn test_display_scale() {
        let config = GridConfig::new(3, 2.0, true);
        assert_eq!(config.display_scale(), Some(5.0));
        assert_eq!(config.with_display_bound(None).display_scale(), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GridConfig = toml::from_str("step = 32\nclip = false\n").unwrap();
        assert_eq!(config.step, 32);
        assert!(!config.clip);
        assert_eq!(config.range, 10.0);
    }
}
