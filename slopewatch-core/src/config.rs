//! Configuration file support for Slopewatch
//!
//! Loads optional settings from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.slopewatchrc.json` in the working directory
//! 3. `slopewatch.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::impact::ImpactLabel;
use crate::scoring::{DEFAULT_JITTER_AMPLITUDE, MAX_JITTER_AMPLITUDE};
use crate::zone::{ZoneBounds, ZoneDefinition, ZoneId, ZoneTable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Slopewatch configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlopewatchConfig {
    /// Score jitter settings (default: disabled)
    #[serde(default)]
    pub jitter: Option<JitterConfig>,

    /// Custom zone table in priority order (default: built-in zones)
    #[serde(default)]
    pub zones: Option<Vec<ZoneConfig>>,

    /// Accept overlapping zones with different labels (default: false)
    #[serde(default)]
    pub allow_ambiguous_overlap: bool,
}

/// Score jitter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JitterConfig {
    /// Apply jitter to every assessment (default: false)
    #[serde(default)]
    pub enabled: bool,
    /// Half-width of the uniform offset (default: 5.0)
    pub amplitude: Option<f64>,
    /// Fixed seed for reproducible runs (default: random per run)
    pub seed: Option<u64>,
}

/// One custom zone
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneConfig {
    #[serde(default)]
    pub id: Option<ZoneId>,
    pub name: String,
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub impact: ImpactLabel,
    #[serde(default)]
    pub description: Option<String>,
}

/// Resolved configuration ready for use
#[derive(Debug)]
pub struct ResolvedConfig {
    pub jitter_enabled: bool,
    pub jitter_amplitude: f64,
    pub jitter_seed: Option<u64>,
    /// Active zone table, in priority order
    pub zones: ZoneTable,
    pub allow_ambiguous_overlap: bool,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl ZoneConfig {
    fn validate(&self, index: usize) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("zones[{}].name must not be empty", index);
        }
        for (edge, value) in [("north", self.north), ("south", self.south)] {
            if !(-90.0..=90.0).contains(&value) {
                anyhow::bail!(
                    "zones[{}].{} must be within [-90, 90] (got {})",
                    index,
                    edge,
                    value
                );
            }
        }
        for (edge, value) in [("east", self.east), ("west", self.west)] {
            if !(-180.0..=180.0).contains(&value) {
                anyhow::bail!(
                    "zones[{}].{} must be within [-180, 180] (got {})",
                    index,
                    edge,
                    value
                );
            }
        }
        if self.south >= self.north {
            anyhow::bail!(
                "zones[{}].south ({}) must be less than zones[{}].north ({})",
                index,
                self.south,
                index,
                self.north
            );
        }
        if self.west >= self.east {
            anyhow::bail!(
                "zones[{}].west ({}) must be less than zones[{}].east ({})",
                index,
                self.west,
                index,
                self.east
            );
        }
        if self.impact == ImpactLabel::Unknown {
            anyhow::bail!("zones[{}].impact must not be Unknown", index);
        }
        Ok(())
    }

    fn to_definition(&self) -> ZoneDefinition {
        ZoneDefinition {
            id: self.id,
            name: Cow::Owned(self.name.clone()),
            bounds: ZoneBounds {
                north: self.north,
                south: self.south,
                east: self.east,
                west: self.west,
            },
            base_risk: self.impact,
            description: Cow::Owned(self.description.clone().unwrap_or_default()),
        }
    }
}

impl SlopewatchConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref j) = self.jitter {
            if let Some(amplitude) = j.amplitude {
                if !(0.0..=MAX_JITTER_AMPLITUDE).contains(&amplitude) {
                    anyhow::bail!(
                        "jitter.amplitude must be within [0, {}] (got {})",
                        MAX_JITTER_AMPLITUDE,
                        amplitude
                    );
                }
            }
        }

        if let Some(ref zones) = self.zones {
            if zones.is_empty() {
                anyhow::bail!("zones must not be empty (omit the key to use built-in zones)");
            }
            for (i, zone) in zones.iter().enumerate() {
                zone.validate(i)?;
            }

            if !self.allow_ambiguous_overlap {
                let table = self.zone_table();
                if let Some(overlap) = table.ambiguous_overlaps().first() {
                    let names = table.zones();
                    anyhow::bail!(
                        "zones '{}' and '{}' overlap with different impacts; \
                         '{}' wins by order (set allow_ambiguous_overlap to accept)",
                        names[overlap.winner].name,
                        names[overlap.shadowed].name,
                        names[overlap.winner].name
                    );
                }
            }
        }

        Ok(())
    }

    fn zone_table(&self) -> ZoneTable {
        match &self.zones {
            Some(zones) => ZoneTable::new(zones.iter().map(ZoneConfig::to_definition).collect()),
            None => ZoneTable::builtin(),
        }
    }

    /// Resolve config into the form used by the assessment pipeline
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let (jitter_enabled, jitter_amplitude, jitter_seed) = match &self.jitter {
            Some(j) => (
                j.enabled,
                j.amplitude.unwrap_or(DEFAULT_JITTER_AMPLITUDE),
                j.seed,
            ),
            None => (false, DEFAULT_JITTER_AMPLITUDE, None),
        };

        Ok(ResolvedConfig {
            jitter_enabled,
            jitter_amplitude,
            jitter_seed,
            zones: self.zone_table(),
            allow_ambiguous_overlap: self.allow_ambiguous_overlap,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        SlopewatchConfig::default().resolve()
    }

    /// Seed for this run's jitter, `None` when jitter is off
    ///
    /// `enabled` and `seed` come from CLI flags and override the file.
    /// Jitter without any seed draws a fresh one.
    pub fn effective_jitter_seed(&self, enabled: bool, seed: Option<u64>) -> Option<u64> {
        if !(enabled || self.jitter_enabled) {
            return None;
        }
        Some(seed.or(self.jitter_seed).unwrap_or_else(rand::random))
    }
}

/// Discover and load a config file from the working directory
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(root: &Path) -> Result<Option<(SlopewatchConfig, PathBuf)>> {
    for name in [".slopewatchrc.json", "slopewatch.config.json"] {
        let path = root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<SlopewatchConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: SlopewatchConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `root`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(root)? {
            Some((config, path)) => (config, Some(path)),
            None => (SlopewatchConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
