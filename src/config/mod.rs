//! Render configuration — instrument table and output ordering, loaded from
//! ~/.dynarc/render.yaml or an explicit path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::composition::InstrumentId;
use crate::error::{Error, Result};

/// Which stock adapter an instrument entry builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    #[default]
    Basic,
    Arc,
    Glide,
}

/// One instrument registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub id: u32,
    #[serde(default)]
    pub kind: InstrumentKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_staccato_factor")]
    pub staccato_factor: f64,
}

fn default_staccato_factor() -> f64 {
    0.5
}

impl InstrumentConfig {
    pub fn basic(id: u32) -> Self {
        Self {
            id,
            kind: InstrumentKind::Basic,
            name: None,
            staccato_factor: default_staccato_factor(),
        }
    }

    pub fn instrument_id(&self) -> InstrumentId {
        InstrumentId(self.id)
    }
}

/// Order in which a section's events are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOrder {
    /// Depth-first tree order, track by track.
    #[default]
    Emission,
    /// Stable sort by start time across tracks.
    Time,
}

/// Render configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_instruments")]
    pub instruments: Vec<InstrumentConfig>,
    #[serde(default)]
    pub order: EventOrder,
}

impl RenderConfig {
    /// The standard config path (~/.dynarc/render.yaml).
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".dynarc").join("render.yaml"))
    }

    /// Load from the standard path, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from an explicit path. A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (i, inst) in self.instruments.iter().enumerate() {
            if !(inst.staccato_factor.is_finite() && inst.staccato_factor > 0.0) {
                return Err(Error::Config(format!(
                    "instrument {}: staccato_factor must be positive, got {}",
                    inst.id, inst.staccato_factor
                )));
            }
            if self.instruments[..i].iter().any(|other| other.id == inst.id) {
                return Err(Error::Config(format!("instrument {} listed twice", inst.id)));
            }
        }
        Ok(())
    }

    /// Basic instruments 101 and 102, the ones the demo song plays.
    fn default_instruments() -> Vec<InstrumentConfig> {
        vec![InstrumentConfig::basic(101), InstrumentConfig::basic(102)]
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            instruments: Self::default_instruments(),
            order: EventOrder::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.instruments.len(), 2);
        assert_eq!(config.order, EventOrder::Emission);
    }

    #[test]
    fn serialize_deserialize() {
        let config = RenderConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = RenderConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn custom_config_deserialize() {
        let yaml = r#"
order: time
instruments:
  - id: 7
    kind: glide
    name: lead
  - id: 8
    kind: arc
    staccato_factor: 0.25
"#;
        let config = RenderConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.order, EventOrder::Time);
        assert_eq!(config.instruments.len(), 2);
        assert_eq!(config.instruments[0].kind, InstrumentKind::Glide);
        assert_eq!(config.instruments[0].name.as_deref(), Some("lead"));
        assert_eq!(config.instruments[0].staccato_factor, 0.5);
        assert_eq!(config.instruments[1].staccato_factor, 0.25);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = RenderConfig::from_yaml("order: time\n").unwrap();
        assert_eq!(config.instruments, RenderConfig::default().instruments);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let yaml = "instruments:\n  - id: 1\n  - id: 1\n";
        assert!(matches!(RenderConfig::from_yaml(yaml), Err(Error::Config(_))));
    }

    #[test]
    fn bad_staccato_factor_rejected() {
        let yaml = "instruments:\n  - id: 1\n    staccato_factor: -1.0\n";
        assert!(matches!(RenderConfig::from_yaml(yaml), Err(Error::Config(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::load_or_default(&dir.path().join("render.yaml"));
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.yaml");
        std::fs::write(&path, "instruments: [ { id: 1 }, { id: 1 } ]\n").unwrap();
        assert_eq!(RenderConfig::load_or_default(&path), RenderConfig::default());
    }

    #[test]
    fn readable_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.yaml");
        std::fs::write(&path, "order: time\n").unwrap();
        assert_eq!(RenderConfig::load_or_default(&path).order, EventOrder::Time);
    }
}
