//! Engine configuration.
//!
//! Everything has a default, so an empty YAML document is a valid config:
//!
//! ```yaml
//! explanation_level: expert
//! stayman:
//!   invite_min_hcp: 9
//! conventions:
//!   enabled: [blackwood, stayman, jacoby_transfer]
//! ```

use crate::conventions::{ConventionId, ConventionLevel};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationLevel {
    /// Headline only.
    Simple,
    #[default]
    Detailed,
    /// Detailed text plus the features and inferences behind it.
    Expert,
    /// Just the convention name, or "Natural bid".
    ConventionOnly,
}

impl FromStr for ExplanationLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "simple" => Ok(ExplanationLevel::Simple),
            "detailed" => Ok(ExplanationLevel::Detailed),
            "expert" => Ok(ExplanationLevel::Expert),
            "convention_only" => Ok(ExplanationLevel::ConventionOnly),
            other => Err(format!("unknown explanation level '{other}'")),
        }
    }
}

/// HCP boundaries for Stayman auctions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaymanConfig {
    /// Minimum HCP to ask with 2♣ over 1NT.
    pub ask_min_hcp: u8,
    /// Responder invites (2NT or 3 of the major) from here.
    pub invite_min_hcp: u8,
    /// Responder bids game from here.
    pub game_min_hcp: u8,
}

impl Default for StaymanConfig {
    fn default() -> Self {
        Self {
            ask_min_hcp: 8,
            invite_min_hcp: 8,
            game_min_hcp: 10,
        }
    }
}

/// Thresholds for the slam exploration overlay and Blackwood signoffs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlamConfig {
    pub min_combined: u8,
    pub min_own_hcp: u8,
    pub min_partner_shown: u8,
    pub grand_combined: u8,
}

impl Default for SlamConfig {
    fn default() -> Self {
        Self {
            min_combined: 33,
            min_own_hcp: 16,
            min_partner_shown: 10,
            grand_combined: 37,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConventionSelection {
    /// Explicit list of conventions in use; `None` means all of them.
    pub enabled: Option<Vec<ConventionId>>,
    /// Conventions above this level are switched off.
    pub max_level: ConventionLevel,
}

impl Default for ConventionSelection {
    fn default() -> Self {
        Self {
            enabled: None,
            max_level: ConventionLevel::Advanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub explanation_level: ExplanationLevel,
    pub stayman: StaymanConfig,
    pub slam: SlamConfig,
    pub conventions: ConventionSelection,
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig = if yaml.trim().is_empty() {
            EngineConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn is_enabled(&self, id: ConventionId) -> bool {
        let selection = &self.conventions;
        id.metadata().level <= selection.max_level
            && selection
                .enabled
                .as_ref()
                .map_or(true, |list| list.contains(&id))
    }

    /// Rejects inconsistent thresholds and conventions whose prerequisites
    /// are switched off.
    pub fn validate(&self) -> Result<()> {
        if self.stayman.invite_min_hcp > self.stayman.game_min_hcp {
            return Err(EngineError::Config {
                message: format!(
                    "stayman.invite_min_hcp ({}) is above stayman.game_min_hcp ({})",
                    self.stayman.invite_min_hcp, self.stayman.game_min_hcp
                ),
            });
        }
        if self.slam.min_combined > self.slam.grand_combined {
            return Err(EngineError::Config {
                message: "slam.min_combined is above slam.grand_combined".to_string(),
            });
        }
        for id in ConventionId::ALL {
            if !self.is_enabled(id) {
                continue;
            }
            if let Some(missing) = id
                .metadata()
                .prerequisites
                .iter()
                .find(|p| !self.is_enabled(**p))
            {
                return Err(EngineError::Config {
                    message: format!(
                        "{} requires {}, which is not enabled",
                        id.metadata().name,
                        missing.metadata().name
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_yaml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.stayman.invite_min_hcp, 8);
        assert_eq!(config.slam.min_combined, 33);
        assert!(config.is_enabled(ConventionId::Splinter));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EngineConfig::from_yaml_str(
            "explanation_level: convention_only\nstayman:\n  invite_min_hcp: 9\n",
        )
        .unwrap();
        assert_eq!(config.explanation_level, ExplanationLevel::ConventionOnly);
        assert_eq!(config.stayman.invite_min_hcp, 9);
        assert_eq!(config.stayman.game_min_hcp, 10);
    }

    #[test]
    fn enabled_list_restricts_conventions() {
        let config = EngineConfig::from_yaml_str(
            "conventions:\n  enabled: [blackwood, stayman]\n",
        )
        .unwrap();
        assert!(config.is_enabled(ConventionId::Stayman));
        assert!(!config.is_enabled(ConventionId::JacobyTransfer));
    }

    #[test]
    fn missing_prerequisite_is_rejected() {
        let err = EngineConfig::from_yaml_str("conventions:\n  enabled: [splinter]\n").unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
        assert!(err.to_string().contains("Blackwood"));
    }

    #[test]
    fn max_level_switches_off_advanced_conventions() {
        let config =
            EngineConfig::from_yaml_str("conventions:\n  max_level: intermediate\n").unwrap();
        assert!(!config.is_enabled(ConventionId::Splinter));
        assert!(!config.is_enabled(ConventionId::FourthSuitForcing));
        assert!(config.is_enabled(ConventionId::Jacoby2Nt));
    }

    #[test]
    fn inverted_stayman_thresholds_are_rejected() {
        let err = EngineConfig::from_yaml_str("stayman:\n  invite_min_hcp: 12\n").unwrap_err();
        assert!(err.to_string().contains("invite_min_hcp"));
    }

    #[test]
    fn explanation_level_parses_cli_spellings() {
        assert_eq!("expert".parse(), Ok(ExplanationLevel::Expert));
        assert_eq!("convention-only".parse(), Ok(ExplanationLevel::ConventionOnly));
        assert!("loud".parse::<ExplanationLevel>().is_err());
    }
}
