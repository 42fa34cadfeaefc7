// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted transformer profiles: which transformer to build and its config.

use grasp_core::{FollowTransformer, FreeTransformer, Transformer, TransformerConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConfigError, ConfigService, ConfigStore};

/// Key the profile is stored under when the caller does not name one.
pub const DEFAULT_PROFILE_KEY: &str = "transformer";

/// Which transformer a profile builds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformerKind {
    /// Multi-point translate/rotate/scale.
    #[default]
    Free,
    /// Single-point translate-only follow.
    Follow,
}

/// Transformer selection plus its configuration.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerProfile {
    /// Transformer to build.
    pub kind: TransformerKind,
    /// Settings handed to the transformer. The follow transformer only reads
    /// the position limits.
    pub config: TransformerConfig,
}

impl TransformerProfile {
    /// Profile for `kind` with default settings.
    pub fn new(kind: TransformerKind) -> Self {
        Self {
            kind,
            config: TransformerConfig::default(),
        }
    }

    /// Builds an idle transformer for this profile.
    pub fn build(&self) -> Box<dyn Transformer> {
        match self.kind {
            TransformerKind::Free => Box::new(FreeTransformer::new(self.config)),
            TransformerKind::Follow => {
                Box::new(FollowTransformer::new(self.config.position_constraints))
            }
        }
    }
}

/// Loads the profile stored under `key`, or the default profile if none is stored.
pub fn load_profile<S>(service: &ConfigService<S>, key: &str) -> Result<TransformerProfile, ConfigError>
where
    S: ConfigStore,
{
    let profile = service.load::<TransformerProfile>(key)?;
    if profile.is_none() {
        debug!(key, "no stored profile; using defaults");
    }
    Ok(profile.unwrap_or_default())
}

/// Persists `profile` under `key`.
pub fn save_profile<S>(
    service: &ConfigService<S>,
    key: &str,
    profile: &TransformerProfile,
) -> Result<(), ConfigError>
where
    S: ConfigStore,
{
    service.save(key, profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_json_uses_snake_case_and_defaults_missing_fields() {
        let json = r#"{ "kind": "follow", "config": { "scaling_mode": "per_axis" } }"#;
        let profile: TransformerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.kind, TransformerKind::Follow);
        assert_eq!(profile.config.scaling_mode, grasp_core::ScalingMode::PerAxis);
        assert_eq!(
            profile.config.scale_constraints,
            TransformerConfig::default().scale_constraints
        );
    }

    #[test]
    fn build_matches_kind() {
        let free = TransformerProfile::new(TransformerKind::Free).build();
        let follow = TransformerProfile::new(TransformerKind::Follow).build();
        assert!(!free.is_active());
        assert!(!follow.is_active());
    }
}
