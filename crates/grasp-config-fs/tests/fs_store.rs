// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use grasp_app_core::config::{ConfigError, ConfigService, ConfigStore};
use grasp_app_core::profile::{load_profile, save_profile, TransformerKind, TransformerProfile};
use grasp_config_fs::FsConfigStore;
use grasp_core::{AxisConstraints, ScalingMode};

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::with_root(dir.path());
    assert!(matches!(store.load_raw("nope"), Err(ConfigError::NotFound)));
}

#[test]
fn save_creates_root_and_writes_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("grasp");
    let store = FsConfigStore::with_root(&root);

    store.save_raw("transformer", b"{}").unwrap();

    let path = root.join("transformer.json");
    assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    assert!(!root.join("transformer.json.tmp").exists());
    assert_eq!(store.load_raw("transformer").unwrap(), b"{}");
}

#[test]
fn keys_cannot_escape_root() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::with_root(dir.path());
    assert!(matches!(
        store.save_raw("../outside", b"x"),
        Err(ConfigError::InvalidKey(_))
    ));
    assert!(matches!(
        store.load_raw("a/b"),
        Err(ConfigError::InvalidKey(_))
    ));
}

#[test]
fn profile_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let service = ConfigService::new(FsConfigStore::with_root(dir.path()));

    let mut profile = TransformerProfile::new(TransformerKind::Free);
    profile.config.scaling_mode = ScalingMode::PerAxis;
    profile.config.limit_scaling_to_two_axes = true;
    profile.config.scale_constraints = AxisConstraints::uniform(true, 0.5, 2.0);
    save_profile(&service, "bench", &profile).unwrap();

    let loaded = load_profile(&service, "bench").unwrap();
    assert_eq!(loaded, profile);

    let text = std::fs::read_to_string(dir.path().join("bench.json")).unwrap();
    assert!(text.contains("\"per_axis\""), "{text}");
}

#[test]
fn corrupt_file_surfaces_serde_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("transformer.json"), b"{ not json").unwrap();
    let service = ConfigService::new(FsConfigStore::with_root(dir.path()));
    assert!(matches!(
        load_profile(&service, "transformer"),
        Err(ConfigError::Serde(_))
    ));
}
