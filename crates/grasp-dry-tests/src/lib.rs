// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Grasp crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`approx`] - Tolerance assertions for vectors and quaternions
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`poses`] - Grab pose builders (hand pairs, translate, stretch, orbit)
//! - [`replay`] - Drive a transformer through a frame list and collect transforms

pub mod approx;
pub mod config;
pub mod poses;
pub mod replay;

pub use approx::{assert_near, assert_quat_near, assert_vec3_near};
pub use config::InMemoryConfigStore;
pub use poses::{hand_pair, hands_at, orbited_y, stretched, translated};
pub use replay::replay_frames;
