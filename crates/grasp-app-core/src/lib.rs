// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Grasp tools (config, transformer profiles).
//! Keeps CLI and host adapters thin; storage is a port implemented elsewhere.
#![forbid(unsafe_code)]

pub mod config;
pub mod profile;
