//! Pure logic for the bootstrap pipeline.
//!
//! Nothing in here touches the filesystem or spawns processes, so every
//! function can be tested with plain values.

pub mod deploy_config;
pub mod layout;
pub mod permissions;
