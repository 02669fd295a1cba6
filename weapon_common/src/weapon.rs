//! Weapon shared types.
//!
//! All types shared between the weapon controllers and their configuration
//! surface live here: the weapon kind, per-family control modes and the
//! serde configuration structures.

pub mod config;
pub mod mode;
