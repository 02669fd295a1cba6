//! Safety module root.
//!
//! Arming gate shared by every weapon family.

pub mod gate;
