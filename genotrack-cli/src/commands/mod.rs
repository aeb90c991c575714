//! Command implementations for the GenoTrack CLI

pub mod info;
pub mod render;
