//! Type definitions for the dice tray
//!
//! This module is organized into submodules:
//! - `dice` - die kinds, roll mode and the live `Die` entity
//! - `polyhedron` - die geometry and logical faces
//! - `arena` - viewport, top-down camera and wall placement
//! - `settings` - tunables and JSON persistence
//! - `error` - the crate error type

pub mod arena;
pub mod dice;
pub mod error;
pub mod polyhedron;
pub mod settings;

// Re-export all public types for convenient access
pub use arena::*;
pub use dice::*;
pub use error::*;
pub use polyhedron::*;
pub use settings::*;
