//! Physics-driven polyhedral dice tray
//!
//! The `tray` module is a headless simulation core: it builds die geometry,
//! throws dice into a walled arena, steps the physics, and reads the face each
//! die shows. The viewer binary and the `dicetray-roll` CLI are thin hosts
//! around [`tray::SimulationSession`].

pub mod tray;
