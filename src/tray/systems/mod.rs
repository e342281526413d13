//! Simulation systems for the dice tray
//!
//! - `arena`: ground plane and viewport-sized walls
//! - `registry`: live dice in spawn order
//! - `factory`: launch state and body description for a new die
//! - `stepper`: fixed-step advancement, rest detection, recovery, visual sync
//! - `dice`: face-value readout and roll aggregation

mod arena;
mod dice;
mod factory;
mod registry;
mod stepper;

pub use arena::Arena;
pub use dice::{resolve_value, summarize, DieRoll, RollSummary};
pub use factory::{body_desc, launch_state, Launch};
pub use registry::DiceRegistry;
pub use stepper::{fallen_dice, is_at_rest, recover_fallen, sync_dice, FixedStepper};
