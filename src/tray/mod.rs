pub mod meshes;
pub mod physics;
pub mod scene;
pub mod session;
pub mod systems;
pub mod types;

pub use meshes::build_polyhedron;
pub use physics::*;
pub use scene::*;
pub use session::*;
pub use systems::*;
pub use types::*;
