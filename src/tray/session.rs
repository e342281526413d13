//! One dice tray: arena, registry, roll mode and the frame step
//!
//! A [`SimulationSession`] owns everything a tray needs, so any number of
//! trays can coexist. Hosts drive it with [`SimulationSession::step`] from
//! whatever loop they run and read [`SimulationSession::status`] back.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::tray::meshes::build_polyhedron;
use crate::tray::physics::{PhysicsWorld, Pose};
use crate::tray::scene::SceneSink;
use crate::tray::systems::{
    body_desc, fallen_dice, launch_state, recover_fallen, resolve_value, summarize, sync_dice,
    Arena, DiceRegistry, DieRoll, FixedStepper, RollSummary,
};
use crate::tray::types::{Die, DieId, DieKind, RollMode, TrayError, TraySettings, Viewport};

pub struct SimulationSession<P: PhysicsWorld, S: SceneSink = ()> {
    settings: TraySettings,
    physics: P,
    scene: S,
    arena: Arena,
    registry: DiceRegistry,
    stepper: FixedStepper,
    roll_mode: RollMode,
    rng: StdRng,
    summary: RollSummary,
    status: String,
    /// Dice brought back from below the floor so far
    recoveries: usize,
}

impl<P: PhysicsWorld, S: SceneSink> SimulationSession<P, S> {
    pub fn new(mut physics: P, scene: S, settings: TraySettings, viewport: Viewport) -> Self {
        let arena = Arena::build(&mut physics, &settings.arena, viewport);
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let stepper = FixedStepper::new(&settings.physics);
        let summary = RollSummary::Ready;

        info!(
            "Dice tray ready: {}x{} viewport, table {:.1} x {:.1}",
            viewport.width,
            viewport.height,
            arena.bounds().half_width * 2.0,
            arena.bounds().half_depth * 2.0
        );

        Self {
            settings,
            physics,
            scene,
            arena,
            registry: DiceRegistry::new(),
            stepper,
            roll_mode: RollMode::Normal,
            rng,
            status: summary.to_string(),
            summary,
            recoveries: 0,
        }
    }

    /// Throw a die of `kind` onto the table.
    ///
    /// With advantage or disadvantage active, a d20 request replaces every d20
    /// on the table with a fresh pair.
    pub fn spawn(&mut self, kind: DieKind) -> Vec<DieId> {
        if kind == DieKind::D20 && self.roll_mode != RollMode::Normal {
            self.clear_type(DieKind::D20);
            return vec![self.spawn_single(kind), self.spawn_single(kind)];
        }
        vec![self.spawn_single(kind)]
    }

    /// Spawn by name ("d6", "D20"); unknown names are logged and ignored.
    pub fn spawn_named(&mut self, name: &str) -> Vec<DieId> {
        match name.parse::<DieKind>() {
            Ok(kind) => self.spawn(kind),
            Err(e) => {
                warn!("Ignoring spawn request: {}", e);
                Vec::new()
            }
        }
    }

    fn spawn_single(&mut self, kind: DieKind) -> DieId {
        let polyhedron = build_polyhedron(kind);
        let launch = launch_state(self.arena.bounds(), &self.settings.dice, &mut self.rng);
        let body = self
            .physics
            .add_dynamic_body(&body_desc(&polyhedron, launch, &self.settings.dice));

        let id = self.registry.insert(polyhedron, body);
        if let Some(die) = self.registry.get(id) {
            self.scene.add_die(id, &die.polyhedron);
            self.scene.sync_pose(id, launch.pose);
        }

        info!("Spawned {} as {}", kind, id);
        id
    }

    /// Remove every die of one kind. Returns how many were removed.
    pub fn clear_type(&mut self, kind: DieKind) -> usize {
        let removed = self.registry.remove_kind(kind);
        self.despawn(&removed);
        if !removed.is_empty() {
            info!("Cleared {} {}", removed.len(), kind);
        }
        removed.len()
    }

    pub fn clear_all(&mut self) {
        let removed = self.registry.drain();
        self.despawn(&removed);
        info!("Cleared all dice ({})", removed.len());
        self.refresh(true);
    }

    fn despawn(&mut self, dice: &[Die]) {
        for die in dice {
            self.physics.remove_body(die.body);
            self.scene.remove_die(die.id);
        }
    }

    /// Change the aggregation policy and re-read the table immediately.
    pub fn set_roll_mode(&mut self, mode: RollMode) {
        if mode != self.roll_mode {
            info!("Roll mode set to {}", mode.name());
        }
        self.roll_mode = mode;
        self.refresh(true);
    }

    pub fn roll_mode(&self) -> RollMode {
        self.roll_mode
    }

    /// Refit the arena to a new viewport. Degenerate sizes leave it untouched.
    pub fn on_resize(&mut self, width: f32, height: f32) -> Result<(), TrayError> {
        let viewport = match Viewport::new(width, height) {
            Ok(viewport) => viewport,
            Err(e) => {
                warn!("Ignoring resize: {}", e);
                return Err(e);
            }
        };
        self.arena.resize(&mut self.physics, viewport);
        debug!("Resized tray to {}x{}", width, height);
        Ok(())
    }

    /// Advance the tray by one host frame of `delta` seconds.
    pub fn step(&mut self, delta: f32) {
        let recovery = &self.settings.recovery;
        let fallen = fallen_dice(&self.physics, self.registry.as_slice(), recovery);

        let steps = self.stepper.advance(delta);
        for _ in 0..steps {
            self.physics.step(self.stepper.fixed_dt());
        }

        self.recoveries +=
            recover_fallen(&mut self.physics, self.registry.as_slice(), recovery, &fallen).len();

        sync_dice(
            &self.physics,
            &mut self.scene,
            self.registry.as_mut_slice(),
            &self.settings.dice,
        );

        self.refresh(false);
    }

    /// Recompute the readout. `force` reads values even while dice roll.
    pub fn refresh(&mut self, force: bool) {
        let mode = self.roll_mode;
        let any_rolling = self.registry.any_rolling();
        let physics = &self.physics;
        let scene = &mut self.scene;
        let rng = &mut self.rng;
        let dice = self.registry.as_slice();

        let summary = summarize(mode, any_rolling, force, || {
            dice.iter()
                .map(|die| DieRoll {
                    kind: die.kind,
                    value: read_die(physics, scene, rng, die),
                })
                .collect()
        });

        // Settles and forced reads only; a resting d100 redraws every frame
        if force || (self.summary == RollSummary::Rolling && summary != RollSummary::Rolling) {
            info!("{}", summary);
        }
        self.status = summary.to_string();
        self.summary = summary;
    }

    /// Current value of one die, relabelling it if it is a d100.
    pub fn value_of(&mut self, id: DieId) -> Option<u32> {
        let die = self.registry.get(id)?;
        Some(read_die(&self.physics, &mut self.scene, &mut self.rng, die))
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn summary(&self) -> &RollSummary {
        &self.summary
    }

    pub fn dice(&self) -> &[Die] {
        self.registry.as_slice()
    }

    pub fn recoveries(&self) -> usize {
        self.recoveries
    }

    pub fn all_at_rest(&self) -> bool {
        !self.registry.any_rolling()
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn settings(&self) -> &TraySettings {
        &self.settings
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}

fn read_die<P, S, R>(physics: &P, scene: &mut S, rng: &mut R, die: &Die) -> u32
where
    P: PhysicsWorld + ?Sized,
    S: SceneSink + ?Sized,
    R: Rng + ?Sized,
{
    let pose = physics.pose(die.body).unwrap_or_else(Pose::default);
    let value = resolve_value(&die.polyhedron, &pose, rng);
    if die.kind == DieKind::D100 {
        scene.show_value(die.id, value);
    }
    value
}
