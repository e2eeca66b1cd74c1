//! Bevy wiring for the weather systems.
//!
//! The plugin owns the registry and its collaborators as resources and turns
//! [`WorldEffectCommand`] events into console commands. Drawing is left to
//! whichever crate provides a [`RenderBackend`](crate::render_backend::RenderBackend):
//! it should run in [`WorldEffectsSet::Simulate`].

use bevy::prelude::*;

use crate::commands::{execute_command, CommandContext};
use crate::effect_systems::WorldEffects;
use crate::images::FogImageSource;
use crate::settings::WorldEffectsSettings;
use crate::sim_rng::SimRng;
use crate::world_query::WorldQueryOracle;

/// One console line, e.g. `snow init 2000`.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct WorldEffectCommand(pub String);

impl WorldEffectCommand {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }
}

/// Commands are applied before the frame's simulation step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorldEffectsSet {
    Commands,
    Simulate,
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Seeds the RNG and queues the configured startup commands.
pub fn queue_startup_commands(
    settings: Res<WorldEffectsSettings>,
    mut rng: ResMut<SimRng>,
    mut commands: EventWriter<WorldEffectCommand>,
) {
    *rng = SimRng::from_seed_u64(settings.rng_seed);
    for line in &settings.startup_commands {
        commands.send(WorldEffectCommand(line.clone()));
    }
}

pub fn apply_world_effect_commands(
    mut events: EventReader<WorldEffectCommand>,
    mut world: ResMut<WorldEffects>,
    mut rng: ResMut<SimRng>,
    images: Res<FogImageSource>,
    settings: Res<WorldEffectsSettings>,
) {
    for WorldEffectCommand(line) in events.read() {
        let mut ctx = CommandContext {
            rng: &mut *rng,
            images: &*images,
            settings: &*settings,
        };
        match execute_command(&mut world, line, &mut ctx) {
            Ok(outcome) => info!("WorldEffects: {outcome}"),
            Err(e) if e.is_parse_error() => warn!("WorldEffects: '{line}': {e}"),
            Err(e) => error!("WorldEffects: '{line}': {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct WorldEffectsPlugin;

impl Plugin for WorldEffectsPlugin {
    fn build(&self, app: &mut App) {
        // init_resource keeps anything the app inserted before the plugin.
        app.init_resource::<WorldEffectsSettings>()
            .init_resource::<WorldEffects>()
            .init_resource::<SimRng>()
            .init_resource::<WorldQueryOracle>()
            .init_resource::<FogImageSource>()
            .add_event::<WorldEffectCommand>()
            .configure_sets(
                Update,
                (WorldEffectsSet::Commands, WorldEffectsSet::Simulate).chain(),
            )
            .add_systems(Startup, queue_startup_commands)
            .add_systems(
                Update,
                apply_world_effect_commands.in_set(WorldEffectsSet::Commands),
            );
    }
}
