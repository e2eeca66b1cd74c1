//! Console commands for the weather systems.
//!
//! A command line starts with the system name (`snow`, `rain`) followed by a
//! sub-command. `init <count>` (re)creates the system, `remove` drops it, and
//! everything else is first offered to the system's effects and then to the
//! system itself.

mod error;
pub mod parse;

use std::fmt;

pub use error::CommandError;

use crate::effect_systems::{EffectSystem, SystemKind, WorldEffects};
use crate::images::ImageLoader;
use crate::rain::init_rain_system;
use crate::settings::WorldEffectsSettings;
use crate::sim_rng::SimRng;
use crate::snow::init_snow_system;

use parse::{parse_count, Tokens};

/// Collaborators a command may need besides the registry itself.
pub struct CommandContext<'a> {
    pub rng: &'a mut SimRng,
    pub images: &'a dyn ImageLoader,
    pub settings: &'a WorldEffectsSettings,
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Initialized {
        system: &'static str,
        particles: usize,
        reinitialized: bool,
    },
    Removed(&'static str),
    Updated {
        system: &'static str,
        command: String,
    },
    HandledByEffect(&'static str),
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Initialized {
                system,
                particles,
                reinitialized,
            } => {
                let verb = if *reinitialized { "re-initialized" } else { "initialized" };
                write!(f, "{system} system {verb} with {particles} particles")
            }
            CommandOutcome::Removed(system) => write!(f, "{system} system removed"),
            CommandOutcome::Updated { system, command } => {
                write!(f, "{system} system: {command} updated")
            }
            CommandOutcome::HandledByEffect(system) => {
                write!(f, "{system} system: command handled by effect")
            }
        }
    }
}

fn init_usage(system: &'static str) -> &'static str {
    match system {
        EffectSystem::SNOW => "snow init <snowflakes>",
        _ => "rain init <raindrops>",
    }
}

/// Parses and applies one console line. On error nothing is changed.
pub fn execute_command(
    world: &mut WorldEffects,
    line: &str,
    ctx: &mut CommandContext<'_>,
) -> Result<CommandOutcome, CommandError> {
    let mut tokens = Tokens::new(line);
    let name = tokens.next_token().unwrap_or("");
    let system = if name.eq_ignore_ascii_case(EffectSystem::SNOW) {
        EffectSystem::SNOW
    } else if name.eq_ignore_ascii_case(EffectSystem::RAIN) {
        EffectSystem::RAIN
    } else {
        return Err(CommandError::UnknownSystem(name.to_string()));
    };

    // Effects see the line without the system name.
    let effect_text = tokens.remainder();
    let sub_command = tokens.next_token().unwrap_or("");

    if sub_command.eq_ignore_ascii_case("init") {
        let count = parse_count(&mut tokens, system).map_err(|e| e.with_usage(init_usage(system)))?;
        let reinitialized = world.remove_system(system).is_some();
        if system == EffectSystem::SNOW {
            world.add_system(init_snow_system(count, &ctx.settings.snow));
        } else {
            world.add_system(init_rain_system(count, &ctx.settings.rain, ctx.rng));
        }
        return Ok(CommandOutcome::Initialized {
            system,
            particles: count.get(),
            reinitialized,
        });
    }

    if sub_command.eq_ignore_ascii_case("remove") {
        return world
            .remove_system(system)
            .map(|_| CommandOutcome::Removed(system))
            .ok_or(CommandError::NotInitialized(system));
    }

    let view = world.view;
    let Some(target) = world.find_system_mut(system) else {
        return Err(CommandError::NotInitialized(system));
    };

    if target.effects.forward_command(effect_text)? {
        return Ok(CommandOutcome::HandledByEffect(system));
    }

    let particle_count = target.particles().len();
    let EffectSystem { kind, effects, .. } = target;
    match kind {
        SystemKind::Snow(snow) => {
            snow.command(sub_command, &mut tokens, particle_count, effects, &view, ctx)?
        }
        SystemKind::Rain(rain) => rain.command(sub_command, &mut tokens, effects, &view, ctx)?,
    }

    Ok(CommandOutcome::Updated {
        system,
        command: sub_command.to_ascii_lowercase(),
    })
}
