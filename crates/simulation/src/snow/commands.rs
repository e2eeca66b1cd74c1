//! Console sub-commands of the snow system.

use bevy::prelude::*;

use crate::commands::parse::{parse_nonzero, parse_vector_argument, Tokens};
use crate::commands::{CommandContext, CommandError};
use crate::config::SNOW_FOG_IMAGE;
use crate::effects::EffectList;
use crate::misty_fog::add_misty_fog_effect;
use crate::settings::collapsed_axis;
use crate::view::ViewParams;
use crate::wind::WindEffect;

use super::types::SnowSystem;

const WIND_USAGE: &str =
    "snow wind ( originX originY originZ ) ( velocityX velocityY velocityZ ) ( sizeX sizeY sizeZ )";
const CONSTANT_WIND_USAGE: &str = "snow constantwind ( velocityX velocityY velocityZ )";
const ALPHA_USAGE: &str = "snow alpha <alpha> (default 0.09)";
const SPREAD_USAGE: &str =
    "snow spread ( minX minY minZ ) ( maxX maxY maxZ ) (default ( -600 -600 -200 ) ( 600 600 250 ))";
const VELOCITY_USAGE: &str =
    "snow velocity ( minX minY minZ ) ( maxX maxY maxZ ) (default ( -15 -15 -20 ) ( 15 15 -70 ))";
const BLOWING_DURATION_USAGE: &str = "snow blowing duration <seconds> (default 2)";
const BLOWING_LOW_USAGE: &str = "snow blowing low <seconds> (default 3)";
const BLOWING_VELOCITY_USAGE: &str = "snow blowing velocity ( min max ) (default ( 30 70 ))";
const BLOWING_SIZE_USAGE: &str = "snow blowing size ( sizeX sizeY sizeZ ) (default ( 1000 300 300 ))";

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

impl SnowSystem {
    /// Applies one snow sub-command. Arguments are fully parsed before any
    /// state changes, so a failed command leaves the system untouched.
    pub fn command(
        &mut self,
        sub_command: &str,
        tokens: &mut Tokens<'_>,
        particle_count: usize,
        effects: &mut EffectList,
        view: &ViewParams,
        ctx: &mut CommandContext<'_>,
    ) -> Result<(), CommandError> {
        match sub_command.to_ascii_lowercase().as_str() {
            "wind" => {
                let (origin, velocity, size) =
                    parse_wind_box(tokens).map_err(|e| e.with_usage(WIND_USAGE))?;

                let mut wind = WindEffect::new(particle_count, false);
                wind.update_params(vec3(origin), vec3(velocity), vec3(size));
                effects.add(wind);
            }
            "constantwind" => {
                let velocity = parse_vector_argument::<3>(tokens, "velocity")
                    .map_err(|e| e.with_usage(CONSTANT_WIND_USAGE))?;
                let mut wind = WindEffect::new(particle_count, true);
                wind.set_velocity(vec3(velocity));
                effects.add(wind);
            }
            "fog" => {
                add_misty_fog_effect(effects, SNOW_FOG_IMAGE, ctx.images, view, ctx.rng)?;
                self.wind_change = 0;
            }
            "alpha" => {
                self.alpha =
                    parse_nonzero(tokens, "alpha").map_err(|e| e.with_usage(ALPHA_USAGE))?;
            }
            "spread" => {
                let (min, max) = parse_min_max(tokens).map_err(|e| e.with_usage(SPREAD_USAGE))?;
                if let Some(axis) = collapsed_axis(vec3(min), vec3(max)) {
                    return Err(CommandError::InvalidValue {
                        argument: "max",
                        token: max[axis].to_string(),
                    }
                    .with_usage(SPREAD_USAGE));
                }
                self.set_spread(vec3(min), vec3(max));
            }
            "velocity" => {
                let (min, max) =
                    parse_min_max(tokens).map_err(|e| e.with_usage(VELOCITY_USAGE))?;
                self.min_velocity = vec3(min);
                self.max_velocity = vec3(max);
            }
            "blowing" => self.blowing_command(tokens)?,
            _ => {
                return Err(CommandError::UnknownCommand {
                    system: "snow",
                    command: sub_command.to_string(),
                })
            }
        }
        Ok(())
    }

    fn blowing_command(&mut self, tokens: &mut Tokens<'_>) -> Result<(), CommandError> {
        let which = tokens.next_token().unwrap_or("");
        match which.to_ascii_lowercase().as_str() {
            "duration" => {
                self.wind_duration = parse_nonzero(tokens, "duration")
                    .map_err(|e| e.with_usage(BLOWING_DURATION_USAGE))?;
            }
            "low" => {
                self.wind_low =
                    parse_nonzero(tokens, "low").map_err(|e| e.with_usage(BLOWING_LOW_USAGE))?;
            }
            "velocity" => {
                let [min, max] = parse_vector_argument::<2>(tokens, "windVelocity")
                    .map_err(|e| e.with_usage(BLOWING_VELOCITY_USAGE))?;
                self.wind_min = min;
                self.wind_max = max;
            }
            "size" => {
                let size = parse_vector_argument::<3>(tokens, "size")
                    .map_err(|e| e.with_usage(BLOWING_SIZE_USAGE))?;
                self.wind_size = vec3(size);
            }
            _ => {
                return Err(CommandError::UnknownCommand {
                    system: "snow",
                    command: format!("blowing {which}"),
                })
            }
        }
        Ok(())
    }
}

fn parse_min_max(tokens: &mut Tokens<'_>) -> Result<([f32; 3], [f32; 3]), CommandError> {
    let min = parse_vector_argument::<3>(tokens, "min")?;
    let max = parse_vector_argument::<3>(tokens, "max")?;
    Ok((min, max))
}

fn parse_wind_box(tokens: &mut Tokens<'_>) -> Result<([f32; 3], [f32; 3], [f32; 3]), CommandError> {
    let origin = parse_vector_argument::<3>(tokens, "origin")?;
    let velocity = parse_vector_argument::<3>(tokens, "velocity")?;
    let size = parse_vector_argument::<3>(tokens, "size")?;
    Ok((origin, velocity, size))
}
