use crate::commands::parse::{parse_nonzero, parse_vector_argument, Tokens};
use crate::commands::{CommandContext, CommandError};
use crate::config::RAIN_FOG_IMAGE;
use crate::effects::EffectList;
use crate::misty_fog::add_misty_fog_effect;
use crate::view::ViewParams;

use super::types::RainSystem;

const FALL_USAGE: &str = "rain fall ( minVelocity maxVelocity ) (default ( -60 -50 ))";
const SPREAD_USAGE: &str = "rain spread ( radius height ) (default ( 20 20 ))";
const ALPHA_USAGE: &str = "rain alpha <alpha> (default 0.10)";
const HEIGHT_USAGE: &str = "rain height <height> (default 5.0)";
const ANGLE_USAGE: &str = "rain angle <angle> (default 1.0)";

impl RainSystem {
    pub fn command(
        &mut self,
        sub_command: &str,
        tokens: &mut Tokens<'_>,
        effects: &mut EffectList,
        view: &ViewParams,
        ctx: &mut CommandContext<'_>,
    ) -> Result<(), CommandError> {
        match sub_command.to_ascii_lowercase().as_str() {
            "fog" => {
                add_misty_fog_effect(effects, RAIN_FOG_IMAGE, ctx.images, view, ctx.rng)?;
                self.wind_change = 0;
            }
            "fall" => {
                let [min, max] = parse_vector_argument::<2>(tokens, "fall")
                    .map_err(|e| e.with_usage(FALL_USAGE))?;
                self.min_velocity.z = min;
                self.max_velocity.z = max;
            }
            "spread" => {
                let [radius, height] = parse_vector_argument::<2>(tokens, "spread")
                    .map_err(|e| e.with_usage(SPREAD_USAGE))?;
                if let Some(bad) = [radius, height].into_iter().find(|v| *v <= 0.0) {
                    return Err(CommandError::InvalidValue {
                        argument: "spread",
                        token: bad.to_string(),
                    }
                    .with_usage(SPREAD_USAGE));
                }
                self.spread.y = radius;
                self.spread.z = height;
            }
            "alpha" => {
                self.alpha =
                    parse_nonzero(tokens, "alpha").map_err(|e| e.with_usage(ALPHA_USAGE))?;
            }
            "height" => {
                self.rain_height =
                    parse_nonzero(tokens, "height").map_err(|e| e.with_usage(HEIGHT_USAGE))?;
            }
            "angle" => {
                self.wind_angle =
                    parse_nonzero(tokens, "angle").map_err(|e| e.with_usage(ANGLE_USAGE))?;
            }
            _ => {
                return Err(CommandError::UnknownCommand {
                    system: "rain",
                    command: sub_command.to_string(),
                })
            }
        }
        Ok(())
    }
}
