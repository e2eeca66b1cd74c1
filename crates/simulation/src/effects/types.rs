use crate::commands::CommandError;
use crate::frame::{FrameContext, RenderContext};
use crate::misty_fog::MistyFogEffect;
use crate::particles::Particle;
use crate::wind::WindEffect;

#[derive(Debug, Clone)]
pub enum Effect {
    Wind(WindEffect),
    MistyFog(Box<MistyFogEffect>),
}

impl Effect {
    pub const WIND: &'static str = "wind";
    pub const FOG: &'static str = "fog";

    pub fn name(&self) -> &'static str {
        match self {
            Effect::Wind(_) => Self::WIND,
            Effect::MistyFog(_) => Self::FOG,
        }
    }

    pub fn update(&mut self, particles: &mut [Particle], frame: &mut FrameContext<'_>) {
        match self {
            Effect::Wind(wind) => wind.update(particles, frame),
            Effect::MistyFog(fog) => fog.update(frame),
        }
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        match self {
            Effect::Wind(_) => {}
            Effect::MistyFog(fog) => fog.render(ctx),
        }
    }

    /// Offers a raw command line to the effect. `Ok(true)` when handled.
    pub fn command(&mut self, text: &str) -> Result<bool, CommandError> {
        match self {
            Effect::Wind(_) => Ok(false),
            Effect::MistyFog(fog) => fog.command(text),
        }
    }

    pub fn as_wind(&self) -> Option<&WindEffect> {
        match self {
            Effect::Wind(wind) => Some(wind),
            _ => None,
        }
    }

    pub fn as_wind_mut(&mut self) -> Option<&mut WindEffect> {
        match self {
            Effect::Wind(wind) => Some(wind),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn as_fog(&self) -> Option<&MistyFogEffect> {
        match self {
            Effect::MistyFog(fog) => Some(fog),
            _ => None,
        }
    }

    pub fn as_fog_mut(&mut self) -> Option<&mut MistyFogEffect> {
        match self {
            Effect::MistyFog(fog) => Some(fog),
            _ => None,
        }
    }
}

impl From<WindEffect> for Effect {
    fn from(wind: WindEffect) -> Self {
        Effect::Wind(wind)
    }
}

impl From<MistyFogEffect> for Effect {
    fn from(fog: MistyFogEffect) -> Self {
        Effect::MistyFog(Box::new(fog))
    }
}
