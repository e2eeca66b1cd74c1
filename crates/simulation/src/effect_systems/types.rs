use crate::effects::EffectList;
use crate::frame::{FrameContext, RenderContext};
use crate::particles::Particle;
use crate::rain::{RainParts, RainSystem};
use crate::snow::{SnowParts, SnowSystem};

#[derive(Debug, Clone)]
pub enum SystemKind {
    Snow(SnowSystem),
    Rain(RainSystem),
}

/// One running weather system: its kind-specific state, a fixed-size
/// particle pool and the effects it owns.
#[derive(Debug, Clone)]
pub struct EffectSystem {
    pub kind: SystemKind,
    particles: Vec<Particle>,
    pub effects: EffectList,
    pub is_rendering: bool,
}

impl EffectSystem {
    pub const SNOW: &'static str = "snow";
    pub const RAIN: &'static str = "rain";

    pub fn name(&self) -> &'static str {
        match self.kind {
            SystemKind::Snow(_) => Self::SNOW,
            SystemKind::Rain(_) => Self::RAIN,
        }
    }

    /// The pool never grows or shrinks after construction.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn as_snow(&self) -> Option<&SnowSystem> {
        match &self.kind {
            SystemKind::Snow(snow) => Some(snow),
            _ => None,
        }
    }

    pub fn as_snow_mut(&mut self) -> Option<&mut SnowSystem> {
        match &mut self.kind {
            SystemKind::Snow(snow) => Some(snow),
            _ => None,
        }
    }

    pub fn as_rain(&self) -> Option<&RainSystem> {
        match &self.kind {
            SystemKind::Rain(rain) => Some(rain),
            _ => None,
        }
    }

    pub fn as_rain_mut(&mut self) -> Option<&mut RainSystem> {
        match &mut self.kind {
            SystemKind::Rain(rain) => Some(rain),
            _ => None,
        }
    }

    pub fn update(&mut self, frame: &mut FrameContext<'_>) {
        let Self {
            kind,
            particles,
            effects,
            is_rendering,
        } = self;
        match kind {
            SystemKind::Snow(snow) => snow.update(particles, effects, is_rendering, frame),
            SystemKind::Rain(rain) => rain.update(particles, effects, is_rendering, frame),
        }
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        match &self.kind {
            SystemKind::Snow(snow) => {
                snow.render(&self.particles, &self.effects, self.is_rendering, ctx)
            }
            SystemKind::Rain(rain) => {
                rain.render(&self.particles, &self.effects, self.is_rendering, ctx)
            }
        }
    }
}

impl From<SnowParts> for EffectSystem {
    fn from(parts: SnowParts) -> Self {
        Self {
            kind: SystemKind::Snow(parts.snow),
            particles: parts.particles,
            effects: parts.effects,
            is_rendering: false,
        }
    }
}

impl From<RainParts> for EffectSystem {
    fn from(parts: RainParts) -> Self {
        Self {
            kind: SystemKind::Rain(parts.rain),
            particles: parts.particles,
            effects: parts.effects,
            is_rendering: false,
        }
    }
}
