//! End-to-end scenario through the public API only: console commands into a
//! `WorldEffects` registry, then frames advanced and drawn into a recording
//! backend.
//!
//! Run: cargo test -p simulation --test world_effects_scenario

use bevy::prelude::*;

use simulation::images::ProceduralFogImages;
use simulation::render_backend::{DrawCall, RecordingBackend};
use simulation::sim_rng::SimRng;
use simulation::world_query::{Contents, OpenSky};
use simulation::{execute_command, CommandContext, CommandOutcome, WorldEffects, WorldEffectsSettings};

struct Scenario {
    world: WorldEffects,
    rng: SimRng,
    images: ProceduralFogImages,
    settings: WorldEffectsSettings,
}

impl Scenario {
    fn new() -> Self {
        Self {
            world: WorldEffects::default(),
            rng: SimRng::from_seed_u64(1234),
            images: ProceduralFogImages::default(),
            settings: WorldEffectsSettings::default(),
        }
    }

    fn run(&mut self, line: &str) -> CommandOutcome {
        let mut ctx = CommandContext {
            rng: &mut self.rng,
            images: &self.images,
            settings: &self.settings,
        };
        execute_command(&mut self.world, line, &mut ctx).unwrap()
    }
}

#[test]
fn snowstorm_moves_with_camera() {
    let mut s = Scenario::new();
    s.run("snow init 100");
    s.run("snow fog");

    // Inside a building the first frame only places flakes; nothing moves.
    let indoors = |_p: Vec3| Contents::SOLID;
    let mut backend = RecordingBackend::default();
    s.world.advance_and_render_all(0.1, &indoors, &mut s.rng, &mut backend);

    let snow = s.world.find_system("snow").unwrap();
    for p in snow.particles() {
        assert!(p.position.cmpge(Vec3::new(-600.0, -600.0, -200.0)).all());
        assert!(p.position.cmple(Vec3::new(600.0, 600.0, 250.0)).all());
    }
    assert_eq!(backend.draw_count(), 0);

    // Step outside and walk east.
    let mut origin = Vec3::ZERO;
    for _ in 0..20 {
        origin.x += 40.0;
        s.world.set_view(simulation::view::ViewParams::at(origin));
        backend.clear();
        s.world.advance_and_render_all(0.05, &OpenSky, &mut s.rng, &mut backend);
    }

    let snow = s.world.find_system("snow").unwrap();
    let mins = origin + Vec3::new(-600.0, -600.0, -200.0) - 100.0;
    let maxs = origin + Vec3::new(600.0, 600.0, 250.0) + 100.0;
    assert!(snow
        .particles()
        .iter()
        .all(|p| p.position.cmpge(mins).all() && p.position.cmple(maxs).all()));
    assert!(backend
        .calls
        .iter()
        .any(|c| matches!(c, DrawCall::Points { .. })));
    assert!(backend
        .calls
        .iter()
        .any(|c| matches!(c, DrawCall::IndexedQuads { .. })));
}

#[test]
fn rain_then_remove() {
    let mut s = Scenario::new();
    assert!(matches!(
        s.run("rain init 500"),
        CommandOutcome::Initialized { particles: 500, .. }
    ));
    s.run("rain angle 3");

    let mut backend = RecordingBackend::default();
    for _ in 0..10 {
        backend.clear();
        s.world.advance_and_render_all(0.1, &OpenSky, &mut s.rng, &mut backend);
    }
    assert!(backend.quad_draws().count() >= 2);
    assert_eq!(s.world.query_wind_speed(), Some(225.0));

    assert_eq!(s.run("rain remove"), CommandOutcome::Removed("rain"));
    assert!(s.world.is_empty());
    assert_eq!(s.world.query_wind_speed(), None);
}
