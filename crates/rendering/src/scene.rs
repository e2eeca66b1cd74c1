//! Demo scene: open ground, a covered pavilion and a pond.
//!
//! [`ShelterWorld`] answers the point-contents queries for the same layout
//! the meshes show, so flakes vanish under the roof and rain fades out when
//! the camera dips below the pond surface.

use bevy::prelude::*;

use simulation::world_query::{Contents, WorldQuery};

use crate::coords::to_bevy;

const GROUND_SIZE: f32 = 800.0;
const ROOF_THICKNESS: f32 = 0.5;

/// Point oracle for the demo layout, in simulation space (Z up).
#[derive(Debug, Clone, PartialEq)]
pub struct ShelterWorld {
    /// Footprint corners of the pavilion roof.
    pub shelter_min: Vec2,
    pub shelter_max: Vec2,
    /// Height of the roof underside.
    pub roof_height: f32,
    pub pond_min: Vec2,
    pub pond_max: Vec2,
    /// Water surface height; the ground sits at z = 0 everywhere else.
    pub pond_depth: f32,
}

impl Default for ShelterWorld {
    fn default() -> Self {
        Self {
            shelter_min: Vec2::new(-20.0, -10.0),
            shelter_max: Vec2::new(20.0, 10.0),
            roof_height: 8.0,
            pond_min: Vec2::new(30.0, -20.0),
            pond_max: Vec2::new(60.0, 20.0),
            pond_depth: 6.0,
        }
    }
}

fn within(p: Vec2, min: Vec2, max: Vec2) -> bool {
    p.cmpge(min).all() && p.cmple(max).all()
}

impl WorldQuery for ShelterWorld {
    fn point_contents(&self, point: Vec3) -> Contents {
        let xy = point.truncate();
        if within(xy, self.pond_min, self.pond_max) && point.z < 0.0 {
            if point.z < -self.pond_depth {
                return Contents::SOLID;
            }
            return Contents::OUTSIDE | Contents::WATER;
        }
        if point.z < 0.0 {
            return Contents::SOLID;
        }
        if within(xy, self.shelter_min, self.shelter_max) {
            if point.z < self.roof_height {
                return Contents::EMPTY;
            }
            if point.z < self.roof_height + ROOF_THICKNESS {
                return Contents::SOLID;
            }
        }
        Contents::OUTSIDE
    }
}

/// System: spawn meshes matching [`ShelterWorld::default`] plus lighting.
pub fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let world = ShelterWorld::default();

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb(0.42, 0.45, 0.40))),
        Transform::default(),
    ));

    let shelter_size = world.shelter_max - world.shelter_min;
    let shelter_center = (world.shelter_min + world.shelter_max) * 0.5;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(shelter_size.x, ROOF_THICKNESS, shelter_size.y))),
        MeshMaterial3d(materials.add(Color::srgb(0.55, 0.30, 0.22))),
        Transform::from_translation(to_bevy(
            shelter_center.extend(world.roof_height + ROOF_THICKNESS * 0.5),
        )),
    ));
    // Corner posts.
    let post = meshes.add(Cuboid::new(0.6, world.roof_height, 0.6));
    let post_material = materials.add(Color::srgb(0.35, 0.25, 0.18));
    for corner in [
        world.shelter_min,
        Vec2::new(world.shelter_max.x, world.shelter_min.y),
        world.shelter_max,
        Vec2::new(world.shelter_min.x, world.shelter_max.y),
    ] {
        commands.spawn((
            Mesh3d(post.clone()),
            MeshMaterial3d(post_material.clone()),
            Transform::from_translation(to_bevy(corner.extend(world.roof_height * 0.5))),
        ));
    }

    let pond_size = world.pond_max - world.pond_min;
    let pond_center = (world.pond_min + world.pond_max) * 0.5;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(pond_size.x, pond_size.y))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.15, 0.30, 0.55, 0.8),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        // Slightly above the ground plane to avoid z-fighting.
        Transform::from_translation(to_bevy(pond_center.extend(0.02))),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.8, 0.85, 1.0),
        brightness: 250.0,
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 6000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}
