//! Graphics submission seam.
//!
//! Effect systems describe what to draw through [`RenderBackend`]; the
//! rendering crate implements it on top of Bevy gizmos and tests use the
//! [`RecordingBackend`] below to inspect what would have been submitted.

use bevy::prelude::*;

/// Opaque handle for a texture known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Texture used for rain streaks.
pub const RAIN_TEXTURE: TextureId = TextureId(1);

/// Blend and depth state bits for a draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StateBits(pub u32);

impl StateBits {
    pub const NONE: StateBits = StateBits(0);
    /// Source-alpha / one-minus-source-alpha blending.
    pub const ALPHA: StateBits = StateBits(1);
    /// Skip depth writes.
    pub const NO_DEPTH_WRITE: StateBits = StateBits(1 << 2);

    pub fn contains(self, other: StateBits) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: StateBits) -> StateBits {
        StateBits(self.0 | other.0)
    }
}

/// Coordinate space a draw is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSpace {
    /// World coordinates (Z up).
    World,
    /// Camera-attached overlay: x right, y up, negative z in front of the eye.
    Overlay,
}

/// Point sprite sizing for unlit particle draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub size: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Constant, linear and quadratic distance attenuation.
    pub attenuation: Vec3,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            min_size: 1.0,
            max_size: 4.0,
            attenuation: Vec3::new(1.0, 0.0, 0.0004),
        }
    }
}

impl PointStyle {
    /// Apparent size of a point at `distance` from the eye.
    pub fn size_at(&self, distance: f32) -> f32 {
        let a = self.attenuation;
        let falloff = (a.x + a.y * distance + a.z * distance * distance).max(f32::EPSILON);
        (self.size / falloff.sqrt()).clamp(self.min_size, self.max_size)
    }
}

pub trait RenderBackend {
    fn bind_texture(&mut self, texture: Option<TextureId>);
    fn set_state(&mut self, state: StateBits);
    fn cull_face_enabled(&self) -> bool;
    fn set_cull_face(&mut self, enabled: bool);
    /// `Some(color)` enables fog tinting for following draws.
    fn set_fog(&mut self, fog_color: Option<u32>);
    /// Quad list in world space; every four vertexes form one quad.
    fn draw_quads(&mut self, verts: &[Vec3], tex_coords: &[Vec2], colors: &[[u8; 4]]);
    fn draw_points(&mut self, points: &[Vec3], color: Vec4, style: &PointStyle);
    /// Indexed quad list; every four indices form one quad.
    fn draw_indexed_quads(
        &mut self,
        space: DrawSpace,
        verts: &[Vec3],
        colors: &[Vec4],
        indices: &[u32],
    );
}

// =============================================================================
// Recording backend
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    BindTexture(Option<TextureId>),
    SetState(StateBits),
    SetCullFace(bool),
    SetFog(Option<u32>),
    Quads {
        verts: Vec<Vec3>,
        tex_coords: Vec<Vec2>,
        colors: Vec<[u8; 4]>,
    },
    Points {
        points: Vec<Vec3>,
        color: Vec4,
        style: PointStyle,
    },
    IndexedQuads {
        space: DrawSpace,
        vertex_count: usize,
        colors: Vec<Vec4>,
        indices: Vec<u32>,
    },
}

/// Backend that stores every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub calls: Vec<DrawCall>,
    pub cull_face: bool,
}

impl RecordingBackend {
    pub fn with_culling() -> Self {
        Self {
            calls: Vec::new(),
            cull_face: true,
        }
    }

    /// Number of actual draw submissions (quads, points or indexed quads).
    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCall::Quads { .. } | DrawCall::Points { .. } | DrawCall::IndexedQuads { .. }
                )
            })
            .count()
    }

    pub fn quad_draws(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Quads { .. }))
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.calls.push(DrawCall::BindTexture(texture));
    }

    fn set_state(&mut self, state: StateBits) {
        self.calls.push(DrawCall::SetState(state));
    }

    fn cull_face_enabled(&self) -> bool {
        self.cull_face
    }

    fn set_cull_face(&mut self, enabled: bool) {
        self.cull_face = enabled;
        self.calls.push(DrawCall::SetCullFace(enabled));
    }

    fn set_fog(&mut self, fog_color: Option<u32>) {
        self.calls.push(DrawCall::SetFog(fog_color));
    }

    fn draw_quads(&mut self, verts: &[Vec3], tex_coords: &[Vec2], colors: &[[u8; 4]]) {
        self.calls.push(DrawCall::Quads {
            verts: verts.to_vec(),
            tex_coords: tex_coords.to_vec(),
            colors: colors.to_vec(),
        });
    }

    fn draw_points(&mut self, points: &[Vec3], color: Vec4, style: &PointStyle) {
        self.calls.push(DrawCall::Points {
            points: points.to_vec(),
            color,
            style: *style,
        });
    }

    fn draw_indexed_quads(
        &mut self,
        space: DrawSpace,
        verts: &[Vec3],
        colors: &[Vec4],
        indices: &[u32],
    ) {
        self.calls.push(DrawCall::IndexedQuads {
            space,
            vertex_count: verts.len(),
            colors: colors.to_vec(),
            indices: indices.to_vec(),
        });
    }
}
