//! Immediate-mode [`RenderBackend`] on top of Bevy gizmos.
//!
//! Gizmos only draw lines, so each primitive is reduced to its outline:
//! rain quads become their streak axis, snow points become short vertical
//! ticks sized by the point attenuation, and the fog grid becomes a mesh of
//! gradient-colored cells. Textures and fog tinting are ignored.

use bevy::prelude::*;

use simulation::render_backend::{DrawSpace, PointStyle, RenderBackend, StateBits, TextureId};

use crate::coords::to_bevy;

/// Alpha multiplier for gizmo lines standing in for filled sprites.
const LINE_ALPHA_BOOST: f32 = 4.0;

/// World length of a snow tick per unit of point size.
const POINT_TICK_SCALE: f32 = 0.08;

/// Cells whose corners are all below this alpha are skipped.
const MIN_VISIBLE_ALPHA: f32 = 0.002;

pub struct GizmoBackend<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    camera: GlobalTransform,
    state: StateBits,
    cull_face: bool,
}

impl<'a, 'w, 's> GizmoBackend<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>, camera: GlobalTransform) -> Self {
        Self {
            gizmos,
            camera,
            state: StateBits::NONE,
            cull_face: true,
        }
    }

    fn alpha(&self, alpha: f32) -> f32 {
        if self.state.contains(StateBits::ALPHA) {
            (alpha * LINE_ALPHA_BOOST).min(1.0)
        } else {
            1.0
        }
    }

    fn place(&self, space: DrawSpace, v: Vec3) -> Vec3 {
        match space {
            DrawSpace::World => to_bevy(v),
            // Overlay axes already match the camera's local frame.
            DrawSpace::Overlay => self.camera.transform_point(v),
        }
    }
}

/// Center line of a thin quad, from its first edge to its opposite edge.
pub fn quad_axis(quad: &[Vec3]) -> (Vec3, Vec3) {
    ((quad[0] + quad[1]) * 0.5, (quad[2] + quad[3]) * 0.5)
}

impl RenderBackend for GizmoBackend<'_, '_, '_> {
    fn bind_texture(&mut self, _texture: Option<TextureId>) {}

    fn set_state(&mut self, state: StateBits) {
        self.state = state;
    }

    fn cull_face_enabled(&self) -> bool {
        self.cull_face
    }

    fn set_cull_face(&mut self, enabled: bool) {
        self.cull_face = enabled;
    }

    fn set_fog(&mut self, _fog_color: Option<u32>) {}

    fn draw_quads(&mut self, verts: &[Vec3], _tex_coords: &[Vec2], colors: &[[u8; 4]]) {
        for (quad, color) in verts.chunks_exact(4).zip(colors.chunks_exact(4)) {
            let [r, g, b, a] = color[0].map(|c| c as f32 / 255.0);
            let color = Color::srgba(r, g, b, self.alpha(a));
            let (head, tail) = quad_axis(quad);
            self.gizmos.line(to_bevy(head), to_bevy(tail), color);
        }
    }

    fn draw_points(&mut self, points: &[Vec3], color: Vec4, style: &PointStyle) {
        let eye = self.camera.translation();
        let color = Color::srgba(color.x, color.y, color.z, self.alpha(color.w));
        for &point in points {
            let p = to_bevy(point);
            let size = style.size_at(p.distance(eye)) * POINT_TICK_SCALE;
            self.gizmos.line(p, p - Vec3::Y * size, color);
        }
    }

    fn draw_indexed_quads(
        &mut self,
        space: DrawSpace,
        verts: &[Vec3],
        colors: &[Vec4],
        indices: &[u32],
    ) {
        for quad in indices.chunks_exact(4) {
            let Some(corners) = quad_corners(quad, verts.len().min(colors.len())) else {
                continue;
            };
            if corners.iter().all(|&i| colors[i].w < MIN_VISIBLE_ALPHA) {
                continue;
            }
            let outline: Vec<(Vec3, Color)> = corners
                .iter()
                .chain(std::iter::once(&corners[0]))
                .map(|&i| {
                    let c = colors[i];
                    (
                        self.place(space, verts[i]),
                        Color::srgba(c.x, c.y, c.z, self.alpha(c.w)),
                    )
                })
                .collect();
            self.gizmos.linestrip_gradient(outline);
        }
    }
}

/// Index lookups for one quad, or `None` if any index is out of range.
fn quad_corners(quad: &[u32], len: usize) -> Option<[usize; 4]> {
    let mut out = [0; 4];
    for (slot, &i) in out.iter_mut().zip(quad) {
        let i = i as usize;
        if i >= len {
            return None;
        }
        *slot = i;
    }
    Some(out)
}
