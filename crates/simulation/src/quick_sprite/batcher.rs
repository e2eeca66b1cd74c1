use bevy::prelude::*;

use crate::config::QUICK_SPRITE_MAX_VERTEXES;
use crate::render_backend::{RenderBackend, StateBits, TextureId};

/// Texture coordinates of one quad, repeated for every quad in the buffer:
/// bottom right, top right, top left, bottom left.
pub const QUICK_SPRITE_TEX_COORDS: [Vec2; 4] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
];

/// Running totals over the batcher's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuickSpriteStats {
    pub draws: u64,
    pub vertexes: u64,
}

#[derive(Debug)]
pub struct QuickSprite {
    verts: Vec<Vec3>,
    colors: Vec<[u8; 4]>,
    tex_coords: Vec<Vec2>,
    texture: Option<TextureId>,
    state: StateBits,
    fog_color: Option<u32>,
    turn_cull_back_on: bool,
    batch_open: bool,
    pub stats: QuickSpriteStats,
}

impl Default for QuickSprite {
    fn default() -> Self {
        let tex_coords = QUICK_SPRITE_TEX_COORDS
            .iter()
            .copied()
            .cycle()
            .take(QUICK_SPRITE_MAX_VERTEXES)
            .collect();
        Self {
            verts: Vec::with_capacity(QUICK_SPRITE_MAX_VERTEXES),
            colors: Vec::with_capacity(QUICK_SPRITE_MAX_VERTEXES),
            tex_coords,
            texture: None,
            state: StateBits::NONE,
            fog_color: None,
            turn_cull_back_on: false,
            batch_open: false,
            stats: QuickSpriteStats::default(),
        }
    }
}

impl QuickSprite {
    /// Vertexes accumulated since the last flush. Always a multiple of 4.
    pub fn pending_vertexes(&self) -> usize {
        self.verts.len()
    }

    pub fn is_batch_open(&self) -> bool {
        self.batch_open
    }

    /// Opens a batch keyed by `texture` and `state`. A non-zero `fog_color`
    /// enables fog tinting for the batch. Back-face culling is disabled until
    /// [`end_batch`](Self::end_batch).
    pub fn start_batch(
        &mut self,
        backend: &mut dyn RenderBackend,
        texture: Option<TextureId>,
        state: StateBits,
        fog_color: u32,
    ) {
        debug_assert!(!self.batch_open, "quick sprite batch already open");
        if self.batch_open {
            warn!("QuickSprite: start_batch called while a batch is open, discarding pending sprites");
        }

        self.verts.clear();
        self.colors.clear();
        self.texture = texture;
        self.state = state;
        self.fog_color = (fog_color != 0).then_some(fog_color);

        self.turn_cull_back_on = backend.cull_face_enabled();
        backend.set_cull_face(false);
        self.batch_open = true;
    }

    /// Appends one quad, flushing first when fewer than 4 slots remain.
    pub fn add_sprite(&mut self, backend: &mut dyn RenderBackend, quad: [Vec3; 4], color: [u8; 4]) {
        debug_assert!(self.batch_open, "add_sprite outside of a batch");

        if self.verts.len() > QUICK_SPRITE_MAX_VERTEXES - 4 {
            self.flush(backend);
        }

        self.verts.extend_from_slice(&quad);
        self.colors.extend_from_slice(&[color; 4]);
    }

    /// Flushes the remainder and restores the culling state.
    pub fn end_batch(&mut self, backend: &mut dyn RenderBackend) {
        self.flush(backend);
        if self.turn_cull_back_on {
            backend.set_cull_face(true);
        }
        self.turn_cull_back_on = false;
        self.batch_open = false;
    }

    /// Submits everything accumulated as one draw. No-op when empty.
    pub fn flush(&mut self, backend: &mut dyn RenderBackend) {
        let count = self.verts.len();
        if count == 0 {
            return;
        }

        backend.bind_texture(self.texture);
        backend.set_state(self.state);
        if self.fog_color.is_some() {
            backend.set_fog(self.fog_color);
        }

        backend.draw_quads(&self.verts, &self.tex_coords[..count], &self.colors);

        if self.fog_color.is_some() {
            backend.set_fog(None);
        }

        self.stats.draws += 1;
        self.stats.vertexes += count as u64;
        self.verts.clear();
        self.colors.clear();
    }
}
