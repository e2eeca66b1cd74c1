use bevy::prelude::*;

use super::{QuickSprite, QUICK_SPRITE_TEX_COORDS};
use crate::config::QUICK_SPRITE_MAX_VERTEXES;
use crate::render_backend::{DrawCall, RecordingBackend, StateBits, TextureId};

fn quad(i: usize) -> [Vec3; 4] {
    let x = i as f32;
    [
        Vec3::new(x, 0.0, 0.0),
        Vec3::new(x, 0.0, 1.0),
        Vec3::new(x + 1.0, 0.0, 1.0),
        Vec3::new(x + 1.0, 0.0, 0.0),
    ]
}

#[test]
fn test_flush_count_for_overflowing_batch() {
    let mut qs = QuickSprite::default();
    let mut backend = RecordingBackend::default();
    let n = 600;

    qs.start_batch(&mut backend, Some(TextureId(3)), StateBits::ALPHA, 0);
    for i in 0..n {
        qs.add_sprite(&mut backend, quad(i), [255, 255, 255, 128]);
        assert_eq!(qs.pending_vertexes() % 4, 0);
        assert!(qs.pending_vertexes() <= QUICK_SPRITE_MAX_VERTEXES);
    }
    qs.end_batch(&mut backend);

    let expected_min = (n * 4).div_ceil(QUICK_SPRITE_MAX_VERTEXES);
    assert!(backend.draw_count() >= expected_min);
    assert_eq!(qs.stats.vertexes, (n * 4) as u64);
    assert_eq!(qs.stats.draws, backend.draw_count() as u64);
    assert_eq!(qs.pending_vertexes(), 0);
}

#[test]
fn test_full_buffer_flushes_before_append() {
    let mut qs = QuickSprite::default();
    let mut backend = RecordingBackend::default();
    let per_draw = QUICK_SPRITE_MAX_VERTEXES / 4;

    qs.start_batch(&mut backend, None, StateBits::ALPHA, 0);
    for i in 0..per_draw {
        qs.add_sprite(&mut backend, quad(i), [0; 4]);
    }
    assert_eq!(backend.draw_count(), 0);
    assert_eq!(qs.pending_vertexes(), QUICK_SPRITE_MAX_VERTEXES);

    qs.add_sprite(&mut backend, quad(per_draw), [0; 4]);
    assert_eq!(backend.draw_count(), 1);
    assert_eq!(qs.pending_vertexes(), 4);
    qs.end_batch(&mut backend);
    assert_eq!(backend.draw_count(), 2);
}

#[test]
fn test_empty_batch_draws_nothing() {
    let mut qs = QuickSprite::default();
    let mut backend = RecordingBackend::default();
    qs.start_batch(&mut backend, None, StateBits::ALPHA, 0);
    qs.end_batch(&mut backend);
    assert_eq!(backend.draw_count(), 0);
    assert_eq!(qs.stats.draws, 0);
}

#[test]
fn test_culling_disabled_and_restored() {
    let mut qs = QuickSprite::default();
    let mut backend = RecordingBackend::with_culling();

    qs.start_batch(&mut backend, None, StateBits::ALPHA, 0);
    assert!(!backend.cull_face);
    qs.add_sprite(&mut backend, quad(0), [1, 2, 3, 4]);
    qs.end_batch(&mut backend);
    assert!(backend.cull_face);
    assert!(!qs.is_batch_open());

    // Culling that was already off stays off.
    let mut backend = RecordingBackend::default();
    qs.start_batch(&mut backend, None, StateBits::ALPHA, 0);
    qs.end_batch(&mut backend);
    assert!(!backend.cull_face);
}

#[test]
fn test_flush_binds_key_and_uses_fixed_tex_coords() {
    let mut qs = QuickSprite::default();
    let mut backend = RecordingBackend::default();
    let state = StateBits::ALPHA.union(StateBits::NO_DEPTH_WRITE);

    qs.start_batch(&mut backend, Some(TextureId(9)), state, 0x00ff_ffff);
    qs.add_sprite(&mut backend, quad(0), [10, 20, 30, 40]);
    qs.add_sprite(&mut backend, quad(1), [50, 60, 70, 80]);
    qs.end_batch(&mut backend);

    assert!(backend.calls.contains(&DrawCall::BindTexture(Some(TextureId(9)))));
    assert!(backend.calls.contains(&DrawCall::SetState(state)));
    assert!(backend.calls.contains(&DrawCall::SetFog(Some(0x00ff_ffff))));
    let draw_at = backend
        .calls
        .iter()
        .position(|c| matches!(c, DrawCall::Quads { .. }))
        .unwrap();
    assert_eq!(backend.calls[draw_at + 1], DrawCall::SetFog(None));

    let Some(DrawCall::Quads {
        verts,
        tex_coords,
        colors,
    }) = backend.quad_draws().next().cloned()
    else {
        panic!("expected a quad draw");
    };
    assert_eq!(verts.len(), 8);
    assert_eq!(&tex_coords[..4], &QUICK_SPRITE_TEX_COORDS);
    assert_eq!(&tex_coords[4..], &QUICK_SPRITE_TEX_COORDS);
    assert_eq!(colors[0], [10, 20, 30, 40]);
    assert_eq!(colors[7], [50, 60, 70, 80]);
}
