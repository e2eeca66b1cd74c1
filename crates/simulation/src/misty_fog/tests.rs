#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::commands::CommandError;
    use crate::config::{MISTYFOG_DEPTH, MISTYFOG_EXTENT};
    use crate::effects::{Effect, EffectList};
    use crate::images::{fog_image_path, FogTexture, ImageError, MemoryImages};
    use crate::misty_fog::{add_misty_fog_effect, update_fog_wind_direction, MistyFogEffect};
    use crate::render_backend::{DrawCall, DrawSpace, RecordingBackend};
    use crate::sim_rng::SimRng;
    use crate::test_harness::{frame_at, render_ctx};
    use crate::view::ViewParams;
    use crate::world_query::{Contents, OpenSky};
    use crate::quick_sprite::QuickSprite;

    fn solid_fog(red: u8) -> MistyFogEffect {
        let mut rng = SimRng::default();
        MistyFogEffect::new(
            FogTexture::solid(8, 8, [red, red, red, 255]),
            &ViewParams::default(),
            &mut rng,
        )
    }

    fn step(fog: &mut MistyFogEffect, rng: &mut SimRng, elapsed: f32) {
        let mut frame = frame_at(elapsed, Vec3::ZERO, &OpenSky, rng);
        fog.update(&mut frame);
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_fog_layout() {
        let fog = solid_fog(255);
        assert_eq!(fog.alpha, 0.3);
        assert_eq!(fog.fade_alpha, 0.0);
        for pair in &fog.images {
            assert!(pair[0].is_rendering);
            assert!(!pair[1].is_rendering);
            assert_eq!(pair[0].alpha, 1.0);
            assert!((pair[0].min_size - 0.15).abs() < 1e-6);
            assert!((pair[0].max_size - 0.3).abs() < 1e-6);
            assert!(pair[0].speed >= 200.0 && pair[0].speed <= 700.0);
            assert!(pair[0].width() > 0.0);
        }
        for row in &fog.verts {
            for v in row {
                assert_eq!(v.z, MISTYFOG_DEPTH);
                assert!(v.x.abs() <= MISTYFOG_EXTENT + 0.1);
                assert!(v.y.abs() <= MISTYFOG_EXTENT + 0.1);
            }
        }
        assert_eq!(fog.indices[0][0], [0, 1, 31, 30]);
        assert_eq!(fog.indices[28][28], [868, 869, 899, 898]);
    }

    #[test]
    fn test_add_misty_fog_effect_missing_image_fails() {
        let mut effects = EffectList::default();
        let mut rng = SimRng::default();
        let images = MemoryImages::default();
        let err = add_misty_fog_effect(&mut effects, 1, &images, &ViewParams::default(), &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            CommandError::ImageLoad(ImageError::NotFound("gfx/world/fog1.png".to_string()))
        );
        assert!(effects.is_empty());

        let images = MemoryImages::default().with(fog_image_path(1), FogTexture::solid(2, 2, [9; 4]));
        assert!(
            add_misty_fog_effect(&mut effects, 1, &images, &ViewParams::default(), &mut rng).is_ok()
        );
        assert_eq!(effects.len(), 1);
    }

    // -------------------------------------------------------------------------
    // Alpha accumulation
    // -------------------------------------------------------------------------

    #[test]
    fn test_update_textures_recomputes_from_scratch() {
        let mut fog = solid_fog(255);
        fog.fade_alpha = 1.0;
        fog.update_textures();
        let first = fog.colors;
        fog.update_textures();
        fog.update_textures();
        assert_eq!(fog.colors, first);
        // Two visible slots, each contributing 255 * 1.0 * 0.3 / 255.
        for color in fog.colors.iter().flatten() {
            assert!((color.w - 0.6).abs() < 1e-5, "alpha {}", color.w);
            assert_eq!(color.truncate(), Vec3::ONE);
        }
    }

    #[test]
    fn test_fade_alpha_tracks_open_air() {
        let mut fog = solid_fog(200);
        let mut rng = SimRng::default();
        step(&mut fog, &mut rng, 0.5);
        assert!((fog.fade_alpha - 0.25).abs() < 1e-6);
        for _ in 0..10 {
            step(&mut fog, &mut rng, 0.5);
        }
        assert_eq!(fog.fade_alpha, 1.0);

        let indoors = |_p: Vec3| Contents::SOLID;
        let mut frame = frame_at(1.0, Vec3::ZERO, &indoors, &mut rng);
        fog.update(&mut frame);
        assert!((fog.fade_alpha - 0.5).abs() < 1e-6);

        let underwater = |_p: Vec3| Contents::OUTSIDE | Contents::WATER;
        let mut frame = frame_at(1.0, Vec3::ZERO, &underwater, &mut rng);
        fog.update(&mut frame);
        assert_eq!(fog.fade_alpha, 0.0);
    }

    #[test]
    fn test_faded_out_fog_skips_image_work() {
        let mut fog = solid_fog(200);
        fog.set_wind_direction(Vec3::X);
        let before = fog.images.clone();
        let mut rng = SimRng::default();
        let indoors = |_p: Vec3| Contents::EMPTY;
        let mut frame = frame_at(0.1, Vec3::ZERO, &indoors, &mut rng);
        fog.update(&mut frame);
        assert_eq!(fog.images, before);
    }

    // -------------------------------------------------------------------------
    // Drift and crossfade
    // -------------------------------------------------------------------------

    #[test]
    fn test_forward_wind_grows_window() {
        let mut fog = solid_fog(100);
        fog.set_wind_direction(Vec3::X * 0.025);
        let image = &mut fog.images[0][0];
        image.texture_coords = [[0.4, 0.4], [0.6, 0.6]];
        image.speed = 250.0;
        assert!(!image.advance(&ViewParams::default()));
        let grow = 0.025 / 250.0;
        assert!((image.width() - (0.2 + 2.0 * grow)).abs() < 1e-6);
        assert!((image.height() - (0.2 + 2.0 * grow)).abs() < 1e-6);
    }

    #[test]
    fn test_right_wind_shifts_window() {
        let mut fog = solid_fog(100);
        fog.set_wind_direction(Vec3::NEG_Y * 0.025);
        let image = &mut fog.images[0][0];
        image.texture_coords = [[0.4, 0.4], [0.6, 0.6]];
        image.speed = 250.0;
        image.advance(&ViewParams::default());
        let shift = 0.025 / 250.0;
        assert!((image.texture_coords[0][0] - (0.4 + shift)).abs() < 1e-6);
        assert!((image.texture_coords[1][0] - (0.6 + shift)).abs() < 1e-6);
        assert!((image.width() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_bounds_window_swaps_with_buddy() {
        let mut fog = solid_fog(100);
        let mut rng = SimRng::default();
        fog.images[0][0].texture_coords = [[0.1, 0.1], [0.6, 0.6]];
        step(&mut fog, &mut rng, 0.1);

        let [main, buddy] = &fog.images[0];
        assert!(main.is_rendering && main.alpha_fade && main.alpha_direction < 0.0);
        assert!(buddy.is_rendering && buddy.alpha_fade && buddy.alpha_direction > 0.0);
        assert!((buddy.alpha - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_swap_waits_for_buddy_fade_out() {
        let mut fog = solid_fog(100);
        let mut rng = SimRng::default();
        fog.images[0][0].texture_coords = [[0.1, 0.1], [0.6, 0.6]];
        fog.images[0][1].is_rendering = true;
        fog.images[0][1].alpha_fade = true;
        fog.images[0][1].alpha_direction = -0.025;
        fog.images[0][1].alpha = 0.5;
        step(&mut fog, &mut rng, 0.1);
        assert!(!fog.images[0][0].alpha_fade);
        assert!(fog.images[0][1].alpha_direction < 0.0);
    }

    #[test]
    fn test_completed_fade_out_stops_rendering() {
        let mut fog = solid_fog(100);
        let image = &mut fog.images[1][0];
        image.alpha = 0.005;
        image.alpha_fade = true;
        image.alpha_direction = -0.025;
        image.advance(&ViewParams::default());
        assert_eq!(image.alpha, 0.0);
        assert!(!image.is_rendering);
        assert!(!image.alpha_fade);
    }

    #[test]
    fn test_crossfade_invariants_over_long_run() {
        let mut fog = solid_fog(180);
        let mut rng = SimRng::from_seed_u64(77);
        fog.set_wind_direction(Vec3::new(0.6, -0.8, 0.0) * 0.025);
        let mut swaps = 0;
        let mut was_fading = [false; 2];

        for _ in 0..8_000 {
            step(&mut fog, &mut rng, 0.05);
            for (i, pair) in fog.images.iter().enumerate() {
                assert!(pair.iter().any(|s| s.is_rendering), "pair {i} went dark");
                let fading_in = pair
                    .iter()
                    .filter(|s| s.is_rendering && s.alpha_fade && s.alpha_direction > 0.0)
                    .count();
                let fading_out = pair
                    .iter()
                    .filter(|s| s.is_rendering && s.alpha_fade && s.alpha_direction < 0.0)
                    .count();
                assert!(fading_in <= 1 && fading_out <= 1);
                for slot in pair {
                    assert!(!(slot.is_rendering && slot.alpha <= 0.0 && slot.alpha_direction < 0.0));
                }
                let fading = fading_in + fading_out > 0;
                if fading && !was_fading[i] {
                    swaps += 1;
                }
                was_fading[i] = fading;
            }
        }
        assert!(swaps > 0, "wind never drove a crossfade");
    }

    // -------------------------------------------------------------------------
    // Render / command / wind propagation
    // -------------------------------------------------------------------------

    #[test]
    fn test_render_is_single_overlay_draw() {
        let mut fog = solid_fog(255);
        let mut backend = RecordingBackend::default();
        let mut qs = QuickSprite::default();

        fog.render(&mut render_ctx(&mut backend, &mut qs));
        assert_eq!(backend.draw_count(), 0, "invisible fog still drew");

        fog.fade_alpha = 1.0;
        fog.update_textures();
        fog.render(&mut render_ctx(&mut backend, &mut qs));
        assert_eq!(backend.draw_count(), 1);
        let Some(DrawCall::IndexedQuads {
            space,
            vertex_count,
            indices,
            ..
        }) = backend.calls.last()
        else {
            panic!("expected an indexed quad draw");
        };
        assert_eq!(*space, DrawSpace::Overlay);
        assert_eq!(*vertex_count, 900);
        assert_eq!(indices.len(), 29 * 29 * 4);
    }

    #[test]
    fn test_density_command() {
        let mut fog = solid_fog(1);
        assert_eq!(fog.command("fog density 0.55"), Ok(true));
        assert_eq!(fog.alpha, 0.55);
        assert_eq!(fog.command("FOG DENSITY 0.25"), Ok(true));
        assert_eq!(fog.alpha, 0.25);
        assert_eq!(fog.command("fog thickness 1"), Ok(false));
        assert!(fog.command("fog density abc").is_err());
        assert_eq!(fog.alpha, 0.25);
    }

    #[test]
    fn test_update_fog_wind_direction_reaches_every_fog() {
        let mut effects = EffectList::default();
        let a = effects.add(solid_fog(1));
        effects.add(crate::wind::WindEffect::new(0, true));
        let b = effects.add(solid_fog(2));
        let wind = Vec3::new(0.0, 0.025, 0.0);
        update_fog_wind_direction(&mut effects, wind);
        for id in [a, b] {
            let fog = effects.get(id).and_then(Effect::as_fog).unwrap();
            assert!(fog.images.iter().flatten().all(|i| i.wind_transform == wind));
        }
    }
}
