use bevy::prelude::*;

use super::{Effect, EffectId, EffectList};
use crate::commands::CommandError;
use crate::images::FogTexture;
use crate::misty_fog::MistyFogEffect;
use crate::sim_rng::SimRng;
use crate::view::ViewParams;
use crate::wind::WindEffect;

fn fog() -> MistyFogEffect {
    let mut rng = SimRng::default();
    MistyFogEffect::new(
        FogTexture::solid(4, 4, [128, 128, 128, 255]),
        &ViewParams::default(),
        &mut rng,
    )
}

fn wind() -> WindEffect {
    WindEffect::new(4, false)
}

fn names(list: &EffectList) -> Vec<&'static str> {
    list.iter().map(|(_, e)| e.name()).collect()
}

fn assert_chain(list: &EffectList, expected: &[EffectId]) {
    assert_eq!(list.ids(), expected);
    assert_eq!(list.len(), expected.len());
    for id in expected {
        assert!(list.get(*id).is_some());
    }
}

// -------------------------------------------------------------------------
// Add / remove
// -------------------------------------------------------------------------

#[test]
fn test_add_appends_in_order() {
    let mut list = EffectList::default();
    assert!(list.is_empty());
    let a = list.add(wind());
    let b = list.add(fog());
    let c = list.add(wind());
    assert_chain(&list, &[a, b, c]);
    assert_eq!(names(&list), vec!["wind", "fog", "wind"]);
}

#[test]
fn test_remove_head_middle_tail() {
    let mut list = EffectList::default();
    let ids: Vec<EffectId> = (0..5).map(|_| list.add(wind())).collect();

    assert!(list.remove(ids[0]).is_some());
    assert_chain(&list, &[ids[1], ids[2], ids[3], ids[4]]);

    assert!(list.remove(ids[2]).is_some());
    assert_chain(&list, &[ids[1], ids[3], ids[4]]);

    assert!(list.remove(ids[4]).is_some());
    assert_chain(&list, &[ids[1], ids[3]]);
    assert!(list.get(ids[4]).is_none());

    list.remove(ids[1]);
    list.remove(ids[3]);
    assert!(list.is_empty());
}

#[test]
fn test_ids_are_not_reused() {
    let mut list = EffectList::default();
    let a = list.add(wind());
    list.remove(a);
    let b = list.add(wind());
    assert_ne!(a, b);
    assert!(list.get(a).is_none());
}

#[test]
fn test_interleaved_add_remove_keeps_valid_chain() {
    let mut list = EffectList::default();
    let mut live: Vec<EffectId> = Vec::new();
    let mut rng = SimRng::from_seed_u64(11);
    for step in 0..200 {
        if live.is_empty() || rng.irand(0, 2) > 0 {
            live.push(list.add(if step % 3 == 0 { Effect::from(fog()) } else { Effect::from(wind()) }));
        } else {
            let i = rng.irand(0, live.len() as i32 - 1) as usize;
            let id = live.remove(i);
            assert!(list.remove(id).is_some());
        }
        assert_chain(&list, &live);
    }
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "not in list")]
fn test_remove_absent_id_is_a_bug() {
    let mut list = EffectList::default();
    let a = list.add(wind());
    list.remove(a);
    list.remove(a);
}

// -------------------------------------------------------------------------
// Lookup
// -------------------------------------------------------------------------

#[test]
fn test_find_and_next_of_same_kind() {
    let mut list = EffectList::default();
    let w0 = list.add(wind());
    let f0 = list.add(fog());
    let w1 = list.add(wind());
    let f1 = list.add(fog());

    assert_eq!(list.find("FOG"), Some(f0));
    assert_eq!(list.find("wind"), Some(w0));
    assert_eq!(list.find("rain"), None);
    assert_eq!(list.next_of_same_kind(f0), Some(f1));
    assert_eq!(list.next_of_same_kind(f1), None);
    assert_eq!(list.next_of_same_kind(w0), Some(w1));
    assert_eq!(list.next_of_same_kind(w1), None);
}

// -------------------------------------------------------------------------
// Command forwarding
// -------------------------------------------------------------------------

#[test]
fn test_forward_command_stops_at_first_handler() {
    let mut list = EffectList::default();
    list.add(wind());
    let f0 = list.add(fog());
    let f1 = list.add(fog());

    assert_eq!(list.forward_command("fog density 0.7"), Ok(true));
    let density = |id| list.get(id).and_then(Effect::as_fog).map(|f| f.alpha);
    assert_eq!(density(f0), Some(0.7));
    assert_eq!(density(f1), Some(0.3));
}

#[test]
fn test_forward_command_unhandled() {
    let mut list = EffectList::default();
    list.add(wind());
    assert_eq!(list.forward_command("fog density 0.7"), Ok(false));
    list.add(fog());
    assert_eq!(list.forward_command("alpha 0.2"), Ok(false));
    assert_eq!(list.forward_command("fog"), Ok(false));
}

#[test]
fn test_forward_command_propagates_effect_error() {
    let mut list = EffectList::default();
    let f = list.add(fog());
    let err = list.forward_command("fog density 0").unwrap_err();
    assert!(matches!(err.root(), CommandError::InvalidValue { .. }));
    assert_eq!(list.get(f).and_then(Effect::as_fog).map(|f| f.alpha), Some(0.3));
}

#[test]
fn test_wind_accessors() {
    let mut list = EffectList::default();
    let w = list.add(wind());
    if let Some(wind) = list.get_mut(w).and_then(Effect::as_wind_mut) {
        wind.set_velocity(Vec3::X);
    }
    assert_eq!(
        list.get(w).and_then(Effect::as_wind).map(|w| w.velocity),
        Some(Vec3::X)
    );
    assert!(list.get(w).and_then(Effect::as_fog).is_none());
}
