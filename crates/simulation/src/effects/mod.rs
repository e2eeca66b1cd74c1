//! Effects owned by an effect system, and the ordered list that holds them.
//!
//! An effect is either a wind gust or a misty fog patch. Each system keeps
//! its effects in an [`EffectList`] whose insertion order is also the update
//! and render order. Effects are addressed by [`EffectId`], not by name,
//! since several effects may share a name.

mod list;
#[cfg(test)]
mod tests;
mod types;

pub use list::{EffectId, EffectList};
pub use types::Effect;
