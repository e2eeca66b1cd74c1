use crate::commands::CommandError;
use crate::frame::{FrameContext, RenderContext};
use crate::particles::Particle;

use super::types::Effect;

/// Identity of an effect within one [`EffectList`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u32);

#[derive(Debug, Clone, Default)]
pub struct EffectList {
    entries: Vec<(EffectId, Effect)>,
    next_id: u32,
}

impl EffectList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends to the tail and returns the new effect's id.
    pub fn add(&mut self, effect: impl Into<Effect>) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, effect.into()));
        id
    }

    /// Removes the effect with the given id, keeping the order of the rest.
    ///
    /// Removing an id that is not in the list is a caller bug.
    pub fn remove(&mut self, id: EffectId) -> Option<Effect> {
        let index = self.position(id);
        debug_assert!(index.is_some(), "removing effect {id:?} not in list");
        index.map(|i| self.entries.remove(i).1)
    }

    /// Drops every effect.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: EffectId) -> Option<&Effect> {
        self.position(id).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, id: EffectId) -> Option<&mut Effect> {
        self.position(id).map(|i| &mut self.entries[i].1)
    }

    /// First effect with the given name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<EffectId> {
        self.entries
            .iter()
            .find(|(_, e)| e.name().eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    /// Next effect after `id` with the same name as `id`.
    pub fn next_of_same_kind(&self, id: EffectId) -> Option<EffectId> {
        let index = self.position(id)?;
        let name = self.entries[index].1.name();
        self.entries[index + 1..]
            .iter()
            .find(|(_, e)| e.name().eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EffectId, &Effect)> {
        self.entries.iter().map(|(id, e)| (*id, e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EffectId, &mut Effect)> {
        self.entries.iter_mut().map(|(id, e)| (*id, e))
    }

    #[cfg(test)]
    pub fn ids(&self) -> Vec<EffectId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    /// Offers `text` to each effect in order, stopping at the first that
    /// handles it (or fails while handling it).
    pub fn forward_command(&mut self, text: &str) -> Result<bool, CommandError> {
        for (_, effect) in self.entries.iter_mut() {
            if effect.command(text)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn update_all(&mut self, particles: &mut [Particle], frame: &mut FrameContext<'_>) {
        for (_, effect) in self.entries.iter_mut() {
            effect.update(particles, frame);
        }
    }

    pub fn render_all(&self, ctx: &mut RenderContext<'_>) {
        for (_, effect) in &self.entries {
            effect.render(ctx);
        }
    }

    fn position(&self, id: EffectId) -> Option<usize> {
        self.entries.iter().position(|(e, _)| *e == id)
    }
}
