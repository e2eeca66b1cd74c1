//! Quad batching for many small camera-facing sprites.
//!
//! Sprites sharing one texture and blend state are accumulated into a fixed
//! buffer and submitted as a single quad-list draw, flushing early whenever
//! the buffer runs out of room.

mod batcher;
#[cfg(test)]
mod tests;

pub use batcher::{QuickSprite, QuickSpriteStats, QUICK_SPRITE_TEX_COORDS};
