//! Bounded stack of active animations.

use bitflags::bitflags;
use heapless::Vec;

/// Capacity of the animation stack.
pub const ANIMATION_STACK_DEPTH: usize = 16;

bitflags! {
    /// Behavior modifiers of one stack entry
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AnimationModifiers: u8 {
        /// Compose over the layers below instead of replacing them
        const FALLTHROUGH = 1 << 0;
    }
}

/// Error returned when pushing onto a full stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFull;

/// One active animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationEntry {
    /// Index into the animation definition set
    pub index: u16,
    /// Frame fetched on the next advance
    pub pos: u16,
    /// Remaining loops; 0 repeats forever
    pub loops: u8,
    /// Ticks per frame advance
    pub divider: u8,
    /// Ticks accumulated toward the next advance
    pub phase: u8,
    /// Behavior modifiers
    pub modifiers: AnimationModifiers,
}

impl AnimationEntry {
    /// Fresh entry at frame zero
    ///
    /// A divider of 0 behaves as 1 (advance every tick)
    pub const fn new(index: u16, loops: u8, divider: u8, modifiers: AnimationModifiers) -> Self {
        Self {
            index,
            pos: 0,
            loops,
            divider: if divider == 0 { 1 } else { divider },
            phase: 0,
            modifiers,
        }
    }

    /// Whether the entry repeats forever
    pub const fn is_infinite(&self) -> bool {
        self.loops == 0
    }
}

/// Bounded LIFO of active animations
///
/// The top is the most recently pushed entry; iteration runs
/// bottom-up, so lower layers resolve before the layers composed on
/// top of them.
#[derive(Debug, Default)]
pub struct AnimationStack {
    entries: Vec<AnimationEntry, ANIMATION_STACK_DEPTH>,
}

impl AnimationStack {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Push an animation onto the stack
    ///
    /// Fails when all slots are taken; existing entries are untouched
    pub fn push(&mut self, entry: AnimationEntry) -> Result<(), StackFull> {
        self.entries.push(entry).map_err(|_| StackFull)
    }

    /// Pop the top entry
    ///
    /// Returns None if the stack is empty
    pub fn pop(&mut self) -> Option<AnimationEntry> {
        self.entries.pop()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    pub fn get(&self, depth: usize) -> Option<&AnimationEntry> {
        self.entries.get(depth)
    }

    pub(crate) fn get_mut(&mut self, depth: usize) -> Option<&mut AnimationEntry> {
        self.entries.get_mut(depth)
    }

    /// Remove the entry at the given depth, shifting upper entries down.
    pub(crate) fn remove(&mut self, depth: usize) -> AnimationEntry {
        self.entries.remove(depth)
    }

    /// Entries bottom-up, in push order
    pub fn iter(&self) -> core::slice::Iter<'_, AnimationEntry> {
        self.entries.iter()
    }
}
