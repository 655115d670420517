/// All aquarium entity types: pure data, no logic.

use crate::config::Tuning;
use crate::geometry::{Bounds, Point};
use crate::grid::SpatialGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Large,
}

// ── Liveness ─────────────────────────────────────────────────────────────────

/// A pool member with an active flag.  The flag is the only liveness signal.
pub trait Slot {
    fn is_active(&self) -> bool;
}

/// Fixed-capacity slot storage, sized once at scene setup and never resized.
/// Dead members stay in place and are re-initialised on respawn.
#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: Box<[T]>,
}

impl<T> Pool<T> {
    pub fn from_fn(capacity: usize, init: impl FnMut(usize) -> T) -> Self {
        Pool {
            slots: (0..capacity).map(init).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }
}

impl<T: Slot> Pool<T> {
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// First inactive slot, if any.
    pub fn free_slot_mut(&mut self) -> Option<&mut T> {
        self.slots.iter_mut().find(|s| !s.is_active())
    }

    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.is_active())
    }
}

impl<T> std::ops::Index<usize> for Pool<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.slots[i]
    }
}

impl<T> std::ops::IndexMut<usize> for Pool<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.slots[i]
    }
}

// ── Swimmers ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Fish {
    pub pos: Point,
    /// Horizontal heading, `-1` or `+1`.
    pub dir: i32,
    pub speed: i32,
    pub size: SizeClass,
    pub active: bool,
    pub tail_phase: i32,
}

/// The apex predator.  Dormant while `active` is false and `timer` counts down.
#[derive(Clone, Debug, PartialEq)]
pub struct Shark {
    pub pos: Point,
    pub dir: i32,
    pub speed: i32,
    pub active: bool,
    pub timer: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SharkState {
    Dormant,
    Roaming,
}

// ── Decoration and particles ─────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Seaweed {
    /// Root of the stalk, on the sand line.
    pub base: Point,
    pub height: i32,
    pub phase: i32,
    pub sway_speed: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub pos: Point,
    pub radius: i32,
    pub speed: i32,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Plankton {
    pub pos: Point,
    pub dir: i32,
    /// Ticks left before the speck fades out.
    pub life: i32,
    pub active: bool,
}

// ── Fixed decorative actors (always present) ─────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Octopus {
    pub pos: Point,
    pub phase: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Turtle {
    pub pos: Point,
    pub dir: i32,
    pub speed: i32,
    pub flipper_phase: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Jellyfish {
    pub pos: Point,
    pub phase: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Seahorse {
    pub pos: Point,
    pub phase: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Crab {
    pub pos: Point,
    pub dir: i32,
    pub phase: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Clam {
    pub pos: Point,
    pub phase: i32,
}

impl Slot for Fish {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl Slot for Bubble {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl Slot for Plankton {
    fn is_active(&self) -> bool {
        self.active
    }
}

// ── Scene aggregate ───────────────────────────────────────────────────────────

/// The whole aquarium.  Owned by the watchface for as long as it is on screen;
/// the simulation step writes it and the renderer reads it.
#[derive(Clone, Debug)]
pub struct Aquarium {
    pub bounds: Bounds,
    pub tuning: &'static Tuning,
    pub fish: Pool<Fish>,
    pub bubbles: Pool<Bubble>,
    pub plankton: Pool<Plankton>,
    pub seaweed: Pool<Seaweed>,
    pub shark: Shark,
    pub octopus: Octopus,
    pub turtle: Turtle,
    pub jellyfish: Jellyfish,
    pub seahorse: Seahorse,
    pub crab: Crab,
    pub clam: Clam,
    /// Present only when the tuning asks for grid-restricted predation.
    pub grid: Option<SpatialGrid>,
    pub frame: u64,
}
