/// Simulation step: advances the aquarium by one tick, in place.
///
/// All randomness comes through the injected `rng`, so a seeded RNG makes a
/// run fully reproducible.  Nothing here allocates: pools are fixed and the
/// spatial grid reuses its own buffers.
///
/// Order within a tick:
///   1. decoration phases and drift
///   2. particles (move, expire, stochastic spawn)
///   3. stochastic fish respawn into dead slots
///   4. predation on the positions drawn last frame
///   5. swimmer movement and edge respawn
///   6. shark lifecycle

use log::{debug, info};
use rand::Rng;

use crate::config::*;
use crate::entities::*;
use crate::geometry::{advance_phase, collides, Bounds, Point};
use crate::grid::SpatialGrid;
use crate::random::{chance, jitter};
use crate::spawn::{
    bubble_at, dormant_shark, fish_extent, fish_radius, has_exited, roaming_shark, spawn_bubble,
    spawn_fish, spawn_plankton, spawn_turtle,
};

pub fn shark_state(shark: &Shark) -> SharkState {
    if shark.active {
        SharkState::Roaming
    } else {
        SharkState::Dormant
    }
}

/// Advance the whole scene by one frame.
pub fn tick(aq: &mut Aquarium, rng: &mut impl Rng) {
    aq.frame += 1;

    advance_decoration(aq, rng);
    advance_particles(aq, rng);
    respawn_fish(aq, rng);
    resolve_predation(aq, rng);
    advance_swimmers(aq, rng);
    advance_shark(aq, rng);
}

// ── 1. Decoration ────────────────────────────────────────────────────────────

fn drift(rng: &mut impl Rng, bounds: &Bounds, pos: Point, radius: i32) -> Point {
    let moved = pos.offset(jitter(rng, DRIFT_STEP), jitter(rng, DRIFT_STEP));
    bounds.clamp(moved, bounds.water_band(radius))
}

fn advance_decoration(aq: &mut Aquarium, rng: &mut impl Rng) {
    let bounds = aq.bounds;

    for weed in aq.seaweed.iter_mut() {
        weed.phase = advance_phase(weed.phase, weed.sway_speed * PHASE_STEP);
    }

    aq.octopus.phase = advance_phase(aq.octopus.phase, PHASE_STEP);
    aq.octopus.pos = drift(rng, &bounds, aq.octopus.pos, 8);

    aq.jellyfish.phase = advance_phase(aq.jellyfish.phase, PHASE_STEP * 2);
    aq.jellyfish.pos = drift(rng, &bounds, aq.jellyfish.pos, 10);

    aq.seahorse.phase = advance_phase(aq.seahorse.phase, PHASE_STEP);
    aq.seahorse.pos = drift(rng, &bounds, aq.seahorse.pos, 8);

    // Crab scuttles along the sand every other frame and turns at the walls
    let crab = &mut aq.crab;
    crab.phase = advance_phase(crab.phase, PHASE_STEP * 4);
    if aq.frame % 2 == 0 {
        crab.pos.x += crab.dir;
    }
    if crab.pos.x <= 4 || crab.pos.x >= bounds.width - 5 || chance(rng, 1) {
        crab.dir = -crab.dir;
    }
    crab.pos.x = crab.pos.x.clamp(0, bounds.width - 1);

    aq.clam.phase = advance_phase(aq.clam.phase, PHASE_STEP / 2);
}

// ── 2. Particles ─────────────────────────────────────────────────────────────

fn advance_particles(aq: &mut Aquarium, rng: &mut impl Rng) {
    let bounds = aq.bounds;
    let tuning = aq.tuning;

    for bubble in aq.bubbles.iter_mut() {
        if !bubble.active {
            if chance(rng, tuning.bubble_spawn_pct) {
                *bubble = spawn_bubble(rng, &bounds);
            }
            continue;
        }
        bubble.pos.y -= bubble.speed;
        bubble.pos.x = (bubble.pos.x + jitter(rng, 1)).clamp(0, bounds.width - 1);
        // Popped once fully above the top edge
        if bubble.pos.y + bubble.radius < 0 {
            bubble.active = false;
        }
    }

    let band = bounds.water_band(1);
    for speck in aq.plankton.iter_mut() {
        if !speck.active {
            if chance(rng, tuning.plankton_spawn_pct) {
                *speck = spawn_plankton(rng, &bounds);
            }
            continue;
        }
        speck.life -= 1;
        speck.pos.x += speck.dir + jitter(rng, 1);
        speck.pos.y = band.clamp(speck.pos.y + jitter(rng, 1));
        if speck.life <= 0 || !bounds.contains(speck.pos) {
            speck.active = false;
        }
    }
}

// ── 3. Respawn ───────────────────────────────────────────────────────────────

fn respawn_fish(aq: &mut Aquarium, rng: &mut impl Rng) {
    let bounds = aq.bounds;
    let pct = aq.tuning.fish_respawn_pct;
    for fish in aq.fish.iter_mut() {
        if !fish.active && chance(rng, pct) {
            *fish = spawn_fish(rng, &bounds, fish.size);
        }
    }
}

// ── 4. Predation ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Diet {
    /// Large fish only take small fish.
    SmallFish,
    AnyFish,
}

#[derive(Clone, Copy, Debug)]
struct Hunter {
    slot: Option<usize>,
    pos: Point,
    radius: i32,
    diet: Diet,
    limit: Option<usize>,
}

/// Free up to `count` bubble slots at `at`.  A full pool drops the rest.
pub fn release_bubbles(bubbles: &mut Pool<Bubble>, at: Point, count: usize, rng: &mut impl Rng) {
    for _ in 0..count {
        match bubbles.free_slot_mut() {
            Some(slot) => *slot = bubble_at(rng, at),
            None => break,
        }
    }
}

/// Test `candidates` (ascending slot indices) against `hunter`, consuming prey.
fn strike(
    fish: &mut Pool<Fish>,
    bubbles: &mut Pool<Bubble>,
    bubbles_per_kill: usize,
    candidates: impl Iterator<Item = usize>,
    hunter: Hunter,
    rng: &mut impl Rng,
) -> usize {
    let mut kills = 0;
    for j in candidates {
        if hunter.limit.is_some_and(|cap| kills >= cap) {
            break;
        }
        if hunter.slot == Some(j) {
            continue;
        }
        let prey = &mut fish[j];
        if !prey.active || (hunter.diet == Diet::SmallFish && prey.size != SizeClass::Small) {
            continue;
        }
        if collides(hunter.pos, hunter.radius, prey.pos, fish_radius(prey.size)) {
            prey.active = false;
            let at = prey.pos;
            debug!("fish {} eaten at ({}, {})", j, at.x, at.y);
            release_bubbles(bubbles, at, bubbles_per_kill, rng);
            kills += 1;
        }
    }
    kills
}

fn hunt(
    fish: &mut Pool<Fish>,
    bubbles: &mut Pool<Bubble>,
    grid: Option<&mut SpatialGrid>,
    bubbles_per_kill: usize,
    hunter: Hunter,
    rng: &mut impl Rng,
) -> usize {
    match grid {
        Some(grid) => {
            let candidates = grid.neighbours(hunter.pos);
            strike(fish, bubbles, bubbles_per_kill, candidates.iter().copied(), hunter, rng)
        }
        None => {
            let n = fish.capacity();
            strike(fish, bubbles, bubbles_per_kill, 0..n, hunter, rng)
        }
    }
}

/// Large fish eat overlapping small fish, then a roaming shark eats anything
/// it overlaps (up to the tuning's kill cap).
pub fn resolve_predation(aq: &mut Aquarium, rng: &mut impl Rng) {
    let per_kill = aq.tuning.bubbles_per_kill;
    if let Some(grid) = aq.grid.as_mut() {
        grid.rebuild(&aq.fish);
    }

    for i in 0..aq.fish.capacity() {
        let f = &aq.fish[i];
        if !f.active || f.size != SizeClass::Large {
            continue;
        }
        let hunter = Hunter {
            slot: Some(i),
            pos: f.pos,
            radius: LARGE_FISH_RADIUS,
            diet: Diet::SmallFish,
            limit: None,
        };
        hunt(&mut aq.fish, &mut aq.bubbles, aq.grid.as_mut(), per_kill, hunter, rng);
    }

    if aq.shark.active {
        let hunter = Hunter {
            slot: None,
            pos: aq.shark.pos,
            radius: SHARK_RADIUS,
            diet: Diet::AnyFish,
            limit: aq.tuning.shark_kill_cap,
        };
        let kills = hunt(&mut aq.fish, &mut aq.bubbles, aq.grid.as_mut(), per_kill, hunter, rng);
        if kills > 0 {
            debug!("shark took {} fish", kills);
        }
    }
}

// ── 5. Swimmers ──────────────────────────────────────────────────────────────

fn advance_swimmers(aq: &mut Aquarium, rng: &mut impl Rng) {
    let bounds = aq.bounds;

    for fish in aq.fish.iter_mut() {
        if !fish.active {
            continue;
        }
        fish.pos.x += fish.dir * fish.speed;
        fish.tail_phase = advance_phase(fish.tail_phase, fish.speed * PHASE_STEP * 2);
        if has_exited(&bounds, fish.pos.x, fish.dir, fish_extent(fish.size)) {
            *fish = spawn_fish(rng, &bounds, fish.size);
        }
    }

    let turtle = &mut aq.turtle;
    turtle.flipper_phase = advance_phase(turtle.flipper_phase, PHASE_STEP * 2);
    if aq.frame % 2 == 0 {
        turtle.pos.x += turtle.dir * turtle.speed;
    }
    if has_exited(&bounds, turtle.pos.x, turtle.dir, TURTLE_RADIUS * 2) {
        *turtle = spawn_turtle(rng, &bounds);
    }
}

// ── 6. Shark lifecycle ───────────────────────────────────────────────────────

/// Dormant → Roaming when the cooldown runs out; Roaming → Dormant once the
/// shark has crossed the far edge.  A shark woken this tick does not move.
pub fn advance_shark(aq: &mut Aquarium, rng: &mut impl Rng) {
    let bounds = aq.bounds;
    let tuning = aq.tuning;
    let shark = &mut aq.shark;

    match shark_state(shark) {
        SharkState::Dormant => {
            shark.timer -= 1;
            if shark.timer <= 0 {
                *shark = roaming_shark(rng, &bounds, tuning);
                info!("shark roaming, heading {}", if shark.dir > 0 { "east" } else { "west" });
            }
        }
        SharkState::Roaming => {
            shark.pos.x += shark.dir * shark.speed;
            if has_exited(&bounds, shark.pos.x, shark.dir, SHARK_HALF_LENGTH) {
                *shark = dormant_shark(rng, tuning);
                info!("shark dormant for {} ticks", shark.timer);
            }
        }
    }
}
