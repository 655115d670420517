/// Spawner / initializer: fresh, valid state for every entity kind.
///
/// Crossing entities (fish, shark, turtle) enter just beyond the edge they
/// swim away from, so the entrance is seamless.  Every vertical coordinate is
/// drawn from the kind's band, which keeps the clock region clear.

use log::debug;
use rand::Rng;

use crate::config::*;
use crate::entities::*;
use crate::geometry::{Band, Bounds, Point};
use crate::grid::SpatialGrid;
use crate::random::{direction, sample};

// ── Extents ───────────────────────────────────────────────────────────────────

pub fn fish_radius(size: SizeClass) -> i32 {
    match size {
        SizeClass::Small => SMALL_FISH_RADIUS,
        SizeClass::Large => LARGE_FISH_RADIUS,
    }
}

/// Distance from a fish's centre to the tip of its tail.
pub fn fish_extent(size: SizeClass) -> i32 {
    fish_radius(size) * 2
}

/// x-coordinate just beyond the entry edge for a heading of `dir`.
pub fn entry_x(bounds: &Bounds, dir: i32, extent: i32) -> i32 {
    if dir > 0 {
        -extent
    } else {
        bounds.width + extent
    }
}

/// Whether a body heading `dir` has fully left through the far edge.
pub fn has_exited(bounds: &Bounds, x: i32, dir: i32, extent: i32) -> bool {
    if dir > 0 {
        x > bounds.width + extent
    } else {
        x < -extent
    }
}

fn sample_band(rng: &mut impl Rng, band: Band) -> i32 {
    sample(rng, band.top, band.bottom)
}

// ── Swimmers ──────────────────────────────────────────────────────────────────

/// A fish entering from off-screen.  Larger fish swim slower.
pub fn spawn_fish(rng: &mut impl Rng, bounds: &Bounds, size: SizeClass) -> Fish {
    let dir = direction(rng);
    let (lo, hi) = match size {
        SizeClass::Small => SMALL_FISH_SPEED,
        SizeClass::Large => LARGE_FISH_SPEED,
    };
    let band = bounds.water_band(fish_radius(size));
    Fish {
        pos: Point::new(entry_x(bounds, dir, fish_extent(size)), sample_band(rng, band)),
        dir,
        speed: sample(rng, lo, hi),
        size,
        active: true,
        tail_phase: sample(rng, 0, FULL_CIRCLE - 1),
    }
}

/// A fish already inside the visible rectangle, used for the opening frame.
pub fn place_fish(rng: &mut impl Rng, bounds: &Bounds, size: SizeClass) -> Fish {
    let mut fish = spawn_fish(rng, bounds, size);
    fish.pos.x = sample(rng, 0, bounds.width - 1);
    fish
}

/// Size class held by pool slot `index`.
pub fn slot_size(tuning: &Tuning, index: usize) -> SizeClass {
    let every = tuning.large_fish_every.max(1);
    if index % every == every - 1 {
        SizeClass::Large
    } else {
        SizeClass::Small
    }
}

pub fn shark_cooldown(rng: &mut impl Rng, tuning: &Tuning) -> i32 {
    let (lo, hi) = tuning.shark_cooldown;
    sample(rng, lo, hi).max(1)
}

pub fn dormant_shark(rng: &mut impl Rng, tuning: &Tuning) -> Shark {
    Shark {
        pos: Point::new(-SHARK_HALF_LENGTH, 0),
        dir: 1,
        speed: tuning.shark_speed,
        active: false,
        timer: shark_cooldown(rng, tuning),
    }
}

/// Wake the shark at the edge matching its fresh heading.
pub fn roaming_shark(rng: &mut impl Rng, bounds: &Bounds, tuning: &Tuning) -> Shark {
    let dir = direction(rng);
    let band = bounds.water_band(SHARK_RADIUS);
    Shark {
        pos: Point::new(entry_x(bounds, dir, SHARK_HALF_LENGTH), sample_band(rng, band)),
        dir,
        speed: tuning.shark_speed,
        active: true,
        timer: shark_cooldown(rng, tuning),
    }
}

pub fn spawn_turtle(rng: &mut impl Rng, bounds: &Bounds) -> Turtle {
    let dir = direction(rng);
    let band = bounds.water_band(TURTLE_RADIUS * 2);
    Turtle {
        pos: Point::new(entry_x(bounds, dir, TURTLE_RADIUS * 2), sample_band(rng, band)),
        dir,
        speed: TURTLE_SPEED,
        flipper_phase: 0,
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

/// A bubble released at `at`.
pub fn bubble_at(rng: &mut impl Rng, at: Point) -> Bubble {
    Bubble {
        pos: at,
        radius: sample(rng, BUBBLE_RADIUS.0, BUBBLE_RADIUS.1),
        speed: sample(rng, BUBBLE_SPEED.0, BUBBLE_SPEED.1),
        active: true,
    }
}

/// A bubble rising from a random spot on the sand.
pub fn spawn_bubble(rng: &mut impl Rng, bounds: &Bounds) -> Bubble {
    let x = sample(rng, 0, bounds.width - 1);
    bubble_at(rng, Point::new(x, bounds.floor()))
}

pub fn spawn_plankton(rng: &mut impl Rng, bounds: &Bounds) -> Plankton {
    let band = bounds.water_band(1);
    Plankton {
        pos: Point::new(sample(rng, 0, bounds.width - 1), sample_band(rng, band)),
        dir: direction(rng),
        life: sample(rng, 40, 120),
        active: true,
    }
}

// ── Decoration ────────────────────────────────────────────────────────────────

/// Stalk `index` of `count`, spread evenly along the sand with some jitter.
pub fn spawn_seaweed(rng: &mut impl Rng, bounds: &Bounds, index: usize, count: usize) -> Seaweed {
    let spacing = bounds.width / (count as i32 + 1);
    let x = spacing * (index as i32 + 1) + sample(rng, -spacing / 4, spacing / 4);
    let max_height = (bounds.floor() - bounds.clock_bottom()).max(SEAWEED_HEIGHT.0);
    Seaweed {
        base: Point::new(x, bounds.floor()),
        height: sample(rng, SEAWEED_HEIGHT.0, SEAWEED_HEIGHT.1.min(max_height)),
        phase: sample(rng, 0, FULL_CIRCLE - 1),
        sway_speed: sample(rng, SEAWEED_SWAY_SPEED.0, SEAWEED_SWAY_SPEED.1),
    }
}

pub fn spawn_octopus(rng: &mut impl Rng, bounds: &Bounds) -> Octopus {
    let band = bounds.water_band(8);
    Octopus {
        pos: Point::new(sample(rng, bounds.width / 8, bounds.width / 3), sample_band(rng, band)),
        phase: 0,
    }
}

pub fn spawn_jellyfish(rng: &mut impl Rng, bounds: &Bounds) -> Jellyfish {
    let band = bounds.water_band(10);
    Jellyfish {
        pos: Point::new(sample(rng, bounds.width / 2, bounds.width * 7 / 8), sample_band(rng, band)),
        phase: sample(rng, 0, FULL_CIRCLE - 1),
    }
}

pub fn spawn_seahorse(rng: &mut impl Rng, bounds: &Bounds) -> Seahorse {
    let band = bounds.water_band(8);
    Seahorse {
        pos: Point::new(sample(rng, bounds.width * 3 / 4, bounds.width - 6), sample_band(rng, band)),
        phase: 0,
    }
}

pub fn spawn_crab(rng: &mut impl Rng, bounds: &Bounds) -> Crab {
    Crab {
        pos: Point::new(sample(rng, 0, bounds.width - 1), bounds.floor() + 2),
        dir: direction(rng),
        phase: 0,
    }
}

pub fn spawn_clam(rng: &mut impl Rng, bounds: &Bounds) -> Clam {
    Clam {
        pos: Point::new(sample(rng, bounds.width / 6, bounds.width / 2), bounds.floor() + 3),
        phase: 0,
    }
}

// ── Whole scene ───────────────────────────────────────────────────────────────

/// Build the aquarium with every pool pre-sized.  Nothing is allocated after this.
pub fn populate(rng: &mut impl Rng, bounds: Bounds, tuning: &'static Tuning) -> Aquarium {
    let fish = Pool::from_fn(tuning.fish_capacity, |i| {
        place_fish(rng, &bounds, slot_size(tuning, i))
    });
    let bubbles = Pool::from_fn(tuning.bubble_capacity, |_| Bubble {
        pos: Point::default(),
        radius: BUBBLE_RADIUS.0,
        speed: BUBBLE_SPEED.0,
        active: false,
    });
    let plankton = Pool::from_fn(tuning.plankton_capacity, |_| Plankton {
        pos: Point::default(),
        dir: 1,
        life: 0,
        active: false,
    });
    let count = tuning.seaweed_count;
    let seaweed = Pool::from_fn(count, |i| spawn_seaweed(rng, &bounds, i, count));

    debug!(
        "populated {}x{} tank: {} fish, {} bubble slots, {} plankton slots",
        bounds.width,
        bounds.height,
        fish.capacity(),
        bubbles.capacity(),
        plankton.capacity()
    );

    let grid = tuning
        .use_grid
        .then(|| SpatialGrid::new(&bounds, fish.capacity(), SHARK_RADIUS + LARGE_FISH_RADIUS));

    let mut turtle = spawn_turtle(rng, &bounds);
    turtle.pos.x = sample(rng, 0, bounds.width - 1);

    Aquarium {
        bounds,
        tuning,
        fish,
        bubbles,
        plankton,
        seaweed,
        shark: dormant_shark(rng, tuning),
        octopus: spawn_octopus(rng, &bounds),
        turtle,
        jellyfish: spawn_jellyfish(rng, &bounds),
        seahorse: spawn_seahorse(rng, &bounds),
        crab: spawn_crab(rng, &bounds),
        clam: spawn_clam(rng, &bounds),
        grid,
        frame: 0,
    }
}
