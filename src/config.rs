/// Compile-time tuning: every number the engine reads lives here.

// ── Global constants ─────────────────────────────────────────────────────────

/// One full turn for phase counters and the trig lookup.
pub const FULL_CIRCLE: i32 = 0x10000;

/// Nominal tick period in milliseconds.
pub const TICK_MS: u64 = 50;

/// Tick period while the low-power signal is asserted.
pub const LOW_POWER_TICK_MS: u64 = 100;

/// A battery at or below this charge, and not charging, is low-power.
pub const LOW_BATTERY_PERCENT: u8 = 20;

/// Multiplier applied to the period when a timer registration fails.
pub const RETRY_PERIOD_FACTOR: u64 = 2;

/// Top share of the screen reserved for the clock text, in percent.
pub const CLOCK_BAND_PERCENT: i32 = 30;

/// Height of the sand strip at the bottom of the tank.
pub const SEABED_HEIGHT: i32 = 8;

// ── Radii (collision and rendering share these) ─────────────────────────────

pub const SMALL_FISH_RADIUS: i32 = 4;
pub const LARGE_FISH_RADIUS: i32 = 7;
pub const SHARK_RADIUS: i32 = 10;
/// Nose-to-tail half extent of the shark sprite; used for off-screen spawns.
pub const SHARK_HALF_LENGTH: i32 = 16;
pub const TURTLE_RADIUS: i32 = 6;

// ── Kinematics ───────────────────────────────────────────────────────────────

pub const SMALL_FISH_SPEED: (i32, i32) = (2, 4);
pub const LARGE_FISH_SPEED: (i32, i32) = (1, 2);
pub const TURTLE_SPEED: i32 = 1;
pub const BUBBLE_RADIUS: (i32, i32) = (1, 3);
pub const BUBBLE_SPEED: (i32, i32) = (1, 3);
pub const SEAWEED_SWAY_SPEED: (i32, i32) = (1, 3);
pub const SEAWEED_HEIGHT: (i32, i32) = (14, 26);

/// Phase advance per unit of speed for free-running counters.
pub const PHASE_STEP: i32 = FULL_CIRCLE / 64;

/// Largest per-tick random-walk step for drifting actors.
pub const DRIFT_STEP: i32 = 1;

/// Hard ceiling on the spatial grid dimension along each axis.
pub const GRID_DIM: usize = 3;

/// Variant of the aquarium scene.  The variants differ only in tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Simple tank: exhaustive predation, no kill cap.
    Lagoon,
    /// Busy tank: spatial grid and a per-tick shark kill cap.
    Reef,
}

/// One tuning table.  Probabilities are percent per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuning {
    pub fish_capacity: usize,
    /// Every `large_fish_every`-th fish slot holds a large fish.
    pub large_fish_every: usize,
    pub bubble_capacity: usize,
    pub plankton_capacity: usize,
    pub seaweed_count: usize,
    pub fish_respawn_pct: u32,
    pub bubble_spawn_pct: u32,
    pub plankton_spawn_pct: u32,
    /// Upper bound on bubbles released at one consumption event.
    pub bubbles_per_kill: usize,
    /// Inclusive dormant cooldown window for the shark, in ticks.
    pub shark_cooldown: (i32, i32),
    pub shark_speed: i32,
    pub shark_kill_cap: Option<usize>,
    pub use_grid: bool,
}

pub const LAGOON: Tuning = Tuning {
    fish_capacity: 10,
    large_fish_every: 4,
    bubble_capacity: 12,
    plankton_capacity: 6,
    seaweed_count: 4,
    fish_respawn_pct: 2,
    bubble_spawn_pct: 3,
    plankton_spawn_pct: 2,
    bubbles_per_kill: 3,
    shark_cooldown: (150, 300),
    shark_speed: 4,
    shark_kill_cap: None,
    use_grid: false,
};

pub const REEF: Tuning = Tuning {
    fish_capacity: 16,
    large_fish_every: 4,
    bubble_capacity: 16,
    plankton_capacity: 10,
    seaweed_count: 6,
    fish_respawn_pct: 1,
    bubble_spawn_pct: 2,
    plankton_spawn_pct: 2,
    bubbles_per_kill: 3,
    shark_cooldown: (200, 500),
    shark_speed: 4,
    shark_kill_cap: Some(2),
    use_grid: true,
};

impl Variant {
    pub fn tuning(self) -> &'static Tuning {
        match self {
            Variant::Lagoon => &LAGOON,
            Variant::Reef => &REEF,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Lagoon => "Lagoon",
            Variant::Reef => "Reef",
        }
    }
}
