/// Screen-space integer geometry shared by the engine and the renderers.

use crate::config::{CLOCK_BAND_PERCENT, FULL_CIRCLE, SEABED_HEIGHT};

/// Fixed-point scale of `sin_lookup` / `cos_lookup` results.
pub const TRIG_MAX_RATIO: i32 = 0xFFFF;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

/// Visible rectangle, queried once from the host at scene setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

/// Inclusive vertical band a kind is allowed to occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    pub top: i32,
    pub bottom: i32,
}

impl Band {
    pub fn contains(&self, y: i32) -> bool {
        y >= self.top && y <= self.bottom
    }

    pub fn clamp(&self, y: i32) -> i32 {
        y.max(self.top).min(self.bottom)
    }
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Bounds {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// First row below the clock text region.
    pub fn clock_bottom(&self) -> i32 {
        self.height * CLOCK_BAND_PERCENT / 100
    }

    /// Top row of the sand strip.
    pub fn floor(&self) -> i32 {
        (self.height - SEABED_HEIGHT).max(self.clock_bottom())
    }

    /// Rows a body of `radius` may occupy without touching the clock or the sand.
    pub fn water_band(&self, radius: i32) -> Band {
        let top = self.clock_bottom() + radius;
        let bottom = (self.floor() - radius).max(top);
        Band { top, bottom }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Clamp `p` into the visible columns and into `band`.
    pub fn clamp(&self, p: Point, band: Band) -> Point {
        Point::new(p.x.max(0).min(self.width - 1), band.clamp(p.y))
    }
}

/// Circle overlap: squared distance at most the squared sum of radii.
pub fn collides(a: Point, ra: i32, b: Point, rb: i32) -> bool {
    let reach = (ra + rb) as i64;
    a.distance_sq(b) <= reach * reach
}

/// Reduce a phase counter into `[0, FULL_CIRCLE)`.
pub fn wrap_phase(phase: i64) -> i32 {
    phase.rem_euclid(FULL_CIRCLE as i64) as i32
}

/// Advance `phase` by `step`, wrapped.
pub fn advance_phase(phase: i32, step: i32) -> i32 {
    wrap_phase(phase as i64 + step as i64)
}

pub fn sin_lookup(angle: i32) -> i32 {
    let turns = wrap_phase(angle as i64) as f64 / FULL_CIRCLE as f64;
    ((turns * std::f64::consts::TAU).sin() * TRIG_MAX_RATIO as f64).round() as i32
}

pub fn cos_lookup(angle: i32) -> i32 {
    sin_lookup(angle + FULL_CIRCLE / 4)
}

/// Scale `amplitude` by the sine of `angle`.
pub fn sin_scaled(angle: i32, amplitude: i32) -> i32 {
    (amplitude as i64 * sin_lookup(angle) as i64 / TRIG_MAX_RATIO as i64) as i32
}

pub fn cos_scaled(angle: i32, amplitude: i32) -> i32 {
    (amplitude as i64 * cos_lookup(angle) as i64 / TRIG_MAX_RATIO as i64) as i32
}
