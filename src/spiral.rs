/// Rotating spiral scene.
///
/// Twelve concentric rings drawn as polylines, alternately counter-rotating,
/// with a glitchy radial kick on every eighth vertex that flips sign each
/// half of the animation cycle.  Inner rings get the strongest kick.

use crate::config::FULL_CIRCLE;
use crate::geometry::{advance_phase, cos_scaled, sin_scaled, Bounds, Point};
use crate::render::{Canvas, Shade};

pub const RINGS: i32 = 12;
pub const POINTS_PER_RING: i32 = 120;
/// Milliseconds of animation per full rotation.
pub const ROTATION_MS: u64 = 20_000;
pub const DISTORTION: i32 = 3;
pub const DISTURB_EVERY: i32 = 8;

#[derive(Clone, Debug, PartialEq)]
pub struct Spiral {
    pub bounds: Bounds,
    /// Animation progress as a phase counter.
    pub rotation: i32,
}

impl Spiral {
    pub fn new(bounds: Bounds) -> Self {
        Spiral { bounds, rotation: 0 }
    }

    /// Animation progress in percent, `0..100`.
    pub fn percent(&self) -> i32 {
        (self.rotation as i64 * 100 / FULL_CIRCLE as i64) as i32
    }
}

/// Advance by one tick of `period_ms`.
pub fn step(spiral: &mut Spiral, period_ms: u64) {
    let advance = (FULL_CIRCLE as u64 * period_ms / ROTATION_MS) as i32;
    spiral.rotation = advance_phase(spiral.rotation, advance.max(1));
}

fn ring_shade(i: i32) -> Shade {
    match i % 3 {
        0 => Shade::White,
        1 => Shade::LightGray,
        _ => Shade::DarkGray,
    }
}

/// Rotation of ring `i` for a base rotation.
pub fn ring_rotation(i: i32, base: i32) -> i32 {
    let mut rotation = base as i64;
    if i % 2 == 1 {
        rotation = FULL_CIRCLE as i64 - rotation;
    }
    rotation += (i * FULL_CIRCLE / (RINGS * 2)) as i64;
    if i % 3 == 0 {
        rotation = (rotation * 3) % FULL_CIRCLE as i64;
    }
    rotation as i32
}

fn draw_ring(
    canvas: &mut impl Canvas,
    centre: Point,
    radius: i32,
    rotation: i32,
    shade: Shade,
    ring: i32,
    percent: i32,
) {
    let strength = DISTORTION * (RINGS - ring) / RINGS;
    let kick = if (percent + ring * 10) % 100 < 50 { strength } else { -strength };

    let mut prev = None;
    for i in 0..=POINTS_PER_RING {
        let angle = i * FULL_CIRCLE / POINTS_PER_RING + rotation;
        let r = if i % DISTURB_EVERY == 0 { radius + kick } else { radius };
        let point = centre.offset(cos_scaled(angle, r), sin_scaled(angle, r));
        if let Some(from) = prev {
            canvas.draw_line(from, point, shade);
        }
        prev = Some(point);
    }
}

/// Render one spiral frame: background, shadow disc behind the time, then
/// the rings over it.
pub fn draw_spiral(canvas: &mut impl Canvas, spiral: &Spiral) {
    let b = spiral.bounds;
    canvas.fill_rect(Point::new(0, 0), b.width, b.height, Shade::Black);

    let centre = Point::new(b.width / 2, b.height / 2);
    let min_dim = b.width.min(b.height);
    let percent = spiral.percent();
    let base = spiral.rotation;

    draw_time_shadow(canvas, centre, min_dim, percent);

    let spacing = (min_dim / 2 - 15) / RINGS;
    for i in 0..RINGS {
        let radius = 10 + i * spacing;
        draw_ring(canvas, centre, radius, ring_rotation(i, base), ring_shade(i), i, percent);
    }

    let corner = min_dim / 6;
    draw_ring(canvas, Point::new(corner / 2, corner / 2), corner, base, Shade::White, 0, percent);
    draw_ring(
        canvas,
        Point::new(b.width - corner / 2, b.height - corner / 2),
        corner,
        -base,
        Shade::White,
        0,
        percent,
    );
}

/// Radius of the dark disc behind the time.  Pulses between 50 and 75 px on
/// a 144 px short side (scaled for other screens), ten times per rotation.
pub fn shadow_radius(min_dim: i32, percent: i32) -> i32 {
    let pulse = (percent * 10) % 100;
    let swing = if pulse < 50 { pulse } else { 100 - pulse };
    min_dim * (100 + swing) / 288
}

fn draw_time_shadow(canvas: &mut impl Canvas, centre: Point, min_dim: i32, percent: i32) {
    canvas.fill_circle(centre, shadow_radius(min_dim, percent), Shade::Black);
}
