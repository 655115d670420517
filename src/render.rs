/// Rendering layer: translates scene state into draw primitives.
///
/// Each function receives a canvas and an immutable view of the state.  No
/// simulation happens here.  Pool members are skipped unless active.

use crate::config::{LARGE_FISH_RADIUS, SHARK_HALF_LENGTH, SHARK_RADIUS, TURTLE_RADIUS};
use crate::entities::*;
use crate::geometry::{cos_scaled, sin_scaled, Bounds, Point};
use crate::shapes::{Shape, ShapeBook};
use crate::spawn::fish_radius;

/// Watch palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shade {
    Black,
    White,
    LightGray,
    DarkGray,
    Water,
    Sand,
    Kelp,
    Coral,
    Orange,
    Yellow,
    Purple,
    Pink,
    Teal,
    Red,
}

/// The host's draw surface.  Coordinates are screen pixels; anything outside
/// the surface is clipped by the implementation.
pub trait Canvas {
    fn fill_rect(&mut self, origin: Point, width: i32, height: i32, shade: Shade);
    fn fill_circle(&mut self, center: Point, radius: i32, shade: Shade);
    fn draw_circle(&mut self, center: Point, radius: i32, shade: Shade);
    fn draw_line(&mut self, from: Point, to: Point, shade: Shade);
    fn fill_polygon(&mut self, points: &[Point], shade: Shade);
}

// ── Palette ───────────────────────────────────────────────────────────────────

const C_WATER: Shade = Shade::Water;
const C_SAND: Shade = Shade::Sand;
const C_SEAWEED: Shade = Shade::Kelp;
const C_SMALL_FISH: Shade = Shade::Orange;
const C_LARGE_FISH: Shade = Shade::Yellow;
const C_SHARK: Shade = Shade::LightGray;
const C_BUBBLE: Shade = Shade::White;
const C_EYE: Shade = Shade::Black;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one aquarium frame, back to front:
/// backdrop, seaweed, bottom-dwellers and ambient actors, fish, particles
/// (plankton then bubbles), and the shark on top of everything.
pub fn draw_aquarium(canvas: &mut impl Canvas, aq: &Aquarium, shapes: &ShapeBook) {
    draw_backdrop(canvas, &aq.bounds);

    for weed in aq.seaweed.iter() {
        draw_seaweed(canvas, weed);
    }

    draw_clam(canvas, &aq.clam);
    draw_crab(canvas, &aq.crab);
    draw_octopus(canvas, &aq.octopus);
    draw_seahorse(canvas, &aq.seahorse);
    draw_turtle(canvas, &aq.turtle, shapes);
    draw_jellyfish(canvas, &aq.jellyfish);

    for fish in aq.fish.iter() {
        draw_fish(canvas, fish, shapes);
    }
    for speck in aq.plankton.iter() {
        draw_plankton(canvas, speck);
    }
    for bubble in aq.bubbles.iter() {
        draw_bubble(canvas, bubble);
    }

    draw_shark(canvas, &aq.shark, shapes);
}

fn polygon(canvas: &mut impl Canvas, shape: Option<&Shape>, at: Point, dir: i32, wave: i32, shade: Shade) {
    if let Some(shape) = shape {
        canvas.fill_polygon(&shape.place(at, dir, wave), shade);
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

pub fn draw_backdrop(canvas: &mut impl Canvas, bounds: &Bounds) {
    canvas.fill_rect(Point::new(0, 0), bounds.width, bounds.height, C_WATER);
    let floor = bounds.floor();
    canvas.fill_rect(Point::new(0, floor), bounds.width, bounds.height - floor, C_SAND);
}

/// Four segments, each swaying a little further than the one below it.
pub fn draw_seaweed(canvas: &mut impl Canvas, weed: &Seaweed) {
    const SEGMENTS: i32 = 4;
    let step = weed.height / SEGMENTS;
    let mut prev = weed.base;
    for k in 1..=SEGMENTS {
        let sway = sin_scaled(weed.phase + k * crate::config::FULL_CIRCLE / 8, k * 2);
        let next = Point::new(weed.base.x + sway, weed.base.y - step * k);
        canvas.draw_line(prev, next, C_SEAWEED);
        canvas.draw_line(prev.offset(1, 0), next.offset(1, 0), C_SEAWEED);
        prev = next;
    }
}

// ── Ambient and bottom-dwellers ───────────────────────────────────────────────

pub fn draw_clam(canvas: &mut impl Canvas, clam: &Clam) {
    let open = (sin_scaled(clam.phase, 3) + 3) / 2;
    canvas.fill_rect(clam.pos.offset(-5, 0), 11, 3, Shade::Coral);
    if open > 1 {
        canvas.fill_circle(clam.pos.offset(0, -1), 1, Shade::White);
    }
    canvas.draw_line(clam.pos.offset(-5, -1), clam.pos.offset(5, -1 - open), Shade::Coral);
}

pub fn draw_crab(canvas: &mut impl Canvas, crab: &Crab) {
    let c = crab.pos;
    let snap = sin_scaled(crab.phase, 2);
    for side in [-1, 1] {
        for leg in 0..3 {
            let x = side * (2 + leg);
            canvas.draw_line(c.offset(x, 0), c.offset(x + side * 2, 3), Shade::Red);
        }
        canvas.draw_line(c.offset(side * 3, -1), c.offset(side * 5, -4 - snap), Shade::Red);
        canvas.fill_circle(c.offset(side * 5, -4 - snap), 1, Shade::Red);
    }
    canvas.fill_circle(c, 3, Shade::Red);
}

pub fn draw_octopus(canvas: &mut impl Canvas, octopus: &Octopus) {
    let head = octopus.pos;
    for k in 0..4 {
        let root = head.offset(-3 + k * 2, 4);
        let wave = sin_scaled(octopus.phase + k * crate::config::FULL_CIRCLE / 4, 2);
        canvas.draw_line(root, root.offset(wave, 5), Shade::Purple);
    }
    canvas.fill_circle(head, 5, Shade::Purple);
    canvas.fill_circle(head.offset(-2, -1), 1, C_EYE);
    canvas.fill_circle(head.offset(2, -1), 1, C_EYE);
}

pub fn draw_seahorse(canvas: &mut impl Canvas, horse: &Seahorse) {
    let c = horse.pos.offset(0, sin_scaled(horse.phase, 2));
    canvas.fill_circle(c, 3, Shade::Yellow);
    canvas.fill_circle(c.offset(1, -4), 2, Shade::Yellow);
    canvas.draw_line(c.offset(2, -4), c.offset(5, -3), Shade::Yellow);
    canvas.draw_line(c.offset(0, 3), c.offset(-2, 6), Shade::Yellow);
    canvas.draw_line(c.offset(-2, 6), c.offset(0, 7), Shade::Yellow);
}

pub fn draw_turtle(canvas: &mut impl Canvas, turtle: &Turtle, shapes: &ShapeBook) {
    let c = turtle.pos;
    let paddle = sin_scaled(turtle.flipper_phase, 2);
    let flipper = shapes.turtle_flipper.as_ref();
    polygon(canvas, flipper, c.offset(turtle.dir * 3, 0), turtle.dir, paddle, Shade::Teal);
    polygon(canvas, flipper, c.offset(-turtle.dir * 3, 0), turtle.dir, -paddle, Shade::Teal);
    canvas.fill_circle(c.offset(turtle.dir * (TURTLE_RADIUS + 1), -1), 2, Shade::Teal);
    canvas.fill_circle(c, TURTLE_RADIUS, Shade::Kelp);
    canvas.draw_circle(c, TURTLE_RADIUS - 2, Shade::Teal);
}

pub fn draw_jellyfish(canvas: &mut impl Canvas, jelly: &Jellyfish) {
    let c = jelly.pos;
    let pulse = cos_scaled(jelly.phase, 2);
    for k in -1..=1 {
        canvas.draw_line(c.offset(k * 3, 2), c.offset(k * 3 + pulse, 9 - pulse), Shade::Pink);
    }
    canvas.fill_circle(c, 5 + pulse / 2, Shade::Pink);
}

pub fn draw_plankton(canvas: &mut impl Canvas, speck: &Plankton) {
    if !speck.active {
        return;
    }
    canvas.fill_rect(speck.pos, 1, 1, Shade::LightGray);
}

// ── Swimmers and particles ────────────────────────────────────────────────────

pub fn draw_fish(canvas: &mut impl Canvas, fish: &Fish, shapes: &ShapeBook) {
    if !fish.active {
        return;
    }
    let r = fish_radius(fish.size);
    let shade = match fish.size {
        SizeClass::Small => C_SMALL_FISH,
        SizeClass::Large => C_LARGE_FISH,
    };
    let wave = sin_scaled(fish.tail_phase, r / 2);

    polygon(canvas, shapes.tail(fish.size), fish.pos, fish.dir, wave, shade);
    if fish.size == SizeClass::Large {
        polygon(canvas, shapes.large_fin.as_ref(), fish.pos, fish.dir, 0, shade);
    }
    canvas.fill_circle(fish.pos, r, shade);
    let eye = fish.pos.offset(fish.dir * r / 2, -r / 3);
    canvas.fill_circle(eye, if r >= LARGE_FISH_RADIUS { 1 } else { 0 }, C_EYE);
}

pub fn draw_bubble(canvas: &mut impl Canvas, bubble: &Bubble) {
    if !bubble.active {
        return;
    }
    canvas.draw_circle(bubble.pos, bubble.radius, C_BUBBLE);
}

/// Apex predator, drawn last.
pub fn draw_shark(canvas: &mut impl Canvas, shark: &Shark, shapes: &ShapeBook) {
    if !shark.active {
        return;
    }
    let beat = sin_scaled(shark.pos.x * 2048, 2);
    polygon(canvas, shapes.shark_tail.as_ref(), shark.pos, shark.dir, beat, C_SHARK);
    polygon(canvas, shapes.shark_body.as_ref(), shark.pos, shark.dir, 0, C_SHARK);
    polygon(canvas, shapes.shark_fin.as_ref(), shark.pos, shark.dir, 0, Shade::DarkGray);
    // Without the body template, fall back to the collision disc
    if shapes.shark_body.is_none() {
        canvas.fill_circle(shark.pos, SHARK_RADIUS, C_SHARK);
    }
    let eye = shark.pos.offset(shark.dir * (SHARK_HALF_LENGTH / 2), -2);
    canvas.fill_circle(eye, 1, C_EYE);
}

// ── Battery gauge ─────────────────────────────────────────────────────────────

/// Outline plus vertical fill bars; a little concentric-circle badge on the
/// fill while the charge is above 20%.
pub fn draw_battery(canvas: &mut impl Canvas, origin: Point, width: i32, height: i32, percent: u8) {
    let right = origin.x + width - 1;
    let bottom = origin.y + height - 1;
    canvas.draw_line(origin, Point::new(right, origin.y), Shade::White);
    canvas.draw_line(Point::new(origin.x, bottom), Point::new(right, bottom), Shade::White);
    canvas.draw_line(origin, Point::new(origin.x, bottom), Shade::White);
    canvas.draw_line(Point::new(right, origin.y), Point::new(right, bottom), Shade::White);

    let fill = width * percent.min(100) as i32 / 100;
    if fill <= 0 {
        return;
    }
    for i in (0..fill).step_by(3) {
        canvas.fill_rect(origin.offset(i, 0), 2, height, Shade::White);
    }
    if percent > 20 {
        let centre = origin.offset(fill / 2, height / 2);
        let max_radius = height / 2 - 2;
        for r in (1..=max_radius).step_by(2) {
            canvas.draw_circle(centre, r, Shade::Black);
        }
    }
}
