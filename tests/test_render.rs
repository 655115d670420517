use reef_watch::config::*;
use reef_watch::entities::*;
use reef_watch::geometry::{Bounds, Point};
use reef_watch::render::*;
use reef_watch::shapes::ShapeBook;
use reef_watch::spawn::*;
use reef_watch::spiral::{self, Spiral, POINTS_PER_RING, RINGS};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Canvas that only records what it was asked to draw.
#[derive(Debug, Clone, PartialEq)]
enum Op {
    Rect(Point, i32, i32, Shade),
    Disc(Point, i32, Shade),
    Ring(Point, i32, Shade),
    Line(Point, Point, Shade),
    Poly(Vec<Point>, Shade),
}

#[derive(Default)]
struct RecordingCanvas {
    ops: Vec<Op>,
}

impl RecordingCanvas {
    fn shades(&self) -> Vec<Shade> {
        self.ops
            .iter()
            .map(|op| match op {
                Op::Rect(_, _, _, s) | Op::Disc(_, _, s) | Op::Ring(_, _, s) | Op::Line(_, _, s) | Op::Poly(_, s) => *s,
            })
            .collect()
    }

    fn lines(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Line(..))).count()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, origin: Point, width: i32, height: i32, shade: Shade) {
        self.ops.push(Op::Rect(origin, width, height, shade));
    }
    fn fill_circle(&mut self, center: Point, radius: i32, shade: Shade) {
        self.ops.push(Op::Disc(center, radius, shade));
    }
    fn draw_circle(&mut self, center: Point, radius: i32, shade: Shade) {
        self.ops.push(Op::Ring(center, radius, shade));
    }
    fn draw_line(&mut self, from: Point, to: Point, shade: Shade) {
        self.ops.push(Op::Line(from, to, shade));
    }
    fn fill_polygon(&mut self, points: &[Point], shade: Shade) {
        self.ops.push(Op::Poly(points.to_vec(), shade));
    }
}

fn tank() -> Aquarium {
    populate(&mut StdRng::seed_from_u64(42), Bounds::new(144, 168), &LAGOON)
}

// ── Aquarium ──────────────────────────────────────────────────────────────────

#[test]
fn inactive_entities_draw_nothing() {
    let shapes = ShapeBook::new();
    let mut canvas = RecordingCanvas::default();

    let mut fish = place_fish(&mut StdRng::seed_from_u64(1), &Bounds::new(144, 168), SizeClass::Large);
    fish.active = false;
    draw_fish(&mut canvas, &fish, &shapes);
    draw_bubble(&mut canvas, &Bubble { pos: Point::new(5, 5), radius: 2, speed: 1, active: false });
    draw_plankton(&mut canvas, &Plankton { pos: Point::new(5, 5), dir: 1, life: 9, active: false });
    let shark = dormant_shark(&mut StdRng::seed_from_u64(1), &LAGOON);
    draw_shark(&mut canvas, &shark, &shapes);

    assert!(canvas.ops.is_empty(), "{:?}", canvas.ops);
}

#[test]
fn backdrop_comes_first() {
    let aq = tank();
    let mut canvas = RecordingCanvas::default();
    draw_aquarium(&mut canvas, &aq, &ShapeBook::new());
    assert_eq!(canvas.ops[0], Op::Rect(Point::new(0, 0), 144, 168, Shade::Water));
    assert_eq!(canvas.ops[1], Op::Rect(Point::new(0, aq.bounds.floor()), 144, 168 - aq.bounds.floor(), Shade::Sand));
}

#[test]
fn roaming_shark_is_drawn_last() {
    let mut aq = tank();
    aq.shark = Shark { pos: Point::new(70, 100), dir: -1, speed: 4, active: true, timer: 0 };
    let mut canvas = RecordingCanvas::default();
    draw_aquarium(&mut canvas, &aq, &ShapeBook::new());

    // Tail, body, fin, eye
    let tail = &canvas.ops[canvas.ops.len() - 4..];
    assert!(matches!(tail[0], Op::Poly(_, Shade::LightGray)));
    assert!(matches!(tail[1], Op::Poly(_, Shade::LightGray)));
    assert!(matches!(tail[2], Op::Poly(_, Shade::DarkGray)));
    assert!(matches!(tail[3], Op::Disc(_, 1, Shade::Black)));
}

#[test]
fn dormant_shark_is_absent() {
    let aq = tank();
    assert!(!aq.shark.active);
    let mut canvas = RecordingCanvas::default();
    draw_aquarium(&mut canvas, &aq, &ShapeBook::new());
    assert!(!canvas.shades().contains(&Shade::DarkGray));
}

#[test]
fn plankton_is_drawn_over_the_fish() {
    let mut aq = tank();
    aq.plankton[0] = Plankton { pos: Point::new(30, 100), dir: 1, life: 50, active: true };
    aq.bubbles[0] = Bubble { pos: Point::new(40, 100), radius: 2, speed: 1, active: true };
    let mut canvas = RecordingCanvas::default();
    draw_aquarium(&mut canvas, &aq, &ShapeBook::new());

    let speck = canvas
        .ops
        .iter()
        .position(|op| *op == Op::Rect(Point::new(30, 100), 1, 1, Shade::LightGray))
        .expect("plankton drawn");
    let last_fish = canvas
        .ops
        .iter()
        .rposition(|op| matches!(op, Op::Disc(_, _, Shade::Orange) | Op::Disc(_, _, Shade::Yellow)))
        .expect("fish drawn");
    let bubble = canvas
        .ops
        .iter()
        .position(|op| *op == Op::Ring(Point::new(40, 100), 2, Shade::White))
        .expect("bubble drawn");
    assert!(speck > last_fish);
    assert!(speck < bubble);
}

#[test]
fn fish_colour_follows_size() {
    let shapes = ShapeBook::new();
    let b = Bounds::new(144, 168);
    let mut rng = StdRng::seed_from_u64(3);
    for (size, shade) in [(SizeClass::Small, Shade::Orange), (SizeClass::Large, Shade::Yellow)] {
        let mut canvas = RecordingCanvas::default();
        draw_fish(&mut canvas, &place_fish(&mut rng, &b, size), &shapes);
        assert!(canvas.shades().contains(&shade));
    }
}

#[test]
fn westward_fish_mirror_their_tail() {
    let shapes = ShapeBook::new();
    let mut canvas = RecordingCanvas::default();
    let fish = Fish {
        pos: Point::new(60, 90),
        dir: -1,
        speed: 2,
        size: SizeClass::Small,
        active: true,
        tail_phase: 0,
    };
    draw_fish(&mut canvas, &fish, &shapes);
    let Op::Poly(tail, _) = &canvas.ops[0] else {
        panic!("tail polygon expected first, got {:?}", canvas.ops[0]);
    };
    // Tail trails behind: east of the body when swimming west
    assert!(tail.iter().all(|p| p.x >= fish.pos.x));
}

#[test]
fn rendering_does_not_touch_the_state() {
    let mut aq = tank();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        reef_watch::compute::tick(&mut aq, &mut rng);
    }
    let fish = aq.fish.as_slice().to_vec();
    let bubbles = aq.bubbles.as_slice().to_vec();
    let frame = aq.frame;

    let shapes = ShapeBook::new();
    let mut first = RecordingCanvas::default();
    let mut second = RecordingCanvas::default();
    draw_aquarium(&mut first, &aq, &shapes);
    draw_aquarium(&mut second, &aq, &shapes);

    assert_eq!(first.ops, second.ops);
    assert_eq!(aq.fish.as_slice(), &fish[..]);
    assert_eq!(aq.bubbles.as_slice(), &bubbles[..]);
    assert_eq!(aq.frame, frame);
}

// ── Battery ───────────────────────────────────────────────────────────────────

#[test]
fn battery_outline_is_always_drawn() {
    let mut canvas = RecordingCanvas::default();
    draw_battery(&mut canvas, Point::new(100, 2), 36, 6, 0);
    assert_eq!(canvas.lines(), 4);
    assert_eq!(canvas.ops.len(), 4);
}

#[test]
fn battery_fill_bars_and_badge() {
    let mut canvas = RecordingCanvas::default();
    draw_battery(&mut canvas, Point::new(100, 2), 36, 6, 50);
    let bars = canvas.ops.iter().filter(|op| matches!(op, Op::Rect(..))).count();
    // 18 px of fill, one bar every 3 px
    assert_eq!(bars, 6);
    assert!(canvas.ops.iter().any(|op| matches!(op, Op::Ring(_, _, Shade::Black))));
}

#[test]
fn low_battery_has_no_badge() {
    let mut canvas = RecordingCanvas::default();
    draw_battery(&mut canvas, Point::new(100, 2), 36, 6, 10);
    assert!(!canvas.ops.iter().any(|op| matches!(op, Op::Ring(..))));
    let bars = canvas.ops.iter().filter(|op| matches!(op, Op::Rect(..))).count();
    assert_eq!(bars, 1);
}

// ── Spiral ────────────────────────────────────────────────────────────────────

#[test]
fn spiral_frame_layout() {
    let s = Spiral::new(Bounds::new(144, 168));
    let mut canvas = RecordingCanvas::default();
    spiral::draw_spiral(&mut canvas, &s);

    assert_eq!(canvas.ops[0], Op::Rect(Point::new(0, 0), 144, 168, Shade::Black));
    // Shadow disc sits behind every ring
    assert_eq!(canvas.ops[1], Op::Disc(Point::new(72, 84), spiral::shadow_radius(144, 0), Shade::Black));
    assert!(canvas.ops[2..].iter().all(|op| matches!(op, Op::Line(..))));
    // Twelve centre rings and two corner rings, one segment per vertex step
    assert_eq!(canvas.lines(), ((RINGS + 2) * POINTS_PER_RING) as usize);
}

#[test]
fn spiral_rotation_wraps() {
    let mut s = Spiral::new(Bounds::new(144, 168));
    for _ in 0..1000 {
        spiral::step(&mut s, 50);
        assert!((0..FULL_CIRCLE).contains(&s.rotation));
        assert!((0..100).contains(&s.percent()));
    }
    // 400 ticks of 50 ms make one 20 s rotation; 1000 is two and a half
    let per_tick = FULL_CIRCLE * 50 / 20_000;
    assert_eq!(s.rotation, (per_tick * 1000) % FULL_CIRCLE);
}

#[test]
fn shadow_radius_pulses_between_50_and_75_on_a_watch_screen() {
    let radii: Vec<i32> = (0..100).map(|percent| spiral::shadow_radius(144, percent)).collect();
    assert_eq!(radii.iter().min(), Some(&50));
    assert_eq!(radii.iter().max(), Some(&75));
    assert_eq!(spiral::shadow_radius(144, 0), 50);
    assert_eq!(spiral::shadow_radius(144, 5), 75);
}

#[test]
fn shadow_radius_scales_with_the_screen() {
    assert_eq!(spiral::shadow_radius(288, 0), 100);
    assert_eq!(spiral::shadow_radius(288, 5), 150);
}
