use reef_watch::config::FULL_CIRCLE;
use reef_watch::geometry::*;
use reef_watch::random::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Bounded sampler ───────────────────────────────────────────────────────────

#[test]
fn sample_stays_in_range() {
    let mut rng = seeded_rng();
    for _ in 0..2000 {
        let a = rng.gen_range(-500..500);
        let b = a + rng.gen_range(0..300);
        let v = sample(&mut rng, a, b);
        assert!(v >= a && v <= b, "{} not in [{}, {}]", v, a, b);
    }
}

#[test]
fn sample_inverted_range_returns_min() {
    let mut rng = seeded_rng();
    assert_eq!(sample(&mut rng, 10, 3), 10);
    assert_eq!(sample(&mut rng, 0, -1), 0);
}

#[test]
fn sample_degenerate_range() {
    let mut rng = seeded_rng();
    assert_eq!(sample(&mut rng, 7, 7), 7);
}

#[test]
fn sample_full_i32_range_does_not_overflow() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        let _ = sample(&mut rng, i32::MIN, i32::MAX);
    }
    let v = sample(&mut rng, i32::MAX - 1, i32::MAX);
    assert!(v >= i32::MAX - 1);
}

#[test]
fn sample_hits_both_ends() {
    let mut rng = seeded_rng();
    let draws: Vec<i32> = (0..500).map(|_| sample(&mut rng, 0, 3)).collect();
    assert!(draws.contains(&0));
    assert!(draws.contains(&3));
}

#[test]
fn chance_extremes() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        assert!(!chance(&mut rng, 0));
        assert!(chance(&mut rng, 100));
        assert!(chance(&mut rng, 250));
    }
}

#[test]
fn direction_is_unit() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let d = direction(&mut rng);
        assert!(d == 1 || d == -1);
    }
}

// ── Phase wraparound ──────────────────────────────────────────────────────────

#[test]
fn phase_stays_in_circle_and_matches_sum_of_steps() {
    let mut rng = seeded_rng();
    let mut phase = 0;
    let mut total: i64 = 0;
    for _ in 0..100_000 {
        let step = rng.gen_range(1..5000);
        phase = advance_phase(phase, step);
        total += step as i64;
        assert!((0..FULL_CIRCLE).contains(&phase));
    }
    assert_eq!(phase as i64, total % FULL_CIRCLE as i64);
}

#[test]
fn phase_handles_huge_steps() {
    let p = advance_phase(FULL_CIRCLE - 1, i32::MAX);
    assert!((0..FULL_CIRCLE).contains(&p));
}

#[test]
fn wrap_phase_negative() {
    assert_eq!(wrap_phase(-1), FULL_CIRCLE - 1);
    assert_eq!(wrap_phase(FULL_CIRCLE as i64), 0);
}

#[test]
fn trig_lookup_cardinal_points() {
    assert_eq!(sin_lookup(0), 0);
    assert_eq!(sin_lookup(FULL_CIRCLE / 4), TRIG_MAX_RATIO);
    assert_eq!(cos_lookup(0), TRIG_MAX_RATIO);
    assert_eq!(sin_lookup(FULL_CIRCLE * 3 / 4), -TRIG_MAX_RATIO);
    assert_eq!(sin_scaled(FULL_CIRCLE / 4, 10), 10);
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[test]
fn collision_boundary_is_inclusive() {
    let a = Point::new(0, 0);
    assert!(collides(a, 3, Point::new(7, 0), 4)); // d = r1 + r2
    assert!(!collides(a, 3, Point::new(8, 0), 4)); // d = r1 + r2 + 1
}

#[test]
fn collision_is_symmetric() {
    let mut rng = seeded_rng();
    for _ in 0..2000 {
        let a = Point::new(rng.gen_range(-50..200), rng.gen_range(-50..200));
        let b = Point::new(rng.gen_range(-50..200), rng.gen_range(-50..200));
        let (ra, rb) = (rng.gen_range(0..12), rng.gen_range(0..12));
        assert_eq!(collides(a, ra, b, rb), collides(b, rb, a, ra));
    }
}

#[test]
fn scenario_prey_distance() {
    let predator = Point::new(50, 50);
    let prey = Point::new(52, 51);
    assert_eq!(predator.distance_sq(prey), 5);
    assert!(collides(predator, 7, prey, 4));
}

// ── Bounds ────────────────────────────────────────────────────────────────────

#[test]
fn water_band_sits_between_clock_and_sand() {
    let b = Bounds::new(144, 168);
    let band = b.water_band(4);
    assert_eq!(b.clock_bottom(), 50);
    assert_eq!(b.floor(), 160);
    assert_eq!(band.top, 54);
    assert_eq!(band.bottom, 156);
}

#[test]
fn tiny_screen_band_never_inverts() {
    let b = Bounds::new(10, 12);
    let band = b.water_band(7);
    assert!(band.top <= band.bottom);
}

#[test]
fn clamp_pulls_points_inside() {
    let b = Bounds::new(100, 100);
    let band = b.water_band(2);
    let p = b.clamp(Point::new(-5, 500), band);
    assert_eq!(p.x, 0);
    assert_eq!(p.y, band.bottom);
}
