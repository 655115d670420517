/// Tick driver: the single entry point the host feeds with events.
///
/// The watchface owns its scene for as long as it is on screen.  Each tick
/// runs one simulation step to completion, marks the surface dirty and
/// re-arms the timer for a period chosen from the latest power reading.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDateTime;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;

use crate::clock::{ClockStyle, ClockText};
use crate::compute;
use crate::config::{Variant, LOW_BATTERY_PERCENT, LOW_POWER_TICK_MS, RETRY_PERIOD_FACTOR, TICK_MS};
use crate::entities::Aquarium;
use crate::geometry::{Bounds, Point};
use crate::render::{draw_aquarium, draw_battery, Canvas};
use crate::shapes::ShapeBook;
use crate::spawn::populate;
use crate::spiral::{self, Spiral};

// ── Host boundary ─────────────────────────────────────────────────────────────

/// Handle of one timer registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    /// The host could not register another timer.
    TimerUnavailable,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::TimerUnavailable => write!(f, "no timer slot available"),
        }
    }
}

impl std::error::Error for HostError {}

/// What the watchface needs from its host.  Delivery of a registered timer
/// is at most once, and a cancelled timer is never delivered.
pub trait Host {
    fn schedule(&mut self, after: Duration) -> Result<TimerId, HostError>;
    fn cancel(&mut self, timer: TimerId);
    /// Ask for a redraw at the host's convenience.
    fn mark_dirty(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerState {
    pub percent: u8,
    pub charging: bool,
}

impl PowerState {
    pub fn is_low(&self) -> bool {
        self.percent <= LOW_BATTERY_PERCENT && !self.charging
    }
}

impl Default for PowerState {
    fn default() -> Self {
        PowerState {
            percent: 100,
            charging: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Tick(TimerId),
    PowerChanged(PowerState),
    ClockChanged(NaiveDateTime),
}

/// Period for the next re-arm.
pub fn tick_period(power: PowerState) -> Duration {
    if power.is_low() {
        Duration::from_millis(LOW_POWER_TICK_MS)
    } else {
        Duration::from_millis(TICK_MS)
    }
}

// ── Scenes ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    Aquarium(Variant),
    Spiral,
}

#[derive(Debug)]
pub enum Scene {
    Aquarium { tank: Aquarium, shapes: ShapeBook },
    Spiral(Spiral),
}

impl Scene {
    fn build(kind: SceneKind, bounds: Bounds, rng: &mut StdRng) -> Self {
        match kind {
            SceneKind::Aquarium(variant) => Scene::Aquarium {
                tank: populate(rng, bounds, variant.tuning()),
                shapes: ShapeBook::new(),
            },
            SceneKind::Spiral => Scene::Spiral(Spiral::new(bounds)),
        }
    }

    fn step(&mut self, rng: &mut StdRng, period: Duration) {
        match self {
            Scene::Aquarium { tank, .. } => compute::tick(tank, rng),
            Scene::Spiral(spiral) => spiral::step(spiral, period.as_millis() as u64),
        }
    }

    fn bounds(&self) -> Bounds {
        match self {
            Scene::Aquarium { tank, .. } => tank.bounds,
            Scene::Spiral(spiral) => spiral.bounds,
        }
    }
}

// ── Watchface ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Watchface {
    scene: Scene,
    rng: StdRng,
    power: PowerState,
    clock_style: ClockStyle,
    clock: ClockText,
    last_time: Option<NaiveDateTime>,
    timer: Option<TimerId>,
    period: Duration,
    shown: bool,
    ticks: u64,
}

impl Watchface {
    /// Build the scene for a screen of `bounds`.  Nothing runs until `show`.
    pub fn new(kind: SceneKind, bounds: Bounds, mut rng: StdRng) -> Self {
        let scene = Scene::build(kind, bounds, &mut rng);
        debug!("scene {:?} built for {}x{}", kind, bounds.width, bounds.height);
        Watchface {
            scene,
            rng,
            power: PowerState::default(),
            clock_style: ClockStyle::TwentyFourHour,
            clock: ClockText::default(),
            last_time: None,
            timer: None,
            period: Duration::from_millis(TICK_MS),
            shown: false,
            ticks: 0,
        }
    }

    pub fn with_clock_style(mut self, style: ClockStyle) -> Self {
        self.clock_style = style;
        self
    }

    /// Start ticking.  Events delivered before this only update state.
    pub fn show(&mut self, host: &mut impl Host) {
        self.shown = true;
        self.rearm_if_stalled(host);
        host.mark_dirty();
    }

    /// Stop ticking and release the scene.  A pending timer is cancelled
    /// before the scene's buffers go away.
    pub fn hide(mut self, host: &mut impl Host) {
        if let Some(timer) = self.timer.take() {
            host.cancel(timer);
        }
        debug!("watchface hidden after {} ticks", self.ticks);
    }

    pub fn handle_event(&mut self, host: &mut impl Host, event: Event) {
        match event {
            Event::Tick(id) => {
                if self.timer != Some(id) {
                    debug!("ignoring stale tick {:?}", id);
                    return;
                }
                self.timer = None;
                self.scene.step(&mut self.rng, self.period);
                self.ticks += 1;
                host.mark_dirty();
                self.arm(host);
            }
            Event::PowerChanged(power) => {
                if power.is_low() != self.power.is_low() {
                    info!(
                        "power {}% (charging: {}), low-power mode {}",
                        power.percent,
                        power.charging,
                        if power.is_low() { "on" } else { "off" }
                    );
                }
                self.power = power;
                host.mark_dirty();
                self.rearm_if_stalled(host);
            }
            Event::ClockChanged(now) => {
                self.clock = ClockText::new(&now, self.clock_style);
                self.last_time = Some(now);
                host.mark_dirty();
                self.rearm_if_stalled(host);
            }
        }
    }

    pub fn set_clock_style(&mut self, host: &mut impl Host, style: ClockStyle) {
        self.clock_style = style;
        if let Some(now) = self.last_time {
            self.clock = ClockText::new(&now, style);
            host.mark_dirty();
        }
    }

    /// Draw the scene and the battery gauge.  Clock text is left to the host.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        match &self.scene {
            Scene::Aquarium { tank, shapes } => draw_aquarium(canvas, tank, shapes),
            Scene::Spiral(spiral) => spiral::draw_spiral(canvas, spiral),
        }
        let bounds = self.scene.bounds();
        let (w, h) = (bounds.width / 4, 6);
        draw_battery(canvas, Point::new(bounds.width - w - 2, 2), w, h, self.power.percent);
    }

    // ── Timer ─────────────────────────────────────────────────────────────────

    /// Register the next tick.  One retry at a longer period, then give up
    /// until the next host event.
    fn arm(&mut self, host: &mut impl Host) {
        let period = tick_period(self.power);
        match host.schedule(period) {
            Ok(id) => {
                self.timer = Some(id);
                self.period = period;
            }
            Err(err) => {
                let longer = period * RETRY_PERIOD_FACTOR as u32;
                warn!("timer registration failed ({}), retrying at {:?}", err, longer);
                match host.schedule(longer) {
                    Ok(id) => {
                        self.timer = Some(id);
                        self.period = longer;
                    }
                    Err(err) => {
                        error!("timer retry failed ({}), animation paused", err);
                        self.timer = None;
                    }
                }
            }
        }
    }

    fn rearm_if_stalled(&mut self, host: &mut impl Host) {
        if self.shown && self.timer.is_none() {
            self.arm(host);
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn power(&self) -> PowerState {
        self.power
    }

    pub fn clock(&self) -> &ClockText {
        &self.clock
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Period of the most recent successful registration.
    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
