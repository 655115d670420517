mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use crossterm::{
    cursor,
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use display::{ClockPlacement, Framebuffer, Overlay};
use reef_watch::clock::ClockStyle;
use reef_watch::config::Variant;
use reef_watch::driver::{Event, Host, HostError, PowerState, SceneKind, TimerId, Watchface};
use reef_watch::geometry::Bounds;

/// Longest the loop sleeps waiting for input when no timer is due sooner.
const IDLE_POLL: Duration = Duration::from_millis(20);

/// Simulated battery: one percent per this interval, off the charger.
const DRAIN_EVERY: Duration = Duration::from_secs(30);
const CHARGE_STEP: u8 = 2;
const MANUAL_STEP: u8 = 5;

// ── Terminal host ─────────────────────────────────────────────────────────────

/// Single timer slot plus a dirty flag.  A second registration while one is
/// pending fails, which exercises the watchface's retry path.
struct TerminalHost {
    next_id: u64,
    pending: Option<(TimerId, Instant)>,
    dirty: bool,
}

impl TerminalHost {
    fn new() -> Self {
        TerminalHost {
            next_id: 0,
            pending: None,
            dirty: true,
        }
    }

    /// Pop the pending timer if its deadline has passed.
    fn due(&mut self, now: Instant) -> Option<TimerId> {
        match self.pending {
            Some((id, at)) if at <= now => {
                self.pending = None;
                Some(id)
            }
            _ => None,
        }
    }

    fn wait(&self, now: Instant) -> Duration {
        self.pending
            .map(|(_, at)| at.saturating_duration_since(now).min(IDLE_POLL))
            .unwrap_or(IDLE_POLL)
    }
}

impl Host for TerminalHost {
    fn schedule(&mut self, after: Duration) -> std::result::Result<TimerId, HostError> {
        if self.pending.is_some() {
            return Err(HostError::TimerUnavailable);
        }
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending = Some((id, Instant::now() + after));
        Ok(id)
    }

    fn cancel(&mut self, timer: TimerId) {
        if self.pending.is_some_and(|(id, _)| id == timer) {
            self.pending = None;
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(SceneKind),
    ToggleClock,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<TermEvent>,
    style: ClockStyle,
) -> std::io::Result<MenuResult> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "~  REEF  WATCH  ~";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select a watchface:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Lagoon", Color::Cyan, "Calm tank, every fish checked"),
        ("2", "Reef  ", Color::Yellow, "Crowded tank, gridded hunts"),
        ("3", "Spiral", Color::White, "Rotating rings"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" - {}", desc)))?;
    }

    let clock = match style {
        ClockStyle::TwentyFourHour => "24-hour",
        ClockStyle::TwelveHour => "12-hour",
    };
    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(format!("[T] Clock: {}    [Q] Quit", clock)))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(TermEvent::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) = rx.recv() {
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(SceneKind::Aquarium(Variant::Lagoon))),
                KeyCode::Char('2') => return Ok(MenuResult::Start(SceneKind::Aquarium(Variant::Reef))),
                KeyCode::Char('3') => return Ok(MenuResult::Start(SceneKind::Spiral)),
                KeyCode::Char('t') | KeyCode::Char('T') => return Ok(MenuResult::ToggleClock),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Watchface loop ────────────────────────────────────────────────────────────

/// Simulated power source driven by wall time and keys.
struct Battery {
    state: PowerState,
    last_step: Instant,
}

impl Battery {
    fn update(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_step) < DRAIN_EVERY {
            return false;
        }
        self.last_step = now;
        self.state.percent = if self.state.charging {
            (self.state.percent + CHARGE_STEP).min(100)
        } else {
            self.state.percent.saturating_sub(1)
        };
        true
    }
}

fn minute_of(t: &NaiveDateTime) -> i64 {
    t.and_utc().timestamp() / 60
}

/// Returns `true` → quit program, `false` → back to menu.
fn face_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<TermEvent>,
    kind: SceneKind,
    style: &mut ClockStyle,
    battery: &mut Battery,
) -> std::io::Result<bool> {
    let (cols, rows) = terminal::size()?;
    // Last terminal row is the hint line; each other row holds two pixels
    let bounds = Bounds::new(cols as i32, rows.saturating_sub(1) as i32 * 2);
    let mut fb = Framebuffer::new(bounds);
    let mut host = TerminalHost::new();

    let mut face = Watchface::new(kind, bounds, StdRng::from_entropy()).with_clock_style(*style);
    face.handle_event(&mut host, Event::PowerChanged(battery.state));
    let mut now_local = Local::now().naive_local();
    face.handle_event(&mut host, Event::ClockChanged(now_local));
    face.show(&mut host);
    info!("showing {:?} on {}x{} pixels", kind, bounds.width, bounds.height);

    let (placement, label) = match kind {
        SceneKind::Aquarium(variant) => (ClockPlacement::Top, variant.label()),
        SceneKind::Spiral => (ClockPlacement::Centre, "Spiral"),
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let quit = loop {
        let now = Instant::now();

        // ── Timer delivery ───────────────────────────────────────────────────
        if let Some(id) = host.due(now) {
            face.handle_event(&mut host, Event::Tick(id));
        }

        // ── Clock and power signals ──────────────────────────────────────────
        let local = Local::now().naive_local();
        if minute_of(&local) != minute_of(&now_local) {
            now_local = local;
            face.handle_event(&mut host, Event::ClockChanged(now_local));
        }
        if battery.update(now) {
            face.handle_event(&mut host, Event::PowerChanged(battery.state));
        }

        // ── Redraw on dirty ──────────────────────────────────────────────────
        if host.dirty {
            host.dirty = false;
            face.draw(&mut fb);
            let power = face.power();
            let overlay = Overlay {
                time: &face.clock().time,
                date: &face.clock().date,
                battery: power.percent,
                charging: power.charging,
                low_power: power.is_low(),
                placement,
                label,
            };
            display::render(out, &fb, &overlay)?;
        }

        // ── Input (doubles as the sleep until the next deadline) ─────────────
        let wait = host.wait(Instant::now());
        let Ok(TermEvent::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. })) =
            rx.recv_timeout(wait)
        else {
            continue;
        };
        let mut power = battery.state;
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break true,
            KeyCode::Char('m') | KeyCode::Char('M') => break false,
            KeyCode::Char('t') | KeyCode::Char('T') => {
                *style = style.toggled();
                face.set_clock_style(&mut host, *style);
            }
            KeyCode::Char('c') | KeyCode::Char('C') => power.charging = !power.charging,
            KeyCode::Char('-') => power.percent = power.percent.saturating_sub(MANUAL_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => power.percent = (power.percent + MANUAL_STEP).min(100),
            _ => {}
        }
        if power != battery.state {
            battery.state = power;
            face.handle_event(&mut host, Event::PowerChanged(power));
        }
    };

    face.hide(&mut host);
    Ok(quit)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // stderr shares the terminal; logging stays off unless RUST_LOG asks for it
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot switch the terminal to raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("cannot enter the alternate screen")?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the tick loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<TermEvent>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(style::ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("watchface terminated")
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<TermEvent>) -> std::io::Result<()> {
    let mut style = ClockStyle::TwentyFourHour;
    let mut battery = Battery {
        state: PowerState::default(),
        last_step: Instant::now(),
    };

    loop {
        match show_menu(out, rx, style)? {
            MenuResult::Quit => break,
            MenuResult::ToggleClock => style = style.toggled(),
            MenuResult::Start(kind) => {
                if face_loop(out, rx, kind, &mut style, &mut battery)? {
                    break;
                }
                debug!("back to menu");
            }
        }
    }
    Ok(())
}
