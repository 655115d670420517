/// Rendering layer: all terminal I/O lives here.
///
/// The watchface draws into a `Framebuffer` of pixels; `render` then packs
/// two pixel rows into each terminal row with the upper-half block glyph and
/// lays the clock, date and battery text over it.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use reef_watch::geometry::{Bounds, Point};
use reef_watch::render::{Canvas, Shade};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TIME: Color = Color::White;
const C_DATE: Color = Color::Grey;
const C_BATTERY: Color = Color::White;
const C_BATTERY_LOW: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn shade_color(shade: Shade) -> Color {
    match shade {
        Shade::Black => Color::Black,
        Shade::White => Color::White,
        Shade::LightGray => Color::Grey,
        Shade::DarkGray => Color::DarkGrey,
        Shade::Water => Color::Rgb { r: 0, g: 40, b: 90 },
        Shade::Sand => Color::Rgb { r: 194, g: 170, b: 110 },
        Shade::Kelp => Color::DarkGreen,
        Shade::Coral => Color::Rgb { r: 240, g: 120, b: 100 },
        Shade::Orange => Color::Rgb { r: 255, g: 140, b: 0 },
        Shade::Yellow => Color::Yellow,
        Shade::Purple => Color::Magenta,
        Shade::Pink => Color::Rgb { r: 255, g: 160, b: 200 },
        Shade::Teal => Color::DarkCyan,
        Shade::Red => Color::Red,
    }
}

// ── Framebuffer ───────────────────────────────────────────────────────────────

/// Pixel surface, one `Shade` per pixel.  Out-of-range writes are clipped.
pub struct Framebuffer {
    width: i32,
    height: i32,
    pixels: Vec<Shade>,
}

impl Framebuffer {
    pub fn new(bounds: Bounds) -> Self {
        Framebuffer {
            width: bounds.width,
            height: bounds.height,
            pixels: vec![Shade::Black; (bounds.width * bounds.height) as usize],
        }
    }

    fn set(&mut self, x: i32, y: i32, shade: Shade) {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            self.pixels[(y * self.width + x) as usize] = shade;
        }
    }

    fn get(&self, x: i32, y: i32) -> Shade {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            Shade::Black
        }
    }

    fn span(&mut self, y: i32, x0: i32, x1: i32, shade: Shade) {
        for x in x0.max(0)..=x1.min(self.width - 1) {
            self.set(x, y, shade);
        }
    }
}

impl Canvas for Framebuffer {
    fn fill_rect(&mut self, origin: Point, width: i32, height: i32, shade: Shade) {
        for y in origin.y..origin.y + height {
            self.span(y, origin.x, origin.x + width - 1, shade);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: i32, shade: Shade) {
        let r2 = radius * radius + radius;
        for dy in -radius..=radius {
            let mut half = 0;
            while (half + 1) * (half + 1) + dy * dy <= r2 {
                half += 1;
            }
            self.span(center.y + dy, center.x - half, center.x + half, shade);
        }
    }

    fn draw_circle(&mut self, center: Point, radius: i32, shade: Shade) {
        // Midpoint circle
        let (mut x, mut y, mut err) = (radius, 0, 1 - radius);
        while x >= y {
            for (dx, dy) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
                self.set(center.x + dx, center.y + dy, shade);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, shade: Shade) {
        // Bresenham
        let (dx, dy) = ((to.x - from.x).abs(), -(to.y - from.y).abs());
        let (sx, sy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
        let (mut x, mut y, mut err) = (from.x, from.y, dx + dy);
        loop {
            self.set(x, y, shade);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], shade: Shade) {
        if points.len() < 3 {
            return;
        }
        let top = points.iter().map(|p| p.y).min().unwrap_or(0);
        let bottom = points.iter().map(|p| p.y).max().unwrap_or(0);
        let mut crossings = [0i32; 16];
        for y in top..=bottom {
            // Even-odd scanline at the pixel row
            let mut n = 0;
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= y && b.y > y) || (b.y <= y && a.y > y) {
                    if n < crossings.len() {
                        crossings[n] = a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y);
                        n += 1;
                    }
                }
            }
            crossings[..n].sort_unstable();
            for pair in crossings[..n].chunks_exact(2) {
                self.span(y, pair[0], pair[1], shade);
            }
        }
        for (i, a) in points.iter().enumerate() {
            self.draw_line(*a, points[(i + 1) % points.len()], shade);
        }
    }
}

// ── Overlay text ──────────────────────────────────────────────────────────────

/// Where the clock sits: in the reserved top band, or centred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockPlacement {
    Top,
    Centre,
}

pub struct Overlay<'a> {
    pub time: &'a str,
    pub date: &'a str,
    pub battery: u8,
    pub charging: bool,
    pub low_power: bool,
    pub placement: ClockPlacement,
    pub label: &'a str,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, fb: &Framebuffer, overlay: &Overlay) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;

    let rows = fb.height / 2;
    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row as u16))?;
        let mut last: Option<(Shade, Shade)> = None;
        for x in 0..fb.width {
            let pair = (fb.get(x, row * 2), fb.get(x, row * 2 + 1));
            if last != Some(pair) {
                out.queue(style::SetForegroundColor(shade_color(pair.0)))?;
                out.queue(style::SetBackgroundColor(shade_color(pair.1)))?;
                last = Some(pair);
            }
            out.queue(Print('▀'))?;
        }
    }
    out.queue(style::ResetColor)?;

    draw_clock(out, fb, overlay)?;
    draw_battery_text(out, fb, overlay)?;
    draw_controls_hint(out, fb, overlay)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows as u16))?;
    out.flush()?;
    Ok(())
}

fn centred<W: Write>(out: &mut W, width: i32, row: i32, text: &str, color: Color) -> std::io::Result<()> {
    let col = (width - text.chars().count() as i32).max(0) / 2;
    out.queue(cursor::MoveTo(col as u16, row.max(0) as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_clock<W: Write>(out: &mut W, fb: &Framebuffer, overlay: &Overlay) -> std::io::Result<()> {
    let rows = fb.height / 2;
    let time_row = match overlay.placement {
        ClockPlacement::Top => rows * 3 / 20,
        ClockPlacement::Centre => rows / 2 - 1,
    };
    centred(out, fb.width, time_row, overlay.time, C_TIME)?;
    centred(out, fb.width, time_row + 1, overlay.date, C_DATE)?;
    Ok(())
}

fn draw_battery_text<W: Write>(out: &mut W, fb: &Framebuffer, overlay: &Overlay) -> std::io::Result<()> {
    let text = format!(
        "{}{}%{}",
        if overlay.charging { "+" } else { "" },
        overlay.battery,
        if overlay.low_power { " LP" } else { "" }
    );
    let gauge_left = fb.width - fb.width / 4 - 2;
    let col = (gauge_left - text.chars().count() as i32 - 1).max(0);
    out.queue(cursor::MoveTo(col as u16, 1))?;
    out.queue(style::SetForegroundColor(if overlay.low_power { C_BATTERY_LOW } else { C_BATTERY }))?;
    out.queue(Print(&text))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, fb: &Framebuffer, overlay: &Overlay) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, (fb.height / 2) as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(Print(format!(
        "{}   T : 12/24h   C : charger   - + : battery   M : menu   Q : quit",
        overlay.label
    )))?;
    Ok(())
}
