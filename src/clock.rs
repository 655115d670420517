/// Clock and date text for the watchface overlay.

use chrono::NaiveDateTime;

/// The two display conventions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockStyle {
    /// `"14:05"` over `"Oct 17"`.
    TwentyFourHour,
    /// `"02:05"` over `"Saturday, Oct 17"`.
    TwelveHour,
}

impl ClockStyle {
    pub fn toggled(self) -> Self {
        match self {
            ClockStyle::TwentyFourHour => ClockStyle::TwelveHour,
            ClockStyle::TwelveHour => ClockStyle::TwentyFourHour,
        }
    }
}

/// Formatted strings, refreshed on each clock event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClockText {
    pub time: String,
    pub date: String,
}

pub fn format_time(now: &NaiveDateTime, style: ClockStyle) -> String {
    match style {
        ClockStyle::TwentyFourHour => now.format("%H:%M").to_string(),
        ClockStyle::TwelveHour => now.format("%I:%M").to_string(),
    }
}

pub fn format_date(now: &NaiveDateTime, style: ClockStyle) -> String {
    match style {
        ClockStyle::TwentyFourHour => now.format("%b %d").to_string(),
        ClockStyle::TwelveHour => now.format("%A, %b %d").to_string(),
    }
}

impl ClockText {
    pub fn new(now: &NaiveDateTime, style: ClockStyle) -> Self {
        ClockText {
            time: format_time(now, style),
            date: format_date(now, style),
        }
    }
}
