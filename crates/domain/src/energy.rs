//! Energy accounting — reconstructs consumption from power transitions.
//!
//! The accountant never mutates anything. It reads a device's ledger,
//! rebuilds the powered spans from the on/off events, clips them to the
//! query window, and prices the overlap at the device's rated draw.

use chrono::{NaiveDate, NaiveTime};

use crate::device::Device;
use crate::time::Timestamp;
use crate::usage::{UsageEventKind, UsageInterval};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Energy drawn by `device` within `[start, end)`, in kilowatt-hours.
///
/// Battery-only devices report zero. A window with `start >= end` reports
/// zero. A span still open when the window closes is counted up to the
/// window end. The result is never negative.
#[must_use]
pub fn consumed_kwh(device: &Device, start: Timestamp, end: Timestamp) -> f64 {
    if !device.power_mode.is_metered() {
        return 0.0;
    }
    let Some(window) = UsageInterval::new(start, end) else {
        return 0.0;
    };

    let mut hours = 0.0;
    let mut pending: Option<Timestamp> = None;
    for event in device.ledger().events_by_time() {
        match event.kind {
            // A repeated power-on moves the span start forward.
            UsageEventKind::PowerOn => pending = Some(event.at),
            UsageEventKind::PowerOff => {
                if let Some(started) = pending.take() {
                    hours += overlap_hours(started, event.at, &window);
                }
            }
        }
    }
    // A span with no power-off runs to the window end.
    if let Some(started) = pending {
        hours += overlap_hours(started, window.end(), &window);
    }

    device.power_draw_watts * hours / 1000.0
}

fn overlap_hours(start: Timestamp, end: Timestamp, window: &UsageInterval) -> f64 {
    UsageInterval::new(start, end)
        .and_then(|span| span.intersect(window))
        .map_or(0.0, |overlap| {
            overlap.duration().num_milliseconds() as f64 / MILLIS_PER_HOUR
        })
}

/// `[midnight, next midnight)` for the given calendar day.
#[must_use]
pub fn day_window(date: NaiveDate) -> Option<(Timestamp, Timestamp)> {
    let next = date.succ_opt()?;
    Some((midnight(date), midnight(next)))
}

/// `[first of the month, first of the next month)`, or `None` for an
/// invalid year/month pair.
#[must_use]
pub fn month_window(year: i32, month: u32) -> Option<(Timestamp, Timestamp)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((midnight(start), midnight(end)))
}

/// `[January 1st, January 1st of the next year)`.
#[must_use]
pub fn year_window(year: i32) -> Option<(Timestamp, Timestamp)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    Some((midnight(start), midnight(end)))
}

fn midnight(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}
