// File: crates/multiline-core/src/ticks.rs
// Summary: "Nice" numeric domains and ticks (1/2/5 x 10^k steps) and calendar ticks for time axes.

use chrono::{DateTime, Datelike, Months, NaiveDate, Weekday};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Step for roughly `count` ticks over `[start, stop]`. Positive values are the
/// step itself; negative values `-k` mean a step of `1 / k` (keeps fractional
/// steps exact).
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Signed tick step as a plain number.
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let inc = if reverse { tick_increment(stop, start, count) } else { tick_increment(start, stop, count) };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Extend `[start, stop]` outward to multiples of the tick step.
pub fn nice_domain(mut start: f64, mut stop: f64, count: f64) -> (f64, f64) {
    let reversed = stop < start;
    if reversed {
        std::mem::swap(&mut start, &mut stop);
    }
    let mut previous = None;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if previous == Some(step) {
            break;
        } else if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        previous = Some(step);
    }
    if reversed { (stop, start) } else { (start, stop) }
}

/// Round tick values inside `[start, stop]`, about `count` of them.
pub fn linear_ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some((i1, i2, inc)) = tick_range(lo, hi, count) else { return Vec::new() };
    let mut ticks: Vec<f64> = (i1..=i2)
        .map(|i| if inc < 0.0 { i as f64 / -inc } else { i as f64 * inc })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

fn tick_range(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count;
    let power = step.log10().floor();
    if !power.is_finite() {
        return None;
    }
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = (start * k).round();
        i2 = (stop * k).round();
        if i1 / k < start {
            i1 += 1.0;
        }
        if i2 / k > stop {
            i2 -= 1.0;
        }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = (start / k).round();
        i2 = (stop / k).round();
        if i1 * k < start {
            i1 += 1.0;
        }
        if i2 * k > stop {
            i2 -= 1.0;
        }
        inc = k;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_range(start, stop, count * 2.0);
    }
    Some((i1 as i64, i2 as i64, inc))
}

/// Format a tick value with just enough decimals for its step.
pub fn format_tick(value: f64, step: f64) -> String {
    let step = step.abs();
    let decimals = if step > 0.0 && step < 1.0 { (-step.log10().floor()) as usize } else { 0 };
    let text = format!("{value:.decimals$}");
    // Avoid "-0" for values that round to zero.
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

/// Calendar interval between consecutive time ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    Day(u32),
    Week,
    Month(u32),
    Year(i32),
}

const DAY_MS: f64 = 86_400_000.0;
const WEEK_MS: f64 = DAY_MS * 7.0;
const MONTH_MS: f64 = DAY_MS * 30.0;
const YEAR_MS: f64 = DAY_MS * 365.0;

const INTERVALS: [(TimeInterval, f64); 6] = [
    (TimeInterval::Day(1), DAY_MS),
    (TimeInterval::Day(2), DAY_MS * 2.0),
    (TimeInterval::Week, WEEK_MS),
    (TimeInterval::Month(1), MONTH_MS),
    (TimeInterval::Month(3), MONTH_MS * 3.0),
    (TimeInterval::Year(1), YEAR_MS),
];

/// Pick the calendar interval whose duration is closest (in ratio) to the
/// span divided by `count`. Spans shorter than a day still tick daily.
pub fn choose_interval(start_ms: f64, stop_ms: f64, count: f64) -> TimeInterval {
    let target = (stop_ms - start_ms).abs() / count.max(f64::MIN_POSITIVE);
    let i = INTERVALS.partition_point(|&(_, d)| d <= target);
    if i == INTERVALS.len() {
        let step = tick_step(start_ms / YEAR_MS, stop_ms / YEAR_MS, count).abs().floor().max(1.0);
        return TimeInterval::Year(step as i32);
    }
    if i == 0 {
        return TimeInterval::Day(1);
    }
    let (lo, lo_ms) = INTERVALS[i - 1];
    let (hi, hi_ms) = INTERVALS[i];
    if target / lo_ms < hi_ms / target { lo } else { hi }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimeTick {
    pub date: NaiveDate,
    pub label: String,
}

/// Calendar-aligned ticks within `[start_ms, stop_ms]` (UTC epoch millis).
pub fn time_ticks(start_ms: f64, stop_ms: f64, count: f64) -> Vec<TimeTick> {
    let (lo, hi) = if stop_ms < start_ms { (stop_ms, start_ms) } else { (start_ms, stop_ms) };
    let (Some(first), Some(last)) = (millis_to_date_ceil(lo), millis_to_date_floor(hi)) else {
        return Vec::new();
    };
    if first > last || !(count > 0.0) {
        return Vec::new();
    }
    let interval = choose_interval(lo, hi, count);
    let mut out = Vec::new();
    match interval {
        TimeInterval::Day(k) => {
            for date in first.iter_days().take_while(|d| *d <= last) {
                if (date.day0() % k) == 0 {
                    out.push(date);
                }
            }
        }
        TimeInterval::Week => {
            for date in first.iter_days().take_while(|d| *d <= last) {
                if date.weekday() == Weekday::Sun {
                    out.push(date);
                }
            }
        }
        TimeInterval::Month(k) => {
            let mut date = month_ceil(first);
            while date <= last {
                if date.month0() % k == 0 {
                    out.push(date);
                }
                match date.checked_add_months(Months::new(1)) {
                    Some(next) => date = next,
                    None => break,
                }
            }
        }
        TimeInterval::Year(k) => {
            let mut year = if first.ordinal() == 1 { first.year() } else { first.year() + 1 };
            while let Some(date) = NaiveDate::from_ymd_opt(year, 1, 1).filter(|d| *d <= last) {
                if year.rem_euclid(k) == 0 {
                    out.push(date);
                }
                year += 1;
            }
        }
    }
    out.into_iter().map(|date| TimeTick { label: format_date_tick(date), date }).collect()
}

/// Label a midnight date by its coarsest boundary: year, month, week, or day.
pub fn format_date_tick(date: NaiveDate) -> String {
    if date.day() != 1 {
        if date.weekday() == Weekday::Sun {
            date.format("%b %d").to_string()
        } else {
            date.format("%a %d").to_string()
        }
    } else if date.month() != 1 {
        date.format("%B").to_string()
    } else {
        date.format("%Y").to_string()
    }
}

fn millis_to_date_floor(ms: f64) -> Option<NaiveDate> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.floor() as i64).map(|dt| dt.date_naive())
}

fn millis_to_date_ceil(ms: f64) -> Option<NaiveDate> {
    let floor = millis_to_date_floor(ms)?;
    if crate::dataset::date_to_millis(floor) < ms { floor.succ_opt() } else { Some(floor) }
}

fn month_ceil(date: NaiveDate) -> NaiveDate {
    if date.day() == 1 {
        return date;
    }
    date.with_day(1)
        .and_then(|d| d.checked_add_months(Months::new(1)))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::date_to_millis;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn nice_domain_rounds_outward() {
        assert_eq!(nice_domain(0.0, 10.9, 10.0), (0.0, 11.0));
        assert_eq!(nice_domain(0.0, 30.0, 10.0), (0.0, 30.0));
        assert_eq!(nice_domain(0.0, 0.93, 10.0), (0.0, 1.0));
        assert_eq!(nice_domain(0.0, 97.0, 10.0), (0.0, 100.0));
    }

    #[test]
    fn linear_ticks_cover_domain() {
        let ticks = linear_ticks(0.0, 11.0, 10.0);
        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(ticks[11], 11.0);

        let ticks = linear_ticks(0.0, 1.0, 5.0);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn format_tick_uses_step_precision() {
        assert_eq!(format_tick(4.0, 2.0), "4");
        assert_eq!(format_tick(0.6000000000000001, 0.2), "0.6");
        assert_eq!(format_tick(-0.0, 0.5), "0.0");
    }

    #[test]
    fn monthly_span_ticks_each_month() {
        let start = date_to_millis(ymd(2000, 1, 1));
        let stop = date_to_millis(ymd(2000, 12, 1));
        assert_eq!(choose_interval(start, stop, 10.0), TimeInterval::Month(1));
        let ticks = time_ticks(start, stop, 10.0);
        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks[0].label, "2000");
        assert_eq!(ticks[1].label, "February");
    }

    #[test]
    fn decade_span_ticks_yearly() {
        let start = date_to_millis(ymd(2000, 1, 1));
        let stop = date_to_millis(ymd(2013, 2, 1));
        let ticks = time_ticks(start, stop, 12.8);
        assert_eq!(ticks.first().map(|t| t.date), Some(ymd(2000, 1, 1)));
        assert_eq!(ticks.last().map(|t| t.date), Some(ymd(2013, 1, 1)));
        assert!(ticks.iter().all(|t| t.label.len() == 4));

        let sparse = time_ticks(start, stop, 3.0);
        assert!(sparse.iter().all(|t| t.date.year() % 5 == 0));
    }
}
