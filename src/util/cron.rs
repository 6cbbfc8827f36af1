//! Five-field cron expression parsing and matching.
//!
//! Scheduled tasks store a classic five-field cron line (minute, hour,
//! day-of-month, month, day-of-week). The scheduler ticks once a minute and
//! asks each enabled task whether its expression matches the current UTC
//! minute. Supported syntax: `*`, single values, ranges `a-b`, steps `*/n`
//! and `a-b/n`, and comma lists. Day-of-week accepts 0-7 with both 0 and 7
//! meaning Sunday.

use chrono::{DateTime, Datelike, Timelike, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid cron expression: {0}")]
pub struct CronParseError(String);

/// Parsed cron schedule; each field is a set of accepted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule {
    minutes: FieldSet,
    hours: FieldSet,
    days_of_month: FieldSet,
    months: FieldSet,
    days_of_week: FieldSet,
}

impl CronSchedule {
    pub fn parse(expression: &str) -> Result<Self, CronParseError> {
        let fields: Vec<&str> = expression.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(CronParseError(format!(
                "expected 5 fields, got {} in {expression:?}",
                fields.len()
            )));
        }

        Ok(Self {
            minutes: FieldSet::parse(fields[0], 0, 59)?,
            hours: FieldSet::parse(fields[1], 0, 23)?,
            days_of_month: FieldSet::parse(fields[2], 1, 31)?,
            months: FieldSet::parse(fields[3], 1, 12)?,
            days_of_week: FieldSet::parse_day_of_week(fields[4])?,
        })
    }

    /// Whether the schedule fires in the minute containing `at`.
    ///
    /// Classic cron semantics: when both day-of-month and day-of-week are
    /// restricted, a match on either is enough.
    pub fn matches(&self, at: DateTime<Utc>) -> bool {
        if !self.minutes.contains(at.minute()) || !self.hours.contains(at.hour()) {
            return false;
        }
        if !self.months.contains(at.month()) {
            return false;
        }

        let dom_match = self.days_of_month.contains(at.day());
        let dow_match = self
            .days_of_week
            .contains(at.weekday().num_days_from_sunday());

        match (self.days_of_month.restricted, self.days_of_week.restricted) {
            (true, true) => dom_match || dow_match,
            (true, false) => dom_match,
            (false, true) => dow_match,
            (false, false) => true,
        }
    }
}

/// Set of accepted values for one cron field, stored as a bitmask.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldSet {
    bits: u64,
    /// False when the field was `*` or `*/n` covering every value.
    restricted: bool,
}

impl FieldSet {
    fn parse(field: &str, min: u32, max: u32) -> Result<Self, CronParseError> {
        let mut bits = 0u64;
        let restricted = field != "*";

        for part in field.split(',') {
            let (range, step) = match part.split_once('/') {
                Some((range, step)) => {
                    let step: u32 = step
                        .parse()
                        .map_err(|_| CronParseError(format!("bad step in {part:?}")))?;
                    if step == 0 {
                        return Err(CronParseError(format!("zero step in {part:?}")));
                    }
                    (range, step)
                }
                None => (part, 1),
            };

            let (start, end) = if range == "*" {
                (min, max)
            } else if let Some((a, b)) = range.split_once('-') {
                let start = parse_value(a, min, max)?;
                let end = parse_value(b, min, max)?;
                if start > end {
                    return Err(CronParseError(format!("inverted range {range:?}")));
                }
                (start, end)
            } else {
                let value = parse_value(range, min, max)?;
                // A bare value with a step, e.g. `5/15`, runs to the max.
                if step > 1 {
                    (value, max)
                } else {
                    (value, value)
                }
            };

            let mut value = start;
            while value <= end {
                bits |= 1 << value;
                value += step;
            }
        }

        if bits == 0 {
            return Err(CronParseError(format!("empty field {field:?}")));
        }

        Ok(Self { bits, restricted })
    }

    fn parse_day_of_week(field: &str) -> Result<Self, CronParseError> {
        let mut set = Self::parse(field, 0, 7)?;
        // 7 is an alias for Sunday.
        if set.bits & (1 << 7) != 0 {
            set.bits |= 1;
            set.bits &= !(1u64 << 7);
        }
        Ok(set)
    }

    fn contains(&self, value: u32) -> bool {
        value < 64 && self.bits & (1 << value) != 0
    }
}

fn parse_value(s: &str, min: u32, max: u32) -> Result<u32, CronParseError> {
    let value: u32 = s
        .parse()
        .map_err(|_| CronParseError(format!("bad value {s:?}")))?;
    if value < min || value > max {
        return Err(CronParseError(format!(
            "value {value} out of range {min}-{max}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn wildcard_matches_every_minute() {
        let schedule = CronSchedule::parse("* * * * *").unwrap();

        assert!(schedule.matches(at(2026, 7, 1, 0, 0)));
        assert!(schedule.matches(at(2026, 12, 31, 23, 59)));
    }

    #[test]
    fn fixed_time_matches_only_that_minute() {
        let schedule = CronSchedule::parse("30 4 * * *").unwrap();

        assert!(schedule.matches(at(2026, 7, 1, 4, 30)));
        assert!(!schedule.matches(at(2026, 7, 1, 4, 31)));
        assert!(!schedule.matches(at(2026, 7, 1, 5, 30)));
    }

    #[test]
    fn steps_and_ranges() {
        let schedule = CronSchedule::parse("*/15 9-17 * * *").unwrap();

        assert!(schedule.matches(at(2026, 7, 1, 9, 0)));
        assert!(schedule.matches(at(2026, 7, 1, 17, 45)));
        assert!(!schedule.matches(at(2026, 7, 1, 8, 45)));
        assert!(!schedule.matches(at(2026, 7, 1, 9, 20)));
    }

    #[test]
    fn day_of_week_with_sunday_alias() {
        // 2026-07-05 is a Sunday.
        let on_seven = CronSchedule::parse("0 0 * * 7").unwrap();
        let on_zero = CronSchedule::parse("0 0 * * 0").unwrap();

        assert!(on_seven.matches(at(2026, 7, 5, 0, 0)));
        assert!(on_zero.matches(at(2026, 7, 5, 0, 0)));
        assert!(!on_zero.matches(at(2026, 7, 6, 0, 0)));
    }

    #[test]
    fn restricted_dom_and_dow_match_either() {
        // 2026-07-06 is a Monday, not the 1st.
        let schedule = CronSchedule::parse("0 0 1 * 1").unwrap();

        assert!(schedule.matches(at(2026, 7, 1, 0, 0)));
        assert!(schedule.matches(at(2026, 7, 6, 0, 0)));
        assert!(!schedule.matches(at(2026, 7, 7, 0, 0)));
    }

    #[test]
    fn rejects_malformed_expressions() {
        for expression in ["", "* * * *", "61 * * * *", "*/0 * * * *", "5-1 * * * *"] {
            assert!(CronSchedule::parse(expression).is_err(), "{expression:?}");
        }
    }
}
