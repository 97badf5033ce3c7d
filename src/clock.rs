//! Source of "today" for the records that are stamped on creation.
//!
//! The clock is handed to the actors as their runtime context, so tests can pin
//! the date without touching the system time.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Local wall-clock time.
    #[default]
    System,
    /// A frozen instant.
    Fixed(NaiveDateTime),
}

impl Clock {
    /// A clock frozen at 08:00 on `date`.
    pub fn fixed(date: NaiveDate) -> Self {
        Clock::Fixed(date.and_hms_opt(8, 0, 0).unwrap_or_default())
    }

    /// Current local time truncated to the minute.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => to_minute(Local::now().naive_local()),
            Clock::Fixed(instant) => *instant,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// `instant` with its seconds dropped, the precision timestamps are stored at.
pub fn to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}
