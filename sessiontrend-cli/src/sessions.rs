//! Trading-session inference from bar timestamps (UTC).

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, NaiveTime};
use sessiontrend_core::SessionType;

use crate::settings::SessionSettings;

/// Half-open time-of-day window `[start, end)`, wrapping midnight when
/// `end < start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: NaiveTime,
    end: NaiveTime,
}

impl Window {
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_hhmm(start)?,
            end: parse_hhmm(end)?,
        })
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time < self.end
        } else {
            time >= self.start || time < self.end
        }
    }
}

fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .with_context(|| format!("invalid session time {s:?}, expected HH:MM"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindows {
    pub asian: Window,
    pub european: Window,
    pub us: Window,
}

impl SessionWindows {
    pub fn from_settings(settings: &SessionSettings) -> Result<Self> {
        Ok(Self {
            asian: Window::parse(&settings.asian_start, &settings.asian_end)?,
            european: Window::parse(&settings.european_start, &settings.european_end)?,
            us: Window::parse(&settings.us_start, &settings.us_end)?,
        })
    }

    /// Session active at `timestamp`.
    ///
    /// European and US together make `Overlap`. US wins over Asian where
    /// those two overlap. Times outside every window belong to the session
    /// that opened most recently.
    pub fn session_at(&self, timestamp: NaiveDateTime) -> SessionType {
        let time = timestamp.time();
        match (
            self.asian.contains(time),
            self.european.contains(time),
            self.us.contains(time),
        ) {
            (_, true, true) => SessionType::Overlap,
            (_, false, true) => SessionType::Us,
            (_, true, false) => SessionType::European,
            (true, false, false) => SessionType::Asian,
            (false, false, false) => self.most_recent_open(time),
        }
    }

    fn most_recent_open(&self, time: NaiveTime) -> SessionType {
        const DAY_SECS: i64 = 24 * 60 * 60;
        [
            (SessionType::Asian, self.asian.start),
            (SessionType::European, self.european.start),
            (SessionType::Us, self.us.start),
        ]
        .into_iter()
        .min_by_key(|(_, start)| (time - *start).num_seconds().rem_euclid(DAY_SECS))
        .map_or(SessionType::Asian, |(session, _)| session)
    }
}

impl Default for SessionWindows {
    fn default() -> Self {
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
        Self {
            asian: Window {
                start: hm(21, 0),
                end: hm(6, 0),
            },
            european: Window {
                start: hm(6, 0),
                end: hm(16, 0),
            },
            us: Window {
                start: hm(13, 0),
                end: hm(22, 0),
            },
        }
    }
}
