// src/window.rs
//! Date Window: one "current" calendar date, bounded to a fixed trailing
//! range snapshotted at construction time. The window never consults network
//! state; it only decides which dates may be asked for and how to print them.

use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::types::{BulletinKey, Period, Region};

/// How far back navigation may reach, in days.
const WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct DateWindow {
    current: NaiveDate,
    min: NaiveDate,
    max: NaiveDate,
}

impl DateWindow {
    pub fn new() -> Self {
        Self::starting_at(Utc::now().date_naive())
    }

    /// Snapshot the window at an explicit "today". Bounds are fixed here and
    /// never re-evaluated, so a session spanning midnight keeps its range.
    pub fn starting_at(today: NaiveDate) -> Self {
        Self {
            current: today,
            min: today - Duration::days(WINDOW_DAYS),
            max: today,
        }
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current
    }

    pub fn can_go_back(&self) -> bool {
        self.current > self.min
    }

    pub fn can_go_forward(&self) -> bool {
        self.current < self.max
    }

    /// Step one day back. A move past the lower bound is a rejected no-op,
    /// never an error.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.current = self.current - Duration::days(1);
        true
    }

    pub fn go_forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.current = self.current + Duration::days(1);
        true
    }

    /// `YYYY-MM-DD`, locale- and timezone-independent. This is the form keys
    /// are built from.
    pub fn current_key_date(&self) -> String {
        self.current.format("%Y-%m-%d").to_string()
    }

    pub fn key_for(&self, region: Region, period: Period) -> BulletinKey {
        BulletinKey::new(region, self.current, period)
    }

    /// Human label for the current date, relative to the real-world current
    /// day (re-evaluated on each call, unlike the navigation bounds).
    pub fn display_label(&self) -> String {
        self.label_on(Utc::now().date_naive())
    }

    /// `display_label` with "today" injected, for deterministic callers.
    pub fn label_on(&self, today: NaiveDate) -> String {
        if self.current == today {
            return "Today".to_string();
        }
        if today.pred_opt() == Some(self.current) {
            return "Yesterday".to_string();
        }
        if self.current.year() == today.year() {
            self.current.format("%b %-d").to_string()
        } else {
            self.current.format("%b %-d, %Y").to_string()
        }
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::new()
    }
}
