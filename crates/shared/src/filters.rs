use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Event;

pub const ALL: &str = "All";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Tomorrow,
    ThisWeek,
    ThisWeekend,
    NextWeek,
    ThisMonth,
    Custom,
}

impl DateRange {
    pub const PRESETS: [DateRange; 7] = [
        DateRange::All,
        DateRange::Today,
        DateRange::Tomorrow,
        DateRange::ThisWeek,
        DateRange::ThisWeekend,
        DateRange::NextWeek,
        DateRange::ThisMonth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::All => "Any date",
            DateRange::Today => "Today",
            DateRange::Tomorrow => "Tomorrow",
            DateRange::ThisWeek => "This week",
            DateRange::ThisWeekend => "This weekend",
            DateRange::NextWeek => "Next week",
            DateRange::ThisMonth => "This month",
            DateRange::Custom => "Custom",
        }
    }

    /// Inclusive start/end dates for a preset. Weeks start on Sunday.
    pub fn resolve(&self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let week_start = today - Days::new(u64::from(today.weekday().num_days_from_sunday()));
        let span = |start: NaiveDate, days: u64| (Some(start), Some(start + Days::new(days)));
        match self {
            DateRange::All | DateRange::Custom => (None, None),
            DateRange::Today => span(today, 0),
            DateRange::Tomorrow => span(today + Days::new(1), 0),
            DateRange::ThisWeek => span(week_start, 6),
            DateRange::ThisWeekend => span(week_start + Days::new(6), 1),
            DateRange::NextWeek => span(week_start + Days::new(7), 6),
            DateRange::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                let last = first
                    .checked_add_months(chrono::Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(today);
                (Some(first), Some(last))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilters {
    pub category: String,
    pub venue: String,
    pub date_range: DateRange,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search_text: String,
}

impl Default for EventFilters {
    fn default() -> Self {
        EventFilters {
            category: ALL.to_string(),
            venue: ALL.to_string(),
            date_range: DateRange::All,
            start_date: None,
            end_date: None,
            search_text: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    SetCategory(String),
    SetVenue(String),
    SetStartDate(Option<NaiveDate>),
    SetEndDate(Option<NaiveDate>),
    /// Preset plus the day it is resolved against.
    SetDateRange(DateRange, NaiveDate),
    SetSearchText(String),
    Reset,
}

/// True for an "All" or empty selection.
pub fn is_unset(selection: &str) -> bool {
    selection.is_empty() || selection == ALL
}

impl EventFilters {
    pub fn apply(&mut self, action: FilterAction) {
        match action {
            FilterAction::SetCategory(category) => self.category = category,
            FilterAction::SetVenue(venue) => self.venue = venue,
            FilterAction::SetStartDate(date) => {
                self.start_date = date;
                self.date_range = DateRange::Custom;
            }
            FilterAction::SetEndDate(date) => {
                self.end_date = date;
                self.date_range = DateRange::Custom;
            }
            FilterAction::SetDateRange(range, today) => {
                let (start, end) = range.resolve(today);
                self.date_range = range;
                self.start_date = start;
                self.end_date = end;
            }
            FilterAction::SetSearchText(text) => self.search_text = text,
            FilterAction::Reset => *self = EventFilters::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        *self != EventFilters::default()
    }

    pub fn matches(&self, event: &Event) -> bool {
        if !is_unset(&self.category) && event.category.as_deref() != Some(self.category.as_str()) {
            return false;
        }
        if !is_unset(&self.venue) && event.venue_name != self.venue {
            return false;
        }
        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(date) = event.event_date else {
                return false;
            };
            if self.start_date.is_some_and(|start| date < start) {
                return false;
            }
            if self.end_date.is_some_and(|end| date > end) {
                return false;
            }
        }
        let needle = self.search_text.trim().to_lowercase();
        if !needle.is_empty() {
            let hit = event.title.to_lowercase().contains(&needle)
                || event.venue_name.to_lowercase().contains(&needle)
                || event
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

fn with_all(values: BTreeSet<String>) -> Vec<String> {
    let mut out = vec![ALL.to_string()];
    out.extend(values.into_iter().filter(|v| v != ALL));
    out
}

/// "All" followed by every category present, sorted.
pub fn available_categories(events: &[Event]) -> Vec<String> {
    with_all(
        events
            .iter()
            .filter_map(|e| e.category.clone())
            .filter(|c| !c.is_empty())
            .collect(),
    )
}

/// "All" followed by every venue name present, sorted.
pub fn available_locations(events: &[Event]) -> Vec<String> {
    with_all(
        events
            .iter()
            .map(|e| e.venue_name.clone())
            .filter(|v| !v.is_empty())
            .collect(),
    )
}
