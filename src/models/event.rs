//! Event model and search filter vocabulary

use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, Months, NaiveDateTime, NaiveTime, TimeZone,
    Utc, Weekday,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::EventDeskError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Username of the staff member who created the event
    pub organizer: String,
    pub max_participants: i64,
    pub current_participants: i64,
}

impl Event {
    /// Whether the event has reached its capacity limit
    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub organizer: String,
    pub max_participants: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub max_participants: Option<i64>,
}

/// Read-only event view handed to calendar-export collaborators
#[derive(Debug, Clone, Serialize)]
pub struct EventSnapshot {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<&Event> for EventSnapshot {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
        }
    }
}

/// Time-window filter over `start_time`, evaluated against the local wall
/// clock at query time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    #[default]
    None,
    Today,
    ThisWeek,
    ThisMonth,
}

impl TimeFilter {
    /// Compute the half-open UTC window `[start, end)` for this filter.
    ///
    /// Windows are derived from local calendar boundaries: the current day,
    /// the current ISO week (starting Monday), or the current month.
    pub fn window(&self, now: DateTime<Local>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let today = now.date_naive();
        match self {
            TimeFilter::None => None,
            TimeFilter::Today => {
                let start = today.and_time(NaiveTime::MIN);
                Some((local_to_utc(start), local_to_utc(start + Duration::days(1))))
            }
            TimeFilter::ThisWeek => {
                let start = today
                    .week(Weekday::Mon)
                    .first_day()
                    .and_time(NaiveTime::MIN);
                Some((local_to_utc(start), local_to_utc(start + Duration::days(7))))
            }
            TimeFilter::ThisMonth => {
                let first = today.with_day0(0).unwrap_or(today);
                let next = first + Months::new(1);
                Some((
                    local_to_utc(first.and_time(NaiveTime::MIN)),
                    local_to_utc(next.and_time(NaiveTime::MIN)),
                ))
            }
        }
    }
}

impl FromStr for TimeFilter {
    type Err = EventDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(TimeFilter::None),
            "today" => Ok(TimeFilter::Today),
            "week" | "this_week" => Ok(TimeFilter::ThisWeek),
            "month" | "this_month" => Ok(TimeFilter::ThisMonth),
            other => Err(EventDeskError::InvalidInput(format!(
                "unknown time filter: {other}"
            ))),
        }
    }
}

/// Status filter over the event's time span and capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    NotStarted,
    Ongoing,
    Ended,
    Full,
}

impl FromStr for StatusFilter {
    type Err = EventDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(StatusFilter::All),
            "not_started" => Ok(StatusFilter::NotStarted),
            "ongoing" => Ok(StatusFilter::Ongoing),
            "ended" => Ok(StatusFilter::Ended),
            "full" => Ok(StatusFilter::Full),
            other => Err(EventDeskError::InvalidInput(format!(
                "unknown status filter: {other}"
            ))),
        }
    }
}

/// Resolve a local calendar timestamp to UTC.
///
/// Ambiguous timestamps (clock rolled back) take the earlier offset; a
/// timestamp inside a DST gap is treated as if it were already UTC.
fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    match naive.and_local_timezone(Local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Local> {
        Local::now()
    }

    #[test]
    fn test_no_filter_has_no_window() {
        assert_eq!(TimeFilter::None.window(fixed_now()), None);
    }

    #[test]
    fn test_today_window_contains_now() {
        let now = fixed_now();
        let (start, end) = TimeFilter::Today.window(now).unwrap();
        let now_utc = now.with_timezone(&Utc);
        assert!(start <= now_utc && now_utc < end);
        assert_eq!(start.with_timezone(&Local).date_naive(), now.date_naive());
    }

    #[test]
    fn test_week_window_starts_monday() {
        let now = fixed_now();
        let (start, end) = TimeFilter::ThisWeek.window(now).unwrap();
        let now_utc = now.with_timezone(&Utc);
        assert!(start <= now_utc && now_utc < end);
        assert_eq!(start.with_timezone(&Local).weekday(), Weekday::Mon);
    }

    #[test]
    fn test_month_window_spans_calendar_month() {
        let now = fixed_now();
        let (start, end) = TimeFilter::ThisMonth.window(now).unwrap();
        let now_utc = now.with_timezone(&Utc);
        assert!(start <= now_utc && now_utc < end);
        assert_eq!(start.with_timezone(&Local).day(), 1);
        assert_eq!(end.with_timezone(&Local).day(), 1);
    }

    #[test]
    fn test_time_filter_parsing() {
        assert_eq!("".parse::<TimeFilter>().unwrap(), TimeFilter::None);
        assert_eq!("today".parse::<TimeFilter>().unwrap(), TimeFilter::Today);
        assert_eq!("week".parse::<TimeFilter>().unwrap(), TimeFilter::ThisWeek);
        assert_eq!("month".parse::<TimeFilter>().unwrap(), TimeFilter::ThisMonth);
        assert!("yesterday".parse::<TimeFilter>().is_err());
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("full".parse::<StatusFilter>().unwrap(), StatusFilter::Full);
        assert_eq!(
            "not_started".parse::<StatusFilter>().unwrap(),
            StatusFilter::NotStarted
        );
        assert!("cancelled".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_event_snapshot_carries_display_fields() {
        let event = Event {
            id: 7,
            title: "Rust meetup".to_string(),
            description: Some("Monthly meetup".to_string()),
            location: Some("Library".to_string()),
            start_time: Utc::now(),
            end_time: Utc::now() + Duration::hours(2),
            organizer: "staff1".to_string(),
            max_participants: 30,
            current_participants: 5,
        };

        let snapshot = EventSnapshot::from(&event);
        assert_eq!(snapshot.title, event.title);
        assert_eq!(snapshot.start_time, event.start_time);
        assert_eq!(snapshot.location.as_deref(), Some("Library"));
    }

    #[test]
    fn test_is_full() {
        let mut event = Event {
            id: 1,
            title: "t".to_string(),
            description: None,
            location: None,
            start_time: Utc::now(),
            end_time: Utc::now(),
            organizer: "o".to_string(),
            max_participants: 2,
            current_participants: 1,
        };
        assert!(!event.is_full());
        event.current_participants = 2;
        assert!(event.is_full());
    }
}
