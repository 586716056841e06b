use chrono::{DateTime, Days, TimeDelta, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

pub const MAX_TITLE_LEN: usize = 100;

/// Smallest representable step of the stored timestamps (100ns).
pub const TICK: TimeDelta = TimeDelta::nanoseconds(100);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub expiry_date: DateTime<Utc>,
    pub percent_complete: i32,
}

impl Todo {
    pub fn new(
        title: String,
        description: String,
        expiry_date: DateTime<Utc>,
        percent_complete: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            expiry_date,
            percent_complete,
        }
    }

    pub fn is_done(&self) -> bool {
        self.percent_complete == 100
    }
}

impl Serialize for Todo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Todo", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("expiryDate", &self.expiry_date)?;
        state.serialize_field("percentComplete", &self.percent_complete)?;
        state.serialize_field("isDone", &self.is_done())?;
        state.end()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub expiry_date: DateTime<Utc>,
    pub percent_complete: i32,
}

/// Full replacement payload; every field overwrites the stored value.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoChanges {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub expiry_date: DateTime<Utc>,
    pub percent_complete: i32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IncomingWindow {
    Today,
    NextDay,
    NextWeek,
    NextMonth,
}

impl IncomingWindow {
    pub const ALL: [IncomingWindow; 4] = [
        IncomingWindow::Today,
        IncomingWindow::NextDay,
        IncomingWindow::NextWeek,
        IncomingWindow::NextMonth,
    ];

    pub fn days(&self) -> u32 {
        match self {
            Self::Today => 0,
            Self::NextDay => 1,
            Self::NextWeek => 7,
            Self::NextMonth => 30,
        }
    }

    pub fn from_days(days: i32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|window| i64::from(window.days()) == i64::from(days))
    }

    /// Inclusive `[now, end]` range, where `end` is the last tick of the
    /// `days`-th day after today (UTC).
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let start_of_today = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc())
            .unwrap_or(now);
        let end = start_of_today
            .checked_add_days(Days::new(u64::from(self.days()) + 1))
            .map(|next| next - TICK)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        (now, end)
    }

    pub fn contains(&self, now: DateTime<Utc>, expiry_date: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds(now);
        expiry_date >= start && expiry_date <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().expect("valid date")
    }

    #[test]
    fn is_done_tracks_percent_complete() {
        let mut todo = Todo::new("A".to_string(), String::new(), Utc::now(), 99);
        assert!(!todo.is_done());
        todo.percent_complete = 100;
        assert!(todo.is_done());
        todo.percent_complete = 0;
        assert!(!todo.is_done());
    }

    #[test]
    fn new_todos_get_distinct_ids() {
        let now = Utc::now();
        let a = Todo::new("A".to_string(), String::new(), now, 0);
        let b = Todo::new("A".to_string(), String::new(), now, 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn from_days_accepts_only_known_offsets() {
        assert_eq!(IncomingWindow::from_days(0), Some(IncomingWindow::Today));
        assert_eq!(IncomingWindow::from_days(1), Some(IncomingWindow::NextDay));
        assert_eq!(IncomingWindow::from_days(7), Some(IncomingWindow::NextWeek));
        assert_eq!(IncomingWindow::from_days(30), Some(IncomingWindow::NextMonth));
        for days in [-1, 2, 3, 6, 8, 31, 365, i32::MIN, i32::MAX] {
            assert_eq!(IncomingWindow::from_days(days), None, "days {days}");
        }
    }

    #[test]
    fn next_day_window_ends_at_last_tick_of_tomorrow() {
        let now = at(2024, 5, 10, 15, 30);
        let (start, end) = IncomingWindow::NextDay.bounds(now);
        assert_eq!(start, now);
        assert_eq!(end, at(2024, 5, 12, 0, 0) - TICK);
    }

    #[test]
    fn today_window_ends_at_midnight() {
        let now = at(2024, 12, 31, 23, 0);
        let (_, end) = IncomingWindow::Today.bounds(now);
        assert_eq!(end, at(2025, 1, 1, 0, 0) - TICK);
    }

    #[test]
    fn contains_excludes_past_and_beyond_window() {
        let now = at(2024, 5, 10, 12, 0);
        let window = IncomingWindow::NextWeek;
        assert!(window.contains(now, now));
        assert!(window.contains(now, at(2024, 5, 17, 23, 59)));
        assert!(!window.contains(now, at(2024, 5, 18, 0, 0)));
        assert!(!window.contains(now, at(2024, 5, 10, 11, 59)));
    }

    #[test]
    fn todo_serializes_with_derived_flag() {
        let mut todo = Todo::new("A".to_string(), String::new(), at(2024, 1, 1, 0, 0), 100);
        todo.id = Uuid::nil();
        let json = serde_json::to_value(&todo).expect("serialize");
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["percentComplete"], 100);
        assert_eq!(json["isDone"], true);
        assert!(json.get("expiryDate").is_some());
    }

    #[test]
    fn input_defaults_description_to_empty() {
        let input: TodoInput = serde_json::from_str(
            r#"{"title":"A","expiryDate":"2030-01-01T00:00:00Z","percentComplete":5}"#,
        )
        .expect("parse");
        assert_eq!(input.description, "");
        assert_eq!(input.percent_complete, 5);
    }
}
