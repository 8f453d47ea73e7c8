use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Time};

pub type Id = i64;

/// Calendar day as the API expects it in `?date=` and `activate_at`.
pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Wall clock time as sent to the API, minutes precision.
pub const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]");

const LOOSE_TIME: &[FormatItem<'static>] = format_description!("[hour padding:none]:[minute]");
const LOOSE_TIME_SECONDS: &[FormatItem<'static>] =
    format_description!("[hour padding:none]:[minute]:[second]");

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Profile {
    pub id: Id,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl From<Profile> for User {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventType {
    pub id: Id,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Event {
    pub id: Id,
    pub name: String,
    pub completed: bool,
    #[serde(rename = "type", default)]
    pub kind: Option<EventType>,
    pub user: User,
    #[serde(rename = "activateDate", default)]
    pub activate_date: Option<String>,
    #[serde(rename = "activateTime", default)]
    pub activate_time: Option<String>,
}

impl Event {
    /// The activation day, when the server sent one we can read.
    pub fn date(&self) -> Option<Date> {
        self.activate_date
            .as_deref()
            .and_then(|x| Date::parse(x, DATE_FORMAT).ok())
    }

    /// The activation time. Seconds, when the server sends them, are kept.
    pub fn time(&self) -> Option<Time> {
        self.activate_time.as_deref().and_then(parse_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Goal {
    pub id: Id,
    pub name: String,
    pub completed: bool,
    pub user: User,
}

/// Build the single `activate_at` value sent to the API.
///
/// Date and time together become "YYYY-MM-DD HH:MM", a date alone stays a date.
/// A time without a date has nothing to anchor to and is dropped.
pub fn compose_activation(date: Option<Date>, time: Option<Time>) -> Option<String> {
    let date = format_date(date?);
    match time {
        Some(time) => Some(format!("{date} {}", format_time(time))),
        None => Some(date),
    }
}

/// Read "H:MM", "HH:MM" or "HH:MM:SS", with or without fractional seconds.
pub fn parse_time(value: &str) -> Option<Time> {
    let value = value.trim();
    let value = value.split_once('.').map_or(value, |(x, _)| x);
    Time::parse(value, LOOSE_TIME)
        .or_else(|_| Time::parse(value, LOOSE_TIME_SECONDS))
        .ok()
}

// Formatting into a String only fails on io errors, the fallbacks are never hit.

/// "YYYY-MM-DD" per [`DATE_FORMAT`].
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// "HH:MM" per [`TIME_FORMAT`].
pub fn format_time(time: Time) -> String {
    time.format(TIME_FORMAT).unwrap_or_else(|_| time.to_string())
}
