use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Source of "now" for list times, relative times and the seed dataset
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The instant the demo mailbox is frozen at: 2030-03-14 15:14 UTC
pub fn frozen_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, 14, 15, 14, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn clock_time<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    let (is_pm, hour) = value.hour12();
    format!(
        "{}:{:02} {}",
        hour,
        value.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

fn month_day<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    format!("{} {}", MONTHS[value.month0() as usize], value.day())
}

/// Time column of the thread list: "9:15 AM" for today's emails when the
/// hour display is extended, "Mar 13" otherwise.
pub fn format_list_time<Tz: TimeZone>(
    timestamp: &DateTime<Tz>,
    now: &DateTime<Tz>,
    extend_hour_display: bool,
) -> String {
    if extend_hour_display && timestamp.date_naive() == now.date_naive() {
        clock_time(timestamp)
    } else {
        month_day(timestamp)
    }
}

/// "N minutes ago", "N hour(s) ago", "1 day ago" or "N days ago".
///
/// Minutes are never singularized ("1 minutes ago") and a timestamp after
/// `now` yields a negative minute count. Both match the web client's
/// reading pane, which this text is compared against.
pub fn relative_time<Tz: TimeZone>(timestamp: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let diff_ms = now.timestamp_millis() - timestamp.timestamp_millis();
    let hours = diff_ms.div_euclid(60 * 60 * 1000);
    let days = hours.div_euclid(24);

    if hours < 1 {
        let minutes = diff_ms.div_euclid(60 * 1000);
        format!("{} minutes ago", minutes)
    } else if hours < 24 {
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else if days == 1 {
        "1 day ago".to_string()
    } else {
        format!("{} days ago", days)
    }
}

/// Reading pane header date, e.g. "Wed, Mar 13, 2:30 PM (1 day ago)"
pub fn format_email_date<Tz: TimeZone>(timestamp: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    format!(
        "{}, {}, {} ({})",
        WEEKDAYS[timestamp.weekday().num_days_from_monday() as usize],
        month_day(timestamp),
        clock_time(timestamp),
        relative_time(timestamp, now)
    )
}
