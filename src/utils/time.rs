use time::OffsetDateTime;
use time::macros::format_description;

/// Format a timestamp the way the transcript shows it: two-digit hour and
/// minute.
pub fn format_time(datetime: OffsetDateTime) -> String {
    let format = format_description!("[hour]:[minute]");
    datetime
        .format(&format)
        .unwrap_or_else(|_| format!("{:02}:{:02}", datetime.hour(), datetime.minute()))
}

/// The current local time formatted for display.
///
/// Falls back to UTC when the local offset cannot be determined.
pub fn display_time() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_time(now)
}

/// Milliseconds since the Unix epoch.
pub fn unix_millis() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn two_digit_hour_and_minute() {
        assert_eq!(format_time(datetime!(2024-03-01 09:05 UTC)), "09:05");
        assert_eq!(format_time(datetime!(2024-03-01 23:59:59 UTC)), "23:59");
    }

    #[test]
    fn display_time_shape() {
        let shown = display_time();
        assert_eq!(shown.len(), 5);
        assert_eq!(&shown[2..3], ":");
    }
}
