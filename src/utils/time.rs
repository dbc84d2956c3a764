use chrono::{DateTime, Datelike, FixedOffset, Locale, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobDate {
    pub year: i32,
    pub month: String,
    /// Sunday is 1, Saturday is 7.
    pub day: u32,
}

pub fn blob_date(instant: DateTime<Utc>, offset: FixedOffset, locale: Locale) -> BlobDate {
    let local = instant.with_timezone(&offset);
    BlobDate {
        year: local.year(),
        month: local.format_localized("%B", locale).to_string(),
        day: local.weekday().number_from_sunday(),
    }
}

pub fn parse_locale(name: &str) -> anyhow::Result<Locale> {
    Locale::try_from(name).map_err(|_| anyhow::anyhow!("Unknown locale: {}", name))
}

pub fn offset_from_minutes(minutes: i32) -> anyhow::Result<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| anyhow::anyhow!("UTC offset out of range: {} minutes", minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn weekday_counts_from_sunday() {
        let utc = FixedOffset::east_opt(0).unwrap();
        // 2024-03-03 was a Sunday.
        let sunday = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();

        assert_eq!(blob_date(sunday, utc, Locale::en_US).day, 1);
        assert_eq!(blob_date(saturday, utc, Locale::en_US).day, 7);
    }

    #[test]
    fn month_name_follows_locale() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 3, 12, 12, 0, 0).unwrap();

        assert_eq!(blob_date(instant, utc, Locale::en_US).month, "March");
        assert_eq!(blob_date(instant, utc, Locale::pt_BR).month, "março");
    }

    #[test]
    fn offset_can_move_the_calendar_day() {
        let brasilia = offset_from_minutes(-180).unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 1, 30, 0).unwrap();

        let date = blob_date(instant, brasilia, Locale::en_US);
        assert_eq!(date.year, 2023);
        assert_eq!(date.month, "December");
        // 2023-12-31 was a Sunday.
        assert_eq!(date.day, 1);
    }

    #[test]
    fn parses_known_locales_only() {
        assert!(parse_locale("pt_BR").is_ok());
        assert!(parse_locale("xx_YY").is_err());
    }

    #[test]
    fn out_of_range_offsets_are_errors() {
        assert!(offset_from_minutes(24 * 60).is_err());
        assert!(offset_from_minutes(40_000_000).is_err());
        assert!(offset_from_minutes(i32::MIN).is_err());
        assert_eq!(offset_from_minutes(-180).unwrap().local_minus_utc(), -10_800);
    }
}
