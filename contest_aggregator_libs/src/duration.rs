use chrono::{DateTime, Utc};

/// 秒数を`"<H> hours <M> minutes"`形式の文字列に変換する関数
///
/// 1分に満たない端数の秒は切り捨てる。ゼロ埋めや丸めは行わない。
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{} hours {} minutes", seconds / 3600, (seconds % 3600) / 60)
}

/// 開始時刻と終了時刻の差分を`format_duration`と同じ形式の文字列に変換する関数
pub fn format_span(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    format_duration((*end - *start).num_seconds())
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5400), "1 hours 30 minutes");
        assert_eq!(format_duration(7200), "2 hours 0 minutes");
        assert_eq!(format_duration(0), "0 hours 0 minutes");
    }

    #[test]
    fn remaining_seconds_are_truncated() {
        assert_eq!(format_duration(59), "0 hours 0 minutes");
        assert_eq!(format_duration(3719), "1 hours 1 minutes");
    }

    #[test]
    fn matches_integer_division_formula() {
        for s in (0..200_000).step_by(37) {
            let expected = format!("{} hours {} minutes", s / 3600, (s % 3600) / 60);
            assert_eq!(format_duration(s), expected);
        }
    }

    #[test]
    fn test_format_span() {
        let start = Utc.with_ymd_and_hms(2024, 1, 17, 14, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 17, 16, 30, 0).unwrap();

        assert_eq!(format_span(&start, &end), "2 hours 0 minutes");
        assert_eq!(format_span(&start, &end), format_duration(7200));
    }

    #[test]
    fn reversed_span_is_clamped() {
        let start = Utc.with_ymd_and_hms(2024, 1, 17, 16, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 17, 14, 30, 0).unwrap();

        assert_eq!(format_span(&start, &end), "0 hours 0 minutes");
    }
}
