use crate::sources::SourceError;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;
use serde_with::skip_serializing_none;
use std::fmt;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Platform {
    Codeforces,
    LeetCode,
    CodeChef,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Codeforces, Platform::LeetCode, Platform::CodeChef];

    /// ルーティングに使用するプラットフォームの識別子
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::Codeforces => "codeforces",
            Platform::LeetCode => "leetcode",
            Platform::CodeChef => "codechef",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Platform::Codeforces => write!(f, "Codeforces"),
            Platform::LeetCode => write!(f, "LeetCode"),
            Platform::CodeChef => write!(f, "CodeChef"),
        }
    }
}

/// 各プラットフォームのコンテスト情報を正規化したモデル
///
/// `start_time`は常に`start_time_unix`から生成される。
#[skip_serializing_none]
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    platform: Platform,
    name: String,
    code: Option<String>,
    start_time: String,
    end_time: Option<String>,
    start_time_unix: i64,
    duration_seconds: Option<i64>,
    duration: String,
    url: String,
}

impl Contest {
    pub fn new(
        platform: Platform,
        name: impl Into<String>,
        start_time_unix: i64,
        duration: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            platform,
            name: name.into(),
            code: None,
            start_time: to_iso_string(start_time_unix)?,
            end_time: None,
            start_time_unix,
            duration_seconds: None,
            duration: duration.into(),
            url: url.into(),
        })
    }

    pub fn with_duration_seconds(mut self, duration_seconds: i64) -> Self {
        self.duration_seconds = Some(duration_seconds);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_end_time(mut self, end_time_unix: i64) -> Result<Self, SourceError> {
        self.end_time = Some(to_iso_string(end_time_unix)?);
        Ok(self)
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> Option<&str> {
        self.end_time.as_deref()
    }

    pub fn start_time_unix(&self) -> i64 {
        self.start_time_unix
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.duration_seconds
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// UNIX時間(秒)をミリ秒精度のISO-8601文字列(UTC)に変換する
fn to_iso_string(unix: i64) -> Result<String, SourceError> {
    let datetime: DateTime<Utc> = Utc
        .timestamp_opt(unix, 0)
        .single()
        .ok_or(SourceError::InvalidTimestamp(unix))?;

    Ok(datetime.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn start_time_is_derived_from_unix_time() {
        let contest = Contest::new(
            Platform::Codeforces,
            "Codeforces Round 900",
            1704110400,
            "2 hours 0 minutes",
            "https://codeforces.com/contest/1900",
        )
        .unwrap();

        assert_eq!(contest.start_time(), "2024-01-01T12:00:00.000Z");
        let parsed = DateTime::parse_from_rfc3339(contest.start_time()).unwrap();
        assert_eq!(parsed.timestamp(), contest.start_time_unix());
    }

    #[test]
    fn optional_fields_are_omitted() {
        let contest = Contest::new(
            Platform::LeetCode,
            "Weekly Contest 380",
            1705199400,
            "1 hours 30 minutes",
            "https://leetcode.com/contest/weekly-contest-380",
        )
        .unwrap()
        .with_duration_seconds(5400);

        let value = serde_json::to_value(&contest).unwrap();
        let expected = serde_json::json!({
            "platform": "LeetCode",
            "name": "Weekly Contest 380",
            "startTime": "2024-01-14T02:30:00.000Z",
            "startTimeUnix": 1705199400,
            "durationSeconds": 5400,
            "duration": "1 hours 30 minutes",
            "url": "https://leetcode.com/contest/weekly-contest-380"
        });

        assert_eq!(value, expected);
    }

    #[test]
    fn codechef_specific_fields_are_serialized() {
        let contest = Contest::new(
            Platform::CodeChef,
            "Starters 117",
            1705501800,
            "2 hours 0 minutes",
            "https://www.codechef.com/START117",
        )
        .unwrap()
        .with_code("START117")
        .with_end_time(1705509000)
        .unwrap();

        let value = serde_json::to_value(&contest).unwrap();

        assert_eq!(value["code"], "START117");
        assert_eq!(value["endTime"], "2024-01-17T16:30:00.000Z");
        assert!(value.get("durationSeconds").is_none());
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        let result = Contest::new(Platform::CodeChef, "broken", i64::MAX, "", "");

        assert!(matches!(result, Err(SourceError::InvalidTimestamp(i64::MAX))));
    }

    #[test]
    fn platform_slug_and_display() {
        let slugs: Vec<&str> = Platform::ALL.iter().map(|p| p.slug()).collect();
        assert_eq!(slugs, vec!["codeforces", "leetcode", "codechef"]);
        assert_eq!(Platform::LeetCode.to_string(), "LeetCode");
    }
}
