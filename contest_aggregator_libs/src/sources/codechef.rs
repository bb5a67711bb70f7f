use crate::{
    contest::{Contest, Platform},
    duration::format_span,
    sources::{build_client, ContestSource, Result, SourceConfig, SourceError},
};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

// CodeChefの表示用日時フォーマット(IST)
const DISPLAY_DATE_FORMAT: &str = "%d %b %Y  %H:%M:%S";
const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

#[derive(Debug, Deserialize)]
pub struct CodeChefResponse {
    pub status: Option<String>,
    pub future_contests: Option<Vec<CodeChefContest>>,
}

#[derive(Debug, Deserialize)]
pub struct CodeChefContest {
    pub contest_code: String,
    pub contest_name: String,
    pub contest_start_date: String,
    pub contest_end_date: String,
    pub contest_start_date_iso: Option<String>,
    pub contest_end_date_iso: Option<String>,
}

pub struct CodeChefSource {
    url: Url,
    client: Client,
}

impl CodeChefSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            url: config.codechef_url.clone(),
            client: build_client(config.timeout)?,
        })
    }

    /// 全コンテスト一覧APIから開催予定のコンテストを取得するメソッド
    ///
    /// 開催予定か否かはCodeChef側で分類済みなので、ここではフィルタリングしない。
    pub async fn fetch_future_contests(&self) -> Result<Vec<CodeChefContest>> {
        let res = self.client.get(self.url.clone()).send().await?;
        let body = res.error_for_status()?.bytes().await?;
        let response: CodeChefResponse = serde_json::from_slice(&body)?;

        response.future_contests.ok_or_else(|| {
            SourceError::UnexpectedResponse(format!(
                "future_contests field is missing (status [{}])",
                response.status.unwrap_or_default()
            ))
        })
    }
}

/// CodeChefの日時文字列を解析する関数
///
/// ISO-8601形式があればそれを優先し、なければ表示用の文字列をISTとして解釈する。
pub fn parse_contest_date(iso: Option<&str>, display: &str) -> Result<DateTime<Utc>> {
    if let Some(iso) = iso {
        return DateTime::parse_from_rfc3339(iso)
            .map(|datetime| datetime.with_timezone(&Utc))
            .map_err(|e| SourceError::InvalidDate(format!("{} ({})", iso, e)));
    }

    let naive = NaiveDateTime::parse_from_str(display, DISPLAY_DATE_FORMAT)
        .map_err(|e| SourceError::InvalidDate(format!("{} ({})", display, e)))?;
    let ist = FixedOffset::east_opt(IST_OFFSET_SECONDS)
        .ok_or(SourceError::InvalidDate(String::from("invalid IST offset")))?;

    ist.from_local_datetime(&naive)
        .single()
        .map(|datetime| datetime.with_timezone(&Utc))
        .ok_or_else(|| SourceError::InvalidDate(display.to_string()))
}

pub fn to_contests(contests: Vec<CodeChefContest>) -> Result<Vec<Contest>> {
    contests
        .into_iter()
        .map(|contest| {
            let start = parse_contest_date(
                contest.contest_start_date_iso.as_deref(),
                &contest.contest_start_date,
            )?;
            let end = parse_contest_date(
                contest.contest_end_date_iso.as_deref(),
                &contest.contest_end_date,
            )?;
            let url = format!("https://www.codechef.com/{}", contest.contest_code);

            Contest::new(
                Platform::CodeChef,
                contest.contest_name,
                start.timestamp(),
                format_span(&start, &end),
                url,
            )?
            .with_code(contest.contest_code)
            .with_end_time(end.timestamp())
        })
        .collect()
}

#[async_trait]
impl ContestSource for CodeChefSource {
    fn platform(&self) -> Platform {
        Platform::CodeChef
    }

    async fn fetch(&self) -> Result<Vec<Contest>> {
        let contests = self.fetch_future_contests().await?;
        to_contests(contests)
    }
}
