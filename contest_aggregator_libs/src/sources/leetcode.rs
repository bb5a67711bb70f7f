use crate::{
    contest::{Contest, Platform},
    duration::format_duration,
    sources::{build_client, ContestSource, Result, SourceConfig, SourceError},
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header::REFERER, Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};

const ALL_CONTESTS_QUERY: &str = "{ allContests { title titleSlug startTime duration } }";

#[derive(Debug, Deserialize)]
pub struct LeetCodeResponse {
    pub data: Option<LeetCodeData>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeData {
    pub all_contests: Option<Vec<LeetCodeContest>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeContest {
    pub title: String,
    pub title_slug: String,
    pub start_time: i64,
    pub duration: i64,
}

pub struct LeetCodeSource {
    url: Url,
    client: Client,
}

impl LeetCodeSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            url: config.leetcode_url.clone(),
            client: build_client(config.timeout)?,
        })
    }

    /// GraphQL APIから全コンテストの一覧を取得するメソッド
    pub async fn fetch_all_contests(&self) -> Result<Vec<LeetCodeContest>> {
        let res = self
            .client
            .post(self.url.clone())
            .header(REFERER, "https://leetcode.com")
            .json(&json!({ "query": ALL_CONTESTS_QUERY }))
            .send()
            .await?;
        let body = res.error_for_status()?.bytes().await?;
        let response: LeetCodeResponse = serde_json::from_slice(&body)?;

        if !response.errors.is_empty() {
            return Err(SourceError::UnexpectedResponse(format!(
                "graphql errors {}",
                Value::Array(response.errors)
            )));
        }

        response
            .data
            .and_then(|data| data.all_contests)
            .ok_or(SourceError::UnexpectedResponse(String::from(
                "data.allContests field is missing",
            )))
    }
}

/// `now_millis`より後に開始するコンテストだけを正規化したモデルに変換する関数
pub fn select_upcoming(contests: Vec<LeetCodeContest>, now_millis: i64) -> Result<Vec<Contest>> {
    contests
        .into_iter()
        .filter(|contest| contest.start_time.saturating_mul(1000) > now_millis)
        .map(|contest| {
            Ok(Contest::new(
                Platform::LeetCode,
                contest.title,
                contest.start_time,
                format_duration(contest.duration),
                format!("https://leetcode.com/contest/{}", contest.title_slug),
            )?
            .with_duration_seconds(contest.duration))
        })
        .collect()
}

#[async_trait]
impl ContestSource for LeetCodeSource {
    fn platform(&self) -> Platform {
        Platform::LeetCode
    }

    async fn fetch(&self) -> Result<Vec<Contest>> {
        let now_millis = Utc::now().timestamp_millis();
        let contests = self.fetch_all_contests().await?;
        select_upcoming(contests, now_millis)
    }
}
