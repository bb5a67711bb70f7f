use crate::{
    contest::{Contest, Platform},
    duration::format_duration,
    sources::{build_client, ContestSource, Result, SourceConfig, SourceError},
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

const UPCOMING_PHASE: &str = "BEFORE";

#[derive(Debug, Deserialize)]
pub struct CodeforcesEnvelope {
    pub status: String,
    pub comment: Option<String>,
    pub result: Option<Vec<CodeforcesContest>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesContest {
    pub id: i64,
    pub name: String,
    pub phase: String,
    pub duration_seconds: i64,
    pub start_time_seconds: Option<i64>,
}

pub struct CodeforcesSource {
    url: Url,
    client: Client,
}

impl CodeforcesSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            url: config.codeforces_url.clone(),
            client: build_client(config.timeout)?,
        })
    }

    /// contest.list APIのレスポンスを取得するメソッド
    ///
    /// HTTPステータスが成功でも`status`が`OK`でなければエラーとする。
    pub async fn fetch_contest_list(&self) -> Result<Vec<CodeforcesContest>> {
        let res = self.client.get(self.url.clone()).send().await?;
        let status = res.status();
        if status.is_client_error() || status.is_server_error() {
            let cause = res
                .json::<CodeforcesEnvelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.comment)
                .unwrap_or_default();
            return Err(SourceError::UnexpectedResponse(format!(
                "unexpected error [{}] cause [{}]",
                status, cause
            )));
        }

        let body = res.bytes().await?;
        let envelope: CodeforcesEnvelope = serde_json::from_slice(&body)?;
        unwrap_envelope(envelope)
    }
}

fn unwrap_envelope(envelope: CodeforcesEnvelope) -> Result<Vec<CodeforcesContest>> {
    if envelope.status != "OK" {
        return Err(SourceError::UnexpectedResponse(format!(
            "status [{}] cause [{}]",
            envelope.status,
            envelope.comment.unwrap_or_default()
        )));
    }

    envelope
        .result
        .ok_or(SourceError::UnexpectedResponse(String::from(
            "result field is missing",
        )))
}

/// 開始前のコンテストだけを正規化したモデルに変換する関数
pub fn to_upcoming_contests(contests: Vec<CodeforcesContest>) -> Result<Vec<Contest>> {
    let mut upcoming = Vec::new();

    for contest in contests
        .into_iter()
        .filter(|contest| contest.phase == UPCOMING_PHASE)
    {
        let start_time_seconds = match contest.start_time_seconds {
            Some(start) => start,
            None => {
                tracing::warn!("contest {} has no start time, skipped.", contest.id);
                continue;
            }
        };

        upcoming.push(
            Contest::new(
                Platform::Codeforces,
                contest.name,
                start_time_seconds,
                format_duration(contest.duration_seconds),
                format!("https://codeforces.com/contest/{}", contest.id),
            )?
            .with_duration_seconds(contest.duration_seconds),
        );
    }

    Ok(upcoming)
}

#[async_trait]
impl ContestSource for CodeforcesSource {
    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    async fn fetch(&self) -> Result<Vec<Contest>> {
        let contests = self.fetch_contest_list().await?;
        to_upcoming_contests(contests)
    }
}
