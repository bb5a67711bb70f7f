pub mod codechef;
pub mod codeforces;
pub mod leetcode;

pub use codechef::CodeChefSource;
pub use codeforces::CodeforcesSource;
pub use leetcode::LeetCodeSource;

use crate::contest::{Contest, Platform};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

pub const CODEFORCES_API_URL: &str = "https://codeforces.com/api/contest.list";
pub const LEETCODE_GRAPHQL_URL: &str = "https://leetcode.com/graphql";
pub const CODECHEF_API_URL: &str = "https://www.codechef.com/api/list/contests/all";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to request to contest provider: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to deserialize JSON data: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("invalid provider url given: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unexpected response from provider: {0}")]
    UnexpectedResponse(String),
    #[error("failed to parse contest date: {0}")]
    InvalidDate(String),
    #[error("timestamp {0} is out of range")]
    InvalidTimestamp(i64),
}

/// 各プラットフォームからコンテスト情報を取得するためのトレイト
#[async_trait]
pub trait ContestSource: Send + Sync {
    fn platform(&self) -> Platform;

    /// 開始前のコンテストを取得するメソッド
    ///
    /// 取得や解析に失敗した場合はエラーを返す。
    async fn fetch(&self) -> Result<Vec<Contest>>;

    /// 開始前のコンテストを取得するメソッド
    ///
    /// 失敗した場合はエラーをログに出力し、空のリストを返す。
    async fn fetch_upcoming(&self) -> Vec<Contest> {
        let platform = self.platform();
        tracing::info!("Start to fetch upcoming contests from {}", platform);

        match self.fetch().await {
            Ok(contests) => {
                tracing::info!(
                    "{} upcoming contests successfully retrieved from {}.",
                    contests.len(),
                    platform
                );
                contests
            }
            Err(e) => {
                tracing::error!("failed to fetch contests from {}: {}", platform, e);
                Vec::new()
            }
        }
    }
}

/// コンテスト情報の取得先とタイムアウトの設定
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub codeforces_url: Url,
    pub leetcode_url: Url,
    pub codechef_url: Url,
    pub timeout: Duration,
}

impl SourceConfig {
    pub fn new(
        codeforces_url: &str,
        leetcode_url: &str,
        codechef_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            codeforces_url: Url::parse(codeforces_url)?,
            leetcode_url: Url::parse(leetcode_url)?,
            codechef_url: Url::parse(codechef_url)?,
            timeout,
        })
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new(
            CODEFORCES_API_URL,
            LEETCODE_GRAPHQL_URL,
            CODECHEF_API_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
        .expect("default provider urls must be valid")
    }
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder().gzip(true).timeout(timeout).build()?;
    Ok(client)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_points_to_providers() {
        let config = SourceConfig::default();

        assert_eq!(config.codeforces_url.as_str(), CODEFORCES_API_URL);
        assert_eq!(config.leetcode_url.as_str(), LEETCODE_GRAPHQL_URL);
        assert_eq!(config.codechef_url.as_str(), CODECHEF_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = SourceConfig::new(
            "not a url",
            LEETCODE_GRAPHQL_URL,
            CODECHEF_API_URL,
            Duration::from_secs(1),
        );

        assert!(matches!(result, Err(SourceError::InvalidUrl(_))));
    }
}
