pub mod fetch;
pub mod server;

use anyhow::{Context, Result};
use clap::ValueEnum;
use contest_aggregator_libs::{
    sources::{CODECHEF_API_URL, CODEFORCES_API_URL, DEFAULT_TIMEOUT_SECS, LEETCODE_GRAPHQL_URL},
    Platform, SourceConfig,
};
use std::{env, fmt, time::Duration};

#[derive(Debug, ValueEnum, Clone, Copy)]
pub enum TargetPlatform {
    Codeforces,
    Leetcode,
    Codechef,
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TargetPlatform::Codeforces => write!(f, "codeforces"),
            TargetPlatform::Leetcode => write!(f, "leetcode"),
            TargetPlatform::Codechef => write!(f, "codechef"),
        }
    }
}

impl From<TargetPlatform> for Platform {
    fn from(target: TargetPlatform) -> Self {
        match target {
            TargetPlatform::Codeforces => Platform::Codeforces,
            TargetPlatform::Leetcode => Platform::LeetCode,
            TargetPlatform::Codechef => Platform::CodeChef,
        }
    }
}

/// 環境変数からコンテスト情報の取得先の設定を読み込む関数
pub fn load_config() -> Result<SourceConfig> {
    build_config(
        env::var("CODEFORCES_API_URL").ok(),
        env::var("LEETCODE_GRAPHQL_URL").ok(),
        env::var("CODECHEF_API_URL").ok(),
        env::var("FETCH_TIMEOUT_SECS").ok(),
    )
}

/// 与えられた値から設定を組み立てる関数
///
/// 値が`None`の項目はデフォルト値を使用する。タイムアウトは1秒以上でなければならない。
pub fn build_config(
    codeforces_url: Option<String>,
    leetcode_url: Option<String>,
    codechef_url: Option<String>,
    timeout_secs: Option<String>,
) -> Result<SourceConfig> {
    let codeforces_url = codeforces_url.unwrap_or_else(|| String::from(CODEFORCES_API_URL));
    let leetcode_url = leetcode_url.unwrap_or_else(|| String::from(LEETCODE_GRAPHQL_URL));
    let codechef_url = codechef_url.unwrap_or_else(|| String::from(CODECHEF_API_URL));

    let timeout = match timeout_secs {
        Some(value) => value.parse::<u64>().with_context(|| {
            let message = format!("FETCH_TIMEOUT_SECS must be an integer, but got `{}`", value);
            tracing::error!(message);
            message
        })?,
        None => DEFAULT_TIMEOUT_SECS,
    };
    if timeout == 0 {
        let message = "FETCH_TIMEOUT_SECS must be greater than 0";
        tracing::error!(message);
        anyhow::bail!(message);
    }

    SourceConfig::new(
        &codeforces_url,
        &leetcode_url,
        &codechef_url,
        Duration::from_secs(timeout),
    )
    .with_context(|| {
        let message = "invalid contest provider url given. check *_API_URL and LEETCODE_GRAPHQL_URL environment variables.";
        tracing::error!(message);
        message
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn target_platform_maps_to_platform() {
        let platforms: Vec<Platform> = TargetPlatform::value_variants()
            .iter()
            .map(|target| Platform::from(*target))
            .collect();

        assert_eq!(platforms, Platform::ALL.to_vec());
    }

    #[test]
    fn display_matches_route_slug() {
        for target in TargetPlatform::value_variants() {
            assert_eq!(target.to_string(), Platform::from(*target).slug());
        }
    }

    #[test]
    fn defaults_are_used_when_nothing_is_set() {
        let config = build_config(None, None, None, None).unwrap();

        assert_eq!(config.codeforces_url.as_str(), CODEFORCES_API_URL);
        assert_eq!(config.leetcode_url.as_str(), LEETCODE_GRAPHQL_URL);
        assert_eq!(config.codechef_url.as_str(), CODECHEF_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn given_values_override_defaults() {
        let config = build_config(
            Some(String::from("http://localhost:8080/codeforces")),
            Some(String::from("http://localhost:8080/leetcode")),
            Some(String::from("http://localhost:8080/codechef")),
            Some(String::from("3")),
        )
        .unwrap();

        assert_eq!(config.codeforces_url.as_str(), "http://localhost:8080/codeforces");
        assert_eq!(config.leetcode_url.as_str(), "http://localhost:8080/leetcode");
        assert_eq!(config.codechef_url.as_str(), "http://localhost:8080/codechef");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = build_config(None, Some(String::from("leetcode graphql")), None, None);

        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let result = build_config(None, None, None, Some(String::from("ten")));

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("must be an integer"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = build_config(None, None, None, Some(String::from("0")));

        let message = result.unwrap_err().to_string();
        assert!(message.contains("greater than 0"));
    }
}
