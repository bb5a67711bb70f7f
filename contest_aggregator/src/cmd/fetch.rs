use crate::cmd::{load_config, TargetPlatform};
use anyhow::{Context, Result};
use clap::Args;
use contest_aggregator_libs::{api::ContestListResponse, ContestAggregator};

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// 指定しない場合は全プラットフォームから取得する
    #[arg(long)]
    platform: Option<TargetPlatform>,
    #[arg(long)]
    pretty: bool,
}

pub async fn run(args: FetchArgs) -> Result<()> {
    let config = load_config()?;
    let aggregator = ContestAggregator::new(&config).with_context(|| {
        let message = "couldn't create HTTP client for contest providers.";
        tracing::error!(message);
        message
    })?;

    let json = fetch_as_json(&aggregator, args.platform, args.pretty).await?;
    println!("{}", json);

    Ok(())
}

/// コンテスト情報を取得し、APIと同じ形式のJSON文字列にして返す関数
async fn fetch_as_json(
    aggregator: &ContestAggregator,
    platform: Option<TargetPlatform>,
    pretty: bool,
) -> Result<String> {
    let contests = match platform {
        Some(platform) => {
            tracing::info!("Fetch upcoming contests from {}", platform);
            aggregator.fetch_platform(platform.into()).await?
        }
        None => {
            tracing::info!("Fetch upcoming contests from all platforms");
            aggregator.fetch_all().await?
        }
    };

    let response = ContestListResponse::success(contests);
    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };

    Ok(json)
}
