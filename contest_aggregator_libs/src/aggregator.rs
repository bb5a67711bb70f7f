use crate::{
    contest::{Contest, Platform},
    sources::{CodeChefSource, CodeforcesSource, ContestSource, LeetCodeSource, SourceConfig},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("contest source task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

/// 3つのプラットフォームのコンテスト情報をまとめて取得する構造体
pub struct ContestAggregator {
    codeforces: Arc<CodeforcesSource>,
    leetcode: Arc<LeetCodeSource>,
    codechef: Arc<CodeChefSource>,
}

impl ContestAggregator {
    pub fn new(config: &SourceConfig) -> Result<Self, crate::sources::SourceError> {
        Ok(Self {
            codeforces: Arc::new(CodeforcesSource::new(config)?),
            leetcode: Arc::new(LeetCodeSource::new(config)?),
            codechef: Arc::new(CodeChefSource::new(config)?),
        })
    }

    /// 全プラットフォームから並行してコンテスト情報を取得し、開始時刻順に並べて返すメソッド
    ///
    /// 各ソースは失敗時に空のリストを返すため、エラーになるのはタスク自体が異常終了した場合のみ。
    pub async fn fetch_all(&self) -> Result<Vec<Contest>, AggregateError> {
        let (codeforces, leetcode, codechef) = tokio::join!(
            spawn_fetch(self.codeforces.clone()),
            spawn_fetch(self.leetcode.clone()),
            spawn_fetch(self.codechef.clone()),
        );

        let contests = merge_contests(vec![codeforces?, leetcode?, codechef?]);
        tracing::info!("{} upcoming contests aggregated.", contests.len());

        Ok(contests)
    }

    /// 指定したプラットフォームのコンテスト情報だけを取得するメソッド
    pub async fn fetch_platform(&self, platform: Platform) -> Result<Vec<Contest>, AggregateError> {
        let contests = match platform {
            Platform::Codeforces => spawn_fetch(self.codeforces.clone()).await?,
            Platform::LeetCode => spawn_fetch(self.leetcode.clone()).await?,
            Platform::CodeChef => spawn_fetch(self.codechef.clone()).await?,
        };

        Ok(contests)
    }
}

async fn spawn_fetch<S>(source: Arc<S>) -> Result<Vec<Contest>, JoinError>
where
    S: ContestSource + 'static,
{
    tokio::spawn(async move { source.fetch_upcoming().await }).await
}

/// 複数のコンテストのリストを連結し、開始時刻の昇順に安定ソートする関数
pub fn merge_contests(batches: Vec<Vec<Contest>>) -> Vec<Contest> {
    let mut contests: Vec<Contest> = batches.into_iter().flatten().collect();
    contests.sort_by_key(|contest| contest.start_time_unix());
    contests
}
