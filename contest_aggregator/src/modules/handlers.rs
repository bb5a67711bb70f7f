use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contest_aggregator_libs::{
    api::{ContestListResponse, IndexResponse},
    AggregateError, Contest, ContestAggregator, Platform,
};
use std::{any::Any, collections::BTreeMap, sync::Arc};

type ContestsResponse = (StatusCode, Json<ContestListResponse>);

pub const ALL_CONTESTS_ROUTE: &str = "/contests";

pub fn platform_route(platform: Platform) -> String {
    format!("{}/{}", ALL_CONTESTS_ROUTE, platform.slug())
}

pub async fn index() -> Json<IndexResponse> {
    let mut endpoints = BTreeMap::new();
    endpoints.insert(
        String::from(ALL_CONTESTS_ROUTE),
        String::from("Upcoming contests from all platforms, sorted by start time"),
    );
    for platform in Platform::ALL {
        endpoints.insert(
            platform_route(platform),
            format!("Upcoming contests from {}", platform),
        );
    }

    Json(IndexResponse {
        message: String::from("Contest aggregator API"),
        endpoints,
    })
}

pub async fn all_contests(
    Extension(aggregator): Extension<Arc<ContestAggregator>>,
) -> ContestsResponse {
    to_response(aggregator.fetch_all().await)
}

pub async fn codeforces_contests(
    Extension(aggregator): Extension<Arc<ContestAggregator>>,
) -> ContestsResponse {
    to_response(aggregator.fetch_platform(Platform::Codeforces).await)
}

pub async fn leetcode_contests(
    Extension(aggregator): Extension<Arc<ContestAggregator>>,
) -> ContestsResponse {
    to_response(aggregator.fetch_platform(Platform::LeetCode).await)
}

pub async fn codechef_contests(
    Extension(aggregator): Extension<Arc<ContestAggregator>>,
) -> ContestsResponse {
    to_response(aggregator.fetch_platform(Platform::CodeChef).await)
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

fn to_response(result: Result<Vec<Contest>, AggregateError>) -> ContestsResponse {
    match result {
        Ok(contests) => (
            StatusCode::OK,
            Json(ContestListResponse::success(contests)),
        ),
        Err(e) => {
            tracing::error!("request failed cause: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContestListResponse::error(e)),
            )
        }
    }
}

/// ハンドラ内でパニックが発生した場合に500エラーのレスポンスを生成する関数
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        String::from("unexpected error")
    };
    tracing::error!("handler panicked: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ContestListResponse::error(message)),
    )
        .into_response()
}
