use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use super::types::{ConvertRequest, ConvertResponse, OptimizeResponse, SearchQuery, TopQuery};
use crate::emoji::{EmojiService, PerformanceProfile};

/// 変換できるテキストの最大文字数
/// チャット1件としては十分に大きい値
const MAX_TEXT_CHARS: usize = 10_000;

/// 検索結果の件数（デフォルト）
const DEFAULT_SEARCH_LIMIT: usize = 20;

/// ランキングの件数（デフォルト）
const DEFAULT_TOP_LIMIT: usize = 50;

/// 検索・ランキングで返す最大件数
const MAX_RESULT_LIMIT: usize = 500;

/// HTTPサーバー用の共有状態
#[derive(Clone)]
pub struct HttpState {
    pub emoji: EmojiService,
}

/// ルーターを構築
pub fn create_router(emoji: EmojiService) -> Router {
    let state = HttpState { emoji };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/emoji/convert", post(convert_api))
        .route("/api/emoji/stats", get(stats_api))
        .route("/api/emoji/search", get(search_api))
        .route("/api/emoji/top", get(top_api))
        .route("/api/emoji/optimize", post(optimize_api))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTPサーバーを起動
pub async fn start_http_server(
    emoji: EmojiService,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(emoji);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// ヘルスチェックエンドポイント
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "server": "chat-emoji",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// 変換API
async fn convert_api(
    State(state): State<HttpState>,
    Json(request): Json<ConvertRequest>,
) -> impl IntoResponse {
    if request.text.chars().count() > MAX_TEXT_CHARS {
        log::warn!("Rejected convert request: text too long");
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(json!({ "error": format!("Text exceeds {} characters", MAX_TEXT_CHARS) })),
        )
            .into_response();
    }

    let profile = request
        .profile
        .as_deref()
        .map(PerformanceProfile::from_name)
        .unwrap_or_default();

    let text = state.emoji.convert(&request.text, profile).await;
    Json(ConvertResponse { text }).into_response()
}

/// 統計API
async fn stats_api(State(state): State<HttpState>) -> impl IntoResponse {
    Json(state.emoji.stats().await)
}

/// 検索API
async fn search_api(
    State(state): State<HttpState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_RESULT_LIMIT);
    Json(state.emoji.search(&query.q, limit).await)
}

/// 使用回数ランキングAPI
async fn top_api(
    State(state): State<HttpState>,
    Query(query): Query<TopQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT).min(MAX_RESULT_LIMIT);
    Json(state.emoji.top_used(limit).await)
}

/// 最適化API
async fn optimize_api(State(state): State<HttpState>) -> impl IntoResponse {
    let moved = state.emoji.optimize().await;
    Json(OptimizeResponse { moved })
}
