use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    error::AppError,
    jikan::{api_types::JikanAnime, JikanClient, Season},
    models::{
        anime::{has_sparse_numbers, AnimeDetail, AnimeSummary, Episode, Pagination},
        stream::StreamInfo,
    },
    stream::StreamLinkProvider,
    types::ApiResponse,
    AppState,
};

type ApiResult<T> = Result<ApiResponse<T>, AppError>;

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// Missing or empty means page 1; anything else must be a positive integer.
    ///
    /// Bad values get a 400 here and are never forwarded upstream.
    fn page(&self) -> Result<u32, AppError> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(1),
            Some(page) => page
                .parse::<u32>()
                .ok()
                .filter(|page| *page > 0)
                .ok_or_else(|| AppError::bad_request("Invalid page parameter")),
        }
    }
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

fn summaries(animes: Vec<JikanAnime>) -> Vec<AnimeSummary> {
    animes.into_iter().map(AnimeSummary::from).collect()
}

#[axum::debug_handler(state = AppState)]
pub async fn get_popular(
    State(jikan): State<JikanClient>,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, AppError>,
) -> ApiResult<Vec<AnimeSummary>> {
    let page = query.page()?;
    let res = jikan
        .top_anime(page)
        .await
        .map_err(AppError::upstream("Failed to fetch anime"))?;

    Ok(ApiResponse::paginated(
        summaries(res.data),
        res.pagination.map(Pagination::from),
    ))
}

#[axum::debug_handler(state = AppState)]
pub async fn search(
    State(jikan): State<JikanClient>,
    WithRejection(Query(query), _): WithRejection<Query<SearchQuery>, AppError>,
) -> ApiResult<Vec<AnimeSummary>> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::bad_request("Query parameter required"))?;

    let res = jikan
        .search_anime(q)
        .await
        .map_err(AppError::upstream("Failed to search anime"))?;

    Ok(ApiResponse::ok(summaries(res.data)))
}

#[axum::debug_handler(state = AppState)]
pub async fn get_anime(
    State(jikan): State<JikanClient>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> ApiResult<AnimeDetail> {
    let res = jikan
        .anime_full(&id)
        .await
        .map_err(AppError::upstream("Failed to fetch anime details"))?;

    Ok(ApiResponse::ok(AnimeDetail::from(res.data)))
}

#[axum::debug_handler(state = AppState)]
pub async fn get_episodes(
    State(jikan): State<JikanClient>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, AppError>,
) -> ApiResult<Vec<Episode>> {
    let page = query.page()?;
    let res = jikan
        .anime_episodes(&id, page)
        .await
        .map_err(AppError::upstream("Failed to fetch episodes"))?;

    let episodes: Vec<Episode> = res.data.into_iter().map(Episode::from).collect();
    if has_sparse_numbers(&episodes) {
        tracing::warn!(
            anime_id = %id,
            page,
            "Episode ids are not sequential, episode numbers may not match broadcast order"
        );
    }

    Ok(ApiResponse::paginated(
        episodes,
        res.pagination.map(Pagination::from),
    ))
}

#[axum::debug_handler(state = AppState)]
pub async fn get_stream(
    State(streams): State<Arc<dyn StreamLinkProvider>>,
    WithRejection(Path((id, episode_id)), _): WithRejection<Path<(String, String)>, AppError>,
) -> ApiResult<StreamInfo> {
    let info = streams.stream_info(&id, &episode_id).await?;
    Ok(ApiResponse::ok(info))
}

/// Validates `year` and `season` before contacting the upstream. Anything it
/// would reject is a 400 `Invalid season parameters` instead of a 500.
#[axum::debug_handler(state = AppState)]
pub async fn get_season(
    State(jikan): State<JikanClient>,
    WithRejection(Path((year, season)), _): WithRejection<Path<(String, String)>, AppError>,
) -> ApiResult<Vec<AnimeSummary>> {
    let invalid = || AppError::bad_request("Invalid season parameters");
    let year = year.trim().parse::<u16>().map_err(|_| invalid())?;
    let season = season.parse::<Season>().map_err(|_| invalid())?;

    let res = jikan
        .season(year, season)
        .await
        .map_err(AppError::upstream("Failed to fetch seasonal anime"))?;

    Ok(ApiResponse::ok(summaries(res.data)))
}

#[axum::debug_handler(state = AppState)]
pub async fn get_season_now(State(jikan): State<JikanClient>) -> ApiResult<Vec<AnimeSummary>> {
    let res = jikan
        .season_now()
        .await
        .map_err(AppError::upstream("Failed to fetch current season"))?;

    Ok(ApiResponse::ok(summaries(res.data)))
}
