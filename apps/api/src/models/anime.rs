use serde::Serialize;
use serde_json::Value;

use crate::jikan::api_types::{
    JikanAnime, JikanEntity, JikanEpisode, JikanImages, JikanPagination,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeSummary {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub score: Option<f64>,
    pub episodes: Option<u32>,
    pub year: Option<i32>,
    pub synopsis: Option<String>,
}

impl From<JikanAnime> for AnimeSummary {
    fn from(anime: JikanAnime) -> Self {
        Self {
            id: anime.mal_id,
            image: preferred_image(&anime.images),
            title: anime.title,
            score: anime.score,
            episodes: anime.episodes,
            year: anime.year,
            synopsis: anime.synopsis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetail {
    pub id: u64,
    pub title: String,
    pub title_english: Option<String>,
    pub title_japanese: Option<String>,
    pub image: Option<String>,
    pub trailer_url: Option<String>,
    pub score: Option<f64>,
    pub episodes: Option<u32>,
    pub status: Option<String>,
    pub aired_info: Option<Value>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub studios: Option<Vec<JikanEntity>>,
    pub genres: Option<Vec<JikanEntity>>,
    pub synopsis: Option<String>,
    pub background: Option<String>,
}

impl From<JikanAnime> for AnimeDetail {
    fn from(anime: JikanAnime) -> Self {
        Self {
            id: anime.mal_id,
            image: preferred_image(&anime.images),
            trailer_url: anime.trailer.and_then(|trailer| trailer.url),
            title: anime.title,
            title_english: anime.title_english,
            title_japanese: anime.title_japanese,
            score: anime.score,
            episodes: anime.episodes,
            status: anime.status,
            aired_info: anime.aired,
            season: anime.season,
            year: anime.year,
            studios: anime.studios,
            genres: anime.genres,
            synopsis: anime.synopsis,
            background: anime.background,
        }
    }
}

fn preferred_image(images: &Option<JikanImages>) -> Option<String> {
    images
        .as_ref()
        .and_then(JikanImages::preferred)
        .map(str::to_owned)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: u64,
    /// Same value as `id`; the upstream episode id doubles as the episode number.
    pub number: u64,
    pub title: Option<String>,
    pub title_japanese: Option<String>,
    pub aired: Option<String>,
    pub filler: Option<bool>,
    pub recap: Option<bool>,
}

impl From<JikanEpisode> for Episode {
    fn from(episode: JikanEpisode) -> Self {
        Self {
            id: episode.mal_id,
            number: episode.mal_id,
            title: episode.title,
            title_japanese: episode.title_japanese,
            aired: episode.aired,
            filler: episode.filler,
            recap: episode.recap,
        }
    }
}

/// True when consecutive episodes on a page skip or repeat numbers, meaning
/// `number` no longer lines up with the episode's position in the series.
pub fn has_sparse_numbers(episodes: &[Episode]) -> bool {
    episodes
        .windows(2)
        .any(|pair| pair[0].number.checked_add(1) != Some(pair[1].number))
}

#[derive(Default, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_visible_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next_page: Option<bool>,
}

impl From<JikanPagination> for Pagination {
    fn from(pagination: JikanPagination) -> Self {
        Self {
            current_page: pagination.current_page,
            last_visible_page: pagination.last_visible_page,
            has_next_page: pagination.has_next_page,
        }
    }
}
