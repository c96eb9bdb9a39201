pub mod api_types;

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
    time::Duration,
};

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use self::api_types::{JikanAnime, JikanApiError, JikanEpisode, JikanResponse};

pub const POPULAR_PAGE_LIMIT: u32 = 70;
pub const SEARCH_LIMIT: u32 = 20;
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the anime-information API client.
#[derive(Debug, Error)]
pub enum JikanError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("base URL cannot carry a path: {0}")]
    InvalidBase(Url),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }
}

impl FromStr for Season {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "winter" => Ok(Self::Winter),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" => Ok(Self::Fall),
            _ => Err(()),
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client for a Jikan v4 compatible API. One method per upstream endpoint, each
/// issuing exactly one request.
#[derive(Debug, Clone)]
pub struct JikanClient {
    http: Client,
    base: Url,
}

impl JikanClient {
    pub fn new(base: Url) -> Result<Self, JikanError> {
        let http = Client::builder().timeout(UPSTREAM_TIMEOUT).build()?;
        Self::with_client(http, base)
    }

    pub fn with_client(http: Client, base: Url) -> Result<Self, JikanError> {
        if base.cannot_be_a_base() {
            return Err(JikanError::InvalidBase(base));
        }
        Ok(Self { http, base })
    }

    /// Path values are appended as encoded segments, so `/` or `?` inside an id
    /// stay part of that segment.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<JikanResponse<T>, JikanError> {
        tracing::debug!("GET {}", url);
        let res = self.http.get(url).send().await?;
        let res = check_response(res).await?;

        let text = res.text().await?;
        let body = serde_json::from_str(&text)?;

        Ok(body)
    }

    pub async fn top_anime(&self, page: u32) -> Result<JikanResponse<Vec<JikanAnime>>, JikanError> {
        let page = page.to_string();
        let limit = POPULAR_PAGE_LIMIT.to_string();
        let url = self.endpoint(&["top", "anime"], &[("page", page.as_str()), ("limit", limit.as_str())]);
        self.get(url).await
    }

    pub async fn search_anime(
        &self,
        query: &str,
    ) -> Result<JikanResponse<Vec<JikanAnime>>, JikanError> {
        let limit = SEARCH_LIMIT.to_string();
        let url = self.endpoint(&["anime"], &[("q", query), ("limit", limit.as_str())]);
        self.get(url).await
    }

    pub async fn anime_full(&self, id: &str) -> Result<JikanResponse<JikanAnime>, JikanError> {
        let url = self.endpoint(&["anime", id, "full"], &[]);
        self.get(url).await
    }

    pub async fn anime_episodes(
        &self,
        id: &str,
        page: u32,
    ) -> Result<JikanResponse<Vec<JikanEpisode>>, JikanError> {
        let page = page.to_string();
        let url = self.endpoint(&["anime", id, "episodes"], &[("page", page.as_str())]);
        self.get(url).await
    }

    pub async fn season(
        &self,
        year: u16,
        season: Season,
    ) -> Result<JikanResponse<Vec<JikanAnime>>, JikanError> {
        let year = year.to_string();
        let url = self.endpoint(&["seasons", year.as_str(), season.as_str()], &[]);
        self.get(url).await
    }

    pub async fn season_now(&self) -> Result<JikanResponse<Vec<JikanAnime>>, JikanError> {
        let url = self.endpoint(&["seasons", "now"], &[]);
        self.get(url).await
    }
}

async fn check_response(res: Response) -> Result<Response, JikanError> {
    if res.status().is_success() {
        return Ok(res);
    }

    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<JikanApiError>(&body) {
        Ok(err) => {
            tracing::warn!(
                status,
                error_type = err.error_type.as_deref().unwrap_or("unknown"),
                "Anime API returned an error"
            );
            err.message
        }
        Err(_) => {
            tracing::warn!(status, "Anime API returned an error");
            body
        }
    };

    Err(JikanError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> JikanClient {
        JikanClient::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let jikan = client("https://api.jikan.moe/v4");
        assert_eq!(
            jikan.endpoint(&["anime", "42", "full"], &[]).as_str(),
            "https://api.jikan.moe/v4/anime/42/full"
        );

        let jikan = client("https://api.jikan.moe/v4/");
        assert_eq!(
            jikan.endpoint(&["seasons", "now"], &[]).as_str(),
            "https://api.jikan.moe/v4/seasons/now"
        );
    }

    #[test]
    fn endpoint_encodes_segments_and_query() {
        let jikan = client("http://localhost:9000");
        let url = jikan.endpoint(&["anime", "1/../../admin", "full"], &[("q", "a&b c")]);
        assert_eq!(url.path(), "/anime/1%2F..%2F..%2Fadmin/full");
        assert_eq!(url.query(), Some("q=a%26b+c"));
    }

    #[test]
    fn rejects_bases_without_a_path() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            JikanClient::new(base),
            Err(JikanError::InvalidBase(_))
        ));
    }

    #[test]
    fn seasons_parse_case_insensitively() {
        assert_eq!("Spring".parse::<Season>(), Ok(Season::Spring));
        assert_eq!("FALL".parse::<Season>(), Ok(Season::Fall));
        assert!("autumn".parse::<Season>().is_err());
        assert_eq!(Season::Winter.to_string(), "winter");
    }
}
