use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// Some titles are purely numeric and come back as JSON numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanResponse<T> {
    pub data: T,
    pub pagination: Option<JikanPagination>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct JikanPagination {
    pub current_page: Option<u32>,
    pub last_visible_page: Option<u32>,
    pub has_next_page: Option<bool>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageSet>,
}

impl JikanImages {
    /// Large JPG poster, or the regular JPG of the same poster when the large one is missing.
    pub fn preferred(&self) -> Option<&str> {
        let jpg = self.jpg.as_ref()?;
        jpg.large_image_url
            .as_deref()
            .or(jpg.image_url.as_deref())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct JikanTrailer {
    pub url: Option<String>,
}

/// A studio, genre or similar named record. Every key the upstream sends is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JikanEntity {
    pub name: String,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u64,
    #[serde(deserialize_with = "string_or_number")]
    pub title: String,
    pub title_english: Option<String>,
    pub title_japanese: Option<String>,
    pub images: Option<JikanImages>,
    pub trailer: Option<JikanTrailer>,
    pub score: Option<f64>,
    pub episodes: Option<u32>,
    pub status: Option<String>,
    pub aired: Option<Value>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub studios: Option<Vec<JikanEntity>>,
    pub genres: Option<Vec<JikanEntity>>,
    pub synopsis: Option<String>,
    pub background: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JikanEpisode {
    pub mal_id: u64,
    pub title: Option<String>,
    pub title_japanese: Option<String>,
    pub aired: Option<String>,
    pub filler: Option<bool>,
    pub recap: Option<bool>,
}

/// Body the upstream sends alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct JikanApiError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}
