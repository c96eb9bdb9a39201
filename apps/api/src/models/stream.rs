use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamInfo {
    pub anime_id: String,
    pub episode_id: String,
    pub stream_url: String,
    pub quality: Vec<String>,
    pub subtitles: Vec<String>,
    pub note: String,
}
