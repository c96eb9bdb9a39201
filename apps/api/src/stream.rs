use async_trait::async_trait;

use crate::models::stream::StreamInfo;

/// Source of playback links for an episode. Route handlers only see this trait,
/// so a licensed provider can replace the demo one without touching them.
#[async_trait]
pub trait StreamLinkProvider: Send + Sync {
    async fn stream_info(
        &self,
        anime_id: &str,
        episode_id: &str,
    ) -> Result<StreamInfo, anyhow::Error>;
}

/// Placeholder links. Makes no network calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockStreamLinks;

pub const MOCK_STREAM_NOTE: &str = "This is a demo. Please use legal streaming services.";

#[async_trait]
impl StreamLinkProvider for MockStreamLinks {
    async fn stream_info(
        &self,
        anime_id: &str,
        episode_id: &str,
    ) -> Result<StreamInfo, anyhow::Error> {
        Ok(StreamInfo {
            anime_id: anime_id.to_string(),
            episode_id: episode_id.to_string(),
            stream_url: format!("https://example.com/stream/{}/{}", anime_id, episode_id),
            quality: vec!["720p".to_string(), "1080p".to_string()],
            subtitles: vec!["English".to_string(), "Indonesian".to_string()],
            note: MOCK_STREAM_NOTE.to_string(),
        })
    }
}
