use anyhow::{bail, Context};
use reqwest::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ANIME_API_BASE: &str = "https://api.jikan.moe/v4";

/// Process-wide settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub anime_api_base: Url,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got \"{}\"", port))?,
            None => DEFAULT_PORT,
        };

        let base = lookup("ANIME_API_BASE").unwrap_or_else(|| DEFAULT_ANIME_API_BASE.to_string());
        let anime_api_base = Url::parse(base.trim())
            .with_context(|| format!("ANIME_API_BASE is not a valid URL: \"{}\"", base))?;

        if !matches!(anime_api_base.scheme(), "http" | "https") {
            bail!("ANIME_API_BASE must be an http(s) URL, got \"{}\"", base);
        }

        Ok(Self {
            port,
            anime_api_base,
        })
    }
}
