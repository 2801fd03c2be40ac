use std::sync::Arc;

use crate::application::services::ShortenerService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    /// Public URL prefix of short links, e.g. `https://s.example.com/`.
    pub base_url: Arc<str>,
    /// Host of `base_url`; links pointing at it are refused.
    pub public_host: Option<Arc<str>>,
}

impl AppState {
    pub fn new(shortener: Arc<ShortenerService>, base_url: &str) -> Self {
        let public_host = url::Url::parse(base_url)
            .ok()
            .and_then(|u| u.host_str().map(Arc::from));

        Self {
            shortener,
            base_url: Arc::from(base_url),
            public_host,
        }
    }

    /// Renders the public short URL for a token.
    pub fn short_url(&self, short_token: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), short_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryMappingRepository;
    use crate::utils::token_generator::RandomTokenGenerator;

    fn state(base_url: &str) -> AppState {
        let shortener = ShortenerService::new(
            Arc::new(InMemoryMappingRepository::new()),
            Arc::new(RandomTokenGenerator::new()),
        );
        AppState::new(Arc::new(shortener), base_url)
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        assert_eq!(
            state("https://s.example.com/").short_url("abcDEF1234"),
            "https://s.example.com/abcDEF1234"
        );
        assert_eq!(
            state("https://s.example.com").short_url("abcDEF1234"),
            "https://s.example.com/abcDEF1234"
        );
    }

    #[test]
    fn test_public_host() {
        assert_eq!(
            state("https://s.example.com:8443/").public_host.as_deref(),
            Some("s.example.com")
        );
    }
}
