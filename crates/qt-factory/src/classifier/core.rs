use super::types::{LinkClassifier, ProviderMatcher};
use crate::config::{PatternConfig, ProviderPatterns};
use qt_core::{Link, LinkKind, Provider};
use regex::Regex;
use url::Url;

impl LinkClassifier {
    pub fn new(patterns: &PatternConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            matchers: vec![
                ProviderMatcher::compile(
                    Provider::YouTube,
                    &patterns.youtube,
                    // "watch?v=..&list=.." is treated as the playlist
                    [LinkKind::Playlist, LinkKind::Video],
                )?,
                ProviderMatcher::compile(
                    Provider::StreamingService,
                    &patterns.streaming,
                    // series pattern is broad, episode pages must win
                    [LinkKind::Video, LinkKind::Playlist],
                )?,
            ],
        })
    }

    /// Never fails: anything unrecognized comes back as Unknown/Unknown.
    pub fn classify(&self, input: &str) -> Link {
        let text = input.trim();
        let Some(host) = http_host(text) else {
            return Link::unknown(text);
        };

        for matcher in &self.matchers {
            if matcher.owns_host(&host) {
                return matcher.classify(text);
            }
        }
        Link::unknown(text)
    }
}

impl ProviderMatcher {
    fn compile(
        provider: Provider,
        patterns: &ProviderPatterns,
        order: [LinkKind; 2],
    ) -> Result<Self, regex::Error> {
        let compile_all = |list: &[String]| -> Result<Vec<Regex>, regex::Error> {
            list.iter().map(|p| Regex::new(p)).collect()
        };

        Ok(Self {
            provider,
            hosts: patterns.hosts.iter().map(|h| h.to_lowercase()).collect(),
            playlist: compile_all(&patterns.playlist)?,
            video: compile_all(&patterns.video)?,
            range: patterns.range.as_deref().map(Regex::new).transpose()?,
            order,
        })
    }

    fn owns_host(&self, host: &str) -> bool {
        self.hosts
            .iter()
            .any(|h| host == h || host.ends_with(&format!(".{}", h)))
    }

    fn classify(&self, text: &str) -> Link {
        if let Some(link) = self.classify_range(text) {
            return link;
        }

        for kind in self.order {
            let set = match kind {
                LinkKind::Playlist => &self.playlist,
                _ => &self.video,
            };
            if set.iter().any(|re| re.is_match(text)) {
                return Link::new(text, self.provider, kind);
            }
        }
        Link::unknown(text)
    }

    fn classify_range(&self, text: &str) -> Option<Link> {
        let caps = self.range.as_ref()?.captures(text)?;
        let token = caps.get(1)?;
        let marker = caps.get(0)?;

        let target = text[..marker.start()].trim_end_matches(['?', '&', '#']);
        Some(Link::season_range(text, target, token.as_str()))
    }
}

fn http_host(text: &str) -> Option<String> {
    let url = Url::parse(text).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.host_str().map(|h| h.to_lowercase())
}
