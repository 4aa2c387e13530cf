use std::fmt;

/// A configured channel, as the platform understands it.
///
/// Channels are configured either by their canonical id (`UC…`) or by their
/// public handle (`@name`). Resolving a handle to an upload feed is the
/// client's job; the reference only records which lookup to perform.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChannelRef {
    /// Canonical channel id (e.g. `UC_x5XG1OV2P6uZZ5FSM9Ttw`)
    Id(String),
    /// Public handle without the leading `@` (e.g. `GoogleDevelopers`)
    Handle(String),
}

impl ChannelRef {
    /// Parse a configured channel string.
    ///
    /// Accepts bare ids, `@handles`, and channel URLs of the form
    /// `https://www.youtube.com/channel/<id>` or `https://www.youtube.com/@<handle>`.
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let path = match trimmed.find("youtube.com/") {
            Some(idx) => &trimmed[idx + "youtube.com/".len()..],
            None => trimmed,
        };
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or(path)
            .trim_end_matches('/');

        if let Some(id) = path.strip_prefix("channel/") {
            let id = id.split('/').next().unwrap_or(id);
            return (!id.is_empty()).then(|| Self::Id(id.to_string()));
        }

        if let Some(handle) = path.strip_prefix('@') {
            let handle = handle.split('/').next().unwrap_or(handle);
            return (!handle.is_empty()).then(|| Self::Handle(handle.to_string()));
        }

        Some(Self::Id(path.to_string()))
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Handle(handle) => write!(f, "@{}", handle),
        }
    }
}
