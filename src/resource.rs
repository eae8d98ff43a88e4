use reqwest::Url;

use crate::error::SyncError;

/// Location of the JSON status document for a page.
///
/// Resolved once from the page URL and never re-evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResource {
    url: String,
}

impl StatusResource {
    /// Strip a single trailing `#` from the page URL and append `.json`.
    pub fn from_page_url(href: &str) -> Self {
        let base = href.strip_suffix('#').unwrap_or(href);
        Self {
            url: format!("{base}.json"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Resolve a possibly relative URL (such as an event target) against
    /// this resource.
    pub fn resolve(&self, target: &str) -> Result<Url, SyncError> {
        let base = Url::parse(&self.url).map_err(|e| SyncError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        base.join(target).map_err(|e| SyncError::InvalidUrl {
            url: target.to_string(),
            reason: e.to_string(),
        })
    }
}

impl std::fmt::Display for StatusResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}
