//! Blocked-site list and hostname matching.
//!
//! The match rule is intentionally permissive: an entry matches a hostname
//! exactly, as a parent domain, or as a plain substring. The substring rule
//! over-blocks (`example.com` also matches `notexample.com`); that is the
//! documented policy, inherited from the original blocking behavior.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ValidationError;

/// A successful match of a hostname against the blocklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch {
    /// Hostname extracted from the checked URL.
    pub host: String,
    /// The blocklist entry that matched it.
    pub entry: String,
}

/// Ordered, deduplicated set of lowercase domain entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blocklist {
    entries: Vec<String>,
}

impl Blocklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Add one entry. Returns `false` if it was already present.
    ///
    /// # Errors
    ///
    /// Rejects strings that do not look like a domain.
    pub fn add(&mut self, raw: &str) -> Result<bool, ValidationError> {
        let entry = normalize_entry(raw)?;
        if self.entries.contains(&entry) {
            return Ok(false);
        }
        self.entries.push(entry);
        Ok(true)
    }

    /// Remove an entry. Returns `false` if it was not present.
    pub fn remove(&mut self, raw: &str) -> bool {
        let needle = raw.trim().to_lowercase();
        let before = self.entries.len();
        self.entries.retain(|e| *e != needle);
        self.entries.len() != before
    }

    /// Replace the whole list, validating and deduplicating every entry.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid entry, leaving the list unchanged.
    pub fn replace<I, S>(&mut self, sites: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = Vec::new();
        for site in sites {
            let entry = normalize_entry(site.as_ref())?;
            if !next.contains(&entry) {
                next.push(entry);
            }
        }
        self.entries = next;
        Ok(())
    }

    /// Match a bare hostname against the list.
    pub fn match_host(&self, host: &str) -> Option<BlockMatch> {
        let host = host.to_lowercase();
        for entry in &self.entries {
            if host == *entry
                || host.ends_with(&format!(".{entry}"))
                || host.contains(entry.as_str())
            {
                return Some(BlockMatch {
                    host,
                    entry: entry.clone(),
                });
            }
        }
        None
    }

    /// Match a full URL against the list.
    ///
    /// Malformed URLs and URLs without a hostname fail open: they never match.
    pub fn match_url(&self, raw_url: &str) -> Option<BlockMatch> {
        let url = Url::parse(raw_url).ok()?;
        let host = url.host_str()?;
        self.match_host(host)
    }

    pub fn is_blocked_url(&self, raw_url: &str) -> bool {
        self.match_url(raw_url).is_some()
    }
}

/// Trim, lowercase, and validate a user-supplied domain entry.
fn normalize_entry(raw: &str) -> Result<String, ValidationError> {
    let entry = raw.trim().to_lowercase();
    let invalid = |reason: &str| ValidationError::InvalidDomain {
        entry: entry.clone(),
        reason: reason.to_string(),
    };

    if entry.is_empty() {
        return Err(invalid("empty"));
    }
    if !entry.contains('.') {
        return Err(invalid("missing a dot"));
    }
    if entry.starts_with(['.', '-']) || entry.ends_with(['.', '-']) {
        return Err(invalid("leading or trailing separator"));
    }
    if !entry
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(invalid("contains characters outside [a-z0-9.-]"));
    }
    Ok(entry)
}
