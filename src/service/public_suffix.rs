//! Public-suffix list client.
//!
//! Downloads the public-suffix list over HTTP, parses it into rule sets and
//! caches the result in memory; a scheduler job refreshes the cache daily.
//! Domain-name registration splits the requested FQDN into registrable name
//! and suffix against the cached list.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{domain::DomainError, AppError};

/// Parsed public-suffix rule sets.
#[derive(Debug, Default, Clone)]
pub struct SuffixList {
    /// Exact rules, e.g. `com`, `co.uk`.
    rules: HashSet<String>,
    /// Wildcard rules stored by their base, e.g. `ck` for `*.ck`.
    wildcards: HashSet<String>,
    /// Exception rules, e.g. `www.ck` for `!www.ck`.
    exceptions: HashSet<String>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl SuffixList {
    /// Parses the publicsuffix.org list format: one rule per line,
    /// comments start with `//`, ICANN/private section markers are plain
    /// comments.
    pub fn parse(text: &str) -> Self {
        let mut list = Self::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            let rule = line.to_lowercase();
            if let Some(exception) = rule.strip_prefix('!') {
                list.exceptions.insert(exception.to_string());
            } else if let Some(base) = rule.strip_prefix("*.") {
                list.wildcards.insert(base.to_string());
            } else {
                list.rules.insert(rule);
            }
        }

        list
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.wildcards.is_empty()
    }

    /// Whether `candidate` (e.g. `co.uk`) is a public suffix.
    pub fn is_suffix(&self, candidate: &str) -> bool {
        if self.exceptions.contains(candidate) {
            return false;
        }
        if self.rules.contains(candidate) {
            return true;
        }

        // `*.ck` makes any single label under `ck` a suffix.
        match candidate.split_once('.') {
            Some((_, base)) => self.wildcards.contains(base),
            None => false,
        }
    }

    /// Splits an FQDN into (registrable name, public suffix), choosing the
    /// longest matching suffix.
    pub fn split(&self, fqdn: &str) -> Option<(String, String)> {
        let fqdn = fqdn.trim().trim_end_matches('.').to_lowercase();
        let labels: Vec<&str> = fqdn.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
            return None;
        }

        // Longest suffix first; at least one label must remain as the name.
        for start in 1..labels.len() {
            let candidate = labels[start..].join(".");
            if self.is_suffix(&candidate) {
                let name = labels[..start].join(".");
                return Some((name, candidate));
            }
        }

        None
    }
}

/// Caching client for the public-suffix list.
#[derive(Clone)]
pub struct PublicSuffixService {
    client: reqwest::Client,
    url: String,
    cache: Arc<RwLock<SuffixList>>,
}

impl PublicSuffixService {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            cache: Arc::new(RwLock::new(SuffixList::default())),
        }
    }

    /// Service with a pre-populated list, for tests.
    pub fn with_list(client: reqwest::Client, url: impl Into<String>, list: SuffixList) -> Self {
        Self {
            client,
            url: url.into(),
            cache: Arc::new(RwLock::new(list)),
        }
    }

    /// Downloads and caches a fresh copy of the list.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let text = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let mut list = SuffixList::parse(&text);
        list.fetched_at = Some(Utc::now());

        if list.is_empty() {
            return Err(AppError::InternalError(format!(
                "Public suffix list from {} parsed empty",
                self.url
            )));
        }

        tracing::info!(rules = list.rules.len(), "Refreshed public suffix list");
        *self.cache.write().await = list;

        Ok(())
    }

    /// Splits an FQDN against the cached list, fetching the list first when
    /// the cache is still cold.
    ///
    /// When the list cannot be fetched at all, registration degrades to a
    /// plain last-label split so an outage of publicsuffix.org does not take
    /// domain registration down with it.
    pub async fn split_fqdn(&self, fqdn: &str) -> Result<(String, String), AppError> {
        if self.cache.read().await.is_empty() {
            if let Err(err) = self.refresh().await {
                tracing::warn!("Public suffix list unavailable, using naive split: {}", err);
                return naive_split(fqdn).ok_or_else(|| unknown_suffix(fqdn));
            }
        }

        self.cache
            .read()
            .await
            .split(fqdn)
            .ok_or_else(|| unknown_suffix(fqdn))
    }
}

fn unknown_suffix(fqdn: &str) -> AppError {
    let tld = fqdn.rsplit('.').next().unwrap_or(fqdn).to_string();
    DomainError::UnknownPublicSuffix { tld }.into()
}

fn naive_split(fqdn: &str) -> Option<(String, String)> {
    let fqdn = fqdn.trim().trim_end_matches('.').to_lowercase();
    let (name, tld) = fqdn.rsplit_once('.')?;
    if name.is_empty() || tld.is_empty() {
        return None;
    }
    Some((name.to_string(), tld.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
// ===BEGIN ICANN DOMAINS===
com
net
uk
co.uk
*.ck
!www.ck
";

    #[test]
    fn parses_rules_wildcards_and_exceptions() {
        let list = SuffixList::parse(SAMPLE);

        assert!(list.is_suffix("com"));
        assert!(list.is_suffix("co.uk"));
        assert!(list.is_suffix("anything.ck"));
        assert!(!list.is_suffix("www.ck"));
        assert!(!list.is_suffix("example"));
    }

    #[test]
    fn splits_on_longest_suffix() {
        let list = SuffixList::parse(SAMPLE);

        assert_eq!(
            list.split("example.co.uk").unwrap(),
            ("example".to_string(), "co.uk".to_string())
        );
        assert_eq!(
            list.split("deep.example.com").unwrap(),
            ("deep.example".to_string(), "com".to_string())
        );
        assert_eq!(
            list.split("Example.COM.").unwrap(),
            ("example".to_string(), "com".to_string())
        );
    }

    #[test]
    fn rejects_unknown_or_bare_suffixes() {
        let list = SuffixList::parse(SAMPLE);

        assert!(list.split("example.invalid-tld").is_none());
        assert!(list.split("com").is_none());
        assert!(list.split("").is_none());
    }
}
