//! Parsing of account root URLs.
//!
//! A root URL addresses a storage account and may carry one extra path
//! segment naming a container. For account-level enumeration that segment
//! is not a destination but a wildcard pattern over container names, so parsing splits
//! it off and keeps the account-only URL.
//!
//! Two addressing styles are recognised:
//!
//! - host style: `https://myaccount.file.core.windows.net/<container>/...`
//! - IP style (emulators, private endpoints):
//!   `http://127.0.0.1:10000/<account>/<container>/...`

use std::fmt;

use percent_encoding::percent_decode_str;
use url::{Host, Url};

use crate::error::LocationError;

/// A storage account root, split from an optional container-name pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountLocation {
    account_url: Url,
    account_name: Option<String>,
    container_pattern: Option<String>,
    ip_style: bool,
}

impl AccountLocation {
    /// Parse a root URL.
    ///
    /// Only the container segment is interpreted; deeper path segments are
    /// dropped, the query string (credentials) is preserved and the fragment
    /// is discarded. No I/O is performed.
    pub fn parse(raw: &str) -> Result<Self, LocationError> {
        let url = Url::parse(raw).map_err(|e| LocationError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_url(url)
    }

    /// Split an already-parsed URL.
    pub fn from_url(url: Url) -> Result<Self, LocationError> {
        let raw = url.as_str().to_string();
        if url.cannot_be_a_base() {
            return Err(LocationError::CannotBeABase(raw));
        }
        let host = url.host().ok_or_else(|| LocationError::MissingHost(raw.clone()))?;
        let ip_style = matches!(host, Host::Ipv4(_) | Host::Ipv6(_));
        let host_label = match host {
            Host::Domain(domain) => domain.split('.').next().map(str::to_string),
            Host::Ipv4(_) | Host::Ipv6(_) => None,
        };

        let segments: Vec<String> = url
            .path_segments()
            .map(|segs| {
                segs.filter(|s| !s.is_empty())
                    .map(|s| decode_segment(s, &raw))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        let mut segments = segments.into_iter();
        let account_name = if ip_style {
            segments.next()
        } else {
            host_label.filter(|label| !label.is_empty())
        };
        let container_pattern = segments.next();

        let mut account_url = url;
        account_url.set_fragment(None);
        {
            let mut path = account_url
                .path_segments_mut()
                .map_err(|()| LocationError::CannotBeABase(raw.clone()))?;
            path.clear();
            if ip_style {
                if let Some(account) = &account_name {
                    path.push(account);
                }
            }
        }

        Ok(Self {
            account_url,
            account_name,
            container_pattern,
            ip_style,
        })
    }

    /// The URL addressing the account only, without any container segment.
    pub fn account_url(&self) -> &Url {
        &self.account_url
    }

    /// The account name, when it can be derived from the URL.
    pub fn account_name(&self) -> Option<&str> {
        self.account_name.as_deref()
    }

    /// The container-name pattern split off the root URL, if one was given.
    pub fn container_pattern(&self) -> Option<&str> {
        self.container_pattern.as_deref()
    }

    /// Whether the account is addressed IP style (account name in the path).
    pub fn is_ip_style(&self) -> bool {
        self.ip_style
    }

    /// URL of a single container under this account.
    ///
    /// The name is percent-encoded as one path segment and the account's
    /// query string is carried over.
    pub fn container_url(&self, container_name: &str) -> Result<Url, LocationError> {
        let mut url = self.account_url.clone();
        url.path_segments_mut()
            .map_err(|()| LocationError::CannotBeABase(self.account_url.to_string()))?
            .pop_if_empty()
            .push(container_name);
        Ok(url)
    }
}

impl fmt::Display for AccountLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.account_url)
    }
}

/// Name of the container a container URL addresses: its last non-empty
/// path segment, percent-decoded.
pub fn container_name_from_url(url: &Url) -> Result<Option<String>, LocationError> {
    let raw = url.as_str();
    url.path_segments()
        .and_then(|segs| segs.filter(|s| !s.is_empty()).last())
        .map(|s| decode_segment(s, raw))
        .transpose()
}

fn decode_segment(segment: &str, raw: &str) -> Result<String, LocationError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| LocationError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("path segment {segment:?} is not valid UTF-8: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_style_without_container() {
        let loc = AccountLocation::parse("https://acct.file.core.windows.net/").unwrap();
        assert_eq!(loc.container_pattern(), None);
        assert_eq!(loc.account_name(), Some("acct"));
        assert!(!loc.is_ip_style());
        assert_eq!(loc.account_url().as_str(), "https://acct.file.core.windows.net/");
    }

    #[test]
    fn host_style_container_becomes_pattern() {
        let loc =
            AccountLocation::parse("https://acct.file.core.windows.net/log*?sv=2020&sig=abc")
                .unwrap();
        assert_eq!(loc.container_pattern(), Some("log*"));
        assert_eq!(
            loc.account_url().as_str(),
            "https://acct.file.core.windows.net/?sv=2020&sig=abc"
        );
    }

    #[test]
    fn deeper_segments_and_fragment_are_dropped() {
        let loc =
            AccountLocation::parse("https://acct.file.core.windows.net/share/dir/file.txt#frag")
                .unwrap();
        assert_eq!(loc.container_pattern(), Some("share"));
        assert_eq!(loc.account_url().as_str(), "https://acct.file.core.windows.net/");
    }

    #[test]
    fn percent_encoded_pattern_is_decoded() {
        let loc = AccountLocation::parse("https://acct.file.core.windows.net/%5Bab%5D*").unwrap();
        assert_eq!(loc.container_pattern(), Some("[ab]*"));
    }

    #[test]
    fn ip_style_keeps_account_segment() {
        let loc = AccountLocation::parse("http://127.0.0.1:10000/devstore/images?sig=x").unwrap();
        assert!(loc.is_ip_style());
        assert_eq!(loc.account_name(), Some("devstore"));
        assert_eq!(loc.container_pattern(), Some("images"));
        assert_eq!(loc.account_url().as_str(), "http://127.0.0.1:10000/devstore?sig=x");
    }

    #[test]
    fn container_url_preserves_query() {
        let loc = AccountLocation::parse("https://acct.file.core.windows.net/?sig=abc").unwrap();
        let url = loc.container_url("logs").unwrap();
        assert_eq!(url.as_str(), "https://acct.file.core.windows.net/logs?sig=abc");
    }

    #[test]
    fn container_url_ip_style() {
        let loc = AccountLocation::parse("http://127.0.0.1:10000/devstore").unwrap();
        let url = loc.container_url("logs").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:10000/devstore/logs");
    }

    #[test]
    fn container_url_encodes_name() {
        let loc = AccountLocation::parse("https://acct.file.core.windows.net").unwrap();
        let url = loc.container_url("a b").unwrap();
        assert_eq!(url.as_str(), "https://acct.file.core.windows.net/a%20b");
    }

    #[test]
    fn container_name_round_trips_through_url() {
        let loc = AccountLocation::parse("http://127.0.0.1:10000/devstore").unwrap();
        let url = loc.container_url("my share").unwrap();
        assert_eq!(container_name_from_url(&url).unwrap().as_deref(), Some("my share"));
        let account = container_name_from_url(loc.account_url()).unwrap();
        assert_eq!(account.as_deref(), Some("devstore"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            AccountLocation::parse("not a url"),
            Err(LocationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn rejects_url_without_host() {
        assert!(AccountLocation::parse("file:///tmp/share").is_err());
    }
}
