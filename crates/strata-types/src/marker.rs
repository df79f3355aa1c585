use serde::{Deserialize, Serialize};

/// Continuation state of a paged listing.
///
/// A fresh marker has not been sent to the service yet and therefore always
/// reports more work. Once a response has been seen, the marker holds the
/// service's continuation token; an empty token ends the listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    val: Option<String>,
}

impl Marker {
    /// The initial marker, before any page has been fetched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the marker that follows a response.
    ///
    /// An absent token and an empty token both mean the listing is complete.
    pub fn from_next(next: Option<String>) -> Self {
        Self {
            val: Some(next.unwrap_or_default()),
        }
    }

    /// Returns `true` while another page may exist.
    pub fn not_done(&self) -> bool {
        match &self.val {
            None => true,
            Some(token) => !token.is_empty(),
        }
    }

    /// The continuation token to send with the next request, if any.
    ///
    /// Returns `None` for the initial marker and for a finished listing.
    pub fn token(&self) -> Option<&str> {
        self.val.as_deref().filter(|t| !t.is_empty())
    }

    /// Returns `true` if no response has been applied to this marker yet.
    pub fn is_initial(&self) -> bool {
        self.val.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_marker_has_more() {
        let m = Marker::new();
        assert!(m.not_done());
        assert!(m.is_initial());
        assert_eq!(m.token(), None);
    }

    #[test]
    fn empty_next_marker_is_done() {
        assert!(!Marker::from_next(Some(String::new())).not_done());
        assert!(!Marker::from_next(None).not_done());
    }

    #[test]
    fn non_empty_next_marker_continues() {
        let m = Marker::from_next(Some("share-0042".into()));
        assert!(m.not_done());
        assert!(!m.is_initial());
        assert_eq!(m.token(), Some("share-0042"));
    }
}
