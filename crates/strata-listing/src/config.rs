use serde::{Deserialize, Serialize};

use crate::error::{ListingError, ListingResult};

/// Largest page a share listing returns in one call.
pub const MAX_PAGE_SIZE: usize = 5000;

/// Configuration for a container listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Maximum number of containers per page.
    pub page_size: usize,
    /// Only list containers whose name starts with this prefix.
    pub prefix: Option<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            prefix: None,
        }
    }
}

impl ListingConfig {
    /// A configuration with the given page size and no prefix.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }

    /// Reject configurations that could never make progress.
    pub fn validate(&self) -> ListingResult<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ListingError::InvalidConfig(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        Ok(())
    }
}
