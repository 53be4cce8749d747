//! Options controlling compression, in the spirit of the teacher's own
//! `Options`/`STD_OPTIONS` pair, but validated at construction since these
//! values are user-tunable from the CLI rather than fixed per format.

use crate::Error;

/// Tunables for the LZ77 encoder (spec.md §4.B).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressConfig {
    /// Minimum match length worth encoding as a back-reference.
    pub min_match_len: u8,
    /// Maximum match length a back-reference can express.
    pub max_match_len: u8,
    /// Size of the sliding search window, in bytes behind the cursor.
    pub max_search_buf_len: u16,
}

impl CompressConfig {
    pub fn new(
        min_match_len: u8,
        max_match_len: u8,
        max_search_buf_len: u16,
    ) -> Result<Self, Error> {
        if min_match_len > max_match_len {
            return Err(Error::InvalidConfiguration(format!(
                "min_match_len ({min_match_len}) exceeds max_match_len ({max_match_len})"
            )));
        }
        if max_match_len == 0 && min_match_len > 0 {
            return Err(Error::InvalidConfiguration(
                "max_match_len is 0 but min_match_len is nonzero".into(),
            ));
        }
        Ok(Self {
            min_match_len,
            max_match_len,
            max_search_buf_len,
        })
    }

    /// Effective minimum match length: a 0 means "any non-empty match".
    pub(crate) fn effective_min(&self) -> usize {
        self.min_match_len.max(1) as usize
    }

    /// Effective maximum match length: a 0 means "no artificial cap"
    /// (still bounded at 255 by the token model).
    pub(crate) fn effective_max(&self) -> usize {
        if self.max_match_len == 0 {
            255
        } else {
            self.max_match_len as usize
        }
    }
}

impl Default for CompressConfig {
    /// Matches the CLI defaults in spec.md §6: `min-match=4`,
    /// `max-match=255`, `search-size=4096`.
    fn default() -> Self {
        Self {
            min_match_len: 4,
            max_match_len: 255,
            max_search_buf_len: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(CompressConfig::new(4, 255, 4096).is_ok());
    }

    #[test]
    fn min_greater_than_max_is_rejected() {
        assert!(CompressConfig::new(5, 4, 100).is_err());
    }

    #[test]
    fn zero_max_with_nonzero_min_is_rejected() {
        assert!(CompressConfig::new(1, 0, 100).is_err());
    }

    #[test]
    fn zero_max_and_zero_min_is_accepted() {
        assert!(CompressConfig::new(0, 0, 100).is_ok());
    }
}
