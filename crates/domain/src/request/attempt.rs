//! Per-attempt request wrapper

use super::RequestSpec;

/// A request descriptor paired with its dispatch count.
///
/// The authenticated client's recovery protocol allows exactly one
/// retry per original request. Instead of marking the descriptor with
/// a mutable flag, each dispatch is represented by an immutable
/// `Attempt`; the only way to obtain a retry is to consume the first
/// attempt, so a third dispatch of the same request cannot be
/// expressed.
#[derive(Debug, Clone)]
pub struct Attempt {
    request: RequestSpec,
    number: u8,
}

impl Attempt {
    /// Wraps a descriptor as its first attempt.
    #[must_use]
    pub const fn first(request: RequestSpec) -> Self {
        Self { request, number: 1 }
    }

    /// Consumes a first attempt, producing the single permitted retry.
    #[must_use]
    pub fn into_retry(self) -> Self {
        Self {
            request: self.request,
            number: 2,
        }
    }

    /// Returns the underlying request descriptor.
    #[must_use]
    pub const fn request(&self) -> &RequestSpec {
        &self.request
    }

    /// Returns true if this attempt is the retry.
    #[must_use]
    pub const fn is_retry(&self) -> bool {
        self.number > 1
    }

    /// Returns the 1-based attempt number.
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }
}
