//! # Retry policy for resubscribing failed sources.
//!
//! [`RetryPolicy`] controls how many times the `retry` operator resubscribes
//! its source after an error before giving up and forwarding the error
//! downstream.
//!
//! - [`RetryPolicy::Unlimited`] resubscribe forever (default).
//! - [`RetryPolicy::Limit`] resubscribe at most `n` additional times; the
//!   budget is checked **before** it is decremented, so `Limit(0)` forwards
//!   the very first error without ever resubscribing.

/// Policy controlling how many resubscriptions `retry` performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Resubscribe on every error, without bound (default).
    Unlimited,
    /// Resubscribe at most this many additional times, then forward the
    /// error downstream.
    Limit(u64),
}

impl Default for RetryPolicy {
    /// Returns [`RetryPolicy::Unlimited`].
    fn default() -> Self {
        RetryPolicy::Unlimited
    }
}

impl RetryPolicy {
    /// Remaining-resubscription budget: `None` means unbounded.
    pub(crate) fn budget(&self) -> Option<u64> {
        match self {
            RetryPolicy::Unlimited => None,
            RetryPolicy::Limit(n) => Some(*n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unlimited() {
        assert_eq!(RetryPolicy::default(), RetryPolicy::Unlimited);
        assert_eq!(RetryPolicy::default().budget(), None);
    }

    #[test]
    fn test_limit_maps_to_budget() {
        assert_eq!(RetryPolicy::Limit(0).budget(), Some(0));
        assert_eq!(RetryPolicy::Limit(5).budget(), Some(5));
    }
}
