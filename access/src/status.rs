//! Authentication status as reported by the auth source.

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;

/// Snapshot of the auth source: the signed-in principal, if any, and whether
/// resolution is still in flight.
///
/// `U` is opaque here. Policies only ever ask whether a user is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthStatus<U> {
    pub user: Option<U>,
    pub loading: bool,
}

impl<U> AuthStatus<U> {
    /// Status before the auth source has answered.
    #[must_use]
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    /// Status once the auth source has answered.
    #[must_use]
    pub fn resolved(user: Option<U>) -> Self {
        Self { user, loading: false }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.loading
    }

    /// True only when resolution finished with a principal.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }
}

impl<U> Default for AuthStatus<U> {
    fn default() -> Self {
        Self::pending()
    }
}
