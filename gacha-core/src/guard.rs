//! Route guard decisions derived from the session state.

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Authenticated,
    Unauthenticated,
}

/// What a guarded route should do for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Placeholder,
    RedirectToLogin,
    RedirectToDashboard,
    Render,
}

impl GuardState {
    /// Decision for a protected route.
    #[must_use]
    pub const fn protected(self) -> GuardDecision {
        match self {
            Self::Loading => GuardDecision::Placeholder,
            Self::Unauthenticated => GuardDecision::RedirectToLogin,
            Self::Authenticated => GuardDecision::Render,
        }
    }

    /// Decision for the login route: signed-in players go straight to the dashboard.
    #[must_use]
    pub const fn public_only(self) -> GuardDecision {
        match self {
            Self::Loading => GuardDecision::Placeholder,
            Self::Unauthenticated => GuardDecision::Render,
            Self::Authenticated => GuardDecision::RedirectToDashboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_routes_follow_state() {
        assert_eq!(GuardState::Loading.protected(), GuardDecision::Placeholder);
        assert_eq!(
            GuardState::Unauthenticated.protected(),
            GuardDecision::RedirectToLogin
        );
        assert_eq!(GuardState::Authenticated.protected(), GuardDecision::Render);
    }

    #[test]
    fn login_route_is_inverse() {
        assert_eq!(
            GuardState::Authenticated.public_only(),
            GuardDecision::RedirectToDashboard
        );
        assert_eq!(GuardState::Unauthenticated.public_only(), GuardDecision::Render);
        assert_eq!(GuardState::Loading.public_only(), GuardDecision::Placeholder);
    }
}
