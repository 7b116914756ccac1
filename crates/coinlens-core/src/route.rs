//! Route authorization gate.
//!
//! A pure decision function over the current session snapshot and the
//! requirement declared by the requested route. It holds no state of its
//! own and must be re-evaluated on every navigation; the session snapshot
//! is the only input that changes between calls.

use crate::session::{Identity, SessionSnapshot};
use crate::types::Role;

/// The access requirement a route declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteRequirement {
    /// Open to everyone (market listings, news feed).
    Public,
    /// Only meaningful while signed out (login, register); signed-in users
    /// are sent to their home instead.
    GuestOnly,
    /// Any signed-in user.
    Authenticated,
    /// Signed-in users with the given role.
    Role(Role),
}

/// The gate's decision for a navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the route.
    Allow,
    /// The session is not resolved yet; render a pending placeholder and
    /// re-evaluate once it is.
    Defer,
    /// Send the visitor to the login page. Not an error - just the gate.
    RedirectToLogin,
    /// Send the signed-in user to their role's home route.
    RedirectToHome(Role),
}

/// Decide whether the current session may visit a route.
///
/// An authenticated user is never redirected to login; a role mismatch
/// sends them to their own home silently.
pub fn authorize(session: &SessionSnapshot, required: RouteRequirement) -> RouteDecision {
    let identity = match session {
        SessionSnapshot::Uninitialized | SessionSnapshot::Loading => return RouteDecision::Defer,
        SessionSnapshot::Ready(identity) => identity,
    };

    match (identity, required) {
        (_, RouteRequirement::Public) => RouteDecision::Allow,

        (Identity::Anonymous, RouteRequirement::GuestOnly) => RouteDecision::Allow,
        (Identity::Anonymous, _) => RouteDecision::RedirectToLogin,

        (Identity::User(user), RouteRequirement::GuestOnly) => {
            RouteDecision::RedirectToHome(user.role)
        }
        (Identity::User(_), RouteRequirement::Authenticated) => RouteDecision::Allow,
        (Identity::User(user), RouteRequirement::Role(required)) => {
            if user.role == required {
                RouteDecision::Allow
            } else {
                RouteDecision::RedirectToHome(user.role)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{User, UserId};

    fn user(role: Role) -> SessionSnapshot {
        SessionSnapshot::Ready(Identity::User(User {
            id: UserId(1),
            name: "test".to_string(),
            email: "test@example.com".to_string(),
            role,
        }))
    }

    fn anonymous() -> SessionSnapshot {
        SessionSnapshot::Ready(Identity::Anonymous)
    }

    const ALL_REQUIREMENTS: [RouteRequirement; 5] = [
        RouteRequirement::Public,
        RouteRequirement::GuestOnly,
        RouteRequirement::Authenticated,
        RouteRequirement::Role(Role::Admin),
        RouteRequirement::Role(Role::Member),
    ];

    #[test]
    fn unresolved_session_defers_everything() {
        for snapshot in [SessionSnapshot::Uninitialized, SessionSnapshot::Loading] {
            for required in ALL_REQUIREMENTS {
                assert_eq!(authorize(&snapshot, required), RouteDecision::Defer);
            }
        }
    }

    #[test]
    fn anonymous_decisions() {
        let session = anonymous();
        assert_eq!(
            authorize(&session, RouteRequirement::Public),
            RouteDecision::Allow
        );
        assert_eq!(
            authorize(&session, RouteRequirement::GuestOnly),
            RouteDecision::Allow
        );
        assert_eq!(
            authorize(&session, RouteRequirement::Authenticated),
            RouteDecision::RedirectToLogin
        );
        assert_eq!(
            authorize(&session, RouteRequirement::Role(Role::Admin)),
            RouteDecision::RedirectToLogin
        );
        assert_eq!(
            authorize(&session, RouteRequirement::Role(Role::Member)),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn member_decisions() {
        let session = user(Role::Member);
        assert_eq!(
            authorize(&session, RouteRequirement::Public),
            RouteDecision::Allow
        );
        assert_eq!(
            authorize(&session, RouteRequirement::GuestOnly),
            RouteDecision::RedirectToHome(Role::Member)
        );
        assert_eq!(
            authorize(&session, RouteRequirement::Authenticated),
            RouteDecision::Allow
        );
        // A member never reaches the admin area, and is never bounced to
        // login for trying - they are already authenticated.
        assert_eq!(
            authorize(&session, RouteRequirement::Role(Role::Admin)),
            RouteDecision::RedirectToHome(Role::Member)
        );
        assert_eq!(
            authorize(&session, RouteRequirement::Role(Role::Member)),
            RouteDecision::Allow
        );
    }

    #[test]
    fn admin_decisions() {
        let session = user(Role::Admin);
        assert_eq!(
            authorize(&session, RouteRequirement::Public),
            RouteDecision::Allow
        );
        assert_eq!(
            authorize(&session, RouteRequirement::GuestOnly),
            RouteDecision::RedirectToHome(Role::Admin)
        );
        assert_eq!(
            authorize(&session, RouteRequirement::Authenticated),
            RouteDecision::Allow
        );
        assert_eq!(
            authorize(&session, RouteRequirement::Role(Role::Admin)),
            RouteDecision::Allow
        );
        assert_eq!(
            authorize(&session, RouteRequirement::Role(Role::Member)),
            RouteDecision::RedirectToHome(Role::Admin)
        );
    }

    #[test]
    fn admin_visiting_login_goes_to_admin_home() {
        let decision = authorize(&user(Role::Admin), RouteRequirement::GuestOnly);
        match decision {
            RouteDecision::RedirectToHome(role) => assert_eq!(role.home_path(), "/admin"),
            other => panic!("expected redirect to home, got {:?}", other),
        }
    }
}
