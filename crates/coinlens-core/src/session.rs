//! Session snapshot types.
//!
//! The session manager in `coinlens-api` owns the live state machine; these
//! types are the published snapshots every consumer (route gate, views)
//! reads. A snapshot is always complete - there is no partially-updated
//! state to observe.

use serde::{Deserialize, Serialize};

use crate::types::{Role, User};

/// Who the current session belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Identity {
    /// No authenticated user.
    Anonymous,
    /// An authenticated user.
    User(User),
}

impl Identity {
    /// Returns true when no user is signed in.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Anonymous => None,
            Identity::User(user) => Some(user),
        }
    }

    /// The signed-in user's role, if any.
    pub fn role(&self) -> Option<Role> {
        self.user().map(|user| user.role)
    }
}

/// The session state as observed by consumers.
///
/// `Ready` is reached once per bootstrap; from then on the contained
/// identity is the single source of truth for authorization until the next
/// login/logout transition replaces the snapshot wholesale.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionSnapshot {
    /// Bootstrap has not started.
    #[default]
    Uninitialized,
    /// Bootstrap (or a login) is in flight.
    Loading,
    /// The session is resolved.
    Ready(Identity),
}

impl SessionSnapshot {
    /// Returns true once the session is resolved.
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionSnapshot::Ready(_))
    }

    /// The resolved identity, if ready.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionSnapshot::Ready(identity) => Some(identity),
            _ => None,
        }
    }

    /// The signed-in user, if ready and authenticated.
    pub fn user(&self) -> Option<&User> {
        self.identity().and_then(Identity::user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn member() -> User {
        User {
            id: UserId(1),
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            role: Role::Member,
        }
    }

    #[test]
    fn identity_accessors() {
        assert!(Identity::Anonymous.is_anonymous());
        assert_eq!(Identity::Anonymous.role(), None);

        let identity = Identity::User(member());
        assert!(!identity.is_anonymous());
        assert_eq!(identity.role(), Some(Role::Member));
    }

    #[test]
    fn snapshot_accessors() {
        assert!(!SessionSnapshot::Uninitialized.is_ready());
        assert!(!SessionSnapshot::Loading.is_ready());
        assert!(SessionSnapshot::Loading.identity().is_none());

        let ready = SessionSnapshot::Ready(Identity::User(member()));
        assert!(ready.is_ready());
        assert_eq!(ready.user().unwrap().name, "Bob");
    }
}
