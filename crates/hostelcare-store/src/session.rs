//! Session state.
//!
//! The persisted current-user record survives restarts; a [`Session`] is the
//! in-process handle that operations needing an acting identity take as an
//! argument. Sessions are only minted by the repository (login, signup or
//! resuming the persisted record) and end with [`Repository::logout`].

use tracing::{debug, info};

use hostelcare_shared::constants::KEY_CURRENT_USER;
use hostelcare_shared::error::Result;
use hostelcare_shared::{HostelError, Role, UserId};

use crate::models::User;
use crate::repository::Repository;

/// The logged-in identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    pub(crate) fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role()
    }

    pub fn is_warden(&self) -> bool {
        self.role() == Role::Warden
    }

    /// Fails with [`HostelError::Forbidden`] unless this is a warden session.
    pub fn require_warden(&self) -> Result<()> {
        if self.is_warden() {
            Ok(())
        } else {
            Err(HostelError::Forbidden("warden access required".into()))
        }
    }
}

impl Repository {
    /// Overwrite the stored current user.
    pub async fn set_current_user(&self, user: &User) -> Result<()> {
        if self.store().set(KEY_CURRENT_USER, user).await {
            debug!(user = %user.id, "current user stored");
            Ok(())
        } else {
            Err(HostelError::StorageFailure(
                "could not store current user".into(),
            ))
        }
    }

    pub async fn get_current_user(&self) -> Option<User> {
        self.store().get(KEY_CURRENT_USER).await
    }

    pub async fn clear_current_user(&self) -> Result<()> {
        if self.store().remove(KEY_CURRENT_USER).await {
            Ok(())
        } else {
            Err(HostelError::StorageFailure(
                "could not clear current user".into(),
            ))
        }
    }

    /// Persist `user` as the current user and hand back a session for it.
    pub(crate) async fn start_session(&self, user: User) -> Result<Session> {
        self.set_current_user(&user).await?;
        info!(user = %user.id, role = %user.role(), "session started");
        Ok(Session::new(user))
    }

    /// Rebuild the session from the persisted record, if any.
    pub async fn resume_session(&self) -> Option<Session> {
        self.get_current_user().await.map(Session::new)
    }

    /// End `session` and forget the persisted current user.
    pub async fn logout(&self, session: Session) -> Result<()> {
        self.clear_current_user().await?;
        info!(user = %session.user_id(), "session ended");
        Ok(())
    }
}
