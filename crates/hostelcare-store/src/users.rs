//! Signup and login.

use chrono::Utc;
use tracing::{error, info, warn};

use hostelcare_shared::constants::{DEMO_WARDEN_ID, DEMO_WARDEN_NAME, KEY_USERS};
use hostelcare_shared::error::Result;
use hostelcare_shared::{ids, validation, HostelError, Role, UserId, ValidationError};

use crate::models::{NewUser, User, UserProfile};
use crate::repository::Repository;
use crate::session::Session;

impl Repository {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Register a new account and log it in.
    ///
    /// Emails are compared case-sensitively. On any failure the user list is
    /// left as it was.
    pub async fn register_user(&self, candidate: NewUser) -> Result<Session> {
        validate_candidate(&candidate)?;

        let mut users: Vec<User> = self.load_list(KEY_USERS).await?;
        if users.iter().any(|u| u.email == candidate.email) {
            warn!(email = %candidate.email, "signup rejected: email already registered");
            return Err(HostelError::DuplicateEmail);
        }

        // Two signups inside the same millisecond would otherwise share an id.
        let role = candidate.profile.role();
        let mut millis = Utc::now().timestamp_millis();
        let id = loop {
            let id = ids::user_id_at(role, millis);
            if !users.iter().any(|u| u.id == id) {
                break id;
            }
            millis += 1;
        };

        let user = User {
            id,
            email: candidate.email,
            password: candidate.password,
            name: candidate.name.trim().to_string(),
            profile: candidate.profile,
        };
        users.push(user.clone());
        self.save_list(KEY_USERS, &users).await?;

        let (id, role) = (user.id.clone(), user.role());
        match self.start_session(user).await {
            Ok(session) => {
                info!(user = %id, %role, "user registered");
                Ok(session)
            }
            Err(e) => {
                // Roll the new account back so a retry is not a duplicate.
                users.pop();
                if self.save_list(KEY_USERS, &users).await.is_err() {
                    error!(user = %id, "could not roll back failed signup");
                }
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Find the user matching all three of email, password and role.
    pub async fn authenticate(&self, email: &str, password: &str, role: Role) -> Result<User> {
        let users: Vec<User> = self.load_list(KEY_USERS).await?;
        users
            .into_iter()
            .find(|u| u.email == email && u.password == password && u.role() == role)
            .ok_or(HostelError::AuthenticationFailed)
    }

    /// Authenticate and start a session.
    ///
    /// With [`demo_warden_login`](crate::RepositoryConfig::demo_warden_login)
    /// enabled, warden logins skip the credential check entirely and get the
    /// built-in demo warden identity.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> Result<Session> {
        validation::require("Email", email)?;
        if password.is_empty() {
            return Err(ValidationError::MissingField("Password").into());
        }

        let user = if role == Role::Warden && self.config().demo_warden_login {
            warn!(email, "demo warden login, credentials not checked");
            demo_warden(email)
        } else {
            self.authenticate(email, password, role).await.map_err(|e| {
                if e == HostelError::AuthenticationFailed {
                    warn!(email, %role, "login rejected");
                }
                e
            })?
        };

        self.start_session(user).await
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.read_list(KEY_USERS).await
    }
}

fn validate_candidate(candidate: &NewUser) -> std::result::Result<(), ValidationError> {
    validation::validate_email(&candidate.email)?;
    validation::validate_password(&candidate.password)?;
    validation::validate_name(&candidate.name)?;
    if let UserProfile::Student { room_number, .. } = &candidate.profile {
        validation::require("Room number", room_number)?;
    }
    Ok(())
}

fn demo_warden(email: &str) -> User {
    User {
        id: UserId::from(DEMO_WARDEN_ID),
        email: email.to_string(),
        password: String::new(),
        name: DEMO_WARDEN_NAME.to_string(),
        profile: UserProfile::Warden,
    }
}
