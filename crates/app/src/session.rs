//! Session Store: accounts and the signed-in user.
//!
//! Passwords are stored as Argon2id hashes and emails in normalized form.
//! At most one user is signed in at a time.

use staydesk_core::error::CoreError;
use staydesk_core::user::{
    normalize_email, validate_email, validate_password_strength, validate_sign_up, User,
};
use staydesk_db::models::user::CreateUser;
use staydesk_db::repositories::UserRepo;
use staydesk_db::{is_unique_violation, DbPool};

use crate::auth::password::{hash_password, verify_password, verify_unknown_account};
use crate::error::{AppError, AppResult};

pub struct SessionStore {
    pub(crate) pool: DbPool,
    pub(crate) current: Option<User>,
    pub(crate) password_min_length: usize,
}

impl SessionStore {
    pub fn new(pool: DbPool, password_min_length: usize) -> Self {
        Self {
            pool,
            current: None,
            password_min_length,
        }
    }

    /// The signed-in user, if any.
    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// The signed-in user, or [`CoreError::NotAuthenticated`].
    pub fn require_user(&self) -> Result<&User, CoreError> {
        self.current.as_ref().ok_or(CoreError::NotAuthenticated)
    }

    /// Register a new account and sign it in.
    ///
    /// Fails with [`CoreError::DuplicateUser`] when the normalized email is
    /// already registered, in which case nothing is stored.
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> AppResult<&User> {
        validate_sign_up(email, password, full_name, self.password_min_length)?;
        let email = normalize_email(email);

        if UserRepo::find_by_email(&self.pool, &email).await?.is_some() {
            return Err(CoreError::DuplicateUser.into());
        }

        let input = CreateUser {
            email,
            password_hash: hash_password(password)?,
            full_name: full_name.trim().to_string(),
        };
        let user = UserRepo::create(&self.pool, &input)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::from(CoreError::DuplicateUser)
                } else {
                    AppError::from(e)
                }
            })?;

        tracing::info!(user_id = %user.id, "User signed up");
        Ok(&*self.current.insert(user))
    }

    /// Sign in with email and password.
    ///
    /// Unknown emails and wrong passwords both fail with
    /// [`CoreError::InvalidCredentials`].
    pub async fn sign_in(&mut self, email: &str, password: &str) -> AppResult<&User> {
        validate_email(email)?;
        validate_password_strength(password, self.password_min_length)?;
        let email = normalize_email(email);

        let Some(user) = UserRepo::find_by_email(&self.pool, &email).await? else {
            verify_unknown_account(password);
            tracing::debug!("Sign-in for unknown email");
            return Err(CoreError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Sign-in with wrong password");
            return Err(CoreError::InvalidCredentials.into());
        }

        tracing::info!(user_id = %user.id, "User signed in");
        Ok(&*self.current.insert(user))
    }

    /// Clear the current user. Signing out when nobody is signed in is a no-op.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "User signed out");
        }
    }
}
