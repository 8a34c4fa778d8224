//! Profile maintenance for the signed-in user.

use staydesk_core::error::CoreError;
use staydesk_core::user::{
    confirm_account_deletion, normalize_email, validate_new_password, validate_profile_update,
    ProfileUpdate, User,
};
use staydesk_db::models::user::UpdateUser;
use staydesk_db::repositories::UserRepo;
use staydesk_db::is_unique_violation;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::session::SessionStore;

impl SessionStore {
    /// Apply the present fields of `update` to the signed-in user.
    ///
    /// A changed email must not belong to another account.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> AppResult<&User> {
        let user_id = self.require_user()?.id;
        validate_profile_update(&update)?;

        let email = update.email.as_deref().map(normalize_email);
        if let Some(email) = &email {
            if let Some(owner) = UserRepo::find_by_email(&self.pool, email).await? {
                if owner.id != user_id {
                    return Err(CoreError::DuplicateUser.into());
                }
            }
        }

        let input = UpdateUser {
            email,
            full_name: update.full_name.map(|n| n.trim().to_string()),
            phone: update.phone,
            bio: update.bio,
        };
        let updated = UserRepo::update(&self.pool, user_id, &input)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::from(CoreError::DuplicateUser)
                } else {
                    AppError::from(e)
                }
            })?
            .ok_or_else(|| CoreError::NotFound {
                entity: "user",
                id: user_id.to_string(),
            })?;

        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(&*self.current.insert(updated))
    }

    /// Replace the password after checking the current one.
    pub async fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> AppResult<()> {
        let user = self.require_user()?;
        if !verify_password(current_password, &user.password_hash)? {
            return Err(CoreError::InvalidCredentials.into());
        }
        validate_new_password(new_password, confirmation, self.password_min_length)?;

        let user_id = user.id;
        let password_hash = hash_password(new_password)?;
        if !UserRepo::update_password(&self.pool, user_id, &password_hash).await? {
            return Err(CoreError::NotFound {
                entity: "user",
                id: user_id.to_string(),
            }
            .into());
        }
        if let Some(current) = self.current.as_mut() {
            current.password_hash = password_hash;
        }

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Remove the signed-in account and all of its bookings, then sign out.
    ///
    /// `confirmation` must be the literal `DELETE`.
    pub async fn delete_account(&mut self, confirmation: &str) -> AppResult<()> {
        let user_id = self.require_user()?.id;
        confirm_account_deletion(confirmation)?;

        UserRepo::delete(&self.pool, user_id).await?;
        self.current = None;

        tracing::info!(user_id = %user_id, "Account deleted");
        Ok(())
    }
}
