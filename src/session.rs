//! Persistence of the signed-in user under [`crate::USER_KEY`].
//!
//! Independent from the client snapshot: signing in or out never touches the
//! clients key. Credential checks belong to the caller.

use crate::USER_KEY;
use crate::domain::user::User;
use crate::repository::KeyValueStorage;
use crate::repository::errors::RepositoryResult;

pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The persisted user, if any.
    pub fn current_user(&self) -> RepositoryResult<Option<User>> {
        match self.storage.load(USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn sign_in(&self, user: &User) -> RepositoryResult<()> {
        self.storage.save(USER_KEY, &serde_json::to_string(user)?)?;
        log::info!("User {} signed in as {}", user.email, user.role);
        Ok(())
    }

    pub fn sign_out(&self) -> RepositoryResult<()> {
        self.storage.remove(USER_KEY)
    }
}
