use std::sync::Arc;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, password_hash};
use rand_core::OsRng;

#[derive(Debug, Clone)]
pub struct Argon2Hash(Argon2<'static>);

#[derive(Clone)]
pub struct AuthService {
    hasher: Arc<Argon2Hash>,
}

impl AuthService {
    pub fn new() -> Self {
        let hash = Argon2Hash(Argon2::default());

        Self {
            hasher: Arc::new(hash),
        }
    }

    /// Produces an argon2 PHC string with a fresh salt.
    pub fn hash(&self, password: &str) -> Result<String, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.hasher.0.hash_password(password.as_bytes(), &salt)?;

        Ok(hash.to_string())
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}
