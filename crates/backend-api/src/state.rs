use std::sync::Arc;

use accountd_auth::{PasswordHasher, TokenIssuer};
use accountd_database::UserRepository;

#[derive(Clone)]
pub struct AppState {
    users: UserRepository,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenIssuer,
}

impl AppState {
    pub fn new(users: UserRepository, hasher: Arc<dyn PasswordHasher>, tokens: TokenIssuer) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn hasher(&self) -> &dyn PasswordHasher {
        self.hasher.as_ref()
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }
}
