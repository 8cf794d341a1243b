//! Application state for the expense service API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::store::ExpenseStore;

/// Shared application state.
///
/// Holds the persistence backend and the token service used by all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ExpenseStore>,
    tokens: Arc<TokenService>,
}

impl AppState {
    /// Creates a new application state from a store and a token service.
    pub fn new<S>(store: S, tokens: TokenService) -> Self
    where
        S: ExpenseStore + 'static,
    {
        Self {
            store: Arc::new(store),
            tokens: Arc::new(tokens),
        }
    }

    /// Creates a new application state using the auth settings of `config`.
    pub fn from_config<S>(config: &AppConfig, store: S) -> Self
    where
        S: ExpenseStore + 'static,
    {
        Self::new(store, TokenService::new(&config.auth))
    }

    /// Returns the persistence backend.
    pub fn store(&self) -> &dyn ExpenseStore {
        self.store.as_ref()
    }

    /// Returns the token service.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
