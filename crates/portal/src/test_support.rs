use crate::abstract_trait::AuthApiTrait;
use async_trait::async_trait;
use shared::{
    errors::ApiError,
    model::{LoginRequest, Role, TokenPair, User},
};
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

pub fn user(id: i64, username: &str, role: Option<Role>) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        role,
        is_active: true,
        date_joined: None,
    }
}

/// In-memory auth backend. Unknown tokens and credentials answer 401.
#[derive(Default)]
pub struct MockAuthApi {
    users: Mutex<HashMap<String, User>>,
    logins: Mutex<HashMap<(String, String), TokenPair>>,
    refreshes: Mutex<HashMap<String, String>>,
    offline: AtomicBool,
    pub token_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub me_calls: AtomicUsize,
}

impl MockAuthApi {
    pub fn grant(&self, access: &str, user: User) {
        self.users.lock().unwrap().insert(access.to_string(), user);
    }

    pub fn revoke(&self, access: &str) {
        self.users.lock().unwrap().remove(access);
    }

    pub fn accept_login(&self, username: &str, password: &str, access: &str, refresh: &str) {
        self.logins.lock().unwrap().insert(
            (username.to_string(), password.to_string()),
            TokenPair {
                access: access.to_string(),
                refresh: refresh.to_string(),
            },
        );
    }

    pub fn accept_refresh(&self, refresh: &str, access: &str) {
        self.refreshes
            .lock()
            .unwrap()
            .insert(refresh.to_string(), access.to_string());
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn reachable(&self) -> Result<(), ApiError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(ApiError::Network("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AuthApiTrait for MockAuthApi {
    async fn obtain_token(&self, credentials: &LoginRequest) -> Result<TokenPair, ApiError> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.reachable()?;

        let key = (credentials.username.clone(), credentials.password.clone());
        self.logins
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }

    async fn refresh_token(&self, refresh: &str) -> Result<String, ApiError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.reachable()?;

        self.refreshes
            .lock()
            .unwrap()
            .get(refresh)
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }

    async fn who_am_i(&self, access: &str) -> Result<User, ApiError> {
        self.me_calls.fetch_add(1, Ordering::SeqCst);
        self.reachable()?;

        self.users
            .lock()
            .unwrap()
            .get(access)
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}
