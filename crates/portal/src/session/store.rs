use crate::abstract_trait::{
    TokenStoreTrait,
    token_store::{ACCESS_COOKIE, REFRESH_COOKIE},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

pub fn access_fallback_ttl() -> Duration {
    Duration::hours(1)
}

pub fn refresh_fallback_ttl() -> Duration {
    Duration::days(7)
}

pub fn token_cookie(name: &'static str, value: &str, ttl: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl.num_seconds().max(0)))
        .secure(secure)
        .build()
}

pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie
}

#[derive(Debug, Clone)]
struct StoredToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Cookie storage held by a long-lived client. Entries disappear once their
/// TTL has elapsed, like browser cookies.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<&'static str, StoredToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<&'static str, StoredToken>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get(&self, name: &'static str) -> Option<String> {
        let mut entries = self.entries();
        match entries.get(name) {
            Some(token) if token.expires_at > Utc::now() => Some(token.value.clone()),
            Some(_) => {
                entries.remove(name);
                None
            }
            None => None,
        }
    }

    fn set(&self, name: &'static str, value: &str, ttl: Duration) {
        self.entries().insert(
            name,
            StoredToken {
                value: value.to_string(),
                expires_at: Utc::now() + ttl,
            },
        );
    }
}

impl TokenStoreTrait for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_COOKIE)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_COOKIE)
    }

    fn set_access_token(&self, token: &str, ttl: Duration) {
        self.set(ACCESS_COOKIE, token, ttl);
    }

    fn set_refresh_token(&self, token: &str, ttl: Duration) {
        self.set(REFRESH_COOKIE, token, ttl);
    }

    fn clear(&self) {
        self.entries().clear();
    }
}

/// Request-scoped store over the incoming cookie jar. Writes accumulate in the
/// jar, which the handler returns with its response.
#[derive(Debug)]
pub struct JarTokenStore {
    jar: Mutex<CookieJar>,
    secure: bool,
}

impl JarTokenStore {
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self {
            jar: Mutex::new(jar),
            secure,
        }
    }

    pub fn jar(&self) -> CookieJar {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, CookieJar> {
        self.jar.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<F>(&self, f: F)
    where
        F: FnOnce(CookieJar) -> CookieJar,
    {
        let mut guard = self.lock();
        let current = std::mem::replace(&mut *guard, CookieJar::new());
        *guard = f(current);
    }

    fn get(&self, name: &str) -> Option<String> {
        self.lock()
            .get(name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }
}

impl TokenStoreTrait for JarTokenStore {
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_COOKIE)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_COOKIE)
    }

    fn set_access_token(&self, token: &str, ttl: Duration) {
        let cookie = token_cookie(ACCESS_COOKIE, token, ttl, self.secure);
        self.update(|jar| jar.add(cookie));
    }

    fn set_refresh_token(&self, token: &str, ttl: Duration) {
        let cookie = token_cookie(REFRESH_COOKIE, token, ttl, self.secure);
        self.update(|jar| jar.add(cookie));
    }

    fn clear(&self) {
        self.update(|jar| {
            jar.remove(removal_cookie(ACCESS_COOKIE))
                .remove(removal_cookie(REFRESH_COOKIE))
        });
    }
}
