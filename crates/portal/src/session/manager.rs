use crate::{
    abstract_trait::{DynAuthApi, DynTokenStore},
    session::{
        Session, SessionEvent, SessionState,
        store::{access_fallback_ttl, refresh_fallback_ttl},
    },
};
use chrono::Utc;
use shared::{
    errors::{ApiError, SessionError},
    model::LoginRequest,
    utils::cookie_ttl,
};
use std::{
    sync::{Arc, Mutex, PoisonError, Weak},
    time::Duration,
};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{debug, info, warn};

struct Inner {
    api: DynAuthApi,
    store: DynTokenStore,
    state: watch::Sender<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    refresh_interval: Option<Duration>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Ok(slot) = self.refresh_task.get_mut() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

/// Owns the current session. All token writes and state transitions go
/// through its methods.
///
/// With a refresh interval, an authenticated session is re-checked in the
/// background; the task lives exactly as long as the session and never keeps
/// the manager alive.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.inner.state.borrow())
            .field("refresh_interval", &self.inner.refresh_interval)
            .finish()
    }
}

impl SessionManager {
    pub fn new(
        api: DynAuthApi,
        store: DynTokenStore,
        refresh_interval: Option<Duration>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        let (events, _) = broadcast::channel(16);

        Self {
            inner: Arc::new(Inner {
                api,
                store,
                state,
                events,
                refresh_interval,
                refresh_task: Mutex::new(None),
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub fn has_role(&self, expected: &str) -> bool {
        self.inner
            .state
            .borrow()
            .user()
            .is_some_and(|user| user.has_role(expected))
    }

    pub fn is_refresh_loop_running(&self) -> bool {
        self.task_slot()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, SessionError> {
        info!("Login attempt for user: {username}");

        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        self.inner.state.send_replace(SessionState::Authenticating);

        let pair = match self.inner.api.obtain_token(&credentials).await {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Login rejected for {username}: {e}");
                self.abandon_login();
                return Err(match e {
                    ApiError::Unauthorized | ApiError::Validation(_) => {
                        SessionError::InvalidCredentials
                    }
                    other => SessionError::Api(other),
                });
            }
        };

        let now = Utc::now();
        let store = &self.inner.store;
        store.set_access_token(&pair.access, cookie_ttl(&pair.access, access_fallback_ttl(), now));
        store.set_refresh_token(
            &pair.refresh,
            cookie_ttl(&pair.refresh, refresh_fallback_ttl(), now),
        );

        let user = match self.inner.api.who_am_i(&pair.access).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Identity lookup failed right after login for {username}: {e}");
                self.abandon_login();
                return Err(SessionError::Api(e));
            }
        };

        let session = Session {
            user,
            access_token: pair.access,
            refresh_token: Some(pair.refresh),
        };

        self.establish(session.clone());
        let _ = self.inner.events.send(SessionEvent::LoggedIn {
            user_id: session.user_id(),
        });

        info!(
            "User {} logged in with role {:?}",
            session.username(),
            session.role()
        );
        Ok(session)
    }

    /// Purges both tokens and forgets the user. Safe to call at any time.
    pub fn logout(&self) {
        self.inner.state.send_replace(SessionState::LoggingOut);
        self.stop_refresh_loop();
        self.inner.store.clear();
        self.inner.state.send_replace(SessionState::Unauthenticated);
        let _ = self.inner.events.send(SessionEvent::LoggedOut);

        info!("Session closed");
    }

    /// Page-load validation of whatever tokens the store already holds.
    pub async fn restore(&self) -> Result<Session, SessionError> {
        self.inner.state.send_replace(SessionState::Authenticating);

        match self.resolve_identity().await {
            Ok(session) => {
                let still_pending =
                    matches!(*self.inner.state.borrow(), SessionState::Authenticating);
                if !still_pending {
                    return Err(SessionError::NotAuthenticated);
                }

                self.establish(session.clone());
                Ok(session)
            }
            Err(SessionError::NotAuthenticated) => {
                debug!("No stored tokens, session stays anonymous");
                self.inner.state.send_replace(SessionState::Unauthenticated);
                Err(SessionError::NotAuthenticated)
            }
            Err(e) => {
                warn!("Stored session rejected: {e}");
                self.teardown();
                Err(e)
            }
        }
    }

    /// One background check. The role is taken from the backend answer,
    /// so a demotion applies from the next check on.
    pub async fn revalidate(&self) -> Result<Session, SessionError> {
        if !self.inner.state.borrow().is_authenticated() {
            return Err(SessionError::NotAuthenticated);
        }

        match self.resolve_identity().await {
            Ok(session) => {
                let applied = self.inner.state.send_if_modified(|state| {
                    if state.is_authenticated() {
                        *state = SessionState::Authenticated(session.clone());
                        true
                    } else {
                        false
                    }
                });

                if applied {
                    debug!("Session for {} still valid", session.username());
                    Ok(session)
                } else {
                    Err(SessionError::NotAuthenticated)
                }
            }
            Err(e) => {
                warn!("Background session check failed: {e}");
                self.teardown();
                Err(e)
            }
        }
    }

    /// Who-am-I with the stored access token, falling back to exactly one
    /// refresh exchange when the backend reports the token unauthorized.
    async fn resolve_identity(&self) -> Result<Session, SessionError> {
        let store = &self.inner.store;
        let api = &self.inner.api;
        let refresh = store.refresh_token();

        let failure = match store.access_token() {
            Some(access) => match api.who_am_i(&access).await {
                Ok(user) => {
                    return Ok(Session {
                        user,
                        access_token: access,
                        refresh_token: refresh,
                    });
                }
                Err(e) => e,
            },
            None if refresh.is_none() => return Err(SessionError::NotAuthenticated),
            None => ApiError::Unauthorized,
        };

        if !failure.is_unauthorized() {
            return Err(SessionError::Api(failure));
        }

        let Some(refresh) = refresh else {
            return Err(SessionError::Expired);
        };

        let access = api.refresh_token(&refresh).await.map_err(|e| {
            warn!("Refresh token rejected: {e}");
            SessionError::Expired
        })?;

        store.set_access_token(&access, cookie_ttl(&access, access_fallback_ttl(), Utc::now()));

        let user = api.who_am_i(&access).await.map_err(|e| {
            warn!("Refreshed access token rejected: {e}");
            SessionError::Expired
        })?;

        let _ = self.inner.events.send(SessionEvent::Refreshed);

        Ok(Session {
            user,
            access_token: access,
            refresh_token: Some(refresh),
        })
    }

    fn establish(&self, session: Session) {
        self.inner
            .state
            .send_replace(SessionState::Authenticated(session));
        self.start_refresh_loop();
    }

    /// A failed login also ends whatever session came before it.
    fn abandon_login(&self) {
        self.stop_refresh_loop();
        self.inner.store.clear();
        self.inner.state.send_replace(SessionState::Unauthenticated);
    }

    /// Drops a live session after a failed check. Emits `Expired` once, even
    /// when concurrent checks fail together.
    fn teardown(&self) {
        let was_live = self.inner.state.send_if_modified(|state| {
            let live = matches!(
                state,
                SessionState::Authenticated(_) | SessionState::Authenticating
            );
            *state = SessionState::Unauthenticated;
            live
        });

        if !was_live {
            return;
        }

        self.stop_refresh_loop();
        self.inner.store.clear();
        let _ = self.inner.events.send(SessionEvent::Expired);

        info!("Session expired, login required");
    }

    fn task_slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .refresh_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn start_refresh_loop(&self) {
        let Some(period) = self.inner.refresh_interval else {
            return;
        };

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let Some(inner) = weak.upgrade() else {
                    break;
                };

                let manager = SessionManager { inner };
                if manager.revalidate().await.is_err() {
                    break;
                }
            }
        });

        if let Some(previous) = self.task_slot().replace(handle) {
            previous.abort();
        }

        debug!("Session refresh loop started every {period:?}");
    }

    fn stop_refresh_loop(&self) {
        if let Some(handle) = self.task_slot().take() {
            handle.abort();
            debug!("Session refresh loop stopped");
        }
    }
}
