use crate::{
    abstract_trait::{
        DynAuthApi,
        token_store::{ACCESS_COOKIE, REFRESH_COOKIE},
    },
    policy::{AccessDecision, AccessPolicy},
    session::{access_fallback_ttl, removal_cookie, token_cookie},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use shared::{
    errors::ApiError,
    model::User,
    utils::{GateMetrics, GateOutcome, cookie_ttl},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Verified caller of a gated request, inserted as a request extension.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
    pub access_token: String,
    pub decision: AccessDecision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    MissingToken,
    Forbidden,
    VerificationFailed,
    RefreshFailed,
}

#[derive(Debug, Clone)]
pub enum GateDecision {
    Bypass,
    Allow {
        identity: Identity,
        /// New access token obtained through the refresh exchange.
        refreshed: Option<String>,
    },
    Redirect(RedirectReason),
}

pub struct EdgeGate {
    api: DynAuthApi,
    policy: AccessPolicy,
    metrics: GateMetrics,
    secure_cookies: bool,
}

impl EdgeGate {
    pub fn new(
        api: DynAuthApi,
        policy: AccessPolicy,
        metrics: GateMetrics,
        secure_cookies: bool,
    ) -> Self {
        Self {
            api,
            policy,
            metrics,
            secure_cookies,
        }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    pub async fn evaluate(
        &self,
        path: &str,
        access: Option<&str>,
        refresh: Option<&str>,
    ) -> GateDecision {
        if !self.policy.is_protected(path) {
            return GateDecision::Bypass;
        }

        let decision = self.verify(path, access, refresh).await;

        let outcome = match &decision {
            GateDecision::Allow {
                refreshed: Some(_), ..
            } => GateOutcome::Refreshed,
            GateDecision::Allow { .. } | GateDecision::Bypass => GateOutcome::Allow,
            GateDecision::Redirect(RedirectReason::MissingToken) => {
                GateOutcome::RedirectMissingToken
            }
            GateDecision::Redirect(RedirectReason::Forbidden) => GateOutcome::RedirectForbidden,
            GateDecision::Redirect(_) => GateOutcome::RedirectFailed,
        };
        self.metrics.record(outcome);

        decision
    }

    async fn verify(&self, path: &str, access: Option<&str>, refresh: Option<&str>) -> GateDecision {
        let Some(access) = access else {
            debug!("No access token for {path}, redirecting to login");
            return GateDecision::Redirect(RedirectReason::MissingToken);
        };

        match self.api.who_am_i(access).await {
            Ok(user) => self.authorize(path, user, access.to_string(), None),
            Err(ApiError::Unauthorized) => match refresh {
                Some(refresh) => self.refresh_and_retry(path, refresh).await,
                None => {
                    info!("Access token rejected for {path} and no refresh token present");
                    GateDecision::Redirect(RedirectReason::VerificationFailed)
                }
            },
            Err(e) => {
                warn!("Identity check failed for {path}: {e}");
                GateDecision::Redirect(RedirectReason::VerificationFailed)
            }
        }
    }

    async fn refresh_and_retry(&self, path: &str, refresh: &str) -> GateDecision {
        let access = match self.api.refresh_token(refresh).await {
            Ok(access) => access,
            Err(e) => {
                info!("Refresh exchange failed for {path}: {e}");
                return GateDecision::Redirect(RedirectReason::RefreshFailed);
            }
        };

        match self.api.who_am_i(&access).await {
            Ok(user) => self.authorize(path, user, access.clone(), Some(access)),
            Err(e) => {
                warn!("Refreshed access token rejected for {path}: {e}");
                GateDecision::Redirect(RedirectReason::RefreshFailed)
            }
        }
    }

    fn authorize(
        &self,
        path: &str,
        user: User,
        access_token: String,
        refreshed: Option<String>,
    ) -> GateDecision {
        let decision = self.policy.decide(user.role, path);

        if !decision.is_allowed() {
            info!(
                "User {} with role {:?} is not allowed on {path}",
                user.username, user.role
            );
            return GateDecision::Redirect(RedirectReason::Forbidden);
        }

        GateDecision::Allow {
            identity: Identity {
                user,
                access_token,
                decision,
            },
            refreshed,
        }
    }
}

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

pub async fn edge_gate(
    State(gate): State<Arc<EdgeGate>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let access = cookie_value(&jar, ACCESS_COOKIE);
    let refresh = cookie_value(&jar, REFRESH_COOKIE);

    match gate
        .evaluate(&path, access.as_deref(), refresh.as_deref())
        .await
    {
        GateDecision::Bypass => next.run(req).await,
        GateDecision::Allow {
            identity,
            refreshed,
        } => {
            req.extensions_mut().insert(identity);
            let response = next.run(req).await;

            match refreshed {
                Some(token) => {
                    let ttl = cookie_ttl(&token, access_fallback_ttl(), Utc::now());
                    let cookie = token_cookie(ACCESS_COOKIE, &token, ttl, gate.secure_cookies());
                    (CookieJar::new().add(cookie), response).into_response()
                }
                None => response,
            }
        }
        GateDecision::Redirect(RedirectReason::RefreshFailed) => {
            let jar = jar
                .remove(removal_cookie(ACCESS_COOKIE))
                .remove(removal_cookie(REFRESH_COOKIE));
            (jar, Redirect::temporary(gate.policy().login_path())).into_response()
        }
        GateDecision::Redirect(_) => Redirect::temporary(gate.policy().login_path()).into_response(),
    }
}
