mod page;
mod templates;

pub use self::page::{AdminPage, PageAction, Section};
pub use self::templates::LoginTemplate;

use self::templates::{BlankTemplate, DeniedTemplate, LayoutTemplate, NavLink};
use crate::{
    policy::{AccessDecision, AccessPolicy},
    session::SessionState,
};
use askama::Template;
use shared::model::User;
use tracing::debug;

const TITLE: &str = "Administration";

/// What the protected layout shows for a given session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView {
    /// Not a guarded path; children render without the layout.
    Passthrough,
    /// Session unresolved or logging out.
    Blank,
    /// `role` is `None` when nobody is signed in.
    AccessDenied { role: Option<String> },
    Full(User),
    ReadOnly(User),
}

impl GuardView {
    pub fn renders_children(&self) -> bool {
        matches!(
            self,
            GuardView::Passthrough | GuardView::Full(_) | GuardView::ReadOnly(_)
        )
    }
}

/// Layout gate. Re-applies the edge gate policy on every render so that
/// navigations which never reach the edge see the same rules.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    policy: AccessPolicy,
}

impl RouteGuard {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    pub fn evaluate(&self, state: &SessionState, path: &str) -> GuardView {
        if !self.policy.is_protected(path) {
            return GuardView::Passthrough;
        }

        let session = match state {
            SessionState::Unknown | SessionState::Authenticating | SessionState::LoggingOut => {
                return GuardView::Blank;
            }
            SessionState::Unauthenticated => return GuardView::AccessDenied { role: None },
            SessionState::Authenticated(session) => session,
        };

        let user = session.user.clone();
        match self.policy.decide(user.role, path) {
            AccessDecision::Full => GuardView::Full(user),
            AccessDecision::ReadOnly => GuardView::ReadOnly(user),
            AccessDecision::Deny => {
                debug!("Layout denied {path} for {}", user.username);
                GuardView::AccessDenied {
                    role: Some(role_label(&user).to_string()),
                }
            }
        }
    }

    /// `None` for [`GuardView::Passthrough`].
    pub fn render(&self, view: &GuardView, page: &AdminPage) -> Result<Option<String>, askama::Error> {
        let html = match view {
            GuardView::Passthrough => return Ok(None),
            GuardView::Blank => BlankTemplate { title: TITLE }.render()?,
            GuardView::AccessDenied { role } => DeniedTemplate {
                title: TITLE,
                role: role.as_deref(),
                login_path: self.policy.login_path(),
            }
            .render()?,
            GuardView::Full(user) => self.layout(user, page, false)?,
            GuardView::ReadOnly(user) => self.layout(user, page, true)?,
        };

        Ok(Some(html))
    }

    fn layout(&self, user: &User, page: &AdminPage, read_only: bool) -> Result<String, askama::Error> {
        let nav = Section::NAV
            .iter()
            .filter(|section| {
                !read_only || self.policy.decide(user.role, &section.href()).is_allowed()
            })
            .map(|section| NavLink {
                label: section.label(),
                href: section.href(),
                active: *section == page.section,
            })
            .collect();

        let create_href = match (read_only, page.section, page.action) {
            (false, Section::Resource(resource), PageAction::List) => {
                Some(format!("/admin/{}/create", resource.slug()))
            }
            _ => None,
        };

        let heading = page.heading();
        let api_href = page.api_href();

        LayoutTemplate {
            title: TITLE,
            heading: &heading,
            username: &user.username,
            role: role_label(user),
            read_only,
            nav,
            action: page.action.name(),
            api_href: &api_href,
            create_href,
        }
        .render()
    }
}

fn role_label(user: &User) -> &'static str {
    user.role.map(|role| role.as_str()).unwrap_or("none")
}
