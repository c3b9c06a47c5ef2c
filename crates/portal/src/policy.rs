use shared::model::Role;

pub const PROTECTED_PREFIX: &str = "/admin";
pub const LOGIN_PATH: &str = "/admin/login";

const READ_ONLY_PATHS: &[&str] = &[
    "/admin",
    "/admin/dashboard",
    "/admin/programs",
    "/admin/predictions",
    "/admin/results",
    "/admin/api/dashboard",
    "/admin/api/programs",
    "/admin/api/predictions",
    "/admin/api/results",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Full,
    ReadOnly,
    Deny,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, AccessDecision::Deny)
    }

    pub fn can_write(&self) -> bool {
        matches!(self, AccessDecision::Full)
    }
}

/// Role rules shared by the edge gate and the layout guard.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    full_access: Vec<Role>,
    read_only: Vec<Role>,
    read_only_paths: Vec<String>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl AccessPolicy {
    pub fn standard() -> Self {
        Self {
            full_access: vec![Role::Admin, Role::Editor],
            read_only: vec![Role::Viewer],
            read_only_paths: READ_ONLY_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn login_path(&self) -> &'static str {
        LOGIN_PATH
    }

    pub fn is_login(&self, path: &str) -> bool {
        normalize(path) == LOGIN_PATH
    }

    pub fn is_protected(&self, path: &str) -> bool {
        let path = normalize(path);
        let under_prefix = path == PROTECTED_PREFIX
            || path
                .strip_prefix(PROTECTED_PREFIX)
                .is_some_and(|rest| rest.starts_with('/'));

        under_prefix && path != LOGIN_PATH
    }

    pub fn decide(&self, role: Option<Role>, path: &str) -> AccessDecision {
        let Some(role) = role else {
            return AccessDecision::Deny;
        };

        if self.full_access.contains(&role) {
            return AccessDecision::Full;
        }

        let path = normalize(path);
        if self.read_only.contains(&role) && self.read_only_paths.iter().any(|p| p == path) {
            return AccessDecision::ReadOnly;
        }

        AccessDecision::Deny
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_is_never_protected() {
        let policy = AccessPolicy::standard();

        assert!(!policy.is_protected("/admin/login"));
        assert!(!policy.is_protected("/admin/login/"));
        assert!(policy.is_login("/admin/login/"));
        assert!(policy.is_protected("/admin"));
        assert!(policy.is_protected("/admin/games/4/edit"));
        assert!(!policy.is_protected("/administrator"));
        assert!(!policy.is_protected("/api/client/games"));
    }

    #[test]
    fn admin_and_editor_get_full_access_everywhere() {
        let policy = AccessPolicy::standard();

        for role in [Role::Admin, Role::Editor] {
            assert_eq!(policy.decide(Some(role), "/admin/users"), AccessDecision::Full);
            assert_eq!(
                policy.decide(Some(role), "/admin/api/games/3"),
                AccessDecision::Full
            );
        }
    }

    #[test]
    fn viewer_is_read_only_on_allow_list() {
        let policy = AccessPolicy::standard();

        assert_eq!(
            policy.decide(Some(Role::Viewer), "/admin/results/"),
            AccessDecision::ReadOnly
        );
        assert_eq!(
            policy.decide(Some(Role::Viewer), "/admin/api/predictions"),
            AccessDecision::ReadOnly
        );
        assert_eq!(
            policy.decide(Some(Role::Viewer), "/admin/users"),
            AccessDecision::Deny
        );
        assert_eq!(
            policy.decide(Some(Role::Viewer), "/admin/results/create"),
            AccessDecision::Deny
        );
    }

    #[test]
    fn missing_role_is_denied() {
        let policy = AccessPolicy::standard();
        assert_eq!(policy.decide(None, "/admin"), AccessDecision::Deny);
        assert!(!AccessDecision::ReadOnly.can_write());
        assert!(AccessDecision::ReadOnly.is_allowed());
    }
}
