use crate::domain::resource::AdminResource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Resource(AdminResource),
}

impl Section {
    /// Sidebar order.
    pub const NAV: [Section; 8] = [
        Section::Dashboard,
        Section::Resource(AdminResource::Programs),
        Section::Resource(AdminResource::Games),
        Section::Resource(AdminResource::Predictions),
        Section::Resource(AdminResource::Results),
        Section::Resource(AdminResource::Users),
        Section::Resource(AdminResource::GameTypes),
        Section::Resource(AdminResource::Countries),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Resource(AdminResource::Programs) => "Programs",
            Section::Resource(AdminResource::Games) => "Games",
            Section::Resource(AdminResource::Predictions) => "Predictions",
            Section::Resource(AdminResource::Results) => "Results",
            Section::Resource(AdminResource::Users) => "Users",
            Section::Resource(AdminResource::GameTypes) => "Game types",
            Section::Resource(AdminResource::Countries) => "Countries",
        }
    }

    pub fn href(&self) -> String {
        match self {
            Section::Dashboard => "/admin/dashboard".to_string(),
            Section::Resource(resource) => format!("/admin/{}", resource.slug()),
        }
    }

    pub fn api_href(&self) -> String {
        match self {
            Section::Dashboard => "/admin/api/dashboard".to_string(),
            Section::Resource(resource) => format!("/admin/api/{}", resource.slug()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    List,
    Create,
    Edit(i64),
}

impl PageAction {
    pub fn name(&self) -> &'static str {
        match self {
            PageAction::List => "list",
            PageAction::Create => "create",
            PageAction::Edit(_) => "edit",
        }
    }
}

/// A known admin screen: `/admin`, `/admin/dashboard`, `/admin/{resource}`,
/// `/admin/{resource}/create` or `/admin/{resource}/edit/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPage {
    pub path: String,
    pub section: Section,
    pub action: PageAction,
}

impl AdminPage {
    pub fn from_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix("/admin")?;
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

        let (section, action) = match segments.as_slice() {
            [] | ["dashboard"] => (Section::Dashboard, PageAction::List),
            [slug] => (Section::Resource(AdminResource::from_slug(slug)?), PageAction::List),
            [slug, "create"] => (
                Section::Resource(AdminResource::from_slug(slug)?),
                PageAction::Create,
            ),
            [slug, "edit", id] => (
                Section::Resource(AdminResource::from_slug(slug)?),
                PageAction::Edit(id.parse().ok()?),
            ),
            _ => return None,
        };

        Some(Self {
            path: path.to_string(),
            section,
            action,
        })
    }

    pub fn heading(&self) -> String {
        match self.action {
            PageAction::List => self.section.label().to_string(),
            PageAction::Create => format!("{}: new", self.section.label()),
            PageAction::Edit(id) => format!("{}: edit #{id}", self.section.label()),
        }
    }

    pub fn api_href(&self) -> String {
        match self.action {
            PageAction::Edit(id) => format!("{}/{id}", self.section.api_href()),
            _ => self.section.api_href(),
        }
    }
}
