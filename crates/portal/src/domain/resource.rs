/// Public collections under `client/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogResource {
    Games,
    GameTypes,
    Countries,
    Predictions,
    Programs,
    Results,
}

impl CatalogResource {
    pub const ALL: [CatalogResource; 6] = [
        CatalogResource::Games,
        CatalogResource::GameTypes,
        CatalogResource::Countries,
        CatalogResource::Predictions,
        CatalogResource::Programs,
        CatalogResource::Results,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            CatalogResource::Games => "games",
            CatalogResource::GameTypes => "game-types",
            CatalogResource::Countries => "countries",
            CatalogResource::Predictions => "predictions",
            CatalogResource::Programs => "programs",
            CatalogResource::Results => "results",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.slug() == slug)
    }

    /// Game types (categories) and countries are addressed by slug on the public site.
    pub fn supports_slug_lookup(&self) -> bool {
        matches!(self, CatalogResource::GameTypes | CatalogResource::Countries)
    }
}

/// Managed collections under `admin/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminResource {
    Users,
    Games,
    GameTypes,
    Countries,
    Programs,
    Predictions,
    Results,
}

impl AdminResource {
    pub const ALL: [AdminResource; 7] = [
        AdminResource::Users,
        AdminResource::Games,
        AdminResource::GameTypes,
        AdminResource::Countries,
        AdminResource::Programs,
        AdminResource::Predictions,
        AdminResource::Results,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            AdminResource::Users => "users",
            AdminResource::Games => "games",
            AdminResource::GameTypes => "game-types",
            AdminResource::Countries => "countries",
            AdminResource::Programs => "programs",
            AdminResource::Predictions => "predictions",
            AdminResource::Results => "results",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.slug() == slug)
    }
}
