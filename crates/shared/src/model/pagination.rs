use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    /// Splits raw query parameters into the page number and entity filters.
    /// A missing or unparsable `page` means the first page.
    pub fn from_params(mut params: HashMap<String, String>) -> Self {
        let page = params
            .remove("page")
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1);

        Self {
            page,
            filters: params.into_iter().collect(),
        }
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs
    }
}
