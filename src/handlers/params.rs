// Parameter structs shared by several resource groups

use serde::Deserialize;

use crate::config::ApiConfig;
use crate::database::Page;
use crate::middleware::{FieldRule, Rules};

/// `:id` of a single-row lookup. Zero is well formed and simply matches nothing.
#[derive(Debug, Deserialize)]
pub struct LookupId {
    pub id: i64,
}

impl Rules for LookupId {
    const RULES: &'static [FieldRule] = &[FieldRule::param("id").int().min(0)];
}

/// `?offset=&limit=` of a paginated list. `offset` is a 1-based row cursor.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl Rules for PageQuery {
    const RULES: &'static [FieldRule] = &[
        FieldRule::query("offset").int().min(0).optional(),
        FieldRule::query("limit").int().min(1).optional(),
    ];
}

impl PageQuery {
    pub fn page(&self, api: &ApiConfig) -> Page {
        let mut limit = self.limit.unwrap_or(api.default_page_limit);
        if let Some(max) = api.max_page_limit {
            limit = limit.min(max);
        }
        // offset=0 and offset=1 both start at the first row
        let offset = self.offset.map_or(0, |o| (o - 1).max(0));
        Page::new(limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn api() -> ApiConfig {
        AppConfig::development().api
    }

    #[test]
    fn defaults_to_first_page_of_twenty() {
        assert_eq!(PageQuery::default().page(&api()), Page::new(20, 0));
    }

    #[test]
    fn offset_is_one_based() {
        let q = |offset| PageQuery {
            offset: Some(offset),
            limit: Some(5),
        };
        assert_eq!(q(0).page(&api()), Page::new(5, 0));
        assert_eq!(q(1).page(&api()), Page::new(5, 0));
        assert_eq!(q(3).page(&api()), Page::new(5, 2));
    }

    #[test]
    fn limit_capped_by_config() {
        let query = PageQuery {
            offset: None,
            limit: Some(5000),
        };
        assert_eq!(query.page(&api()).limit, 1000);

        let mut uncapped = api();
        uncapped.max_page_limit = None;
        assert_eq!(query.page(&uncapped).limit, 5000);
    }
}
