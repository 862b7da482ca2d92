use serde::Deserialize;
use utoipa::ToSchema;

/// Listings are paginated with a fixed page size.
pub const PAGE_SIZE: i64 = 10;

/// Returns `(page, per_page, offset)` for a requested page, clamped so the
/// offset always fits.
pub fn normalize_page(page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).clamp(1, i64::MAX / PAGE_SIZE);
    let offset = (page - 1) * PAGE_SIZE;
    (page, PAGE_SIZE, offset)
}

/// Trimmed search term, or `None` when the parameter is absent or blank.
pub fn search_term(search: &Option<String>) -> Option<&str> {
    search.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SkuListQuery {
    pub page: Option<i64>,
    pub search: Option<String>,
    /// Category of the SKU's SPU. Values that are not an id are ignored.
    pub category: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub plating: Option<String>,
}

impl SkuListQuery {
    pub fn category_id(&self) -> Option<i32> {
        self.category
            .as_deref()
            .and_then(|c| c.trim().parse::<i32>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(normalize_page(None), (1, PAGE_SIZE, 0));
        assert_eq!(normalize_page(Some(0)), (1, PAGE_SIZE, 0));
        assert_eq!(normalize_page(Some(3)), (3, PAGE_SIZE, 20));
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let (page, per_page, offset) = normalize_page(Some(i64::MAX));
        assert_eq!(page, i64::MAX / PAGE_SIZE);
        assert_eq!(per_page, PAGE_SIZE);
        assert!(offset > 0);
        assert_eq!(normalize_page(Some(i64::MIN)), (1, PAGE_SIZE, 0));
    }

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(search_term(&Some("   ".into())), None);
        assert_eq!(search_term(&Some(" ring ".into())), Some("ring"));
        assert_eq!(search_term(&None), None);
    }

    #[test]
    fn non_numeric_category_is_ignored() {
        let query = SkuListQuery {
            category: Some("abc".into()),
            ..Default::default()
        };
        assert_eq!(query.category_id(), None);

        let query = SkuListQuery {
            category: Some("7".into()),
            ..Default::default()
        };
        assert_eq!(query.category_id(), Some(7));
    }
}
