//! Filtering, search and pagination over a catalog snapshot.

use std::num::IntErrorKind;

use serde::Serialize;
use utoipa::ToSchema;

use super::product::Product;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Query parameter required")]
    MissingQuery,
}

/// Keep the products whose category equals `category`, ignoring case.
#[must_use]
pub fn filter_by_category(items: Vec<Product>, category: &str) -> Vec<Product> {
    let wanted = category.to_lowercase();
    items
        .into_iter()
        .filter(|p| p.category.to_lowercase() == wanted)
        .collect()
}

/// Keep the products whose name or description contains `query`, ignoring case.
///
/// # Errors
///
/// Returns `QueryError::MissingQuery` if `query` is absent or empty.
pub fn search(items: Vec<Product>, query: Option<&str>) -> Result<Vec<Product>, QueryError> {
    let needle = query
        .filter(|q| !q.is_empty())
        .ok_or(QueryError::MissingQuery)?
        .to_lowercase();

    Ok(items
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect())
}

/// Requested page number and size.
///
/// Non-positive values are kept as given; they select an empty page rather
/// than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    /// Parse raw query-string values, falling back to the defaults for
    /// anything absent or non-numeric.
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_or(page, DEFAULT_PAGE),
            limit: parse_or(limit, DEFAULT_LIMIT),
        }
    }

    /// Zero-based start and length of the page, or `None` when it is empty by construction.
    fn window(self) -> Option<(usize, usize)> {
        if self.page < 1 || self.limit < 1 {
            return None;
        }
        let start = (self.page - 1).checked_mul(self.limit)?;
        let start = usize::try_from(start).ok()?;
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        Some((start, limit))
    }
}

/// Integers outside `i64` saturate, so an oversized page still lands past the end.
fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<i64>() {
        Ok(value) => value,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => default,
        },
    }
}

/// One page of results plus the counts needed to fetch the others.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_items: usize,
    pub current_page: i64,
    pub items_per_page: i64,
    pub data: Vec<T>,
}

/// Slice `items` into the page described by `params`.
#[must_use]
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> Page<T> {
    let total_items = items.len();
    let data = match params.window() {
        Some((start, limit)) => items.into_iter().skip(start).take(limit).collect(),
        None => Vec::new(),
    };

    Page {
        total_items,
        current_page: params.page,
        items_per_page: params.limit,
        data,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::catalog::store::seed_products;
    use proptest::prelude::*;

    #[test]
    fn category_filter_ignores_case() {
        let found = filter_by_category(seed_products(), "electronics");
        assert_eq!(found.len(), 2);

        let found = filter_by_category(seed_products(), "FURNITURE");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Standing Desk");
    }

    #[test]
    fn category_filter_is_exact_not_substring() {
        assert!(filter_by_category(seed_products(), "Electro").is_empty());
    }

    #[test]
    fn search_matches_name_or_description() {
        let found = search(seed_products(), Some("LAPTOP")).expect("search");
        let ids: Vec<_> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn search_requires_query() {
        assert_eq!(search(seed_products(), None), Err(QueryError::MissingQuery));
        assert_eq!(
            search(seed_products(), Some("")),
            Err(QueryError::MissingQuery)
        );
    }

    #[test]
    fn page_params_fall_back_to_defaults() {
        let cases = [
            (None, None, PageParams { page: 1, limit: 10 }, "absent"),
            (Some("2"), Some("5"), PageParams { page: 2, limit: 5 }, "numeric"),
            (Some("abc"), Some("x"), PageParams { page: 1, limit: 10 }, "non-numeric"),
            (Some("0"), Some("-3"), PageParams { page: 0, limit: -3 }, "non-positive kept"),
            (Some(""), Some(" 7 "), PageParams { page: 1, limit: 7 }, "empty and padded"),
            (
                Some("99999999999999999999"),
                Some("-99999999999999999999"),
                PageParams {
                    page: i64::MAX,
                    limit: i64::MIN,
                },
                "overflow saturates",
            ),
        ];

        for (page, limit, expected, desc) in cases {
            assert_eq!(PageParams::from_raw(page, limit), expected, "case '{desc}'");
        }
    }

    #[test]
    fn second_page_of_twelve() {
        let items: Vec<u32> = (1..=12).collect();
        let page = paginate(items, PageParams { page: 2, limit: 10 });
        assert_eq!(page.total_items, 12);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items_per_page, 10);
        assert_eq!(page.data, [11, 12]);
    }

    #[test]
    fn oversized_page_is_empty() {
        let items: Vec<u32> = (1..=12).collect();
        let params = PageParams::from_raw(Some("99999999999999999999"), Some("10"));
        let result = paginate(items, params);
        assert!(result.data.is_empty());
        assert_eq!(result.current_page, i64::MAX);
        assert_eq!(result.total_items, 12);
    }

    #[test]
    fn non_positive_params_give_empty_page() {
        let items: Vec<u32> = (1..=12).collect();
        for (page, limit) in [(0, 10), (-1, 10), (1, 0), (1, -5)] {
            let result = paginate(items.clone(), PageParams { page, limit });
            assert!(result.data.is_empty(), "page={page} limit={limit}");
            assert_eq!(result.total_items, 12);
        }
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = paginate(vec![1, 2, 3], PageParams { page: 5, limit: 10 });
        assert!(page.data.is_empty());
    }

    proptest! {
        #[test]
        fn page_never_exceeds_limit(len in 0usize..60, page in -3i64..10, limit in -3i64..20) {
            let items: Vec<usize> = (0..len).collect();
            let result = paginate(items, PageParams { page, limit });
            prop_assert_eq!(result.total_items, len);
            prop_assert!(i64::try_from(result.data.len()).unwrap_or(i64::MAX) <= limit.max(0));
        }

        #[test]
        fn pages_cover_every_item_once(len in 0usize..60, limit in 1i64..15) {
            let items: Vec<usize> = (0..len).collect();
            let mut seen = Vec::new();
            let mut page = 1;
            loop {
                let result = paginate(items.clone(), PageParams { page, limit });
                if result.data.is_empty() {
                    break;
                }
                seen.extend(result.data);
                page += 1;
            }
            prop_assert_eq!(seen, items);
        }
    }
}
