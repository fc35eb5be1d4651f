//! Filter / sort / slice pipeline behind every `POST .../pagination` endpoint.
//!
//! The pipeline runs over records already loaded from the store:
//!
//! 1. keep records whose title contains the query (case-insensitive),
//! 2. count the survivors (`total`),
//! 3. sort by an allow-listed field, if one was requested,
//! 4. skip / take,
//! 5. map the page to transfer objects.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Page size used when the request omits `take`.
pub const DEFAULT_TAKE: usize = 10;

/// Client-supplied pagination window, search text and sort order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRequest {
    /// Free-text filter matched against the title. Empty means no filter.
    #[serde(default)]
    pub query: Option<String>,
    /// Field to sort by. Names outside the entity's allow-list are ignored.
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub ascending: bool,
    #[serde(default)]
    pub skip: Option<usize>,
    #[serde(default)]
    pub take: Option<usize>,
}

/// One page of results plus the filtered (but unsliced) count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationResponse<T> {
    pub total: usize,
    pub values: Vec<T>,
}

/// A record the pagination pipeline can filter and sort.
pub trait Searchable {
    /// Field names accepted as `sortBy`.
    const SORT_FIELDS: &'static [&'static str];

    /// Text matched by the free-text query. Records without one are never
    /// filtered out.
    fn search_text(&self) -> Option<&str>;

    /// Compare two records on `field`, which is always one of
    /// [`SORT_FIELDS`](Self::SORT_FIELDS).
    fn compare_by(&self, other: &Self, field: &str) -> Ordering;
}

/// Run the pipeline over `records`, mapping the resulting page with `map`.
///
/// Sorting is stable in both directions: records comparing equal keep the
/// order they had in `records`.
pub fn paginate<R, T, F>(records: Vec<R>, request: &PaginationRequest, map: F) -> PaginationResponse<T>
where
    R: Searchable,
    F: FnMut(&R) -> T,
{
    let needle = request
        .query
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<R> = match needle {
        Some(needle) => records
            .into_iter()
            .filter(|r| {
                r.search_text()
                    .map_or(true, |text| text.to_lowercase().contains(&needle))
            })
            .collect(),
        None => records,
    };

    let total = matched.len();

    if let Some(field) = request
        .sort_by
        .as_deref()
        .and_then(|name| R::SORT_FIELDS.iter().find(|f| **f == name))
    {
        if request.ascending {
            matched.sort_by(|a, b| a.compare_by(b, field));
        } else {
            matched.sort_by(|a, b| b.compare_by(a, field));
        }
    }

    let values = matched
        .iter()
        .skip(request.skip.unwrap_or(0))
        .take(request.take.unwrap_or(DEFAULT_TAKE))
        .map(map)
        .collect();

    PaginationResponse { total, values }
}
