//! Response envelopes shared across handlers.
//!
//! Aggregate and inbox endpoints wrap their payload as `{ "data": ... }`;
//! paginated admin listings add a `meta` block. Typed envelopes keep the
//! wire shape out of individual handlers, where ad-hoc `json!` calls would
//! drift apart.

use serde::Serialize;

/// The `{ "data": T }` wrapper, for endpoints that return one payload.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Paginated `{ "data": [...], "meta": { total, page, limit } }` envelope.
///
/// Used by admin listing endpoints that page through large collections.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Pagination metadata attached to a [`Paginated`] response.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    /// Total number of rows matching the filter, ignoring pagination.
    pub total: i64,
    /// 1-based page number that was returned.
    pub page: i64,
    /// Page size that was applied.
    pub limit: i64,
}
