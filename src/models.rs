use crate::i18n::LocalizedText;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ==================== Dataset records ====================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: LocalizedText,
    pub category_id: String,
    pub country: String,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Alternative {
    pub name: String,
    pub link: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: LocalizedText,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Country {
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhyBoycottEntry {
    pub icon: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
}

// ==================== Responses ====================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct TranslatedProduct {
    pub name: String,
    /// Translated category name.
    pub category: String,
    pub country: String,
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct TranslatedCategory {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct TranslatedReason {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct ProductsResponse {
    pub data: Vec<TranslatedProduct>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct CategoriesResponse {
    pub data: Vec<TranslatedCategory>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct WhyBoycottResponse {
    pub data: Vec<TranslatedReason>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct HealthCheckResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error: String,
    pub message: String,
    pub trace_id: String,
}

// ==================== Requests ====================

/// Raw `/products` query string. Numbers stay strings so that garbage input
/// falls back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQueryParams {
    /// Page number (1-based, default 1)
    #[param(example = "1")]
    pub page: Option<String>,
    /// Items per page (default 10)
    #[param(example = "10")]
    pub limit: Option<String>,
    /// Filter by category ID
    #[param(example = "tech")]
    pub category_id: Option<String>,
    /// Filter by country code
    #[param(example = "US")]
    pub country: Option<String>,
}
