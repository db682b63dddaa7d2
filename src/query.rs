// Product listing engine: filtering, pagination and translation over the
// in-memory catalog. Everything here is pure; callers share one `Catalog`.

use crate::catalog::Catalog;
use crate::i18n::{translate, Language};
use crate::models::{
    CategoriesResponse, PaginationMeta, Product, ProductsResponse, TranslatedCategory,
    TranslatedProduct, TranslatedReason, WhyBoycottResponse,
};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MIN_LIMIT: u64 = 1;

/// Optional equality constraints on a product's category and country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_id: Option<String>,
    pub country: Option<String>,
}

impl ProductFilter {
    /// Empty strings mean "no constraint", same as an absent parameter.
    pub fn new(category_id: Option<&str>, country: Option<&str>) -> Self {
        let constraint = |value: Option<&str>| {
            value
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            category_id: constraint(category_id),
            country: constraint(country),
        }
    }

    /// Exact, case-sensitive match on every constraint that is set.
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category_id
            .as_deref()
            .map_or(true, |id| product.category_id == id);
        let country_ok = self
            .country
            .as_deref()
            .map_or(true, |code| product.country == code);

        category_ok && country_ok
    }

    /// Matching products in their original order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .collect()
    }
}

/// Validated page/limit pair. Both are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Clamps zero and negative values up to 1.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: clamp_positive(page, DEFAULT_PAGE),
            limit: clamp_positive(limit, MIN_LIMIT),
        }
    }

    /**
     * from_query
     * Coerces raw query-string values by reading their leading integer
     * (`"3.7"` is 3, `"12abc"` is 12). Input with no leading digits takes the
     * default (page 1, limit 10) before clamping.
     */
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            parse_or(page, DEFAULT_PAGE as i64),
            parse_or(limit, DEFAULT_LIMIT as i64),
        )
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_integer).unwrap_or(default)
}

/// Optional sign followed by at least one digit; the rest is ignored.
/// Digit runs too long for i64 saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }

    let magnitude = unsigned[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn clamp_positive(value: i64, minimum: u64) -> u64 {
    u64::try_from(value).unwrap_or(0).max(minimum)
}

/// Returns the requested window of `items` and the metadata describing it.
/// A page past the end yields an empty slice with the real totals.
pub fn paginate<T>(items: &[T], request: PageRequest) -> (&[T], PaginationMeta) {
    let page = request.page.max(DEFAULT_PAGE);
    let limit = request.limit.max(MIN_LIMIT);
    let total = items.len() as u64;
    let total_pages = total.div_ceil(limit);

    let start = (page - 1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);

    let meta = PaginationMeta {
        page,
        limit,
        total,
        total_pages,
        has_next_page: page < total_pages,
        has_prev_page: page > 1,
    };

    (&items[start as usize..end as usize], meta)
}

/**
 * get_products
 * Filter, then paginate the filtered set, then translate only the returned
 * page. Pagination totals always describe the filtered set.
 */
pub fn get_products(
    catalog: &Catalog,
    lang: Language,
    filter: &ProductFilter,
    request: PageRequest,
) -> ProductsResponse {
    let matching = filter.apply(catalog.products());
    let (page, pagination) = paginate(&matching, request);

    ProductsResponse {
        data: page
            .iter()
            .map(|product| translate_product(catalog, product, lang))
            .collect(),
        pagination,
    }
}

fn translate_product(catalog: &Catalog, product: &Product, lang: Language) -> TranslatedProduct {
    let category = catalog
        .category(&product.category_id)
        .map(|category| translate(&category.name, lang))
        .unwrap_or_else(|| product.category_id.clone());

    TranslatedProduct {
        name: translate(&product.name, lang),
        category,
        country: product.country.clone(),
        alternatives: product.alternatives.clone(),
    }
}

pub fn list_categories(catalog: &Catalog, lang: Language) -> CategoriesResponse {
    CategoriesResponse {
        data: catalog
            .categories()
            .iter()
            .map(|category| TranslatedCategory {
                id: category.id.clone(),
                name: translate(&category.name, lang),
            })
            .collect(),
    }
}

pub fn list_why_boycott(catalog: &Catalog, lang: Language) -> WhyBoycottResponse {
    WhyBoycottResponse {
        data: catalog
            .why_boycott()
            .iter()
            .map(|reason| TranslatedReason {
                icon: reason.icon.clone(),
                title: translate(&reason.title, lang),
                description: translate(&reason.description, lang),
            })
            .collect(),
    }
}
