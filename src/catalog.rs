use crate::models::{Category, Country, Product, WhyBoycottEntry};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

pub const PRODUCTS_FILE: &str = "products.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const COUNTRIES_FILE: &str = "countries.json";
pub const WHY_BOYCOTT_FILE: &str = "why_boycott.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product #{index} references unknown category '{category_id}'")]
    DanglingCategory { index: usize, category_id: String },
    #[error("category id '{0}' is defined more than once")]
    DuplicateCategory(String),
}

/// Immutable snapshot of the catalog. Built once at startup and shared
/// read-only by every request.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    countries: Vec<Country>,
    why_boycott: Vec<WhyBoycottEntry>,
    category_index: HashMap<String, usize>,
}

impl Catalog {
    /**
     * new
     * Builds the snapshot and enforces referential integrity. Gaps that the
     * request path can absorb (missing `en`, unknown country codes) are only
     * logged.
     */
    pub fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        countries: Vec<Country>,
        why_boycott: Vec<WhyBoycottEntry>,
    ) -> Result<Self, CatalogError> {
        let mut category_index = HashMap::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            if category_index.insert(category.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        if let Some((index, product)) = products
            .iter()
            .enumerate()
            .find(|(_, product)| !category_index.contains_key(&product.category_id))
        {
            return Err(CatalogError::DanglingCategory {
                index,
                category_id: product.category_id.clone(),
            });
        }

        let catalog = Self {
            products,
            categories,
            countries,
            why_boycott,
            category_index,
        };

        for warning in catalog.integrity_warnings() {
            log::warn!("Catalog data: {}", warning);
        }

        Ok(catalog)
    }

    /// Reads the four dataset files from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let products: Vec<Product> = read_json(&dir.join(PRODUCTS_FILE))?;
        let categories: Vec<Category> = read_json(&dir.join(CATEGORIES_FILE))?;
        let countries: Vec<Country> = read_json(&dir.join(COUNTRIES_FILE))?;
        let why_boycott: Vec<WhyBoycottEntry> = read_json(&dir.join(WHY_BOYCOTT_FILE))?;

        let catalog = Self::new(products, categories, countries, why_boycott)
            .with_context(|| format!("Invalid catalog data in {}", dir.display()))?;

        log::info!(
            "Loaded catalog from {}: {} products, {} categories, {} countries, {} reasons",
            dir.display(),
            catalog.products().len(),
            catalog.categories().len(),
            catalog.countries().len(),
            catalog.why_boycott().len()
        );

        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn why_boycott(&self) -> &[WhyBoycottEntry] {
        &self.why_boycott
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.category_index
            .get(id)
            .map(|&position| &self.categories[position])
    }

    /// Data problems that do not stop the catalog from serving.
    pub fn integrity_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (index, product) in self.products.iter().enumerate() {
            if !product.name.has_fallback() {
                warnings.push(format!("product #{} has no 'en' name", index));
            }
        }
        for category in &self.categories {
            if !category.name.has_fallback() {
                warnings.push(format!("category '{}' has no 'en' name", category.id));
            }
        }
        for (index, reason) in self.why_boycott.iter().enumerate() {
            if !reason.title.has_fallback() || !reason.description.has_fallback() {
                warnings.push(format!("why-boycott entry #{} is missing 'en' text", index));
            }
        }

        // Country reference data is optional; only check codes when present.
        if !self.countries.is_empty() {
            let known: HashSet<&str> = self.countries.iter().map(|c| c.code.as_str()).collect();
            for (index, product) in self.products.iter().enumerate() {
                if !known.contains(product.country.as_str()) {
                    warnings.push(format!(
                        "product #{} uses unknown country '{}'",
                        index, product.country
                    ));
                }
                for alternative in &product.alternatives {
                    if !known.contains(alternative.country.as_str()) {
                        warnings.push(format!(
                            "alternative '{}' of product #{} uses unknown country '{}'",
                            alternative.name, index, alternative.country
                        ));
                    }
                }
            }
        }

        warnings
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, LocalizedText};
    use crate::models::Alternative;
    use tempfile::TempDir;

    fn write_dataset(products: &str, categories: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PRODUCTS_FILE), products).unwrap();
        fs::write(dir.path().join(CATEGORIES_FILE), categories).unwrap();
        fs::write(
            dir.path().join(COUNTRIES_FILE),
            r#"[{"code": "US"}, {"code": "TR"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(WHY_BOYCOTT_FILE),
            r#"[{
                "icon": "💡",
                "title": {"en": "Why"},
                "description": {"en": "Because", "ur": "کیونکہ"}
            }]"#,
        )
        .unwrap();
        dir
    }

    const CATEGORIES: &str = r#"[{"id": "drinks", "name": {"en": "Drinks", "tr": "İçecekler"}}]"#;

    #[test]
    fn test_load_reads_every_file() {
        let dir = write_dataset(
            r#"[{
                "name": {"en": "Cola", "ar": "كولا"},
                "categoryId": "drinks",
                "country": "US",
                "alternatives": [
                    {"name": "Cola Turka", "link": "https://example.com", "country": "TR"}
                ]
            }]"#,
            CATEGORIES,
        );

        let catalog = Catalog::load(dir.path()).expect("dataset should load");
        assert_eq!(catalog.products().len(), 1);
        assert_eq!(catalog.countries().len(), 2);
        assert_eq!(catalog.why_boycott().len(), 1);

        let product = &catalog.products()[0];
        assert_eq!(product.category_id, "drinks");
        assert_eq!(product.name.resolve(Language::Ar), "كولا");
        assert_eq!(
            product.alternatives,
            vec![Alternative {
                name: "Cola Turka".to_string(),
                link: "https://example.com".to_string(),
                country: "TR".to_string(),
            }]
        );
        assert_eq!(
            catalog.category("drinks").map(|c| c.name.resolve(Language::Tr)),
            Some("İçecekler")
        );
        assert!(catalog.integrity_warnings().is_empty());
    }

    #[test]
    fn test_load_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains(PRODUCTS_FILE));
    }

    #[test]
    fn test_load_rejects_unknown_language_key() {
        let dir = write_dataset(
            r#"[{"name": {"en": "Cola", "xx": "?"}, "categoryId": "drinks", "country": "US"}]"#,
            CATEGORIES,
        );
        let err = Catalog::load(dir.path()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains(PRODUCTS_FILE));
        assert!(message.contains("unsupported language code 'xx'"));
    }

    #[test]
    fn test_load_rejects_dangling_category() {
        let dir = write_dataset(
            r#"[{"name": {"en": "Cola"}, "categoryId": "snacks", "country": "US"}]"#,
            CATEGORIES,
        );
        let err = Catalog::load(dir.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::DanglingCategory {
                index: 0,
                category_id: "snacks".to_string(),
            })
        );
    }

    #[test]
    fn test_new_rejects_duplicate_category() {
        let category = Category {
            id: "drinks".to_string(),
            name: LocalizedText::english("Drinks"),
        };
        let err = Catalog::new(Vec::new(), vec![category.clone(), category], Vec::new(), Vec::new())
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCategory("drinks".to_string()));
    }

    #[test]
    fn test_integrity_warnings_for_recoverable_gaps() {
        let dir = write_dataset(
            r#"[{
                "name": {"fr": "Cola"},
                "categoryId": "drinks",
                "country": "FR",
                "alternatives": [{"name": "Breizh", "link": "https://example.fr", "country": "FR"}]
            }]"#,
            CATEGORIES,
        );

        let catalog = Catalog::load(dir.path()).expect("recoverable gaps still load");
        let warnings = catalog.integrity_warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("no 'en' name"));
        assert!(warnings[1].contains("unknown country 'FR'"));
        assert!(warnings[2].contains("Breizh"));
        assert_eq!(catalog.products()[0].name.resolve(Language::En), "");
    }

    #[test]
    fn test_bundled_dataset_is_clean() {
        let dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let catalog = Catalog::load(dir).expect("bundled data should load");
        assert!(!catalog.products().is_empty());
        assert!(catalog.integrity_warnings().is_empty());
    }

    #[test]
    fn test_category_lookup_unknown_id() {
        let catalog = Catalog::new(Vec::new(), Vec::new(), Vec::new(), Vec::new()).unwrap();
        assert!(catalog.category("anything").is_none());
    }
}
