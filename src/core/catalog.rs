//! Payment method catalog
//!
//! The provider's list of payment methods, with two properties per method:
//! whether it accepts an issuer token (`ideal,ideal_ABNANL2A`) and whether it
//! belongs to the pay-later family. The built-in catalog mirrors the
//! provider's standard offering; deployments can replace it with a JSON file:
//!
//! ```json
//! { "methods": [ { "name": "ideal", "supportsIssuer": true, "payLater": false } ] }
//! ```

use crate::core::traits::MethodCatalog;
use crate::types::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSpec {
    pub name: String,
    #[serde(default)]
    pub supports_issuer: bool,
    #[serde(default)]
    pub pay_later: bool,
}

impl MethodSpec {
    pub fn new(name: &str, supports_issuer: bool, pay_later: bool) -> Self {
        MethodSpec {
            name: name.to_string(),
            supports_issuer,
            pay_later,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    methods: Vec<MethodSpec>,
}

// (name, supports issuer, pay later)
const STANDARD_METHODS: &[(&str, bool, bool)] = &[
    ("applepay", false, false),
    ("bancontact", false, false),
    ("banktransfer", false, false),
    ("belfius", false, false),
    ("billie", false, true),
    ("blik", false, false),
    ("creditcard", false, false),
    ("directdebit", false, false),
    ("eps", false, false),
    ("giftcard", true, false),
    ("ideal", true, false),
    ("kbc", true, false),
    ("klarnapaylater", false, true),
    ("klarnapaynow", false, true),
    ("klarnasliceit", false, true),
    ("mybank", false, false),
    ("paypal", false, false),
    ("paysafecard", false, false),
    ("przelewy24", false, false),
    ("sofort", false, false),
    ("trustly", false, false),
    ("twint", false, false),
];

static STANDARD: LazyLock<ProviderMethodCatalog> = LazyLock::new(|| {
    ProviderMethodCatalog::new(
        STANDARD_METHODS
            .iter()
            .map(|&(name, supports_issuer, pay_later)| {
                MethodSpec::new(name, supports_issuer, pay_later)
            }),
    )
});

/// Catalog backed by a name-indexed table
///
/// Method names are matched exactly (the provider's identifiers are lowercase).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMethodCatalog {
    methods: HashMap<String, MethodSpec>,
}

impl ProviderMethodCatalog {
    /// Build a catalog from entries; a later entry replaces an earlier one with the same name
    pub fn new(methods: impl IntoIterator<Item = MethodSpec>) -> Self {
        ProviderMethodCatalog {
            methods: methods
                .into_iter()
                .map(|spec| (spec.name.clone(), spec))
                .collect(),
        }
    }

    /// The provider's standard catalog
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Parse a catalog configuration document
    ///
    /// # Errors
    ///
    /// Returns `EngineError::CatalogError` if the document is not valid JSON for
    /// the catalog shape, lists no methods, or contains blank or duplicate names.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| EngineError::catalog_error(&e.to_string()))?;

        if file.methods.is_empty() {
            return Err(EngineError::catalog_error("no payment methods defined"));
        }

        let mut methods = HashMap::with_capacity(file.methods.len());
        for spec in file.methods {
            if spec.name.trim().is_empty() {
                return Err(EngineError::catalog_error("payment method name must not be blank"));
            }
            if let Some(previous) = methods.insert(spec.name.clone(), spec) {
                return Err(EngineError::catalog_error(&format!(
                    "payment method '{}' is defined twice",
                    previous.name
                )));
            }
        }

        Ok(ProviderMethodCatalog { methods })
    }

    /// Load a catalog configuration file
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        if !path.exists() {
            return Err(EngineError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get(&self, method: &str) -> Option<&MethodSpec> {
        self.methods.get(method)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl MethodCatalog for ProviderMethodCatalog {
    fn is_known(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    fn supports_issuer(&self, method: &str) -> bool {
        self.get(method).is_some_and(|spec| spec.supports_issuer)
    }

    fn is_pay_later(&self, method: &str) -> bool {
        self.get(method).is_some_and(|spec| spec.pay_later)
    }
}
