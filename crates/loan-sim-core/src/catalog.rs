use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::LoanSimError;
use crate::types::{LoanRequest, ProductTerms, SimulationRequest};
use crate::validation::validate_product;
use crate::LoanSimResult;

/// A stored product together with its catalog id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    #[serde(flatten)]
    pub product: ProductTerms,
}

/// Id-keyed store of loan products.
///
/// Ids start at 1 and are never reused, even after a removal. Every product
/// is validated before it is stored, so lookups always hand the engine a
/// well-formed snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCatalog {
    next_id: u32,
    products: BTreeMap<u32, CatalogEntry>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            products: BTreeMap::new(),
        }
    }

    /// Load a catalog from a JSON file. A missing file is an empty catalog.
    pub fn load(path: impl AsRef<Path>) -> LoanSimResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no catalog file, starting empty");
            return Ok(Self::new());
        }
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_stored(serde_json::from_str(&contents)?)?;
        debug!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Re-check a deserialized catalog: every product is trimmed and
    /// validated, keys must match entry ids, and the id counter is moved past
    /// the largest stored id so `create` never lands on an existing product.
    fn from_stored(mut stored: Self) -> LoanSimResult<Self> {
        for (key, entry) in stored.products.iter_mut() {
            if entry.id != *key {
                return Err(LoanSimError::SerializationError(format!(
                    "catalog key {} holds product id {}",
                    key, entry.id
                )));
            }
            entry.product = normalise(entry.product.clone());
            validate_product(&entry.product)?;
        }

        if let Some(&last) = stored.products.keys().next_back() {
            let after_last = last.checked_add(1).ok_or_else(|| {
                LoanSimError::SerializationError("catalog ids exhausted".into())
            })?;
            stored.next_id = stored.next_id.max(after_last);
        }
        stored.next_id = stored.next_id.max(1);

        Ok(stored)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> LoanSimResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products, ordered by id.
    pub fn list(&self) -> Vec<&CatalogEntry> {
        self.products.values().collect()
    }

    pub fn get(&self, id: u32) -> LoanSimResult<&CatalogEntry> {
        self.products
            .get(&id)
            .ok_or(LoanSimError::ProductNotFound { id })
    }

    /// Validate and store a new product under the next free id.
    pub fn create(&mut self, product: ProductTerms) -> LoanSimResult<&CatalogEntry> {
        let product = normalise(product);
        validate_product(&product)?;

        let id = self.next_id;
        self.next_id += 1;
        info!(id, name = %product.name, "product created");
        self.products.insert(id, CatalogEntry { id, product });
        self.get(id)
    }

    /// Replace an existing product. Validation runs before the id lookup, so
    /// an invalid body is reported as such even for an unknown id.
    pub fn update(&mut self, id: u32, product: ProductTerms) -> LoanSimResult<&CatalogEntry> {
        let product = normalise(product);
        validate_product(&product)?;

        let entry = self
            .products
            .get_mut(&id)
            .ok_or(LoanSimError::ProductNotFound { id })?;
        entry.product = product;
        info!(id, name = %entry.product.name, "product updated");
        Ok(&*entry)
    }

    pub fn remove(&mut self, id: u32) -> LoanSimResult<CatalogEntry> {
        let entry = self
            .products
            .remove(&id)
            .ok_or(LoanSimError::ProductNotFound { id })?;
        info!(id, "product removed");
        Ok(entry)
    }

    /// Look up the product a request refers to and split it into the pieces
    /// the engine takes. Fails with `ProductNotFound` before any validation.
    pub fn resolve(&self, request: &SimulationRequest) -> LoanSimResult<(ProductTerms, LoanRequest)> {
        let entry = self.get(request.product_id)?;
        Ok((entry.product.clone(), request.loan_request()))
    }
}

fn normalise(product: ProductTerms) -> ProductTerms {
    ProductTerms::new(
        &product.name,
        product.annual_nominal_rate_percent,
        product.max_term_months,
    )
}
