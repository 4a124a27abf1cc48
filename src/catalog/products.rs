use std::{collections::HashMap, io::Read, path::Path};

use anyhow::Context;

use crate::foundation::error::{TryOnError, TryOnResult};

/// Normalized relative path to an overlay image, the key of the overlay cache.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayImageRef(String);

impl OverlayImageRef {
    /// Normalize `source` (see [`normalize_rel_path`]) into a reference.
    pub fn new(source: &str) -> TryOnResult<Self> {
        normalize_rel_path(source).map(Self)
    }

    /// Normalized relative path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OverlayImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the product list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Product {
    /// Stable product identifier used for selection.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Relative path of the garment image.
    pub overlay: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct ProductList {
    products: Vec<Product>,
}

/// Read-only lookup from product id to overlay image.
///
/// A miss is never an error; callers treat it as "no overlay".
pub trait OverlayCatalog: Send + Sync {
    /// Overlay for `id`, if the product exists.
    fn lookup(&self, id: &str) -> Option<OverlayImageRef>;
}

/// In-memory catalog built from a static product list.
#[derive(Clone, Debug)]
pub struct StaticCatalog {
    products: Vec<Product>,
    by_id: HashMap<String, OverlayImageRef>,
}

impl StaticCatalog {
    /// Build from products, normalizing overlay paths and rejecting duplicate or empty ids.
    pub fn from_products(products: Vec<Product>) -> TryOnResult<Self> {
        let mut by_id = HashMap::with_capacity(products.len());
        for p in &products {
            if p.id.trim().is_empty() {
                return Err(TryOnError::validation("product id must be non-empty"));
            }
            let overlay = OverlayImageRef::new(&p.overlay).map_err(|e| {
                TryOnError::validation(format!("product '{}' overlay: {e}", p.id))
            })?;
            if by_id.insert(p.id.clone(), overlay).is_some() {
                return Err(TryOnError::validation(format!(
                    "duplicate product id '{}'",
                    p.id
                )));
            }
        }
        Ok(Self { products, by_id })
    }

    /// Parse a `{ "products": [...] }` JSON document.
    pub fn from_json_reader(reader: impl Read) -> TryOnResult<Self> {
        let list: ProductList = serde_json::from_reader(reader)
            .map_err(|e| TryOnError::validation(format!("parse catalog JSON: {e}")))?;
        Self::from_products(list.products)
    }

    /// Load a catalog JSON file.
    pub fn load(path: &Path) -> TryOnResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open catalog '{}'", path.display()))?;
        Self::from_json_reader(std::io::BufReader::new(f))
    }

    /// The garments shipped with the storefront.
    pub fn builtin() -> Self {
        let products: Vec<Product> = ["top1", "top4", "top5", "top6"]
            .into_iter()
            .map(|id| Product {
                id: id.to_string(),
                name: format!("{id} (front)"),
                overlay: format!("{id}_front.png"),
            })
            .collect();
        let by_id = products
            .iter()
            .map(|p| (p.id.clone(), OverlayImageRef(p.overlay.clone())))
            .collect();
        Self { products, by_id }
    }

    /// Products in declaration order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl OverlayCatalog for StaticCatalog {
    fn lookup(&self, id: &str) -> Option<OverlayImageRef> {
        self.by_id.get(id).cloned()
    }
}

/// Normalize a relative asset path: folds `\` to `/`, drops `.` segments, and rejects absolute
/// paths and `..`.
pub fn normalize_rel_path(source: &str) -> TryOnResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(TryOnError::validation("overlay paths must be relative"));
    }
    if s.is_empty() {
        return Err(TryOnError::validation("overlay path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(TryOnError::validation(
                "overlay paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(TryOnError::validation(
            "overlay path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/products.rs"]
mod tests;
