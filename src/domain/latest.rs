//! "Latest products" across product types, as shown on the main page.

use std::str::FromStr;

use super::catalog::{Product, ProductKind};

/// How many of the most recent rows each product type contributes.
pub const LATEST_PER_KIND: i64 = 5;

/// Registered kinds named in `type_names`, in call order, each once.
/// Unregistered names are skipped.
pub fn requested_kinds<S: AsRef<str>>(type_names: &[S]) -> Vec<ProductKind> {
    let mut kinds = Vec::new();
    for name in type_names {
        if let Ok(kind) = ProductKind::from_str(name.as_ref()) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }
    kinds
}

/// Collects up to [`LATEST_PER_KIND`] products per requested kind through
/// `fetch` and concatenates them in call order. `fetch` must return rows by
/// descending id.
///
/// When `affinity` is itself a registered type name that was requested, the
/// result is stably re-ranked so products whose type name starts with it
/// come first.
pub fn collect_latest<S, F, E>(
    type_names: &[S],
    affinity: Option<&str>,
    mut fetch: F,
) -> Result<Vec<Product>, E>
where
    S: AsRef<str>,
    F: FnMut(ProductKind, i64) -> Result<Vec<Product>, E>,
{
    let mut products = Vec::new();
    for kind in requested_kinds(type_names) {
        let rows = fetch(kind, LATEST_PER_KIND)?;
        products.extend(rows.into_iter().take(LATEST_PER_KIND as usize));
    }
    Ok(rank_by_affinity(products, type_names, affinity))
}

/// Stable sort putting products whose type name has `affinity` as a prefix
/// first. A no-op unless `affinity` is registered and among `type_names`.
pub fn rank_by_affinity<S: AsRef<str>>(
    mut products: Vec<Product>,
    type_names: &[S],
    affinity: Option<&str>,
) -> Vec<Product> {
    let Some(affinity) = affinity else {
        return products;
    };
    let requested = type_names.iter().any(|name| name.as_ref() == affinity);
    if !requested || ProductKind::from_str(affinity).is_err() {
        return products;
    }
    products.sort_by_key(|p| !p.kind().as_str().starts_with(affinity));
    products
}
