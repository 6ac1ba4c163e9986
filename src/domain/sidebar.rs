use std::collections::HashMap;

use super::catalog::{Category, ProductKind};
use super::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub name: String,
    pub url: String,
    pub count: i64,
}

/// Product type counted for each category shown in the sidebar.
pub fn category_kind(category_name: &str) -> Option<ProductKind> {
    match category_name {
        "Notebooks" => Some(ProductKind::Notebook),
        "Smartphones" => Some(ProductKind::Smartphone),
        _ => None,
    }
}

/// Products per `(kind, category_id)`. Missing pairs count as zero.
pub type CategoryCounts = HashMap<(ProductKind, i32), i64>;

/// One entry per category, in the order given. Fails as a whole on the
/// first category without a [`category_kind`] mapping.
pub fn build_entries(
    categories: &[Category],
    counts: &CategoryCounts,
) -> Result<Vec<SidebarEntry>, DomainError> {
    categories
        .iter()
        .map(|category| {
            let kind = category_kind(&category.name)
                .ok_or_else(|| DomainError::UnmappedCategory(category.name.clone()))?;
            Ok(SidebarEntry {
                name: category.name.clone(),
                url: category.url(),
                count: counts.get(&(kind, category.id)).copied().unwrap_or(0),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i32, name: &str, slug: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn counts_mapped_kind_per_category_in_table_order() {
        let categories = vec![
            category(1, "Notebooks", "notebooks"),
            category(2, "Smartphones", "smartphones"),
        ];
        let mut counts = CategoryCounts::new();
        counts.insert((ProductKind::Notebook, 1), 3);
        // smartphones filed under the notebook category are not counted there
        counts.insert((ProductKind::Smartphone, 1), 4);

        let entries = build_entries(&categories, &counts).unwrap();
        assert_eq!(
            entries,
            vec![
                SidebarEntry {
                    name: "Notebooks".to_string(),
                    url: "/categories/notebooks".to_string(),
                    count: 3,
                },
                SidebarEntry {
                    name: "Smartphones".to_string(),
                    url: "/categories/smartphones".to_string(),
                    count: 0,
                },
            ]
        );
    }

    #[test]
    fn unmapped_category_fails_whole_computation() {
        let categories = vec![
            category(1, "Notebooks", "notebooks"),
            category(2, "Tablets", "tablets"),
        ];
        let err = build_entries(&categories, &CategoryCounts::new()).unwrap_err();
        assert!(matches!(err, DomainError::UnmappedCategory(ref name) if name == "Tablets"));
    }

    #[test]
    fn no_categories_no_entries() {
        assert!(build_entries(&[], &CategoryCounts::new()).unwrap().is_empty());
    }

    #[test]
    fn mapping_is_exact_on_names() {
        assert_eq!(category_kind("Notebooks"), Some(ProductKind::Notebook));
        assert_eq!(category_kind("notebooks"), None);
        assert_eq!(category_kind("Tablets"), None);
    }
}
