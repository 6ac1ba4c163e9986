use log::{debug, info, warn};

use crate::domain::catalog::{
    Category, NewCategory, NewNotebook, NewSmartphone, Product, ProductKind,
};
use crate::domain::errors::DomainError;
use crate::domain::latest;
use crate::domain::ports::CatalogRepository;
use crate::domain::sidebar::{self, CategoryCounts, SidebarEntry};
use crate::domain::spec_table::{spec_rows, SpecRow};

#[derive(Debug, Clone)]
pub struct CategoryDetail {
    pub category: Category,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: Product,
    pub specs: Vec<SpecRow>,
}

pub struct CatalogService<R> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Most recent products of the requested types, see [`latest::collect_latest`].
    pub fn latest_items(
        &self,
        type_names: &[String],
        affinity: Option<&str>,
    ) -> Result<Vec<Product>, DomainError> {
        debug!("latest items for {type_names:?}, affinity {affinity:?}");
        latest::collect_latest(type_names, affinity, |kind, limit| {
            self.repo.latest_of_kind(kind, limit)
        })
    }

    pub fn sidebar_counts(&self) -> Result<Vec<SidebarEntry>, DomainError> {
        let categories = self.repo.categories()?;
        let mut counts = CategoryCounts::new();
        for kind in ProductKind::ALL {
            for (category_id, count) in self.repo.count_by_category(kind)? {
                counts.insert((kind, category_id), count);
            }
        }
        sidebar::build_entries(&categories, &counts).inspect_err(|e| {
            warn!("sidebar counts failed: {e}");
        })
    }

    pub fn create_category(&self, category: NewCategory) -> Result<Category, DomainError> {
        category.validate()?;
        let created = self.repo.create_category(category)?;
        info!("created category {} ({})", created.id, created.slug);
        Ok(created)
    }

    pub fn create_notebook(&self, notebook: NewNotebook) -> Result<Product, DomainError> {
        notebook.validate()?;
        let created = self.repo.create_notebook(notebook)?;
        info!("created product {}", created.product_ref());
        Ok(created)
    }

    pub fn create_smartphone(&self, smartphone: NewSmartphone) -> Result<Product, DomainError> {
        smartphone.validate()?;
        let created = self.repo.create_smartphone(smartphone)?;
        info!("created product {}", created.product_ref());
        Ok(created)
    }

    /// The category and its products, notebooks first, newest first within
    /// each type.
    pub fn category_detail(&self, slug: &str) -> Result<CategoryDetail, DomainError> {
        let category = self
            .repo
            .find_category_by_slug(slug)?
            .ok_or(DomainError::NotFound("Category"))?;
        let mut products = Vec::new();
        for kind in ProductKind::ALL {
            products.extend(self.repo.in_category(kind, category.id)?);
        }
        Ok(CategoryDetail { category, products })
    }

    pub fn product_detail(&self, kind: ProductKind, slug: &str) -> Result<ProductDetail, DomainError> {
        let product = self
            .repo
            .find_by_slug(kind, slug)?
            .ok_or(DomainError::NotFound("Product"))?;
        let specs = spec_rows(&product);
        Ok(ProductDetail { product, specs })
    }
}
