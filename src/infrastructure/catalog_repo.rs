use diesel::dsl::count;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{
    Category, NewCategory, NewNotebook, NewSmartphone, Product, ProductKind,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::schema::{categories, notebooks, smartphones};

use super::models::{
    CategoryRow, NewCategoryRow, NewNotebookRow, NewSmartphoneRow, NotebookRow, SmartphoneRow,
};

pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogRepository for DieselCatalogRepository {
    fn create_category(&self, category: NewCategory) -> Result<Category, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(categories::table)
            .values(&NewCategoryRow {
                name: category.name,
                slug: category.slug,
            })
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = categories::table
            .order(categories::id.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = categories::table
            .filter(categories::slug.eq(slug))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Category::from))
    }

    fn count_by_category(&self, kind: ProductKind) -> Result<Vec<(i32, i64)>, DomainError> {
        let mut conn = self.pool.get()?;
        let counts = match kind {
            ProductKind::Notebook => notebooks::table
                .group_by(notebooks::category_id)
                .select((notebooks::category_id, count(notebooks::id)))
                .load::<(i32, i64)>(&mut conn)?,
            ProductKind::Smartphone => smartphones::table
                .group_by(smartphones::category_id)
                .select((smartphones::category_id, count(smartphones::id)))
                .load::<(i32, i64)>(&mut conn)?,
        };
        Ok(counts)
    }

    fn create_notebook(&self, notebook: NewNotebook) -> Result<Product, DomainError> {
        let row = NewNotebookRow::try_from(notebook)?;
        let mut conn = self.pool.get()?;
        let created = diesel::insert_into(notebooks::table)
            .values(&row)
            .returning(NotebookRow::as_returning())
            .get_result(&mut conn)?;
        Ok(created.into())
    }

    fn create_smartphone(&self, smartphone: NewSmartphone) -> Result<Product, DomainError> {
        let row = NewSmartphoneRow::try_from(smartphone)?;
        let mut conn = self.pool.get()?;
        let created = diesel::insert_into(smartphones::table)
            .values(&row)
            .returning(SmartphoneRow::as_returning())
            .get_result(&mut conn)?;
        Ok(created.into())
    }

    fn latest_of_kind(&self, kind: ProductKind, limit: i64) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let products: Vec<Product> = match kind {
            ProductKind::Notebook => notebooks::table
                .order(notebooks::id.desc())
                .limit(limit)
                .select(NotebookRow::as_select())
                .load(&mut conn)?
                .into_iter()
                .map(Product::from)
                .collect(),
            ProductKind::Smartphone => smartphones::table
                .order(smartphones::id.desc())
                .limit(limit)
                .select(SmartphoneRow::as_select())
                .load(&mut conn)?
                .into_iter()
                .map(Product::from)
                .collect(),
        };
        Ok(products)
    }

    fn find_by_slug(&self, kind: ProductKind, slug: &str) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let product = match kind {
            ProductKind::Notebook => notebooks::table
                .filter(notebooks::slug.eq(slug))
                .select(NotebookRow::as_select())
                .first(&mut conn)
                .optional()?
                .map(Product::from),
            ProductKind::Smartphone => smartphones::table
                .filter(smartphones::slug.eq(slug))
                .select(SmartphoneRow::as_select())
                .first(&mut conn)
                .optional()?
                .map(Product::from),
        };
        Ok(product)
    }

    fn in_category(&self, kind: ProductKind, category_id: i32) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let products: Vec<Product> = match kind {
            ProductKind::Notebook => notebooks::table
                .filter(notebooks::category_id.eq(category_id))
                .order(notebooks::id.desc())
                .select(NotebookRow::as_select())
                .load(&mut conn)?
                .into_iter()
                .map(Product::from)
                .collect(),
            ProductKind::Smartphone => smartphones::table
                .filter(smartphones::category_id.eq(category_id))
                .order(smartphones::id.desc())
                .select(SmartphoneRow::as_select())
                .load(&mut conn)?
                .into_iter()
                .map(Product::from)
                .collect(),
        };
        Ok(products)
    }
}
