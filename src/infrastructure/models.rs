use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::catalog::{
    Category, NewProductBase, NewNotebook, NewSmartphone, Notebook, Product, ProductBase,
    Smartphone,
};
use crate::domain::errors::DomainError;
use crate::schema::{cart_products, carts, categories, customers, notebooks, orders, smartphones};

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow {
    pub name: String,
    pub slug: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = notebooks)]
#[diesel(belongs_to(CategoryRow, foreign_key = category_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotebookRow {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_width: i32,
    pub image_height: i32,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = notebooks)]
pub struct NewNotebookRow {
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_width: i32,
    pub image_height: i32,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = smartphones)]
#[diesel(belongs_to(CategoryRow, foreign_key = category_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SmartphoneRow {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_width: i32,
    pub image_height: i32,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub diagonal: String,
    pub display_type: String,
    pub resolution: String,
    pub battery_cap: String,
    pub ram: String,
    pub sd: bool,
    pub sd_volume_max: Option<String>,
    pub main_cam_mp: String,
    pub front_cam_mp: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = smartphones)]
pub struct NewSmartphoneRow {
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_width: i32,
    pub image_height: i32,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub diagonal: String,
    pub display_type: String,
    pub resolution: String,
    pub battery_cap: String,
    pub ram: String,
    pub sd: bool,
    pub sd_volume_max: Option<String>,
    pub main_cam_mp: String,
    pub front_cam_mp: String,
}

impl From<NotebookRow> for Product {
    fn from(row: NotebookRow) -> Self {
        Product::Notebook(Notebook {
            base: ProductBase {
                id: row.id,
                category_id: row.category_id,
                title: row.title,
                slug: row.slug,
                image: row.image,
                image_width: row.image_width,
                image_height: row.image_height,
                description: row.description,
                price: row.price,
            },
            diagonal: row.diagonal,
            display_type: row.display_type,
            processor_freq: row.processor_freq,
            ram: row.ram,
            video: row.video,
            time_without_charge: row.time_without_charge,
        })
    }
}

impl From<SmartphoneRow> for Product {
    fn from(row: SmartphoneRow) -> Self {
        Product::Smartphone(Smartphone {
            base: ProductBase {
                id: row.id,
                category_id: row.category_id,
                title: row.title,
                slug: row.slug,
                image: row.image,
                image_width: row.image_width,
                image_height: row.image_height,
                description: row.description,
                price: row.price,
            },
            diagonal: row.diagonal,
            display_type: row.display_type,
            resolution: row.resolution,
            battery_cap: row.battery_cap,
            ram: row.ram,
            sd: row.sd,
            sd_volume_max: row.sd_volume_max,
            main_cam_mp: row.main_cam_mp,
            front_cam_mp: row.front_cam_mp,
        })
    }
}

fn display_size(base: &NewProductBase) -> Result<(i32, i32), DomainError> {
    let (width, height) = base.display_size();
    let width = i32::try_from(width)
        .map_err(|_| DomainError::InvalidInput(format!("image width {width} is too large")))?;
    let height = i32::try_from(height)
        .map_err(|_| DomainError::InvalidInput(format!("image height {height} is too large")))?;
    Ok((width, height))
}

impl TryFrom<NewNotebook> for NewNotebookRow {
    type Error = DomainError;

    fn try_from(n: NewNotebook) -> Result<Self, Self::Error> {
        let (image_width, image_height) = display_size(&n.base)?;
        Ok(NewNotebookRow {
            category_id: n.base.category_id,
            title: n.base.title,
            slug: n.base.slug,
            image: n.base.image.path,
            image_width,
            image_height,
            description: n.base.description,
            price: n.base.price,
            diagonal: n.diagonal,
            display_type: n.display_type,
            processor_freq: n.processor_freq,
            ram: n.ram,
            video: n.video,
            time_without_charge: n.time_without_charge,
        })
    }
}

impl TryFrom<NewSmartphone> for NewSmartphoneRow {
    type Error = DomainError;

    fn try_from(s: NewSmartphone) -> Result<Self, Self::Error> {
        let (image_width, image_height) = display_size(&s.base)?;
        Ok(NewSmartphoneRow {
            category_id: s.base.category_id,
            title: s.base.title,
            slug: s.base.slug,
            image: s.base.image.path,
            image_width,
            image_height,
            description: s.base.description,
            price: s.base.price,
            diagonal: s.diagonal,
            display_type: s.display_type,
            resolution: s.resolution,
            battery_cap: s.battery_cap,
            ram: s.ram,
            sd: s.sd,
            sd_volume_max: s.sd_volume_max,
            main_cam_mp: s.main_cam_mp,
            front_cam_mp: s.front_cam_mp,
        })
    }
}

// ── Customers and carts ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: i32,
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow {
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = carts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartRow {
    pub id: i32,
    pub owner_id: Option<i32>,
    pub total_products: i32,
    pub final_price: BigDecimal,
    pub in_order: bool,
    pub for_anonymous_user: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = carts)]
pub struct NewCartRow {
    pub owner_id: Option<i32>,
    pub for_anonymous_user: bool,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = cart_products)]
#[diesel(belongs_to(CartRow, foreign_key = cart_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartProductRow {
    pub id: i32,
    pub customer_id: i32,
    pub cart_id: i32,
    pub content_type: String,
    pub object_id: i32,
    pub qty: i32,
    pub final_price: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_products)]
pub struct NewCartProductRow {
    pub customer_id: i32,
    pub cart_id: i32,
    pub content_type: String,
    pub object_id: i32,
    pub qty: i32,
    pub final_price: BigDecimal,
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub cart_id: Option<i32>,
    pub address: Option<String>,
    pub status: String,
    pub buying_type: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub order_date: NaiveDate,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub cart_id: Option<i32>,
    pub address: Option<String>,
    pub status: String,
    pub buying_type: String,
    pub comment: Option<String>,
    pub order_date: NaiveDate,
}
