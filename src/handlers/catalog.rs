use std::str::FromStr;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::catalog_service::{CategoryDetail, ProductDetail};
use crate::domain::catalog::{
    Category, NewCategory, NewNotebook, NewProductBase, NewSmartphone, Product, ProductKind,
};
use crate::domain::image::ImageUpload;
use crate::domain::sidebar::SidebarEntry;
use crate::errors::AppError;

use super::{blocking, parse_decimal, Catalog};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    /// Product type name, e.g. "notebook"
    pub kind: String,
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub url: String,
    pub image: String,
    pub image_width: i32,
    pub image_height: i32,
    pub description: Option<String>,
    pub price: String,
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        let base = p.base();
        Self {
            id: base.id,
            kind: p.kind().to_string(),
            category_id: base.category_id,
            title: base.title.clone(),
            slug: base.slug.clone(),
            url: p.url(),
            image: base.image.clone(),
            image_width: base.image_width,
            image_height: base.image_height,
            description: base.description.clone(),
            price: base.price.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpecRowResponse {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    pub specs: Vec<SpecRowResponse>,
}

impl From<ProductDetail> for ProductDetailResponse {
    fn from(detail: ProductDetail) -> Self {
        Self {
            product: ProductResponse::from(&detail.product),
            specs: detail
                .specs
                .into_iter()
                .map(|row| SpecRowResponse {
                    name: row.name.to_string(),
                    value: row.value,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LatestParams {
    /// Comma separated product type names, e.g. "notebook,smartphone"
    pub types: Option<String>,
    /// Product type whose items are listed first
    pub with_respect_to: Option<String>,
}

impl LatestParams {
    fn type_names(&self) -> Vec<String> {
        self.types
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SidebarEntryResponse {
    pub name: String,
    pub url: String,
    pub count: i64,
}

impl From<SidebarEntry> for SidebarEntryResponse {
    fn from(e: SidebarEntry) -> Self {
        Self {
            name: e.name,
            url: e.url,
            count: e.count,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub url: String,
}

impl From<&Category> for CategoryResponse {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            slug: c.slug.clone(),
            url: c.url(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDetailResponse {
    pub category: CategoryResponse,
    pub products: Vec<ProductResponse>,
}

impl From<CategoryDetail> for CategoryDetailResponse {
    fn from(detail: CategoryDetail) -> Self {
        Self {
            category: CategoryResponse::from(&detail.category),
            products: detail.products.iter().map(ProductResponse::from).collect(),
        }
    }
}

/// Metadata of an already uploaded image file.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ImageUploadRequest {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductBaseRequest {
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: ImageUploadRequest,
    pub description: Option<String>,
    /// Decimal price as a string, e.g. "999.99"
    pub price: String,
}

impl ProductBaseRequest {
    fn into_domain(self) -> Result<NewProductBase, AppError> {
        let price = parse_decimal("price", &self.price)?;
        Ok(NewProductBase {
            category_id: self.category_id,
            title: self.title,
            slug: self.slug,
            image: ImageUpload {
                path: self.image.path,
                width: self.image.width,
                height: self.image.height,
                size_bytes: self.image.size_bytes,
            },
            description: self.description,
            price,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNotebookRequest {
    #[serde(flatten)]
    pub base: ProductBaseRequest,
    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSmartphoneRequest {
    #[serde(flatten)]
    pub base: ProductBaseRequest,
    pub diagonal: String,
    pub display_type: String,
    pub resolution: String,
    pub battery_cap: String,
    pub ram: String,
    #[serde(default = "default_sd")]
    pub sd: bool,
    pub sd_volume_max: Option<String>,
    pub main_cam_mp: String,
    pub front_cam_mp: String,
}

fn default_sd() -> bool {
    true
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /products/latest
///
/// Up to five newest products of each requested type, concatenated in the
/// order the types were given. With `with_respect_to`, items of that type
/// come first.
#[utoipa::path(
    get,
    path = "/products/latest",
    params(LatestParams),
    responses(
        (status = 200, description = "Latest products", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn latest_products(
    catalog: web::Data<Catalog>,
    query: web::Query<LatestParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let type_names = params.type_names();
    let affinity = params.with_respect_to;

    let products = blocking(move || catalog.latest_items(&type_names, affinity.as_deref())).await?;

    let body: Vec<ProductResponse> = products.iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /products/{kind}/{slug}
///
/// Returns the product together with its characteristics table.
#[utoipa::path(
    get,
    path = "/products/{kind}/{slug}",
    params(
        ("kind" = String, Path, description = "Product type name"),
        ("slug" = String, Path, description = "Product slug"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDetailResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn product_detail(
    catalog: web::Data<Catalog>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (kind, slug) = path.into_inner();
    let kind = ProductKind::from_str(&kind).map_err(|_| AppError::NotFound("Product"))?;

    let detail = blocking(move || catalog.product_detail(kind, &slug)).await?;

    Ok(HttpResponse::Ok().json(ProductDetailResponse::from(detail)))
}

/// POST /products/notebook
#[utoipa::path(
    post,
    path = "/products/notebook",
    request_body = CreateNotebookRequest,
    responses(
        (status = 201, description = "Notebook created", body = ProductResponse),
        (status = 400, description = "Invalid product data"),
        (status = 409, description = "Slug already taken"),
    ),
    tag = "catalog"
)]
pub async fn create_notebook(
    catalog: web::Data<Catalog>,
    body: web::Json<CreateNotebookRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let notebook = NewNotebook {
        base: body.base.into_domain()?,
        diagonal: body.diagonal,
        display_type: body.display_type,
        processor_freq: body.processor_freq,
        ram: body.ram,
        video: body.video,
        time_without_charge: body.time_without_charge,
    };

    let product = blocking(move || catalog.create_notebook(notebook)).await?;

    Ok(HttpResponse::Created().json(ProductResponse::from(&product)))
}

/// POST /products/smartphone
#[utoipa::path(
    post,
    path = "/products/smartphone",
    request_body = CreateSmartphoneRequest,
    responses(
        (status = 201, description = "Smartphone created", body = ProductResponse),
        (status = 400, description = "Invalid product data"),
        (status = 409, description = "Slug already taken"),
    ),
    tag = "catalog"
)]
pub async fn create_smartphone(
    catalog: web::Data<Catalog>,
    body: web::Json<CreateSmartphoneRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let smartphone = NewSmartphone {
        base: body.base.into_domain()?,
        diagonal: body.diagonal,
        display_type: body.display_type,
        resolution: body.resolution,
        battery_cap: body.battery_cap,
        ram: body.ram,
        sd: body.sd,
        sd_volume_max: body.sd_volume_max,
        main_cam_mp: body.main_cam_mp,
        front_cam_mp: body.front_cam_mp,
    };

    let product = blocking(move || catalog.create_smartphone(smartphone)).await?;

    Ok(HttpResponse::Created().json(ProductResponse::from(&product)))
}

/// GET /categories
///
/// Sidebar rows: every category with the number of products it holds.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Category counts", body = [SidebarEntryResponse]),
        (status = 500, description = "A category has no product type mapping"),
    ),
    tag = "catalog"
)]
pub async fn sidebar(catalog: web::Data<Catalog>) -> Result<HttpResponse, AppError> {
    let entries = blocking(move || catalog.sidebar_counts()).await?;

    let body: Vec<SidebarEntryResponse> =
        entries.into_iter().map(SidebarEntryResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /categories
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid name or slug"),
        (status = 409, description = "Slug already taken"),
    ),
    tag = "catalog"
)]
pub async fn create_category(
    catalog: web::Data<Catalog>,
    body: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let category = NewCategory {
        name: body.name,
        slug: body.slug,
    };

    let created = blocking(move || catalog.create_category(category)).await?;

    Ok(HttpResponse::Created().json(CategoryResponse::from(&created)))
}

/// GET /categories/{slug}
#[utoipa::path(
    get,
    path = "/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug"),
    ),
    responses(
        (status = 200, description = "Category with its products", body = CategoryDetailResponse),
        (status = 404, description = "Category not found"),
    ),
    tag = "catalog"
)]
pub async fn category_detail(
    catalog: web::Data<Catalog>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();

    let detail = blocking(move || catalog.category_detail(&slug)).await?;

    Ok(HttpResponse::Ok().json(CategoryDetailResponse::from(detail)))
}
