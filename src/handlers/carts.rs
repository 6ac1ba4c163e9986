use std::str::FromStr;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::cart::{validate_qty, Cart, CartLine, CartView};
use crate::domain::catalog::{ProductKind, ProductRef};
use crate::errors::AppError;

use super::{blocking, Carts};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCartRequest {
    pub owner_id: Option<i32>,
    #[serde(default)]
    pub for_anonymous_user: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    pub id: Option<i32>,
    pub customer_id: i32,
    pub product_type: String,
    pub product_id: i32,
    pub qty: i32,
    pub final_price: String,
}

impl From<&CartLine> for CartLineResponse {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id,
            customer_id: line.customer_id,
            product_type: line.product.kind.to_string(),
            product_id: line.product.id,
            qty: line.qty,
            final_price: line.final_price.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub id: i32,
    pub owner_id: Option<i32>,
    pub total_products: i32,
    pub final_price: String,
    pub in_order: bool,
    pub for_anonymous_user: bool,
    pub lines: Vec<CartLineResponse>,
}

impl CartResponse {
    fn new(cart: &Cart, lines: &[CartLine]) -> Self {
        Self {
            id: cart.id,
            owner_id: cart.owner_id,
            total_products: cart.total_products,
            final_price: cart.final_price.to_string(),
            in_order: cart.in_order,
            for_anonymous_user: cart.for_anonymous_user,
            lines: lines.iter().map(CartLineResponse::from).collect(),
        }
    }
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self::new(&view.cart, &view.lines)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddLineRequest {
    pub customer_id: i32,
    /// Product type name, e.g. "smartphone"
    pub product_type: String,
    pub product_id: i32,
    #[serde(default = "default_qty")]
    pub qty: i32,
}

fn default_qty() -> i32 {
    1
}

/// Either field group may be given; a product change is applied before a
/// quantity change.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLineRequest {
    pub qty: Option<i32>,
    pub product_type: Option<String>,
    pub product_id: Option<i32>,
}

impl UpdateLineRequest {
    fn product(&self) -> Result<Option<ProductRef>, AppError> {
        match (&self.product_type, self.product_id) {
            (None, None) => Ok(None),
            (Some(kind), Some(id)) => product_ref(kind, id).map(Some),
            _ => Err(AppError::BadRequest(
                "product_type and product_id must be given together".to_string(),
            )),
        }
    }
}

fn product_ref(kind: &str, id: i32) -> Result<ProductRef, AppError> {
    let kind = ProductKind::from_str(kind)?;
    Ok(ProductRef::new(kind, id))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /carts
#[utoipa::path(
    post,
    path = "/carts",
    request_body = CreateCartRequest,
    responses(
        (status = 201, description = "Cart created", body = CartResponse),
        (status = 400, description = "Unknown owner"),
    ),
    tag = "carts"
)]
pub async fn create_cart(
    carts: web::Data<Carts>,
    body: web::Json<CreateCartRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let cart = blocking(move || carts.create_cart(body.owner_id, body.for_anonymous_user)).await?;

    Ok(HttpResponse::Created().json(CartResponse::new(&cart, &[])))
}

/// GET /carts/{id}
#[utoipa::path(
    get,
    path = "/carts/{id}",
    params(
        ("id" = i32, Path, description = "Cart id"),
    ),
    responses(
        (status = 200, description = "Cart with its lines", body = CartResponse),
        (status = 404, description = "Cart not found"),
    ),
    tag = "carts"
)]
pub async fn get_cart(
    carts: web::Data<Carts>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let cart_id = path.into_inner();

    let view = blocking(move || carts.get_cart(cart_id)).await?;

    Ok(HttpResponse::Ok().json(CartResponse::from(view)))
}

/// POST /carts/{id}/lines
///
/// Adds a product to the cart. Responds 201 with the new line, or 200 with
/// the existing line when the product is already in the cart.
#[utoipa::path(
    post,
    path = "/carts/{id}/lines",
    params(
        ("id" = i32, Path, description = "Cart id"),
    ),
    request_body = AddLineRequest,
    responses(
        (status = 201, description = "Line created", body = CartLineResponse),
        (status = 200, description = "Product already in cart", body = CartLineResponse),
        (status = 400, description = "Invalid quantity or unknown product"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "carts"
)]
pub async fn add_line(
    carts: web::Data<Carts>,
    path: web::Path<i32>,
    body: web::Json<AddLineRequest>,
) -> Result<HttpResponse, AppError> {
    let cart_id = path.into_inner();
    let body = body.into_inner();
    let product = product_ref(&body.product_type, body.product_id)?;

    let (line, created) =
        blocking(move || carts.add_product(cart_id, body.customer_id, product, body.qty)).await?;

    let body = CartLineResponse::from(&line);
    if created {
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::Ok().json(body))
    }
}

/// PATCH /carts/{id}/lines/{line_id}
#[utoipa::path(
    patch,
    path = "/carts/{id}/lines/{line_id}",
    params(
        ("id" = i32, Path, description = "Cart id"),
        ("line_id" = i32, Path, description = "Cart line id"),
    ),
    request_body = UpdateLineRequest,
    responses(
        (status = 200, description = "Line updated and repriced", body = CartLineResponse),
        (status = 400, description = "Nothing to change, invalid quantity or unknown product"),
        (status = 404, description = "Cart line not found"),
        (status = 409, description = "Product already has a line in this cart"),
    ),
    tag = "carts"
)]
pub async fn update_line(
    carts: web::Data<Carts>,
    path: web::Path<(i32, i32)>,
    body: web::Json<UpdateLineRequest>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, line_id) = path.into_inner();
    let body = body.into_inner();
    let product = body.product()?;
    let qty = body.qty;
    if product.is_none() && qty.is_none() {
        return Err(AppError::BadRequest(
            "expected qty or product_type with product_id".to_string(),
        ));
    }
    if let Some(qty) = qty {
        validate_qty(qty)?;
    }

    let line = blocking(move || carts.update_line(cart_id, line_id, product, qty)).await?;

    Ok(HttpResponse::Ok().json(CartLineResponse::from(&line)))
}

/// DELETE /carts/{id}/lines/{line_id}
#[utoipa::path(
    delete,
    path = "/carts/{id}/lines/{line_id}",
    params(
        ("id" = i32, Path, description = "Cart id"),
        ("line_id" = i32, Path, description = "Cart line id"),
    ),
    responses(
        (status = 204, description = "Line removed"),
        (status = 404, description = "Cart line not found"),
    ),
    tag = "carts"
)]
pub async fn remove_line(
    carts: web::Data<Carts>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, line_id) = path.into_inner();

    blocking(move || carts.remove_line(cart_id, line_id)).await?;

    Ok(HttpResponse::NoContent().finish())
}
