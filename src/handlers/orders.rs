use std::str::FromStr;

use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::order::{BuyingType, NewOrder, OrderStatus, OrderView};
use crate::errors::AppError;

use super::{blocking, Orders};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub cart_id: Option<i32>,
    pub address: Option<String>,
    /// "self" or "delivery". Defaults to "delivery".
    pub buying_type: Option<String>,
    pub comment: Option<String>,
    /// Requested date, `YYYY-MM-DD`. Defaults to today.
    #[schema(value_type = Option<String>, format = Date)]
    pub order_date: Option<NaiveDate>,
}

impl CreateOrderRequest {
    fn into_domain(self) -> Result<NewOrder, AppError> {
        let buying_type = match self.buying_type.as_deref() {
            Some(value) => BuyingType::from_str(value)?,
            None => BuyingType::default(),
        };
        Ok(NewOrder {
            customer_id: self.customer_id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            cart_id: self.cart_id,
            address: self.address,
            buying_type,
            comment: self.comment,
            order_date: self
                .order_date
                .unwrap_or_else(|| Utc::now().date_naive()),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
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
    pub created_at: String,
    pub order_date: String,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        Self {
            id: o.id,
            customer_id: o.customer_id,
            first_name: o.first_name,
            last_name: o.last_name,
            phone: o.phone,
            cart_id: o.cart_id,
            address: o.address,
            status: o.status.to_string(),
            buying_type: o.buying_type.to_string(),
            comment: o.comment,
            created_at: o.created_at.to_rfc3339(),
            order_date: o.order_date.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of "new", "in_progress", "is_ready", "completed"
    pub status: String,
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Places an order. When a cart is given it is flagged as ordered in the
/// same transaction as the order insert.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = CreateOrderResponse),
        (status = 400, description = "Missing buyer details"),
        (status = 404, description = "Customer or cart not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    orders: web::Data<Orders>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = body.into_inner().into_domain()?;

    let id = blocking(move || orders.place_order(order)).await?;

    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    orders: web::Data<Orders>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let result = blocking(move || orders.get_order(order_id)).await?;

    match result {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(AppError::NotFound("Order")),
    }
}

/// GET /orders
///
/// Returns a paginated list of orders, newest first.
/// Use `page` (1-based) and `limit` to control pagination.
#[utoipa::path(
    get,
    path = "/orders",
    params(ListOrdersParams),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    orders: web::Data<Orders>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);

    let result = blocking(move || orders.list_orders(page, limit)).await?;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(OrderResponse::from).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// PATCH /orders/{id}/status
#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn update_status(
    orders: web::Data<Orders>,
    path: web::Path<i32>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let status = OrderStatus::from_str(&body.status)?;

    blocking(move || orders.update_status(order_id, status)).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(buying_type: Option<&str>, order_date: Option<&str>) -> CreateOrderRequest {
        serde_json::from_value(json!({
            "customer_id": 1,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "phone": "+44 20 7946 0000",
            "buying_type": buying_type,
            "order_date": order_date,
        }))
        .unwrap()
    }

    #[test]
    fn defaults_to_delivery_today() {
        let order = request(None, None).into_domain().unwrap();
        assert_eq!(order.buying_type, BuyingType::Delivery);
        assert_eq!(order.order_date, Utc::now().date_naive());
        assert!(order.cart_id.is_none());
    }

    #[test]
    fn explicit_buying_type_and_date_are_kept() {
        let order = request(Some("self"), Some("2024-07-14"))
            .into_domain()
            .unwrap();
        assert_eq!(order.buying_type, BuyingType::SelfPickup);
        assert_eq!(
            order.order_date,
            NaiveDate::from_ymd_opt(2024, 7, 14).unwrap()
        );
    }

    #[test]
    fn unknown_buying_type_is_a_bad_request() {
        let err = request(Some("drone"), None).into_domain().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn list_params_default_to_first_page_of_twenty() {
        let params: ListOrdersParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 20);
    }
}
