use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{Customer, CustomerView, NewCustomer};
use crate::errors::AppError;

use super::orders::OrderResponse;
use super::{blocking, Customers};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i32,
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub orders: Vec<OrderResponse>,
}

impl CustomerResponse {
    fn new(customer: Customer, orders: Vec<OrderResponse>) -> Self {
        Self {
            id: customer.id,
            user_id: customer.user_id,
            phone: customer.phone,
            address: customer.address,
            orders,
        }
    }
}

impl From<CustomerView> for CustomerResponse {
    fn from(view: CustomerView) -> Self {
        let orders = view.orders.into_iter().map(OrderResponse::from).collect();
        Self::new(view.customer, orders)
    }
}

/// POST /customers
#[utoipa::path(
    post,
    path = "/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid phone"),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    customers: web::Data<Customers>,
    body: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let customer = NewCustomer {
        user_id: body.user_id,
        phone: body.phone,
        address: body.address,
    };

    let created = blocking(move || customers.create_customer(customer)).await?;

    Ok(HttpResponse::Created().json(CustomerResponse::new(created, vec![])))
}

/// GET /customers/{id}
///
/// Returns the customer with the orders they placed, most recent first.
#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(
        ("id" = i32, Path, description = "Customer id"),
    ),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn get_customer(
    customers: web::Data<Customers>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let view = blocking(move || customers.customer_detail(id)).await?;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(view)))
}
