pub mod carts;
pub mod catalog;
pub mod customers;
pub mod orders;

use std::str::FromStr;

use actix_web::web;
use bigdecimal::BigDecimal;

use crate::application::cart_service::CartService;
use crate::application::catalog_service::CatalogService;
use crate::application::customer_service::CustomerService;
use crate::application::order_service::OrderService;
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::infrastructure::cart_repo::DieselCartRepository;
use crate::infrastructure::catalog_repo::DieselCatalogRepository;
use crate::infrastructure::customer_repo::DieselCustomerRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;

pub type Catalog = CatalogService<DieselCatalogRepository>;
pub type Carts = CartService<DieselCartRepository>;
pub type Customers = CustomerService<DieselCustomerRepository, DieselOrderRepository>;
pub type Orders = OrderService<DieselOrderRepository>;

/// Runs a synchronous service call on the blocking thread pool.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    Ok(web::block(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??)
}

/// Decimal amounts travel as strings to avoid floating-point issues, e.g. "9.99".
pub(crate) fn parse_decimal(field: &str, value: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(value)
        .map_err(|e| AppError::BadRequest(format!("Invalid {field} '{value}': {e}")))
}
