use utoipa::OpenApi;

use crate::handlers::{carts, catalog, customers, orders};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Catalog, carts, customers and orders of an electronics store."
    ),
    paths(
        catalog::latest_products,
        catalog::product_detail,
        catalog::create_notebook,
        catalog::create_smartphone,
        catalog::sidebar,
        catalog::create_category,
        catalog::category_detail,
        carts::create_cart,
        carts::get_cart,
        carts::add_line,
        carts::update_line,
        carts::remove_line,
        customers::create_customer,
        customers::get_customer,
        orders::create_order,
        orders::get_order,
        orders::list_orders,
        orders::update_status,
    ),
    components(schemas(
        catalog::ProductResponse,
        catalog::SpecRowResponse,
        catalog::ProductDetailResponse,
        catalog::SidebarEntryResponse,
        catalog::CreateCategoryRequest,
        catalog::CategoryResponse,
        catalog::CategoryDetailResponse,
        catalog::ImageUploadRequest,
        catalog::ProductBaseRequest,
        catalog::CreateNotebookRequest,
        catalog::CreateSmartphoneRequest,
        carts::CreateCartRequest,
        carts::CartResponse,
        carts::CartLineResponse,
        carts::AddLineRequest,
        carts::UpdateLineRequest,
        customers::CreateCustomerRequest,
        customers::CustomerResponse,
        orders::CreateOrderRequest,
        orders::CreateOrderResponse,
        orders::OrderResponse,
        orders::ListOrdersResponse,
        orders::UpdateStatusRequest,
    )),
    tags(
        (name = "catalog", description = "Categories and products"),
        (name = "carts", description = "Carts and their lines"),
        (name = "customers", description = "Customer accounts"),
        (name = "orders", description = "Order placement and tracking"),
    )
)]
pub struct ApiDoc;
