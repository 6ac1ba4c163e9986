pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::cart_service::CartService;
use application::catalog_service::CatalogService;
use application::customer_service::CustomerService;
use application::order_service::OrderService;
use handlers::{carts, catalog, customers, orders};
use infrastructure::cart_repo::DieselCartRepository;
use infrastructure::catalog_repo::DieselCatalogRepository;
use infrastructure::customer_repo::DieselCustomerRepository;
use infrastructure::order_repo::DieselOrderRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in applied {
        log::info!("applied migration {version}");
    }
    Ok(())
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let catalog_svc = web::Data::new(CatalogService::new(DieselCatalogRepository::new(
        pool.clone(),
    )));
    let cart_svc = web::Data::new(CartService::new(DieselCartRepository::new(pool.clone())));
    let customer_svc = web::Data::new(CustomerService::new(
        DieselCustomerRepository::new(pool.clone()),
        DieselOrderRepository::new(pool.clone()),
    ));
    let order_svc = web::Data::new(OrderService::new(DieselOrderRepository::new(pool)));
    let api_doc = openapi::ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(catalog_svc.clone())
            .app_data(cart_svc.clone())
            .app_data(customer_svc.clone())
            .app_data(order_svc.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/products")
                    .route("/latest", web::get().to(catalog::latest_products))
                    .route("/notebook", web::post().to(catalog::create_notebook))
                    .route("/smartphone", web::post().to(catalog::create_smartphone))
                    .route("/{kind}/{slug}", web::get().to(catalog::product_detail)),
            )
            .service(
                web::scope("/categories")
                    .service(
                        web::resource("")
                            .route(web::get().to(catalog::sidebar))
                            .route(web::post().to(catalog::create_category)),
                    )
                    .route("/{slug}", web::get().to(catalog::category_detail)),
            )
            .service(
                web::scope("/customers")
                    .route("", web::post().to(customers::create_customer))
                    .route("/{id}", web::get().to(customers::get_customer)),
            )
            .service(
                web::scope("/carts")
                    .route("", web::post().to(carts::create_cart))
                    .route("/{id}", web::get().to(carts::get_cart))
                    .route("/{id}/lines", web::post().to(carts::add_line))
                    .service(
                        web::resource("/{id}/lines/{line_id}")
                            .route(web::patch().to(carts::update_line))
                            .route(web::delete().to(carts::remove_line)),
                    ),
            )
            .service(
                web::scope("/orders")
                    .service(
                        web::resource("")
                            .route(web::post().to(orders::create_order))
                            .route(web::get().to(orders::list_orders)),
                    )
                    .route("/{id}", web::get().to(orders::get_order))
                    .route("/{id}/status", web::patch().to(orders::update_status)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api_doc.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
