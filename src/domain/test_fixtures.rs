//! Product values for unit tests.

use std::str::FromStr;

use bigdecimal::BigDecimal;

use super::catalog::{Notebook, Product, ProductBase, Smartphone};

pub fn base(id: i32, slug: &str, price: &str) -> ProductBase {
    ProductBase {
        id,
        category_id: 1,
        title: format!("Product {slug}"),
        slug: slug.to_string(),
        image: format!("products/{slug}.jpg"),
        image_width: 800,
        image_height: 600,
        description: None,
        price: BigDecimal::from_str(price).expect("valid decimal"),
    }
}

pub fn notebook(id: i32) -> Product {
    Product::Notebook(Notebook {
        base: base(id, &format!("notebook-{id}"), "999.00"),
        diagonal: "14\"".to_string(),
        display_type: "IPS".to_string(),
        processor_freq: "3.2 GHz".to_string(),
        ram: "16 GB".to_string(),
        video: "Integrated".to_string(),
        time_without_charge: "10 h".to_string(),
    })
}

pub fn smartphone(id: i32) -> Product {
    Product::Smartphone(Smartphone {
        base: base(id, &format!("smartphone-{id}"), "499.00"),
        diagonal: "6.1\"".to_string(),
        display_type: "OLED".to_string(),
        resolution: "2532x1170".to_string(),
        battery_cap: "3200 mAh".to_string(),
        ram: "6 GB".to_string(),
        sd: true,
        sd_volume_max: Some("512 GB".to_string()),
        main_cam_mp: "12 MP".to_string(),
        front_cam_mp: "12 MP".to_string(),
    })
}
