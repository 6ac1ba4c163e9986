//! Name/value characteristics shown on a product page.

use super::catalog::{Notebook, Product, Smartphone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
    pub name: &'static str,
    pub value: String,
}

impl SpecRow {
    fn new(name: &'static str, value: &str) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }
}

/// Rows for one product instance. Smartphones list "SD max volume" only
/// when they have an SD slot.
pub fn spec_rows(product: &Product) -> Vec<SpecRow> {
    match product {
        Product::Notebook(n) => notebook_rows(n),
        Product::Smartphone(s) => smartphone_rows(s),
    }
}

fn notebook_rows(n: &Notebook) -> Vec<SpecRow> {
    vec![
        SpecRow::new("Diagonal", &n.diagonal),
        SpecRow::new("Display type", &n.display_type),
        SpecRow::new("Processor frequency", &n.processor_freq),
        SpecRow::new("RAM", &n.ram),
        SpecRow::new("Graphics card", &n.video),
        SpecRow::new("Time without charge", &n.time_without_charge),
    ]
}

fn smartphone_rows(s: &Smartphone) -> Vec<SpecRow> {
    let mut rows = vec![
        SpecRow::new("Diagonal", &s.diagonal),
        SpecRow::new("Display type", &s.display_type),
        SpecRow::new("Screen resolution", &s.resolution),
        SpecRow::new("RAM", &s.ram),
        SpecRow::new("Battery capacity", &s.battery_cap),
        SpecRow::new("SD", if s.sd { "Yes" } else { "No" }),
    ];
    if s.sd {
        rows.push(SpecRow::new(
            "SD max volume",
            s.sd_volume_max.as_deref().unwrap_or(""),
        ));
    }
    rows.push(SpecRow::new("Main camera", &s.main_cam_mp));
    rows.push(SpecRow::new("Front camera", &s.front_cam_mp));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{notebook, smartphone};

    fn names(rows: &[SpecRow]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn notebook_rows_in_fixed_order() {
        let rows = spec_rows(&notebook(1));
        assert_eq!(
            names(&rows),
            vec![
                "Diagonal",
                "Display type",
                "Processor frequency",
                "RAM",
                "Graphics card",
                "Time without charge",
            ]
        );
        assert_eq!(rows[3].value, "16 GB");
    }

    #[test]
    fn smartphone_with_sd_lists_max_volume() {
        let rows = spec_rows(&smartphone(1));
        assert_eq!(rows.len(), 9);
        assert!(rows.contains(&SpecRow {
            name: "SD max volume",
            value: "512 GB".to_string(),
        }));
        assert!(rows.contains(&SpecRow {
            name: "SD",
            value: "Yes".to_string(),
        }));
    }

    #[test]
    fn smartphone_without_sd_omits_max_volume() {
        let Product::Smartphone(mut phone) = smartphone(2) else {
            unreachable!()
        };
        phone.sd = false;
        let rows = spec_rows(&Product::Smartphone(phone));
        assert_eq!(rows.len(), 8);
        assert!(!names(&rows).contains(&"SD max volume"));
        assert_eq!(names(&rows).last(), Some(&"Front camera"));
    }

    #[test]
    fn rows_depend_only_on_the_instance() {
        let Product::Smartphone(mut without_sd) = smartphone(3) else {
            unreachable!()
        };
        without_sd.sd = false;
        let _ = spec_rows(&Product::Smartphone(without_sd));

        // a later phone with an SD slot still gets the row
        assert_eq!(spec_rows(&smartphone(4)).len(), 9);
    }
}
