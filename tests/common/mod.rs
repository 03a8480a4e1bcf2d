use std::path::Path;
use tillpoint::application::engine::PosEngine;
use tillpoint::config::CheckoutConfig;
use tillpoint::domain::catalog::{Category, CategoryId, Product, ProductImage};
use tillpoint::infrastructure::in_memory::InMemoryBackend;
use tillpoint::infrastructure::launcher::RecordingLauncher;

pub fn category(id: u64, name: &str) -> Category {
    Category {
        id: CategoryId(id),
        name: name.to_string(),
    }
}

pub fn product(id: u64, name: &str, price: &str, category_ids: &[u64]) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: price.to_string(),
        images: vec![ProductImage {
            src: format!("https://img.example/{id}.jpg"),
        }],
        categories: category_ids
            .iter()
            .map(|&id| category(id, &format!("category-{id}")))
            .collect(),
    }
}

/// `count` products priced 1.00 each, ids 1..=count.
pub fn unit_products(count: u64) -> Vec<Product> {
    (1..=count)
        .map(|id| product(id, &format!("product-{id}"), "1.00", &[1]))
        .collect()
}

/// Engine wired to `backend` for both ports, with a recording launcher.
pub fn engine_with(backend: InMemoryBackend) -> (PosEngine, RecordingLauncher) {
    let launcher = RecordingLauncher::new();
    let engine = PosEngine::new(
        Box::new(backend.clone()),
        Box::new(backend),
        Box::new(launcher.clone()),
        CheckoutConfig::default(),
    );
    (engine, launcher)
}

pub fn write_script(path: &Path, actions: &[(&str, &str)]) -> Result<(), std::io::Error> {
    let file = std::fs::File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["action", "value"])?;
    for (action, value) in actions {
        wtr.write_record([*action, *value])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_fixture(
    path: &Path,
    categories: &[Category],
    products: &[Product],
) -> Result<(), std::io::Error> {
    let fixture = serde_json::json!({
        "categories": categories,
        "products": products,
    });
    std::fs::write(path, serde_json::to_string_pretty(&fixture)?)?;
    Ok(())
}
