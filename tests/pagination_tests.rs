mod common;

use tillpoint::application::catalog::{MAX_PAGES, PER_PAGE, fetch_catalog};
use tillpoint::infrastructure::in_memory::InMemoryBackend;

#[tokio::test]
async fn test_full_listing_is_collected_in_order() {
    // 250 items span pages of 100/100/50 before the terminating empty page.
    let backend = InMemoryBackend::new(
        vec![common::category(1, "drinks")],
        common::unit_products(250),
    );

    let catalog = fetch_catalog(&backend).await;

    assert_eq!(catalog.products.len(), 250);
    let ids: Vec<u64> = catalog.products.iter().map(|p| p.id).collect();
    let expected: Vec<u64> = (1..=250).collect();
    assert_eq!(ids, expected);
    assert_eq!(catalog.categories.len(), 1);
}

#[tokio::test]
async fn test_failed_page_keeps_earlier_pages() {
    let backend = InMemoryBackend::new(Vec::new(), common::unit_products(250))
        .with_failing_products_from(2);

    let catalog = fetch_catalog(&backend).await;

    // Page 1 survived; the failure on page 2 did not discard it.
    assert_eq!(catalog.products.len(), 100);
    assert_eq!(catalog.products[0].id, 1);
    assert_eq!(catalog.products[99].id, 100);
}

#[tokio::test]
async fn test_category_failure_degrades_independently() {
    let backend =
        InMemoryBackend::new(Vec::new(), common::unit_products(10)).with_failing_categories();

    let catalog = fetch_catalog(&backend).await;

    assert!(catalog.categories.is_empty());
    assert_eq!(catalog.products.len(), 10);
}

#[tokio::test]
async fn test_everything_failing_degrades_to_empty() {
    let backend = InMemoryBackend::new(Vec::new(), common::unit_products(10))
        .with_failing_categories()
        .with_failing_products_from(1);

    let catalog = fetch_catalog(&backend).await;

    assert!(catalog.categories.is_empty());
    assert!(catalog.products.is_empty());
}

#[tokio::test]
async fn test_page_cap_bounds_a_backend_that_never_ends() {
    let backend = InMemoryBackend::new(
        Vec::new(),
        common::unit_products(u64::from((MAX_PAGES + 10) * PER_PAGE)),
    );

    let catalog = fetch_catalog(&backend).await;

    assert_eq!(catalog.products.len(), (MAX_PAGES * PER_PAGE) as usize);
}

#[tokio::test]
async fn test_refresh_replaces_catalog_and_spares_cart() {
    let backend = InMemoryBackend::new(Vec::new(), common::unit_products(10));
    let (mut engine, _launcher) = common::engine_with(backend);

    engine.refresh_catalog().await;
    engine.add_to_cart(3).unwrap();

    // A second refresh replaces the catalog wholesale instead of merging.
    engine.refresh_catalog().await;
    assert_eq!(engine.visible_products().len(), 10);

    // The cart is independent of catalog state.
    assert_eq!(engine.cart().len(), 1);
}
