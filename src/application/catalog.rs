use crate::domain::catalog::Catalog;
use crate::domain::ports::CatalogApi;

/// Products requested per page.
pub const PER_PAGE: u32 = 100;
/// Upper bound on pages fetched in one refresh; guards against a backend
/// that never serves an empty page.
pub const MAX_PAGES: u32 = 50;

/// Fetches categories and the full paginated product listing.
///
/// Pages are fetched strictly one at a time, starting at page 1; the listing
/// ends at the first empty page. Degrades instead of failing: a category
/// error yields empty categories, a failed product page keeps the pages
/// collected so far. A partial catalog beats none.
pub async fn fetch_catalog(api: &dyn CatalogApi) -> Catalog {
    let categories = match api.categories().await {
        Ok(categories) => categories,
        Err(err) => {
            tracing::warn!("category fetch failed, continuing without categories: {err}");
            Vec::new()
        }
    };

    let mut products = Vec::new();
    for page in 1..=MAX_PAGES {
        match api.products_page(page, PER_PAGE).await {
            Ok(batch) if batch.is_empty() => break,
            Ok(batch) => products.extend(batch),
            Err(err) => {
                tracing::warn!(
                    page,
                    collected = products.len(),
                    "product page failed, keeping what was fetched: {err}"
                );
                break;
            }
        }
    }

    tracing::info!(
        categories = categories.len(),
        products = products.len(),
        "catalog refreshed"
    );
    Catalog {
        categories,
        products,
    }
}
