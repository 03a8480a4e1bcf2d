use clap::Parser;
use miette::{IntoDiagnostic, Result};
use reqwest::Url;
use std::fs::File;
use std::path::PathBuf;
use tillpoint::application::engine::PosEngine;
use tillpoint::config::{CheckoutConfig, Config};
use tillpoint::domain::catalog::CategoryId;
use tillpoint::domain::checkout::PaymentStatus;
use tillpoint::domain::order::SyncOutcome;
use tillpoint::domain::ports::{CatalogApiBox, OrderApiBox, PaymentLauncherBox};
use tillpoint::infrastructure::in_memory::{CatalogFixture, InMemoryBackend};
use tillpoint::infrastructure::launcher::StdoutLauncher;
use tillpoint::infrastructure::woocommerce::WooCommerceApi;
use tillpoint::interfaces::csv::action_reader::{Action, ActionReader};
use tillpoint::interfaces::csv::session_writer::SessionWriter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Operator action script (CSV with action,value columns)
    script: PathBuf,

    /// Offline catalog fixture (JSON). If set, no backend is contacted and
    /// orders are recorded locally.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// URL the terminal was launched with, carrying any return markers.
    #[arg(long)]
    return_url: Option<Url>,

    /// Initial category selection.
    #[arg(long)]
    category: Option<CategoryId>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let launcher: PaymentLauncherBox = Box::new(StdoutLauncher);

    let mut engine = if let Some(path) = &cli.catalog {
        let file = File::open(path).into_diagnostic()?;
        let fixture: CatalogFixture = serde_json::from_reader(file).into_diagnostic()?;
        let backend = InMemoryBackend::from_fixture(fixture);
        let catalog_api: CatalogApiBox = Box::new(backend.clone());
        let order_api: OrderApiBox = Box::new(backend);
        let checkout = CheckoutConfig::from_env().into_diagnostic()?;
        PosEngine::new(catalog_api, order_api, launcher, checkout)
    } else {
        let config = Config::from_env().into_diagnostic()?;
        let api = WooCommerceApi::new(
            config.api_url.clone(),
            config.consumer_key.clone(),
            config.consumer_secret.clone(),
        );
        let catalog_api: CatalogApiBox = Box::new(api.clone());
        let order_api: OrderApiBox = Box::new(api);
        PosEngine::new(catalog_api, order_api, launcher, config.checkout)
    };

    // A launch URL is reconciled exactly once, before anything else runs.
    if let Some(url) = &cli.return_url {
        let cleaned = engine.handle_return(url).await.into_diagnostic()?;
        tracing::debug!(%cleaned, "return markers stripped");
        report_reconciliation(&engine);
    }

    engine.refresh_catalog().await;
    engine.select_category(cli.category);
    println!(
        "catalog: {} categories, {} products visible",
        engine.categories().len(),
        engine.visible_products().len()
    );

    let script = File::open(cli.script).into_diagnostic()?;
    for action_result in ActionReader::new(script).actions() {
        match action_result {
            Ok(action) => {
                if let Err(e) = apply_action(&mut engine, action) {
                    eprintln!("Error processing action: {e}");
                }
            }
            Err(e) => eprintln!("Error reading action: {e}"),
        }
    }

    let stdout = std::io::stdout();
    let mut writer = SessionWriter::new(stdout.lock());
    writer
        .write_summary(engine.status(), engine.cart())
        .into_diagnostic()?;

    Ok(())
}

fn apply_action(engine: &mut PosEngine, action: Action) -> tillpoint::error::Result<()> {
    match action {
        Action::Add(product_id) => {
            engine.add_to_cart(product_id)?;
            println!(
                "cart: {} items, total {}",
                engine.cart().len(),
                engine.cart().total()
            );
        }
        Action::Filter(category) => {
            engine.select_category(category);
            println!("showing {} products", engine.visible_products().len());
        }
        Action::Checkout => {
            engine.start_checkout()?;
        }
        Action::Ack => engine.acknowledge_status(),
    }
    Ok(())
}

fn report_reconciliation(engine: &PosEngine) {
    match engine.status() {
        PaymentStatus::Success => match engine.sync_outcome() {
            Some(SyncOutcome::Synced(id)) => println!("payment successful; order {id} synced"),
            Some(SyncOutcome::NeedsReconciliation(reason)) => println!(
                "payment successful; order sync failed, manual reconciliation required: {reason}"
            ),
            None => println!("payment successful"),
        },
        PaymentStatus::Failed => println!("payment failed; cart kept for retry"),
        PaymentStatus::Idle => {}
    }
}
