use crate::error::{PosError, Result};
use reqwest::Url;

/// Checkout settings carried by the engine for every handoff.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// ISO 4217 code sent to the payment application. Fixed per terminal.
    pub currency: String,
    /// The terminal's own origin; both return callbacks point here.
    pub return_origin: Url,
    /// URI scheme of the external payment application.
    pub payment_scheme: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency: "GBP".to_string(),
            return_origin: Url::parse("pos://terminal").expect("static origin"),
            payment_scheme: "izettle".to_string(),
        }
    }
}

impl CheckoutConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let currency =
            std::env::var("TILLPOINT_CURRENCY").unwrap_or(defaults.currency);
        let payment_scheme =
            std::env::var("TILLPOINT_PAYMENT_SCHEME").unwrap_or(defaults.payment_scheme);
        let return_origin = match std::env::var("TILLPOINT_RETURN_ORIGIN") {
            Ok(raw) => Url::parse(&raw)
                .map_err(|e| PosError::Validation(format!("TILLPOINT_RETURN_ORIGIN: {e}")))?,
            Err(_) => defaults.return_origin,
        };
        Ok(Self {
            currency,
            return_origin,
            payment_scheme,
        })
    }
}

/// Environment configuration for the terminal.
///
/// The backend base URL and credential pair are required whenever the HTTP
/// backend is in use; checkout settings fall back to fixed defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub checkout: CheckoutConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let raw_url = required("TILLPOINT_API_URL")?;
        let api_url = Url::parse(&raw_url)
            .map_err(|e| PosError::Validation(format!("TILLPOINT_API_URL: {e}")))?;
        Ok(Self {
            api_url,
            consumer_key: required("TILLPOINT_CONSUMER_KEY")?,
            consumer_secret: required("TILLPOINT_CONSUMER_SECRET")?,
            checkout: CheckoutConfig::from_env()?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| PosError::Validation(format!("{name} must be set")))
}
