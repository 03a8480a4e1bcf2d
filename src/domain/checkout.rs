use crate::error::{PosError, Result};
use reqwest::Url;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Query parameter the payment application appends when redirecting back
/// after a completed payment.
pub const SUCCESS_MARKER: &str = "success";
/// Query parameter appended when the payment was declined or aborted.
pub const FAILURE_MARKER: &str = "failure";

/// Payment outcome state shown to the operator.
///
/// Leaves `Idle` only through a return marker and comes back to `Idle` only
/// through explicit operator acknowledgement, never a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Idle,
    Success,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Idle => "idle",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Outcome signalled by the payment application's redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnSignal {
    Success,
    Failure,
}

/// A single checkout attempt, ready to hand to the payment application.
///
/// Exists only for the duration of the handoff; nothing persists it.
#[derive(Debug, Clone, PartialEq)]
pub struct HandoffRequest {
    /// Amount in integer minor units (total × 100, rounded half-up away
    /// from zero).
    pub amount_minor: u64,
    pub currency: String,
    pub success_url: Url,
    pub failure_url: Url,
}

impl HandoffRequest {
    /// Builds the request for `total`, with both callbacks on `origin`.
    ///
    /// A non-positive total is a blocking validation error: checkout must
    /// not start on an empty cart.
    pub fn new(total: Decimal, currency: &str, origin: &Url) -> Result<Self> {
        if total <= Decimal::ZERO {
            return Err(PosError::Validation(
                "cart is empty; add items before checkout".to_string(),
            ));
        }
        let amount_minor = (total * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .ok_or_else(|| PosError::Validation(format!("cart total {total} out of range")))?;

        let mut success_url = origin.clone();
        success_url
            .query_pairs_mut()
            .append_pair(SUCCESS_MARKER, "true");
        let mut failure_url = origin.clone();
        failure_url
            .query_pairs_mut()
            .append_pair(FAILURE_MARKER, "true");

        Ok(Self {
            amount_minor,
            currency: currency.to_string(),
            success_url,
            failure_url,
        })
    }

    /// Renders the deep link that transfers control to the payment
    /// application. Both callback URLs are embedded URL-encoded.
    pub fn deep_link(&self, scheme: &str) -> Result<Url> {
        let mut link = Url::parse(&format!("{scheme}://payment"))
            .map_err(|e| PosError::Validation(format!("payment scheme {scheme:?}: {e}")))?;
        link.query_pairs_mut()
            .append_pair("amount", &self.amount_minor.to_string())
            .append_pair("currency", &self.currency)
            .append_pair("successURL", self.success_url.as_str())
            .append_pair("failureURL", self.failure_url.as_str());
        Ok(link)
    }
}

/// Reads the return marker from a request URL, if any.
///
/// The marker is an unsigned query flag and is trusted as-is: the terminal
/// is assumed physically controlled, so a hand-crafted URL is outside the
/// threat model. If both markers are present, success wins.
pub fn return_signal(url: &Url) -> Option<ReturnSignal> {
    let mut signal = None;
    for (key, _) in url.query_pairs() {
        match key.as_ref() {
            SUCCESS_MARKER => return Some(ReturnSignal::Success),
            FAILURE_MARKER => signal = Some(ReturnSignal::Failure),
            _ => {}
        }
    }
    signal
}

/// Removes the return markers from `url`, leaving other query parameters
/// intact. Idempotent: a URL without markers passes through unchanged.
pub fn strip_return_markers(url: &Url) -> Url {
    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SUCCESS_MARKER && key != FAILURE_MARKER)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    cleaned.set_query(None);
    if !remaining.is_empty() {
        let mut pairs = cleaned.query_pairs_mut();
        for (key, value) in &remaining {
            pairs.append_pair(key, value);
        }
    }
    cleaned
}
