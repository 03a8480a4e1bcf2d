use crate::domain::ports::PaymentLauncher;
use crate::error::{PosError, Result};
use reqwest::Url;
use std::sync::{Arc, Mutex};

/// Prints the deep link for the platform wrapper to open.
///
/// The terminal core cannot navigate by itself; whatever hosts it watches
/// stdout for the link and performs the actual handoff.
#[derive(Debug, Default)]
pub struct StdoutLauncher;

impl PaymentLauncher for StdoutLauncher {
    fn launch(&self, link: &Url) -> Result<()> {
        println!("payment link: {link}");
        Ok(())
    }
}

/// Records launched links instead of handing off. Test double.
#[derive(Default, Clone)]
pub struct RecordingLauncher {
    links: Arc<Mutex<Vec<Url>>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launched(&self) -> Vec<Url> {
        self.links.lock().expect("launcher lock").clone()
    }
}

impl PaymentLauncher for RecordingLauncher {
    fn launch(&self, link: &Url) -> Result<()> {
        self.links
            .lock()
            .map_err(|_| PosError::Validation("launcher lock poisoned".to_string()))?
            .push(link.clone());
        Ok(())
    }
}
