//! Top-level client orchestrating the battle runtime and a frontend.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Runtime (battle engine, clock and event bus)
//!   └─→ Frontend (issues intents and renders events via RuntimeHandle)
//! ```
//!
//! The binary in `main.rs` is the composition root: it loads configuration,
//! sets up logging, builds the lineup and injects everything through
//! [`ClientBuilder`].

pub mod autoplay;
mod builder;
pub mod config;
mod frontend;
pub mod logging;
pub mod render;

pub use autoplay::{AutoplayFrontend, FirstAliveStrategy, LowestHealthStrategy, TargetingStrategy};
pub use builder::ClientBuilder;
pub use config::{ClientConfig, Targeting};
pub use frontend::Frontend;

use anyhow::Result;

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. `Client::builder()` receives an already built runtime and a frontend
/// 2. `Client::run()` hands a [`runtime::RuntimeHandle`] to the frontend
/// 3. When the frontend returns, the runtime is shut down and its workers
///    joined
pub struct Client {
    runtime: runtime::Runtime,
    frontend: Box<dyn Frontend>,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Run the frontend to completion, then stop the runtime.
    ///
    /// A frontend error takes precedence over a shutdown error.
    pub async fn run(self) -> Result<()> {
        let mut frontend = self.frontend;
        let frontend_result = frontend.run(self.runtime.handle()).await;

        let shutdown_result = self.runtime.shutdown().await;
        if let Err(error) = &shutdown_result {
            tracing::error!(target: "client", "Runtime shutdown failed: {}", error);
        }

        frontend_result?;
        shutdown_result.map_err(Into::into)
    }
}
