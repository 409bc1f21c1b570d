//! Trait describing a runnable client front-end.
use anyhow::Result;
use async_trait::async_trait;
use runtime::RuntimeHandle;

/// Frontend abstraction for presentation layers.
///
/// Frontends talk to the battle only through [`RuntimeHandle`]:
/// - Subscribe to events (Battle, Turn, Match)
/// - Submit the four player intents
/// - Query the current state
///
/// Frontends do NOT own the Runtime.
///
/// # Example Implementation
///
/// ```no_run
/// use anyhow::Result;
/// use async_trait::async_trait;
/// use battle_client::Frontend;
/// use runtime::RuntimeHandle;
///
/// struct Spectator;
///
/// #[async_trait]
/// impl Frontend for Spectator {
///     async fn run(&mut self, handle: RuntimeHandle) -> Result<()> {
///         let result = handle.wait_for_result().await?;
///         println!("{} wins", result.winner);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend until the battle ends or the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend encounters a fatal error.
    async fn run(&mut self, handle: RuntimeHandle) -> Result<()>;
}
