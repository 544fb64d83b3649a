//! User-interaction collaborator contract.
//!
//! Every call is a suspension point: the engine awaits a human
//! decision and resumes exactly where it stopped. No character state is
//! mutated while a request is outstanding.

use async_trait::async_trait;
use crawl_core::CharacterId;

/// External player prompts and dice requests.
#[async_trait]
pub trait Interaction: Send + Sync {
    /// Requests a skill/attribute roll with the given modifier and
    /// returns whether it succeeded.
    async fn request_roll(&self, who: CharacterId, prompt: &str, modifier: i32) -> bool;

    /// Simple yes/no decision.
    async fn request_yes_no(&self, who: CharacterId, prompt: &str) -> bool;

    /// Pick one of several options; `None` means the player declined.
    async fn request_choice(
        &self,
        who: CharacterId,
        prompt: &str,
        options: &[String],
    ) -> Option<usize>;
}
