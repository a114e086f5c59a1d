//! Host server abstract Trait

use async_trait::async_trait;

use crate::types::{Notice, StatusEffect, UserId};

/// Permission and command-execution subsystems of the host server
///
/// Command execution and effect toggles must only be invoked from the host's
/// main tick. The engine never calls them directly; it goes through a
/// [`Scheduler`](super::Scheduler) whose executor owns that context.
#[async_trait]
pub trait HostEnvironment: Send + Sync {
    /// Check whether a user holds a capability
    ///
    /// # Arguments
    /// * `user` - User to check
    /// * `permission` - Capability string
    async fn has_permission(&self, user: &UserId, permission: &str) -> bool;

    /// Run a command as the console actor
    async fn execute_as_console(&self, command: &str);

    /// Run a command as the given user
    async fn execute_as_user(&self, user: &UserId, command: &str);

    /// Toggle a status effect, returning whether it is now active
    async fn toggle_effect(&self, user: &UserId, effect: StatusEffect) -> bool;

    /// Deliver a chat-style message (side channel, not the menu surface)
    async fn send_notice(&self, user: &UserId, notice: Notice);
}
