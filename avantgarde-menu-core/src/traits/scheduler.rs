//! Deferred execution on the host's main tick

use crate::traits::HostEnvironment;
use crate::types::{Notice, StatusEffect, UserId};

/// Delay in host ticks. `0` means "the next tick", never inline.
pub type Ticks = u64;

/// Unit of work that must run on the host's main context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledTask {
    ConsoleCommand(String),
    UserCommand { user: UserId, command: String },
    ToggleEffect { user: UserId, effect: StatusEffect },
    Notify { user: UserId, notice: Notice },
}

impl ScheduledTask {
    /// The command line this task dispatches, if any
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::ConsoleCommand(command) | Self::UserCommand { command, .. } => Some(command),
            Self::ToggleEffect { .. } | Self::Notify { .. } => None,
        }
    }

    /// Execute against the host. Only call this from the main context.
    pub async fn run(self, host: &dyn HostEnvironment) {
        match self {
            Self::ConsoleCommand(command) => {
                log::debug!("Console dispatch: {command}");
                host.execute_as_console(&command).await;
            }
            Self::UserCommand { user, command } => {
                log::debug!("User {user} dispatch: {command}");
                host.execute_as_user(&user, &command).await;
            }
            Self::ToggleEffect { user, effect } => {
                let active = host.toggle_effect(&user, effect).await;
                let notice = if active {
                    Notice::success(format!("{} enabled", effect.display_name()))
                } else {
                    Notice::warning(format!("{} disabled", effect.display_name()))
                };
                host.send_notice(&user, notice).await;
            }
            Self::Notify { user, notice } => host.send_notice(&user, notice).await,
        }
    }
}

/// Scheduling port injected into the interpreter
///
/// Implementations run tasks serially on a single context, each no earlier
/// than `delay` ticks after it was posted. Tasks with strictly increasing
/// delays therefore run in posting order. Scheduling is fire-and-forget:
/// there is no handle, no cancellation and no completion feedback.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, task: ScheduledTask, delay: Ticks);
}
