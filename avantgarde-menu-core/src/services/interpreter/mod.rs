//! Item command mini-language
//!
//! An item's `command` string is classified into exactly one [`Action`], in
//! this order:
//!
//! 1. `[special]back`
//! 2. `[special]<flow>` (input flows and toggle flows)
//! 3. `[special]open_url:<url>`
//! 4. `[console]<rest>`
//! 5. `[player]<rest>`
//! 6. anything else, run as if prefixed with `[player]`
//!
//! An item with a submenu opens it, even when a command is also set.
//! An item with neither does nothing.

pub mod flows;

use std::sync::Arc;

pub use flows::{FlowPlan, PlannedStep};

use crate::error::MenuResult;
use crate::traits::{HostEnvironment, ScheduledTask, Scheduler};
use crate::types::{
    EngineSettings, FlowForm, FlowKind, FormResponse, MenuItem, Notice, StatusEffect, Viewer,
};

const SPECIAL_PREFIX: &str = "[special]";
const CONSOLE_PREFIX: &str = "[console]";
const PLAYER_PREFIX: &str = "[player]";
const BACK_DIRECTIVE: &str = "back";
const OPEN_URL_DIRECTIVE: &str = "open_url:";
const PLAYER_PLACEHOLDER: &str = "%player%";

/// Classified item behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Back,
    OpenFlow(FlowKind),
    Toggle(StatusEffect),
    OpenUrl(String),
    /// Command line run by the console actor, placeholder not yet substituted
    Console(String),
    /// Command line run by the viewer, placeholder not yet substituted
    Player(String),
    OpenSubmenu(String),
    /// Neither command nor submenu
    Noop,
}

impl Action {
    /// Classify an item: its submenu wins over its command.
    #[must_use]
    pub fn classify_item(item: &MenuItem) -> Self {
        match (&item.command, &item.submenu) {
            (_, Some(submenu)) => Self::OpenSubmenu(submenu.clone()),
            (Some(command), None) => Self::classify_command(command),
            (None, None) => Self::Noop,
        }
    }

    /// Classify a command string.
    ///
    /// Surrounding whitespace is trimmed before the prefix match, so
    /// `" [console]say hi "` is still a console command. The text after the
    /// prefix is kept as is; leading blanks are dropped at substitution time.
    #[must_use]
    pub fn classify_command(command: &str) -> Self {
        let command = command.trim();
        if command.is_empty() {
            return Self::Noop;
        }

        if let Some(directive) = command.strip_prefix(SPECIAL_PREFIX) {
            if directive == BACK_DIRECTIVE {
                return Self::Back;
            }
            if let Some(flow) = FlowKind::from_directive(directive) {
                return Self::OpenFlow(flow);
            }
            if let Some(effect) = StatusEffect::from_directive(directive) {
                return Self::Toggle(effect);
            }
            if let Some(url) = directive.strip_prefix(OPEN_URL_DIRECTIVE) {
                let url = url.trim();
                if url.is_empty() {
                    log::warn!("Empty open_url directive");
                    return Self::Noop;
                }
                return Self::OpenUrl(url.to_string());
            }
            log::warn!("Unknown special directive '{directive}', running as a player command");
            return Self::Player(command.to_string());
        }

        if let Some(rest) = command.strip_prefix(CONSOLE_PREFIX) {
            return Self::Console(rest.to_string());
        }
        if let Some(rest) = command.strip_prefix(PLAYER_PREFIX) {
            return Self::Player(rest.to_string());
        }
        Self::Player(command.to_string())
    }
}

/// What the coordinator must do after an action ran.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    /// Pop the navigation stack and show the parent
    Back,
    /// Push and show a submenu
    Enter(String),
    /// Show the flow's form and wait for its confirm
    AwaitInput(FlowForm),
    /// Terminal; the view closes
    Done,
}

/// Executes classified actions against the host ports.
pub struct CommandInterpreter {
    host: Arc<dyn HostEnvironment>,
    scheduler: Arc<dyn Scheduler>,
    settings: Arc<EngineSettings>,
}

impl CommandInterpreter {
    #[must_use]
    pub fn new(
        host: Arc<dyn HostEnvironment>,
        scheduler: Arc<dyn Scheduler>,
        settings: Arc<EngineSettings>,
    ) -> Self {
        Self {
            host,
            scheduler,
            settings,
        }
    }

    /// Run an action for a viewer.
    ///
    /// Host commands are only ever scheduled, never run inline.
    pub async fn execute(&self, viewer: &Viewer, action: Action) -> MenuResult<Interpretation> {
        match action {
            Action::Back => Ok(Interpretation::Back),
            Action::OpenSubmenu(id) => Ok(Interpretation::Enter(id)),
            Action::OpenFlow(flow) => Ok(Interpretation::AwaitInput(flows::form(flow))),
            Action::Toggle(effect) => {
                self.scheduler.schedule(
                    ScheduledTask::ToggleEffect {
                        user: viewer.id,
                        effect,
                    },
                    0,
                );
                Ok(Interpretation::Done)
            }
            Action::OpenUrl(url) => {
                self.host.send_notice(&viewer.id, Notice::link(url)).await;
                Ok(Interpretation::Done)
            }
            Action::Console(rest) => {
                self.scheduler.schedule(
                    ScheduledTask::ConsoleCommand(substitute_player(&rest, &viewer.name)),
                    0,
                );
                Ok(Interpretation::Done)
            }
            Action::Player(rest) => {
                self.scheduler.schedule(
                    ScheduledTask::UserCommand {
                        user: viewer.id,
                        command: substitute_player(&rest, &viewer.name),
                    },
                    0,
                );
                Ok(Interpretation::Done)
            }
            Action::Noop => {
                log::warn!("Item without command or submenu activated by {}", viewer.name);
                Ok(Interpretation::Done)
            }
        }
    }

    /// Validate a confirmed form and schedule its commands.
    ///
    /// Nothing is scheduled when validation fails.
    pub async fn submit_flow(
        &self,
        viewer: &Viewer,
        flow: FlowKind,
        response: &FormResponse,
    ) -> MenuResult<FlowPlan> {
        let plan = flows::plan(flow, viewer, response, &self.settings)?;

        if let Some(notice) = &plan.notice {
            self.host.send_notice(&viewer.id, notice.clone()).await;
        }
        for step in &plan.steps {
            self.scheduler.schedule(step.task.clone(), step.delay);
        }
        log::info!(
            "{} submitted {:?}: {} commands scheduled",
            viewer.name,
            flow,
            plan.command_count()
        );
        Ok(plan)
    }
}

/// Strip leading blanks and fill in the viewer's name.
///
/// `[console] say hi` therefore runs `say hi`, not ` say hi`.
fn substitute_player(rest: &str, name: &str) -> String {
    rest.trim_start().replace(PLAYER_PLACEHOLDER, name)
}
