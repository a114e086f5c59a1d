//! Input flows: form schema, validation and command expansion
//!
//! Each flow module exposes `form()` (the sub-dialog schema) and `plan()`
//! (turns a confirmed response into scheduled tasks). Planning never touches
//! the host; the interpreter schedules the result.

mod ban;
mod core_protect;
mod create_world;
mod map_art;
mod promote;
mod world_size;

use crate::error::{MenuError, MenuResult};
use crate::services::ItemKeyCodec;
use crate::traits::{ScheduledTask, Ticks};
use crate::types::{
    EngineSettings, FlowForm, FlowKind, FormInput, FormResponse, NamedColor, Notice, StyledText,
    Viewer,
};

/// One task and when to run it, relative to submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub delay: Ticks,
    pub task: ScheduledTask,
}

/// Expansion of a confirmed flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowPlan {
    pub steps: Vec<PlannedStep>,
    /// Sent immediately, before any step runs
    pub notice: Option<Notice>,
}

impl FlowPlan {
    /// Number of host commands in the plan (notifications excluded)
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.task.command().is_some())
            .count()
    }
}

/// Sub-dialog schema of a flow
#[must_use]
pub fn form(flow: FlowKind) -> FlowForm {
    match flow {
        FlowKind::MapArt => map_art::form(),
        FlowKind::Promote => promote::form(),
        FlowKind::CoreProtect => core_protect::form(),
        FlowKind::Ban => ban::form(),
        FlowKind::WorldSize => world_size::form(),
        FlowKind::CreateWorld => create_world::form(),
    }
}

/// Validate a response and expand it into scheduled steps.
pub fn plan(
    flow: FlowKind,
    viewer: &Viewer,
    response: &FormResponse,
    settings: &EngineSettings,
) -> MenuResult<FlowPlan> {
    match flow {
        FlowKind::MapArt => map_art::plan(viewer, response),
        FlowKind::Promote => promote::plan(response),
        FlowKind::CoreProtect => core_protect::plan(viewer, response),
        FlowKind::Ban => ban::plan(response),
        FlowKind::WorldSize => world_size::plan(response),
        FlowKind::CreateWorld => create_world::plan(viewer, response, settings),
    }
}

// ===== Form building =====

struct FormSpec {
    flow: FlowKind,
    title: &'static str,
    title_color: NamedColor,
    body: &'static str,
    confirm_label: &'static str,
    confirm_color: NamedColor,
    confirm_tooltip: Option<&'static str>,
    cancel_color: NamedColor,
}

impl FormSpec {
    fn build(self, inputs: Vec<FormInput>) -> FlowForm {
        FlowForm {
            flow: self.flow,
            title: StyledText::colored(self.title, self.title_color),
            body: vec![StyledText::colored(self.body, NamedColor::Gray)],
            inputs,
            confirm_label: StyledText::colored(self.confirm_label, self.confirm_color),
            confirm_tooltip: self.confirm_tooltip.map(StyledText::plain),
            confirm_token: ItemKeyCodec::confirm_token(self.flow),
            cancel_label: StyledText::colored("Cancel", self.cancel_color),
            escape_closes: true,
        }
    }
}

fn text_input(key: &str, label: &str, color: NamedColor, initial: &str) -> FormInput {
    FormInput::Text {
        key: key.to_string(),
        label: StyledText::colored(label, color),
        initial: initial.to_string(),
        max_length: None,
    }
}

fn toggle_input(key: &str, label: &str, color: NamedColor, initial: bool) -> FormInput {
    FormInput::Toggle {
        key: key.to_string(),
        label: StyledText::colored(label, color),
        initial,
    }
}

fn number_input(
    key: &str,
    label: &str,
    color: NamedColor,
    (min, max): (f32, f32),
    label_format: Option<&str>,
) -> FormInput {
    FormInput::NumberRange {
        key: key.to_string(),
        label: StyledText::colored(label, color),
        min,
        max,
        step: 1.0,
        initial: min,
        label_format: label_format.map(str::to_string),
    }
}

// ===== Validation helpers =====

fn required<'a>(response: &'a FormResponse, key: &str, label: &str) -> MenuResult<&'a str> {
    response
        .text(key)
        .ok_or_else(|| MenuError::Validation(format!("{label} is required")))
}

/// Text that ends up as a single command argument
fn single_token<'a>(value: &'a str, label: &str) -> MenuResult<&'a str> {
    if value.contains(char::is_whitespace) {
        return Err(MenuError::Validation(format!(
            "{label} must not contain spaces"
        )));
    }
    Ok(value)
}

fn required_token<'a>(response: &'a FormResponse, key: &str, label: &str) -> MenuResult<&'a str> {
    single_token(required(response, key, label)?, label)
}

fn optional_token<'a>(
    response: &'a FormResponse,
    key: &str,
    label: &str,
) -> MenuResult<Option<&'a str>> {
    response
        .text(key)
        .map(|value| single_token(value, label))
        .transpose()
}

/// Whole number within `min..=max`, `default` when absent.
#[allow(clippy::cast_precision_loss)]
fn bounded_integer(
    response: &FormResponse,
    key: &str,
    label: &str,
    default: i64,
    (min, max): (i64, i64),
) -> MenuResult<i64> {
    let Some(value) = response.number(key) else {
        return Ok(default);
    };
    if value.fract() != 0.0 || value < min as f64 || value > max as f64 {
        return Err(MenuError::Validation(format!(
            "{label} must be a whole number between {min} and {max}"
        )));
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(value as i64)
}

fn console(command: String) -> ScheduledTask {
    ScheduledTask::ConsoleCommand(command)
}

fn now(task: ScheduledTask) -> PlannedStep {
    PlannedStep { delay: 0, task }
}
