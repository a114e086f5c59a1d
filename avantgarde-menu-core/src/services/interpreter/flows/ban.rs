//! `[special]admin_ban`: permanent or temporary ban

use super::{console, now, optional_token, required_token, text_input, FlowPlan, FormSpec};
use crate::error::MenuResult;
use crate::types::{FlowForm, FlowKind, FormResponse, NamedColor, Notice};

const DEFAULT_REASON: &str = "No reason given";

pub(super) fn form() -> FlowForm {
    FormSpec {
        flow: FlowKind::Ban,
        title: "Ban player",
        title_color: NamedColor::DarkRed,
        body: "Enter the player to ban",
        confirm_label: "Ban",
        confirm_color: NamedColor::DarkRed,
        confirm_tooltip: None,
        cancel_color: NamedColor::Green,
    }
    .build(vec![
        text_input("player", "Player name", NamedColor::Aqua, ""),
        text_input("time", "Duration (e.g. 7d, 1mo)", NamedColor::Yellow, ""),
        text_input("reason", "Reason", NamedColor::Red, ""),
    ])
}

pub(super) fn plan(response: &FormResponse) -> MenuResult<FlowPlan> {
    let player = required_token(response, "player", "Player name")?;
    let time = optional_token(response, "time", "Duration")?;
    let reason = response.text("reason").unwrap_or(DEFAULT_REASON);

    let command = match time {
        Some(time) => format!("tempban {player} {time} {reason}"),
        None => format!("ban {player} {reason}"),
    };

    Ok(FlowPlan {
        steps: vec![now(console(command))],
        notice: Some(Notice::success(format!("Banning {player}"))),
    })
}
