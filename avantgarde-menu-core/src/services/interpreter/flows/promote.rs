//! `[special]admin_promote`

use super::{console, now, required_token, text_input, toggle_input, FlowPlan, FormSpec};
use crate::error::MenuResult;
use crate::types::{FlowForm, FlowKind, FormResponse, NamedColor, Notice};

const GOOD_GROUP: &str = "good";

pub(super) fn form() -> FlowForm {
    FormSpec {
        flow: FlowKind::Promote,
        title: "Promote player",
        title_color: NamedColor::Gold,
        body: "Enter the name of the player to promote",
        confirm_label: "Run",
        confirm_color: NamedColor::Green,
        confirm_tooltip: Some("Run the promotion"),
        cancel_color: NamedColor::Red,
    }
    .build(vec![
        text_input("player", "Player name", NamedColor::Aqua, ""),
        toggle_input("good", "Add GOOD", NamedColor::Yellow, false),
    ])
}

pub(super) fn plan(response: &FormResponse) -> MenuResult<FlowPlan> {
    let player = required_token(response, "player", "Player name")?;

    let mut steps = vec![now(console(format!(
        "lp user {player} promote default"
    )))];
    if response.flag("good", false) {
        steps.push(now(console(format!(
            "lp user {player} parent add {GOOD_GROUP}"
        ))));
    }

    Ok(FlowPlan {
        steps,
        notice: Some(Notice::success(format!("Promoting {player}"))),
    })
}
