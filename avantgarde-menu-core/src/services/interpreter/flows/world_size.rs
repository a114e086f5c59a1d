//! `[special]admin_worldsize`: spend points to grow a player's world

use super::{console, now, required, required_token, text_input, FlowPlan, FormSpec};
use crate::error::{MenuError, MenuResult};
use crate::types::{FlowForm, FlowKind, FormResponse, NamedColor, Notice};

const POINT_UNIT: u64 = 100;

pub(super) fn form() -> FlowForm {
    FormSpec {
        flow: FlowKind::WorldSize,
        title: "Expand world size",
        title_color: NamedColor::Green,
        body: "Expand a player's world",
        confirm_label: "Run",
        confirm_color: NamedColor::Green,
        confirm_tooltip: None,
        cancel_color: NamedColor::Red,
    }
    .build(vec![
        text_input("player", "Player name", NamedColor::Aqua, ""),
        text_input(
            "points",
            "Points to spend (multiple of 100)",
            NamedColor::Yellow,
            "1",
        ),
    ])
}

pub(super) fn plan(response: &FormResponse) -> MenuResult<FlowPlan> {
    let player = required_token(response, "player", "Player name")?;
    let points = parse_points(required(response, "points", "Points")?)?;

    Ok(FlowPlan {
        steps: vec![now(console(format!(
            "worldsize expand {player} {points}"
        )))],
        notice: Some(Notice::success(format!(
            "Expanding the world of {player} by {points} points"
        ))),
    })
}

fn parse_points(raw: &str) -> MenuResult<u64> {
    match raw.parse::<u64>() {
        Ok(points) if points > 0 && points % POINT_UNIT == 0 => Ok(points),
        _ => Err(MenuError::Validation(format!(
            "Points must be a positive multiple of {POINT_UNIT}"
        ))),
    }
}
