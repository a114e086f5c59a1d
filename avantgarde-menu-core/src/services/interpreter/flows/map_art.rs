//! `[special]tomap_dialog`: turn an image URL into map art

use super::{bounded_integer, number_input, required_token, FlowPlan, FormSpec, PlannedStep};
use crate::error::MenuResult;
use crate::traits::ScheduledTask;
use crate::types::{
    FlowForm, FlowKind, FormInput, FormResponse, NamedColor, Notice, StyledText, Viewer,
};

const MAX_URL_LENGTH: u32 = 300;
const MAX_TILES: i64 = 16;
const TILE_RANGE: (f32, f32) = (1.0, 16.0);

pub(super) fn form() -> FlowForm {
    FormSpec {
        flow: FlowKind::MapArt,
        title: "Image to map art",
        title_color: NamedColor::LightPurple,
        body: "Enter the image URL and the size in maps",
        confirm_label: "Create",
        confirm_color: NamedColor::Green,
        confirm_tooltip: Some("Create the map art"),
        cancel_color: NamedColor::Red,
    }
    .build(vec![
        FormInput::Text {
            key: "url".to_string(),
            label: StyledText::colored("Image URL", NamedColor::Aqua),
            initial: String::new(),
            max_length: Some(MAX_URL_LENGTH),
        },
        number_input("height", "Height", NamedColor::Green, TILE_RANGE, None),
        number_input("width", "Width", NamedColor::Green, TILE_RANGE, None),
    ])
}

pub(super) fn plan(viewer: &Viewer, response: &FormResponse) -> MenuResult<FlowPlan> {
    let url = required_token(response, "url", "Image URL")?;
    let width = bounded_integer(response, "width", "Width", 1, (1, MAX_TILES))?;
    let height = bounded_integer(response, "height", "Height", 1, (1, MAX_TILES))?;

    // The notice follows the command on the same tick
    Ok(FlowPlan {
        steps: vec![
            PlannedStep {
                delay: 0,
                task: ScheduledTask::UserCommand {
                    user: viewer.id,
                    command: format!("tomap {url} resize {height} {width}"),
                },
            },
            PlannedStep {
                delay: 0,
                task: ScheduledTask::Notify {
                    user: viewer.id,
                    notice: Notice::success(format!("Creating map art... ({width} x {height})")),
                },
            },
        ],
        notice: None,
    })
}
