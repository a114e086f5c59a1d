//! `[special]admin_createworld`: create a world and move the admin into it
//!
//! Expands into a command sequence. Each command is scheduled a fixed step
//! after the previous one so the world exists before the teleport and the
//! teleport happens before any rule is applied to it.

use super::{
    bounded_integer, console, number_input, required_token, text_input, toggle_input, FlowPlan,
    FormSpec, PlannedStep,
};
use crate::error::MenuResult;
use crate::traits::Ticks;
use crate::types::{EngineSettings, FlowForm, FlowKind, FormResponse, NamedColor, Notice, Viewer};

const FIRST_STEP_DELAY: Ticks = 1;
const ENVIRONMENTS: [&str; 3] = ["normal", "nether", "end"];

pub(super) fn form() -> FlowForm {
    FormSpec {
        flow: FlowKind::CreateWorld,
        title: "Create world",
        title_color: NamedColor::Aqua,
        body: "Create a new world",
        confirm_label: "Create",
        confirm_color: NamedColor::Green,
        confirm_tooltip: None,
        cancel_color: NamedColor::Red,
    }
    .build(vec![
        text_input("name", "World name", NamedColor::Yellow, ""),
        number_input(
            "world_type",
            "World type",
            NamedColor::Green,
            (0.0, 2.0),
            Some("%1$s: %2$s (0=normal, 1=nether, 2=end)"),
        ),
        number_input(
            "generation_type",
            "Terrain",
            NamedColor::LightPurple,
            (0.0, 1.0),
            Some("%1$s: %2$s (0=normal, 1=flat)"),
        ),
        toggle_input("no_structures", "No structures", NamedColor::Gray, false),
        toggle_input("no_natural_mob", "No natural mob spawning", NamedColor::Red, false),
        toggle_input("no_forced_mob", "Deny all mob spawning", NamedColor::DarkRed, false),
        toggle_input("no_randomtick", "No random ticks", NamedColor::Gold, false),
    ])
}

pub(super) fn plan(
    viewer: &Viewer,
    response: &FormResponse,
    settings: &EngineSettings,
) -> MenuResult<FlowPlan> {
    let name = required_token(response, "name", "World name")?;
    let world_type = bounded_integer(response, "world_type", "World type", 0, (0, 2))?;
    let generation = bounded_integer(response, "generation_type", "Terrain", 0, (0, 1))?;
    let environment = usize::try_from(world_type)
        .ok()
        .and_then(|i| ENVIRONMENTS.get(i))
        .copied()
        .unwrap_or(ENVIRONMENTS[0]);

    let mut create = format!("mv create {name} {environment}");
    if generation == 1 {
        create.push_str(" -t flat");
    }
    if response.flag("no_structures", false) {
        create.push_str(" --no-structures");
    }

    let mut commands = vec![create, format!("mv tp {} {name}", viewer.name)];
    if response.flag("no_natural_mob", false) {
        commands.push(format!("mv gamerule set doMobSpawning false {name}"));
    }
    if response.flag("no_forced_mob", false) {
        commands.push(format!("rg flag __global__ -w {name} mob-spawning deny"));
    }
    if response.flag("no_randomtick", false) {
        commands.push(format!("mv gamerule set randomTickSpeed 0 {name}"));
    }

    let step = settings.world_step_delay_ticks.max(1);
    let mut delay = FIRST_STEP_DELAY;
    let mut steps = Vec::with_capacity(commands.len());
    for command in commands {
        steps.push(PlannedStep {
            delay,
            task: console(command),
        });
        delay += step;
    }

    let notice = Notice::info(format!(
        "Creating world {name}: {} commands scheduled",
        steps.len()
    ));
    Ok(FlowPlan {
        steps,
        notice: Some(notice),
    })
}
