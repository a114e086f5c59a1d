//! `[special]admin_coreprotect`: block log lookup and rollback

use super::{optional_token, text_input, toggle_input, FlowPlan, FormSpec, PlannedStep};
use crate::error::{MenuError, MenuResult};
use crate::traits::ScheduledTask;
use crate::types::{FlowForm, FlowKind, FormResponse, NamedColor, Notice, Viewer};

const DEFAULT_TIME: &str = "10h";

/// Blocks left untouched by a rollback when ores are excluded
const ORE_BLOCKS: &[&str] = &[
    "coal_ore",
    "deepslate_coal_ore",
    "iron_ore",
    "deepslate_iron_ore",
    "copper_ore",
    "deepslate_copper_ore",
    "gold_ore",
    "deepslate_gold_ore",
    "redstone_ore",
    "deepslate_redstone_ore",
    "lapis_ore",
    "deepslate_lapis_ore",
    "diamond_ore",
    "deepslate_diamond_ore",
    "emerald_ore",
    "deepslate_emerald_ore",
    "nether_gold_ore",
    "nether_quartz_ore",
    "ancient_debris",
];

pub(super) fn form() -> FlowForm {
    FormSpec {
        flow: FlowKind::CoreProtect,
        title: "CoreProtect",
        title_color: NamedColor::Blue,
        body: "Run a CoreProtect lookup and/or rollback",
        confirm_label: "Run",
        confirm_color: NamedColor::Green,
        confirm_tooltip: None,
        cancel_color: NamedColor::Red,
    }
    .build(vec![
        toggle_input("do_lookup", "Run lookup", NamedColor::Aqua, true),
        toggle_input("do_rollback", "Run rollback", NamedColor::Red, false),
        text_input("player", "Player name", NamedColor::Yellow, ""),
        text_input(
            "time_lookup",
            "Lookup time (e.g. 1h, 30m)",
            NamedColor::Green,
            DEFAULT_TIME,
        ),
        text_input(
            "time_rollback",
            "Rollback time (e.g. 1h, 30m)",
            NamedColor::Green,
            DEFAULT_TIME,
        ),
        text_input("radius", "Radius", NamedColor::LightPurple, ""),
        text_input("extra_params", "Extra parameters (optional)", NamedColor::Gray, ""),
        toggle_input("exclude_ores", "Exclude ores", NamedColor::Gold, false),
    ])
}

/// Parameters shared by both actions.
struct Filter<'a> {
    player: Option<&'a str>,
    radius: Option<u32>,
    extra: Option<&'a str>,
}

impl Filter<'_> {
    fn command(&self, action: &str, time: &str, exclude: Option<&str>) -> String {
        let mut parts = vec![format!("co {action}")];
        if let Some(player) = self.player {
            parts.push(format!("u:{player}"));
        }
        parts.push(format!("t:{time}"));
        if let Some(radius) = self.radius {
            parts.push(format!("r:{radius}"));
        }
        if let Some(exclude) = exclude {
            parts.push(format!("e:{exclude}"));
        }
        if let Some(extra) = self.extra {
            parts.push(extra.to_string());
        }
        parts.join(" ")
    }
}

pub(super) fn plan(viewer: &Viewer, response: &FormResponse) -> MenuResult<FlowPlan> {
    let do_lookup = response.flag("do_lookup", true);
    let do_rollback = response.flag("do_rollback", false);
    if !do_lookup && !do_rollback {
        return Err(MenuError::Validation(
            "Select lookup, rollback or both".to_string(),
        ));
    }

    let filter = Filter {
        player: optional_token(response, "player", "Player name")?,
        radius: parse_radius(response.text("radius"))?,
        extra: response.text("extra_params"),
    };
    if do_rollback && filter.player.is_none() && filter.radius.is_none() {
        return Err(MenuError::Validation(
            "A rollback needs a player name or a radius".to_string(),
        ));
    }

    let mut steps = Vec::new();
    if do_lookup {
        let time = optional_token(response, "time_lookup", "Lookup time")?.unwrap_or(DEFAULT_TIME);
        steps.push(user_step(viewer, filter.command("lookup", time, None)));
    }
    if do_rollback {
        let time =
            optional_token(response, "time_rollback", "Rollback time")?.unwrap_or(DEFAULT_TIME);
        let ores = response
            .flag("exclude_ores", false)
            .then(|| ORE_BLOCKS.join(","));
        steps.push(user_step(
            viewer,
            filter.command("rollback", time, ores.as_deref()),
        ));
    }

    Ok(FlowPlan {
        steps,
        notice: Some(Notice::info("Running CoreProtect")),
    })
}

fn parse_radius(raw: Option<&str>) -> MenuResult<Option<u32>> {
    raw.map(|value| match value.parse::<u32>() {
        Ok(radius) if radius > 0 => Ok(radius),
        _ => Err(MenuError::Validation(
            "Radius must be a positive whole number".to_string(),
        )),
    })
    .transpose()
}

fn user_step(viewer: &Viewer, command: String) -> PlannedStep {
    PlannedStep {
        delay: 0,
        task: ScheduledTask::UserCommand {
            user: viewer.id,
            command,
        },
    }
}
