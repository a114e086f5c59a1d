//! Type definitions

mod flow;
mod form;
mod menu;
mod notice;
mod outcome;
mod render;
mod settings;
mod viewer;

pub use flow::{FlowKind, StatusEffect};
pub use form::{FlowForm, FormInput, FormResponse, FormValue};
pub use menu::{Icon, Menu, MenuItem, MAIN_MENU_ID};
pub use notice::{Notice, NoticeKind};
pub use outcome::{DispatchOutcome, SessionState};
pub use render::{
    ActivationRef, NamedColor, RenderElement, RenderedMenu, Span, StyledText, SurfaceKind,
    TextColor, TextStyle,
};
pub use settings::EngineSettings;
pub use viewer::{UserId, Viewer};
