//! Structured-input forms used by the input flows

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{FlowKind, StyledText};

/// One input widget of a flow form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormInput {
    Text {
        key: String,
        label: StyledText,
        initial: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    Toggle {
        key: String,
        label: StyledText,
        initial: bool,
    },
    NumberRange {
        key: String,
        label: StyledText,
        min: f32,
        max: f32,
        step: f32,
        initial: f32,
        /// `%1$s` = label, `%2$s` = value
        #[serde(skip_serializing_if = "Option::is_none")]
        label_format: Option<String>,
    },
}

impl FormInput {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Text { key, .. } | Self::Toggle { key, .. } | Self::NumberRange { key, .. } => key,
        }
    }
}

/// Sub-dialog shown for an input flow. Both surfaces receive the same schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowForm {
    pub flow: FlowKind,
    pub title: StyledText,
    pub body: Vec<StyledText>,
    pub inputs: Vec<FormInput>,
    pub confirm_label: StyledText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_tooltip: Option<StyledText>,
    /// Activation token of the confirm button
    pub confirm_token: String,
    /// The cancel button carries no action; the surface just closes
    pub cancel_label: StyledText,
    pub escape_closes: bool,
}

/// A single submitted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Submitted form: field name → value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormResponse(pub HashMap<String, FormValue>);

impl FormResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: FormValue) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_text(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(key, FormValue::Text(value.into()))
    }

    #[must_use]
    pub fn with_bool(self, key: impl Into<String>, value: bool) -> Self {
        self.with(key, FormValue::Bool(value))
    }

    #[must_use]
    pub fn with_number(self, key: impl Into<String>, value: f64) -> Self {
        self.with(key, FormValue::Number(value))
    }

    /// Trimmed text; blank counts as absent.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(FormValue::Text(s)) => Some(s.trim()).filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    /// Boolean toggle, `default` when absent or of another type.
    #[must_use]
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(FormValue::Bool(b)) => *b,
            _ => default,
        }
    }

    /// Numeric value; numeric text is accepted too.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(FormValue::Number(n)) => Some(*n),
            Some(FormValue::Text(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
