//! Per-user navigation history

use crate::types::MAIN_MENU_ID;

/// Ordered menu ids visited by one user; the bottom is always `"main"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<String>,
}

impl NavigationStack {
    /// Stack holding only the main menu
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![MAIN_MENU_ID.to_string()],
        }
    }

    /// Back to `["main"]`
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(MAIN_MENU_ID.to_string());
    }

    /// Enter a child menu
    pub fn push(&mut self, menu_id: impl Into<String>) {
        self.entries.push(menu_id.into());
    }

    /// Leave the current menu and return the one now on top.
    ///
    /// Never removes the bottom entry: on a single-entry stack this is a
    /// no-op returning `"main"`.
    pub fn pop_to_previous(&mut self) -> &str {
        if self.entries.len() > 1 {
            self.entries.pop();
        }
        self.current()
    }

    /// Menu on top of the stack
    #[must_use]
    pub fn current(&self) -> &str {
        self.entries.last().map_or(MAIN_MENU_ID, String::as_str)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}
