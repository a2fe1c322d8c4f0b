use std::fmt::Display;

use console::{style, StyledObject};

/// Work that is still running.
pub fn pending(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).bright().yellow()
}

/// A step that finished, marked with a check.
pub fn success(text: impl Display) -> StyledObject<String> {
    style(format!("{text} ✓")).bright().green()
}

/// A step that failed, marked with a cross.
pub fn failure(text: impl Display) -> StyledObject<String> {
    style(format!("{text} ✗")).bright().red()
}

pub fn muted(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).dim()
}

pub fn heading(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).bright().underlined()
}

pub fn title(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).magenta().bold()
}
