// src/highlight/selection.rs
//! Hover and pin state for one rendered graph.
//!
//! The host delivers pointer and keyboard events one at a time; each event maps
//! the current [`Selection`] to the next one. A pin sticks until the same title
//! is clicked again or the selection is cleared, and hovering never displaces it.

use super::HighlightIndex;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Hovering(String),
    Pinned(String),
}

/// Discrete interaction events from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Enter(String),
    Leave,
    Click(String),
    Escape,
}

impl Selection {
    #[must_use]
    pub fn apply(self, event: Event) -> Self {
        match event {
            Event::Enter(title) => self.enter(title),
            Event::Leave => self.leave(),
            Event::Click(title) => self.toggle_pin(title),
            Event::Escape => Self::None,
        }
    }

    #[must_use]
    pub fn enter(self, title: String) -> Self {
        match self {
            Self::Pinned(pinned) => Self::Pinned(pinned),
            _ => Self::Hovering(title),
        }
    }

    #[must_use]
    pub fn leave(self) -> Self {
        match self {
            Self::Pinned(pinned) => Self::Pinned(pinned),
            _ => Self::None,
        }
    }

    /// Pins `title`, or unpins it when it is already pinned.
    ///
    /// Unpinning leaves the pointer hovering the element it just clicked.
    #[must_use]
    pub fn toggle_pin(self, title: String) -> Self {
        match self {
            Self::Pinned(pinned) if pinned == title => Self::Hovering(title),
            _ => Self::Pinned(title),
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Hovering(title) | Self::Pinned(title) => Some(title),
        }
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Pinned(_))
    }

    /// Elements the host should highlight for this selection.
    #[must_use]
    pub fn highlighted<'i, E>(&self, index: &'i HighlightIndex<E>) -> &'i [E] {
        self.title().map_or(&[][..], |title| index.get(title))
    }
}
