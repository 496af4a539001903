//! Input events a grid host forwards to selection handling, and the verdicts it gets back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Self::NONE
        }
    }

    /// The platform "add to selection" chord, control or command.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn shift_only(&self) -> bool {
        self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridKey {
    ArrowUp,
    ArrowDown,
    /// Any key selection handling does not care about.
    Other,
}

/// Pointer position in client coordinates, with the modifier state at the
/// moment the event fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(client_x: f32, client_y: f32, modifiers: Modifiers) -> Self {
        Self {
            client_x,
            client_y,
            modifiers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridInputEvent {
    KeyDown {
        key: GridKey,
        modifiers: Modifiers,
    },
    Click(PointerEvent),
    /// The host detected the start of a pointer drag, before any movement
    /// has been classified.
    DragInit(PointerEvent),
    DragStart(PointerEvent),
    DragMove(PointerEvent),
    DragEnd(PointerEvent),
}

/// What the host should do with the raw input after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Not handled here; later listeners and default handling still run.
    Propagate,
    /// Handled; stop further propagation.
    Stop,
    /// Handled; stop propagation and suppress the host's default handling
    /// (for keys the grid would otherwise navigate with).
    StopAndSuppressDefault,
}

impl EventDisposition {
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventDisposition::Propagate)
    }
}
