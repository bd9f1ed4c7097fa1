//! Input model: pointer buttons, hover/drag UI state, and the gesture state machine.
//!
//! `InputState` is the gesture tracked between pointer-down and pointer-up.
//! While it is [`InputState::Dragging`], the frame loop stops advancing the
//! engine so physics never fights the pointer. `UiState` is the purely visual
//! state the renderer reads (hover highlight, cursor).

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::snapshot::BodyId;
use crate::vector::Vector2;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// CSS cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Hovering a draggable body.
    Grab,
    /// Dragging a body.
    Grabbing,
}

impl Cursor {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Visual interaction state read by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    /// Body under the pointer while no drag is active.
    pub hover: Option<BodyId>,
}

/// Gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is repositioning a body.
    Dragging {
        /// Body being dragged.
        body: BodyId,
        /// Last world position written to the engine.
        last_world: Vector2,
    },
}

impl InputState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Body being dragged, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<BodyId> {
        match self {
            Self::Dragging { body, .. } => Some(*body),
            Self::Idle => None,
        }
    }
}

/// Apply a body's placement constraint to a drag target: the projectile
/// cannot go below ground, other bodies are free.
#[must_use]
pub fn constrain(body: BodyId, world: Vector2) -> Vector2 {
    match body {
        BodyId::Projectile => Vector2::new(world.x, world.y.max(0.0)),
        BodyId::Particle | BodyId::Waves => world,
    }
}
