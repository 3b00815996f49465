// src/event.rs

//! The portable event vocabulary returned by `Window::next_event`.

use crate::keys::{KeyCode, Modifiers, MouseButton};
use std::any::Any;
use std::fmt;

/// Ordered visibility state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LifecycleStage {
    /// Terminal: the window must not be drawn to again.
    Dead,
    /// Running but not shown.
    #[default]
    Alive,
    Visible,
    Focused,
}

/// Press/release direction shared by key and mouse events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Motion and other non-transition events.
    #[default]
    None,
    Press,
    Release,
}

/// A change of [`LifecycleStage`]. `from` and `to` always differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub from: LifecycleStage,
    pub to: LifecycleStage,
}

impl LifecycleEvent {
    pub fn is_dead(&self) -> bool {
        self.to == LifecycleStage::Dead
    }
}

/// The window contents need to be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaintEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    /// The native key symbol read as a character, when it is one.
    pub rune: Option<char>,
    pub modifiers: Modifiers,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseEvent {
    pub x: f32,
    pub y: f32,
    pub button: MouseButton,
    pub direction: Direction,
}

/// An application-defined payload injected through an `EventSender`.
pub struct CustomEvent(Box<dyn Any + Send>);

impl CustomEvent {
    pub(crate) fn new(payload: Box<dyn Any + Send>) -> Self {
        CustomEvent(payload)
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Recovers the payload, or gives the event back if it holds another type.
    pub fn downcast<T: Any>(self) -> Result<T, CustomEvent> {
        self.0.downcast::<T>().map(|b| *b).map_err(CustomEvent)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for CustomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomEvent").field(&"..").finish()
    }
}

/// One portable event; exactly one variant per instance.
#[derive(Debug)]
pub enum Event {
    Lifecycle(LifecycleEvent),
    Paint(PaintEvent),
    Key(KeyEvent),
    Mouse(MouseEvent),
    Custom(CustomEvent),
}
