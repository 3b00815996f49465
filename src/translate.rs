// src/translate.rs

//! Maps decoded native events onto the portable event vocabulary.
//!
//! Everything here is pure: `translate` looks only at the current lifecycle
//! stage and the native record. The caller owns the stage and advances it to
//! `to` whenever a lifecycle event comes back.

use crate::event::{
    Direction, Event, KeyEvent, LifecycleEvent, LifecycleStage, MouseEvent, PaintEvent,
};
use crate::keys::{KeyCode, Modifiers, MouseButton};
use crate::native::keysym::*;
use crate::native::{NativeEvent, WindowEventId};
use log::{trace, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Native key symbol → portable key code.
static KEY_MAP: Lazy<HashMap<Keycode, KeyCode>> = Lazy::new(|| {
    HashMap::from([
        (SDLK_RETURN, KeyCode::Enter),
        (SDLK_ESCAPE, KeyCode::Escape),
        (SDLK_BACKSPACE, KeyCode::Backspace),
        (SDLK_TAB, KeyCode::Tab),
        (SDLK_SPACE, KeyCode::Space),
        (SDLK_QUOTE, KeyCode::Apostrophe),
        (SDLK_COMMA, KeyCode::Comma),
        (SDLK_MINUS, KeyCode::Minus),
        (SDLK_PERIOD, KeyCode::Period),
        (SDLK_SLASH, KeyCode::Slash),
        (SDLK_0, KeyCode::Num0),
        (SDLK_1, KeyCode::Num1),
        (SDLK_2, KeyCode::Num2),
        (SDLK_3, KeyCode::Num3),
        (SDLK_4, KeyCode::Num4),
        (SDLK_5, KeyCode::Num5),
        (SDLK_6, KeyCode::Num6),
        (SDLK_7, KeyCode::Num7),
        (SDLK_8, KeyCode::Num8),
        (SDLK_9, KeyCode::Num9),
        (SDLK_SEMICOLON, KeyCode::Semicolon),
        (SDLK_EQUALS, KeyCode::Equals),
        (SDLK_LEFTBRACKET, KeyCode::LeftBracket),
        (SDLK_BACKSLASH, KeyCode::Backslash),
        (SDLK_RIGHTBRACKET, KeyCode::RightBracket),
        (SDLK_BACKQUOTE, KeyCode::Grave),
        (SDLK_a, KeyCode::A),
        (SDLK_b, KeyCode::B),
        (SDLK_c, KeyCode::C),
        (SDLK_d, KeyCode::D),
        (SDLK_e, KeyCode::E),
        (SDLK_f, KeyCode::F),
        (SDLK_g, KeyCode::G),
        (SDLK_h, KeyCode::H),
        (SDLK_i, KeyCode::I),
        (SDLK_j, KeyCode::J),
        (SDLK_k, KeyCode::K),
        (SDLK_l, KeyCode::L),
        (SDLK_m, KeyCode::M),
        (SDLK_n, KeyCode::N),
        (SDLK_o, KeyCode::O),
        (SDLK_p, KeyCode::P),
        (SDLK_q, KeyCode::Q),
        (SDLK_r, KeyCode::R),
        (SDLK_s, KeyCode::S),
        (SDLK_t, KeyCode::T),
        (SDLK_u, KeyCode::U),
        (SDLK_v, KeyCode::V),
        (SDLK_w, KeyCode::W),
        (SDLK_x, KeyCode::X),
        (SDLK_y, KeyCode::Y),
        (SDLK_z, KeyCode::Z),
        (SDLK_DELETE, KeyCode::Delete),
        (SDLK_CAPSLOCK, KeyCode::CapsLock),
        (SDLK_F1, KeyCode::F1),
        (SDLK_F2, KeyCode::F2),
        (SDLK_F3, KeyCode::F3),
        (SDLK_F4, KeyCode::F4),
        (SDLK_F5, KeyCode::F5),
        (SDLK_F6, KeyCode::F6),
        (SDLK_F7, KeyCode::F7),
        (SDLK_F8, KeyCode::F8),
        (SDLK_F9, KeyCode::F9),
        (SDLK_F10, KeyCode::F10),
        (SDLK_F11, KeyCode::F11),
        (SDLK_F12, KeyCode::F12),
        (SDLK_F13, KeyCode::F13),
        (SDLK_F14, KeyCode::F14),
        (SDLK_F15, KeyCode::F15),
        (SDLK_F16, KeyCode::F16),
        (SDLK_F17, KeyCode::F17),
        (SDLK_F18, KeyCode::F18),
        (SDLK_F19, KeyCode::F19),
        (SDLK_F20, KeyCode::F20),
        (SDLK_F21, KeyCode::F21),
        (SDLK_F22, KeyCode::F22),
        (SDLK_F23, KeyCode::F23),
        (SDLK_F24, KeyCode::F24),
        (SDLK_PRINTSCREEN, KeyCode::PrintScreen),
        (SDLK_SCROLLLOCK, KeyCode::ScrollLock),
        (SDLK_PAUSE, KeyCode::Pause),
        (SDLK_INSERT, KeyCode::Insert),
        (SDLK_HOME, KeyCode::Home),
        (SDLK_PAGEUP, KeyCode::PageUp),
        (SDLK_END, KeyCode::End),
        (SDLK_PAGEDOWN, KeyCode::PageDown),
        (SDLK_RIGHT, KeyCode::Right),
        (SDLK_LEFT, KeyCode::Left),
        (SDLK_DOWN, KeyCode::Down),
        (SDLK_UP, KeyCode::Up),
        (SDLK_NUMLOCKCLEAR, KeyCode::NumLock),
        (SDLK_KP_DIVIDE, KeyCode::KeypadDivide),
        (SDLK_KP_MULTIPLY, KeyCode::KeypadMultiply),
        (SDLK_KP_MINUS, KeyCode::KeypadMinus),
        (SDLK_KP_PLUS, KeyCode::KeypadPlus),
        (SDLK_KP_ENTER, KeyCode::KeypadEnter),
        (SDLK_KP_1, KeyCode::Keypad1),
        (SDLK_KP_2, KeyCode::Keypad2),
        (SDLK_KP_3, KeyCode::Keypad3),
        (SDLK_KP_4, KeyCode::Keypad4),
        (SDLK_KP_5, KeyCode::Keypad5),
        (SDLK_KP_6, KeyCode::Keypad6),
        (SDLK_KP_7, KeyCode::Keypad7),
        (SDLK_KP_8, KeyCode::Keypad8),
        (SDLK_KP_9, KeyCode::Keypad9),
        (SDLK_KP_0, KeyCode::Keypad0),
        (SDLK_KP_PERIOD, KeyCode::KeypadDecimal),
        (SDLK_KP_EQUALS, KeyCode::KeypadEquals),
        (SDLK_APPLICATION, KeyCode::Menu),
        (SDLK_LCTRL, KeyCode::LeftControl),
        (SDLK_LSHIFT, KeyCode::LeftShift),
        (SDLK_LALT, KeyCode::LeftAlt),
        (SDLK_LGUI, KeyCode::LeftSuper),
        (SDLK_RCTRL, KeyCode::RightControl),
        (SDLK_RSHIFT, KeyCode::RightShift),
        (SDLK_RALT, KeyCode::RightAlt),
        (SDLK_RGUI, KeyCode::RightSuper),
    ])
});

/// Native mouse button → portable button. X1/X2 have no portable analogue.
static MOUSE_BUTTON_MAP: [(u8, MouseButton); 5] = [
    (SDL_BUTTON_LEFT, MouseButton::Left),
    (SDL_BUTTON_MIDDLE, MouseButton::Middle),
    (SDL_BUTTON_RIGHT, MouseButton::Right),
    (SDL_BUTTON_X1, MouseButton::None),
    (SDL_BUTTON_X2, MouseButton::None),
];

/// Looks up the portable code for a native key symbol.
pub fn map_keycode(sym: Keycode) -> KeyCode {
    KEY_MAP.get(&sym).copied().unwrap_or(KeyCode::Unknown)
}

/// Each native modifier group sets its portable bit independently.
pub fn map_modifiers(native: u16) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    if native & KMOD_SHIFT != 0 {
        modifiers.insert(Modifiers::SHIFT);
    }
    if native & KMOD_CTRL != 0 {
        modifiers.insert(Modifiers::CONTROL);
    }
    if native & KMOD_ALT != 0 {
        modifiers.insert(Modifiers::ALT);
    }
    if native & KMOD_GUI != 0 {
        modifiers.insert(Modifiers::SUPER);
    }
    modifiers
}

pub fn map_mouse_button(native: u8) -> MouseButton {
    MOUSE_BUTTON_MAP
        .iter()
        .find(|(b, _)| *b == native)
        .map(|(_, button)| *button)
        .unwrap_or(MouseButton::None)
}

/// The key symbol read as a character. Symbols outside the Unicode scalar range
/// (SDL's scancode-derived keys) have none.
fn keysym_rune(sym: Keycode) -> Option<char> {
    u32::try_from(sym).ok().and_then(char::from_u32)
}

/// A move to `to`, unless it would not change anything. Nothing leaves `Dead`.
fn transition(stage: LifecycleStage, to: LifecycleStage) -> Option<Event> {
    if stage == to || stage == LifecycleStage::Dead {
        return None;
    }
    Some(Event::Lifecycle(LifecycleEvent { from: stage, to }))
}

fn window_event(stage: LifecycleStage, event: WindowEventId) -> Option<Event> {
    match event {
        WindowEventId::Shown => transition(stage, LifecycleStage::Visible),
        WindowEventId::Hidden | WindowEventId::Minimized => {
            transition(stage, LifecycleStage::Alive)
        }
        WindowEventId::Exposed => Some(Event::Paint(PaintEvent)),
        WindowEventId::FocusGained => transition(stage, LifecycleStage::Focused),
        WindowEventId::FocusLost => transition(stage, LifecycleStage::Visible),
        WindowEventId::Other(raw) => {
            warn!("translate: unknown window event id {}", raw);
            None
        }
        other => {
            trace!("translate: ignoring window event {:?}", other);
            None
        }
    }
}

fn direction(pressed: bool) -> Direction {
    if pressed {
        Direction::Press
    } else {
        Direction::Release
    }
}

/// Translates one native event given the current lifecycle stage.
///
/// `None` means the record produces no portable event (a duplicate lifecycle
/// transition, a zero-delta wheel motion, an untranslated category); the
/// caller keeps waiting. User events are left to the caller.
pub fn translate(stage: LifecycleStage, native: &NativeEvent) -> Option<Event> {
    match *native {
        NativeEvent::Quit => transition(stage, LifecycleStage::Dead),
        NativeEvent::Window { event, .. } => window_event(stage, event),
        NativeEvent::Key {
            keycode,
            modifiers,
            pressed,
            ..
        } => Some(Event::Key(KeyEvent {
            code: map_keycode(keycode),
            rune: keysym_rune(keycode),
            modifiers: map_modifiers(modifiers),
            direction: direction(pressed),
        })),
        NativeEvent::MouseMotion { x, y, .. } => Some(Event::Mouse(MouseEvent {
            x: x as f32,
            y: y as f32,
            ..MouseEvent::default()
        })),
        NativeEvent::MouseButton {
            button,
            x,
            y,
            pressed,
            ..
        } => Some(Event::Mouse(MouseEvent {
            x: x as f32,
            y: y as f32,
            button: map_mouse_button(button),
            direction: direction(pressed),
        })),
        NativeEvent::MouseWheel { y, .. } => {
            let button = match y {
                0 => return None,
                dy if dy < 0 => MouseButton::WheelUp,
                _ => MouseButton::WheelDown,
            };
            Some(Event::Mouse(MouseEvent {
                button,
                direction: Direction::Press,
                ..MouseEvent::default()
            }))
        }
        NativeEvent::User { .. } | NativeEvent::Other { .. } => None,
    }
}

#[cfg(test)]
mod tests;
