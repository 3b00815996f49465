// src/translate/tests.rs

use super::*;
use proptest::prelude::*;

fn window(event: WindowEventId) -> NativeEvent {
    NativeEvent::Window {
        window_id: 1,
        event,
    }
}

fn key(keycode: Keycode, modifiers: u16, pressed: bool) -> NativeEvent {
    NativeEvent::Key {
        window_id: 1,
        keycode,
        modifiers,
        pressed,
    }
}

fn expect_lifecycle(event: Option<Event>) -> LifecycleEvent {
    match event {
        Some(Event::Lifecycle(e)) => e,
        other => panic!("expected lifecycle event, got {:?}", other),
    }
}

fn expect_key(event: Option<Event>) -> KeyEvent {
    match event {
        Some(Event::Key(e)) => e,
        other => panic!("expected key event, got {:?}", other),
    }
}

fn expect_mouse(event: Option<Event>) -> MouseEvent {
    match event {
        Some(Event::Mouse(e)) => e,
        other => panic!("expected mouse event, got {:?}", other),
    }
}

#[test]
fn it_should_emit_visible_when_shown_from_alive() {
    let e = expect_lifecycle(translate(
        LifecycleStage::Alive,
        &window(WindowEventId::Shown),
    ));
    assert_eq!(e.from, LifecycleStage::Alive);
    assert_eq!(e.to, LifecycleStage::Visible);
}

#[test]
fn it_should_suppress_shown_when_already_visible() {
    assert!(translate(LifecycleStage::Visible, &window(WindowEventId::Shown)).is_none());
}

#[test]
fn it_should_map_focus_changes() {
    let gained = expect_lifecycle(translate(
        LifecycleStage::Visible,
        &window(WindowEventId::FocusGained),
    ));
    assert_eq!(gained.to, LifecycleStage::Focused);

    let lost = expect_lifecycle(translate(
        LifecycleStage::Focused,
        &window(WindowEventId::FocusLost),
    ));
    assert_eq!(lost.from, LifecycleStage::Focused);
    assert_eq!(lost.to, LifecycleStage::Visible);
}

#[test]
fn it_should_drop_to_alive_when_hidden_or_minimized() {
    for id in [WindowEventId::Hidden, WindowEventId::Minimized] {
        let e = expect_lifecycle(translate(LifecycleStage::Focused, &window(id)));
        assert_eq!(e.to, LifecycleStage::Alive);
    }
    assert!(translate(LifecycleStage::Alive, &window(WindowEventId::Hidden)).is_none());
}

#[test]
fn it_should_emit_paint_on_exposed() {
    assert!(matches!(
        translate(LifecycleStage::Visible, &window(WindowEventId::Exposed)),
        Some(Event::Paint(PaintEvent))
    ));
}

#[test]
fn it_should_ignore_untranslated_window_events() {
    for id in [
        WindowEventId::Moved,
        WindowEventId::Resized,
        WindowEventId::Close,
        WindowEventId::Other(42),
    ] {
        assert!(translate(LifecycleStage::Visible, &window(id)).is_none());
    }
}

#[test]
fn it_should_emit_dead_on_quit_exactly_once() {
    let e = expect_lifecycle(translate(LifecycleStage::Focused, &NativeEvent::Quit));
    assert_eq!(e.from, LifecycleStage::Focused);
    assert!(e.is_dead());
    assert!(translate(LifecycleStage::Dead, &NativeEvent::Quit).is_none());
}

#[test]
fn it_should_not_leave_dead() {
    for id in [
        WindowEventId::Shown,
        WindowEventId::Hidden,
        WindowEventId::FocusGained,
        WindowEventId::FocusLost,
    ] {
        assert!(translate(LifecycleStage::Dead, &window(id)).is_none());
    }
}

#[test]
fn it_should_translate_a_press_with_shift_and_control() {
    let e = expect_key(translate(
        LifecycleStage::Focused,
        &key(SDLK_a, KMOD_LSHIFT | KMOD_RCTRL, true),
    ));
    assert_eq!(e.code, KeyCode::A);
    assert_eq!(e.rune, Some('a'));
    assert_eq!(e.modifiers, Modifiers::SHIFT | Modifiers::CONTROL);
    assert_eq!(e.direction, Direction::Press);
}

#[test]
fn it_should_translate_a_release() {
    let e = expect_key(translate(LifecycleStage::Focused, &key(SDLK_RETURN, 0, false)));
    assert_eq!(e.code, KeyCode::Enter);
    assert_eq!(e.rune, Some('\r'));
    assert!(e.modifiers.is_empty());
    assert_eq!(e.direction, Direction::Release);
}

#[test]
fn it_should_map_unknown_symbols_to_unknown() {
    let e = expect_key(translate(LifecycleStage::Focused, &key(0x2603, 0, true)));
    assert_eq!(e.code, KeyCode::Unknown);
    assert_eq!(e.rune, Some('☃'));
}

#[test]
fn it_should_give_scancode_keys_no_rune() {
    let e = expect_key(translate(LifecycleStage::Focused, &key(SDLK_F5, 0, true)));
    assert_eq!(e.code, KeyCode::F5);
    assert_eq!(e.rune, None);
}

#[test]
fn it_should_map_keypad_period_to_keypad_decimal() {
    assert_eq!(map_keycode(SDLK_KP_PERIOD), KeyCode::KeypadDecimal);
    assert_eq!(map_keycode(SDLK_PERIOD), KeyCode::Period);
}

#[test]
fn it_should_map_every_modifier_group() {
    assert_eq!(map_modifiers(0), Modifiers::empty());
    assert_eq!(map_modifiers(KMOD_RSHIFT), Modifiers::SHIFT);
    assert_eq!(map_modifiers(KMOD_LCTRL), Modifiers::CONTROL);
    assert_eq!(map_modifiers(KMOD_RALT), Modifiers::ALT);
    assert_eq!(map_modifiers(KMOD_LGUI), Modifiers::SUPER);
    // Num Lock and Caps Lock state bits.
    assert_eq!(map_modifiers(0x1000 | 0x2000), Modifiers::empty());
    assert_eq!(map_modifiers(KMOD_SHIFT | KMOD_CTRL | KMOD_ALT | KMOD_GUI), Modifiers::all());
}

#[test]
fn it_should_translate_mouse_motion() {
    let e = expect_mouse(translate(
        LifecycleStage::Visible,
        &NativeEvent::MouseMotion {
            window_id: 1,
            x: 12,
            y: 34,
        },
    ));
    assert_eq!((e.x, e.y), (12.0, 34.0));
    assert_eq!(e.button, MouseButton::None);
    assert_eq!(e.direction, Direction::None);
}

#[test]
fn it_should_translate_mouse_buttons() {
    let e = expect_mouse(translate(
        LifecycleStage::Visible,
        &NativeEvent::MouseButton {
            window_id: 1,
            button: SDL_BUTTON_RIGHT,
            x: 5,
            y: 6,
            pressed: false,
        },
    ));
    assert_eq!(e.button, MouseButton::Right);
    assert_eq!(e.direction, Direction::Release);
    assert_eq!((e.x, e.y), (5.0, 6.0));

    assert_eq!(map_mouse_button(SDL_BUTTON_LEFT), MouseButton::Left);
    assert_eq!(map_mouse_button(SDL_BUTTON_MIDDLE), MouseButton::Middle);
    assert_eq!(map_mouse_button(SDL_BUTTON_X1), MouseButton::None);
    assert_eq!(map_mouse_button(SDL_BUTTON_X2), MouseButton::None);
}

#[test]
fn it_should_translate_wheel_direction() {
    let wheel = |y| NativeEvent::MouseWheel {
        window_id: 1,
        x: 3,
        y,
    };
    let up = expect_mouse(translate(LifecycleStage::Visible, &wheel(-2)));
    assert_eq!(up.button, MouseButton::WheelUp);
    assert_eq!(up.direction, Direction::Press);
    assert_eq!((up.x, up.y), (0.0, 0.0));

    let down = expect_mouse(translate(LifecycleStage::Visible, &wheel(1)));
    assert_eq!(down.button, MouseButton::WheelDown);
}

#[test]
fn it_should_drop_horizontal_only_wheel_motion() {
    let e = NativeEvent::MouseWheel {
        window_id: 1,
        x: 4,
        y: 0,
    };
    assert!(translate(LifecycleStage::Visible, &e).is_none());
}

#[test]
fn it_should_leave_user_and_other_events_to_the_caller() {
    let user = NativeEvent::User {
        event_type: 0x8000,
        window_id: 1,
    };
    assert!(translate(LifecycleStage::Visible, &user).is_none());
    let other = NativeEvent::Other { event_type: 0x700 };
    assert!(translate(LifecycleStage::Visible, &other).is_none());
}

fn any_stage() -> impl Strategy<Value = LifecycleStage> {
    prop_oneof![
        Just(LifecycleStage::Dead),
        Just(LifecycleStage::Alive),
        Just(LifecycleStage::Visible),
        Just(LifecycleStage::Focused),
    ]
}

fn any_lifecycle_native() -> impl Strategy<Value = NativeEvent> {
    prop_oneof![
        Just(NativeEvent::Quit),
        (1u8..=14).prop_map(|raw| window(WindowEventId::from_raw(raw))),
    ]
}

proptest! {
    #[test]
    fn lifecycle_events_always_change_stage(
        stage in any_stage(),
        natives in prop::collection::vec(any_lifecycle_native(), 0..32),
    ) {
        let mut stage = stage;
        for native in &natives {
            if let Some(Event::Lifecycle(e)) = translate(stage, native) {
                prop_assert_ne!(e.from, e.to);
                prop_assert_eq!(e.from, stage);
                prop_assert_ne!(e.from, LifecycleStage::Dead);
                stage = e.to;
            }
        }
    }
}
