// src/native/keysym.rs

//! SDL2 key symbol, modifier and mouse button values.
//!
//! These mirror `SDL_keycode.h` and `SDL_mouse.h`. They are part of SDL's stable
//! ABI, so the translation tables can be built and tested without linking SDL.
#![allow(non_upper_case_globals)]

pub type Keycode = i32;

const SCANCODE_MASK: i32 = 1 << 30;

const fn from_scancode(scancode: i32) -> Keycode {
    scancode | SCANCODE_MASK
}

pub const SDLK_RETURN: Keycode = '\r' as i32;
pub const SDLK_ESCAPE: Keycode = 0x1B;
pub const SDLK_BACKSPACE: Keycode = 0x08;
pub const SDLK_TAB: Keycode = '\t' as i32;
pub const SDLK_SPACE: Keycode = ' ' as i32;
pub const SDLK_QUOTE: Keycode = '\'' as i32;
pub const SDLK_COMMA: Keycode = ',' as i32;
pub const SDLK_MINUS: Keycode = '-' as i32;
pub const SDLK_PERIOD: Keycode = '.' as i32;
pub const SDLK_SLASH: Keycode = '/' as i32;
pub const SDLK_0: Keycode = '0' as i32;
pub const SDLK_1: Keycode = '1' as i32;
pub const SDLK_2: Keycode = '2' as i32;
pub const SDLK_3: Keycode = '3' as i32;
pub const SDLK_4: Keycode = '4' as i32;
pub const SDLK_5: Keycode = '5' as i32;
pub const SDLK_6: Keycode = '6' as i32;
pub const SDLK_7: Keycode = '7' as i32;
pub const SDLK_8: Keycode = '8' as i32;
pub const SDLK_9: Keycode = '9' as i32;
pub const SDLK_SEMICOLON: Keycode = ';' as i32;
pub const SDLK_EQUALS: Keycode = '=' as i32;
pub const SDLK_LEFTBRACKET: Keycode = '[' as i32;
pub const SDLK_BACKSLASH: Keycode = '\\' as i32;
pub const SDLK_RIGHTBRACKET: Keycode = ']' as i32;
pub const SDLK_BACKQUOTE: Keycode = '`' as i32;
pub const SDLK_a: Keycode = 'a' as i32;
pub const SDLK_b: Keycode = 'b' as i32;
pub const SDLK_c: Keycode = 'c' as i32;
pub const SDLK_d: Keycode = 'd' as i32;
pub const SDLK_e: Keycode = 'e' as i32;
pub const SDLK_f: Keycode = 'f' as i32;
pub const SDLK_g: Keycode = 'g' as i32;
pub const SDLK_h: Keycode = 'h' as i32;
pub const SDLK_i: Keycode = 'i' as i32;
pub const SDLK_j: Keycode = 'j' as i32;
pub const SDLK_k: Keycode = 'k' as i32;
pub const SDLK_l: Keycode = 'l' as i32;
pub const SDLK_m: Keycode = 'm' as i32;
pub const SDLK_n: Keycode = 'n' as i32;
pub const SDLK_o: Keycode = 'o' as i32;
pub const SDLK_p: Keycode = 'p' as i32;
pub const SDLK_q: Keycode = 'q' as i32;
pub const SDLK_r: Keycode = 'r' as i32;
pub const SDLK_s: Keycode = 's' as i32;
pub const SDLK_t: Keycode = 't' as i32;
pub const SDLK_u: Keycode = 'u' as i32;
pub const SDLK_v: Keycode = 'v' as i32;
pub const SDLK_w: Keycode = 'w' as i32;
pub const SDLK_x: Keycode = 'x' as i32;
pub const SDLK_y: Keycode = 'y' as i32;
pub const SDLK_z: Keycode = 'z' as i32;
pub const SDLK_DELETE: Keycode = 0x7F;

pub const SDLK_CAPSLOCK: Keycode = from_scancode(57);
pub const SDLK_F1: Keycode = from_scancode(58);
pub const SDLK_F2: Keycode = from_scancode(59);
pub const SDLK_F3: Keycode = from_scancode(60);
pub const SDLK_F4: Keycode = from_scancode(61);
pub const SDLK_F5: Keycode = from_scancode(62);
pub const SDLK_F6: Keycode = from_scancode(63);
pub const SDLK_F7: Keycode = from_scancode(64);
pub const SDLK_F8: Keycode = from_scancode(65);
pub const SDLK_F9: Keycode = from_scancode(66);
pub const SDLK_F10: Keycode = from_scancode(67);
pub const SDLK_F11: Keycode = from_scancode(68);
pub const SDLK_F12: Keycode = from_scancode(69);
pub const SDLK_PRINTSCREEN: Keycode = from_scancode(70);
pub const SDLK_SCROLLLOCK: Keycode = from_scancode(71);
pub const SDLK_PAUSE: Keycode = from_scancode(72);
pub const SDLK_INSERT: Keycode = from_scancode(73);
pub const SDLK_HOME: Keycode = from_scancode(74);
pub const SDLK_PAGEUP: Keycode = from_scancode(75);
pub const SDLK_END: Keycode = from_scancode(77);
pub const SDLK_PAGEDOWN: Keycode = from_scancode(78);
pub const SDLK_RIGHT: Keycode = from_scancode(79);
pub const SDLK_LEFT: Keycode = from_scancode(80);
pub const SDLK_DOWN: Keycode = from_scancode(81);
pub const SDLK_UP: Keycode = from_scancode(82);
pub const SDLK_NUMLOCKCLEAR: Keycode = from_scancode(83);
pub const SDLK_KP_DIVIDE: Keycode = from_scancode(84);
pub const SDLK_KP_MULTIPLY: Keycode = from_scancode(85);
pub const SDLK_KP_MINUS: Keycode = from_scancode(86);
pub const SDLK_KP_PLUS: Keycode = from_scancode(87);
pub const SDLK_KP_ENTER: Keycode = from_scancode(88);
pub const SDLK_KP_1: Keycode = from_scancode(89);
pub const SDLK_KP_2: Keycode = from_scancode(90);
pub const SDLK_KP_3: Keycode = from_scancode(91);
pub const SDLK_KP_4: Keycode = from_scancode(92);
pub const SDLK_KP_5: Keycode = from_scancode(93);
pub const SDLK_KP_6: Keycode = from_scancode(94);
pub const SDLK_KP_7: Keycode = from_scancode(95);
pub const SDLK_KP_8: Keycode = from_scancode(96);
pub const SDLK_KP_9: Keycode = from_scancode(97);
pub const SDLK_KP_0: Keycode = from_scancode(98);
pub const SDLK_KP_PERIOD: Keycode = from_scancode(99);
pub const SDLK_APPLICATION: Keycode = from_scancode(101);
pub const SDLK_KP_EQUALS: Keycode = from_scancode(103);
pub const SDLK_F13: Keycode = from_scancode(104);
pub const SDLK_F14: Keycode = from_scancode(105);
pub const SDLK_F15: Keycode = from_scancode(106);
pub const SDLK_F16: Keycode = from_scancode(107);
pub const SDLK_F17: Keycode = from_scancode(108);
pub const SDLK_F18: Keycode = from_scancode(109);
pub const SDLK_F19: Keycode = from_scancode(110);
pub const SDLK_F20: Keycode = from_scancode(111);
pub const SDLK_F21: Keycode = from_scancode(112);
pub const SDLK_F22: Keycode = from_scancode(113);
pub const SDLK_F23: Keycode = from_scancode(114);
pub const SDLK_F24: Keycode = from_scancode(115);
pub const SDLK_LCTRL: Keycode = from_scancode(224);
pub const SDLK_LSHIFT: Keycode = from_scancode(225);
pub const SDLK_LALT: Keycode = from_scancode(226);
pub const SDLK_LGUI: Keycode = from_scancode(227);
pub const SDLK_RCTRL: Keycode = from_scancode(228);
pub const SDLK_RSHIFT: Keycode = from_scancode(229);
pub const SDLK_RALT: Keycode = from_scancode(230);
pub const SDLK_RGUI: Keycode = from_scancode(231);

// SDL_Keymod bits.
pub const KMOD_LSHIFT: u16 = 0x0001;
pub const KMOD_RSHIFT: u16 = 0x0002;
pub const KMOD_LCTRL: u16 = 0x0040;
pub const KMOD_RCTRL: u16 = 0x0080;
pub const KMOD_LALT: u16 = 0x0100;
pub const KMOD_RALT: u16 = 0x0200;
pub const KMOD_LGUI: u16 = 0x0400;
pub const KMOD_RGUI: u16 = 0x0800;
pub const KMOD_SHIFT: u16 = KMOD_LSHIFT | KMOD_RSHIFT;
pub const KMOD_CTRL: u16 = KMOD_LCTRL | KMOD_RCTRL;
pub const KMOD_ALT: u16 = KMOD_LALT | KMOD_RALT;
pub const KMOD_GUI: u16 = KMOD_LGUI | KMOD_RGUI;

// Mouse buttons.
pub const SDL_BUTTON_LEFT: u8 = 1;
pub const SDL_BUTTON_MIDDLE: u8 = 2;
pub const SDL_BUTTON_RIGHT: u8 = 3;
pub const SDL_BUTTON_X1: u8 = 4;
pub const SDL_BUTTON_X2: u8 = 5;

#[cfg(all(test, feature = "sdl"))]
mod tests {
    use super::*;
    use sdl2::sys;

    #[test]
    fn it_should_match_the_sdl_bindings() {
        assert_eq!(SDLK_F1, sys::SDL_KeyCode::SDLK_F1 as Keycode);
        assert_eq!(SDLK_KP_PERIOD, sys::SDL_KeyCode::SDLK_KP_PERIOD as Keycode);
        assert_eq!(SDLK_RGUI, sys::SDL_KeyCode::SDLK_RGUI as Keycode);
        assert_eq!(SDLK_a, sys::SDL_KeyCode::SDLK_a as Keycode);
        assert_eq!(KMOD_GUI, sys::SDL_Keymod::KMOD_GUI as u16);
        assert_eq!(KMOD_SHIFT, sys::SDL_Keymod::KMOD_SHIFT as u16);
        assert_eq!(u32::from(SDL_BUTTON_RIGHT), sys::SDL_BUTTON_RIGHT);
        assert_eq!(u32::from(SDL_BUTTON_X2), sys::SDL_BUTTON_X2);
    }
}
