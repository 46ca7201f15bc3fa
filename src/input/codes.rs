//! Raw device codes used by the default bindings.
//!
//! Values follow SDL2: keyboard codes are `SDL_Keycode`, mouse buttons are
//! bitmask values and joystick buttons and axes follow the SDL game
//! controller layout. Hosts on other backends remap through
//! [`Bindings`](super::Bindings).

/// Keyboard codes.
pub mod key {
    pub const TAB: u32 = 9;
    pub const RETURN: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const PLUS: u32 = 43;
    pub const MINUS: u32 = 45;
    pub const EQUALS: u32 = 61;

    pub const A: u32 = 97;
    pub const D: u32 = 100;
    pub const E: u32 = 101;
    pub const M: u32 = 109;
    pub const P: u32 = 112;
    pub const Q: u32 = 113;
    pub const R: u32 = 114;
    pub const S: u32 = 115;
    pub const W: u32 = 119;

    pub const RIGHT: u32 = 0x4000_004F;
    pub const LEFT: u32 = 0x4000_0050;
    pub const DOWN: u32 = 0x4000_0051;
    pub const UP: u32 = 0x4000_0052;

    pub const KP_MINUS: u32 = 0x4000_0056;
    pub const KP_PLUS: u32 = 0x4000_0057;
}

/// Mouse buttons.
pub mod mouse {
    pub const LEFT: u32 = 1;
    pub const MIDDLE: u32 = 2;
    pub const RIGHT: u32 = 4;
}

/// Game controller buttons.
pub mod button {
    pub const A: u32 = 0;
    pub const B: u32 = 1;
    pub const X: u32 = 2;
    pub const Y: u32 = 3;
    pub const BACK: u32 = 4;
    pub const GUIDE: u32 = 5;
    pub const START: u32 = 6;
    pub const LEFT_STICK: u32 = 7;
    pub const RIGHT_STICK: u32 = 8;
    pub const LEFT_SHOULDER: u32 = 9;
    pub const RIGHT_SHOULDER: u32 = 10;
    pub const DPAD_UP: u32 = 11;
    pub const DPAD_DOWN: u32 = 12;
    pub const DPAD_LEFT: u32 = 13;
    pub const DPAD_RIGHT: u32 = 14;
}

/// Game controller axes.
pub mod axis {
    pub const LEFT_X: u32 = 0;
    pub const LEFT_Y: u32 = 1;
    pub const RIGHT_X: u32 = 2;
    pub const RIGHT_Y: u32 = 3;
}
