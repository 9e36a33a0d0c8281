//! The fixed color palette. No theming machinery; the palette is part of
//! the visual identity and changes only here.

use tastepuzzle_ui_graphics::Color;

pub const WINDOW_BACKGROUND: Color = Color::from_hex(0xf5f5f5);
pub const CARD_BACKGROUND: Color = Color::WHITE;
pub const CARD_BORDER: Color = Color::from_hex(0xdddddd);

pub const TEXT_PRIMARY: Color = Color::from_hex(0x2c3e50);
pub const TEXT_SECONDARY: Color = Color::from_hex(0x7f8c8d);

pub const BADGE_CUISINE: Color = Color::from_hex(0x3498db);
pub const BADGE_TIME: Color = Color::from_hex(0xe67e22);
pub const BADGE_DISH_TYPE: Color = Color::from_hex(0x9b59b6);
pub const BADGE_TEXT: Color = Color::WHITE;

pub const TOGGLE_OFF: Color = Color::from_hex(0xbdc3c7);
pub const FAVORITE_ON: Color = Color::from_hex(0xe74c3c);
pub const COOKED_ON: Color = Color::from_hex(0x27ae60);

pub const HEADER_TEXT: Color = Color::from_hex(0x2c3e50);
pub const HEADER_RULE: Color = Color::from_hex(0xcccccc);

pub const ERROR_BANNER: Color = Color::from_hex(0xc0392b);
pub const ERROR_TEXT: Color = Color::WHITE;

pub const IMAGE_PLACEHOLDER: Color = Color::from_hex(0xecf0f1);
