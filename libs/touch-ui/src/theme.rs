use crate::config::Palette;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

const fn raw(value: u16) -> Rgb565 {
    Rgb565::new(
        ((value >> 11) & 0x1F) as u8,
        ((value >> 5) & 0x3F) as u8,
        (value & 0x1F) as u8,
    )
}

// Standard 16-bit panel colors
pub const DARK_BLUE: Rgb565 = raw(0x0010);
pub const LIGHT_BLUE: Rgb565 = raw(0x867D);
pub const SELECTED_BLUE: Rgb565 = raw(0x8C5F);

/// Colors used to draw the title bar, menus and standard buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title_bar: Rgb565,
    pub title_text: Rgb565,
    pub title_button: Rgb565,
    pub title_button_selected: Rgb565,
    pub background: Rgb565,
    pub button: Rgb565,
    pub button_selected: Rgb565,
    pub button_frame: Rgb565,
    pub button_text: Rgb565,
}

impl Default for Theme {
    fn default() -> Self {
        Self::blue()
    }
}

impl From<Palette> for Theme {
    fn from(palette: Palette) -> Self {
        match palette {
            Palette::Blue => Self::blue(),
            Palette::Gray => Self::gray(),
        }
    }
}

impl Theme {
    #[must_use]
    pub const fn blue() -> Self {
        Self {
            title_bar: Rgb565::BLUE,
            title_text: Rgb565::WHITE,
            title_button: DARK_BLUE,
            title_button_selected: SELECTED_BLUE,
            background: Rgb565::BLACK,
            button: Rgb565::BLUE,
            button_selected: SELECTED_BLUE,
            button_frame: LIGHT_BLUE,
            button_text: Rgb565::WHITE,
        }
    }

    /// Greenish gray palette; the blue channel is pulled down a little
    /// on every shade.
    #[must_use]
    pub const fn gray() -> Self {
        let title_button = Rgb565::new(9, 18, 5);
        let selected = Rgb565::new(16, 32, 11);
        Self {
            title_bar: Rgb565::new(11, 22, 6),
            title_text: Rgb565::WHITE,
            title_button,
            title_button_selected: selected,
            background: Rgb565::BLACK,
            button: title_button,
            button_selected: selected,
            button_frame: Rgb565::new(12, 24, 8),
            button_text: Rgb565::WHITE,
        }
    }
}

/// Per-button color override, for buttons that should not use the menu colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub face: Rgb565,
    pub face_selected: Rgb565,
    pub frame: Rgb565,
    pub text: Rgb565,
}

impl ButtonStyle {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            face: theme.button,
            face_selected: theme.button_selected,
            frame: theme.button_frame,
            text: theme.button_text,
        }
    }

    pub fn face(&self, pressed: bool) -> Rgb565 {
        if pressed { self.face_selected } else { self.face }
    }
}
