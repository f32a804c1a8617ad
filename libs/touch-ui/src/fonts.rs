// Font definitions for the touch UI

// Title bar text and the "Back" label
pub use u8g2_fonts::fonts::u8g2_font_helvB12_tf as FONT_TITLE;

// Menu and widget button labels
pub use u8g2_fonts::fonts::u8g2_font_helvR12_tf as FONT_BUTTON;

// Number box and keypad readouts
pub use u8g2_fonts::fonts::u8g2_font_helvB14_tf as FONT_NUMBER;

use u8g2_fonts::FontRenderer;

/// Text roles the UI draws with; each maps onto one of the fonts above.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Font {
    Title,
    #[default]
    Button,
    Number,
}

impl Font {
    pub fn renderer(self) -> FontRenderer {
        let renderer = match self {
            Font::Title => FontRenderer::new::<FONT_TITLE>(),
            Font::Button => FontRenderer::new::<FONT_BUTTON>(),
            Font::Number => FontRenderer::new::<FONT_NUMBER>(),
        };
        renderer.with_ignore_unknown_chars(true)
    }
}
