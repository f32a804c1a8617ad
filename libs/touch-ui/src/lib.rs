//! Touch user interface core for small embedded displays
//!
//! Raw touch samples are debounced into discrete press, repeat and release
//! events by [`TouchStateMachine`]. Widgets hit-test those events against
//! rectangles computed by the [`layout`] module, and [`MenuNavigator`] walks
//! a tree of menus built by the application. All drawing goes through the
//! [`Surface`] trait so the core stays independent of the display hardware.

pub mod canvas;
pub mod clock;
pub mod config;
pub mod error;
pub mod fonts;
pub mod framebuffer;
pub mod keypad;
pub mod layout;
pub mod menu;
pub mod script;
pub mod surface;
pub mod text;
pub mod theme;
pub mod touch;
pub mod ui;
pub mod widgets;

pub mod test_utils;

// Re-export commonly used types
pub use canvas::{Canvas, TitleButton};
pub use clock::{Clock, SystemClock};
pub use config::{LayoutConfig, Palette, TouchTiming, UiConfig};
pub use error::{ConfigError, MenuError, UiError, WidgetError};
pub use framebuffer::Framebuffer;
pub use keypad::numeric_keypad;
pub use menu::{
    Action, BackTarget, CycleToggle, Flow, Menu, MenuId, MenuItem, MenuKind, MenuNavigator,
    MenuTree, NavOutcome, command,
};
pub use script::{ScriptStep, ScriptedSampler, SteppingClock};
pub use surface::{DisplaySurface, Surface};
pub use theme::Theme;
pub use touch::{TouchEvent, TouchEventKind, TouchSample, TouchSampler, TouchStateMachine};
pub use ui::{EventCounts, MESSAGE_MS, TouchUi};
pub use widgets::{
    Button, DragState, ImageButton, NumberBox, NumberBoxFloat, NumberValue, Pressable, SelectionBox,
    Slider,
};
