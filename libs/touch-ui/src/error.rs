use crate::menu::MenuId;
use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] IoError),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Programming errors in a menu tree.
///
/// These are caught when the navigator or widget is constructed so that a
/// malformed tree never reaches the UI loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("menu {0:?} does not exist")]
    UnknownMenu(MenuId),
    #[error("menu {menu:?} item {index} points at missing menu {target:?}")]
    DanglingSubMenu {
        menu: MenuId,
        index: usize,
        target: MenuId,
    },
    #[error("menu {menu:?} has a back target {target:?} that does not exist")]
    DanglingBackTarget { menu: MenuId, target: MenuId },
    #[error("submenu {0:?} has no parent to go back to")]
    OrphanSubMenu(MenuId),
    #[error("menu tree is empty")]
    Empty,
}

/// Invalid widget declarations, reported by the widget constructors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error("a selection box needs 1 to 4 choices, got {0}")]
    ChoiceCount(usize),
    #[error("minimum {min} is above maximum {max}")]
    Range { min: String, max: String },
    #[error("invalid BMP image: {0:?}")]
    Image(tinybmp::ParseError),
}

/// Errors raised while running the UI against a surface whose own error type is `E`.
#[derive(Error, Debug)]
pub enum UiError<E: core::fmt::Debug> {
    #[error("Drawing error: {0:?}")]
    Draw(E),
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Widget(#[from] WidgetError),
}

impl<E: core::fmt::Debug> UiError<E> {
    pub fn draw(e: E) -> Self {
        Self::Draw(e)
    }
}
