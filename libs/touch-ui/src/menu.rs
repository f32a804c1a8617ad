//! Menu tree and navigator
//!
//! Menus live in a [`MenuTree`] arena and refer to each other by
//! [`MenuId`]. The [`MenuNavigator`] owns the tree, tracks which menu is on
//! screen and turns touch events into navigation and item actions.

use crate::canvas::{ARROW_WIDTH, TitleButton};
use crate::clock::Clock;
use crate::error::{MenuError, UiError};
use crate::layout::{Columns, menu_button_rect};
use crate::surface::Surface;
use crate::touch::{TouchEvent, TouchEventKind, TouchSampler};
use crate::ui::TouchUi;
use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;
use std::cell::Cell;
use std::rc::Rc;

/// Stable handle of a menu inside its [`MenuTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(usize);

impl MenuId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Top level menu
    Main,
    /// Menu reached from an item of another menu
    Sub,
}

/// Where the title bar's Back button leads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackTarget {
    /// No Back button
    #[default]
    None,
    Parent(MenuId),
    /// Leave the menu loop and return to the application
    Exit,
}

/// What the menu loop should do after an action ran
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Stay,
    Exit,
}

/// Behaviour attached to a command or toggle item.
///
/// `U` is the context handed to the action, normally the [`TouchUi`] that
/// runs the menu, so commands can open their own screens.
pub trait Action<U> {
    fn execute(&mut self, ui: &mut U) -> Flow;

    /// Current state text shown on a toggle button
    fn describe(&self) -> Option<String> {
        None
    }
}

/// [`Action`] running a closure
pub struct FnAction<F>(F);

impl<U, F: FnMut(&mut U) -> Flow> Action<U> for FnAction<F> {
    fn execute(&mut self, ui: &mut U) -> Flow {
        (self.0)(ui)
    }
}

/// Wrap a closure as a boxed command action
pub fn command<U, F>(f: F) -> Box<dyn Action<U>>
where
    F: FnMut(&mut U) -> Flow + 'static,
{
    Box::new(FnAction(f))
}

/// Toggle action cycling through a fixed list of states.
///
/// The selected index is shared so the application can read it back.
#[derive(Debug, Clone)]
pub struct CycleToggle {
    states: Vec<String>,
    selected: Rc<Cell<usize>>,
}

impl CycleToggle {
    pub fn new(states: &[&str]) -> Self {
        Self::with_selection(states, Rc::new(Cell::new(0)))
    }

    pub fn with_selection(states: &[&str], selected: Rc<Cell<usize>>) -> Self {
        Self {
            states: states.iter().map(ToString::to_string).collect(),
            selected,
        }
    }

    pub fn selection(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.selected)
    }
}

impl<U> Action<U> for CycleToggle {
    fn execute(&mut self, _ui: &mut U) -> Flow {
        if !self.states.is_empty() {
            self.selected
                .set((self.selected.get() + 1) % self.states.len());
        }
        Flow::Stay
    }

    fn describe(&self) -> Option<String> {
        self.states.get(self.selected.get()).cloned()
    }
}

pub enum MenuItem<U> {
    Command {
        label: String,
        action: Box<dyn Action<U>>,
    },
    SubMenu {
        label: String,
        target: MenuId,
    },
    Toggle {
        label: String,
        action: Box<dyn Action<U>>,
    },
}

impl<U> MenuItem<U> {
    pub fn command(label: &str, action: Box<dyn Action<U>>) -> Self {
        MenuItem::Command {
            label: label.to_string(),
            action,
        }
    }

    pub fn sub_menu(label: &str, target: MenuId) -> Self {
        MenuItem::SubMenu {
            label: label.to_string(),
            target,
        }
    }

    pub fn toggle(label: &str, action: Box<dyn Action<U>>) -> Self {
        MenuItem::Toggle {
            label: label.to_string(),
            action,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MenuItem::Command { label, .. }
            | MenuItem::SubMenu { label, .. }
            | MenuItem::Toggle { label, .. } => label,
        }
    }

    /// Text drawn on the item's button
    pub fn display_text(&self) -> String {
        match self {
            MenuItem::Toggle { label, action } => match action.describe() {
                Some(state) => format!("{label}:  {state}"),
                None => label.clone(),
            },
            _ => self.label().to_string(),
        }
    }
}

/// One menu screen: a title, a grid of item buttons and a Back target
pub struct Menu<U> {
    pub kind: MenuKind,
    pub title: String,
    pub columns: Columns,
    pub back: BackTarget,
    pub items: Vec<MenuItem<U>>,
}

impl<U> Menu<U> {
    pub fn main(title: &str) -> Self {
        Self::new(MenuKind::Main, title)
    }

    pub fn sub(title: &str, parent: MenuId) -> Self {
        let mut menu = Self::new(MenuKind::Sub, title);
        menu.back = BackTarget::Parent(parent);
        menu
    }

    fn new(kind: MenuKind, title: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            columns: Columns::One,
            back: BackTarget::None,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn columns(mut self, count: u32) -> Self {
        self.columns = Columns::from_count(count);
        self
    }

    #[must_use]
    pub fn back(mut self, back: BackTarget) -> Self {
        self.back = back;
        self
    }

    #[must_use]
    pub fn item(mut self, item: MenuItem<U>) -> Self {
        self.items.push(item);
        self
    }

    pub fn has_back_button(&self) -> bool {
        self.back != BackTarget::None
    }
}

/// Arena of menus addressed by [`MenuId`]
pub struct MenuTree<U> {
    menus: Vec<Menu<U>>,
}

impl<U> Default for MenuTree<U> {
    fn default() -> Self {
        Self { menus: Vec::new() }
    }
}

impl<U> MenuTree<U> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, menu: Menu<U>) -> MenuId {
        self.menus.push(menu);
        MenuId(self.menus.len() - 1)
    }

    /// Add `menu` as a child of `parent`, reached by a new item labelled `label`.
    ///
    /// The child's Back button leads to `parent`.
    pub fn add_sub_menu(
        &mut self,
        parent: MenuId,
        label: &str,
        mut menu: Menu<U>,
    ) -> Result<MenuId, MenuError> {
        if self.get(parent).is_none() {
            return Err(MenuError::UnknownMenu(parent));
        }
        menu.kind = MenuKind::Sub;
        menu.back = BackTarget::Parent(parent);
        let id = self.add(menu);
        if let Some(parent) = self.get_mut(parent) {
            parent.items.push(MenuItem::sub_menu(label, id));
        }
        Ok(id)
    }

    pub fn get(&self, id: MenuId) -> Option<&Menu<U>> {
        self.menus.get(id.0)
    }

    pub fn get_mut(&mut self, id: MenuId) -> Option<&mut Menu<U>> {
        self.menus.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Check that every submenu item and Back target points at a menu in
    /// this tree, and that submenus lead back to a parent.
    pub fn validate(&self) -> Result<(), MenuError> {
        if self.menus.is_empty() {
            return Err(MenuError::Empty);
        }
        for (index, menu) in self.menus.iter().enumerate() {
            let id = MenuId(index);
            match menu.back {
                BackTarget::Parent(target) if self.get(target).is_none() => {
                    return Err(MenuError::DanglingBackTarget { menu: id, target });
                }
                BackTarget::Parent(_) => {}
                BackTarget::None | BackTarget::Exit if menu.kind == MenuKind::Sub => {
                    return Err(MenuError::OrphanSubMenu(id));
                }
                BackTarget::None | BackTarget::Exit => {}
            }
            for (item_index, item) in menu.items.iter().enumerate() {
                if let MenuItem::SubMenu { target, .. } = item {
                    if self.get(*target).is_none() {
                        return Err(MenuError::DanglingSubMenu {
                            menu: id,
                            index: item_index,
                            target: *target,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Result of handling one event in the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Continue,
    /// The user left the top level menu or a command asked to exit
    Exit,
}

pub struct MenuNavigator<U> {
    tree: MenuTree<U>,
    current: MenuId,
}

impl<U> MenuNavigator<U> {
    /// Take ownership of a validated tree, starting at `root`
    pub fn new(tree: MenuTree<U>, root: MenuId) -> Result<Self, MenuError> {
        tree.validate()?;
        if tree.get(root).is_none() {
            return Err(MenuError::UnknownMenu(root));
        }
        Ok(Self {
            tree,
            current: root,
        })
    }

    pub fn current(&self) -> MenuId {
        self.current
    }

    pub fn current_menu(&self) -> &Menu<U> {
        &self.tree.menus[self.current.0]
    }

    pub fn tree(&self) -> &MenuTree<U> {
        &self.tree
    }
}

impl<S, T, C> MenuNavigator<TouchUi<S, T, C>>
where
    S: Surface,
    T: TouchSampler,
    C: Clock,
{
    fn item_rect(&self, ui: &TouchUi<S, T, C>, index: usize) -> Option<Rectangle> {
        let menu = self.current_menu();
        let canvas = ui.canvas();
        menu_button_rect(
            menu.items.len(),
            menu.columns,
            index,
            canvas.display_space(),
            canvas.layout(),
        )
    }

    fn item_at(&self, ui: &TouchUi<S, T, C>, point: Point) -> Option<usize> {
        (0..self.current_menu().items.len()).find(|index| {
            self.item_rect(ui, *index)
                .is_some_and(|rect| rect.contains(point))
        })
    }

    /// Make `id` the current menu and draw it
    pub fn show(&mut self, ui: &mut TouchUi<S, T, C>, id: MenuId) -> Result<(), UiError<S::Error>> {
        let menu = self.tree.get(id).ok_or(MenuError::UnknownMenu(id))?;
        log::debug!("showing menu '{}'", menu.title);
        let button = if menu.has_back_button() {
            TitleButton::Back
        } else {
            TitleButton::None
        };
        let canvas = ui.canvas_mut();
        canvas
            .draw_title_bar(&menu.title, button)
            .map_err(UiError::draw)?;
        self.current = id;
        canvas.clear_display_space().map_err(UiError::draw)?;

        for index in 0..self.current_menu().items.len() {
            self.draw_item(ui, index, false)?;
        }
        Ok(())
    }

    /// Redraw the current menu from scratch
    pub fn redraw(&mut self, ui: &mut TouchUi<S, T, C>) -> Result<(), UiError<S::Error>> {
        self.show(ui, self.current)
    }

    fn draw_item(
        &self,
        ui: &mut TouchUi<S, T, C>,
        index: usize,
        pressed: bool,
    ) -> Result<(), UiError<S::Error>> {
        let Some(rect) = self.item_rect(ui, index) else {
            log::warn!("menu item {index} does not fit the display");
            return Ok(());
        };
        let Some(item) = self.current_menu().items.get(index) else {
            return Ok(());
        };

        let canvas = ui.canvas_mut();
        let style = canvas.button_style();
        canvas
            .draw_button(&item.display_text(), rect, pressed, &style)
            .map_err(UiError::draw)?;

        if let MenuItem::SubMenu { .. } = item {
            let arrow_x = rect.top_left.x + rect.size.width.cast_signed() - 18;
            let center_y = rect.top_left.y + rect.size.height.cast_signed() / 2;
            canvas
                .surface_mut()
                .fill_triangle(
                    Point::new(arrow_x, center_y - ARROW_WIDTH / 2),
                    Point::new(arrow_x + ARROW_WIDTH, center_y),
                    Point::new(arrow_x, center_y + ARROW_WIDTH / 2),
                    style.text,
                )
                .map_err(UiError::draw)?;
        }
        Ok(())
    }

    /// Handle the event produced by the latest poll
    pub fn handle_event(
        &mut self,
        ui: &mut TouchUi<S, T, C>,
        event: &TouchEvent,
    ) -> Result<NavOutcome, UiError<S::Error>> {
        if event.is_none() {
            return Ok(NavOutcome::Continue);
        }

        if ui
            .canvas_mut()
            .check_back_button_clicked(event)
            .map_err(UiError::draw)?
        {
            return match self.current_menu().back {
                BackTarget::Parent(parent) => {
                    log::debug!("back to menu {parent:?}");
                    self.show(ui, parent)?;
                    Ok(NavOutcome::Continue)
                }
                BackTarget::Exit => {
                    log::info!("leaving menu '{}'", self.current_menu().title);
                    Ok(NavOutcome::Exit)
                }
                BackTarget::None => Ok(NavOutcome::Continue),
            };
        }

        let Some(index) = self.item_at(ui, event.point) else {
            return Ok(NavOutcome::Continue);
        };
        match event.kind {
            TouchEventKind::Pressed => {
                self.draw_item(ui, index, true)?;
                Ok(NavOutcome::Continue)
            }
            TouchEventKind::Released => {
                self.draw_item(ui, index, false)?;
                self.execute_item(ui, index)
            }
            TouchEventKind::Repeating | TouchEventKind::None => Ok(NavOutcome::Continue),
        }
    }

    fn execute_item(
        &mut self,
        ui: &mut TouchUi<S, T, C>,
        index: usize,
    ) -> Result<NavOutcome, UiError<S::Error>> {
        let current = self.current;
        let Some(item) = self.tree.menus[current.0].items.get_mut(index) else {
            return Ok(NavOutcome::Continue);
        };
        match item {
            MenuItem::SubMenu { target, .. } => {
                let target = *target;
                self.show(ui, target)?;
                Ok(NavOutcome::Continue)
            }
            MenuItem::Command { label, action } => {
                log::debug!("running command '{label}'");
                if action.execute(ui) == Flow::Exit {
                    return Ok(NavOutcome::Exit);
                }
                self.show(ui, current)?;
                Ok(NavOutcome::Continue)
            }
            MenuItem::Toggle { action, .. } => {
                let flow = action.execute(ui);
                self.draw_item(ui, index, false)?;
                Ok(match flow {
                    Flow::Stay => NavOutcome::Continue,
                    Flow::Exit => NavOutcome::Exit,
                })
            }
        }
    }

    /// Show the current menu and process events until the user exits.
    ///
    /// `idle` runs once per loop iteration, whether or not there was an event.
    pub fn run(
        &mut self,
        ui: &mut TouchUi<S, T, C>,
        mut idle: impl FnMut(&mut TouchUi<S, T, C>),
    ) -> Result<(), UiError<S::Error>> {
        self.redraw(ui)?;
        loop {
            let event = ui.poll();
            if self.handle_event(ui, &event)? == NavOutcome::Exit {
                return Ok(());
            }
            idle(ui);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Ui = ();

    fn noop() -> Box<dyn Action<Ui>> {
        command(|_: &mut Ui| Flow::Stay)
    }

    #[test]
    fn sub_menu_builder_links_both_ways() {
        let mut tree: MenuTree<Ui> = MenuTree::new();
        let main = tree.add(Menu::main("Main"));
        let settings = tree
            .add_sub_menu(main, "Settings", Menu::main("Settings"))
            .unwrap();

        let child = tree.get(settings).unwrap();
        assert_eq!(child.kind, MenuKind::Sub);
        assert_eq!(child.back, BackTarget::Parent(main));
        assert!(matches!(
            tree.get(main).unwrap().items[0],
            MenuItem::SubMenu { target, .. } if target == settings
        ));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn dangling_ids_are_rejected() {
        let mut tree: MenuTree<Ui> = MenuTree::new();
        let main = tree.add(Menu::main("Main").item(MenuItem::sub_menu("Lost", MenuId(7))));
        assert_eq!(
            MenuNavigator::new(tree, main).err(),
            Some(MenuError::DanglingSubMenu {
                menu: main,
                index: 0,
                target: MenuId(7),
            })
        );

        let mut tree: MenuTree<Ui> = MenuTree::new();
        let main = tree.add(Menu::main("Main").back(BackTarget::Parent(MenuId(3))));
        assert!(matches!(
            MenuNavigator::new(tree, main).err(),
            Some(MenuError::DanglingBackTarget { .. })
        ));
    }

    #[test]
    fn submenu_must_lead_back_to_a_parent() {
        let mut tree: MenuTree<Ui> = MenuTree::new();
        let mut orphan = Menu::sub("Orphan", MenuId(0));
        orphan.back = BackTarget::Exit;
        let id = tree.add(orphan);
        assert_eq!(tree.validate(), Err(MenuError::OrphanSubMenu(id)));
    }

    #[test]
    fn empty_tree_and_unknown_root_are_rejected() {
        let tree: MenuTree<Ui> = MenuTree::new();
        assert_eq!(MenuNavigator::new(tree, MenuId(0)).err(), Some(MenuError::Empty));

        let mut tree: MenuTree<Ui> = MenuTree::new();
        tree.add(Menu::main("Main"));
        assert_eq!(
            MenuNavigator::new(tree, MenuId(1)).err(),
            Some(MenuError::UnknownMenu(MenuId(1)))
        );
    }

    #[test]
    fn toggle_label_shows_current_state() {
        let toggle = CycleToggle::new(&["Off", "On"]);
        let selection = toggle.selection();
        let mut item: MenuItem<Ui> = MenuItem::toggle("Sound", Box::new(toggle));
        assert_eq!(item.display_text(), "Sound:  Off");

        if let MenuItem::Toggle { action, .. } = &mut item {
            assert_eq!(action.execute(&mut ()), Flow::Stay);
        }
        assert_eq!(item.display_text(), "Sound:  On");
        assert_eq!(selection.get(), 1);
    }

    #[test]
    fn toggle_wraps_around() {
        let mut toggle = CycleToggle::new(&["A", "B", "C"]);
        for _ in 0..4 {
            Action::<Ui>::execute(&mut toggle, &mut ());
        }
        assert_eq!(Action::<Ui>::describe(&toggle).as_deref(), Some("B"));
    }

    #[test]
    fn out_of_range_columns_fall_back_to_one() {
        let menu: Menu<Ui> = Menu::main("Main").columns(7).item(MenuItem::command("Go", noop()));
        assert_eq!(menu.columns, Columns::One);
        assert!(!menu.has_back_button());
    }
}
