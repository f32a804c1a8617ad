//! Demo menu exercising every widget kind
//!
//! Screens opened from the menu run their own poll loop until Back is
//! pressed or `keep_running` turns false, so a replay can end while a screen
//! is still open.

use std::cell::Cell;
use std::rc::Rc;

use embedded_graphics::prelude::{Point, Size};
use touch_ui::layout::SliderTrack;
use touch_ui::ui::MESSAGE_MS;
use touch_ui::{
    Action, Clock, CycleToggle, Flow, Menu, MenuError, MenuId, MenuItem, MenuTree, NumberBox,
    Palette, SelectionBox, Slider, Surface, Theme, TitleButton, TouchSampler, TouchUi, UiError,
    command, numeric_keypad,
};

pub type KeepRunning = Rc<dyn Fn() -> bool>;

pub const MAIN_TITLE: &str = "Touch Demo";

/// Command flipping between the two color palettes
struct PaletteSwitch {
    palette: Palette,
}

impl<S, T, C> Action<TouchUi<S, T, C>> for PaletteSwitch
where
    S: Surface,
    T: TouchSampler,
    C: Clock,
{
    fn execute(&mut self, ui: &mut TouchUi<S, T, C>) -> Flow {
        self.palette = match self.palette {
            Palette::Blue => Palette::Gray,
            Palette::Gray => Palette::Blue,
        };
        log::info!("palette {:?}", self.palette);
        ui.canvas_mut().set_theme(Theme::from(self.palette));
        Flow::Stay
    }
}

fn adjust_screen<S, T, C>(
    ui: &mut TouchUi<S, T, C>,
    keep_running: &dyn Fn() -> bool,
) -> Result<(), UiError<S::Error>>
where
    S: Surface,
    T: TouchSampler,
    C: Clock,
{
    let mut level = NumberBox::new("Level", Point::new(160, 75), Size::new(200, 32), 5, 0, 20, 1)?;
    let mut mode = SelectionBox::new(
        "Mode",
        Point::new(160, 140),
        Size::new(240, 30),
        1,
        &["Eco", "Normal", "Boost"],
    )?;
    let track = SliderTrack {
        center: Point::new(160, 205),
        width: 240,
        min: 0,
        max: 100,
        step: 5,
    };
    let mut volume = Slider::new("Volume", track, 50);

    let canvas = ui.canvas_mut();
    canvas
        .draw_title_bar("Adjust", TitleButton::Back)
        .map_err(UiError::draw)?;
    canvas.clear_display_space().map_err(UiError::draw)?;
    level.draw(canvas).map_err(UiError::draw)?;
    mode.draw(canvas).map_err(UiError::draw)?;
    volume.draw(canvas).map_err(UiError::draw)?;

    while keep_running() {
        ui.poll();
        if ui.check_back_button_clicked().map_err(UiError::draw)? {
            break;
        }
        if ui.check_number_box(&mut level).map_err(UiError::draw)? {
            log::info!("level {}", level.formatted());
        }
        if ui.check_selection_box(&mut mode).map_err(UiError::draw)? {
            log::info!("mode {}", mode.selected());
        }
        if ui.check_slider(&mut volume).map_err(UiError::draw)? {
            log::info!("volume {}", volume.value);
        }
    }
    Ok(())
}

/// Build the demo tree and return it with its root menu.
pub fn menu_tree<S, T, C>(
    keep_running: &KeepRunning,
) -> Result<(MenuTree<TouchUi<S, T, C>>, MenuId), MenuError>
where
    S: Surface + 'static,
    T: TouchSampler + 'static,
    C: Clock + 'static,
{
    let timeout = Rc::new(Cell::new(30));

    let adjust = {
        let keep_running = Rc::clone(keep_running);
        command(move |ui: &mut TouchUi<S, T, C>| {
            if let Err(e) = adjust_screen(ui, keep_running.as_ref()) {
                log::error!("Adjust screen failed: {e}");
            }
            Flow::Stay
        })
    };
    let keypad = command(move |ui: &mut TouchUi<S, T, C>| {
        match numeric_keypad(ui, "Timeout (s)", timeout.get(), 0, 3600) {
            Ok(Some(value)) => {
                log::info!("timeout set to {value} s");
                timeout.set(value);
            }
            Ok(None) => log::info!("timeout unchanged"),
            Err(e) => log::error!("Keypad failed: {e:?}"),
        }
        Flow::Stay
    });
    let about = command(|ui: &mut TouchUi<S, T, C>| {
        if let Err(e) = ui.show_message("touch-replay demo", MESSAGE_MS) {
            log::error!("Failed to show message: {e:?}");
        }
        Flow::Stay
    });

    let mut tree = MenuTree::new();
    let main = tree.add(
        Menu::main(MAIN_TITLE)
            .columns(2)
            .item(MenuItem::command("Adjust", adjust))
            .item(MenuItem::command("Keypad", keypad))
            .item(MenuItem::command(
                "Palette",
                Box::new(PaletteSwitch {
                    palette: Palette::Blue,
                }),
            )),
    );
    tree.add_sub_menu(
        main,
        "Settings",
        Menu::sub("Settings", main)
            .item(MenuItem::toggle(
                "Sound",
                Box::new(CycleToggle::new(&["On", "Off"])),
            ))
            .item(MenuItem::command("About", about)),
    )?;
    Ok((tree, main))
}
