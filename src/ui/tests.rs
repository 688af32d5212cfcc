//! Unit tests for the UI controller.
//!
//! The panel and backlight are replaced by recorders so each test can see
//! how many frames were pushed and which levels were requested.

use embedded_graphics::prelude::*;

use super::menu::{MAIN, PC, SENSORS, SETTINGS};
use super::nav::Direction;
use super::page::{ConstLabel, DataSlot, Menu, Page, PageId};
use super::render::{resolve_text, FrameBuffer, Panel};
use super::theme::Backlight;
use super::{PressScheme, Ui, UiEvent};
use crate::config::{
    BRIGHTNESS_LEVELS, HIGHLIGHT_COLOR, LABEL_BACKGROUND, LABEL_TEXT, THEMES,
};
use crate::error::Error;
use crate::input::InputEvent;
use crate::link::SensorReading;

#[derive(Default)]
struct RecordingPanel {
    flushes: usize,
}

impl Panel for RecordingPanel {
    fn flush(&mut self, _frame: &FrameBuffer) -> Result<(), Error> {
        self.flushes += 1;
        Ok(())
    }
}

#[derive(Default)]
struct RecordingBacklight {
    levels: std::vec::Vec<u8>,
}

impl Backlight for RecordingBacklight {
    fn set_brightness(&mut self, percent: u8) {
        self.levels.push(percent);
    }
}

type TestUi = Ui<RecordingPanel, RecordingBacklight>;

fn ui() -> TestUi {
    Ui::new(RecordingPanel::default(), RecordingBacklight::default())
}

fn ui_on(page: PageId) -> TestUi {
    let mut ui = ui();
    ui.set_current_page(page);
    ui
}

fn flushes(ui: &TestUi) -> usize {
    ui.panel().flushes
}

fn press(ui: &mut TestUi) {
    ui.handle_event(UiEvent::Input(InputEvent::ShortPress));
}

fn down(ui: &mut TestUi) {
    ui.handle_event(UiEvent::Input(InputEvent::MoveDown));
}

// ═══════════════════════════════════════════════════════════════════════════
// Startup and navigation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn boot_applies_first_level_without_drawing() {
    let ui = ui();
    assert_eq!(ui.backlight().levels, [BRIGHTNESS_LEVELS[0]]);
    assert_eq!(flushes(&ui), 0);
    assert_eq!(ui.nav().current_page(), None);
    assert!(ui
        .menu()
        .buttons()
        .all(|b| b.bg_color == THEMES[0].background));
}

#[test]
fn page_switch_flushes_once() {
    let ui = ui_on(MAIN);
    assert_eq!(flushes(&ui), 1);
    assert_eq!(ui.nav().highlight(), 0);
}

#[test]
fn unknown_page_draws_nothing() {
    let mut ui = ui();
    ui.set_current_page(PageId(9));
    assert_eq!(flushes(&ui), 0);
    assert_eq!(ui.nav().current_page(), None);
}

#[test]
fn encoder_moves_highlight_and_redraws() {
    let mut ui = ui_on(MAIN);
    down(&mut ui);
    assert_eq!(ui.nav().highlight(), 1);
    ui.handle_event(UiEvent::Input(InputEvent::MoveUp));
    ui.handle_event(UiEvent::Input(InputEvent::MoveUp));
    assert_eq!(ui.nav().highlight(), 2);
    assert_eq!(flushes(&ui), 4);
}

#[test]
fn highlighted_button_is_painted() {
    let mut ui = ui_on(MAIN);
    down(&mut ui);
    let page = ui.menu().page(MAIN).unwrap();
    let (_, second) = ui.menu().page_button(page, 1).unwrap();
    let probe = second.position + Point::new(second.size.width as i32 / 2, 2);
    assert_eq!(ui.renderer().frame().pixel(probe), Some(HIGHLIGHT_COLOR));
}

#[test]
fn input_before_any_page_is_ignored() {
    let mut ui = ui();
    press(&mut ui);
    down(&mut ui);
    assert_eq!(flushes(&ui), 0);
    assert_eq!(ui.nav().current_page(), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Press schemes
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn short_press_opens_highlighted_page() {
    let mut ui = ui_on(MAIN);
    down(&mut ui);
    press(&mut ui);
    assert_eq!(ui.nav().current_page(), Some(SETTINGS));
    assert_eq!(ui.nav().highlight(), 0);
}

#[test]
fn long_press_unused_when_press_activates() {
    let mut ui = ui_on(MAIN);
    ui.handle_event(UiEvent::Input(InputEvent::LongPress));
    assert_eq!(ui.nav().current_page(), Some(MAIN));
    assert_eq!(flushes(&ui), 1);
}

#[test]
fn short_moves_long_selects() {
    let mut ui = ui().with_scheme(PressScheme::ShortMovesLongSelects);
    ui.set_current_page(MAIN);
    press(&mut ui);
    press(&mut ui);
    assert_eq!(ui.nav().highlight(), 2);
    ui.handle_event(UiEvent::Input(InputEvent::LongPress));
    assert_eq!(ui.nav().current_page(), Some(PC));
}

#[test]
fn shared_return_leads_home_from_every_sub_page() {
    for (page, return_index) in [(SENSORS, 0), (SETTINGS, 2), (PC, 1)] {
        let mut ui = ui_on(page);
        for _ in 0..return_index {
            down(&mut ui);
        }
        press(&mut ui);
        assert_eq!(ui.nav().current_page(), Some(MAIN), "{:?}", page);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn theme_cycle_recolours_every_page() {
    let mut ui = ui_on(SETTINGS);
    press(&mut ui);
    assert_eq!(ui.nav().theme(), 1);
    assert_eq!(flushes(&ui), 2);
    assert!(ui.menu().buttons().all(|b| b.text_color == THEMES[1].text
        && b.bg_color == THEMES[1].background));

    for _ in 1..THEMES.len() {
        press(&mut ui);
    }
    assert_eq!(ui.nav().theme(), 0);
    assert!(ui
        .menu()
        .buttons()
        .all(|b| b.bg_color == THEMES[0].background));
}

#[test]
fn brightness_cycle_drives_backlight_only() {
    let mut ui = ui_on(SETTINGS);
    down(&mut ui);
    let before = flushes(&ui);
    for _ in 0..BRIGHTNESS_LEVELS.len() {
        press(&mut ui);
    }
    assert_eq!(flushes(&ui), before);
    assert_eq!(ui.backlight().levels, [100u8, 75, 50, 25, 10, 100]);
}

// ═══════════════════════════════════════════════════════════════════════════
// PC status link
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn toggle_updates_label_and_queues_line() {
    let mut ui = ui_on(PC);
    press(&mut ui);
    assert!(ui.pc_on());
    assert_eq!(ui.live().get(DataSlot::PcState), "On");
    assert_eq!(ui.take_outbound(), Some("PC:On\r\n"));
    assert!(ui.transmit_pending());
    assert_eq!(flushes(&ui), 2);
}

#[test]
fn pc_page_shows_state_after_its_caption() {
    let mut ui = ui_on(PC);
    press(&mut ui);
    let page = ui.menu().page(PC).unwrap();
    assert!(page.const_labels.iter().any(|l| l.text == "State:"));
    let shown: std::vec::Vec<&str> = page
        .dynamic_labels
        .iter()
        .map(|l| resolve_text(l, ui.live()))
        .collect();
    assert_eq!(shown, ["On"]);
}

#[test]
fn toggle_while_sending_flips_label_but_drops_line() {
    let mut ui = ui_on(PC);
    press(&mut ui);
    assert_eq!(ui.take_outbound(), Some("PC:On\r\n"));

    press(&mut ui);
    assert!(!ui.pc_on());
    assert_eq!(ui.live().get(DataSlot::PcState), "Off");
    assert_eq!(ui.take_outbound(), None);

    ui.handle_event(UiEvent::TransmitDone);
    assert!(!ui.transmit_pending());
    press(&mut ui);
    assert_eq!(ui.take_outbound(), Some("PC:On\r\n"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Sensor readings
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn reading_on_hidden_page_is_stored_silently() {
    let mut ui = ui_on(MAIN);
    ui.update_sensor_reading(23.45, 60.0);
    assert_eq!(flushes(&ui), 1);
    assert_eq!(ui.live().get(DataSlot::Temperature), "23.5C");
    assert_eq!(ui.live().get(DataSlot::Humidity), "60.0%");
}

#[test]
fn reading_on_sensors_page_refreshes_once() {
    let mut ui = ui_on(SENSORS);
    ui.handle_event(UiEvent::Sensor(SensorReading {
        temperature: 19.0,
        humidity: 41.26,
    }));
    assert_eq!(flushes(&ui), 2);
    assert_eq!(ui.live().get(DataSlot::Temperature), "19.0C");
    assert_eq!(ui.live().get(DataSlot::Humidity), "41.3%");
}

#[test]
fn unformattable_reading_keeps_previous_text() {
    let mut ui = ui();
    ui.update_sensor_reading(20.0, 30.0);
    ui.update_sensor_reading(1.0e12, 31.0);
    assert_eq!(ui.live().get(DataSlot::Temperature), "20.0C");
    assert_eq!(ui.live().get(DataSlot::Humidity), "31.0%");
}

// ═══════════════════════════════════════════════════════════════════════════
// Pages without buttons
// ═══════════════════════════════════════════════════════════════════════════

static LABEL_ONLY: [Page; 1] = [Page {
    name: "splash",
    buttons: &[],
    const_labels: &[ConstLabel {
        position: Point::new(10, 10),
        text: "READY",
        text_color: LABEL_TEXT,
        bg_color: LABEL_BACKGROUND,
    }],
    dynamic_labels: &[],
}];

fn label_only_ui() -> TestUi {
    let mut ui = Ui::with_tables(
        Menu::new(&[], &LABEL_ONLY),
        RecordingPanel::default(),
        RecordingBacklight::default(),
        &THEMES,
        &BRIGHTNESS_LEVELS,
    );
    ui.set_current_page(PageId(0));
    ui
}

#[test]
fn buttonless_page_ignores_moves() {
    let mut ui = label_only_ui();
    assert_eq!(flushes(&ui), 1);
    ui.move_highlight(Direction::Down);
    ui.move_highlight(Direction::Up);
    down(&mut ui);
    assert_eq!(ui.nav().highlight(), 0);
    assert_eq!(flushes(&ui), 1);
}

#[test]
fn buttonless_page_ignores_activation() {
    let mut ui = label_only_ui().with_scheme(PressScheme::ShortMovesLongSelects);
    ui.execute_highlighted();
    press(&mut ui);
    ui.handle_event(UiEvent::Input(InputEvent::LongPress));
    assert_eq!(ui.nav().current_page(), Some(PageId(0)));
    assert_eq!(ui.nav().highlighted(ui.menu()), None);
    assert_eq!(ui.take_outbound(), None);
    assert_eq!(flushes(&ui), 1);
}

#[test]
fn buttonless_page_still_draws_labels() {
    let mut ui = label_only_ui();
    ui.redraw();
    assert_eq!(flushes(&ui), 2);

    let pixels = ui.renderer().frame().pixels();
    assert!(pixels.iter().any(|&p| p == LABEL_TEXT));
    assert!(pixels.iter().all(|&p| p != HIGHLIGHT_COLOR));
}
