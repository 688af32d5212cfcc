//! The product's screens, laid out for the 160×128 panel.
//!
//! ```text
//! Main ──Sensors──▶ Sensors  (temperature / humidity, Return)
//!      ──Settings─▶ Settings (Theme, Brightness, Return)
//!      ──PC───────▶ PC       (state, Toggle, Return)
//! ```
//!
//! "Return" is a single button shared by all three sub-pages.

use embedded_graphics::geometry::{Point, Size};

use super::page::{
    Action, Button, ButtonId, ConstLabel, DataSlot, DynamicLabel, Menu, Page, PageId,
};
use crate::config::{
    BTN_DEFAULT_HEIGHT, BTN_DEFAULT_RADIUS, BTN_DEFAULT_WIDTH, LABEL_BACKGROUND, LABEL_TEXT,
    LCD_WIDTH, THEMES,
};

pub const MAIN: PageId = PageId(0);
pub const SENSORS: PageId = PageId(1);
pub const SETTINGS: PageId = PageId(2);
pub const PC: PageId = PageId(3);

const BTN_SENSORS: ButtonId = ButtonId(0);
const BTN_SETTINGS: ButtonId = ButtonId(1);
const BTN_PC: ButtonId = ButtonId(2);
const BTN_RETURN: ButtonId = ButtonId(3);
const BTN_THEME: ButtonId = ButtonId(4);
const BTN_BRIGHTNESS: ButtonId = ButtonId(5);
const BTN_TOGGLE: ButtonId = ButtonId(6);

/// Button rows, top to bottom.
const ROWS: [i32; 3] = [28, 60, 92];

const BTN_X: i32 = ((LCD_WIDTH - BTN_DEFAULT_WIDTH) / 2) as i32;

const fn button(row: usize, text: &'static str, action: Action) -> Button {
    Button {
        position: Point::new(BTN_X, ROWS[row]),
        size: Size::new(BTN_DEFAULT_WIDTH, BTN_DEFAULT_HEIGHT),
        radius: BTN_DEFAULT_RADIUS,
        text,
        text_color: THEMES[0].text,
        bg_color: THEMES[0].background,
        action,
    }
}

const fn label(x: i32, y: i32, text: &'static str) -> ConstLabel {
    ConstLabel {
        position: Point::new(x, y),
        text,
        text_color: LABEL_TEXT,
        bg_color: LABEL_BACKGROUND,
    }
}

const fn live(x: i32, y: i32, fallback: &'static str, slot: DataSlot) -> DynamicLabel {
    DynamicLabel {
        position: Point::new(x, y),
        text: fallback,
        text_color: LABEL_TEXT,
        bg_color: LABEL_BACKGROUND,
        data: Some(slot),
    }
}

/// Arena order must match the `BTN_*` ids.
static BUTTONS: [Button; 7] = [
    button(0, "Sensors", Action::GoToPage(SENSORS)),
    button(1, "Settings", Action::GoToPage(SETTINGS)),
    button(2, "PC", Action::GoToPage(PC)),
    button(2, "Return", Action::GoToPage(MAIN)),
    button(0, "Theme", Action::CycleTheme),
    button(1, "Brightness", Action::CycleBrightness),
    button(1, "Toggle", Action::ToggleOutput),
];

/// Page table, indexed by `PageId`.
static PAGES: [Page; 4] = [
    Page {
        name: "main",
        buttons: &[BTN_SENSORS, BTN_SETTINGS, BTN_PC],
        const_labels: &[label(56, 8, "MENU")],
        dynamic_labels: &[],
    },
    Page {
        name: "sensors",
        buttons: &[BTN_RETURN],
        const_labels: &[label(50, 8, "SENSORS"), label(16, 36, "Temp:"), label(16, 60, "Humid:")],
        dynamic_labels: &[
            live(76, 36, "--.-C", DataSlot::Temperature),
            live(76, 60, "--.-%", DataSlot::Humidity),
        ],
    },
    Page {
        name: "settings",
        buttons: &[BTN_THEME, BTN_BRIGHTNESS, BTN_RETURN],
        const_labels: &[label(56, 8, "SETUP")],
        dynamic_labels: &[],
    },
    Page {
        name: "pc",
        buttons: &[BTN_TOGGLE, BTN_RETURN],
        const_labels: &[label(68, 8, "PC"), label(16, 36, "State:")],
        dynamic_labels: &[live(76, 36, "Off", DataSlot::PcState)],
    },
];

/// Build the arena for the standard page set.
pub fn standard() -> Menu {
    Menu::new(&BUTTONS, &PAGES)
}
