//! User interface subsystem - paged menu on the SPI LCD.
//!
//! [`Ui`] owns everything the screen depends on: the page arena, the
//! navigation state, the framebuffer renderer, the backlight and the PC
//! status link. It is driven from one task only; interrupts and other
//! tasks hand it [`UiEvent`]s through a queue.
//!
//! ## Components
//!
//! - **Pages**: static [`menu`] tables over the [`page`] arena
//! - **Navigation**: [`nav::NavigationState`] (active page, highlight)
//! - **Rendering**: [`render::Renderer`] into a single framebuffer
//! - **Settings**: [`theme`] colours and backlight levels

pub mod input_logic;
pub mod menu;
pub mod nav;
pub mod page;
pub mod render;
pub mod theme;

#[cfg(test)]
mod tests;

use crate::config::{BRIGHTNESS_LEVELS, PRESS_SCHEME, THEMES};
use crate::input::InputEvent;
use crate::link::{self, SensorReading, StatusLine, StatusLink};

use nav::{Direction, NavigationState};
use page::{Action, ButtonId, DataSlot, LiveData, Menu, PageId};
use render::{Panel, Renderer};
use theme::{Backlight, Theme};

/// How button gestures map onto navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressScheme {
    /// Short press activates the highlighted button; long press is unused.
    PressActivates,
    /// Short press moves the highlight down; long press activates.
    ShortMovesLongSelects,
}

/// Everything the UI task reacts to.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    Input(InputEvent),
    Sensor(SensorReading),
    /// The UART finished sending the pending status line.
    TransmitDone,
}

pub struct Ui<P, B> {
    menu: Menu,
    nav: NavigationState,
    renderer: Renderer<P>,
    backlight: B,
    live: LiveData,
    link: StatusLink,
    pc_on: bool,
    scheme: PressScheme,
    themes: &'static [Theme],
    levels: &'static [u8],
}

impl<P: Panel, B: Backlight> Ui<P, B> {
    /// Standard page set, first theme, first brightness level. No page is
    /// shown until [`set_current_page`](Self::set_current_page).
    pub fn new(panel: P, backlight: B) -> Self {
        Self::with_tables(menu::standard(), panel, backlight, &THEMES, &BRIGHTNESS_LEVELS)
    }

    pub fn with_tables(
        mut menu: Menu,
        panel: P,
        mut backlight: B,
        themes: &'static [Theme],
        levels: &'static [u8],
    ) -> Self {
        if let Some(&first) = themes.first() {
            theme::apply_theme(&mut menu, first);
        }
        if let Some(&first) = levels.first() {
            theme::set_backlight(&mut backlight, first);
        }
        Self {
            menu,
            nav: NavigationState::new(),
            renderer: Renderer::new(panel),
            backlight,
            live: LiveData::new(),
            link: StatusLink::new(),
            pc_on: false,
            scheme: PRESS_SCHEME,
            themes,
            levels,
        }
    }

    pub fn with_scheme(mut self, scheme: PressScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Input(input) => self.handle_input(input),
            UiEvent::Sensor(reading) => {
                self.update_sensor_reading(reading.temperature, reading.humidity)
            }
            UiEvent::TransmitDone => self.transmit_complete(),
        }
    }

    /// Route a debounced gesture through the active press scheme.
    pub fn handle_input(&mut self, event: InputEvent) {
        match (event, self.scheme) {
            (InputEvent::MoveUp, _) => self.move_highlight(Direction::Up),
            (InputEvent::MoveDown, _) => self.move_highlight(Direction::Down),
            (InputEvent::ShortPress, PressScheme::PressActivates) => self.execute_highlighted(),
            (InputEvent::LongPress, PressScheme::PressActivates) => {
                debug!("ui: long press unused");
            }
            (InputEvent::ShortPress, PressScheme::ShortMovesLongSelects) => {
                self.move_highlight(Direction::Down)
            }
            (InputEvent::LongPress, PressScheme::ShortMovesLongSelects) => {
                self.execute_highlighted()
            }
        }
    }

    /// Show `page` with the first button highlighted. Unknown pages are
    /// ignored.
    pub fn set_current_page(&mut self, page: PageId) {
        if self.nav.set_current_page(&self.menu, page) {
            self.redraw();
        }
    }

    pub fn move_highlight(&mut self, direction: Direction) {
        if self.nav.move_highlight(&self.menu, direction) {
            self.redraw();
        }
    }

    /// Run the highlighted button's action, if a button is highlighted.
    pub fn execute_highlighted(&mut self) {
        if let Some((button, action)) = self.nav.highlighted(&self.menu) {
            self.run_action(button, action);
        }
    }

    /// Advance to the next theme on every page and redraw.
    pub fn cycle_theme(&mut self) {
        if self.themes.is_empty() {
            return;
        }
        let index = self.nav.next_theme(self.themes.len());
        info!("ui: theme {}", index);
        theme::apply_theme(&mut self.menu, self.themes[index]);
        self.redraw();
    }

    /// Advance to the next backlight level. The frame is left alone.
    pub fn cycle_brightness(&mut self) {
        if self.levels.is_empty() {
            return;
        }
        let index = self.nav.next_brightness(self.levels.len());
        theme::set_backlight(&mut self.backlight, self.levels[index]);
    }

    /// Flip the requested PC state, show it, and ask the link to send it.
    ///
    /// The label follows the request even when the send is dropped.
    pub fn toggle_output(&mut self) {
        self.pc_on = !self.pc_on;
        let text = if self.pc_on { "On" } else { "Off" };
        if let Err(e) = self.live.set(DataSlot::PcState, text) {
            warn!("ui: pc label: {}", e);
        }
        if let Err(e) = self.link.request(self.pc_on) {
            warn!("ui: status send dropped: {}", e);
        }
        self.redraw();
    }

    /// Store a new reading. If a page showing it is up, only those labels
    /// are repainted; otherwise the text waits for the next full redraw.
    pub fn update_sensor_reading(&mut self, temperature: f32, humidity: f32) {
        for (slot, text) in [
            (DataSlot::Temperature, link::format_temperature(temperature)),
            (DataSlot::Humidity, link::format_humidity(humidity)),
        ] {
            match text {
                Ok(text) => {
                    if let Err(e) = self.live.set(slot, &text) {
                        warn!("ui: {} not stored: {}", slot, e);
                    }
                }
                Err(e) => warn!("ui: {} not formatted: {}", slot, e),
            }
        }

        self.renderer.refresh_live(
            &self.menu,
            &self.nav,
            &self.live,
            &[DataSlot::Temperature, DataSlot::Humidity],
        );
    }

    /// Full repaint of the active page.
    pub fn redraw(&mut self) {
        self.renderer.redraw(&self.menu, &self.nav, &self.live);
    }

    /// Status line waiting for the UART, if any.
    pub fn take_outbound(&mut self) -> Option<StatusLine> {
        self.link.take()
    }

    /// The UART is done with the last line; the next toggle may send.
    pub fn transmit_complete(&mut self) {
        self.link.complete();
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn live(&self) -> &LiveData {
        &self.live
    }

    pub fn renderer(&self) -> &Renderer<P> {
        &self.renderer
    }

    pub fn panel(&self) -> &P {
        self.renderer.panel()
    }

    pub fn backlight(&self) -> &B {
        &self.backlight
    }

    pub fn pc_on(&self) -> bool {
        self.pc_on
    }

    pub fn transmit_pending(&self) -> bool {
        self.link.is_busy()
    }

    fn run_action(&mut self, button: ButtonId, action: Action) {
        debug!("ui: button {} -> {}", button.0, action);
        match action {
            Action::GoToPage(page) => self.set_current_page(page),
            Action::ToggleOutput => self.toggle_output(),
            Action::CycleTheme => self.cycle_theme(),
            Action::CycleBrightness => self.cycle_brightness(),
            Action::NoOp => {}
        }
    }
}
