//! Active page and highlight tracking.
//!
//! [`NavigationState`] is the only mutable navigation data. Every
//! operation takes the [`Menu`] it navigates by reference and reports
//! whether anything changed; redrawing is left to the caller.

use super::input_logic::{select_next, select_prev};
use super::page::{Action, ButtonId, Menu, PageId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NavigationState {
    current_page: Option<PageId>,
    highlight: usize,
    theme: usize,
    brightness: usize,
}

impl NavigationState {
    /// No page active, first theme and brightness level.
    pub const fn new() -> Self {
        Self {
            current_page: None,
            highlight: 0,
            theme: 0,
            brightness: 0,
        }
    }

    pub fn current_page(&self) -> Option<PageId> {
        self.current_page
    }

    /// Highlight index on the active page (0-based).
    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn theme(&self) -> usize {
        self.theme
    }

    pub fn brightness(&self) -> usize {
        self.brightness
    }

    /// Activate `page` and reset the highlight to its first button.
    ///
    /// Returns `false` (and changes nothing) when `page` does not exist.
    pub fn set_current_page(&mut self, menu: &Menu, page: PageId) -> bool {
        let Some(target) = menu.page(page) else {
            warn!("nav: no page {}", page.0);
            return false;
        };
        info!("nav: -> {}", target.name);
        self.current_page = Some(page);
        self.highlight = 0;
        true
    }

    /// Step the highlight, wrapping at both ends.
    ///
    /// Returns `false` when no page is active or it has no buttons.
    pub fn move_highlight(&mut self, menu: &Menu, direction: Direction) -> bool {
        let count = self.button_count(menu);
        if count == 0 {
            return false;
        }
        self.highlight = match direction {
            Direction::Down => select_next(self.highlight, count),
            Direction::Up => select_prev(self.highlight, count),
        };
        debug!("nav: highlight {}/{}", self.highlight, count);
        true
    }

    /// The highlighted button and its action, if any.
    pub fn highlighted(&self, menu: &Menu) -> Option<(ButtonId, Action)> {
        let page = menu.page(self.current_page?)?;
        menu.page_button(page, self.highlight)
            .map(|(id, button)| (id, button.action))
    }

    /// Advance the theme index modulo `count` and return it.
    pub fn next_theme(&mut self, count: usize) -> usize {
        self.theme = select_next(self.theme, count);
        self.theme
    }

    /// Advance the brightness index modulo `count` and return it.
    pub fn next_brightness(&mut self, count: usize) -> usize {
        self.brightness = select_next(self.brightness, count);
        self.brightness
    }

    fn button_count(&self, menu: &Menu) -> usize {
        self.current_page
            .and_then(|id| menu.page(id))
            .map_or(0, |page| page.button_count())
    }
}
