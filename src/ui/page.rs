//! Declarative page model.
//!
//! Pages are `'static` tables. Buttons live once in the [`Menu`] arena and
//! pages refer to them by [`ButtonId`], so a button listed on several
//! pages is one entity: recolouring it is seen everywhere. Labels belong
//! to their page; dynamic labels read their text from [`LiveData`].

use core::fmt::Write;

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::Rgb565;
use heapless::{String, Vec};

use crate::error::Error;

/// Most buttons the arena holds.
pub const MAX_BUTTONS: usize = 16;

/// Capacity of one dynamic-label text buffer.
pub const LIVE_TEXT_CAPACITY: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageId(pub u8);

/// What a button does when activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    GoToPage(PageId),
    ToggleOutput,
    CycleTheme,
    CycleBrightness,
    NoOp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Button {
    pub position: Point,
    pub size: Size,
    pub radius: u32,
    pub text: &'static str,
    pub text_color: Rgb565,
    pub bg_color: Rgb565,
    pub action: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstLabel {
    pub position: Point,
    pub text: &'static str,
    pub text_color: Rgb565,
    pub bg_color: Rgb565,
}

/// Live value a dynamic label displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataSlot {
    Temperature,
    Humidity,
    PcState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DynamicLabel {
    pub position: Point,
    /// Shown while the bound buffer is empty or unbound.
    pub text: &'static str,
    pub text_color: Rgb565,
    pub bg_color: Rgb565,
    pub data: Option<DataSlot>,
}

/// One screen. Button order is highlight order.
#[derive(Debug)]
pub struct Page {
    pub name: &'static str,
    pub buttons: &'static [ButtonId],
    pub const_labels: &'static [ConstLabel],
    pub dynamic_labels: &'static [DynamicLabel],
}

impl Page {
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// True when any dynamic label on this page is bound to `slot`.
    pub fn shows(&self, slot: DataSlot) -> bool {
        self.dynamic_labels.iter().any(|l| l.data == Some(slot))
    }
}

/// Button arena plus the fixed page table.
pub struct Menu {
    buttons: Vec<Button, MAX_BUTTONS>,
    pages: &'static [Page],
}

impl Menu {
    /// Copy `buttons` into the arena. Entries beyond [`MAX_BUTTONS`] are
    /// dropped; pages naming them simply skip them.
    pub fn new(buttons: &[Button], pages: &'static [Page]) -> Self {
        let mut arena = Vec::new();
        for button in buttons {
            if arena.push(*button).is_err() {
                warn!("menu: button arena full, dropping {}", button.text);
                break;
            }
        }
        Self {
            buttons: arena,
            pages,
        }
    }

    pub fn page(&self, id: PageId) -> Option<&'static Page> {
        self.pages.get(usize::from(id.0))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.get(usize::from(id.0))
    }

    /// Button at highlight position `index` on `page`.
    pub fn page_button(&self, page: &Page, index: usize) -> Option<(ButtonId, &Button)> {
        let id = *page.buttons.get(index)?;
        self.button(id).map(|b| (id, b))
    }

    /// Every button in the arena, i.e. every button of every page.
    pub fn buttons_mut(&mut self) -> impl Iterator<Item = &mut Button> {
        self.buttons.iter_mut()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter()
    }
}

/// Text buffers behind the dynamic labels.
#[derive(Default)]
pub struct LiveData {
    temperature: String<LIVE_TEXT_CAPACITY>,
    humidity: String<LIVE_TEXT_CAPACITY>,
    pc_state: String<LIVE_TEXT_CAPACITY>,
}

impl LiveData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: DataSlot) -> &str {
        self.slot(slot).as_str()
    }

    /// Replace the contents of `slot`. On overflow the previous text is
    /// kept.
    pub fn set(&mut self, slot: DataSlot, text: &str) -> Result<(), Error> {
        let mut next = String::new();
        next.write_str(text)?;
        *self.slot_mut(slot) = next;
        Ok(())
    }

    fn slot(&self, slot: DataSlot) -> &String<LIVE_TEXT_CAPACITY> {
        match slot {
            DataSlot::Temperature => &self.temperature,
            DataSlot::Humidity => &self.humidity,
            DataSlot::PcState => &self.pc_state,
        }
    }

    fn slot_mut(&mut self, slot: DataSlot) -> &mut String<LIVE_TEXT_CAPACITY> {
        match slot {
            DataSlot::Temperature => &mut self.temperature,
            DataSlot::Humidity => &mut self.humidity,
            DataSlot::PcState => &mut self.pc_state,
        }
    }
}
