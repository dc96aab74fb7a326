//! Button input.
//!
//! The engine only ever polls the instantaneous level of each button.
//! [`SharedButtons`] is a register that an interrupt handler (or another
//! thread on the host) can latch levels into, built on `critical-section`.

use core::cell::Cell;

use critical_section::Mutex;

/// The four logical buttons of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
}

impl Button {
    /// All buttons in polling order
    pub const ALL: [Button; 4] = [Button::A, Button::B, Button::X, Button::Y];

    /// Bit of the button in a packed level mask
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::X => "X",
            Self::Y => "Y",
        }
    }
}

/// Abstract button reader
///
/// Reports raw levels, no debouncing is expected from implementors.
pub trait InputSource {
    /// Check if the button is currently held
    fn is_pressed(&self, button: Button) -> bool;
}

impl<I: InputSource + ?Sized> InputSource for &I {
    fn is_pressed(&self, button: Button) -> bool {
        (**self).is_pressed(button)
    }
}

/// Button level register shared between contexts.
///
/// Writers call [`SharedButtons::set`] from an interrupt or another thread,
/// the engine polls through [`InputSource`]. Access is guarded by a critical
/// section, so the register can live in a `static`.
pub struct SharedButtons {
    levels: Mutex<Cell<u8>>,
}

impl SharedButtons {
    /// Create a register with every button released
    pub const fn new() -> Self {
        Self {
            levels: Mutex::new(Cell::new(0)),
        }
    }

    /// Latch the level of one button
    pub fn set(&self, button: Button, pressed: bool) {
        critical_section::with(|cs| {
            let levels = self.levels.borrow(cs);
            let value = if pressed {
                levels.get() | button.mask()
            } else {
                levels.get() & !button.mask()
            };
            levels.set(value);
        });
    }

    /// Release every button
    pub fn release_all(&self) {
        critical_section::with(|cs| self.levels.borrow(cs).set(0));
    }

    /// Packed levels, one bit per [`Button::mask`]
    pub fn levels(&self) -> u8 {
        critical_section::with(|cs| self.levels.borrow(cs).get())
    }
}

impl Default for SharedButtons {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for SharedButtons {
    fn is_pressed(&self, button: Button) -> bool {
        self.levels() & button.mask() != 0
    }
}
