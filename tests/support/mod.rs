#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use matrix_composer::{Button, ClockSource, DateTime, Duration, InputSource, Instant, Timebase};

/// Timebase that only moves when slept on
///
/// Clones share the same time, so a clock can follow the dispatcher.
#[derive(Debug, Default, Clone)]
pub(crate) struct ManualTimebase {
    now_ms: Rc<Cell<u64>>,
    pub(crate) slept: Vec<Duration>,
}

impl ManualTimebase {
    pub(crate) fn starting_at(ms: u64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(ms)),
            slept: Vec::new(),
        }
    }

    pub(crate) fn advance(&self, duration: Duration) {
        self.now_ms.set(self.now_ms.get() + duration.as_millis());
    }

    pub(crate) fn total_slept(&self) -> Duration {
        self.slept
            .iter()
            .fold(Duration::from_ticks(0), |acc, d| acc + *d)
    }
}

impl Timebase for ManualTimebase {
    fn now(&self) -> Instant {
        Instant::from_millis(self.now_ms.get())
    }

    fn sleep(&mut self, duration: Duration) {
        self.slept.push(duration);
        self.advance(duration);
    }
}

/// Button levels decided by a closure
///
/// The closure gets the polled button and how many times each button has
/// been polled before this call.
pub(crate) struct ScriptedInput<F> {
    polls: RefCell<[usize; 4]>,
    script: F,
}

impl<F: Fn(Button, &[usize; 4]) -> bool> ScriptedInput<F> {
    pub(crate) fn new(script: F) -> Self {
        Self {
            polls: RefCell::new([0; 4]),
            script,
        }
    }

    pub(crate) fn polls(&self, button: Button) -> usize {
        self.polls.borrow()[button as usize]
    }
}

impl<F: Fn(Button, &[usize; 4]) -> bool> InputSource for ScriptedInput<F> {
    fn is_pressed(&self, button: Button) -> bool {
        let snapshot = *self.polls.borrow();
        self.polls.borrow_mut()[button as usize] += 1;
        (self.script)(button, &snapshot)
    }
}

/// Input with levels set directly by the test
#[derive(Debug, Default)]
pub(crate) struct Levels {
    held: Cell<u8>,
}

impl Levels {
    pub(crate) fn hold(&self, button: Button) {
        self.held.set(self.held.get() | button.mask());
    }

    pub(crate) fn release(&self, button: Button) {
        self.held.set(self.held.get() & !button.mask());
    }
}

impl InputSource for Levels {
    fn is_pressed(&self, button: Button) -> bool {
        self.held.get() & button.mask() != 0
    }
}

/// Clock that returns a fixed time and records writes
#[derive(Debug, Default)]
pub(crate) struct FixedClock {
    pub(crate) current: DateTime,
    pub(crate) writes: Vec<DateTime>,
}

impl FixedClock {
    pub(crate) fn at(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            current: DateTime {
                year: 2024,
                month: 6,
                day: 1,
                weekday: 5,
                hour,
                minute,
                second,
            },
            writes: Vec::new(),
        }
    }
}

impl ClockSource for FixedClock {
    fn read(&mut self) -> DateTime {
        self.current
    }

    fn write(&mut self, value: DateTime) {
        self.writes.push(value);
        self.current = value;
    }
}
