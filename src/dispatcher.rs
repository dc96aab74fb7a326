use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::frame_scheduler::FrameScheduler;
use crate::input::{Button, InputSource};
use crate::mode::{FrameContext, ModeId, ModeSettings};
use crate::time::Timebase;
use crate::{ClockSource, DisplaySink};

/// Maximum number of button bindings
pub const MAX_BINDINGS: usize = 4;

/// Button table, polled in order
pub type Bindings = heapless::Vec<Binding, MAX_BINDINGS>;

/// Which mode sits on button B
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Flames,
    BerlinClock,
}

impl Default for Profile {
    fn default() -> Self {
        if cfg!(feature = "berlin-clock") {
            Self::BerlinClock
        } else {
            Self::Flames
        }
    }
}

/// What happens while a bound button is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run a mode until the cancel button is pressed
    Run(ModeId),
    /// Switch the display off
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub button: Button,
    pub action: Action,
}

/// Configuration for the dispatcher
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub bindings: Bindings,
    /// Stops the running mode
    pub cancel: Button,
    pub modes: ModeSettings,
}

impl DispatcherConfig {
    /// Default button table for a deployment profile
    pub fn for_profile(profile: Profile) -> Self {
        let b_mode = match profile {
            Profile::Flames => ModeId::Flames,
            Profile::BerlinClock => ModeId::BerlinClock,
        };

        let mut config = Self {
            bindings: Bindings::new(),
            cancel: Button::Y,
            modes: ModeSettings::default(),
        };
        let defaults = [
            (Button::X, Action::Run(ModeId::Pomodoro)),
            (Button::A, Action::Run(ModeId::Supercomputer)),
            (Button::B, Action::Run(b_mode)),
            (Button::Y, Action::Clear),
        ];
        for (button, action) in defaults {
            let bound = config.bind(button, action);
            debug_assert!(bound.is_ok(), "default binding table exceeds MAX_BINDINGS");
        }
        config
    }

    /// Bind a button, replacing its previous binding
    ///
    /// Returns the binding if the table is full
    pub fn bind(&mut self, button: Button, action: Action) -> Result<(), Binding> {
        let binding = Binding { button, action };
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.button == button) {
            *existing = binding;
            return Ok(());
        }
        self.bindings.push(binding)
    }

    /// Action bound to a button
    pub fn action(&self, button: Button) -> Option<Action> {
        self.bindings
            .iter()
            .find(|b| b.button == button)
            .map(|b| b.action)
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

/// Mode dispatcher - the main loop
///
/// Owns the peripherals and hands them to exactly one mode at a time.
pub struct Dispatcher<D, I, C, T> {
    // External dependencies and configuration
    display: D,
    input: I,
    clock: C,
    timebase: T,
    config: DispatcherConfig,

    // Internal state
    scheduler: FrameScheduler,
    launches: u64,
}

impl<D, I, C, T> Dispatcher<D, I, C, T>
where
    D: DisplaySink,
    I: InputSource,
    C: ClockSource,
    T: Timebase,
{
    pub fn new(display: D, input: I, clock: C, timebase: T, config: DispatcherConfig) -> Self {
        let scheduler = FrameScheduler::new(timebase.now());
        Self {
            display,
            input,
            clock,
            timebase,
            config,
            scheduler,
            launches: 0,
        }
    }

    /// Poll the buttons forever
    pub fn run(&mut self) -> ! {
        loop {
            self.run_cycle();
        }
    }

    /// Poll every binding once
    ///
    /// Each binding keeps control for as long as its button is held, so a
    /// held button restarts its mode after every cancel.
    pub fn run_cycle(&mut self) {
        for index in 0..self.config.bindings.len() {
            let binding = self.config.bindings[index];
            while self.input.is_pressed(binding.button) {
                match binding.action {
                    Action::Run(id) => {
                        self.run_mode(id);
                    }
                    Action::Clear => {
                        self.display.clear();
                        self.display.present();
                    }
                }
            }
        }
    }

    /// Run a mode from fresh state until the cancel button is held
    ///
    /// Returns the number of frames rendered.
    pub fn run_mode(&mut self, id: ModeId) -> u32 {
        let now = self.timebase.now();
        let mut mode = id.to_slot(self.next_seed(), &self.config.modes);
        self.scheduler.reset(now);

        #[cfg(feature = "esp32-log")]
        println!("dispatcher: entering {}", id.as_str());

        let mut frames: u32 = 0;
        while !self.input.is_pressed(self.config.cancel) {
            let mut ctx = FrameContext {
                display: &mut self.display,
                input: &self.input,
                clock: &mut self.clock,
                now: self.timebase.now(),
            };
            let frame_duration = mode.frame(&mut ctx);
            self.display.present();
            frames = frames.saturating_add(1);

            let result = self.scheduler.tick(self.timebase.now(), frame_duration);
            if result.sleep_duration > Duration::from_ticks(0) {
                self.timebase.sleep(result.sleep_duration);
            }
        }

        #[cfg(feature = "esp32-log")]
        println!("dispatcher: leaving {} after {} frames", id.as_str(), frames);

        frames
    }

    /// Seed for the next mode launch
    fn next_seed(&mut self) -> u64 {
        self.launches = self.launches.wrapping_add(1);
        self.timebase.now().as_ticks() ^ self.launches.wrapping_mul(0x9e37_79b9_7f4a_7c15)
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn timebase(&self) -> &T {
        &self.timebase
    }

    /// Release the peripherals
    pub fn into_parts(self) -> (D, I, C, T) {
        (self.display, self.input, self.clock, self.timebase)
    }
}
