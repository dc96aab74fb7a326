//! Desktop preview app for matrix-composer
//!
//! Runs the real dispatcher on a worker thread and draws the 16x7 grid in a
//! window. The four device buttons are on screen; hold one with the mouse or
//! latch it with the checkbox next to it.
//!
//! Pass `--berlin-clock` to put the Berlin clock on button B.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use eframe::egui;
use matrix_composer::{
    Action, BlockingTimebase, Button, DateTime, Dispatcher, DispatcherConfig, DisplaySink,
    FrameBuffer, Profile, Rgb, SharedButtons, SoftClock,
    grid::{HEIGHT, WIDTH},
};

/// Button levels written by the UI and polled by the dispatcher
static BUTTONS: SharedButtons = SharedButtons::new();

/// Size of each cell in pixels
const CELL_SIZE: f32 = 28.0;

/// Gap between cells
const CELL_GAP: f32 = 4.0;

/// Display that publishes finished frames to the UI thread
struct SharedSink {
    frame: FrameBuffer,
    shared: Arc<Mutex<FrameBuffer>>,
}

impl DisplaySink for SharedSink {
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb) {
        self.frame.set_pixel(x, y, color);
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn present(&mut self) {
        if let Ok(mut shared) = self.shared.lock() {
            shared.clone_from(&self.frame);
        }
    }
}

fn main() -> eframe::Result<()> {
    let profile = if std::env::args().any(|arg| arg == "--berlin-clock") {
        Profile::BerlinClock
    } else {
        Profile::default()
    };
    let config = DispatcherConfig::for_profile(profile);

    let frame = Arc::new(Mutex::new(FrameBuffer::new()));
    let app = PreviewApp::new(Arc::clone(&frame), config.clone());

    let start = DateTime::PLACEHOLDER
        .with_time(12, 0, 0)
        .unwrap_or(DateTime::PLACEHOLDER);
    let mut dispatcher = Dispatcher::new(
        SharedSink {
            frame: FrameBuffer::new(),
            shared: frame,
        },
        &BUTTONS,
        SoftClock::new(start),
        BlockingTimebase,
        config,
    );
    let _worker: JoinHandle<()> = thread::spawn(move || dispatcher.run());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 420.0])
            .with_title("Matrix Composer Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "matrix-composer-preview",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

struct PreviewApp {
    /// Buffer the dispatcher renders into
    frame: Arc<Mutex<FrameBuffer>>,
    config: DispatcherConfig,
    /// Buttons kept pressed without the mouse
    latched: [bool; 4],
}

impl PreviewApp {
    fn new(frame: Arc<Mutex<FrameBuffer>>, config: DispatcherConfig) -> Self {
        Self {
            frame,
            config,
            latched: [false; 4],
        }
    }

    /// Label shown under a button
    fn describe(&self, button: Button) -> String {
        let mut parts = Vec::new();
        match self.config.action(button) {
            Some(Action::Run(id)) => parts.push(id.as_str().to_owned()),
            Some(Action::Clear) => parts.push("clear".to_owned()),
            None => {}
        }
        if button == self.config.cancel {
            parts.push("cancel".to_owned());
        }
        parts.join(" / ")
    }

    fn snapshot(&self) -> FrameBuffer {
        self.frame
            .lock()
            .map(|frame| frame.clone())
            .unwrap_or_default()
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame = self.snapshot();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            // === Buttons ===
            ui.horizontal(|ui| {
                for button in Button::ALL {
                    let index = button as usize;
                    ui.vertical(|ui| {
                        let response = ui.add(
                            egui::Button::new(button.as_str())
                                .selected(self.latched[index])
                                .min_size(egui::vec2(48.0, 32.0)),
                        );
                        ui.checkbox(&mut self.latched[index], "latch");
                        ui.label(self.describe(button));

                        let held = self.latched[index] || response.is_pointer_button_down_on();
                        BUTTONS.set(button, held);
                    });
                    ui.add_space(16.0);
                }
            });

            ui.add_space(16.0);

            // === Matrix ===
            let pitch = CELL_SIZE + CELL_GAP;
            let size = egui::vec2(f32::from(WIDTH) * pitch, f32::from(HEIGHT) * pitch);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 4.0, egui::Color32::from_gray(8));
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    let Some(pixel) = frame.pixel(x, y) else {
                        continue;
                    };
                    let rect = egui::Rect::from_min_size(
                        egui::pos2(
                            origin.x + f32::from(x) * pitch,
                            origin.y + f32::from(y) * pitch,
                        ),
                        egui::vec2(CELL_SIZE, CELL_SIZE),
                    );
                    let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                    painter.rect_filled(rect, 3.0, color);
                }
            }
        });
    }
}
