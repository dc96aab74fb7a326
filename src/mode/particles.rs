//! Particle decay field ("supercomputer")
//!
//! Every cell is a particle that flashes, fades and stays dark until its
//! lifetime runs out, then starts over with a fresh random lifetime.
//! Initial ages are random so the cells never pulse in lockstep.

use embassy_time::Duration;

use super::{FrameContext, Mode};
use crate::{
    ClockSource, DisplaySink, InputSource,
    color::{self, Rgb, rgb_from_u32},
    grid::{self, CELLS},
};

const BASE_COLOR: Rgb = rgb_from_u32(0xE69600);

/// Age added per frame, independent of wall time
pub const AGE_STEP: f32 = 0.025;

const MIN_LIFETIME: f32 = 1.0;
const LIFETIME_JITTER: f32 = 0.1;

/// End of the full-brightness band, as a fraction of the lifetime
const SOLID_UNTIL: f32 = 0.3;
/// End of the fading band, as a fraction of the lifetime
const FADE_UNTIL: f32 = 0.5;
const FADE_GAIN: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub age: f32,
    pub lifetime: f32,
}

impl Particle {
    /// Color of the particle for its current age
    ///
    /// Early in the fade band the factor exceeds 1.0, the resulting
    /// channels are clamped.
    pub fn color(&self, base: Rgb) -> Rgb {
        if self.age < self.lifetime * SOLID_UNTIL {
            base
        } else if self.age < self.lifetime * FADE_UNTIL {
            let decay = (self.lifetime * FADE_UNTIL - self.age) * FADE_GAIN;
            color::scale(base, decay)
        } else {
            color::OFF
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: [Particle; CELLS],
    color: Rgb,
    rng: fastrand::Rng,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut particles = [Particle {
            age: 0.0,
            lifetime: MIN_LIFETIME,
        }; CELLS];
        for particle in &mut particles {
            particle.lifetime = Self::draw_lifetime(&mut rng);
            particle.age = rng.f32() * particle.lifetime;
        }
        Self {
            particles,
            color: BASE_COLOR,
            rng,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    fn draw_lifetime(rng: &mut fastrand::Rng) -> f32 {
        MIN_LIFETIME + rng.f32() * LIFETIME_JITTER
    }

    /// Particles in row-major order
    pub fn particles(&self) -> &[Particle; CELLS] {
        &self.particles
    }

    /// Age every particle by one step, restarting the expired ones
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            if particle.age >= particle.lifetime {
                particle.age = 0.0;
                particle.lifetime = Self::draw_lifetime(&mut self.rng);
            }
            particle.age += AGE_STEP;
        }
    }

    pub fn render<D: DisplaySink>(&self, display: &mut D) {
        for (index, particle) in self.particles.iter().enumerate() {
            let (x, y) = grid::coords_of(index);
            display.set_pixel(x, y, particle.color(self.color));
        }
    }
}

impl Mode for ParticleField {
    fn frame<D: DisplaySink, I: InputSource, C: ClockSource>(
        &mut self,
        ctx: &mut FrameContext<'_, D, I, C>,
    ) -> Duration {
        self.update();
        self.render(ctx.display);
        // Frame rate is bound by the render cost alone
        Duration::from_ticks(0)
    }
}
