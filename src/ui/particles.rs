use std::time::Duration;

use rand::Rng;

use crate::{
    app::settings::MotionSetting,
    domain::weather::{Presentation, WeatherCategory},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Rain,
    Snow,
    Cloud,
    Star,
    Fog,
}

impl ParticleKind {
    /// Particles of this kind on screen at full motion.
    #[must_use]
    pub fn population(self) -> usize {
        match self {
            Self::Rain => 100,
            Self::Snow => 50,
            Self::Cloud => 18,
            Self::Star => 150,
            Self::Fog => 24,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub phase: f32,
    pub twinkle: f32,
}

impl Particle {
    #[must_use]
    pub fn glyph(&self) -> char {
        match self.kind {
            ParticleKind::Rain => '│',
            ParticleKind::Snow => '•',
            ParticleKind::Cloud => '░',
            ParticleKind::Fog => '·',
            ParticleKind::Star => match self.phase.sin() {
                s if s > 0.6 => '✦',
                s if s > -0.2 => '·',
                _ => ' ',
            },
        }
    }
}

/// Particle layers for a presentation; stars are drawn exactly when the
/// presentation asks for them.
#[must_use]
pub fn particle_layers(presentation: Presentation) -> Vec<ParticleKind> {
    let mut layers = Vec::with_capacity(2);
    if presentation.show_stars {
        layers.push(ParticleKind::Star);
    }
    match presentation.category {
        WeatherCategory::Rainy | WeatherCategory::Thunderstorm => layers.push(ParticleKind::Rain),
        WeatherCategory::Snowy => layers.push(ParticleKind::Snow),
        WeatherCategory::ClearDay | WeatherCategory::Cloudy | WeatherCategory::CloudyNight => {
            layers.push(ParticleKind::Cloud);
        }
        WeatherCategory::Misty => layers.push(ParticleKind::Fog),
        WeatherCategory::ClearNight | WeatherCategory::Unknown => {}
    }
    layers
}

#[derive(Debug)]
pub struct ParticleEngine {
    motion: MotionSetting,
    no_flash: bool,
    pub particles: Vec<Particle>,
    active: Option<Presentation>,
    flash_timer: f32,
}

impl ParticleEngine {
    pub fn new(motion: MotionSetting, no_flash: bool) -> Self {
        Self {
            motion,
            no_flash,
            particles: Vec::new(),
            active: None,
            flash_timer: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.particles.clear();
        self.active = None;
        self.flash_timer = 0.0;
    }

    pub fn flash_active(&self) -> bool {
        !self.no_flash && self.flash_timer > 0.0
    }

    fn scaled(&self, population: usize) -> usize {
        match self.motion {
            MotionSetting::Full => population,
            MotionSetting::Reduced => (population / 4).max(1),
            MotionSetting::Off => 0,
        }
    }

    pub fn update(&mut self, presentation: Presentation, dt: Duration) {
        if self.motion == MotionSetting::Off {
            self.particles.clear();
            return;
        }

        if self.active != Some(presentation) {
            self.seed(presentation);
        }

        let dt = dt.as_secs_f32().clamp(0.0, 0.25);
        let step = dt * 60.0;
        let mut rng = rand::rng();
        for p in &mut self.particles {
            p.x += p.vx * step;
            p.y += p.vy * step;
            p.phase += p.twinkle * dt;
            wrap(p, &mut rng);
        }

        if presentation.category == WeatherCategory::Thunderstorm && !self.no_flash {
            let chance = if self.motion == MotionSetting::Reduced {
                0.004
            } else {
                0.016
            };
            if rng.random_bool(chance) {
                self.flash_timer = 0.12;
            }
        }
        self.flash_timer = (self.flash_timer - dt).max(0.0);
    }

    fn seed(&mut self, presentation: Presentation) {
        self.particles.clear();
        self.active = Some(presentation);
        let mut rng = rand::rng();
        for kind in particle_layers(presentation) {
            let count = self.scaled(kind.population());
            self.particles
                .extend((0..count).map(|_| spawn_particle(kind, &mut rng)));
        }
    }
}

fn spawn_particle(kind: ParticleKind, rng: &mut impl Rng) -> Particle {
    let x = rng.random_range(0.0..1.0);
    let y = rng.random_range(0.0..1.0);
    let base = Particle {
        kind,
        x,
        y,
        vx: 0.0,
        vy: 0.0,
        phase: rng.random_range(0.0..std::f32::consts::TAU),
        twinkle: 0.0,
    };

    match kind {
        ParticleKind::Rain => Particle {
            vx: rng.random_range(-0.0005..0.0005),
            vy: rng.random_range(0.012..0.022),
            ..base
        },
        ParticleKind::Snow => Particle {
            vx: rng.random_range(-0.0015..0.0015),
            vy: rng.random_range(0.002..0.004),
            ..base
        },
        ParticleKind::Cloud => Particle {
            y: rng.random_range(0.0..0.7),
            vx: rng.random_range(0.0002..0.0005),
            ..base
        },
        ParticleKind::Star => Particle {
            twinkle: rng.random_range(1.2..3.2),
            ..base
        },
        ParticleKind::Fog => Particle {
            y: rng.random_range(0.3..1.0),
            vx: rng.random_range(0.0003..0.0012),
            vy: rng.random_range(-0.0003..0.0003),
            ..base
        },
    }
}

fn wrap(p: &mut Particle, rng: &mut impl Rng) {
    if p.y >= 1.0 {
        p.x = rng.random_range(0.0..1.0);
    }
    p.x = wrap_unit(p.x);
    p.y = wrap_unit(p.y);
}

fn wrap_unit(value: f32) -> f32 {
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negatives
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}
