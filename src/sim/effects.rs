//! Transient visual effects: screen flash, particle explosions, shockwaves
//!
//! Effects never influence gameplay. Each is created by a trigger, aged once
//! per tick, and dropped once fully faded or expanded.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Explosion particle colours (orange, yellow, red, white-hot)
pub const EXPLOSION_PALETTE: [[f32; 3]; 4] = [
    [1.0, 0.55, 0.1],
    [1.0, 0.85, 0.2],
    [0.95, 0.2, 0.1],
    [1.0, 0.95, 0.85],
];

/// Full-screen flash
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub active: bool,
    pub opacity: f32,
    /// Opacity lost per tick
    pub decay: f32,
}

impl Flash {
    pub fn trigger(&mut self, opacity: f32, decay: f32) {
        self.active = true;
        self.opacity = opacity;
        self.decay = decay;
    }

    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.opacity -= self.decay;
        if self.opacity <= 0.0 {
            self.opacity = 0.0;
            self.active = false;
        }
    }
}

/// A single explosion particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// 1 when spawned, gone at or below 0
    pub alpha: f32,
    /// Alpha lost per tick
    pub decay: f32,
    pub color: [f32; 3],
}

impl Particle {
    /// Move one tick and fade. Returns false once fully faded.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.alpha -= self.decay;
        self.alpha > 0.0
    }
}

/// A burst of particles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub particles: Vec<Particle>,
}

impl Explosion {
    /// Scatter `count` particles from `origin` in random directions
    pub fn new<R: Rng>(rng: &mut R, origin: Vec2, count: usize) -> Self {
        let particles = (0..count)
            .map(|_| {
                let angle = rng.random_range(0.0..TAU);
                let speed = rng.random_range(1.0..4.0);
                Particle {
                    pos: origin,
                    vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                    radius: rng.random_range(1.5..3.5),
                    alpha: 1.0,
                    decay: rng.random_range(0.015..0.035),
                    color: EXPLOSION_PALETTE[rng.random_range(0..EXPLOSION_PALETTE.len())],
                }
            })
            .collect();
        Self { particles }
    }

    /// Age every particle, dropping the faded ones
    pub fn update(&mut self) {
        self.particles.retain_mut(|p| p.update());
    }

    /// Done once every particle has faded
    pub fn is_done(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Expanding ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shockwave {
    pub origin: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub max_radius: f32,
    /// Radius gained per tick
    pub growth: f32,
    /// Opacity lost per tick
    pub fade: f32,
}

impl Shockwave {
    pub fn new(origin: Vec2, max_radius: f32, growth: f32, fade: f32) -> Self {
        Self {
            origin,
            radius: 0.0,
            opacity: 1.0,
            max_radius,
            growth,
            fade,
        }
    }

    /// Grow and fade. Returns false once either bound is reached.
    pub fn update(&mut self) -> bool {
        self.radius += self.growth;
        self.opacity -= self.fade;
        self.radius < self.max_radius && self.opacity > 0.0
    }
}

/// All live effects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    pub flash: Flash,
    pub explosions: Vec<Explosion>,
    pub shockwaves: Vec<Shockwave>,
}

impl Effects {
    /// Age everything one tick and drop finished effects
    pub fn update(&mut self) {
        self.flash.update();
        for explosion in &mut self.explosions {
            explosion.update();
        }
        self.explosions.retain(|e| !e.is_done());
        self.shockwaves.retain_mut(|s| s.update());
    }

    pub fn is_idle(&self) -> bool {
        !self.flash.active && self.explosions.is_empty() && self.shockwaves.is_empty()
    }

    pub fn particle_count(&self) -> usize {
        self.explosions.iter().map(|e| e.particles.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(decay: f32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            radius: 2.0,
            alpha: 1.0,
            decay,
            color: EXPLOSION_PALETTE[0],
        }
    }

    #[test]
    fn test_flash_decays_then_deactivates() {
        let mut flash = Flash::default();
        flash.trigger(0.5, 0.2);
        flash.update();
        flash.update();
        assert!(flash.active);
        assert!((flash.opacity - 0.1).abs() < 1e-6);
        flash.update();
        assert!(!flash.active);
        assert_eq!(flash.opacity, 0.0);
    }

    #[test]
    fn test_explosion_done_exactly_when_last_particle_fades() {
        // Decays chosen so alpha hits exactly 0.0 in binary floating point
        let mut explosion = Explosion {
            particles: vec![particle(0.5), particle(0.25)],
        };
        assert!(!explosion.is_done());

        // Tick 1: alphas 0.5, 0.75
        explosion.update();
        assert!(!explosion.is_done());
        // Tick 2: 0.0 (gone), 0.5
        explosion.update();
        assert_eq!(explosion.particles.len(), 1);
        assert!(!explosion.is_done());
        // Tick 3: 0.25
        explosion.update();
        assert!(!explosion.is_done());
        // Tick 4: 0.0
        explosion.update();
        assert!(explosion.is_done());
    }

    #[test]
    fn test_particles_move_ballistically() {
        let mut p = particle(0.1);
        p.update();
        p.update();
        assert_eq!(p.pos, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_new_explosion_particles() {
        let mut rng = Pcg32::seed_from_u64(5);
        let explosion = Explosion::new(&mut rng, Vec2::new(10.0, 10.0), 16);
        assert_eq!(explosion.particles.len(), 16);
        for p in &explosion.particles {
            assert_eq!(p.pos, Vec2::new(10.0, 10.0));
            assert_eq!(p.alpha, 1.0);
            assert!(p.decay > 0.0);
        }
    }

    #[test]
    fn test_empty_explosion_is_done() {
        let mut rng = Pcg32::seed_from_u64(5);
        assert!(Explosion::new(&mut rng, Vec2::ZERO, 0).is_done());
    }

    #[test]
    fn test_shockwave_stops_at_max_radius() {
        let mut wave = Shockwave::new(Vec2::ZERO, 20.0, 10.0, 0.01);
        assert!(wave.update());
        assert!(!wave.update());
    }

    #[test]
    fn test_shockwave_stops_when_faded() {
        let mut wave = Shockwave::new(Vec2::ZERO, 1000.0, 1.0, 0.5);
        assert!(wave.update());
        assert!(!wave.update());
    }

    #[test]
    fn test_effects_cleanup() {
        let mut effects = Effects::default();
        effects.flash.trigger(0.1, 0.1);
        effects.shockwaves.push(Shockwave::new(Vec2::ZERO, 5.0, 10.0, 0.1));
        effects.explosions.push(Explosion {
            particles: vec![particle(1.0)],
        });
        assert!(!effects.is_idle());
        assert_eq!(effects.particle_count(), 1);

        effects.update();
        assert!(effects.is_idle());
    }
}
