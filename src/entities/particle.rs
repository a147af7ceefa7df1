use glam::Vec2;
use rand::Rng;

use crate::color::Rgba;

const EXPLOSION_PARTICLES: usize = 25;
const EXPLOSION_LIFETIME: f32 = 0.8;
const MUZZLE_PARTICLES: usize = 5;
const MUZZLE_LIFETIME: f32 = 0.2;
const MUZZLE_END_COLOR: Rgba = Rgba::new(100, 100, 0, 0);

/// Trail dots lose this fraction of alpha every tick
const TRAIL_DECAY: f32 = 0.9;
/// and disappear below this alpha
const TRAIL_MIN_ALPHA: u8 = 10;

/// Cosmetic particle. Never affects gameplay.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per reference frame
    pub velocity: Vec2,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub radius: f32,
    pub start_color: Rgba,
    pub end_color: Rgba,
    /// Current color, interpolated from start to end over the lifetime
    pub color: Rgba,
}

impl Particle {
    pub fn new(
        pos: Vec2,
        velocity: Vec2,
        lifetime: f32,
        radius: f32,
        start_color: Rgba,
        end_color: Rgba,
    ) -> Self {
        Self {
            pos,
            velocity,
            lifetime,
            max_lifetime: lifetime,
            radius,
            start_color,
            end_color,
            color: start_color,
        }
    }

    pub fn update(&mut self, dt: f32, frames: f32) {
        self.lifetime -= dt;
        self.pos += self.velocity * frames;

        let progress = if self.max_lifetime > 0.0 {
            1.0 - self.lifetime / self.max_lifetime
        } else {
            1.0
        };
        self.color = self.start_color.lerp(self.end_color, progress);
    }

    pub fn is_dead(&self) -> bool {
        self.lifetime <= 0.0
    }
}

/// A fading dot left behind by a bullet
#[derive(Debug, Clone, PartialEq)]
pub struct TrailDot {
    pub pos: Vec2,
    pub color: Rgba,
}

impl TrailDot {
    pub fn new(pos: Vec2, color: Rgba) -> Self {
        Self { pos, color }
    }

    pub fn update(&mut self) {
        self.color.a = (self.color.a as f32 * TRAIL_DECAY) as u8;
    }

    pub fn is_faded(&self) -> bool {
        self.color.a < TRAIL_MIN_ALPHA
    }
}

/// Creates an explosion burst at the given position, fading from `color`
pub fn create_explosion_particles<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vec2,
    color: Rgba,
) -> Vec<Particle> {
    (0..EXPLOSION_PARTICLES)
        .map(|_| {
            let radius = rng.random_range(2..=5) as f32;
            let angle = (rng.random_range(0..360) as f32).to_radians();
            let speed = rng.random_range(3..=6) as f32;
            Particle::new(
                center,
                Vec2::from_angle(angle) * speed,
                EXPLOSION_LIFETIME,
                radius,
                color,
                color.faded(),
            )
        })
        .collect()
}

/// Creates a short upward spray for a fired bullet
pub fn create_muzzle_flash<R: Rng + ?Sized>(
    rng: &mut R,
    position: Vec2,
    color: Rgba,
) -> Vec<Particle> {
    (0..MUZZLE_PARTICLES)
        .map(|_| {
            let angle = ((-90 + rng.random_range(-20..20)) as f32).to_radians();
            let speed = rng.random_range(1..=2) as f32;
            Particle::new(
                position,
                Vec2::from_angle(angle) * speed,
                MUZZLE_LIFETIME,
                2.0,
                color,
                MUZZLE_END_COLOR,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_update_position_and_color() {
        let start = Rgba::opaque(200, 100, 0);
        let mut particle = Particle::new(
            Vec2::new(10.0, 10.0),
            Vec2::new(2.0, -1.0),
            1.0,
            2.0,
            start,
            start.faded(),
        );
        particle.update(0.5, 1.0);
        assert_eq!(particle.pos, Vec2::new(12.0, 9.0));
        assert_eq!(particle.color, Rgba::new(150, 75, 0, 128));
        assert!(!particle.is_dead());

        particle.update(0.5, 1.0);
        assert!(particle.is_dead());
        assert_eq!(particle.color, start.faded());
    }

    #[test]
    fn test_trail_dot_decays() {
        let mut dot = TrailDot::new(Vec2::ZERO, Rgba::new(0, 255, 255, 100));
        dot.update();
        assert_eq!(dot.color.a, 90);

        let mut ticks = 1;
        while !dot.is_faded() {
            dot.update();
            ticks += 1;
        }
        assert!(dot.color.a < 10);
        assert!(ticks < 30);
    }

    #[test]
    fn test_create_explosion_particles() {
        let mut rng = Pcg32::seed_from_u64(7);
        let color = Rgba::opaque(255, 50, 50);
        let particles = create_explosion_particles(&mut rng, Vec2::new(10.0, 10.0), color);
        assert_eq!(particles.len(), 25);

        for particle in particles.iter() {
            assert_eq!(particle.pos, Vec2::new(10.0, 10.0));
            assert_eq!(particle.lifetime, 0.8);
            assert_eq!(particle.end_color, color.faded());
            let speed = particle.velocity.length();
            assert!((2.99..=6.01).contains(&speed));
            assert!((2.0..=5.0).contains(&particle.radius));
        }
    }

    #[test]
    fn test_muzzle_flash_sprays_upward() {
        let mut rng = Pcg32::seed_from_u64(3);
        let particles = create_muzzle_flash(&mut rng, Vec2::ZERO, crate::color::NEON_CYAN);
        assert_eq!(particles.len(), 5);
        assert!(particles.iter().all(|p| p.velocity.y < 0.0));
    }
}
