use rand::Rng;

pub const PARTICLE_COUNT: usize = 50;
pub const PARTICLE_LAYER_OPACITY: f64 = 0.3;

const MAX_SPEED: f64 = 0.25;
const SIZE_RANGE: (f64, f64) = (1.0, 3.0);
const OPACITY_RANGE: (f64, f64) = (0.2, 0.7);
const PARTICLE_RGB: &str = "96, 165, 250";

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn fill_style(&self) -> String {
        format!("rgba({PARTICLE_RGB}, {:.3})", self.opacity)
    }
}

fn sample<R: Rng>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

// Moves one axis and bounces off either wall, ending inside `[0, limit]`.
fn bounce(position: &mut f64, velocity: &mut f64, limit: f64) {
    *position += *velocity;
    if *position < 0.0 || *position > limit {
        *velocity = -*velocity;
        *position = position.clamp(0.0, limit.max(0.0));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng>(count: usize, width: f64, height: f64, rng: &mut R) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let particles = (0..count)
            .map(|_| Particle {
                x: sample(rng, (0.0, width)),
                y: sample(rng, (0.0, height)),
                vx: sample(rng, (-MAX_SPEED, MAX_SPEED)),
                vy: sample(rng, (-MAX_SPEED, MAX_SPEED)),
                size: sample(rng, SIZE_RANGE),
                opacity: sample(rng, OPACITY_RANGE),
            })
            .collect();
        Self {
            width,
            height,
            particles,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        for particle in &mut self.particles {
            particle.x = particle.x.clamp(0.0, self.width);
            particle.y = particle.y.clamp(0.0, self.height);
        }
    }

    pub fn step(&mut self) {
        for particle in &mut self.particles {
            bounce(&mut particle.x, &mut particle.vx, self.width);
            bounce(&mut particle.y, &mut particle.vy, self.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn new_particles_start_inside_with_bounded_traits() {
        let mut rng = SmallRng::seed_from_u64(3);
        let field = ParticleField::new(PARTICLE_COUNT, 400.0, 300.0, &mut rng);

        assert_eq!(field.particles().len(), 50);
        for particle in field.particles() {
            assert!((0.0..400.0).contains(&particle.x));
            assert!((0.0..300.0).contains(&particle.y));
            assert!(particle.vx.abs() <= MAX_SPEED && particle.vy.abs() <= MAX_SPEED);
            assert!((1.0..3.0).contains(&particle.size));
            assert!((0.2..0.7).contains(&particle.opacity));
        }
    }

    #[test]
    fn particles_bounce_and_never_leave_the_canvas() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut field = ParticleField::new(PARTICLE_COUNT, 120.0, 80.0, &mut rng);

        for _ in 0..5_000 {
            field.step();
            for particle in field.particles() {
                assert!((0.0..=120.0).contains(&particle.x));
                assert!((0.0..=80.0).contains(&particle.y));
            }
        }
    }

    #[test]
    fn wall_hit_reverses_velocity() {
        let mut field = ParticleField {
            width: 10.0,
            height: 10.0,
            particles: vec![Particle {
                x: 9.9,
                y: 5.0,
                vx: 0.25,
                vy: 0.0,
                size: 1.0,
                opacity: 0.5,
            }],
        };
        field.step();

        let particle = &field.particles()[0];
        assert_eq!(particle.x, 10.0);
        assert_eq!(particle.vx, -0.25);
    }

    #[test]
    fn shrinking_the_canvas_pulls_particles_in() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut field = ParticleField::new(20, 500.0, 500.0, &mut rng);
        field.resize(50.0, 40.0);

        assert_eq!((field.width(), field.height()), (50.0, 40.0));
        assert!(field.particles().iter().all(|p| p.x <= 50.0 && p.y <= 40.0));
    }

    #[test]
    fn zero_sized_canvas_keeps_particles_at_origin() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut field = ParticleField::new(4, 0.0, -5.0, &mut rng);
        field.step();

        assert!(field.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));
    }

    #[test]
    fn fill_style_uses_particle_opacity() {
        let particle = Particle {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            size: 2.0,
            opacity: 0.35,
        };
        assert_eq!(particle.fill_style(), "rgba(96, 165, 250, 0.350)");
    }
}
