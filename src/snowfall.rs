use rand::Rng;

use crate::config::SnowfallConfig;

const LEFT_PERCENT_RANGE: (f64, f64) = (-10.0, 110.0);
const BASE_DURATION_SECONDS: (f64, f64) = (4.0, 10.0);
const MAX_DELAY_SECONDS: f64 = 3.0;
const SMALL_RADIUS: f64 = 1.5;
const LARGE_RADIUS: f64 = 3.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlakeSize {
    Small,
    Regular,
    Large,
}

impl FlakeSize {
    pub fn from_radius(radius: f64) -> Self {
        if radius <= SMALL_RADIUS {
            Self::Small
        } else if radius >= LARGE_RADIUS {
            Self::Large
        } else {
            Self::Regular
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Small => "snowflake small",
            Self::Regular => "snowflake",
            Self::Large => "snowflake large",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Flake {
    pub id: u64,
    pub radius: f64,
    pub left_percent: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub size: FlakeSize,
}

impl Flake {
    pub fn style(&self) -> String {
        format!(
            "width: {diameter:.3}px; height: {diameter:.3}px; left: {left:.3}%; animation-duration: {duration:.3}s; animation-delay: {delay:.3}s;",
            diameter = self.radius * 2.0,
            left = self.left_percent,
            duration = self.duration_s,
            delay = self.delay_s,
        )
    }
}

fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnowPool {
    config: SnowfallConfig,
    flakes: Vec<Flake>,
    next_id: u64,
}

impl SnowPool {
    pub fn new(config: SnowfallConfig) -> Self {
        Self {
            flakes: Vec::with_capacity(config.quantity as usize),
            config,
            next_id: 0,
        }
    }

    pub fn target(&self) -> usize {
        self.config.quantity as usize
    }

    pub fn live(&self) -> usize {
        self.flakes.len()
    }

    pub fn flakes(&self) -> &[Flake] {
        &self.flakes
    }

    pub fn spawn_interval_ms(&self) -> u32 {
        self.config.spawn_interval_ms
    }

    fn sample<R: Rng>(&mut self, rng: &mut R) -> Flake {
        let radius = uniform(rng, self.config.min_radius, self.config.max_radius);
        let left_percent = uniform(rng, LEFT_PERCENT_RANGE.0, LEFT_PERCENT_RANGE.1);
        let duration_s = uniform(rng, BASE_DURATION_SECONDS.0, BASE_DURATION_SECONDS.1) / self.config.speed;
        let delay_s = uniform(rng, 0.0, MAX_DELAY_SECONDS);
        let id = self.next_id;
        self.next_id += 1;

        Flake {
            id,
            radius,
            left_percent,
            duration_s,
            delay_s,
            size: FlakeSize::from_radius(radius),
        }
    }

    /// Spawns flakes into every free slot and returns how many were added.
    pub fn replenish<R: Rng>(&mut self, rng: &mut R) -> usize {
        let missing = self.target().saturating_sub(self.live());
        for _ in 0..missing {
            let flake = self.sample(rng);
            self.flakes.push(flake);
        }
        missing
    }

    pub fn melt(&mut self, id: u64) -> bool {
        let Some(index) = self.flakes.iter().position(|flake| flake.id == id) else {
            return false;
        };
        self.flakes.remove(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn config(quantity: u32) -> SnowfallConfig {
        SnowfallConfig {
            quantity,
            ..SnowfallConfig::default()
        }
    }

    #[test]
    fn initial_fill_reaches_target() {
        let mut pool = SnowPool::new(config(300));
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(pool.replenish(&mut rng), 300);
        assert_eq!(pool.live(), 300);
        assert_eq!(pool.replenish(&mut rng), 0);
    }

    #[test]
    fn pool_never_exceeds_target_and_refills_in_one_interval() {
        let mut pool = SnowPool::new(config(40));
        let mut rng = SmallRng::seed_from_u64(8);
        pool.replenish(&mut rng);

        for round in 0..200u64 {
            let melted: Vec<u64> = pool
                .flakes()
                .iter()
                .filter(|flake| (flake.id + round) % 7 == 0)
                .map(|flake| flake.id)
                .collect();
            for id in melted {
                assert!(pool.melt(id));
            }
            assert!(pool.live() <= pool.target());

            pool.replenish(&mut rng);
            assert_eq!(pool.live(), pool.target());
        }
    }

    #[test]
    fn flake_parameters_stay_in_bounds() {
        let snow = SnowfallConfig {
            quantity: 500,
            speed: 0.5,
            min_radius: 0.2,
            max_radius: 5.0,
            spawn_interval_ms: 100,
        };
        let mut pool = SnowPool::new(snow);
        let mut rng = SmallRng::seed_from_u64(13);
        pool.replenish(&mut rng);

        for flake in pool.flakes() {
            assert!((0.2..5.0).contains(&flake.radius));
            assert!((-10.0..110.0).contains(&flake.left_percent));
            assert!((8.0..20.0).contains(&flake.duration_s));
            assert!((0.0..3.0).contains(&flake.delay_s));
            assert_eq!(flake.size, FlakeSize::from_radius(flake.radius));
        }
    }

    #[test]
    fn ids_are_unique_across_respawns() {
        let mut pool = SnowPool::new(config(3));
        let mut rng = SmallRng::seed_from_u64(2);
        pool.replenish(&mut rng);
        pool.melt(1);
        pool.replenish(&mut rng);

        let ids: Vec<u64> = pool.flakes().iter().map(|flake| flake.id).collect();
        assert_eq!(ids, vec![0, 2, 3]);
        assert!(!pool.melt(1));
    }

    #[test]
    fn zero_quantity_spawns_nothing() {
        let mut pool = SnowPool::new(config(0));
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(pool.replenish(&mut rng), 0);
        assert!(pool.flakes().is_empty());
    }

    #[test]
    fn size_classes_follow_radius_thresholds() {
        assert_eq!(FlakeSize::from_radius(1.5), FlakeSize::Small);
        assert_eq!(FlakeSize::from_radius(2.0), FlakeSize::Regular);
        assert_eq!(FlakeSize::from_radius(3.5), FlakeSize::Large);
        assert_eq!(FlakeSize::Large.class(), "snowflake large");
    }
}
