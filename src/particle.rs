// Simple particle struct to keep track of individual position, drift,
// pointer displacement, and fade state

use rand::Rng;

#[derive(Copy, Clone, Debug)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub translate: [f64; 2],
    pub size: f64,
    pub alpha: f64,
    pub target_alpha: f64,
    pub magnetism: f64,
}

impl Particle {
    pub const FADE_IN_STEP: f64 = 0.02;

    // Fresh particle at a random spot inside the surface: invisible at
    // first, fading toward a randomized target opacity, with a slow random
    // drift and its own sensitivity to the pointer.
    pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64, base_size: f64) -> Particle {
        let pos = [
            (rng.gen::<f64>() * width).floor(),
            (rng.gen::<f64>() * height).floor(),
        ];
        let size = base_size + rng.gen::<f64>() * 2.0;
        let target_alpha = ((rng.gen::<f64>() * 0.6 + 0.1) * 10.0).round() / 10.0;
        let vel = [
            (rng.gen::<f64>() - 0.5) * 0.1,
            (rng.gen::<f64>() - 0.5) * 0.1,
        ];
        let magnetism = 0.1 + rng.gen::<f64>() * 4.0;
        Particle {
            pos,
            vel,
            translate: [0.0, 0.0],
            size,
            alpha: 0.0,
            target_alpha,
            magnetism,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_within_surface_bounds() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, 640.0, 480.0, 0.4);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 640.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 480.0);
        }
    }

    #[test]
    fn spawns_invisible_with_target_alpha_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, 100.0, 100.0, 0.4);
            assert_eq!(p.alpha, 0.0);
            assert!(p.target_alpha >= 0.1 && p.target_alpha <= 0.7);
        }
    }

    #[test]
    fn spawn_randomizes_size_and_drift_within_limits() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, 100.0, 100.0, 0.4);
            assert!(p.size >= 0.4 && p.size < 2.4);
            assert!(p.vel[0].abs() <= 0.05 && p.vel[1].abs() <= 0.05);
            assert!(p.magnetism >= 0.1 && p.magnetism <= 4.1);
            assert_eq!(p.translate, [0.0, 0.0]);
        }
    }
}
