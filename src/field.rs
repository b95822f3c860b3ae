// Particle field simulation: a fixed-size population of drifting, fading,
// pointer-attracted dots over a rectangular surface. No DOM in here; the
// canvas glue in lib.rs feeds it sizes and pointer positions and reads the
// particle set back out for drawing.

use crate::particle::Particle;
use vecmath::{vec2_add, vec2_scale, vec2_sub, Vector2};
use wasm_bindgen::prelude::*;

// Distance from a surface edge, in pixels, over which particles fade out
pub const EDGE_FADE_BAND: f64 = 20.0;

#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct FieldOptions {
    pub(crate) quantity: u32,
    pub(crate) staticity: f64,
    pub(crate) ease: f64,
    pub(crate) size: f64,
    pub(crate) color: String,
    pub(crate) vx: f64,
    pub(crate) vy: f64,
}

#[wasm_bindgen]
impl FieldOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FieldOptions {
        FieldOptions {
            quantity: 100,
            staticity: 50.0,
            ease: 50.0,
            size: 0.4,
            color: "#8b5cf6".to_owned(),
            vx: 0.0,
            vy: 0.0,
        }
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    // Inverse pointer-attraction strength; higher values hold particles
    // closer to their resting positions
    pub fn set_staticity(&mut self, staticity: f64) {
        self.staticity = staticity;
    }

    // Attraction smoothing divisor; higher values mean laggier displacement
    pub fn set_ease(&mut self, ease: f64) {
        self.ease = ease;
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    pub fn set_color(&mut self, color: String) {
        self.color = color;
    }

    // Constant drift bias added to every particle's own velocity
    pub fn set_velocity_bias(&mut self, vx: f64, vy: f64) {
        self.vx = vx;
        self.vy = vy;
    }
}

impl Default for FieldOptions {
    fn default() -> FieldOptions {
        FieldOptions::new()
    }
}

pub struct ParticleField {
    width: f64,
    height: f64,
    options: FieldOptions,
    // Pointer offset from the surface center, owned per instance so two
    // fields on one page never share attraction state
    pointer: Vector2<f64>,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(options: FieldOptions) -> ParticleField {
        ParticleField {
            width: 0.0,
            height: 0.0,
            options,
            pointer: [0.0, 0.0],
            particles: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> Vector2<f64> {
        self.pointer
    }

    // A resize is a full reset: the population is rebuilt at the new size
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.respawn();
    }

    pub fn respawn(&mut self) {
        let mut rng = rand::thread_rng();
        let quantity = self.options.quantity as usize;
        let mut particles = Vec::with_capacity(quantity);
        for _ in 0..quantity {
            particles.push(Particle::spawn(
                &mut rng,
                self.width,
                self.height,
                self.options.size,
            ));
        }
        self.particles = particles;
    }

    // Pointer position relative to the surface center. Moves that land
    // outside the surface box keep the previous offset, so an off-surface
    // pointer never drags the field toward a stale corner.
    pub fn set_pointer_from_client(&mut self, client: Vector2<f64>, surface_origin: Vector2<f64>) {
        let x = client[0] - surface_origin[0] - self.width / 2.0;
        let y = client[1] - surface_origin[1] - self.height / 2.0;
        let inside =
            x < self.width / 2.0 && x > -self.width / 2.0 && y < self.height / 2.0 && y > -self.height / 2.0;
        if inside {
            self.pointer = [x, y];
        }
    }

    // One animation tick. The next population is computed from the current
    // one in a single pass and swapped in whole; particles that leave the
    // surface are replaced by fresh spawns in the same tick, so the
    // population size never dips.
    pub fn step(&mut self) {
        let mut rng = rand::thread_rng();
        let bias = [self.options.vx, self.options.vy];
        let staticity = self.options.staticity.max(1.0);
        let ease = self.options.ease.max(1.0);
        let mut next = Vec::with_capacity(self.particles.len());
        for particle in &self.particles {
            let mut p = *particle;

            let fade = round2(remap_value(
                self.closest_edge_distance(&p),
                0.0,
                EDGE_FADE_BAND,
                0.0,
                1.0,
            ));
            if fade > 1.0 {
                // Interior: ramp up toward the target opacity
                p.alpha = (p.alpha + Particle::FADE_IN_STEP).min(p.target_alpha);
            } else {
                // Near an edge: scale down for a soft vignette instead of a pop
                p.alpha = p.target_alpha * fade;
            }

            p.pos = vec2_add(p.pos, vec2_add(p.vel, bias));

            // Exponential smoothing toward the pointer-derived target; the
            // lag is proportional to `ease`
            let target = vec2_scale(self.pointer, p.magnetism / staticity);
            p.translate = vec2_add(
                p.translate,
                vec2_scale(vec2_sub(target, p.translate), 1.0 / ease),
            );

            if self.out_of_bounds(&p) {
                next.push(Particle::spawn(
                    &mut rng,
                    self.width,
                    self.height,
                    self.options.size,
                ));
            } else {
                next.push(p);
            }
        }
        self.particles = next;
    }

    fn closest_edge_distance(&self, p: &Particle) -> f64 {
        let x = p.pos[0] + p.translate[0];
        let y = p.pos[1] + p.translate[1];
        let edges = [
            x - p.size,
            self.width - x - p.size,
            y - p.size,
            self.height - y - p.size,
        ];
        edges.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    fn out_of_bounds(&self, p: &Particle) -> bool {
        let x = p.pos[0] + p.translate[0];
        let y = p.pos[1] + p.translate[1];
        x < -p.size || x > self.width + p.size || y < -p.size || y > self.height + p.size
    }
}

// Linear rescale from [start1, end1] to [start2, end2], clamped at zero on
// the low side only
pub fn remap_value(value: f64, start1: f64, end1: f64, start2: f64, end2: f64) -> f64 {
    let remapped = (value - start1) * (end2 - start2) / (end1 - start1) + start2;
    if remapped > 0.0 {
        remapped
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
