//! Value noise and the fractal heightmap.

use crate::rng::GameRng;

/// A lattice of random scalars with bilinear interpolation between the
/// four surrounding corners. Built on `GameRng` so the lattice itself is
/// part of the deterministic map format.
pub struct ValueNoise {
    width: usize,
    height: usize,
    lattice: Vec<f64>,
}

impl ValueNoise {
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let mut lattice = Vec::with_capacity((width + 1) * (height + 1));
        for _ in 0..(width + 1) * (height + 1) {
            lattice.push(rng.next_f64());
        }
        Self {
            width,
            height,
            lattice,
        }
    }

    fn at(&self, x: usize, y: usize) -> f64 {
        self.lattice[y * (self.width + 1) + x]
    }

    /// Samples at `(u, v)`; inputs are clamped into `[0, 1)` so lattice
    /// access never goes out of bounds.
    pub fn sample(&self, u: f64, v: f64) -> f64 {
        let u = u.clamp(0.0, 1.0 - f64::EPSILON);
        let v = v.clamp(0.0, 1.0 - f64::EPSILON);
        let fu = u * (self.width - 1) as f64;
        let fv = v * (self.height - 1) as f64;
        let x = fu as usize;
        let y = fv as usize;
        let fx = fu - x as f64;
        let fy = fv - y as f64;
        let a = self.at(x, y);
        let b = self.at(x + 1, y);
        let c = self.at(x, y + 1);
        let d = self.at(x + 1, y + 1);
        let top = a + (b - a) * fx;
        let bottom = c + (d - c) * fx;
        top + (bottom - top) * fy
    }
}

const OCTAVES: u32 = 5;
const LATTICE_SIZE: usize = 32;

/// 5-octave fBM over a single value-noise field, with an optional
/// equator-favoring latitude bias.
pub struct Heightmap {
    base: ValueNoise,
    world_width: f64,
    world_height: f64,
    latitude_bias: f64,
}

impl Heightmap {
    pub fn new(world_width: i32, world_height: i32, seed: u64, latitude_bias: f64) -> Self {
        Self {
            base: ValueNoise::new(LATTICE_SIZE, LATTICE_SIZE, seed),
            world_width: world_width as f64,
            world_height: world_height as f64,
            latitude_bias,
        }
    }

    pub fn at(&self, x: i32, y: i32) -> f64 {
        let nx = x as f64 / self.world_width;
        let ny = y as f64 / self.world_height;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut sum = 0.0;
        let mut norm = 0.0;
        for _ in 0..OCTAVES {
            sum += amplitude * self.base.sample((nx * frequency).fract(), (ny * frequency).fract());
            norm += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        let mut h = sum / norm;
        if self.latitude_bias > 0.0 {
            h *= 1.0 - self.latitude_bias * (2.0 * ny - 1.0).abs();
        }
        h
    }
}
