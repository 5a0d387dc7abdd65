//! Seeded value noise for terrain generation
//!
//! Layered value noise with cosine interpolation over a fixed random
//! table, the same shape of noise the sketches were tuned against.
//! Output lies in [0, 1).

use rand::Rng;
use std::f32::consts::PI;

const TABLE_BITS: usize = 12;
const TABLE_SIZE: usize = 1 << TABLE_BITS;
const TABLE_MASK: i64 = (TABLE_SIZE - 1) as i64;
const Y_WRAP_SHIFT: u32 = 4;

/// Coherent noise generator
#[derive(Debug, Clone)]
pub struct ValueNoise {
    table: Vec<f32>,
    octaves: u32,
    falloff: f32,
}

impl ValueNoise {
    /// Build a noise table from the given RNG (4 octaves, 0.5 falloff)
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let table = (0..TABLE_SIZE).map(|_| rng.random::<f32>()).collect();
        Self {
            table,
            octaves: 4,
            falloff: 0.5,
        }
    }

    #[inline]
    fn at(&self, index: i64) -> f32 {
        self.table[(index & TABLE_MASK) as usize]
    }

    /// One-dimensional sample
    pub fn sample1(&self, x: f32) -> f32 {
        self.sample2(x, 0.0)
    }

    /// Two-dimensional sample
    pub fn sample2(&self, x: f32, y: f32) -> f32 {
        let x = x.abs();
        let y = y.abs();

        let mut xi = x.floor() as i64;
        let mut yi = y.floor() as i64;
        let mut xf = x - x.floor();
        let mut yf = y - y.floor();

        let mut result = 0.0;
        let mut amp = 0.5;

        for _ in 0..self.octaves {
            let base = xi + (yi << Y_WRAP_SHIFT);
            let rxf = scaled_cosine(xf);
            let ryf = scaled_cosine(yf);

            let row = 1 << Y_WRAP_SHIFT;
            let mut n1 = self.at(base);
            n1 += rxf * (self.at(base + 1) - n1);
            let mut n2 = self.at(base + row);
            n2 += rxf * (self.at(base + row + 1) - n2);
            n1 += ryf * (n2 - n1);

            result += n1 * amp;
            amp *= self.falloff;

            xi <<= 1;
            xf *= 2.0;
            yi <<= 1;
            yf *= 2.0;
            if xf >= 1.0 {
                xi += 1;
                xf -= 1.0;
            }
            if yf >= 1.0 {
                yi += 1;
                yf -= 1.0;
            }
        }

        result
    }
}

#[inline]
fn scaled_cosine(t: f32) -> f32 {
    0.5 * (1.0 - (t * PI).cos())
}
