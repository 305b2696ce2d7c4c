// crates/ztex-core/src/field/perlin.rs
//
// Classic improved gradient noise over a shuffled 256-entry permutation
// (doubled so corner hashes never need a wrap).

use crate::field::rng::SeededRng;

const TILE: usize = 256;
const MASK: i64 = (TILE as i64) - 1;

#[derive(Clone, Debug)]
pub struct Perlin {
    perm: Vec<usize>,
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Low 4 bits of the hash pick one of 12 gradient directions.
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let a = if h & 1 == 0 { u } else { -u };
    let b = if h & 2 == 0 { v } else { -v };
    a + b
}

/// Unit-cube cell and in-cell offset along one axis (truncation toward zero).
#[inline]
fn cell(p: f64) -> (usize, f64) {
    let whole = p.trunc();
    (((whole as i64) & MASK) as usize, p - whole)
}

impl Perlin {
    pub fn new(rng: &mut SeededRng) -> Self {
        let mut base: Vec<usize> = (0..TILE).collect();
        rng.shuffle(&mut base);
        let mut perm = Vec::with_capacity(TILE * 2);
        perm.extend_from_slice(&base);
        perm.extend_from_slice(&base);
        Self { perm }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(&mut SeededRng::new(seed))
    }

    pub fn permutation(&self) -> &[usize] {
        &self.perm[..TILE]
    }

    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let p = &self.perm;
        let (xi, x) = cell(x);
        let (yi, y) = cell(y);
        let (zi, z) = cell(z);

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let a = p[xi] + yi;
        let aa = p[a] + zi;
        let ab = p[a + 1] + zi;
        let b = p[xi + 1] + yi;
        let ba = p[b] + zi;
        let bb = p[b + 1] + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z)),
                lerp(u, grad(p[ab], x, y - 1.0, z), grad(p[bb], x - 1.0, y - 1.0, z)),
            ),
            lerp(
                v,
                lerp(u, grad(p[aa + 1], x, y, z - 1.0), grad(p[ba + 1], x - 1.0, y, z - 1.0)),
                lerp(
                    u,
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// Octave sum: each octave doubles frequency and scales amplitude by
    /// `persistence`; the result is divided by the total amplitude so it stays
    /// in the range of a single octave.
    pub fn fractal(&self, octaves: u32, persistence: f64, x: f64, y: f64, z: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut total = 0.0;
        let mut frequency = 1.0;
        for _ in 0..octaves {
            value += amplitude * self.noise(x * frequency, y * frequency, z * frequency);
            total += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }
        if total == 0.0 {
            0.0
        } else {
            value / total
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_at_lattice_points() {
        let p = Perlin::from_seed(5);
        for z in [0.0, 1.0, 7.0, 300.0] {
            assert!(p.noise(0.0, 0.0, z).abs() < 1e-12, "z={z}");
        }
    }

    #[test]
    fn bounded_and_continuous() {
        let p = Perlin::from_seed(11);
        let mut prev = p.noise(0.0, 0.0, 0.0);
        for i in 1..4000 {
            let z = i as f64 * 0.01;
            let n = p.noise(0.0, 0.0, z);
            assert!(n.abs() <= 1.0 + 1e-9);
            assert!((n - prev).abs() < 0.1, "jump at z={z}");
            prev = n;
        }
    }

    #[test]
    fn seed_changes_table_not_shape_rules() {
        let a = Perlin::from_seed(1);
        let b = Perlin::from_seed(1);
        let c = Perlin::from_seed(2);
        assert_eq!(a.permutation(), b.permutation());
        assert_ne!(a.permutation(), c.permutation());
        assert_eq!(a.fractal(2, 0.7, 0.0, 0.0, 1.37), b.fractal(2, 0.7, 0.0, 0.0, 1.37));
    }

    #[test]
    fn fractal_stays_in_single_octave_range() {
        let p = Perlin::from_seed(4);
        for i in 0..500 {
            let z = i as f64 * 0.137;
            assert!(p.fractal(3, 0.7, 0.0, 0.0, z).abs() <= 1.0 + 1e-9);
        }
    }
}
