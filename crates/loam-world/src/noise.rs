use fastnoise_lite::{
    CellularDistanceFunction, CellularReturnType, FastNoiseLite, FractalType, NoiseType,
};

use crate::rules::{CellularDistance, CellularReturn, FractalKind, Kernel, NoiseSpec};

/// FNV-1a 64-bit over the key bytes. Fixed constants keep layer seeds
/// stable across runs and toolchains.
pub fn stable_hash(key: &str) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in key.as_bytes() {
        h ^= *b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}

/// Kernel seed for one layer: `(seed_base + stable_hash(key)) mod 2^31`.
/// Layers sharing a key sample the same field on purpose (river + banks).
pub fn layer_seed(seed_base: u64, key: &str) -> i32 {
    (seed_base.wrapping_add(stable_hash(key)) % (1u64 << 31)) as i32
}

/// Seed for a layer's modulation field, offset from the primary key.
pub fn modulation_seed(seed_base: u64, key: &str) -> i32 {
    let mut mod_key = String::with_capacity(key.len() + 4);
    mod_key.push_str(key);
    mod_key.push_str("_mod");
    layer_seed(seed_base, &mod_key)
}

pub fn build_noise(spec: &NoiseSpec, seed: i32) -> FastNoiseLite {
    let mut n = FastNoiseLite::with_seed(seed);
    n.set_noise_type(Some(match spec.kernel {
        Kernel::OpenSimplex2 => NoiseType::OpenSimplex2,
        Kernel::OpenSimplex2S => NoiseType::OpenSimplex2S,
        Kernel::Perlin => NoiseType::Perlin,
        Kernel::Value => NoiseType::Value,
        Kernel::Cellular => NoiseType::Cellular,
    }));
    n.set_frequency(Some(spec.frequency));
    n.set_fractal_octaves(Some(spec.octaves));
    n.set_fractal_type(Some(match spec.fractal {
        FractalKind::None => FractalType::None,
        FractalKind::Fbm => FractalType::FBm,
        FractalKind::Ridged => FractalType::Ridged,
        FractalKind::PingPong => FractalType::PingPong,
    }));
    if let Some(lacunarity) = spec.lacunarity {
        n.set_fractal_lacunarity(Some(lacunarity));
    }
    if let Some(dist) = spec.cellular_distance {
        n.set_cellular_distance_function(Some(match dist {
            CellularDistance::Euclidean => CellularDistanceFunction::Euclidean,
            CellularDistance::EuclideanSq => CellularDistanceFunction::EuclideanSq,
            CellularDistance::Manhattan => CellularDistanceFunction::Manhattan,
            CellularDistance::Hybrid => CellularDistanceFunction::Hybrid,
        }));
    }
    if let Some(ret) = spec.cellular_return {
        n.set_cellular_return_type(Some(match ret {
            CellularReturn::CellValue => CellularReturnType::CellValue,
            CellularReturn::Distance => CellularReturnType::Distance,
            CellularReturn::Distance2 => CellularReturnType::Distance2,
        }));
    }
    if let Some(jitter) = spec.cellular_jitter {
        n.set_cellular_jitter(Some(jitter));
    }
    n
}

/// Noise sample normalized into `[0, 1]`.
#[inline]
pub fn sample01(n: &FastNoiseLite, x: i32, y: i32) -> f32 {
    ((n.get_noise_2d(x as f32, y as f32) + 1.0) * 0.5).clamp(0.0, 1.0)
}
