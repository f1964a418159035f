use rand::Rng;

use crate::grid::TileGrid;
use crate::noise::{build_noise, layer_seed, modulation_seed, sample01};
use crate::rules::{Profile, TileLayer};

/// Composite the ordered tile layers into a fresh grid.
///
/// Layers apply in ascending priority (stable on ties), so higher
/// priority numbers land later and win contested cells. Each layer's
/// kernel is seeded from `seed_base` and its seed key; the per-cell
/// modulation draws come from `rng` in scan order.
pub fn compose(
    width: usize,
    height: usize,
    layers: &[TileLayer],
    profile: &Profile,
    seed_base: u64,
    rng: &mut impl Rng,
) -> TileGrid {
    let mut grid = TileGrid::new(width, height, profile.fill);

    let mut order: Vec<&TileLayer> = layers.iter().collect();
    order.sort_by_key(|l| l.priority);

    for layer in order {
        let noise = build_noise(&layer.noise, layer_seed(seed_base, &layer.seed_key));
        let modulation = layer.modulation.as_ref().map(|m| {
            (
                build_noise(&m.noise, modulation_seed(seed_base, &layer.seed_key)),
                m.threshold_min,
                m.threshold_max,
            )
        });

        let mut placed = 0usize;
        for y in 0..height {
            for x in 0..width {
                let value = sample01(&noise, x as i32, y as i32);
                let place = match &modulation {
                    None => value > layer.threshold,
                    Some((mod_noise, lo, hi)) => {
                        if value <= layer.threshold {
                            false
                        } else {
                            let m = sample01(mod_noise, x as i32, y as i32);
                            if m > *hi {
                                true
                            } else if m > *lo {
                                // Soft ramp between the two thresholds.
                                rng.gen_range(0.0..1.0) < (m - lo) / (hi - lo)
                            } else {
                                false
                            }
                        }
                    }
                };
                if place {
                    let current = grid.get(x, y);
                    if !layer.keep.contains(&current)
                        && (layer.overwrite || current == profile.space)
                    {
                        grid.set(x, y, layer.tile);
                        placed += 1;
                    }
                }
            }
        }
        log::info!("layer {}: {} tiles placed", layer.label, placed);
    }

    grid
}
