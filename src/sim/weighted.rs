//! Weighted hindrance selection
//!
//! Cumulative walk over the table in authored order. A draw selects the first
//! entry whose running sum is `>=` the draw, so a draw landing exactly on an
//! entry's upper boundary still selects that entry.

use rand::Rng;

use crate::hindrance::HindranceKind;
use crate::tuning::SpawnChance;

/// Sum of all weights
pub fn total_weight(chances: &[SpawnChance]) -> f32 {
    chances.iter().map(|c| c.weight).sum()
}

/// Resolve a draw in `[0, total]` to a kind
pub fn pick_weighted(chances: &[SpawnChance], draw: f32) -> Option<HindranceKind> {
    if total_weight(chances) <= 0.0 {
        return None;
    }

    let mut cumulative = 0.0;
    for info in chances {
        cumulative += info.weight;
        if draw <= cumulative {
            return Some(info.kind);
        }
    }

    // Float residue: draw beat every partial sum
    None
}

/// Draw uniformly in `[0, total]` and resolve it
pub fn roll_weighted<R: Rng + ?Sized>(chances: &[SpawnChance], rng: &mut R) -> Option<HindranceKind> {
    let total = total_weight(chances);
    if total <= 0.0 {
        return None;
    }
    let draw = rng.random_range(0.0..=total);
    pick_weighted(chances, draw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use HindranceKind::*;

    fn table() -> Vec<SpawnChance> {
        vec![
            SpawnChance::new(Blowfish, 2.0),
            SpawnChance::new(Seahorse, 0.0),
            SpawnChance::new(Octopus, 8.0),
        ]
    }

    #[test]
    fn test_boundary_draw_selects_first_entry() {
        assert_eq!(pick_weighted(&table(), 2.0), Some(Blowfish));
        assert_eq!(pick_weighted(&table(), 0.0), Some(Blowfish));
    }

    #[test]
    fn test_zero_weight_entry_never_wins_past_its_boundary() {
        assert_eq!(pick_weighted(&table(), 2.0001), Some(Octopus));
        assert_eq!(pick_weighted(&table(), 10.0), Some(Octopus));
    }

    #[test]
    fn test_zero_total_selects_nothing() {
        let zeros = vec![SpawnChance::new(Blowfish, 0.0), SpawnChance::new(Fisher, 0.0)];
        for draw in [0.0, 0.5, 1.0] {
            assert_eq!(pick_weighted(&zeros, draw), None);
        }
        assert_eq!(pick_weighted(&[], 0.0), None);
    }

    #[test]
    fn test_draw_beyond_total_selects_nothing() {
        assert_eq!(pick_weighted(&table(), 10.5), None);
    }

    #[test]
    fn test_roll_single_entry_always_selected() {
        let mut rng = Pcg32::seed_from_u64(7);
        let only = vec![SpawnChance::new(Fisher, 0.3)];
        for _ in 0..100 {
            assert_eq!(roll_weighted(&only, &mut rng), Some(Fisher));
        }
    }

    #[test]
    fn test_roll_distribution_follows_weights() {
        let mut rng = Pcg32::seed_from_u64(42);
        let chances = table();
        let mut octopus = 0;
        let n = 10_000;
        for _ in 0..n {
            match roll_weighted(&chances, &mut rng) {
                Some(Octopus) => octopus += 1,
                Some(Seahorse) => panic!("zero-weight kind selected"),
                _ => {}
            }
        }
        let ratio = octopus as f32 / n as f32;
        assert!((ratio - 0.8).abs() < 0.03, "octopus ratio {ratio}");
    }

    proptest! {
        #[test]
        fn prop_draw_below_total_always_selects(
            weights in proptest::collection::vec(0.0f32..10.0, 1..6),
            frac in 0.0f32..=1.0,
        ) {
            let chances: Vec<SpawnChance> = weights
                .iter()
                .zip(HindranceKind::ALL.iter().cycle())
                .map(|(&w, &k)| SpawnChance::new(k, w))
                .collect();
            let total = total_weight(&chances);
            prop_assume!(total > 0.0);

            // Keep the draw below the float sum so residue cannot fall through
            let draw = frac * total * 0.999;
            let kind = pick_weighted(&chances, draw);
            prop_assert!(kind.is_some());
        }
    }
}
