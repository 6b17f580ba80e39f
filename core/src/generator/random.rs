use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Uniform placement: shuffle every eligible cell and mine the first ones.
pub fn generate_single_layout<R: Rng + ?Sized>(
    config: GameConfig,
    first_click: Coord2,
    rng: &mut R,
) -> MineLayout {
    let mut positions = eligible_positions(config, first_click);
    let mines_to_place = placement_count(config, positions.len());
    positions.shuffle(rng);

    let mut layout = MineLayout::empty(config.size);
    for &coords in &positions[..mines_to_place] {
        layout.set_mine(coords);
    }
    layout
}

/// Generator bound to a seed and a first click, so a game can be replayed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    start: Coord2,
    placement: Placement,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, start: Coord2, placement: Placement) -> Self {
        Self {
            seed,
            start,
            placement,
        }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let layout = self.placement.layout(config, self.start, &mut rng);

        // double check mine count
        let expected = placement_count(config, eligible_positions(config, self.start).len());
        if usize::from(layout.mine_count()) != expected {
            log::warn!(
                "Generated layout count mismatch, actual: {}, expected: {}",
                layout.mine_count(),
                expected
            );
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_layout_has_requested_mines() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = Difficulty::Intermediate.config();
        let layout = generate_single_layout(config, (8, 8), &mut rng);

        assert_eq!(layout.mine_count(), 40);
        assert!(layout.iter_mines().all(|pos| !in_safe_zone(pos, (8, 8))));
    }

    #[test]
    fn same_seed_replays_same_layout() {
        let config = Difficulty::Beginner.config();
        let a = RandomLayoutGenerator::new(99, (4, 4), Placement::Scored).generate(config);
        let b = RandomLayoutGenerator::new(99, (4, 4), Placement::Scored).generate(config);

        assert_eq!(a, b);
    }

    #[test]
    fn uniform_layouts_differ_between_seeds() {
        let config = Difficulty::Expert.config();
        let a = RandomLayoutGenerator::new(1, (0, 0), Placement::Uniform).generate(config);
        let b = RandomLayoutGenerator::new(2, (0, 0), Placement::Uniform).generate(config);

        assert_ne!(a, b);
        assert_eq!(a.mine_count(), b.mine_count());
    }
}
