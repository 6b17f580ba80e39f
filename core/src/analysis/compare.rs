use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Averages of [`LayoutReport`] fields over the rounds of one comparison arm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmSummary {
    pub average_score: f64,
    pub average_fifty_fifty: f64,
    pub average_information: f64,
}

impl ArmSummary {
    fn from_reports(reports: &[LayoutReport]) -> Self {
        if reports.is_empty() {
            return Self::default();
        }
        let n = reports.len() as f64;
        Self {
            average_score: reports.iter().map(|r| r.score).sum::<f64>() / n,
            average_fifty_fifty: reports.iter().map(|r| r.fifty_fifty_count as f64).sum::<f64>()
                / n,
            average_information: reports.iter().map(|r| r.information_density).sum::<f64>() / n,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub config: GameConfig,
    pub rounds: usize,
    pub baseline: ArmSummary,
    pub scored: ArmSummary,
    pub adaptive: ArmSummary,
}

impl Comparison {
    /// Percentage drop in likely 50/50 cells from baseline to scored placement.
    pub fn fifty_fifty_reduction(&self) -> Option<f64> {
        let baseline = self.baseline.average_fifty_fifty;
        (baseline > 0.0)
            .then(|| (baseline - self.scored.average_fifty_fifty) / baseline * 100.0)
    }
}

/// Runs baseline, scored and adaptive placement side by side on one config.
///
/// Every layout, whatever produced it, is reported with [`analyze_layout`] so
/// the arms stay comparable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayoutComparer {
    config: GameConfig,
    first_click: Coord2,
    rounds: usize,
}

impl LayoutComparer {
    pub const DEFAULT_ROUNDS: usize = 10;

    pub fn new(config: GameConfig, first_click: Coord2) -> Self {
        Self {
            config,
            first_click,
            rounds: Self::DEFAULT_ROUNDS,
        }
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Comparison {
        let mut baseline = Vec::with_capacity(self.rounds);
        let mut scored = Vec::with_capacity(self.rounds);
        let mut adaptive = Vec::with_capacity(self.rounds);

        let (config, first_click) = (self.config, self.first_click);
        for round in 0..self.rounds {
            let layout = generate_single_layout(config, first_click, rng);
            baseline.push(analyze_layout(&Board::from_layout(&layout)));

            let best = StrategyPlan::scored(config).run(config, first_click, rng);
            scored.push(analyze_layout(&best.board));

            let best = StrategyPlan::select(config).run(config, first_click, rng);
            adaptive.push(analyze_layout(&best.board));

            log::debug!(
                "Round {}: baseline {:.2}, scored {:.2}, adaptive {:.2}",
                round + 1,
                baseline[round].score,
                scored[round].score,
                adaptive[round].score
            );
        }

        Comparison {
            config,
            rounds: self.rounds,
            baseline: ArmSummary::from_reports(&baseline),
            scored: ArmSummary::from_reports(&scored),
            adaptive: ArmSummary::from_reports(&adaptive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn comparison_runs_every_round() {
        let mut rng = SmallRng::seed_from_u64(5);
        let comparison = LayoutComparer::new(Difficulty::Beginner.config(), (4, 4))
            .with_rounds(3)
            .run(&mut rng);

        assert_eq!(comparison.rounds, 3);
        assert!(comparison.baseline.average_score.is_finite());
        assert!(comparison.scored.average_information > 0.0);
        assert!(comparison.adaptive.average_fifty_fifty >= 0.0);
    }

    #[test]
    fn zero_rounds_report_defaults() {
        let mut rng = SmallRng::seed_from_u64(5);
        let comparison = LayoutComparer::new(Difficulty::Beginner.config(), (0, 0))
            .with_rounds(0)
            .run(&mut rng);

        assert_eq!(comparison.baseline, ArmSummary::default());
        assert_eq!(comparison.fifty_fifty_reduction(), None);
    }

    #[test]
    fn reduction_is_a_percentage() {
        let comparison = Comparison {
            config: Difficulty::Beginner.config(),
            rounds: 1,
            baseline: ArmSummary {
                average_fifty_fifty: 4.0,
                ..ArmSummary::default()
            },
            scored: ArmSummary {
                average_fifty_fifty: 1.0,
                ..ArmSummary::default()
            },
            adaptive: ArmSummary::default(),
        };

        assert_eq!(comparison.fifty_fifty_reduction(), Some(75.0));
    }
}
