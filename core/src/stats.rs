//! Values handed to persistence and the leaderboard once a game ends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::*;

/// Times at or above this many seconds score nothing.
pub const MAX_SCORED_TIME: u32 = 999;

/// Leaderboard score for a win in `time_elapsed` seconds; `None` for custom
/// boards.
pub fn score(difficulty: Difficulty, time_elapsed: u32) -> Option<u32> {
    difficulty
        .score_multiplier()
        .map(|multiplier| MAX_SCORED_TIME.saturating_sub(time_elapsed) * multiplier)
}

/// Daily puzzles are unweighted; an unfinished attempt scores zero.
pub fn daily_score(completed: bool, time_elapsed: u32) -> u32 {
    if completed {
        MAX_SCORED_TIME.saturating_sub(time_elapsed)
    } else {
        0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    pub time_elapsed: u32,
    pub config: GameConfig,
    pub difficulty: Difficulty,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub time_elapsed: u32,
    pub score: u32,
    pub config: GameConfig,
    pub completed: bool,
}

impl ScoreSubmission {
    /// Leaderboard entry for a won, ranked game.
    pub fn ranked(outcome: &GameOutcome) -> Option<Self> {
        if !outcome.won {
            return None;
        }
        Some(Self {
            time_elapsed: outcome.time_elapsed,
            score: score(outcome.difficulty, outcome.time_elapsed)?,
            config: outcome.config,
            completed: true,
        })
    }

    /// Daily attempt, submitted whether or not it was completed.
    pub fn daily(outcome: &GameOutcome) -> Self {
        Self {
            time_elapsed: outcome.time_elapsed,
            score: daily_score(outcome.won, outcome.time_elapsed),
            config: outcome.config,
            completed: outcome.won,
        }
    }
}

/// Lifetime totals for ranked games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameStats {
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub total_play_time: u64,
    pub best_times: BTreeMap<Difficulty, u32>,
}

impl GameStats {
    /// Adds one finished game; custom boards are not tracked.
    pub fn record(&mut self, outcome: &GameOutcome) -> bool {
        if !outcome.difficulty.is_ranked() {
            log::debug!("Not recording custom game {}", outcome.config);
            return false;
        }

        self.games_played += 1;
        self.total_play_time += u64::from(outcome.time_elapsed);

        if outcome.won {
            self.games_won += 1;
            let best = self
                .best_times
                .entry(outcome.difficulty)
                .or_insert(outcome.time_elapsed);
            *best = (*best).min(outcome.time_elapsed);
        } else {
            self.games_lost += 1;
        }
        true
    }

    pub fn best_time(&self, difficulty: Difficulty) -> Option<u32> {
        self.best_times.get(&difficulty).copied()
    }

    /// Percentage of games won, `0.0` before any game.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(difficulty: Difficulty, won: bool, time_elapsed: u32) -> GameOutcome {
        GameOutcome {
            won,
            time_elapsed,
            config: difficulty.config(),
            difficulty,
        }
    }

    #[test]
    fn score_scales_with_difficulty() {
        assert_eq!(score(Difficulty::Beginner, 99), Some(900));
        assert_eq!(score(Difficulty::Expert, 99), Some(2700));
        assert_eq!(score(Difficulty::Extreme, 0), Some(5994));
        assert_eq!(score(Difficulty::Intermediate, 1500), Some(0));
        assert_eq!(score(Difficulty::Custom, 10), None);
    }

    #[test]
    fn daily_score_needs_completion() {
        assert_eq!(daily_score(true, 120), 879);
        assert_eq!(daily_score(false, 120), 0);
        assert_eq!(daily_score(true, 5000), 0);
    }

    #[test]
    fn submissions() {
        let win = outcome(Difficulty::Intermediate, true, 100);
        let loss = outcome(Difficulty::Intermediate, false, 100);

        let submission = ScoreSubmission::ranked(&win).unwrap();
        assert_eq!(submission.score, 1798);
        assert!(submission.completed);
        assert_eq!(ScoreSubmission::ranked(&loss), None);
        assert_eq!(ScoreSubmission::ranked(&outcome(Difficulty::Custom, true, 1)), None);

        let daily = ScoreSubmission::daily(&loss);
        assert_eq!(daily.score, 0);
        assert!(!daily.completed);
    }

    #[test]
    fn record_tracks_totals_and_best_times() {
        let mut stats = GameStats::default();

        assert!(stats.record(&outcome(Difficulty::Beginner, true, 40)));
        assert!(stats.record(&outcome(Difficulty::Beginner, true, 25)));
        assert!(stats.record(&outcome(Difficulty::Beginner, true, 60)));
        assert!(stats.record(&outcome(Difficulty::Expert, false, 10)));
        assert!(!stats.record(&outcome(Difficulty::Custom, true, 1)));

        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.games_won, 3);
        assert_eq!(stats.games_lost, 1);
        assert_eq!(stats.total_play_time, 135);
        assert_eq!(stats.best_time(Difficulty::Beginner), Some(25));
        assert_eq!(stats.best_time(Difficulty::Expert), None);
        assert_eq!(stats.win_rate(), 75.0);
    }

    #[test]
    fn stats_survive_json() {
        let mut stats = GameStats::default();
        stats.record(&outcome(Difficulty::Master, true, 300));

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"master\":300"));
        assert_eq!(serde_json::from_str::<GameStats>(&json).unwrap(), stats);
        assert_eq!(serde_json::from_str::<GameStats>("{}").unwrap(), GameStats::default());
    }
}
