use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog::Candidate;

/// Speculative match indicators shown next to a candidate. Kept apart from the candidate
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAnnotation {
    pub score: u8,
    pub fit_percentage: u8,
}

pub trait CandidateScorer: Send + Sync {
    fn score(&self, candidate: &Candidate) -> CandidateAnnotation;
}

/// Demo scorer: score in 70..=99 and fit in 60..=99, drawn from a seedable RNG.
pub struct RandomScorer {
    rng: Mutex<StdRng>,
}

impl RandomScorer {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl CandidateScorer for RandomScorer {
    fn score(&self, _candidate: &Candidate) -> CandidateAnnotation {
        let mut rng = self.rng.lock().expect("scorer rng mutex poisoned");
        CandidateAnnotation {
            score: rng.gen_range(70..=99),
            fit_percentage: rng.gen_range(60..=99),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntityCatalog;
    use chrono::NaiveDate;

    fn candidate() -> Candidate {
        EntityCatalog::seeded(NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"))
            .candidates
            .remove(0)
    }

    #[test]
    fn scores_stay_in_range() {
        let scorer = RandomScorer::from_seed(7);
        let candidate = candidate();
        for _ in 0..200 {
            let annotation = scorer.score(&candidate);
            assert!((70..=99).contains(&annotation.score));
            assert!((60..=99).contains(&annotation.fit_percentage));
        }
    }

    #[test]
    fn seeded_scorers_agree() {
        let candidate = candidate();
        let left = RandomScorer::from_seed(42);
        let right = RandomScorer::from_seed(42);
        assert_eq!(left.score(&candidate), right.score(&candidate));
    }
}
