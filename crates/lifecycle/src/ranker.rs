//! Fuzzy ranking of pairs against the user's query.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

use crate::pair::Pair;

/// Score given to every pair when the query is blank.
pub const PASSTHROUGH_SCORE: i64 = 1;

/// Scores pairs with a skim-style subsequence matcher.
///
/// Construct one and share it; the matcher keeps no per-query state.
pub struct QueryRanker {
    matcher: SkimMatcherV2,
}

impl Default for QueryRanker {
    fn default() -> Self {
        Self::new(SkimMatcherV2::default().ignore_case())
    }
}

impl QueryRanker {
    pub fn new(matcher: SkimMatcherV2) -> Self {
        Self { matcher }
    }

    /// `0` excludes the pair; any match scores at least `1`.
    pub fn score(&self, pair: &Pair, query: &str) -> i64 {
        if query.trim().is_empty() {
            return PASSTHROUGH_SCORE;
        }
        self.matcher
            .fuzzy_match(&pair.queryable(), query.trim())
            .map_or(0, |score| score.max(1))
    }

    /// Score every pair in place.
    pub fn rank(&self, pairs: &mut [Pair], query: &str) {
        for pair in pairs {
            pair.score = self.score(pair, query);
        }
    }
}
