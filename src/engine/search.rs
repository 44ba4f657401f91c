use serde::Serialize;

use crate::matrix::{DocumentVectors, vectorize_tokens};
use crate::preprocessing::Vocabulary;

/// Number of entries reported in detailed mode.
pub const DETAILED_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub document: String,
    pub score: f64,
}

/// Outcome of one query. `best` is `None` when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ranking {
    pub best: Option<Match>,
    /// Filled in detailed mode only: positive scores, highest first.
    pub matches: Vec<Match>,
}

impl Ranking {
    pub fn is_match(&self) -> bool {
        self.best.is_some()
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn euclidean_norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Cosine of the angle between `a` and `b`, or `None` when either vector
/// is all zeros and the angle is undefined.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    let norms = euclidean_norm(a) * euclidean_norm(b);
    if norms == 0.0 {
        return None;
    }
    let score = dot(a, b) / norms;
    score.is_finite().then_some(score)
}

/// Ranks every document against the query tokens.
///
/// Documents are scanned in store order and a later document only replaces
/// the current best with a strictly greater score, so among equal scores
/// the first one wins. Empty documents have no defined score and are never
/// reported.
pub fn rank<S: AsRef<str>>(
    query_tokens: &[S],
    vocabulary: &Vocabulary,
    vectors: &DocumentVectors,
    detailed: bool,
) -> Ranking {
    let query = vectorize_tokens(query_tokens, vocabulary);
    let query_norm = euclidean_norm(&query);
    if query_norm == 0.0 {
        return Ranking::default();
    }

    let mut ranking = Ranking::default();
    for doc in vectors {
        let Some(score) = cosine_similarity(&query, &doc.counts).filter(|s| *s > 0.0) else {
            continue;
        };

        if ranking.best.as_ref().is_none_or(|best| score > best.score) {
            ranking.best = Some(Match {
                document: doc.id.clone(),
                score,
            });
        }
        if detailed {
            ranking.matches.push(Match {
                document: doc.id.clone(),
                score,
            });
        }
    }

    // Stable sort: equal scores keep store order.
    ranking.matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranking.matches.truncate(DETAILED_LIMIT);
    ranking
}

pub fn best_match<S: AsRef<str>>(
    query_tokens: &[S],
    vocabulary: &Vocabulary,
    vectors: &DocumentVectors,
) -> Option<Match> {
    rank(query_tokens, vocabulary, vectors, false).best
}
