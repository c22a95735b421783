use chrono::{Datelike, NaiveDate};

use crate::models::Film;

/// Size of the featured row on the home page
pub const FEATURED_SIZE: usize = 12;

const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;
const LCG_MASK: u64 = 0x7fff_ffff;

/// Seed shared by every caller on the same calendar day
pub fn daily_seed(date: NaiveDate) -> u64 {
    let seed = i64::from(date.year()) * 366 + i64::from(date.month()) * 31 + i64::from(date.day());
    seed.unsigned_abs()
}

/// Picks the film of the day among well-rated streamable films
///
/// The same catalog yields the same pick for everyone on a given date.
pub fn film_of_the_day(films: &[Film], today: NaiveDate) -> Option<Film> {
    let candidates: Vec<&Film> = films
        .iter()
        .filter(|f| f.is_streamable && f.vote_average >= 6.0 && f.has_genres())
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let index = (daily_seed(today) % candidates.len() as u64) as usize;
    Some(candidates[index].clone())
}

/// Featured row: the best-rated streamable films, or any streamable films
/// with genres when too few are well rated
pub fn featured(films: &[Film]) -> Vec<Film> {
    let mut acclaimed: Vec<&Film> = films
        .iter()
        .filter(|f| f.is_streamable && f.vote_average >= 7.0)
        .collect();

    if acclaimed.len() >= FEATURED_SIZE {
        acclaimed.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));
        return acclaimed.into_iter().take(FEATURED_SIZE).cloned().collect();
    }

    tracing::debug!(acclaimed = acclaimed.len(), "Falling back to unranked featured row");

    films
        .iter()
        .filter(|f| f.is_streamable && f.has_genres())
        .take(FEATURED_SIZE)
        .cloned()
        .collect()
}

/// Linear-congruential generator yielding values in `[0, 1]`
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & LCG_MASK;
        self.state as f64 / LCG_MASK as f64
    }
}

/// Fisher-Yates shuffle driven by [`SeededRng`]
///
/// The same seed and input order always produce the same permutation.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut rng = SeededRng::new(seed);

    for i in (1..shuffled.len()).rev() {
        // next_f64 may return exactly 1.0
        let j = ((rng.next_f64() * (i + 1) as f64).floor() as usize).min(i);
        shuffled.swap(i, j);
    }

    shuffled
}
