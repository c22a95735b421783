use serde::Serialize;

use crate::models::{Answer, Film, QuizAnswers};

/// A film paired with its quiz match percentage
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizMatch {
    pub film: Film,
    pub match_percent: u8,
}

/// Percentage of concrete quiz answers the film satisfies
///
/// Returns `None` when every answer is "any": there is nothing to match
/// against and every film would otherwise score 100.
pub fn quiz_match_score(film: &Film, answers: &QuizAnswers) -> Option<u8> {
    let answered = answers.answered();
    if answered == 0 {
        return None;
    }

    let checks = [
        answers.era.pick().map(|era| era.contains(film.year)),
        answers.genre.pick().map(|genre| film.has_genre(genre)),
        answers.mood.pick().map(|mood| {
            film
                .folded_genres()
                .any(|g| mood.genre_keywords().iter().any(|keyword| g.contains(keyword)))
        }),
        answers.rating.pick().map(|tier| film.vote_average >= tier.min_rating()),
        answers
            .language
            .pick()
            .map(|language| film.language.as_deref() == Some(language.as_str())),
        match answers.streamable {
            Answer::Pick(wanted) => Some(film.is_streamable == wanted),
            Answer::Any => None,
        },
    ];

    let matched = checks.iter().filter(|check| **check == Some(true)).count();
    let percent = (matched as f64 / answered as f64 * 100.0).round().min(100.0);
    Some(percent as u8)
}

/// Ranks the catalog against the quiz answers, best match first
///
/// Ties are broken by catalog rating; films matching nothing are left out.
/// Empty when no concrete answer exists.
pub fn quiz_matches(films: &[Film], answers: &QuizAnswers, limit: usize) -> Vec<QuizMatch> {
    let mut matches: Vec<QuizMatch> = films
        .iter()
        .filter_map(|film| {
            quiz_match_score(film, answers)
                .filter(|percent| *percent > 0)
                .map(|match_percent| QuizMatch {
                    film: film.clone(),
                    match_percent,
                })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.match_percent
            .cmp(&a.match_percent)
            .then_with(|| b.film.vote_average.total_cmp(&a.film.vote_average))
    });
    matches.truncate(limit);
    matches
}
