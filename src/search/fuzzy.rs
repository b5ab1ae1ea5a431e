//! Approximate string matching used to rank items.
//!
//! A candidate alignment starting at `start` scores
//! `errors / pattern_len + |start - location| / distance`. Lower is better and
//! a value only matches when its best alignment is within `threshold`.

/// Floor for substring and approximate hits. Only a value equal to the
/// whole pattern scores `0.0`.
pub const MIN_SCORE: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuzzyOptions {
    /// Largest accepted score; `0.0` demands an exact hit at `location`.
    pub threshold: f64,
    /// How far from `location` a hit may drift before proximity alone
    /// exhausts the threshold.
    pub distance: usize,
    /// Expected character offset of the match.
    pub location: usize,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            distance: 100,
            location: 0,
        }
    }
}

/// Best score of `pattern` against `text`, or `None` when nothing is within
/// the threshold. Both sides are compared case-insensitively; `pattern` is
/// expected to be lowercased already. A value equal to the pattern scores
/// `0.0`; every other hit is at least `MIN_SCORE`.
pub fn match_score(pattern: &[char], text: &str, options: &FuzzyOptions) -> Option<f64> {
    if pattern.is_empty() {
        return None;
    }
    let text: Vec<char> = text.to_lowercase().chars().collect();
    if text.is_empty() {
        return None;
    }
    if text.as_slice() == pattern {
        return Some(0.0);
    }

    let m = pattern.len();
    let distance = options.distance.max(1) as f64;
    let slack = (options.threshold * m as f64).floor() as usize;
    let reach = (options.threshold * distance).floor() as usize;
    let first = options.location.saturating_sub(reach);
    let last = (options.location + reach).min(text.len() - 1);

    let mut best: Option<f64> = None;
    for start in first..=last {
        let proximity = start.abs_diff(options.location) as f64 / distance;
        if proximity > options.threshold {
            continue;
        }
        let window_end = (start + m + slack).min(text.len());
        let errors = anchored_edit_distance(pattern, &text[start..window_end]);
        let score = errors as f64 / m as f64 + proximity;
        if best.is_none_or(|current| score < current) {
            best = Some(score);
        }
    }

    best.filter(|score| *score <= options.threshold)
        .map(|score| score.max(MIN_SCORE))
}

/// Edit distance between `pattern` and the closest prefix of `window`.
///
/// The alignment starts at the first char of `window`; trailing window chars
/// are free.
pub fn anchored_edit_distance(pattern: &[char], window: &[char]) -> usize {
    let mut previous: Vec<usize> = (0..=window.len()).collect();
    let mut current = vec![0; window.len() + 1];

    for (i, &p) in pattern.iter().enumerate() {
        current[0] = i + 1;
        for (j, &t) in window.iter().enumerate() {
            let substitution = previous[j] + usize::from(p != t);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous.into_iter().min().unwrap_or(pattern.len())
}

/// Length norm of a field value: `1 / sqrt(word_count)`, rounded to three
/// decimals. Longer values weigh less.
pub fn field_norm(value: &str) -> f64 {
    let words = value.split(' ').filter(|word| !word.is_empty()).count().max(1);
    (1000.0 / (words as f64).sqrt()).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(text: &str) -> Vec<char> {
        text.to_lowercase().chars().collect()
    }

    fn score(query: &str, text: &str) -> Option<f64> {
        match_score(&pattern(query), text, &FuzzyOptions::default())
    }

    #[test]
    fn whole_value_hit_scores_zero_and_prefix_clamps() {
        assert_eq!(score("hero", "hero"), Some(0.0));
        assert_eq!(score("hero", "HERO"), Some(0.0));
        assert_eq!(score("hero", "Hero — Split Image"), Some(MIN_SCORE));
        assert_eq!(score("hero", "heroes"), Some(MIN_SCORE));
    }

    #[test]
    fn proximity_penalizes_late_hits() {
        let near = score("hero", "classic hero section").unwrap();
        assert!((near - 0.08).abs() < 1e-9, "{near}");

        let late = "complete landing page template with hero";
        assert_eq!(late.find("hero"), Some(36));
        assert_eq!(score("hero", late), None);
    }

    #[test]
    fn tolerates_a_typo() {
        let typo = score("testimonail", "testimonial").unwrap();
        assert!(typo > MIN_SCORE && typo <= 0.3, "{typo}");
        assert_eq!(score("zzzz", "testimonial"), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(score("SAAS", "SaaS Landing"), Some(MIN_SCORE));
    }

    #[test]
    fn blank_inputs_never_match() {
        assert_eq!(score("", "hero"), None);
        assert_eq!(score("hero", ""), None);
    }

    #[test]
    fn anchored_distance_ignores_trailing_window() {
        assert_eq!(anchored_edit_distance(&pattern("card"), &pattern("cards and")), 0);
        assert_eq!(anchored_edit_distance(&pattern("card"), &pattern("xcard")), 1);
        assert_eq!(anchored_edit_distance(&pattern("card"), &pattern("")), 4);
    }

    #[test]
    fn norm_shrinks_with_word_count() {
        assert_eq!(field_norm("hero"), 1.0);
        assert_eq!(field_norm("SaaS Landing"), 0.707);
        assert_eq!(field_norm("a b c d"), 0.5);
    }
}
