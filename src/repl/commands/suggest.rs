//! # Suggestions
//!
//! Two separate lookups over the command names:
//! - [`suggest`]: nearest name by Levenshtein distance, for "did you mean"
//! - [`complete`]: prefix matches, for Tab completion and the live hint
//!
//! Both walk the names in registration order; the first best match wins.

use crate::config::SUGGESTION_THRESHOLD;

/// Levenshtein edit distance over chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Closest name strictly below the suggestion threshold
pub fn suggest<'a>(input: &str, names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    for name in names {
        let distance = levenshtein(input, name);
        if distance >= SUGGESTION_THRESHOLD {
            continue;
        }
        match best {
            Some((_, closest)) if closest <= distance => {}
            _ => best = Some((name, distance)),
        }
    }
    best.map(|(name, _)| name)
}

/// Names starting with `prefix`, in iteration order
pub fn complete<'a>(prefix: &str, names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    if prefix.is_empty() {
        return Vec::new();
    }
    names
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .collect()
}

/// Longest prefix shared by every candidate
pub fn common_prefix<'a>(candidates: &[&'a str]) -> &'a str {
    let Some(first) = candidates.first() else {
        return "";
    };
    let mut end = first.len();
    for other in &candidates[1..] {
        end = first
            .char_indices()
            .zip(other.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, a), _)| i + a.len_utf8())
            .unwrap_or(0)
            .min(end);
    }
    &first[..end]
}
