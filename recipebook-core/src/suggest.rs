//! Typo suggestions for slugs and category identifiers.

/// Maximum Damerau-Levenshtein distance for a suggestion.
pub const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Suggest the closest candidate for typo correction.
///
/// Returns the closest match if its Damerau-Levenshtein distance is ≤ 3.
/// Exact matches are not suggestions and yield `None`. Ties go to the
/// first candidate.
#[must_use]
pub fn closest_match<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter(|candidate| *candidate != input)
        .map(|candidate| (candidate, strsim::damerau_levenshtein(input, candidate)))
        .filter(|(_, dist)| *dist <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(_, dist)| *dist)
        .map(|(candidate, _)| candidate.to_string())
}
