//! "Did you mean" suggestions for unknown command names.

const MAX_DISTANCE: usize = 2;
const MAX_SUGGESTIONS: usize = 3;

/// Returns up to three candidates close to `query`, closest first.
///
/// A candidate is close when its edit distance is at most 2, or when it starts with
/// or contains the query. Ties are broken alphabetically.
pub fn suggest<'a, I>(query: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = levenshtein(&query, &candidate.to_lowercase());
            let related = distance <= MAX_DISTANCE || candidate.contains(query.as_str());
            related.then_some((distance, candidate))
        })
        .collect();

    matches.sort();
    matches.dedup_by(|a, b| a.1 == b.1);

    matches
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Edit distance between two strings, counted in characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
