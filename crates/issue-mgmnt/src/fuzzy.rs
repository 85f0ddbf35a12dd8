//! Approximate string matching for tolerating renamed or misspelled labels.

/// Calculates the Levenshtein distance between two strings.
///
/// Counts single-character insertions, deletions and substitutions, measured
/// in Unicode scalar values rather than bytes.
///
/// # Examples
///
/// ```
/// use issue_mgmnt::fuzzy::levenshtein_distance;
///
/// assert_eq!(levenshtein_distance("D-Easy", "D-Eazy"), 1);
/// assert_eq!(levenshtein_distance("", "abc"), 3);
/// ```
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row: row[j] holds the distance between a[..i] and b[..j].
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (row[j + 1] + 1) // deletion
                .min(row[j] + 1) // insertion
                .min(diagonal + cost); // substitution
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[b.len()]
}

/// Finds the candidate closest to `target` by edit distance.
///
/// Ties go to the candidate seen first. Returns `None` only when there are no
/// candidates; there is no distance cutoff.
pub fn closest_match<'a, I>(candidates: I, target: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, usize)> = None;

    for candidate in candidates {
        let distance = levenshtein_distance(candidate, target);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(candidate, _)| candidate)
}
