// Approximate string matching for the category fallback
//
// Ratcliff/Obershelp "gestalt" similarity:
//   ratio = 2 * M / (len(a) + len(b))
// where M is the total size of the matching blocks found by repeatedly
// taking the longest common substring and recursing on both sides.
//
// "Resturants" vs "Restaurants" → 0.95
// "Target"     vs "Amazon"      → 0.17

/// Similarity cutoff used when falling back to the category catalog
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Similarity ratio in [0.0, 1.0]. Case-sensitive, compares Unicode scalar values.
///
/// Two empty strings are identical (1.0).
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Best candidate whose ratio against `word` reaches `cutoff`
///
/// Ties keep the candidate seen first, so catalog order decides.
pub fn closest_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in candidates {
        let score = sequence_ratio(candidate, word);
        if score < cutoff {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Sum of the matching block sizes between `a` and `b`
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }

        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common block inside a[alo..ahi] x b[blo..bhi]
///
/// Returns (start in a, start in b, size). On equal sizes the block that
/// starts earliest in `a` wins, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);

    // run[j + 1] = length of the common run ending at (i, j)
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            current[j + 1] = if a[i] == b[j] { previous[j] + 1 } else { 0 };

            let size = current[j + 1];
            if size > best.2 {
                best = (i + 1 - size, j + 1 - size, size);
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    best
}

// ============================================================================
// TESTS
// ============================================================================
