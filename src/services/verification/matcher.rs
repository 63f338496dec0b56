use super::normalizer::normalize;
use tracing::debug;

/// Similarity threshold used when a verifier does not pick its own
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Check whether `needle` occurs in `haystack`, allowing OCR-level noise
///
/// Both sides are normalized first. An exact substring hit wins outright;
/// otherwise a window of as many haystack words as the needle has is slid over
/// the haystack and each window is scored with [`similarity_ratio`].
pub fn contains(haystack: &str, needle: &str, threshold: f64) -> bool {
    let haystack_norm = normalize(haystack);
    let needle_norm = normalize(needle);

    if haystack_norm.contains(&needle_norm) {
        debug!(needle = %needle_norm, "Exact match found");
        return true;
    }

    let words: Vec<&str> = haystack_norm.split(' ').filter(|w| !w.is_empty()).collect();
    let window = needle_norm.split(' ').filter(|w| !w.is_empty()).count();

    if window == 0 || window > words.len() {
        return false;
    }

    for phrase_words in words.windows(window) {
        let phrase = phrase_words.join(" ");
        let ratio = similarity_ratio(&phrase, &needle_norm);

        if ratio >= threshold {
            debug!(phrase = %phrase, needle = %needle_norm, ratio, "Fuzzy match found");
            return true;
        }
    }

    false
}

/// Ratcliff/Obershelp similarity: `2 * M / T`
///
/// `M` is the total size of the matching blocks found by recursively taking
/// the longest common run and repeating on both sides of it; `T` is the
/// combined length. Two empty strings score 1.0.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Sum of matching block sizes between `a` and `b`
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }

        matched += size;

        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest common run within `a[a_lo..a_hi]` and `b[b_lo..b_hi]`
///
/// Ties go to the run starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);

    // run_len[j + 1] = length of the common run ending at (i - 1, j)
    let width = b_hi - b_lo + 1;
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in a_lo..a_hi {
        for j in b_lo..b_hi {
            let slot = j - b_lo + 1;
            if a[i] == b[j] {
                let k = prev[slot - 1] + 1;
                curr[slot] = k;
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            } else {
                curr[slot] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_size)
}
