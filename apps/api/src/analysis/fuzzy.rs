//! Partial-containment fuzzy scoring.
//!
//! `partial_ratio` slides the shorter string across the longer one and keeps
//! the best normalized Indel similarity, so "python" against
//! "python programming" scores 100. Strings are compared as Unicode scalar
//! values, not bytes.

/// Best alignment of the shorter string inside the longer one, 0–100.
///
/// Windows considered: every full window of the shorter length, plus the
/// shorter leading prefixes and trailing suffixes of the longer string.
/// Empty against non-empty scores 0; two empty strings score 100.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 100,
        (true, false) | (false, true) => return 0,
        _ => {}
    }

    let best = if a.len() < b.len() {
        best_window(&a, &b)
    } else if a.len() > b.len() {
        best_window(&b, &a)
    } else {
        best_window(&a, &b).max(best_window(&b, &a))
    };

    to_score(best)
}

fn best_window(short: &[char], long: &[char]) -> f64 {
    let n = short.len();
    let m = long.len();
    let mut best = 0.0_f64;

    let full = (0..=m - n).map(|start| &long[start..start + n]);
    let heads = (1..n).map(|end| &long[..end]);
    let tails = (m - n + 1..m).map(|start| &long[start..]);

    for window in full.chain(heads).chain(tails) {
        let score = indel_similarity(short, window);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

/// 100 × 2·LCS / (|a| + |b|).
fn indel_similarity(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Truncates, so `to_score(s) >= t` holds exactly when `s >= t` for any
/// integer threshold `t`.
fn to_score(similarity: f64) -> u8 {
    similarity.floor().clamp(0.0, 100.0) as u8
}
