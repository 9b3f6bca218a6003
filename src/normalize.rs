//! Canonical forms for ship names.
//!
//! Names are compared after compatibility decomposition, with combining marks and a handful of
//! punctuation characters dropped and everything case folded. So `"Ätland"`, `"atland"` and
//! `"ATLAND"` are all the same ship, `"Großer Kurfürst"` can be typed as `"grosser kurfurst"`,
//! and `"Prinz Eugen (µ)"` as `"prinz eugen μ"`.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters that never take part in a comparison.
const IGNORED: [char; 4] = ['\'', '.', '(', ')'];

fn keep(c: &char) -> bool {
    !is_combining_mark(*c) && !IGNORED.contains(c)
}

/// Lowercases, plus the folds where lowercase and caseless forms differ once
/// compatibility decomposition has run.
fn fold(c: char, out: &mut String) {
    match c {
        'ß' | 'ẞ' => out.push_str("ss"),
        'ς' => out.push('σ'),
        c => out.extend(c.to_lowercase()),
    }
}

/// Case folds `s` without touching accents or punctuation.
pub fn fold_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        fold(c, &mut out);
    }
    out
}

pub fn normalize(s: &str) -> String {
    // Folding can produce characters that decompose further, so decompose on both sides.
    let folded = fold_case(&s.nfkd().filter(keep).collect::<String>());
    folded.nfkd().filter(keep).collect()
}

pub fn matches(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
