use crate::normalize::{fold_case, normalize};

/// Suggests ship names for partial input, matching on normalized forms.
#[derive(Debug, Clone, Default)]
pub struct Completer {
    /// (display name, normalized name)
    candidates: Vec<(String, String)>,
    show_all_on_empty: bool,
}

impl Completer {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut candidates: Vec<(String, String)> = Vec::new();
        for name in names {
            let name = name.into();
            if candidates.iter().any(|(c, _)| *c == name) {
                continue;
            }
            let norm = normalize(&name);
            candidates.push((name, norm));
        }
        Self {
            candidates,
            show_all_on_empty: false,
        }
    }

    /// Whether empty input lists every candidate.
    pub fn show_all_on_empty(mut self, yes: bool) -> Self {
        self.show_all_on_empty = yes;
        self
    }

    /// Stops suggesting `name`.
    pub fn remove(&mut self, name: &str) {
        self.candidates.retain(|(c, _)| c != name);
    }

    /// Candidates whose normalized name starts with the normalized input, followed by those
    /// that merely contain it. Each group is in alphabetical order.
    pub fn complete(&self, input: &str) -> Vec<&str> {
        let needle = normalize(input);
        if needle.is_empty() && !self.show_all_on_empty {
            return Vec::new();
        }

        let mut hits: Vec<(bool, String, &str)> = self
            .candidates
            .iter()
            .filter_map(|(name, norm)| {
                let contained = if norm.starts_with(&needle) {
                    false
                } else if norm.contains(&needle) {
                    true
                } else {
                    return None;
                };
                Some((contained, fold_case(name), name.as_str()))
            })
            .collect();
        hits.sort();
        hits.into_iter().map(|(_, _, name)| name).collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Completer;

    fn completer() -> Completer {
        Completer::new([
            "Enterprise",
            "Essex",
            "Prinz Eugen",
            "Ägir",
            "Agano",
            "Essex",
            "Z23",
            "Großer Kurfürst",
        ])
    }

    #[test]
    fn prefix_before_substring() {
        assert_eq!(
            completer().complete("e"),
            ["Enterprise", "Essex", "Großer Kurfürst", "Prinz Eugen"]
        );
        assert_eq!(completer().complete("ess"), ["Essex"]);
        assert_eq!(completer().complete("eu"), ["Prinz Eugen"]);
    }

    #[test]
    fn diacritics() {
        assert_eq!(completer().complete("ag"), ["Agano", "Ägir"]);
        assert_eq!(completer().complete("ÄGI"), ["Ägir"]);
    }

    #[test]
    fn case_folding() {
        assert_eq!(completer().complete("grosser"), ["Großer Kurfürst"]);
        assert_eq!(completer().complete("kurfurst"), ["Großer Kurfürst"]);
        assert_eq!(completer().complete("GROẞ"), ["Großer Kurfürst"]);
    }

    #[test]
    fn empty_input() {
        assert!(completer().complete("").is_empty());
        let all = completer().show_all_on_empty(true);
        assert_eq!(all.complete("").len(), 7);
        assert_eq!(all.len(), 7);
    }

    #[test]
    fn remove() {
        let mut c = completer();
        c.remove("Essex");
        assert_eq!(c.complete("ess"), Vec::<&str>::new());
        assert_eq!(
            c.complete("e"),
            ["Enterprise", "Großer Kurfürst", "Prinz Eugen"]
        );
    }
}
