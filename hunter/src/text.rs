//! Text normalization shared by the qualification filter and the categorizer.

/// Normalized, space-padded text that supports whole-word phrase lookups.
#[derive(Debug, Clone)]
pub struct Normalized(String);

impl Normalized {
    /// Lowercases, drops dots and apostrophes ("M.S." -> "ms",
    /// "Master's" -> "masters"), turns every other non-alphanumeric
    /// character into a word break and collapses whitespace.
    pub fn new(text: &str) -> Self {
        let mut out = String::with_capacity(text.len() + 2);
        out.push(' ');
        let mut pending_space = false;
        for c in text.chars().flat_map(char::to_lowercase) {
            if matches!(c, '.' | '\'' | '\u{2019}') {
                continue;
            }
            if c.is_alphanumeric() {
                if pending_space && !out.ends_with(' ') {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
            } else {
                pending_space = true;
            }
        }
        if !out.ends_with(' ') {
            out.push(' ');
        }
        Normalized(out)
    }

    /// Joins several fields into one searchable text.
    pub fn join(parts: &[&str]) -> Self {
        Self::new(&parts.join(" \n "))
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Whole-word match of `phrase` (normalized the same way).
    pub fn contains(&self, phrase: &str) -> bool {
        let needle = Normalized::new(phrase);
        if needle.is_empty() {
            return false;
        }
        self.0.contains(&needle.0)
    }

    pub fn contains_any<S: AsRef<str>>(&self, phrases: &[S]) -> bool {
        phrases.iter().any(|p| self.contains(p.as_ref()))
    }

    /// True when `lead` occurs with one of `anchors` starting at most
    /// `window` words after it.
    /// "ms in computer science" has "computer science" one word after "ms".
    pub fn contains_near<S: AsRef<str>>(&self, lead: &str, anchors: &[S], window: usize) -> bool {
        let words = self.words();
        let lead = Normalized::new(lead);
        let lead = lead.words();
        if lead.is_empty() {
            return false;
        }
        let anchors: Vec<Normalized> = anchors.iter().map(|a| Normalized::new(a.as_ref())).collect();

        (0..words.len())
            .filter(|&start| phrase_at(&words, start, &lead))
            .any(|start| {
                let end = start + lead.len();
                anchors.iter().any(|anchor| {
                    let anchor = anchor.words();
                    if anchor.is_empty() {
                        return false;
                    }
                    (end..=end + window).any(|i| phrase_at(&words, i, &anchor))
                })
            })
    }

    fn words(&self) -> Vec<&str> {
        self.0.split_whitespace().collect()
    }
}

fn phrase_at(words: &[&str], start: usize, phrase: &[&str]) -> bool {
    words
        .get(start..start + phrase.len())
        .is_some_and(|found| found == phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_abbreviations_collapse() {
        let text = Normalized::new("M.S. in Computer-Science; Master's preferred");
        assert!(text.contains("ms"));
        assert!(text.contains("computer science"));
        assert!(text.contains("masters"));
    }

    #[test]
    fn test_whole_word_only() {
        let text = Normalized::new("Internal tools team");
        assert!(!text.contains("intern"));
        assert!(text.contains("internal tools"));
    }

    #[test]
    fn test_blank_text() {
        assert!(Normalized::new("  \n\t ").is_empty());
        assert!(!Normalized::new("  ").contains("anything"));
        assert!(!Normalized::new("some text").contains(" - "));
    }

    #[test]
    fn test_near_phrases() {
        let text = Normalized::new("M.S. or Ph.D. in Computer Science; 5 ms deadlines");
        assert!(text.contains_near("ms", &["computer science"], 4));
        assert!(!text.contains_near("ms", &["computer science"], 2));
        assert!(text.contains_near("ms", &["deadlines"], 0));

        let text = Normalized::new("Computer Science background, MS Office");
        assert!(!text.contains_near("ms", &["computer science"], 4));
        assert!(!text.contains_near("", &["computer science"], 4));
    }

    #[test]
    fn test_join_of_blank_fields_is_empty() {
        let text = Normalized::join(&["", "  "]);
        assert!(text.is_empty());
    }
}
