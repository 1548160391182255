//! Deciding whether a search result is the person we asked about.
//!
//! Both checks are strict. There is no fuzzy matching of names or addresses.

/// How display names are compared against the queried name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameCase {
    /// Compare exactly as the source surfaces the name
    #[default]
    Exact,
    /// Fold both sides to lowercase before comparing
    Insensitive,
}

/// Compares a queried first/last name with a candidate's display name.
///
/// Display names may come last-name-first and may carry middle names,
/// initials or suffixes. Only the first and last whitespace-delimited tokens
/// take part in the comparison, in either order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameMatcher {
    case: NameCase,
}

impl NameMatcher {
    pub fn new(case: NameCase) -> Self {
        Self { case }
    }

    pub fn matches(&self, first: &str, last: &str, display_name: &str) -> bool {
        let queried = self.fold(format!("{first} {last}"));
        let trimmed = display_name.trim();
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();

        if tokens.len() < 2 {
            return queried == self.fold(trimmed.to_string());
        }

        let head = tokens[0];
        let tail = tokens[tokens.len() - 1];
        queried == self.fold(format!("{head} {tail}")) || queried == self.fold(format!("{tail} {head}"))
    }

    fn fold(&self, value: String) -> String {
        match self.case {
            NameCase::Exact => value,
            NameCase::Insensitive => value.to_lowercase(),
        }
    }
}

/// Index of the first candidate address equal to the queried one, both sides
/// trimmed. No abbreviation, casing or unit-number normalization.
pub fn match_address<S: AsRef<str>>(queried: &str, candidates: &[S]) -> Option<usize> {
    let queried = queried.trim();
    candidates
        .iter()
        .position(|candidate| candidate.as_ref().trim() == queried)
}
