//! # Fuzzy Filter
//!
//! Case-insensitive ordered-subsequence matching used by the history search.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuzzyMatch {
    pub matched: bool,
    pub score: usize,
    /// Character indices in the text that matched the pattern, in order
    pub indices: Vec<usize>,
}

/// Match `pattern` as a subsequence of `text`, ignoring case.
/// An empty pattern always matches with score 0.
pub fn fuzzy_match(pattern: &str, text: &str) -> FuzzyMatch {
    if pattern.is_empty() {
        return FuzzyMatch {
            matched: true,
            ..FuzzyMatch::default()
        };
    }

    // Both sides are lowered the same way; one text char may lower to several
    let pattern: Vec<char> = pattern.chars().flat_map(char::to_lowercase).collect();
    let lowered = text
        .chars()
        .enumerate()
        .flat_map(|(i, ch)| ch.to_lowercase().map(move |lc| (i, lc)));

    let mut next = 0;
    let mut indices: Vec<usize> = Vec::new();
    for (i, lc) in lowered {
        if next == pattern.len() {
            break;
        }
        if lc == pattern[next] {
            if indices.last() != Some(&i) {
                indices.push(i);
            }
            next += 1;
        }
    }

    FuzzyMatch {
        matched: next == pattern.len(),
        score: next,
        indices,
    }
}

/// Keep the items whose key matches, best score first. Equal scores keep
/// their original order. An empty pattern returns the input unchanged.
pub fn fuzzy_filter<T, F>(items: Vec<T>, pattern: &str, key: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    if pattern.is_empty() {
        return items;
    }

    let mut scored: Vec<(usize, T)> = items
        .into_iter()
        .filter_map(|item| {
            let result = fuzzy_match(pattern, &key(&item));
            result.matched.then_some((result.score, item))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_should_match_with_zero_score() {
        let result = fuzzy_match("", "anything");
        assert!(result.matched);
        assert_eq!(result.score, 0);
        assert!(result.indices.is_empty());
    }

    #[test]
    fn subsequence_should_match_case_insensitively() {
        let result = fuzzy_match("gUsr", "GET https://api/users");
        assert!(result.matched);
        assert_eq!(result.score, 4);
        assert_eq!(result.indices, vec![0, 16, 17, 19]);
    }

    #[test]
    fn out_of_order_characters_should_not_match() {
        assert!(!fuzzy_match("ba", "ab").matched);
        assert!(!fuzzy_match("abc", "ab").matched);
    }

    #[test]
    fn multi_char_lowercase_should_match_itself() {
        let result = fuzzy_match("İ", "İstanbul");
        assert!(result.matched);
        assert_eq!(result.indices, vec![0]);

        let result = fuzzy_match("is", "İstanbul");
        assert!(result.matched);
        assert_eq!(result.indices, vec![0, 1]);
    }

    #[test]
    fn substring_is_not_required() {
        assert!(fuzzy_match("pst", "POST http://x").matched);
    }

    #[test]
    fn filter_should_return_input_for_empty_pattern() {
        let items = vec!["b", "a", "c"];
        assert_eq!(fuzzy_filter(items.clone(), "", |s| s.to_string()), items);
    }

    #[test]
    fn filter_should_keep_matches_in_stable_order() {
        let items = vec!["GET /users", "POST /orders", "GET /user/1"];
        let filtered = fuzzy_filter(items, "user", |s| s.to_string());
        assert_eq!(filtered, vec!["GET /users", "GET /user/1"]);
    }
}
