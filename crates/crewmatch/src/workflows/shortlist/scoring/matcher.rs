//! Text containment strategies used by the rubric for tags, languages and locations.

/// Decides whether `haystack` covers `needle`.
pub trait TermMatcher: Send + Sync {
    fn matches(&self, haystack: &str, needle: &str) -> bool;
}

/// Lower-cased substring containment.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveMatcher;

impl TermMatcher for CaseInsensitiveMatcher {
    fn matches(&self, haystack: &str, needle: &str) -> bool {
        let needle = needle.trim();
        if needle.is_empty() {
            return false;
        }
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Folds Latin diacritics and drops punctuation before containment.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccentFoldingMatcher;

impl AccentFoldingMatcher {
    fn fold(value: &str) -> String {
        let mut folded = String::with_capacity(value.len());
        for ch in value.chars().flat_map(char::to_lowercase) {
            let mapped = match ch {
                'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
                'é' | 'è' | 'ê' | 'ë' => 'e',
                'í' | 'ì' | 'î' | 'ï' => 'i',
                'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
                'ú' | 'ù' | 'û' | 'ü' => 'u',
                'ñ' => 'n',
                'ç' => 'c',
                c if c.is_alphanumeric() || c.is_whitespace() => c,
                _ => continue,
            };
            folded.push(mapped);
        }
        folded.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl TermMatcher for AccentFoldingMatcher {
    fn matches(&self, haystack: &str, needle: &str) -> bool {
        let needle = Self::fold(needle);
        if needle.is_empty() {
            return false;
        }
        Self::fold(haystack).contains(&needle)
    }
}
