//! Text normalization, tokenization, and snippet extraction for keyword search.

/// Words ignored when matching queries.
const STOPWORDS: &[&str] = &[
    "de", "la", "el", "en", "y", "los", "las", "del", "que", "por", "para", "con", "un", "una",
    "al", "se", "su", "lo", "es", "mi", "me", "como", "sobre", "cual", "cuales", "the", "of",
    "and",
];

/// Words kept on each side of the first match when building a snippet.
const SNIPPET_WORDS_BEFORE: usize = 8;
const SNIPPET_WORDS_AFTER: usize = 20;

/// Lowercase and strip Spanish diacritics so "Política" matches "politica".
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Split text into normalized search terms, dropping stopwords and
/// single-character fragments.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 1 && !STOPWORDS.contains(t))
        .map(String::from)
        .collect()
}

/// Distinct terms of a query, in first-seen order.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for token in tokenize(query) {
        if !terms.contains(&token) {
            terms.push(token);
        }
    }
    terms
}

/// Whether a document token satisfies a query term. Terms match as prefixes
/// so "vacacion" finds "vacaciones".
pub fn term_matches(token: &str, term: &str) -> bool {
    token.starts_with(term)
}

/// Build a short excerpt around the first word of `content` that matches one
/// of `terms`. Falls back to the opening words when nothing matches.
pub fn snippet(content: &str, terms: &[String]) -> String {
    let words: Vec<&str> = content.split_whitespace().collect();
    if words.is_empty() {
        return String::new();
    }

    let first_match = words.iter().position(|w| {
        tokenize(w)
            .iter()
            .any(|token| terms.iter().any(|t| term_matches(token, t)))
    });

    let (start, end) = match first_match {
        Some(i) => (
            i.saturating_sub(SNIPPET_WORDS_BEFORE),
            (i + SNIPPET_WORDS_AFTER).min(words.len()),
        ),
        None => (0, SNIPPET_WORDS_AFTER.min(words.len())),
    };

    let mut out = String::new();
    if start > 0 {
        out.push_str("… ");
    }
    out.push_str(&words[start..end].join(" "));
    if end < words.len() {
        out.push_str(" …");
    }
    out
}
