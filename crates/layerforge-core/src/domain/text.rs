//! Text normalization and identifier casing.
//!
//! Every matcher in the domain works on *normalized* text:
//!
//! - Unicode NFD decomposition with combining marks dropped (`botão` → `botao`)
//! - Lowercase conversion
//! - Anything that is not alphanumeric becomes a space
//! - Whitespace collapsed to single spaces, trimmed
//!
//! The casing helpers turn concepts (`user profile`, `user-profile`,
//! `UserProfile`) into the identifier styles the templates need.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Normalize free text for keyword matching.
///
/// ```
/// use layerforge_core::domain::text::normalize;
///
/// assert_eq!(normalize("Um Botão, simples!"), "um botao simples");
/// assert_eq!(normalize("  modal de confirmação  "), "modal de confirmacao");
/// ```
pub fn normalize(input: &str) -> String {
    let stripped: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokens of the normalized text.
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// Whole-word (or whole-phrase) containment on normalized text.
///
/// `contains_word("um botao simples", "botao")` is true;
/// `contains_word("vantagem", "tag")` is false.
pub fn contains_word(normalized: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    let haystack = format!(" {normalized} ");
    let needle = format!(" {phrase} ");
    haystack.contains(&needle)
}

/// Length of the common prefix of two ASCII-ish words, in chars.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Convert to kebab-case (`UserProfile` → `user-profile`).
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert to snake_case (`user-profile` → `user_profile`).
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert to SCREAMING_SNAKE_CASE (`user-profile` → `USER_PROFILE`).
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Convert to PascalCase (`user-profile` → `UserProfile`).
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert to camelCase (`user-profile` → `userProfile`).
pub fn to_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::new();
    for (i, w) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(w);
        } else {
            out.push_str(&capitalize(w));
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lowercase words based on casing and separators.
///
/// Handles `snake_case`, `kebab-case`, `camelCase`, `PascalCase`, acronyms
/// (`HTTPRequest` → `http`, `request`) and plain spaced words.
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // camelCase: "myApp" → "my" + "App"
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // Acronym boundary: "HTTPServer" → "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_diacritics_and_punctuation() {
        assert_eq!(normalize("Tela de Depósito, na Carteira."), "tela de deposito na carteira");
        assert_eq!(normalize("ícone---grande"), "icone grande");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn contains_word_respects_boundaries() {
        assert!(contains_word("um botao simples", "botao"));
        assert!(contains_word("barra de busca", "barra de busca"));
        assert!(!contains_word("vantagem", "tag"));
        assert!(!contains_word("abc", ""));
    }

    #[test]
    fn casing_variants() {
        assert_eq!(to_kebab_case("UserProfile"), "user-profile");
        assert_eq!(to_pascal_case("user-profile"), "UserProfile");
        assert_eq!(to_camel_case("user-profile"), "userProfile");
        assert_eq!(to_snake_case("user profile"), "user_profile");
        assert_eq!(to_screaming_snake_case("wallet-deposit"), "WALLET_DEPOSIT");
        assert_eq!(to_kebab_case("HTTPRequest"), "http-request");
    }

    #[test]
    fn prefix_length() {
        assert_eq!(common_prefix_len("confirmacao", "confirm"), 7);
        assert_eq!(common_prefix_len("abc", "xyz"), 0);
    }
}
