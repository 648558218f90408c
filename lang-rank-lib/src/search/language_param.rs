//! Encoding of language names and keywords into GitHub search qualifiers.

use url::form_urlencoded::byte_serialize;

/// Map a human-readable language name to the token GitHub's `language:` qualifier expects.
///
/// The name is lowercased, spaces become hyphens, `+` becomes `p`, and `#` becomes `sharp`,
/// so `Visual Basic` becomes `visual-basic`, `C++` becomes `cp`, and `F#` becomes `fsharp`.
#[must_use]
pub fn encode(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        match c {
            ' ' => token.push('-'),
            '+' => token.push('p'),
            '#' => token.push_str("sharp"),
            other => token.push(other),
        }
    }
    token
}

/// Build the `q` parameter for a repository search.
///
/// Multi-word keywords are joined with `+` ahead of the `language:` qualifier. Every component is
/// form-urlencoded so the result can be placed into a URL verbatim.
#[must_use]
pub fn search_query(keyword: Option<&str>, language_token: &str) -> String {
    let mut query = String::new();

    if let Some(keyword) = keyword {
        for word in keyword.split_whitespace() {
            query.extend(byte_serialize(word.as_bytes()));
            query.push('+');
        }
    }

    query.push_str("language:");
    query.extend(byte_serialize(language_token.as_bytes()));
    query
}
