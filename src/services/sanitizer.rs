// src/services/sanitizer.rs
use std::sync::LazyLock;

use regex::Regex;

// Narrated actions such as `*mueve la cola*`. Shortest span, same line only.
static ACTION_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*.*?\*").unwrap());

// Pictographs and emoji, U+1F300..=U+1FAFF.
static PICTOGRAPHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{1F300}-\x{1FAFF}]").unwrap());

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[<>#_`|]").unwrap());

/// Strip role-play actions, emoji and markup characters from a model reply.
///
/// Interior whitespace is left alone, only the ends are trimmed.
pub fn sanitize(text: &str) -> String {
    let text = ACTION_SPAN.replace_all(text, "");
    let text = PICTOGRAPHS.replace_all(&text, "");
    let text = MARKUP.replace_all(&text, "");
    text.trim().to_string()
}
