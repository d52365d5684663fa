use std::sync::LazyLock;

use regex::Regex;

static PROMPT_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)PROMPT:\s*").unwrap());
static LYRICS_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)LYRICS:\s*").unwrap());

/// Split a user message into `(prompt, lyrics)`.
///
/// Looks for `PROMPT:` and `LYRICS:` markers (any case, either order). When
/// both are present, the prompt is the text between the earlier marker's end
/// and the later marker's start, and the lyrics are everything after the later
/// marker. Without both markers, the first non-blank line becomes the prompt
/// and the remaining non-blank lines become the lyrics.
pub fn parse_user_message(text: &str) -> (String, String) {
    if let (Some(prompt_m), Some(lyrics_m)) = (PROMPT_MARKER.find(text), LYRICS_MARKER.find(text)) {
        let (first, second) = if prompt_m.end() <= lyrics_m.end() {
            (prompt_m, lyrics_m)
        } else {
            (lyrics_m, prompt_m)
        };
        let prompt = text[first.end()..second.start()].trim().to_string();
        let lyrics = text[second.end()..].trim().to_string();
        return (prompt, lyrics);
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    match lines.split_first() {
        Some((prompt, rest)) => (prompt.to_string(), rest.join("\n")),
        None => (String::new(), String::new()),
    }
}
