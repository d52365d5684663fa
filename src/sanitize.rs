/// Fallback title when sanitization strips everything away.
pub const UNTITLED: &str = "Untitled";

const QUOTE_GLYPHS: [char; 6] = ['"', '\'', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'];

/// Reduce a raw model title to a clean 1-2 word form. Never returns an empty
/// string; hopeless input becomes `"Untitled"`.
pub fn sanitize_title(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !QUOTE_GLYPHS.contains(c) && !c.is_ascii_punctuation())
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return UNTITLED.to_string();
    }

    let words: Vec<&str> = cleaned.split(' ').collect();
    if words.len() <= 2 {
        return cleaned;
    }

    // Keep the two longest words (earlier word wins a length tie), then put
    // them back in reading order.
    let mut ranked: Vec<(usize, &str)> = words.iter().copied().enumerate().collect();
    ranked.sort_by_key(|&(index, word)| (std::cmp::Reverse(word.chars().count()), index));
    let mut chosen: Vec<(usize, &str)> = ranked.into_iter().take(2).collect();
    chosen.sort_by_key(|&(index, _)| index);
    chosen
        .into_iter()
        .map(|(_, word)| word)
        .collect::<Vec<_>>()
        .join(" ")
}
