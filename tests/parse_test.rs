use song_brand_service::parse::parse_user_message;

// ===== Marker-based parsing =====

#[test]
fn test_parse_with_markers() {
    let (prompt, lyrics) = parse_user_message("PROMPT: hello world\nLYRICS: la la la");
    assert_eq!(prompt, "hello world");
    assert_eq!(lyrics, "la la la");
}

#[test]
fn test_parse_markers_are_case_insensitive() {
    let (prompt, lyrics) = parse_user_message("prompt: hello world\nlyrics: la la la");
    assert_eq!(prompt, "hello world");
    assert_eq!(lyrics, "la la la");

    let (prompt, lyrics) = parse_user_message("Prompt:hello\nLyRiCs:  la la");
    assert_eq!(prompt, "hello");
    assert_eq!(lyrics, "la la");
}

#[test]
fn test_parse_reversed_marker_order() {
    // The earlier marker delimits the prompt regardless of which one it is.
    let (prompt, lyrics) = parse_user_message("LYRICS: la la\nPROMPT: hello");
    assert_eq!(prompt, "la la");
    assert_eq!(lyrics, "hello");
}

#[test]
fn test_parse_trims_surrounding_whitespace() {
    let (prompt, lyrics) = parse_user_message("PROMPT:   spaced out  \n\nLYRICS:\n  verse one  ");
    assert_eq!(prompt, "spaced out");
    assert_eq!(lyrics, "verse one");
}

#[test]
fn test_parse_multiline_lyrics() {
    let (prompt, lyrics) =
        parse_user_message("PROMPT: desert song\nLYRICS: line one\nline two\nline three");
    assert_eq!(prompt, "desert song");
    assert_eq!(lyrics, "line one\nline two\nline three");
}

// ===== Fallback parsing =====

#[test]
fn test_parse_fallback_first_line_is_prompt() {
    let (prompt, lyrics) = parse_user_message("Just a line\nSecond line\nThird");
    assert_eq!(prompt, "Just a line");
    assert_eq!(lyrics, "Second line\nThird");
}

#[test]
fn test_parse_fallback_skips_blank_lines() {
    let (prompt, lyrics) = parse_user_message("\n\n  First  \n\nSecond\n\n\nThird\n");
    assert_eq!(prompt, "First");
    assert_eq!(lyrics, "Second\nThird");
}

#[test]
fn test_parse_single_marker_uses_fallback() {
    // One marker alone is not enough; the line-based fallback applies.
    let (prompt, lyrics) = parse_user_message("PROMPT: hello");
    assert_eq!(prompt, "PROMPT: hello");
    assert_eq!(lyrics, "");
}

#[test]
fn test_parse_empty_input() {
    assert_eq!(parse_user_message(""), (String::new(), String::new()));
    assert_eq!(parse_user_message("   \n  \n"), (String::new(), String::new()));
}

#[test]
fn test_parse_single_line() {
    let (prompt, lyrics) = parse_user_message("only one line");
    assert_eq!(prompt, "only one line");
    assert_eq!(lyrics, "");
}
