//! Rendering of payment instructions for emails and the thank-you page.
//!
//! The merchant's instructions text is stored as plain text with blank lines
//! separating paragraphs. For HTML output it is escaped and wrapped in
//! paragraph tags; for plain-text emails it is passed through trimmed.

/// Renders the instructions text for the requested email format.
///
/// HTML output escapes markup in the source text, wraps blank-line-separated
/// blocks in `<p>` tags and turns remaining single newlines into `<br />`.
/// Plain-text output is the trimmed source followed by a newline.
///
/// # Examples
///
/// ```
/// use glin_gateway::email::render_instructions;
///
/// let html = render_instructions("Pay within 3 days.\n\nQuestions? Reply here.", false);
/// assert_eq!(html, "<p>Pay within 3 days.</p>\n<p>Questions? Reply here.</p>\n");
///
/// let plain = render_instructions("Pay within 3 days.", true);
/// assert_eq!(plain, "Pay within 3 days.\n");
/// ```
pub fn render_instructions(instructions: &str, plain_text: bool) -> String {
    if plain_text {
        return format!("{}\n", instructions.trim());
    }

    let escaped = escape_html(instructions.trim());
    let paragraphs: Vec<String> = escaped
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| format!("<p>{}</p>", block.replace('\n', "<br />\n")))
        .collect();

    let mut rendered = paragraphs.join("\n");
    rendered.push('\n');
    rendered
}

/// Escapes the characters that would change meaning in HTML output.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
