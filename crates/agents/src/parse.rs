/// Extracts a JSON value from raw agent text.
///
/// Agents are instructed to answer with bare JSON but routinely wrap it in
/// markdown fences or prose. Tries, in order: the whole text, the first
/// ```json fenced block, and the outermost `{...}` span.
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    let text = text.trim();
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }
    if let Some(block) = fenced_block(text) {
        if let Ok(value) = serde_json::from_str(block) {
            return Some(value);
        }
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start < end {
        serde_json::from_str(&text[start..=end]).ok()
    } else {
        None
    }
}

/// The contents of the first ``` fence, tolerating a `json` language tag.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after = &text[open + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    let close = after.find("```")?;
    Some(after[..close].trim())
}
