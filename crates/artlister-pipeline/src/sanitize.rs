//! Strip markdown code fences from model output
//!
//! Models often wrap JSON in a fenced block even when told not to. This
//! only removes the fence markers; it never looks at the JSON itself.

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Remove a surrounding ```` ```json ```` / ```` ``` ```` fence and whitespace.
///
/// The strip pass repeats until the text stops changing, which makes the
/// function idempotent: `sanitize_response(&sanitize_response(t)) == sanitize_response(t)`.
pub fn sanitize_response(raw: &str) -> String {
    let mut current = raw.trim();
    loop {
        let next = strip_once(current);
        if next == current {
            return next.to_string();
        }
        current = next;
    }
}

fn strip_once(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix(JSON_FENCE) {
        text = rest;
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        text = rest;
    }

    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_json_fence() {
        assert_eq!(sanitize_response("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_unlabeled_fence() {
        assert_eq!(sanitize_response("```\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(sanitize_response("  \n```json\n{}\n```\n\n"), "{}");
    }

    #[test]
    fn test_clean_text_unchanged() {
        let clean = r#"{"场景道具清单": []}"#;
        assert_eq!(sanitize_response(clean), clean);
    }

    #[test]
    fn test_only_closing_fence() {
        assert_eq!(sanitize_response("{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_malformed_content_passes_through() {
        assert_eq!(sanitize_response("```json\n{not valid json\n```"), "{not valid json");
    }

    #[test]
    fn test_nested_fences_settle() {
        let once = sanitize_response("```json\n```json x```");
        assert_eq!(once, "x");
        assert_eq!(sanitize_response(&once), once);
    }

    #[test]
    fn test_bare_fences() {
        assert_eq!(sanitize_response("``````"), "");
        assert_eq!(sanitize_response("```"), "");
    }

    proptest! {
        #[test]
        fn prop_idempotent(text in ".*") {
            let once = sanitize_response(&text);
            prop_assert_eq!(sanitize_response(&once), once.clone());
        }

        #[test]
        fn prop_idempotent_on_fenced(body in "[ -~\n]{0,40}", tag in prop::sample::select(vec!["```json", "```", ""])) {
            let text = format!("{}\n{}\n```", tag, body);
            let once = sanitize_response(&text);
            prop_assert_eq!(sanitize_response(&once), once.clone());
        }

        #[test]
        fn prop_no_surrounding_whitespace(text in "\\PC*") {
            let out = sanitize_response(&text);
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}
