use ammonia::{Builder, UrlRelative};

/// Strips scripts, event handlers and unsafe URLs from backend-supplied HTML
/// before it is handed to a view.
pub fn sanitize_html(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::PassThrough)
        .clean(content)
        .to_string()
}

/// Plain-text preview of HTML content, cut on a word boundary.
pub fn text_excerpt(content: &str, max_chars: usize) -> String {
    let stripped = Builder::empty().clean(content).to_string();
    let text = stripped
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&nbsp;", " ");
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut excerpt = String::new();
    for word in words {
        let extra = if excerpt.is_empty() { word.chars().count() } else { word.chars().count() + 1 };
        if excerpt.chars().count() + extra > max_chars {
            excerpt.push('…');
            return excerpt;
        }
        if !excerpt.is_empty() {
            excerpt.push(' ');
        }
        excerpt.push_str(word);
    }
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_scripts_and_handlers() {
        let dirty = r#"<p onclick="steal()">Hi</p><script>alert(1)</script><a href="javascript:x()">x</a>"#;
        let clean = sanitize_html(dirty);
        assert!(!clean.contains("script"));
        assert!(!clean.contains("onclick"));
        assert!(!clean.contains("javascript:"));
        assert!(clean.contains("<p>Hi</p>"));
    }

    #[test]
    fn keeps_relative_links_with_safe_rel() {
        let clean = sanitize_html(r#"<a href="/blog/other">other</a>"#);
        assert!(clean.contains(r#"href="/blog/other""#));
        assert!(clean.contains("noopener"));
    }

    #[test]
    fn excerpt_cuts_on_word_boundary() {
        let excerpt = text_excerpt("<p>Rust makes <b>fearless</b> concurrency practical</p>", 20);
        assert_eq!(excerpt, "Rust makes fearless…");
    }
}
