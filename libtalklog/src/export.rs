//! Clipboard export for posts
//!
//! Converts a post into the pair of strings a rich-text clipboard write
//! needs: an HTML fragment for paste into an external blog editor and a
//! plain-text fallback. Rendering is deterministic and never touches the
//! input; the actual OS clipboard write is the caller's job.

use crate::types::{BlockKind, Post};

/// Both clipboard representations of a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub html: String,
    pub text: String,
}

/// Render both clipboard representations
pub fn render(post: &Post) -> ClipboardPayload {
    ClipboardPayload {
        html: render_html(post),
        text: render_text(post),
    }
}

/// Render the HTML fragment
///
/// Output shape: a `<div>` container; the title as an `<h2>` (omitted when
/// empty); each block as fixed markup with a `<p><br></p>` spacer after
/// every block; tags last as one line of `#tag` tokens in tag order.
pub fn render_html(post: &Post) -> String {
    let mut html = String::from("<div>");

    if !post.title.is_empty() {
        html.push_str("<h2>");
        html.push_str(&escape_html(&post.title));
        html.push_str("</h2>");
    }

    for block in &post.content {
        match block.kind {
            BlockKind::Text => {
                html.push_str("<p>");
                html.push_str(&escape_html(&block.value).replace('\n', "<br>"));
                html.push_str("</p>");
            }
            BlockKind::Image => {
                html.push_str("<p style=\"text-align: center;\"><img src=\"");
                html.push_str(&escape_html(&block.value));
                html.push_str("\"></p>");
            }
            BlockKind::Quote => {
                html.push_str("<blockquote style=\"text-align: center;\">\u{201c}");
                html.push_str(&escape_html(&block.value).replace('\n', "<br>"));
                html.push_str("\u{201d}</blockquote>");
            }
            BlockKind::Divider => {
                html.push_str("<hr>");
            }
        }
        html.push_str("<p><br></p>");
    }

    if !post.tags.is_empty() {
        let line = post
            .tags
            .iter()
            .map(|t| format!("#{}", escape_html(t)))
            .collect::<Vec<_>>()
            .join(" ");
        html.push_str("<p>");
        html.push_str(&line);
        html.push_str("</p>");
    }

    html.push_str("</div>");
    html
}

/// Render the plain-text fallback
///
/// Title, a blank line, then each text and quote value joined by a blank
/// line. Images, dividers and tags contribute nothing.
pub fn render_text(post: &Post) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if !post.title.is_empty() {
        parts.push(&post.title);
    }
    for block in &post.content {
        match block.kind {
            BlockKind::Text | BlockKind::Quote => parts.push(&block.value),
            BlockKind::Image | BlockKind::Divider => {}
        }
    }

    parts.join("\n\n")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Block;

    fn fixture_post() -> Post {
        Post {
            title: "Hi".to_string(),
            content: vec![Block::with_value(BlockKind::Text, "line1\nline2")],
            tags: vec!["a".to_string(), "b".to_string()],
        }
    }

    #[test]
    fn test_plain_text_fixture() {
        assert_eq!(render_text(&fixture_post()), "Hi\n\nline1\nline2");
    }

    #[test]
    fn test_html_fixture() {
        let html = render_html(&fixture_post());

        assert_eq!(
            html,
            "<div><h2>Hi</h2><p>line1<br>line2</p><p><br></p><p>#a #b</p></div>"
        );
    }

    #[test]
    fn test_render_is_idempotent_and_pure() {
        let post = fixture_post();
        let before = post.clone();

        let first = render(&post);
        let second = render(&post);

        assert_eq!(first, second);
        assert_eq!(post, before);
    }

    #[test]
    fn test_every_block_kind_markup() {
        let post = Post {
            title: String::new(),
            content: vec![
                Block::with_value(BlockKind::Text, "body"),
                Block::with_value(BlockKind::Image, "https://example.com/a.jpg"),
                Block::with_value(BlockKind::Quote, "wisdom"),
                Block::with_value(BlockKind::Divider, ""),
            ],
            tags: vec![],
        };

        let html = render_html(&post);

        assert_eq!(
            html,
            "<div>\
             <p>body</p><p><br></p>\
             <p style=\"text-align: center;\"><img src=\"https://example.com/a.jpg\"></p><p><br></p>\
             <blockquote style=\"text-align: center;\">\u{201c}wisdom\u{201d}</blockquote><p><br></p>\
             <hr><p><br></p>\
             </div>"
        );
    }

    #[test]
    fn test_empty_title_omits_heading() {
        let post = Post::new();
        assert_eq!(render_html(&post), "<div></div>");
        assert_eq!(render_text(&post), "");
    }

    #[test]
    fn test_images_and_dividers_absent_from_plain_text() {
        let post = Post {
            title: "T".to_string(),
            content: vec![
                Block::with_value(BlockKind::Image, "https://example.com/a.jpg"),
                Block::with_value(BlockKind::Text, "para"),
                Block::with_value(BlockKind::Divider, ""),
                Block::with_value(BlockKind::Quote, "said"),
            ],
            tags: vec!["x".to_string()],
        };

        assert_eq!(render_text(&post), "T\n\npara\n\nsaid");
    }

    #[test]
    fn test_html_escaping() {
        let post = Post {
            title: "a & b".to_string(),
            content: vec![Block::with_value(BlockKind::Text, "1 < 2 > 0 \"q\"")],
            tags: vec![],
        };

        let html = render_html(&post);

        assert!(html.contains("<h2>a &amp; b</h2>"));
        assert!(html.contains("<p>1 &lt; 2 &gt; 0 &quot;q&quot;</p>"));
    }

    #[test]
    fn test_tag_order_preserved() {
        let post = Post::new().add_tag("zz").add_tag("aa");
        let html = render_html(&post);

        assert!(html.contains("<p>#zz #aa</p>"));
    }
}
