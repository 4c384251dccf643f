//! HTML rendering of editor nodes and marks.
//!
//! Known node and mark types map to fixed tags; anything else is delegated,
//! which for nodes means the children are emitted without a wrapper and for
//! marks means the text is left as is.

use serde_json::{Map, Value as JsonValue};

use inkpad_core::{BlockType, DocumentSnapshot, MarkType};

/// Per-node render state supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeState {
    /// The node holds the selection (images show a highlight).
    pub focused: bool,
    /// The node is the list item under the caret.
    pub current_item: bool,
}

/// Render a node of `node_type` around already-rendered `children`.
///
/// Returns `None` for types the editor does not render itself.
pub fn render_node(
    node_type: &str,
    data: &Map<String, JsonValue>,
    children: &str,
    state: NodeState,
) -> Option<String> {
    let block: BlockType = node_type.parse().ok()?;
    let html = match block {
        BlockType::Paragraph => format!("<p>{}</p>", children),
        BlockType::BlockQuote => format!("<blockquote>{}</blockquote>", children),
        BlockType::UlList => format!("<ul>{}</ul>", children),
        BlockType::OlList => format!("<ol>{}</ol>", children),
        BlockType::HeadingOne => format!("<h1>{}</h1>", children),
        BlockType::HeadingTwo => format!("<h2>{}</h2>", children),
        BlockType::ListItem if state.current_item => format!(
            "<li class=\"current-item\" title=\"current item\">{}</li>",
            children
        ),
        BlockType::ListItem => format!("<li>{}</li>", children),
        BlockType::Link => {
            let href = data.get("href").and_then(JsonValue::as_str).unwrap_or("");
            format!("<a href=\"{}\">{}</a>", html_escape(href), children)
        }
        BlockType::Image => {
            let src = data.get("src").and_then(JsonValue::as_str).unwrap_or("");
            if state.focused {
                format!("<img src=\"{}\" class=\"selected\">", html_escape(src))
            } else {
                format!("<img src=\"{}\">", html_escape(src))
            }
        }
    };
    Some(html)
}

/// Wrap `text` in the tag for `mark_type`, or `None` if the mark is unknown.
pub fn render_mark(mark_type: &str, text: &str) -> Option<String> {
    let tag = match mark_type.parse::<MarkType>().ok()? {
        MarkType::Bold => "strong",
        MarkType::Italic => "em",
        MarkType::Underlined => "u",
        MarkType::Code => "code",
    };
    Some(format!("<{tag}>{text}</{tag}>"))
}

/// Render a whole snapshot.
///
/// Accepts `{"document": {"nodes": [...]}}` or a bare `{"nodes": [...]}`.
/// Text nodes carry either `text` and `marks`, or a `leaves` array of such
/// ranges.
pub fn render_document(snapshot: &DocumentSnapshot) -> String {
    let root = snapshot.as_value();
    let root = root.get("document").unwrap_or(root);
    render_children(root)
}

fn render_children(node: &JsonValue) -> String {
    node.get("nodes")
        .and_then(JsonValue::as_array)
        .map(|nodes| nodes.iter().map(render_json_node).collect())
        .unwrap_or_default()
}

fn render_json_node(node: &JsonValue) -> String {
    match node.get("object").and_then(JsonValue::as_str) {
        Some("text") => render_text(node),
        _ => {
            let children = render_children(node);
            let node_type = node.get("type").and_then(JsonValue::as_str).unwrap_or("");
            let empty = Map::new();
            let data = node
                .get("data")
                .and_then(JsonValue::as_object)
                .unwrap_or(&empty);
            render_node(node_type, data, &children, NodeState::default()).unwrap_or(children)
        }
    }
}

fn render_text(node: &JsonValue) -> String {
    match node.get("leaves").and_then(JsonValue::as_array) {
        Some(leaves) => leaves.iter().map(render_leaf).collect(),
        None => render_leaf(node),
    }
}

fn render_leaf(leaf: &JsonValue) -> String {
    let text = html_escape(leaf.get("text").and_then(JsonValue::as_str).unwrap_or(""));
    let marks = leaf
        .get("marks")
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    marks.iter().fold(text, |inner, mark| {
        let mark_type = mark
            .get("type")
            .and_then(JsonValue::as_str)
            .or_else(|| mark.as_str())
            .unwrap_or("");
        render_mark(mark_type, &inner).unwrap_or(inner)
    })
}

/// Simple HTML escaping for text and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_data() -> Map<String, JsonValue> {
        Map::new()
    }

    #[test]
    fn test_block_tags() {
        let cases = [
            ("paragraph", "<p>x</p>"),
            ("block-quote", "<blockquote>x</blockquote>"),
            ("ul_list", "<ul>x</ul>"),
            ("ol_list", "<ol>x</ol>"),
            ("heading-one", "<h1>x</h1>"),
            ("heading-two", "<h2>x</h2>"),
            ("list_item", "<li>x</li>"),
        ];
        for (node_type, expected) in cases {
            assert_eq!(
                render_node(node_type, &no_data(), "x", NodeState::default()).as_deref(),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_current_list_item() {
        let state = NodeState {
            current_item: true,
            ..NodeState::default()
        };
        assert_eq!(
            render_node("list_item", &no_data(), "x", state).unwrap(),
            "<li class=\"current-item\" title=\"current item\">x</li>"
        );
    }

    #[test]
    fn test_image_and_selected_image() {
        let data = json!({"src": "https://example.com/a.png"});
        let data = data.as_object().unwrap();
        assert_eq!(
            render_node("image", data, "", NodeState::default()).unwrap(),
            "<img src=\"https://example.com/a.png\">"
        );
        let focused = NodeState {
            focused: true,
            ..NodeState::default()
        };
        assert_eq!(
            render_node("image", data, "", focused).unwrap(),
            "<img src=\"https://example.com/a.png\" class=\"selected\">"
        );
    }

    #[test]
    fn test_link_href_is_escaped() {
        let data = json!({"href": "https://example.com/?a=1&b=\"2\""});
        assert_eq!(
            render_node("link", data.as_object().unwrap(), "go", NodeState::default()).unwrap(),
            "<a href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\">go</a>"
        );
    }

    #[test]
    fn test_unknown_node_is_delegated() {
        assert_eq!(
            render_node("table", &no_data(), "x", NodeState::default()),
            None
        );
    }

    #[test]
    fn test_mark_tags() {
        assert_eq!(render_mark("bold", "x").as_deref(), Some("<strong>x</strong>"));
        assert_eq!(render_mark("italic", "x").as_deref(), Some("<em>x</em>"));
        assert_eq!(render_mark("underlined", "x").as_deref(), Some("<u>x</u>"));
        assert_eq!(render_mark("code", "x").as_deref(), Some("<code>x</code>"));
        assert_eq!(render_mark("strikethrough", "x"), None);
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<a href='x'>&\"</a>"),
            "&lt;a href=&#39;x&#39;&gt;&amp;&quot;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_empty_document() {
        assert_eq!(render_document(&DocumentSnapshot::empty_document()), "<p></p>");
    }

    #[test]
    fn test_render_document_with_leaves_and_marks() {
        let snapshot = DocumentSnapshot::new(json!({
            "document": {"nodes": [
                {"object": "block", "type": "heading-one", "nodes": [
                    {"object": "text", "leaves": [
                        {"text": "Hello "},
                        {"text": "world", "marks": [{"type": "bold"}, {"type": "italic"}]}
                    ]}
                ]},
                {"object": "block", "type": "ul_list", "nodes": [
                    {"object": "block", "type": "list_item", "nodes": [
                        {"object": "text", "text": "a < b", "marks": [{"type": "code"}]}
                    ]}
                ]},
                {"object": "block", "type": "image", "data": {"src": "data:image/png;base64,AA=="}, "nodes": []}
            ]}
        }));

        assert_eq!(
            render_document(&snapshot),
            "<h1>Hello <em><strong>world</strong></em></h1>\
             <ul><li><code>a &lt; b</code></li></ul>\
             <img src=\"data:image/png;base64,AA==\">"
        );
    }

    #[test]
    fn test_render_unknown_types_keep_children() {
        let snapshot = DocumentSnapshot::new(json!({
            "nodes": [
                {"object": "block", "type": "table", "nodes": [
                    {"object": "text", "text": "cell", "marks": [{"type": "sparkle"}]}
                ]}
            ]
        }));
        assert_eq!(render_document(&snapshot), "cell");
    }

    #[test]
    fn test_render_non_document_value() {
        assert_eq!(render_document(&DocumentSnapshot::new(json!(42))), "");
    }
}
