//! Integration tests for the tag-soup parser.

use wombat_dom::{Document, NodeId};
use wombat_html::{Content, DomParser, Options, ParseError};

/// Parses `html` with the given configuration.
fn parse_with(html: &str, options: Options) -> Document {
    let parser = DomParser::new(options);
    let mut content = Content::new(html);
    parser.parse(&mut content, html.len()).unwrap()
}

/// Parses `html` with the defaults.
fn parse(html: &str) -> Document {
    parse_with(html, Options::default())
}

/// The tag names of `parent`'s children, in order.
fn child_names(document: &Document, parent: NodeId) -> Vec<String> {
    document
        .children(parent)
        .unwrap()
        .into_iter()
        .map(|id| document.tag_name(id).unwrap().to_owned())
        .collect()
}

/// Pre-order (tag name, attribute pairs) of everything below `start`.
fn structure(document: &Document, start: NodeId) -> Vec<(String, Vec<(String, Option<String>)>)> {
    document
        .descendants(start)
        .map(|id| {
            let name = document.tag_name(id).unwrap_or("").to_owned();
            let attrs = document
                .tag(id)
                .map(|tag| {
                    tag.attributes()
                        .iter()
                        .map(|(key, attribute)| (key.clone(), attribute.value.clone()))
                        .collect()
                })
                .unwrap_or_default();
            (name, attrs)
        })
        .collect()
}

// ========== Basic structure ==========

#[test]
fn test_nested_elements_and_text() {
    let document = parse("<div id=\"a\"><p class=\"x y\">hi</p></div>");
    let root = document.root();
    assert_eq!(document.count_children(root), 1);
    let div = document.first_child(root).unwrap();
    assert_eq!(document.tag_name(div), Some("div"));
    assert_eq!(document.attribute(div, "id"), Some("a"));
    let p = document.first_child(div).unwrap();
    assert_eq!(document.attribute(p, "class"), Some("x y"));
    assert_eq!(document.text(p).unwrap(), "hi");
}

#[test]
fn test_void_element_does_not_swallow_siblings() {
    let document = parse("<br><p>text</p>");
    assert_eq!(child_names(&document, document.root()), ["br", "p"]);
    let p = document.last_child(document.root()).unwrap();
    assert_eq!(document.text(p).unwrap(), "text");
}

#[test]
fn test_tag_names_lowercase_but_values_keep_case() {
    let document = parse("<DIV CLASS=\"Big\">x</DIV>");
    let div = document.first_child(document.root()).unwrap();
    assert_eq!(document.tag_name(div), Some("div"));
    assert_eq!(document.attribute(div, "class"), Some("Big"));
    assert_eq!(document.count_children(div), 1);
}

#[test]
fn test_attribute_quoting_forms() {
    let document = parse("<a href=\"/x\" title='hi' data-n=3 download>go</a>");
    let a = document.first_child(document.root()).unwrap();
    let tag = document.tag(a).unwrap();
    assert_eq!(tag.attribute_value("href"), Some("/x"));
    assert_eq!(tag.attribute_value("title"), Some("hi"));
    assert_eq!(tag.attribute_value("data-n"), Some("3"));
    assert!(tag.has_attribute("download"));
    assert_eq!(tag.attribute("download").unwrap().value, None);
    // Bare values re-render double-quoted; the rest keep their style.
    assert_eq!(
        tag.opening_markup(),
        "<a href=\"/x\" title='hi' data-n=\"3\" download>"
    );
}

#[test]
fn test_blanks_around_attributes_are_tolerated() {
    let document = parse("<a  href = \"x\"   rel = 'y' >go</a>");
    let a = document.first_child(document.root()).unwrap();
    assert_eq!(document.attribute(a, "href"), Some("x"));
    assert_eq!(document.attribute(a, "rel"), Some("y"));
    assert_eq!(document.text(a).unwrap(), "go");
}

#[test]
fn test_repeated_attribute_keeps_the_last_value() {
    let document = parse("<a href=\"one\" href=\"two\">x</a>");
    let a = document.first_child(document.root()).unwrap();
    assert_eq!(document.attribute(a, "href"), Some("two"));
    assert_eq!(document.tag(a).unwrap().attributes().len(), 1);
}

#[test]
fn test_trailing_slash_closes_any_element() {
    let document = parse("<widget />after");
    let root = document.root();
    assert_eq!(document.count_children(root), 2);
    let widget = document.first_child(root).unwrap();
    let tag = document.tag(widget).unwrap();
    assert!(tag.is_self_closing());
    assert!(tag.has_trailing_slash());
    assert!(!document.has_children(widget));
    assert_eq!(document.text(root).unwrap(), "after");
}

// ========== Recovery ==========

#[test]
fn test_unclosed_elements_close_at_end_of_input() {
    let document = parse("<div><p>one");
    let div = document.first_child(document.root()).unwrap();
    let p = document.first_child(div).unwrap();
    assert_eq!(document.tag_name(p), Some("p"));
    assert_eq!(document.text(p).unwrap(), "one");
}

#[test]
fn test_mismatched_closer_pops_the_inner_elements() {
    let document = parse("<div><b><i>x</div>y");
    let root = document.root();
    assert_eq!(child_names(&document, root), ["div", "text"]);
    assert_eq!(document.text(root).unwrap(), "y");
    let div = document.first_child(root).unwrap();
    let b = document.first_child(div).unwrap();
    let i = document.first_child(b).unwrap();
    assert_eq!(document.tag_name(i), Some("i"));
    assert_eq!(document.text(i).unwrap(), "x");
}

#[test]
fn test_orphan_closer_is_discarded() {
    let document = parse("a</b>c");
    let root = document.root();
    assert_eq!(child_names(&document, root), ["text", "text"]);
    assert_eq!(document.text(root).unwrap(), "ac");
}

#[test]
fn test_stray_angle_bracket_is_text() {
    let document = parse("a < b");
    let root = document.root();
    assert_eq!(child_names(&document, root), ["text", "text"]);
    assert_eq!(document.text(root).unwrap(), "a < b");
}

#[test]
fn test_comments_and_declarations_are_discarded() {
    let document = parse("<!DOCTYPE html><!-- note --><p>x</p>");
    assert_eq!(child_names(&document, document.root()), ["p"]);
}

#[test]
fn test_unterminated_comment_consumes_the_rest() {
    let document = parse("<p>a</p><!-- open");
    assert_eq!(child_names(&document, document.root()), ["p"]);
}

#[test]
fn test_unterminated_tag_becomes_text() {
    let document = parse("<a href=\"x");
    let root = document.root();
    assert_eq!(child_names(&document, root), ["text"]);
    assert_eq!(document.text(root).unwrap(), "<a href=\"x");
}

#[test]
fn test_closer_with_junk_still_closes() {
    let document = parse("<b>x</b attr=\"y\"><i>z</i>");
    assert_eq!(child_names(&document, document.root()), ["b", "i"]);
}

// ========== Text handling ==========

#[test]
fn test_whitespace_only_nodes_follow_the_option() {
    let kept = parse("<b>x</b>   <i>y</i>");
    assert_eq!(child_names(&kept, kept.root()), ["b", "text", "i"]);
    let dropped = parse_with(
        "<b>x</b>   <i>y</i>",
        Options::default().with_whitespace_text_nodes(false),
    );
    assert_eq!(child_names(&dropped, dropped.root()), ["b", "i"]);
}

#[test]
fn test_double_space_collapse_follows_the_option() {
    let collapsed = parse("<p>a   b</p>");
    let p = collapsed.first_child(collapsed.root()).unwrap();
    assert_eq!(collapsed.text(p).unwrap(), "a b");
    let kept = parse_with(
        "<p>a   b</p>",
        Options::default().with_remove_double_space(false),
    );
    let p = kept.first_child(kept.root()).unwrap();
    assert_eq!(kept.text(p).unwrap(), "a   b");
}

#[test]
fn test_newline_entity_is_restored_in_text() {
    let document = parse("<p>line&#10;break</p>");
    let p = document.first_child(document.root()).unwrap();
    assert_eq!(document.text(p).unwrap(), "line\nbreak");
}

#[test]
fn test_special_chars_decode_applies_to_text_and_attributes() {
    let document = parse_with(
        "<a title=\"a &amp; b\">x &lt; y</a>",
        Options::default().with_special_chars_decode(true),
    );
    let a = document.first_child(document.root()).unwrap();
    assert_eq!(document.attribute(a, "title"), Some("a & b"));
    assert_eq!(document.text(a).unwrap(), "x < y");
}

// ========== Raw text ==========

#[test]
fn test_script_content_is_not_parsed() {
    let document = parse("<script>if (a < b) { tag(\"</b>\"); }</script><p>x</p>");
    assert_eq!(child_names(&document, document.root()), ["script", "p"]);
    let script = document.first_child(document.root()).unwrap();
    assert_eq!(
        document.text(script).unwrap(),
        "if (a < b) { tag(\"</b>\"); }"
    );
}

#[test]
fn test_raw_text_closer_is_case_insensitive() {
    let document = parse("<style>b{}</STYLE><i>x</i>");
    assert_eq!(child_names(&document, document.root()), ["style", "i"]);
    let style = document.first_child(document.root()).unwrap();
    assert_eq!(document.text(style).unwrap(), "b{}");
}

#[test]
fn test_raw_text_closer_tolerates_trailing_blanks() {
    let document = parse("<script>go()</script  ><i>x</i>");
    assert_eq!(child_names(&document, document.root()), ["script", "i"]);
}

#[test]
fn test_unclosed_raw_text_runs_to_the_end() {
    let document = parse("<script>var a = 1;");
    let script = document.first_child(document.root()).unwrap();
    assert_eq!(document.text(script).unwrap(), "var a = 1;");
}

#[test]
fn test_raw_text_element_keeps_its_attributes() {
    let document = parse("<script src=\"app.js\">code()</script>");
    let script = document.first_child(document.root()).unwrap();
    assert_eq!(document.attribute(script, "src"), Some("app.js"));
    assert_eq!(document.text(script).unwrap(), "code()");
}

// ========== Strict mode ==========

#[test]
fn test_strict_accepts_well_formed_markup() {
    let parser = DomParser::new(Options::default().with_strict(true));
    let mut content = Content::new("<div><p>x</p></div>");
    assert!(parser.parse(&mut content, 19).is_ok());
}

#[test]
fn test_strict_rejects_an_unterminated_value() {
    let parser = DomParser::new(Options::default().with_strict(true));
    let mut content = Content::new("<a href=\"x");
    let err = parser.parse(&mut content, 10).unwrap_err();
    match err {
        ParseError::Strict { reason, .. } => assert!(reason.contains("href")),
        other => panic!("expected a strict failure, got {other:?}"),
    }
}

#[test]
fn test_strict_reports_the_first_unclosed_element() {
    let parser = DomParser::new(Options::default().with_strict(true));
    let mut content = Content::new("<div><p>x</p>");
    let err = parser.parse(&mut content, 13).unwrap_err();
    match err {
        ParseError::Strict { reason, .. } => assert!(reason.contains("div")),
        other => panic!("expected a strict failure, got {other:?}"),
    }
}

// ========== Round trips ==========

#[test]
fn test_render_and_reparse_preserve_the_structure() {
    let source = "<div id=\"a\"><br><p class='x'>hi</p></div>";
    let first = parse(source);
    let rendered = first.inner_markup(first.root()).unwrap();
    assert_eq!(rendered, source);
    let second = parse(&rendered);
    assert_eq!(
        structure(&first, first.root()),
        structure(&second, second.root())
    );
}

#[test]
fn test_reparse_is_stable_after_repairs() {
    // The first pass repairs the soup; rendering that tree and parsing it
    // again must reproduce the same structure.
    let first = parse("<div><b><i>x</div><br>y");
    let rendered = first.inner_markup(first.root()).unwrap();
    let second = parse(&rendered);
    assert_eq!(
        structure(&first, first.root()),
        structure(&second, second.root())
    );
}
