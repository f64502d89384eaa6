//! Integration tests for the page facade: loading, querying and charset
//! detection.

use wombat_html::{Dom, Options};

fn load(html: &str) -> Dom {
    Dom::load_str(html, &Options::default()).unwrap()
}

// ========== Selector queries ==========

#[test]
fn test_find_matches_across_the_page() {
    let dom = load("<div id=\"a\"><p class=\"x y\">hi</p><p class=\"z\">lo</p></div>");
    assert_eq!(dom.find("div p").len(), 2);
    assert_eq!(dom.find("div > p.x").len(), 1);
    assert!(dom.find("p.q").is_empty());
    let p = dom.find_first("div > p.x").unwrap();
    assert_eq!(dom.document().text(p).unwrap(), "hi");
}

#[test]
fn test_find_nth_and_first() {
    let dom = load("<ul><li>a</li><li>b</li></ul>");
    let second = dom.find_nth("li", 1).unwrap();
    assert_eq!(dom.document().text(second).unwrap(), "b");
    assert!(dom.find_nth("li", 2).is_none());
    let err = dom.find_first("table").unwrap_err();
    assert_eq!(err.selector, "table");
}

#[test]
fn test_id_tag_and_class_shortcuts() {
    let dom = load("<div id=\"main\"><span class=\"big\">a</span><span>b</span></div>");
    assert_eq!(dom.get_element_by_id("main"), dom.find_nth("div", 0));
    assert!(dom.get_element_by_id("missing").is_none());
    assert_eq!(dom.get_elements_by_tag("span").len(), 2);
    assert_eq!(dom.get_elements_by_class("big").len(), 1);
}

#[test]
fn test_queries_see_repaired_markup() {
    let dom = load("<div><b><i>x</div><p class=\"y\">z</p>");
    assert_eq!(dom.find("div i").len(), 1);
    let p = dom.find_first("p.y").unwrap();
    assert_eq!(dom.document().text(p).unwrap(), "z");
}

// ========== Root shortcuts ==========

#[test]
fn test_root_child_wrappers() {
    let dom = load("<br><p>x</p>");
    assert!(dom.has_children());
    assert_eq!(dom.count_children(), 2);
    assert_eq!(dom.children().unwrap().len(), 2);
    let first = dom.first_child().unwrap();
    let last = dom.last_child().unwrap();
    assert_eq!(dom.document().tag_name(first), Some("br"));
    assert_eq!(dom.document().tag_name(last), Some("p"));
}

#[test]
fn test_display_renders_the_page() {
    let dom = load("<div id=\"a\"><br><p>hi</p></div>");
    assert_eq!(dom.to_string(), "<div id=\"a\"><br><p>hi</p></div>");
}

// ========== Charset detection ==========

#[test]
fn test_meta_charset_installs_the_declared_encoding() {
    let dom = load("<head><meta charset=\"ISO-8859-1\"></head><p>x</p>");
    let encoding = dom.document().encoding().unwrap();
    assert_eq!(encoding.from_label(), "ISO-8859-1");
    assert_eq!(encoding.to_label(), "UTF-8");
}

#[test]
fn test_charset_label_inside_a_content_blob() {
    let dom = load("<meta charset=\"text/html; charset=windows-1251\">");
    let encoding = dom.document().encoding().unwrap();
    assert_eq!(encoding.from_label(), "windows-1251");
}

#[test]
fn test_missing_charset_uses_the_default() {
    let dom = load("<p>x</p>");
    let encoding = dom.document().encoding().unwrap();
    assert_eq!(encoding.from_label(), "UTF-8");
    assert_eq!(encoding.to_label(), "UTF-8");
}

#[test]
fn test_enforced_encoding_overrides_the_declaration() {
    let dom = Dom::load_str(
        "<meta charset=\"ISO-8859-1\"><p>x</p>",
        &Options::default().with_enforce_encoding(Some("KOI8-R")),
    )
    .unwrap();
    let encoding = dom.document().encoding().unwrap();
    assert_eq!(encoding.from_label(), "KOI8-R");
    assert_eq!(encoding.to_label(), "KOI8-R");
}

#[test]
fn test_default_charset_option_sets_the_target() {
    let dom = Dom::load_str(
        "<meta charset=\"ISO-8859-1\"><p>x</p>",
        &Options::default().with_default_charset("UTF8"),
    )
    .unwrap();
    let encoding = dom.document().encoding().unwrap();
    assert_eq!(encoding.from_label(), "ISO-8859-1");
    assert_eq!(encoding.to_label(), "UTF8");
}
