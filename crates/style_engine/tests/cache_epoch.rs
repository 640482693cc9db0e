use dom::{Document, NodeId};
use style_engine::StyleEngine;

fn build_document(css: &str) -> (Document, NodeId, NodeId) {
    let mut doc = Document::new();
    let html = doc.create_element("html");
    let head = doc.create_element("head");
    let body = doc.create_element("body");
    doc.append_child(doc.document_node(), html).unwrap();
    doc.append_child(html, head).unwrap();
    doc.append_child(html, body).unwrap();
    let style = doc.create_element("style");
    let text = doc.create_text(css);
    doc.append_child(style, text).unwrap();
    doc.append_child(head, style).unwrap();
    (doc, body, text)
}

fn value(style: &css::property_manager::PropertyManager, name: &str) -> Option<String> {
    style.get(name).map(|p| p.value.clone())
}

#[test]
fn repeated_reads_hit_the_cache() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (mut doc, body, _) = build_document(".x { color: red }");
    let div = doc.create_element("div");
    doc.set_attribute(div, "class", "x").unwrap();
    doc.append_child(body, div).unwrap();

    let mut engine = StyleEngine::new();
    let first = engine.element_style(&doc, div, true);
    let matches_after_first = engine.perf_selector_match_count();
    let resolves_after_first = engine.perf_cascade_resolve_count();
    assert!(matches_after_first > 0);

    let second = engine.element_style(&doc, div, true);
    assert_eq!(first, second);
    // The cached read re-invokes neither the selector matcher nor the
    // cascade resolver.
    assert_eq!(engine.perf_selector_match_count(), matches_after_first);
    assert_eq!(engine.perf_cascade_resolve_count(), resolves_after_first);
}

#[test]
fn stylesheet_text_mutation_invalidates_the_cache() {
    let (mut doc, body, sheet_text) = build_document("div { color: red }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();

    let mut engine = StyleEngine::new();
    let before = engine.element_style(&doc, div, true);
    assert_eq!(value(&before, "color").as_deref(), Some("red"));

    doc.set_text(sheet_text, "div { color: blue }").unwrap();
    let after = engine.element_style(&doc, div, true);
    assert_eq!(value(&after, "color").as_deref(), Some("blue"));
}

#[test]
fn attribute_mutation_invalidates_the_cache() {
    let (mut doc, body, _) = build_document(".red { color: red } .blue { color: blue }");
    let div = doc.create_element("div");
    doc.set_attribute(div, "class", "red").unwrap();
    doc.append_child(body, div).unwrap();

    let mut engine = StyleEngine::new();
    assert_eq!(
        value(&engine.element_style(&doc, div, true), "color").as_deref(),
        Some("red")
    );
    doc.set_attribute(div, "class", "blue").unwrap();
    assert_eq!(
        value(&engine.element_style(&doc, div, true), "color").as_deref(),
        Some("blue")
    );
}

#[test]
fn structural_mutation_invalidates_the_cache() {
    let (mut doc, body, _) = build_document("body > div { color: red }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();

    let mut engine = StyleEngine::new();
    assert_eq!(
        value(&engine.element_style(&doc, div, true), "color").as_deref(),
        Some("red")
    );

    // Re-parent the div under a wrapper: the child combinator stops matching.
    doc.remove_node(div).unwrap();
    let wrapper = doc.create_element("section");
    doc.append_child(body, wrapper).unwrap();
    doc.append_child(wrapper, div).unwrap();
    assert_eq!(value(&engine.element_style(&doc, div, true), "color"), None);
}

#[test]
fn disconnected_targets_resolve_empty_and_are_not_cached() {
    let (mut doc, body, _) = build_document("div { color: red }");
    let div = doc.create_element("div");

    let mut engine = StyleEngine::new();
    let detached = engine.element_style(&doc, div, true);
    assert!(detached.is_empty());
    assert_eq!(engine.perf_cascade_resolve_count(), 0);

    // Connecting afterwards produces the real style, not a stale empty one.
    doc.append_child(body, div).unwrap();
    let connected = engine.element_style(&doc, div, true);
    assert_eq!(value(&connected, "color").as_deref(), Some("red"));
}

#[test]
fn inline_style_caches_on_the_attribute_text() {
    let (mut doc, body, _) = build_document("div { color: red }");
    let div = doc.create_element("div");
    doc.set_attribute(div, "style", "width: 10px").unwrap();
    doc.append_child(body, div).unwrap();

    let mut engine = StyleEngine::new();
    let first = engine.element_style(&doc, div, false);
    assert_eq!(value(&first, "width").as_deref(), Some("10px"));
    // Inline style carries no cascade contributions.
    assert_eq!(value(&first, "color"), None);
    assert_eq!(first, engine.element_style(&doc, div, false));

    doc.set_attribute(div, "style", "width: 20px").unwrap();
    let updated = engine.element_style(&doc, div, false);
    assert_eq!(value(&updated, "width").as_deref(), Some("20px"));
}

#[test]
fn inline_style_skips_unit_resolution() {
    let (mut doc, body, _) = build_document("");
    let div = doc.create_element("div");
    doc.set_attribute(div, "style", "width: 2em").unwrap();
    doc.append_child(body, div).unwrap();

    let mut engine = StyleEngine::new();
    let inline = engine.element_style(&doc, div, false);
    assert_eq!(value(&inline, "width").as_deref(), Some("2em"));
    let computed = engine.element_style(&doc, div, true);
    assert_eq!(value(&computed, "width").as_deref(), Some("32px"));
}
