use dom::{Document, NodeId};
use style_engine::StyleEngine;

fn build_document(css: &str) -> (Document, NodeId) {
    let mut doc = Document::new();
    let html = doc.create_element("html");
    let head = doc.create_element("head");
    let body = doc.create_element("body");
    doc.append_child(doc.document_node(), html).unwrap();
    doc.append_child(html, head).unwrap();
    doc.append_child(html, body).unwrap();
    if !css.is_empty() {
        let style = doc.create_element("style");
        let text = doc.create_text(css);
        doc.append_child(style, text).unwrap();
        doc.append_child(head, style).unwrap();
    }
    (doc, body)
}

fn computed(doc: &Document, node: NodeId, name: &str) -> Option<String> {
    let mut engine = StyleEngine::new();
    engine
        .element_style(doc, node, true)
        .get(name)
        .map(|p| p.value.clone())
}

#[test]
fn em_font_size_resolves_against_parent() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (mut doc, body) = build_document("body { font-size: 20px } div { font-size: 2em }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();
    assert_eq!(computed(&doc, div, "font-size").as_deref(), Some("40px"));
}

#[test]
fn rem_on_the_root_element_resolves_against_the_default() {
    let (doc, body) = build_document("html { font-size: 2rem }");
    let html = doc.parent(body).unwrap();
    assert_eq!(computed(&doc, html, "font-size").as_deref(), Some("32px"));
}

#[test]
fn rem_resolves_against_the_root_font_size() {
    let (mut doc, body) =
        build_document("html { font-size: 20px } div { font-size: 2rem }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();
    assert_eq!(computed(&doc, div, "font-size").as_deref(), Some("40px"));
}

#[test]
fn percentage_resolves_for_font_size_only() {
    let (mut doc, body) =
        build_document("body { font-size: 20px } div { font-size: 150%; width: 50% }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();
    assert_eq!(computed(&doc, div, "font-size").as_deref(), Some("30px"));
    // Percentage widths are deliberately left unresolved.
    assert_eq!(computed(&doc, div, "width").as_deref(), Some("50%"));
}

#[test]
fn nested_font_sizes_compound() {
    let (mut doc, body) =
        build_document("body { font-size: 20px } div { font-size: 2em } span { font-size: 0.5em }");
    let div = doc.create_element("div");
    let span = doc.create_element("span");
    doc.append_child(body, div).unwrap();
    doc.append_child(div, span).unwrap();
    assert_eq!(computed(&doc, span, "font-size").as_deref(), Some("20px"));
}

#[test]
fn measurement_properties_resolve_against_parent_font_size() {
    let (mut doc, body) = build_document("body { font-size: 20px } div { width: 2em }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();
    assert_eq!(computed(&doc, div, "width").as_deref(), Some("40px"));
}

#[test]
fn shorthand_values_resolve_per_token() {
    let (mut doc, body) = build_document("body { font-size: 20px } div { margin: 1em 2em }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();
    assert_eq!(computed(&doc, div, "margin").as_deref(), Some("20px 40px"));
}

#[test]
fn font_shorthand_feeds_descendant_em_resolution() {
    let (mut doc, body) = build_document("body { font: 20px serif } div { width: 2em }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();
    assert_eq!(computed(&doc, div, "width").as_deref(), Some("40px"));
}

#[test]
fn absolute_units_normalize_to_pixels() {
    let (mut doc, body) = build_document("div { width: 1in; height: 72pt }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();
    assert_eq!(computed(&doc, div, "width").as_deref(), Some("96px"));
    assert_eq!(computed(&doc, div, "height").as_deref(), Some("96px"));
}

#[test]
fn unresolvable_values_are_kept_raw() {
    let (mut doc, body) = build_document("div { width: auto; height: calc(1px + 2px) }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();
    assert_eq!(computed(&doc, div, "width").as_deref(), Some("auto"));
    assert_eq!(
        computed(&doc, div, "height").as_deref(),
        Some("calc(1px + 2px)")
    );
}
