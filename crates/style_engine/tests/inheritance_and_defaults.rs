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
fn inherited_properties_propagate_to_descendants() {
    let (mut doc, body) = build_document("body { color: green }");
    let div = doc.create_element("div");
    let span = doc.create_element("span");
    doc.append_child(body, div).unwrap();
    doc.append_child(div, span).unwrap();
    assert_eq!(computed(&doc, span, "color").as_deref(), Some("green"));
}

#[test]
fn non_inherited_properties_stay_on_their_element() {
    let (mut doc, body) = build_document("body { width: 100px; color: green }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();
    assert_eq!(computed(&doc, div, "width"), None);
    assert_eq!(computed(&doc, div, "color").as_deref(), Some("green"));
    // The body itself does get its width.
    assert_eq!(computed(&doc, body, "width").as_deref(), Some("100px"));
}

#[test]
fn redeclaration_on_descendant_overrides_inherited_value() {
    let (mut doc, body) = build_document("body { color: green } div { color: red }");
    let div = doc.create_element("div");
    doc.append_child(body, div).unwrap();
    assert_eq!(computed(&doc, div, "color").as_deref(), Some("red"));
}

#[test]
fn tag_defaults_apply_and_are_overridable() {
    let (mut doc, body) = build_document("div { display: flex }");
    let div = doc.create_element("div");
    let span = doc.create_element("span");
    doc.append_child(body, div).unwrap();
    doc.append_child(body, span).unwrap();

    assert_eq!(computed(&doc, div, "display").as_deref(), Some("flex"));
    assert_eq!(computed(&doc, span, "display").as_deref(), Some("inline"));
    assert_eq!(computed(&doc, body, "display").as_deref(), Some("block"));
    assert_eq!(computed(&doc, body, "margin").as_deref(), Some("8px"));
}

#[test]
fn conditional_tag_defaults_follow_boolean_attributes() {
    let (mut doc, body) = build_document("");
    let dialog = doc.create_element("dialog");
    doc.append_child(body, dialog).unwrap();
    assert_eq!(computed(&doc, dialog, "display").as_deref(), Some("none"));

    doc.set_attribute(dialog, "open", "").unwrap();
    assert_eq!(computed(&doc, dialog, "display").as_deref(), Some("block"));

    doc.remove_attribute(dialog, "open").unwrap();
    assert_eq!(computed(&doc, dialog, "display").as_deref(), Some("none"));
}

#[test]
fn document_target_resolves_to_an_empty_style() {
    let (doc, _body) = build_document("div { color: red }");
    let mut engine = StyleEngine::new();
    let style = engine.element_style(&doc, doc.document_node(), true);
    assert!(style.is_empty());
}
