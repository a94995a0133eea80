use roxmltree::Node;

/// Evaluates a relative child path (e.g. "HOPS/HOP") against a node and
/// returns the matching element nodes in document order.
///
/// This is the only XPath subset the dialect schemas need: each segment
/// selects element children of the nodes matched by the previous segment.
pub fn evaluate<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    let mut current = vec![node];
    for segment in path.split('/') {
        let mut next = Vec::new();
        for n in &current {
            next.extend(
                n.children()
                    .filter(|c| c.is_element() && c.tag_name().name() == segment),
            );
        }
        current = next;
    }
    current
}

/// Returns the trimmed text content of an element, or an empty string for
/// an empty element like `<NOTES/>`.
pub fn text_of(node: Node) -> String {
    node.text().unwrap_or("").trim().to_string()
}
