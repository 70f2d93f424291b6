//! Element-path queries over a parsed XML tree.
//!
//! Supports the small path subset filing documents need:
//! - [`find_all`] / [`find_first`]: `.//a/b/c`, i.e. any descendant `a` of the
//!   context node, then direct children `b`, then `c`
//! - [`child_text`]: `a/b`, direct-child steps only
//!
//! Steps compare the element's local name, so `ns1:cik` matches `cik`.
//! Results are always in document order.

use roxmltree::Node;

/// All elements matching `path` anywhere below `context` (the context node
/// itself is never a match for the first step).
pub fn find_all<'a, 'input>(context: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    let mut steps = path.split('/');
    let Some(first) = steps.next() else {
        return Vec::new();
    };

    let anchors: Vec<Node<'a, 'input>> = context
        .descendants()
        .skip(1)
        .filter(|n| is_named(n, first))
        .collect();

    select_children(anchors, steps)
}

/// The first element matching `path` anywhere below `context`.
pub fn find_first<'a, 'input>(context: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    find_all(context, path).into_iter().next()
}

/// Trimmed leading text of the first element at child path `path` under
/// `node`; empty when the element or its text is absent.
pub fn child_text(node: Node<'_, '_>, path: &str) -> String {
    select_children(vec![node], path.split('/'))
        .first()
        .map(|n| own_text(*n))
        .unwrap_or_default()
}

/// Trimmed leading text of `node` itself: every text run before its first
/// child element, with comments and processing instructions skipped.
pub fn own_text(node: Node<'_, '_>) -> String {
    let text: String = node
        .children()
        .take_while(|c| !c.is_element())
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect();
    text.trim().to_string()
}

/// Walk direct-child `steps` from each context node, keeping document order.
fn select_children<'a, 'input, 's>(
    contexts: Vec<Node<'a, 'input>>,
    steps: impl Iterator<Item = &'s str>,
) -> Vec<Node<'a, 'input>> {
    let mut current = contexts;
    for step in steps {
        current = current
            .into_iter()
            .flat_map(|n| n.children().filter(move |c| is_named(c, step)))
            .collect();
    }
    current
}

fn is_named(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const DOC: &str = r#"<root>
        <a><b><c>first</c></b></a>
        <x><a><b><c>second</c><c>third</c></b></a></x>
        <b><c>stray</c></b>
    </root>"#;

    #[test]
    fn find_all_in_document_order() {
        let doc = Document::parse(DOC).unwrap();
        let texts: Vec<String> = find_all(doc.root_element(), "a/b/c")
            .into_iter()
            .map(own_text)
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn find_all_requires_child_chain() {
        let doc = Document::parse(DOC).unwrap();
        // `c` under the top-level `b` has no `a` parent.
        let under_a: Vec<String> = find_all(doc.root_element(), "a/b/c")
            .into_iter()
            .map(own_text)
            .collect();
        assert!(!under_a.contains(&"stray".to_string()));

        // But `.//b/c` reaches every `b`, nested or not.
        assert_eq!(find_all(doc.root_element(), "b/c").len(), 4);
    }

    #[test]
    fn context_node_is_not_a_match() {
        let doc = Document::parse("<a><a>inner</a></a>").unwrap();
        let found = find_first(doc.root_element(), "a").unwrap();
        assert_eq!(own_text(found), "inner");
    }

    #[test]
    fn child_text_missing_is_empty() {
        let doc = Document::parse("<p><n><f> Jane </f></n><e/></p>").unwrap();
        let root = doc.root_element();
        assert_eq!(child_text(root, "n/f"), "Jane");
        assert_eq!(child_text(root, "n/l"), "");
        assert_eq!(child_text(root, "e"), "");
        // Child steps do not search deeper than one level per step.
        assert_eq!(child_text(root, "f"), "");
    }

    #[test]
    fn comments_inside_text_are_skipped() {
        let doc =
            Document::parse("<p><a><!-- c -->123</a><b>12<!--x-->34</b><c>5<?pi x?>6</c></p>")
                .unwrap();
        let root = doc.root_element();
        assert_eq!(child_text(root, "a"), "123");
        assert_eq!(child_text(root, "b"), "1234");
        assert_eq!(child_text(root, "c"), "56");
    }

    #[test]
    fn cdata_counts_as_text() {
        let doc = Document::parse("<p><v> A<![CDATA[ & ]]>B </v></p>").unwrap();
        assert_eq!(child_text(doc.root_element(), "v"), "A & B");
    }

    #[test]
    fn leading_text_only() {
        let doc = Document::parse("<p><v>head<i>inner</i>tail</v></p>").unwrap();
        assert_eq!(child_text(doc.root_element(), "v"), "head");
    }
}
