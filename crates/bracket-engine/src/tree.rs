//! Tag tree construction.
//!
//! Matches opening and closing tokens into elements. Anything that cannot
//! be matched (unknown tags, stray closers, unclosed openers, tags in the
//! wrong parent) is demoted back to literal text.

use std::collections::BTreeMap;

use crate::parser::Token;
use crate::tag::TagDef;

/// Node of the parsed tag tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Text(String),
    Element(Element),
}

/// A matched tag and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    pub def: &'static TagDef,
    pub filter: usize,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Node>,
    pub raw_open: String,
    pub raw_close: String,
}

impl Element {
    /// Plain text of all descendant text nodes.
    pub(crate) fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// Build a tree from tokens.
///
/// `lookup` maps a tag name to its definition and owning filter index.
/// Returns the root nodes and warnings for demoted tags.
pub(crate) fn build<F>(tokens: Vec<Token>, lookup: F) -> (Vec<Node>, Vec<String>)
where
    F: Fn(&str) -> Option<(&'static TagDef, usize)>,
{
    let mut builder = TreeBuilder::default();

    for token in tokens {
        match token {
            Token::Text(text) => builder.push_text(text),
            Token::Open { name, attrs, raw } => {
                if builder.in_verbatim() {
                    builder.push_text(raw);
                    continue;
                }
                let Some((def, filter)) = lookup(&name) else {
                    builder.push_text(raw);
                    continue;
                };
                if def.implicit_close
                    && builder.stack.last().is_some_and(|e| e.def.name == def.name)
                {
                    builder.close_top();
                }
                if !def.parents.is_empty() && !builder.parent_is_one_of(def.parents) {
                    builder
                        .warnings
                        .push(format!("{raw}: must be placed inside {}", def.parents.join(", ")));
                    builder.push_text(raw);
                    continue;
                }
                let element = Element {
                    def,
                    filter,
                    attrs,
                    children: Vec::new(),
                    raw_open: raw,
                    raw_close: String::new(),
                };
                if def.self_closing {
                    builder.push_node(Node::Element(element));
                } else {
                    builder.stack.push(element);
                }
            }
            Token::Close { name, raw } => builder.close(&name, raw),
        }
    }

    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    stack: Vec<Element>,
    warnings: Vec<String>,
}

impl TreeBuilder {
    fn children(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(element) => &mut element.children,
            None => &mut self.root,
        }
    }

    fn push_node(&mut self, node: Node) {
        self.children().push(node);
    }

    fn push_text(&mut self, text: String) {
        let children = self.children();
        if let Some(Node::Text(last)) = children.last_mut() {
            last.push_str(&text);
        } else {
            children.push(Node::Text(text));
        }
    }

    fn in_verbatim(&self) -> bool {
        self.stack.last().is_some_and(|element| element.def.verbatim)
    }

    fn parent_is_one_of(&self, parents: &[&str]) -> bool {
        self.stack
            .last()
            .is_some_and(|element| parents.contains(&element.def.name))
    }

    fn close(&mut self, name: &str, raw: String) {
        if self.in_verbatim() && self.stack.last().is_some_and(|e| e.def.name != name) {
            self.push_text(raw);
            return;
        }

        let Some(index) = self.stack.iter().rposition(|e| e.def.name == name) else {
            self.push_text(raw);
            return;
        };

        // Elements opened after the match were never closed
        while self.stack.len() > index + 1 {
            if self.stack.last().is_some_and(|e| e.def.implicit_close) {
                self.close_top();
            } else if let Some(unclosed) = self.stack.pop() {
                self.demote(unclosed);
            }
        }

        if let Some(mut element) = self.stack.pop() {
            element.raw_close = raw;
            self.push_node(Node::Element(element));
        }
    }

    /// Close the innermost element without a closer.
    fn close_top(&mut self) {
        if let Some(element) = self.stack.pop() {
            self.push_node(Node::Element(element));
        }
    }

    /// Replace an unclosed element with its raw opener and content.
    fn demote(&mut self, element: Element) {
        self.warnings
            .push(format!("{}: missing closing tag", element.raw_open));
        self.push_text(element.raw_open);
        for child in element.children {
            match child {
                Node::Text(text) => self.push_text(text),
                node @ Node::Element(_) => self.push_node(node),
            }
        }
    }

    fn finish(mut self) -> (Vec<Node>, Vec<String>) {
        while let Some(unclosed) = self.stack.pop() {
            self.demote(unclosed);
        }
        (self.root, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Syntax, tokenize};

    static DEFS: &[TagDef] = &[
        TagDef::inline("b"),
        TagDef::inline("br").self_closing(),
        TagDef::block("code").verbatim(),
        TagDef::block("list").structural(),
        TagDef::block("li").parents(&["list"]),
        TagDef::block("*").parents(&["list"]).implicit_close(),
    ];

    fn parse(input: &str) -> (Vec<Node>, Vec<String>) {
        let syntax = Syntax {
            open: "[",
            close: "]",
            strict: true,
        };
        let (tokens, _) = tokenize(input, syntax);
        build(tokens, |name| {
            DEFS.iter()
                .position(|d| d.name == name)
                .map(|i| (&DEFS[i], 0))
        })
    }

    fn element(node: &Node) -> &Element {
        match node {
            Node::Element(e) => e,
            Node::Text(t) => panic!("expected element, got text {t:?}"),
        }
    }

    #[test]
    fn test_matched_element() {
        let (nodes, warnings) = parse("[b]x[/b]");
        assert_eq!(nodes.len(), 1);
        let b = element(&nodes[0]);
        assert_eq!(b.def.name, "b");
        assert_eq!(b.children, vec![Node::Text("x".to_owned())]);
        assert_eq!(b.raw_close, "[/b]");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unknown_tag_is_text() {
        let (nodes, _) = parse("[foo]x[/foo]");
        assert_eq!(nodes, vec![Node::Text("[foo]x[/foo]".to_owned())]);
    }

    #[test]
    fn test_unclosed_tag_is_demoted() {
        let (nodes, warnings) = parse("[b]x");
        assert_eq!(nodes, vec![Node::Text("[b]x".to_owned())]);
        assert!(warnings[0].contains("missing closing tag"));
    }

    #[test]
    fn test_stray_closer_is_text() {
        let (nodes, _) = parse("x[/b]");
        assert_eq!(nodes, vec![Node::Text("x[/b]".to_owned())]);
    }

    #[test]
    fn test_improper_nesting_demotes_inner() {
        let (nodes, _) = parse("[list][b]x[/list]");
        let list = element(&nodes[0]);
        assert_eq!(list.children, vec![Node::Text("[b]x".to_owned())]);
    }

    #[test]
    fn test_self_closing() {
        let (nodes, _) = parse("a[br]b");
        assert_eq!(nodes.len(), 3);
        assert_eq!(element(&nodes[1]).def.name, "br");
    }

    #[test]
    fn test_verbatim_content_not_parsed() {
        let (nodes, _) = parse("[code][b]x[/b][/code]");
        let code = element(&nodes[0]);
        assert_eq!(code.children, vec![Node::Text("[b]x[/b]".to_owned())]);
    }

    #[test]
    fn test_parent_requirement() {
        let (nodes, warnings) = parse("[li]x[/li]");
        assert_eq!(nodes, vec![Node::Text("[li]x[/li]".to_owned())]);
        assert!(warnings[0].contains("list"));

        let (nodes, _) = parse("[list][li]x[/li][/list]");
        let list = element(&nodes[0]);
        assert_eq!(element(&list.children[0]).def.name, "li");
    }

    #[test]
    fn test_implicit_close() {
        let (nodes, warnings) = parse("[list][*]a[*]b[/list]");
        let list = element(&nodes[0]);
        assert_eq!(list.children.len(), 2);
        assert_eq!(element(&list.children[0]).text(), "a");
        assert_eq!(element(&list.children[1]).text(), "b");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_element_text() {
        let (nodes, _) = parse("[list][li]a[b]b[/b][/li][/list]");
        assert_eq!(element(&nodes[0]).text(), "ab");
    }
}
