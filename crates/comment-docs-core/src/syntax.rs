//! Syntax tree over JavaScript-family source
//!
//! Source text is parsed with the tree-sitter JavaScript grammar, which also
//! covers JSX and module syntax. Comments are "extra" nodes in a tree-sitter
//! tree: they sit among the children of whatever construct surrounds them, so
//! a pre-order walk meets them in the order they appear in the text.

use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::{Error, Result};

/// Node kind tree-sitter-javascript uses for both comment styles
const COMMENT_KIND: &str = "comment";

/// 1-based location in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Line number, starting at 1
    pub line: usize,
    /// Column in characters, starting at 1
    pub column: usize,
}

impl Position {
    fn of(source: &str, node: Node<'_>) -> Self {
        let start = node.start_byte().min(source.len());
        let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
        Self {
            line: node.start_position().row + 1,
            column: source[line_start..start].chars().count() + 1,
        }
    }
}

/// Comment style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `/* ... */`, possibly spanning lines
    Block,
    /// `// ...` up to the end of the line
    Line,
}

/// A comment found in the source, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment<'a> {
    /// Raw comment text including delimiters
    pub text: &'a str,
    /// Block or line comment
    pub kind: CommentKind,
    /// Where the comment starts
    pub position: Position,
}

impl<'a> Comment<'a> {
    /// Comment text with the delimiters removed
    pub fn body(&self) -> &'a str {
        match self.kind {
            CommentKind::Block => {
                let inner = self.text.strip_prefix("/*").unwrap_or(self.text);
                inner.strip_suffix("*/").unwrap_or(inner)
            }
            CommentKind::Line => self.text.strip_prefix("//").unwrap_or(self.text),
        }
    }

    /// Whether this is a `/* */` comment
    pub fn is_block(&self) -> bool {
        self.kind == CommentKind::Block
    }
}

/// A parsed source file
///
/// Built fresh for every call; nothing is cached between parses.
pub struct SourceTree<'a> {
    source: &'a str,
    tree: Tree,
}

impl<'a> SourceTree<'a> {
    /// Parse source text, failing on the first syntax error
    ///
    /// tree-sitter always produces a tree and recovers from errors by
    /// inserting `ERROR` or missing nodes. Any such node makes the whole
    /// parse fail; there is no partial result.
    pub fn parse(source: &'a str) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&Language::from(tree_sitter_javascript::LANGUAGE))?;

        let tree = parser
            .parse(source, None)
            .ok_or(Error::SourceParse { line: 1, column: 1 })?;

        let parsed = Self { source, tree };
        if let Some(position) = parsed.first_error() {
            return Err(Error::SourceParse {
                line: position.line,
                column: position.column,
            });
        }
        Ok(parsed)
    }

    /// All comments, block and line, in document order
    pub fn comments(&self) -> Vec<Comment<'a>> {
        let mut comments = Vec::new();
        self.walk(|node| {
            if node.kind() == COMMENT_KIND {
                comments.push(self.comment(node));
            }
            true
        });
        comments
    }

    fn comment(&self, node: Node<'_>) -> Comment<'a> {
        let source: &'a str = self.source;
        let text = &source[node.byte_range()];
        let kind = if text.starts_with("/*") {
            CommentKind::Block
        } else {
            CommentKind::Line
        };
        Comment {
            text,
            kind,
            position: Position::of(self.source, node),
        }
    }

    fn first_error(&self) -> Option<Position> {
        if !self.tree.root_node().has_error() {
            return None;
        }
        let mut found = None;
        self.walk(|node| {
            if node.is_error() || node.is_missing() {
                found = Some(Position::of(self.source, node));
                return false;
            }
            true
        });
        // has_error() with no flagged node means the root itself is broken
        Some(found.unwrap_or(Position { line: 1, column: 1 }))
    }

    /// Pre-order depth-first walk; `visit` returns false to stop early
    fn walk<'t>(&'t self, mut visit: impl FnMut(Node<'t>) -> bool) {
        let mut cursor = self.tree.walk();
        loop {
            if !visit(cursor.node()) {
                return;
            }
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_has_no_comments() {
        let tree = SourceTree::parse("").unwrap();
        assert!(tree.comments().is_empty());
    }

    #[test]
    fn test_comments_in_document_order() {
        let source = r#"
// first
function greet(name) {
  /* second */
  return `hi ${name}`; // third
}
/* fourth */
"#;
        let tree = SourceTree::parse(source).unwrap();
        let texts: Vec<_> = tree.comments().iter().map(|c| c.text).collect();
        assert_eq!(
            texts,
            vec!["// first", "/* second */", "// third", "/* fourth */"]
        );
    }

    #[test]
    fn test_comment_kinds_and_bodies() {
        let tree = SourceTree::parse("/* block */\n// line\n").unwrap();
        let comments = tree.comments();
        assert_eq!(comments.len(), 2);

        assert_eq!(comments[0].kind, CommentKind::Block);
        assert_eq!(comments[0].body(), " block ");
        assert!(comments[0].is_block());

        assert_eq!(comments[1].kind, CommentKind::Line);
        assert_eq!(comments[1].body(), " line");
    }

    #[test]
    fn test_comment_positions() {
        let source = "var a = 1;\n  /* here */\nvar b = 2; /* there */\n";
        let tree = SourceTree::parse(source).unwrap();
        let positions: Vec<_> = tree.comments().iter().map(|c| c.position).collect();
        assert_eq!(
            positions,
            vec![
                Position { line: 2, column: 3 },
                Position { line: 3, column: 12 },
            ]
        );
    }

    #[test]
    fn test_comment_markers_inside_strings_are_not_comments() {
        let source = r#"var s = "/* --- not: a comment */"; var t = '// nope';"#;
        let tree = SourceTree::parse(source).unwrap();
        assert!(tree.comments().is_empty());
    }

    #[test]
    fn test_comments_nested_in_expressions() {
        let source = "call(a, /* arg */ b, [1, /* elem */ 2]);\n";
        let tree = SourceTree::parse(source).unwrap();
        let texts: Vec<_> = tree.comments().iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["/* arg */", "/* elem */"]);
    }

    #[test]
    fn test_syntax_error_is_reported_with_position() {
        let err = SourceTree::parse("var x = 1;\nfunction (\n").err().unwrap();
        match err {
            Error::SourceParse { line, .. } => assert!(line >= 2),
            other => panic!("expected SourceParse, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_block_comment_is_error() {
        assert!(matches!(
            SourceTree::parse("var x = 1; /* open"),
            Err(Error::SourceParse { .. })
        ));
    }
}
