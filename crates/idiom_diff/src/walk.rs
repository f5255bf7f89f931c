//! Lazy preorder traversal producing one record per scalar leaf.

use std::iter::FusedIterator;

use crate::error::{CompareError, CompareResult};
use crate::path::Path;
use crate::tree::{Children, Shape, TreeNode};

/// A scalar leaf together with the path that reaches it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a, T> {
    /// Location of the leaf from the tree root.
    pub path: Path,
    /// The leaf itself.
    pub value: &'a T,
}

/// Iterator over the leaves of a tree, in preorder.
///
/// Mapping entries are visited in insertion order and sequence elements in
/// index order. Composite nodes are descended into but never yielded. The
/// iterator holds one child cursor per open composite, so memory is bounded
/// by tree depth rather than leaf count.
///
/// A node the tree type reports as [`Shape::Unsupported`] is yielded once as
/// [`CompareError::InvalidStructure`]; the iterator is exhausted afterwards.
pub struct PathIter<'a, T> {
    root: Option<&'a T>,
    stack: Vec<Children<'a, T>>,
    path: Path,
    fused: bool,
}

/// Start a traversal of `tree`.
///
/// ```
/// use idiom_diff::walk;
/// use serde_json::json;
///
/// let doc = json!({"name": "Alpha", "tags": ["a", "b"]});
/// let paths: Vec<String> = walk(&doc)
///     .map(|record| record.unwrap().path.to_string())
///     .collect();
/// assert_eq!(paths, ["name", "tags[0]", "tags[1]"]);
/// ```
pub fn walk<T: TreeNode>(tree: &T) -> PathIter<'_, T> {
    PathIter {
        root: Some(tree),
        stack: Vec::new(),
        path: Path::root(),
        fused: false,
    }
}

impl<'a, T: TreeNode> PathIter<'a, T> {
    /// Visit a node whose step is already on the path.
    ///
    /// Returns an item for leaves and errors; composites are pushed and
    /// traversal continues.
    fn visit(&mut self, node: &'a T) -> Option<CompareResult<Record<'a, T>>> {
        match node.shape() {
            Shape::Scalar => {
                tracing::trace!(path = %self.path, "leaf");
                let record = Record {
                    path: self.path.clone(),
                    value: node,
                };
                self.path.pop();
                Some(Ok(record))
            }
            Shape::Mapping(children) | Shape::Sequence(children) => {
                self.stack.push(children);
                None
            }
            Shape::Unsupported(kind) => {
                self.stack.clear();
                self.fused = true;
                Some(Err(CompareError::InvalidStructure {
                    path: self.path.clone(),
                    kind,
                }))
            }
        }
    }
}

impl<'a, T: TreeNode> Iterator for PathIter<'a, T> {
    type Item = CompareResult<Record<'a, T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        if let Some(root) = self.root.take() {
            if let Some(item) = self.visit(root) {
                return Some(item);
            }
        }

        loop {
            let children = self.stack.last_mut()?;
            match children.next() {
                Some((step, child)) => {
                    self.path.push(step);
                    if let Some(item) = self.visit(child) {
                        return Some(item);
                    }
                }
                None => {
                    // Composite finished: drop its cursor and its own step.
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }
}

impl<T: TreeNode> FusedIterator for PathIter<'_, T> {}
