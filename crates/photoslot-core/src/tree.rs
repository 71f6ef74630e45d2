//! Host-agnostic layer tree.
//!
//! A template is an ordered forest of [`Node`]s. Leaves are image layers
//! (placeholders, or photos placed into them); composites are groups. Every
//! walk is pre-order: a node is visited before its children, and children
//! left to right, which matches the top-to-bottom order of a layer panel.
//!
//! Nodes are addressed by [`NodePath`], the index path from the roots. Paths
//! stay valid as long as the tree is not restructured.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::orientation::{Orientation, Oriented};

/// A layer or a group of layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf(Leaf),
    Composite(Composite),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(leaf) => &leaf.name,
            Self::Composite(group) => &group.name,
        }
    }

    /// Placeholder leaf with the given name and bounds.
    pub fn placeholder(name: impl Into<String>, bounds: Bounds) -> Self {
        Self::Leaf(Leaf::placeholder(name, bounds))
    }

    pub fn group(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Composite(Composite {
            name: name.into(),
            children,
        })
    }
}

/// An image layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub name: String,
    pub bounds: Bounds,
    /// Only placeholder leaves are slots.
    #[serde(default = "default_true")]
    pub placeholder: bool,
    /// Photo placed into this layer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Clipped to the layer directly below it.
    #[serde(default, skip_serializing_if = "is_false")]
    pub clipped: bool,
}

impl Leaf {
    pub fn placeholder(name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            bounds,
            placeholder: true,
            source: None,
            clipped: false,
        }
    }
}

impl Oriented for Leaf {
    fn orientation(&self) -> Orientation {
        self.bounds.orientation()
    }
}

/// A group of layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

fn default_true() -> bool {
    true
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Index path from the roots to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    /// The path of the parent's child list and the index within it.
    fn split_last(&self) -> Option<(&[usize], usize)> {
        let (last, parent) = self.0.split_last()?;
        Some((parent, *last))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

/// An ordered forest of layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerTree {
    nodes: Vec<Node>,
}

impl LayerTree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All leaves in pre-order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![self.nodes.iter().enumerate()],
            path: Vec::new(),
        }
    }

    /// Placeholder leaves in pre-order.
    pub fn placeholders(&self) -> impl Iterator<Item = (NodePath, &Leaf)> {
        self.leaves().filter(|(_, leaf)| leaf.placeholder)
    }

    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// First leaf named `name`, searching inside every group.
    pub fn find_leaf(&self, name: &str) -> Option<(NodePath, &Leaf)> {
        self.leaves().find(|(_, leaf)| leaf.name == name)
    }

    pub fn node(&self, path: &NodePath) -> Option<&Node> {
        let (first, rest) = path.0.split_first()?;
        let mut node = self.nodes.get(*first)?;
        for &i in rest {
            match node {
                Node::Composite(group) => node = group.children.get(i)?,
                Node::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    pub fn leaf(&self, path: &NodePath) -> Option<&Leaf> {
        match self.node(path)? {
            Node::Leaf(leaf) => Some(leaf),
            Node::Composite(_) => None,
        }
    }

    pub fn leaf_mut(&mut self, path: &NodePath) -> Option<&mut Leaf> {
        let (parent, index) = path.split_last()?;
        match self.children_mut(parent)?.get_mut(index)? {
            Node::Leaf(leaf) => Some(leaf),
            Node::Composite(_) => None,
        }
    }

    /// Rename the leaf at `path`. Returns `false` if there is no leaf there.
    pub fn rename_leaf(&mut self, path: &NodePath, name: &str) -> bool {
        match self.leaf_mut(path) {
            Some(leaf) => {
                leaf.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Insert `node` directly before the node at `path`, in the same parent.
    ///
    /// Shifts the addressed node (and its later siblings) one index down.
    pub fn insert_before(&mut self, path: &NodePath, node: Node) -> bool {
        let Some((parent, index)) = path.split_last() else {
            return false;
        };
        match self.children_mut(parent) {
            Some(children) if index < children.len() => {
                children.insert(index, node);
                true
            }
            _ => false,
        }
    }

    fn children_mut(&mut self, parent: &[usize]) -> Option<&mut Vec<Node>> {
        let mut children = &mut self.nodes;
        for &i in parent {
            match children.get_mut(i)? {
                Node::Composite(group) => children = &mut group.children,
                Node::Leaf(_) => return None,
            }
        }
        Some(children)
    }
}

/// Pre-order leaf iterator returned by [`LayerTree::leaves`].
pub struct Leaves<'a> {
    stack: Vec<std::iter::Enumerate<std::slice::Iter<'a, Node>>>,
    path: Vec<usize>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (NodePath, &'a Leaf);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.next() {
                Some((i, Node::Leaf(leaf))) => {
                    let mut path = self.path.clone();
                    path.push(i);
                    return Some((NodePath(path), leaf));
                }
                Some((i, Node::Composite(group))) => {
                    self.path.push(i);
                    self.stack.push(group.children.iter().enumerate());
                }
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LayerTree {
        LayerTree::new(vec![
            Node::placeholder("A", Bounds::new(0.0, 0.0, 400.0, 200.0)),
            Node::group(
                "page",
                vec![
                    Node::placeholder("B", Bounds::new(0.0, 0.0, 200.0, 400.0)),
                    Node::group("empty", vec![]),
                    Node::group(
                        "inner",
                        vec![Node::placeholder("C", Bounds::new(0.0, 0.0, 300.0, 100.0))],
                    ),
                ],
            ),
            Node::Leaf(Leaf {
                placeholder: false,
                ..Leaf::placeholder("background", Bounds::new(0.0, 0.0, 1000.0, 1000.0))
            }),
        ])
    }

    #[test]
    fn test_leaves_preorder() {
        let tree = sample();
        let names: Vec<&str> = tree.leaves().map(|(_, l)| l.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "background"]);

        let paths: Vec<NodePath> = tree.leaves().map(|(p, _)| p).collect();
        assert_eq!(paths[0], NodePath(vec![0]));
        assert_eq!(paths[1], NodePath(vec![1, 0]));
        assert_eq!(paths[2], NodePath(vec![1, 2, 0]));
        assert_eq!(paths[3], NodePath(vec![2]));
    }

    #[test]
    fn test_placeholders_skip_plain_layers() {
        let tree = sample();
        assert_eq!(tree.placeholders().count(), 3);
        assert!(tree.has_placeholders());
        assert!(!LayerTree::default().has_placeholders());
    }

    #[test]
    fn test_find_leaf_inside_groups() {
        let tree = sample();
        let (path, leaf) = tree.find_leaf("C").unwrap();
        assert_eq!(path.to_string(), "/1/2/0");
        assert_eq!(leaf.bounds.width(), 300.0);
        assert!(tree.find_leaf("page").is_none());
    }

    #[test]
    fn test_rename_and_insert_before() {
        let mut tree = sample();
        let path = NodePath(vec![1, 2, 0]);
        assert!(tree.rename_leaf(&path, "slot"));
        assert!(!tree.rename_leaf(&NodePath(vec![1]), "group-is-not-a-leaf"));

        let pasted = Node::Leaf(Leaf::placeholder("pasted", Bounds::new(0.0, 0.0, 1.0, 1.0)));
        assert!(tree.insert_before(&path, pasted));
        assert_eq!(tree.leaf(&path).unwrap().name, "pasted");
        assert_eq!(tree.leaf(&NodePath(vec![1, 2, 1])).unwrap().name, "slot");
        assert!(!tree.insert_before(&NodePath(vec![9]), Node::group("x", vec![])));
    }

    #[test]
    fn test_json_shape() {
        let json = r#"[
            {"kind": "leaf", "name": "A", "bounds": [0, 0, 400, 200]},
            {"kind": "composite", "name": "g", "children": [
                {"kind": "leaf", "name": "bg", "bounds": [0, 0, 10, 10], "placeholder": false}
            ]}
        ]"#;
        let tree: LayerTree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.nodes().len(), 2);
        assert!(tree.leaf(&NodePath(vec![0])).unwrap().placeholder);
        assert!(!tree.leaf(&NodePath(vec![1, 0])).unwrap().placeholder);
    }
}
