//! The BSP tree. Nodes live in an arena and refer to each other, and to the
//! subsector leaves, by index.

use std::ops::ControlFlow;

use math::FixedPoint;
use wad::lumps::IS_SSECTOR_MASK;

use crate::error::LoadError;
use crate::ids::{NodeId, SubSectorId};
use crate::map_defs::BBox;

/// One child of a node, tagged by the `IS_SSECTOR_MASK` bit on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeChild {
    Node(NodeId),
    SubSector(SubSectorId),
}

impl NodeChild {
    pub const fn from_raw(raw: u16) -> Self {
        if raw & IS_SSECTOR_MASK != 0 {
            NodeChild::SubSector(SubSectorId::new((raw & !IS_SSECTOR_MASK) as usize))
        } else {
            NodeChild::Node(NodeId::new(raw as usize))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Partition line start
    pub x: FixedPoint,
    pub y: FixedPoint,
    /// Partition line direction
    pub dx: FixedPoint,
    pub dy: FixedPoint,
    /// Bounding box for each child, 0 is the right (front) side
    pub bboxes: [BBox; 2],
    pub children: [NodeChild; 2],
}

impl Node {
    /// R_PointOnSide. 0 is the front (right) side of the partition, 1 the
    /// back.
    pub fn point_on_side(&self, x: FixedPoint, y: FixedPoint) -> usize {
        if self.dx.is_zero() {
            if x <= self.x {
                return (self.dy.to_bits() > 0) as usize;
            }
            return (self.dy.to_bits() < 0) as usize;
        }
        if self.dy.is_zero() {
            if y <= self.y {
                return (self.dx.to_bits() < 0) as usize;
            }
            return (self.dx.to_bits() > 0) as usize;
        }

        let dx = x - self.x;
        let dy = y - self.y;

        // Try to quickly decide by looking at sign bits
        if (self.dy.to_bits() ^ self.dx.to_bits() ^ dx.to_bits() ^ dy.to_bits()) < 0 {
            if (self.dy.to_bits() ^ dx.to_bits()) < 0 {
                // left is negative
                return 1;
            }
            return 0;
        }

        let left = (self.dy >> 16) * dx;
        let right = dy * (self.dx >> 16);

        if right < left {
            // front side
            return 0;
        }
        // back side
        1
    }

    pub fn point_in_bounds(&self, x: FixedPoint, y: FixedPoint, side: usize) -> bool {
        self.bboxes[side].contains(x, y)
    }
}

/// The node arena plus the root. A level with no nodes is a single subsector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BspTree {
    nodes: Vec<Node>,
    root: NodeChild,
}

impl BspTree {
    /// The root is the last node. Every node must be reachable from the root
    /// at most once, so a walk always terminates.
    pub fn new(nodes: Vec<Node>) -> Result<Self, LoadError> {
        let root = match nodes.len() {
            0 => NodeChild::SubSector(SubSectorId::new(0)),
            n => NodeChild::Node(NodeId::new(n - 1)),
        };

        let mut seen = vec![false; nodes.len()];
        let mut stack = vec![root];
        while let Some(child) = stack.pop() {
            if let NodeChild::Node(id) = child {
                let Some(node) = nodes.get(id.index()) else {
                    return Err(LoadError::MalformedTree { node: id.index() });
                };
                if std::mem::replace(&mut seen[id.index()], true) {
                    return Err(LoadError::MalformedTree { node: id.index() });
                }
                stack.extend(node.children);
            }
        }

        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeChild {
        self.root
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Descend from the root to the leaf holding the point
    pub fn point_in_subsector(&self, x: FixedPoint, y: FixedPoint) -> SubSectorId {
        let mut child = self.root;
        loop {
            match child {
                NodeChild::SubSector(id) => return id,
                NodeChild::Node(id) => {
                    let node = &self.nodes[id.index()];
                    child = node.children[node.point_on_side(x, y)];
                }
            }
        }
    }

    /// Visit every subsector, nearest to the point first. At each node the
    /// side holding the point is walked before the other side. Return
    /// `ControlFlow::Break` from `visit` to stop early.
    pub fn walk_front_to_back(
        &self,
        x: FixedPoint,
        y: FixedPoint,
        mut visit: impl FnMut(SubSectorId) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let mut stack = vec![self.root];
        while let Some(child) = stack.pop() {
            match child {
                NodeChild::SubSector(id) => visit(id)?,
                NodeChild::Node(id) => {
                    let node = &self.nodes[id.index()];
                    let side = node.point_on_side(x, y);
                    stack.push(node.children[side ^ 1]);
                    stack.push(node.children[side]);
                }
            }
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use math::FixedPoint;

    use super::{BspTree, Node, NodeChild};
    use crate::error::LoadError;
    use crate::ids::{NodeId, SubSectorId};
    use crate::map_defs::BBox;

    fn fx(v: i16) -> FixedPoint {
        FixedPoint::from_raw(v)
    }

    fn node(x: i16, y: i16, dx: i16, dy: i16, children: [u16; 2]) -> Node {
        Node {
            x: fx(x),
            y: fx(y),
            dx: fx(dx),
            dy: fx(dy),
            bboxes: [BBox::default(); 2],
            children: children.map(NodeChild::from_raw),
        }
    }

    #[test]
    fn child_tag_bit() {
        assert_eq!(
            NodeChild::from_raw(0x8003),
            NodeChild::SubSector(SubSectorId::new(3))
        );
        assert_eq!(NodeChild::from_raw(0x7fff), NodeChild::Node(NodeId::new(0x7fff)));
    }

    #[test]
    fn axis_aligned_partitions() {
        let up = node(64, 0, 0, 128, [0x8000, 0x8001]);
        assert_eq!(up.point_on_side(fx(96), fx(10)), 0);
        assert_eq!(up.point_on_side(fx(32), fx(10)), 1);
        // On the line counts as the back for an upward partition
        assert_eq!(up.point_on_side(fx(64), fx(10)), 1);

        let down = node(64, 0, 0, -128, [0x8000, 0x8001]);
        assert_eq!(down.point_on_side(fx(96), fx(10)), 1);
        assert_eq!(down.point_on_side(fx(32), fx(10)), 0);

        let east = node(0, 64, 128, 0, [0x8000, 0x8001]);
        assert_eq!(east.point_on_side(fx(10), fx(32)), 0);
        assert_eq!(east.point_on_side(fx(10), fx(96)), 1);
    }

    #[test]
    fn diagonal_partition() {
        let diag = node(0, 0, 64, 64, [0x8000, 0x8001]);
        // Sign bits alone decide these
        assert_eq!(diag.point_on_side(fx(32), fx(-32)), 0);
        assert_eq!(diag.point_on_side(fx(-32), fx(32)), 1);
        // Full cross product
        assert_eq!(diag.point_on_side(fx(40), fx(20)), 0);
        assert_eq!(diag.point_on_side(fx(20), fx(40)), 1);
    }

    #[test]
    fn empty_tree_is_one_leaf() {
        let tree = BspTree::new(Vec::new()).unwrap();
        assert_eq!(tree.root(), NodeChild::SubSector(SubSectorId::new(0)));
        assert_eq!(tree.point_in_subsector(fx(1000), fx(-1000)), SubSectorId::new(0));
    }

    #[test]
    fn shared_subtree_rejected() {
        // Node 1 points at node 0 from both sides
        let nodes = vec![
            node(0, 0, 0, 64, [0x8000, 0x8001]),
            node(0, 0, 64, 0, [0, 0]),
        ];
        assert_eq!(
            BspTree::new(nodes).unwrap_err(),
            LoadError::MalformedTree { node: 0 }
        );
    }

    #[test]
    fn cycle_rejected() {
        let nodes = vec![node(0, 0, 0, 64, [1, 0x8000]), node(0, 0, 64, 0, [0, 0x8001])];
        assert!(matches!(
            BspTree::new(nodes),
            Err(LoadError::MalformedTree { .. })
        ));
    }
}
