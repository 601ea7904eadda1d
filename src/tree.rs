//! Tree data structures for Monte Carlo Tree Search.
//!
//! Nodes live in an arena (a contiguous `Vec`) and reference each other
//! through stable [`NodeId`] indices. Parents own their children through the
//! arena; the parent link is a plain index used only for backpropagation, so
//! there are no reference-counting cycles to manage.

use std::collections::VecDeque;

use crate::game_state::{Action, GameState};

/// Index into the node arena. A newtype keeps raw indices out of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Returns the arena index of this node.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the search tree.
///
/// `value` is accumulated, not averaged; the mean is `value / visits`. Under
/// the alternating-player convention the sign is arranged so that a higher
/// value is always better for the player to move at this node, which is why
/// the selectors negate the mean when scoring a child.
#[derive(Debug)]
pub struct Node<S: GameState> {
    /// The game state at this node.
    pub state: S,

    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,

    /// Children in the order they were created.
    pub children: Vec<NodeId>,

    /// Number of completed simulations through this node.
    pub visits: u64,

    /// Accumulated signed simulation value.
    pub value: f64,

    /// Depth in the tree, root = 0.
    pub depth: usize,
}

impl<S: GameState> Node<S> {
    fn new_root(state: S) -> Self {
        Node {
            state,
            parent: None,
            children: Vec::new(),
            visits: 0,
            value: 0.0,
            depth: 0,
        }
    }

    fn new_child(state: S, parent: NodeId, depth: usize) -> Self {
        Node {
            state,
            parent: Some(parent),
            children: Vec::new(),
            visits: 0,
            value: 0.0,
            depth,
        }
    }

    /// Average simulation value, 0.0 before the first visit.
    ///
    /// A node with `visits == 0` has no defined mean; the selectors treat
    /// such a node as maximally attractive instead of reading this.
    pub fn mean(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.value / self.visits as f64
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Search tree with arena-based node storage.
pub struct Tree<S: GameState> {
    nodes: Vec<Node<S>>,
    root: NodeId,
}

impl<S: GameState> Tree<S> {
    /// Creates a tree whose root wraps the given state with zero statistics.
    pub fn new(root_state: S) -> Self {
        Tree {
            nodes: vec![Node::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Root node id, always valid.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrows a node by id.
    pub fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.index()]
    }

    /// Mutably borrows a node by id.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_leaf()
    }

    /// Iterates over all nodes with their ids, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }

    /// Creates a child of `parent` holding `state` and returns its id.
    pub fn add_child(&mut self, parent: NodeId, state: S) -> NodeId {
        let depth = self.get(parent).depth + 1;
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new_child(state, parent, depth));
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Returns the action of the root child with the strictly highest visit
    /// count, ties broken by first-seen order, or `None` if the root has no
    /// children (no legal move was ever expanded).
    pub fn best_action(&self) -> Option<S::Action> {
        let root = self.get(self.root);
        let mut best: Option<(NodeId, u64)> = None;
        for &child_id in &root.children {
            let visits = self.get(child_id).visits;
            let better = match best {
                Some((_, best_visits)) => visits > best_visits,
                None => true,
            };
            if better {
                best = Some((child_id, visits));
            }
        }
        best.and_then(|(id, _)| self.get(id).state.last_action())
    }

    /// Linear scan of the root's children for one whose state matches,
    /// using game-semantic equality. Used for cross-move tree reuse.
    pub fn find_child(&self, state: &S) -> Option<NodeId> {
        let root = self.get(self.root);
        root.children
            .iter()
            .copied()
            .find(|&child| self.get(child).state.same_state(state))
    }

    /// Finds the root child produced by the action with the given id.
    pub fn find_child_by_action(&self, action_id: usize) -> Option<NodeId> {
        let root = self.get(self.root);
        root.children.iter().copied().find(|&child| {
            self.get(child)
                .state
                .last_action()
                .map(|a| a.id())
                == Some(action_id)
        })
    }

    /// Re-roots the tree onto `new_root`, keeping its whole subtree with all
    /// statistics and dropping everything else. Depths are rebased so the
    /// new root sits at depth 0. Node ids are not stable across a rebase.
    pub fn rebase(&mut self, new_root: NodeId) {
        let offset = self.get(new_root).depth;
        let mut nodes: Vec<Node<S>> = Vec::new();
        let mut queue: VecDeque<(NodeId, Option<NodeId>)> = VecDeque::new();
        queue.push_back((new_root, None));

        while let Some((old_id, new_parent)) = queue.pop_front() {
            let old = self.get(old_id);
            let new_id = NodeId::new(nodes.len());
            nodes.push(Node {
                state: old.state.clone(),
                parent: new_parent,
                children: Vec::new(),
                visits: old.visits,
                value: old.value,
                depth: old.depth - offset,
            });
            if let Some(parent) = new_parent {
                nodes[parent.index()].children.push(new_id);
            }
            for &child in &old.children {
                queue.push_back((child, Some(new_id)));
            }
        }

        self.nodes = nodes;
        self.root = NodeId(0);
    }
}
