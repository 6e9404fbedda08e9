//! Component tree
//!
//! Every table subsystem is a node in one ownership tree. A parent owns its
//! children outright; nothing holds a reference back up the tree, nodes name
//! each other by `NodeId` only.
//!
//! Destruction is lazy: `destroy` clears the liveness flag on a node and its
//! whole subtree, and the parent drops dead children on its next `update`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::events::{NodePointer, TableEvent};
use super::widgets::Widget;
use crate::error::{Error, Result};
use crate::table::TableState;

/// Stable handle for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub(crate) struct NodeIds {
    next: u64,
}

impl NodeIds {
    fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// A position in table units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in absolute table units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Half-open on the right and bottom edges
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
    }

    pub fn center(&self) -> Pos {
        Pos::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// `pos` expressed relative to this rectangle's origin
    pub fn relative(&self, pos: Pos) -> Pos {
        Pos::new(pos.x - self.x, pos.y - self.y)
    }
}

/// Behaviour attached to a node.
///
/// Handlers get a [`NodeContext`] for everything outside the component
/// itself: emitting events, owning children, and the table-scoped state.
pub trait Component {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Called once when the node joins the tree, before any event reaches it.
    fn mount(&mut self, _ctx: &mut NodeContext<'_>) -> Result<()> {
        Ok(())
    }

    fn handle_event(&mut self, _ctx: &mut NodeContext<'_>, _event: &TableEvent) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, _ctx: &mut NodeContext<'_>, _dt: Duration) -> Result<()> {
        Ok(())
    }

    /// What the front-end should draw for this node, if anything
    fn widget(&self) -> Option<Widget> {
        None
    }
}

/// Component with no behaviour; groups children
pub struct Container;

impl Component for Container {
    fn name(&self) -> &'static str {
        "container"
    }
}

pub struct Node {
    id: NodeId,
    rect: Rect,
    alive: bool,
    elapsed: Duration,
    children: Vec<Node>,
    component: Box<dyn Component>,
}

impl Node {
    fn new(id: NodeId, rect: Rect, component: Box<dyn Component>) -> Self {
        Self {
            id,
            rect,
            alive: true,
            elapsed: Duration::ZERO,
            children: Vec::new(),
            component,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Time this node has been updated for
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Mark this node and every descendant dead. Returns false if it already was.
    fn destroy(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        for child in &mut self.children {
            child.destroy();
        }
        true
    }

    fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    fn count(&self) -> usize {
        if !self.alive {
            return 0;
        }
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    fn mount(&mut self, ids: &mut NodeIds, state: &mut TableState, outbox: &mut Vec<TableEvent>) -> Result<()> {
        let mut ctx = NodeContext::new(self.id, self.rect, &mut self.children, ids, state, outbox);
        self.component.mount(&mut ctx)
    }

    /// Deliver `event` to this node, then to the children it had when delivery began.
    fn dispatch(
        &mut self,
        event: &TableEvent,
        ids: &mut NodeIds,
        state: &mut TableState,
        outbox: &mut Vec<TableEvent>,
    ) -> Result<()> {
        if !self.alive {
            return Ok(());
        }

        if let TableEvent::Pointer(pointer) = event {
            if self.rect.contains(pointer.pos) {
                outbox.push(TableEvent::PointerInNode(NodePointer {
                    kind: pointer.kind,
                    pos: self.rect.relative(pointer.pos),
                    screen_pos: pointer.pos,
                    node: self.id,
                }));
            }
        }

        let existing = self.children.len();
        let mut ctx = NodeContext::new(self.id, self.rect, &mut self.children, ids, state, outbox);
        self.component.handle_event(&mut ctx, event)?;
        if ctx.destroy_requested {
            self.destroy();
            return Ok(());
        }

        for child in self.children.iter_mut().take(existing) {
            child.dispatch(event, ids, state, outbox)?;
        }
        Ok(())
    }

    /// Update this node, recurse into live children, then drop the dead ones.
    fn update(
        &mut self,
        dt: Duration,
        ids: &mut NodeIds,
        state: &mut TableState,
        outbox: &mut Vec<TableEvent>,
    ) -> Result<()> {
        self.elapsed += dt;

        let mut ctx = NodeContext::new(self.id, self.rect, &mut self.children, ids, state, outbox);
        self.component.update(&mut ctx, dt)?;
        if ctx.destroy_requested {
            self.destroy();
        }

        for child in &mut self.children {
            if child.alive {
                child.update(dt, ids, state, outbox)?;
            }
        }
        self.children.retain(|child| child.alive);
        Ok(())
    }

    fn collect_widgets(&self, out: &mut Vec<(Rect, Widget)>) {
        if !self.alive {
            return;
        }
        if let Some(widget) = self.component.widget() {
            out.push((self.rect, widget));
        }
        for child in &self.children {
            child.collect_widgets(out);
        }
    }
}

/// A component's view of the tree while it handles an event or update.
pub struct NodeContext<'a> {
    id: NodeId,
    rect: Rect,
    children: &'a mut Vec<Node>,
    ids: &'a mut NodeIds,
    state: &'a mut TableState,
    outbox: &'a mut Vec<TableEvent>,
    destroy_requested: bool,
}

impl<'a> NodeContext<'a> {
    fn new(
        id: NodeId,
        rect: Rect,
        children: &'a mut Vec<Node>,
        ids: &'a mut NodeIds,
        state: &'a mut TableState,
        outbox: &'a mut Vec<TableEvent>,
    ) -> Self {
        Self {
            id,
            rect,
            children,
            ids,
            state,
            outbox,
            destroy_requested: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Queue an event; it is delivered in a later pass of the same drain.
    pub fn emit(&mut self, event: TableEvent) {
        self.outbox.push(event);
    }

    /// Attach a new child and mount it. It sees events from the next pass on.
    pub fn spawn(&mut self, rect: Rect, component: impl Component + 'static) -> Result<NodeId> {
        let mut node = Node::new(self.ids.allocate(), rect, Box::new(component));
        node.mount(self.ids, self.state, self.outbox)?;
        let id = node.id;
        self.children.push(node);
        Ok(id)
    }

    /// Destroy a descendant. Unknown or already dead nodes are left alone.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(id))
            .is_some_and(Node::destroy)
    }

    /// Destroy the node this context belongs to once the handler returns.
    pub fn destroy_self(&mut self) {
        self.destroy_requested = true;
    }

    pub fn state(&self) -> &TableState {
        &*self.state
    }

    pub fn state_mut(&mut self) -> &mut TableState {
        &mut *self.state
    }
}

/// Owner of the root node
pub struct ComponentTree {
    root: Node,
    ids: NodeIds,
}

impl ComponentTree {
    pub fn new(rect: Rect) -> Self {
        let mut ids = NodeIds::default();
        let root = Node::new(ids.allocate(), rect, Box::new(Container));
        Self { root, ids }
    }

    pub fn root_id(&self) -> NodeId {
        self.root.id
    }

    pub fn rect(&self) -> Rect {
        self.root.rect
    }

    /// Attach `component` under `parent`.
    pub fn create(
        &mut self,
        parent: NodeId,
        rect: Rect,
        component: impl Component + 'static,
        state: &mut TableState,
    ) -> Result<Vec<TableEvent>> {
        self.create_with_id(parent, rect, component, state).map(|(_, events)| events)
    }

    /// Like [`create`](Self::create) but also returns the new node's id.
    pub fn create_with_id(
        &mut self,
        parent: NodeId,
        rect: Rect,
        component: impl Component + 'static,
        state: &mut TableState,
    ) -> Result<(NodeId, Vec<TableEvent>)> {
        let mut outbox = Vec::new();
        let parent = match self.root.find_mut(parent) {
            Some(node) if node.alive => node,
            _ => return Err(Error::NodeNotFound(parent)),
        };

        let mut node = Node::new(self.ids.allocate(), rect, Box::new(component));
        node.mount(&mut self.ids, state, &mut outbox)?;
        let id = node.id;
        parent.children.push(node);
        Ok((id, outbox))
    }

    /// Destroy a node and its subtree. Destroying twice is a no-op.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        self.root.find_mut(id).is_some_and(Node::destroy)
    }

    pub fn is_alive(&mut self, id: NodeId) -> bool {
        self.root.find_mut(id).is_some_and(|node| node.alive)
    }

    /// Live nodes, root included
    pub fn count(&self) -> usize {
        self.root.count()
    }

    /// Deliver one event to every live node in pre-order.
    pub fn dispatch(&mut self, event: &TableEvent, state: &mut TableState, outbox: &mut Vec<TableEvent>) -> Result<()> {
        self.root.dispatch(event, &mut self.ids, state, outbox)
    }

    /// Advance every live node by `dt`, pruning dead children on the way back up.
    pub fn update(&mut self, dt: Duration, state: &mut TableState) -> Result<Vec<TableEvent>> {
        let mut outbox = Vec::new();
        self.root.update(dt, &mut self.ids, state, &mut outbox)?;
        Ok(outbox)
    }

    /// Widgets of live nodes in pre-order, with absolute rectangles
    pub fn widgets(&self) -> Vec<(Rect, Widget)> {
        let mut out = Vec::new();
        self.root.collect_widgets(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::events::{PointerInput, PointerKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(NodeId, &'static str)>>>;

    /// Records every event and update it sees
    struct Probe {
        log: Log,
        die_on_update: bool,
    }

    impl Component for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn handle_event(&mut self, ctx: &mut NodeContext<'_>, event: &TableEvent) -> Result<()> {
            self.log.borrow_mut().push((ctx.id(), event.name()));
            Ok(())
        }

        fn update(&mut self, ctx: &mut NodeContext<'_>, _dt: Duration) -> Result<()> {
            self.log.borrow_mut().push((ctx.id(), "update"));
            if self.die_on_update {
                ctx.destroy_self();
            }
            Ok(())
        }
    }

    fn probe(log: &Log) -> Probe {
        Probe { log: log.clone(), die_on_update: false }
    }

    fn tree_with_chain() -> (ComponentTree, TableState, Log, [NodeId; 3]) {
        let mut tree = ComponentTree::new(Rect::new(0, 0, 100, 100));
        let mut state = TableState::default();
        let log: Log = Rc::default();
        let root = tree.root_id();
        let (a, _) = tree.create_with_id(root, Rect::new(0, 0, 50, 50), probe(&log), &mut state).unwrap();
        let (b, _) = tree.create_with_id(a, Rect::new(60, 60, 10, 10), probe(&log), &mut state).unwrap();
        let (c, _) = tree.create_with_id(root, Rect::new(0, 0, 10, 10), probe(&log), &mut state).unwrap();
        (tree, state, log, [a, b, c])
    }

    #[test]
    fn test_count_and_subtree_destroy() {
        let (mut tree, mut state, _log, [a, b, c]) = tree_with_chain();
        assert_eq!(tree.count(), 4);

        assert!(tree.destroy(a));
        assert_eq!(tree.count(), 2);
        assert!(!tree.is_alive(b));
        assert!(tree.is_alive(c));

        // double destroy is a no-op
        assert!(!tree.destroy(a));
        assert!(!tree.destroy(NodeId(999)));

        tree.update(Duration::from_millis(16), &mut state).unwrap();
        assert_eq!(tree.count(), 2);
        assert!(matches!(
            tree.create(a, Rect::default(), Container, &mut state),
            Err(Error::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_dispatch_is_pre_order() {
        let (mut tree, mut state, log, [a, b, c]) = tree_with_chain();
        let mut outbox = Vec::new();
        tree.dispatch(&TableEvent::RollRequested, &mut state, &mut outbox).unwrap();
        let order: Vec<_> = log.borrow().iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![a, b, c]);
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_pointer_hits_are_not_clipped_to_parent() {
        let (mut tree, mut state, _log, [a, b, c]) = tree_with_chain();
        let mut outbox = Vec::new();
        let pointer = TableEvent::Pointer(PointerInput { kind: PointerKind::Down, pos: Pos::new(65, 62) });
        tree.dispatch(&pointer, &mut state, &mut outbox).unwrap();

        let hit: Vec<_> = outbox
            .iter()
            .filter_map(|event| match event {
                TableEvent::PointerInNode(p) => Some((p.node, p.pos)),
                _ => None,
            })
            .collect();
        // root and b contain the point; a (b's parent) and c do not
        assert_eq!(hit, vec![(tree.root_id(), Pos::new(65, 62)), (b, Pos::new(5, 2))]);
        assert!(!hit.iter().any(|(id, _)| *id == a || *id == c));
    }

    #[test]
    fn test_dead_nodes_skip_dispatch_and_update() {
        let (mut tree, mut state, log, [a, _b, c]) = tree_with_chain();
        tree.destroy(a);
        let mut outbox = Vec::new();
        tree.dispatch(&TableEvent::RollRequested, &mut state, &mut outbox).unwrap();
        tree.update(Duration::ZERO, &mut state).unwrap();
        let seen: Vec<_> = log.borrow().iter().map(|(id, _)| *id).collect();
        assert_eq!(seen, vec![c, c]);
    }

    #[test]
    fn test_self_destroying_node_runs_final_update_then_is_pruned() {
        let mut tree = ComponentTree::new(Rect::new(0, 0, 10, 10));
        let mut state = TableState::default();
        let log: Log = Rc::default();
        let root = tree.root_id();
        let (doomed, _) = tree
            .create_with_id(root, Rect::default(), Probe { log: log.clone(), die_on_update: true }, &mut state)
            .unwrap();
        tree.create(doomed, Rect::default(), probe(&log), &mut state).unwrap();
        assert_eq!(tree.count(), 3);

        tree.update(Duration::from_millis(5), &mut state).unwrap();
        assert_eq!(log.borrow().as_slice(), &[(doomed, "update")]);
        assert_eq!(tree.count(), 1);
        assert!(!tree.is_alive(doomed));
    }

    struct Spawner {
        spawned: Option<NodeId>,
        log: Log,
    }

    impl Component for Spawner {
        fn name(&self) -> &'static str {
            "spawner"
        }

        fn handle_event(&mut self, ctx: &mut NodeContext<'_>, _event: &TableEvent) -> Result<()> {
            if self.spawned.is_none() {
                self.spawned = Some(ctx.spawn(Rect::default(), probe(&self.log))?);
            }
            Ok(())
        }
    }

    #[test]
    fn test_children_spawned_mid_pass_wait_for_next_pass() {
        let mut tree = ComponentTree::new(Rect::new(0, 0, 10, 10));
        let mut state = TableState::default();
        let log: Log = Rc::default();
        let root = tree.root_id();
        tree.create(root, Rect::default(), Spawner { spawned: None, log: log.clone() }, &mut state)
            .unwrap();

        let mut outbox = Vec::new();
        tree.dispatch(&TableEvent::RollRequested, &mut state, &mut outbox).unwrap();
        assert!(log.borrow().is_empty());
        assert_eq!(tree.count(), 3);

        tree.dispatch(&TableEvent::RollRequested, &mut state, &mut outbox).unwrap();
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(tree.count(), 3);
    }
}
