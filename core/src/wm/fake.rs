//! In-memory window manager that models hy3's tree mutations.
//!
//! `FakeWm` answers queries from fixture data and applies every
//! [`Dispatch`] to a per-workspace tree, so a command log can be checked by
//! the shape it produces rather than only by its text.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::Result;
use crate::types::window::{Monitor, WindowRecord, WorkspaceId};
use crate::wm::{Dispatch, GroupDirection, WmClient};


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Window(String),
    Group {
        direction: GroupDirection,
        children: Vec<Node>,
    },
}


impl Node {
    fn contains(&self, address: &str) -> bool {
        match self {
            Node::Window(a) => a == address,
            Node::Group { children, .. } => children.iter().any(|c| c.contains(address)),
        }
    }

    fn wrap(&mut self, address: &str, direction: GroupDirection) -> bool {
        match self {
            Node::Window(a) if a == address => {
                let inner = Node::Window(a.clone());
                *self = Node::Group {
                    direction,
                    children: vec![inner],
                };
                true
            }
            Node::Window(_) => false,
            Node::Group { children, .. } => children.iter_mut().any(|c| c.wrap(address, direction)),
        }
    }

    fn insert_after(&mut self, target: &str, node: &Node) -> bool {
        let Node::Group { children, .. } = self else {
            return false;
        };
        if let Some(i) = children
            .iter()
            .position(|c| matches!(c, Node::Window(a) if a == target))
        {
            children.insert(i + 1, node.clone());
            return true;
        }
        children.iter_mut().any(|c| c.insert_after(target, node))
    }

    /// Remove a window, pruning groups left empty. Returns false when the
    /// node itself must be dropped.
    fn remove(&mut self, address: &str) -> bool {
        match self {
            Node::Window(a) => a != address,
            Node::Group { children, .. } => {
                children.retain_mut(|c| c.remove(address));
                !children.is_empty()
            }
        }
    }
}


impl fmt::Display for Node {
    /// Compact shape, e.g. `V[H[a,b],c]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Window(a) => write!(f, "{}", a),
            Node::Group { direction, children } => {
                let tag = match direction {
                    GroupDirection::Vertical => "V",
                    GroupDirection::Horizontal => "H",
                    GroupDirection::Tab => "T",
                };
                write!(f, "{}[", tag)?;
                for (i, c) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, "]")
            }
        }
    }
}


pub struct FakeWm {
    monitors: Vec<Monitor>,
    windows: Vec<WindowRecord>,
    trees: BTreeMap<WorkspaceId, Node>,
    focused: Option<String>,
    sizes: HashMap<String, [i32; 2]>,
    log: Vec<Dispatch>,
}


impl FakeWm {
    /// Start with every tiled window of a workspace side by side in one
    /// horizontal group, in fixture order.
    pub fn new(monitors: Vec<Monitor>, windows: Vec<WindowRecord>) -> Self {
        let mut trees: BTreeMap<WorkspaceId, Node> = BTreeMap::new();
        for w in windows.iter().filter(|w| !w.floating) {
            let leaf = Node::Window(w.address.clone());
            match trees.get_mut(&w.workspace) {
                Some(Node::Group { children, .. }) => children.push(leaf),
                _ => {
                    trees.insert(
                        w.workspace,
                        Node::Group {
                            direction: GroupDirection::Horizontal,
                            children: vec![leaf],
                        },
                    );
                }
            }
        }
        FakeWm {
            monitors,
            windows,
            trees,
            focused: None,
            sizes: HashMap::new(),
            log: Vec::new(),
        }
    }

    pub fn tree(&self, workspace: WorkspaceId) -> Option<&Node> {
        self.trees.get(&workspace)
    }

    /// Shape of a workspace tree, or an empty string when it has none.
    pub fn shape(&self, workspace: WorkspaceId) -> String {
        self.tree(workspace).map(|t| t.to_string()).unwrap_or_default()
    }

    pub fn log(&self) -> &[Dispatch] {
        &self.log
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn size_of(&self, address: &str) -> Option<[i32; 2]> {
        self.sizes.get(address).copied()
    }

    pub fn focused_monitor(&self) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.focused)
    }

    fn workspace_of_focus(&self) -> Option<WorkspaceId> {
        let focused = self.focused.as_deref()?;
        self.trees
            .iter()
            .find(|(_, t)| t.contains(focused))
            .map(|(ws, _)| *ws)
    }

    fn detach(&mut self, address: &str) {
        self.trees.retain(|_, t| t.remove(address));
    }

    fn insert(&mut self, address: &str, workspace: WorkspaceId, silent: bool) {
        self.detach(address);
        let leaf = Node::Window(address.to_string());
        let cursor = self
            .focused
            .clone()
            .filter(|f| f != address && self.workspace_of_focus() == Some(workspace));
        match self.trees.get_mut(&workspace) {
            None => {
                self.trees.insert(workspace, leaf);
            }
            Some(root) => {
                let placed = match &cursor {
                    Some(target) => root.insert_after(target, &leaf),
                    None => false,
                };
                if !placed {
                    match root {
                        Node::Group { children, .. } if cursor.is_none() => children.push(leaf),
                        _ => {
                            let old = root.clone();
                            *root = Node::Group {
                                direction: GroupDirection::Horizontal,
                                children: vec![old, leaf],
                            };
                        }
                    }
                }
            }
        }
        if let Some(w) = self.windows.iter_mut().find(|w| w.address == address) {
            w.workspace = workspace;
        }
        if !silent {
            self.focused = Some(address.to_string());
            self.switch_workspace(workspace);
        }
    }

    fn switch_workspace(&mut self, id: WorkspaceId) {
        if let Some(m) = self.monitors.iter_mut().find(|m| m.focused) {
            m.active_workspace = id;
        }
    }
}


impl WmClient for FakeWm {
    fn monitors(&self) -> Result<Vec<Monitor>> {
        Ok(self.monitors.clone())
    }

    fn clients(&self) -> Result<Vec<WindowRecord>> {
        Ok(self.windows.clone())
    }

    fn dispatch(&mut self, cmd: &Dispatch) -> Result<()> {
        self.log.push(cmd.clone());
        match cmd {
            Dispatch::Focus { address } => {
                if self.windows.iter().any(|w| &w.address == address) {
                    self.focused = Some(address.clone());
                }
            }
            Dispatch::WrapGroup { direction } => {
                if let Some(focused) = self.focused.clone() {
                    for tree in self.trees.values_mut() {
                        if tree.wrap(&focused, *direction) {
                            break;
                        }
                    }
                }
            }
            Dispatch::InsertWindow {
                address,
                workspace,
                silent,
            } => self.insert(address, *workspace, *silent),
            Dispatch::Resize { address, w, h } => {
                self.sizes.insert(address.clone(), [*w, *h]);
                if let Some(rec) = self.windows.iter_mut().find(|r| &r.address == address) {
                    rec.size = [*w, *h];
                }
            }
            Dispatch::SwitchWorkspace { id } => self.switch_workspace(*id),
            Dispatch::FocusMonitor { name } => {
                if self.monitors.iter().any(|m| &m.name == name) {
                    for m in self.monitors.iter_mut() {
                        m.focused = &m.name == name;
                    }
                }
            }
        }
        Ok(())
    }
}
