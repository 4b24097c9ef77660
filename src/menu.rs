//! Menu hierarchy and transition table.
//!
//! The menu is data: a [`MenuTree`] is a list of [`NodeSpec`]s, each holding
//! the node's items and, per item, the [`Action`] a confirm press performs.
//! The controller never branches on a specific node; it looks the action up.
//!
//! # Standard Tree
//!
//! ```text
//! MAIN MENU
//! ├── VEHICLE DATA ──> DISP TX DATA ──> (detail) BACK
//! │                    DISP VEH DATA ─> (detail) BACK
//! │                    CANCEL
//! ├── OPERATION MODE ─> MANUAL / AUTO / BACK
//! ├── RETURN HOME ────> CONFIRM / CANCEL
//! └── COMMANDS ───────> OPERATION MODE
//!                       RETURN HOME
//!                       LIGHTS ──────> ON / OFF / AUTO / BACK
//!                       BACK
//! ```
//!
//! Back targets are fixed per node (the node's `parent`), so OPERATION MODE
//! and RETURN HOME return to COMMANDS whichever way they were entered.
//!
//! # Example
//!
//! ```rust
//! use explorer_tx::{Action, Command, MenuNode, MenuTree};
//!
//! let tree = MenuTree::standard();
//! assert_eq!(tree.action(MenuNode::MainMenu, 0), Action::Enter(MenuNode::VehicleDataSubmenu));
//! assert_eq!(tree.action(MenuNode::Lights, 0), Action::Emit(Command::LightsOn));
//! assert_eq!(tree.item_count(MenuNode::Lights), 4);
//! ```

use crate::commands::Command;
use crate::normalize::IndexRange;

/// Maximum label length: a 16-column row minus the selector glyph column
/// and one space.
pub const MAX_LABEL_LEN: usize = 14;

/// Which data set a detail view shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataView {
    /// Readings taken on the transmitter itself.
    Transmitter,
    /// Readings reported by the vehicle.
    Vehicle,
}

/// Where the operator currently is in the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MenuNode {
    /// Top level.
    MainMenu,
    /// Grouping of everything that sends a command.
    Commands,
    /// Manual / autonomous selection.
    OperationMode,
    /// Return-home confirmation.
    ReturnHome,
    /// Light control.
    Lights,
    /// Choice between transmitter and vehicle readings.
    VehicleDataSubmenu,
    /// Live readings of one data set.
    VehicleDataDetail(DataView),
}

impl MenuNode {
    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            MenuNode::MainMenu => "main",
            MenuNode::Commands => "commands",
            MenuNode::OperationMode => "operation-mode",
            MenuNode::ReturnHome => "return-home",
            MenuNode::Lights => "lights",
            MenuNode::VehicleDataSubmenu => "vehicle-data",
            MenuNode::VehicleDataDetail(DataView::Transmitter) => "tx-data",
            MenuNode::VehicleDataDetail(DataView::Vehicle) => "veh-data",
        }
    }

    /// Returns true for nodes whose content follows live telemetry.
    #[inline]
    pub const fn is_live(&self) -> bool {
        matches!(self, MenuNode::VehicleDataDetail(_))
    }
}

/// What confirming a menu item does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Move into another node.
    Enter(MenuNode),
    /// Return to the node's parent.
    Back,
    /// Send a command and stay on the node.
    Emit(Command),
    /// Send a command, then return to the parent.
    EmitAndBack(Command),
}

impl Action {
    /// The command this action sends, [`Command::None`] for navigation.
    #[inline]
    pub const fn command(&self) -> Command {
        match self {
            Action::Emit(cmd) | Action::EmitAndBack(cmd) => *cmd,
            Action::Enter(_) | Action::Back => Command::None,
        }
    }

    /// Returns true if the action leaves towards the parent.
    #[inline]
    pub const fn goes_back(&self) -> bool {
        matches!(self, Action::Back | Action::EmitAndBack(_))
    }
}

/// One selectable row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    /// Text shown on the display.
    pub label: &'static str,
    /// What confirming this row does.
    pub action: Action,
}

impl MenuItem {
    /// Creates an item.
    pub const fn new(label: &'static str, action: Action) -> Self {
        Self { label, action }
    }
}

/// Definition of one node: its items and where "back" leads.
#[derive(Clone, Copy, Debug)]
pub struct NodeSpec<'a> {
    /// The node this spec describes.
    pub node: MenuNode,
    /// Target of [`Action::Back`]. Not owning; the root is its own parent.
    pub parent: MenuNode,
    /// Rows in display order; the index range is `0..items.len()`.
    pub items: &'a [MenuItem],
}

impl NodeSpec<'_> {
    /// Legal index range for this node.
    #[inline]
    pub fn range(&self) -> IndexRange {
        IndexRange::for_items(self.items.len())
    }

    /// Item at `index`, clamped into range. `None` only for a node with no items.
    pub fn item(&self, index: i32) -> Option<&MenuItem> {
        let i = self.range().clamp(index) as usize;
        self.items.get(i)
    }
}

/// Reasons a custom tree is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The first node must be [`MenuNode::MainMenu`].
    MissingRoot,
    /// A node has no items.
    EmptyNode(MenuNode),
    /// A node is defined twice.
    DuplicateNode(MenuNode),
    /// An `Enter` action or a parent names a node the tree lacks.
    UnknownTarget(MenuNode),
    /// A label does not fit the display row.
    LabelTooLong(MenuNode),
}

impl core::fmt::Display for TreeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TreeError::MissingRoot => write!(f, "first node must be the main menu"),
            TreeError::EmptyNode(n) => write!(f, "node {} has no items", n.name()),
            TreeError::DuplicateNode(n) => write!(f, "node {} defined twice", n.name()),
            TreeError::UnknownTarget(n) => write!(f, "node {} is referenced but not defined", n.name()),
            TreeError::LabelTooLong(n) => write!(f, "node {} has a label over {} chars", n.name(), MAX_LABEL_LEN),
        }
    }
}

/// The complete, immutable menu definition.
#[derive(Clone, Copy, Debug)]
pub struct MenuTree<'a> {
    nodes: &'a [NodeSpec<'a>],
}

impl<'a> MenuTree<'a> {
    /// Wraps `nodes` without validating them.
    #[cfg(test)]
    pub(crate) const fn from_nodes_unchecked(nodes: &'a [NodeSpec<'a>]) -> Self {
        Self { nodes }
    }

    /// Builds a tree from custom node definitions.
    ///
    /// # Errors
    ///
    /// Returns a [`TreeError`] unless the root comes first, every node has
    /// items, no node repeats, every reference resolves, and every label
    /// fits the display.
    pub fn new(nodes: &'a [NodeSpec<'a>]) -> Result<Self, TreeError> {
        match nodes.first() {
            Some(spec) if spec.node == MenuNode::MainMenu => {}
            _ => return Err(TreeError::MissingRoot),
        }

        let defined = |n: MenuNode| nodes.iter().any(|s| s.node == n);

        for (i, spec) in nodes.iter().enumerate() {
            if spec.items.is_empty() {
                return Err(TreeError::EmptyNode(spec.node));
            }
            if nodes[..i].iter().any(|s| s.node == spec.node) {
                return Err(TreeError::DuplicateNode(spec.node));
            }
            if !defined(spec.parent) {
                return Err(TreeError::UnknownTarget(spec.parent));
            }
            for item in spec.items {
                if item.label.len() > MAX_LABEL_LEN {
                    return Err(TreeError::LabelTooLong(spec.node));
                }
                if let Action::Enter(target) = item.action {
                    if !defined(target) {
                        return Err(TreeError::UnknownTarget(target));
                    }
                }
            }
        }

        Ok(Self { nodes })
    }

    /// The shipped menu.
    pub const fn standard() -> MenuTree<'static> {
        MenuTree {
            nodes: &STANDARD_NODES,
        }
    }

    /// The root node's definition.
    #[inline]
    pub fn root(&self) -> &NodeSpec<'a> {
        &self.nodes[0]
    }

    /// All node definitions, root first.
    #[inline]
    pub fn nodes(&self) -> &[NodeSpec<'a>] {
        self.nodes
    }

    /// Definition of `node`; the root if the tree does not define it.
    pub fn spec(&self, node: MenuNode) -> &NodeSpec<'a> {
        self.nodes
            .iter()
            .find(|s| s.node == node)
            .unwrap_or_else(|| self.root())
    }

    /// Number of items on `node`.
    #[inline]
    pub fn item_count(&self, node: MenuNode) -> usize {
        self.spec(node).items.len()
    }

    /// Legal index range of `node`.
    #[inline]
    pub fn range(&self, node: MenuNode) -> IndexRange {
        self.spec(node).range()
    }

    /// Parent of `node`.
    #[inline]
    pub fn parent(&self, node: MenuNode) -> MenuNode {
        self.spec(node).parent
    }

    /// Action bound to (node, index); the index is clamped first.
    ///
    /// A node without items acts as a lone BACK.
    #[inline]
    pub fn action(&self, node: MenuNode, index: i32) -> Action {
        self.spec(node).item(index).map_or(Action::Back, |item| item.action)
    }

    /// Resolves a confirm press at (node, index).
    ///
    /// Returns the node to show next and the command to send.
    pub fn transition(&self, node: MenuNode, index: i32) -> (MenuNode, Command) {
        let action = self.action(node, index);
        let next = match action {
            Action::Enter(target) => target,
            Action::Back | Action::EmitAndBack(_) => self.parent(node),
            Action::Emit(_) => node,
        };
        (next, action.command())
    }
}

impl Default for MenuTree<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Standard tree
// ============================================================================

const MAIN_ITEMS: [MenuItem; 4] = [
    MenuItem::new("VEHICLE DATA", Action::Enter(MenuNode::VehicleDataSubmenu)),
    MenuItem::new("OPERATION MODE", Action::Enter(MenuNode::OperationMode)),
    MenuItem::new("RETURN HOME", Action::Enter(MenuNode::ReturnHome)),
    MenuItem::new("COMMANDS", Action::Enter(MenuNode::Commands)),
];

const COMMAND_ITEMS: [MenuItem; 4] = [
    MenuItem::new("OPERATION MODE", Action::Enter(MenuNode::OperationMode)),
    MenuItem::new("RETURN HOME", Action::Enter(MenuNode::ReturnHome)),
    MenuItem::new("LIGHTS", Action::Enter(MenuNode::Lights)),
    MenuItem::new("BACK", Action::Back),
];

const OPERATION_ITEMS: [MenuItem; 3] = [
    MenuItem::new("MANUAL", Action::Emit(Command::SetOperationManual)),
    MenuItem::new("AUTO", Action::Emit(Command::SetOperationAuto)),
    MenuItem::new("BACK", Action::Back),
];

const RETURN_HOME_ITEMS: [MenuItem; 2] = [
    MenuItem::new("CONFIRM", Action::Emit(Command::ReturnHome)),
    MenuItem::new("CANCEL", Action::EmitAndBack(Command::Cancel)),
];

const LIGHT_ITEMS: [MenuItem; 4] = [
    MenuItem::new("ON", Action::Emit(Command::LightsOn)),
    MenuItem::new("OFF", Action::Emit(Command::LightsOff)),
    MenuItem::new("AUTO", Action::Emit(Command::LightsAuto)),
    MenuItem::new("BACK", Action::Back),
];

const VEHICLE_DATA_ITEMS: [MenuItem; 3] = [
    MenuItem::new(
        "DISP TX DATA",
        Action::Enter(MenuNode::VehicleDataDetail(DataView::Transmitter)),
    ),
    MenuItem::new(
        "DISP VEH DATA",
        Action::Enter(MenuNode::VehicleDataDetail(DataView::Vehicle)),
    ),
    MenuItem::new("CANCEL", Action::Back),
];

const DETAIL_ITEMS: [MenuItem; 1] = [MenuItem::new("BACK", Action::Back)];

static STANDARD_NODES: [NodeSpec<'static>; 8] = [
    NodeSpec {
        node: MenuNode::MainMenu,
        parent: MenuNode::MainMenu,
        items: &MAIN_ITEMS,
    },
    NodeSpec {
        node: MenuNode::Commands,
        parent: MenuNode::MainMenu,
        items: &COMMAND_ITEMS,
    },
    NodeSpec {
        node: MenuNode::OperationMode,
        parent: MenuNode::Commands,
        items: &OPERATION_ITEMS,
    },
    NodeSpec {
        node: MenuNode::ReturnHome,
        parent: MenuNode::Commands,
        items: &RETURN_HOME_ITEMS,
    },
    NodeSpec {
        node: MenuNode::Lights,
        parent: MenuNode::Commands,
        items: &LIGHT_ITEMS,
    },
    NodeSpec {
        node: MenuNode::VehicleDataSubmenu,
        parent: MenuNode::MainMenu,
        items: &VEHICLE_DATA_ITEMS,
    },
    NodeSpec {
        node: MenuNode::VehicleDataDetail(DataView::Transmitter),
        parent: MenuNode::VehicleDataSubmenu,
        items: &DETAIL_ITEMS,
    },
    NodeSpec {
        node: MenuNode::VehicleDataDetail(DataView::Vehicle),
        parent: MenuNode::VehicleDataSubmenu,
        items: &DETAIL_ITEMS,
    },
];
