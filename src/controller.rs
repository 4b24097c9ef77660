//! The menu state machine.
//!
//! [`MenuController`] owns all navigation state: the active node, the last
//! rendered index, and whether the next poll must draw regardless. The
//! main loop calls [`poll`](MenuController::poll) every iteration; each
//! poll does at most two things, in this order:
//!
//! 1. **Confirm**: on a released-to-pressed edge of the confirm button, the
//!    action bound to (node, index at the press) runs. Entering a node
//!    re-bases the encoder by the position seen at the press, so the new
//!    node starts on its first item plus any detents turned while held.
//! 2. **Render**: if the index moved, a node was just entered, or a live
//!    data view's content changed, a [`RenderInstruction`] is produced.
//!
//! # Example
//!
//! ```rust
//! use explorer_tx::{Command, EncoderCapture, MenuController, MenuNode, MenuTree, Telemetry};
//! use explorer_tx::config::MenuConfig;
//! use explorer_tx::hal::MockButton;
//!
//! let encoder = EncoderCapture::default();
//! let mut menu = MenuController::new(
//!     MenuTree::standard(),
//!     &encoder,
//!     MockButton::new(),
//!     MenuConfig::default(),
//! );
//! let telemetry = Telemetry::default();
//! menu.poll(&telemetry);
//!
//! // Turn to COMMANDS and confirm
//! for t in [0, 10, 20] {
//!     encoder.on_edge(true, t);
//! }
//! menu.button_mut().click();
//! let out = menu.poll(&telemetry);
//! assert_eq!(menu.node(), MenuNode::Commands);
//! assert_eq!(out.command, Command::None);
//! assert_eq!(out.render.unwrap().line1.as_str(), "OPERATION MODE");
//! ```

use log::{debug, info};

use crate::commands::Command;
use crate::config::MenuConfig;
use crate::encoder::EncoderCapture;
use crate::menu::{MenuNode, MenuTree};
use crate::normalize::has_changed;
use crate::render::{render, RenderInstruction, Telemetry};
use crate::traits::ConfirmButton;

/// Result of one [`MenuController::poll`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuPoll {
    /// Instruction to draw, if the screen must change.
    pub render: Option<RenderInstruction>,
    /// Command confirmed during this poll; [`Command::None`] otherwise.
    pub command: Command,
}

/// Menu navigation driven by the encoder and the confirm button.
///
/// # Type Parameter
///
/// - `B`: The confirm button ([`ConfirmButton`] trait)
///
/// The encoder capture is borrowed: it normally lives in a `static` that
/// the interrupt handler also reaches.
pub struct MenuController<'a, B> {
    tree: MenuTree<'a>,
    encoder: &'a EncoderCapture,
    button: B,
    config: MenuConfig,
    node: MenuNode,
    last_rendered_index: Option<i32>,
    last_instruction: Option<RenderInstruction>,
    first_render_pending: bool,
    button_was_pressed: bool,
}

impl<'a, B: ConfirmButton> MenuController<'a, B> {
    /// Creates a controller on the tree's root, first item selected.
    ///
    /// The encoder counter is zeroed so the root starts on index 0, and
    /// takes its debounce window from `config`.
    pub fn new(
        tree: MenuTree<'a>,
        encoder: &'a EncoderCapture,
        button: B,
        config: MenuConfig,
    ) -> Self {
        encoder.reset();
        encoder.set_debounce_ms(config.debounce_ms);
        let node = tree.root().node;
        Self {
            tree,
            encoder,
            button,
            config,
            node,
            last_rendered_index: None,
            last_instruction: None,
            first_render_pending: true,
            button_was_pressed: false,
        }
    }

    /// Runs one iteration of the state machine.
    pub fn poll(&mut self, telemetry: &Telemetry) -> MenuPoll {
        let command = self.handle_confirm();
        let render = self.render_if_needed(telemetry);
        MenuPoll { render, command }
    }

    /// Looks for a confirm edge and applies the bound action.
    fn handle_confirm(&mut self) -> Command {
        let pressed = self.button.is_pressed();
        let edge = pressed && !self.button_was_pressed;
        self.button_was_pressed = pressed;
        if !edge {
            return Command::None;
        }

        // The item under the cursor at the press; detents turned while the
        // button is held count toward the next node
        let raw = self.encoder.current_position();
        let index = self.tree.range(self.node).clamp(raw);

        // One physical press is one event, however long it is held
        if self.button.wait_for_release(self.config.release_timeout_ms) {
            self.button_was_pressed = false;
        }

        let (next, command) = self.tree.transition(self.node, index);

        if command.is_some() {
            info!("menu: {} item {} sent {:?}", self.node.name(), index, command);
        }
        if next != self.node {
            info!("menu: {} -> {}", self.node.name(), next.name());
            self.enter(next, raw);
        }
        command
    }

    /// Moves to `node` with its first item selected.
    fn enter(&mut self, node: MenuNode, observed_raw: i32) {
        self.encoder.rebase(observed_raw);
        debug!("menu: encoder re-based by {}", observed_raw);
        self.node = node;
        self.last_rendered_index = None;
        self.last_instruction = None;
        self.first_render_pending = true;
    }

    fn render_if_needed(&mut self, telemetry: &Telemetry) -> Option<RenderInstruction> {
        let range = self.tree.range(self.node);
        let raw = self.encoder.current_position();
        let index = range.clamp(raw);

        if self.config.absorb_overshoot {
            let excess = range.excess(raw);
            if excess != 0 {
                self.encoder.rebase(excess);
                debug!("menu: absorbed overshoot of {}", excess);
            }
        }

        let moved = has_changed(index, self.last_rendered_index);
        if !(self.first_render_pending || moved || self.node.is_live()) {
            return None;
        }

        let instruction = render(&self.tree, self.node, index, telemetry);
        let unchanged = self.last_instruction.as_ref() == Some(&instruction);
        if !self.first_render_pending && !moved && unchanged {
            return None;
        }

        debug!(
            "menu: render {} index {} ({:?})",
            self.node.name(),
            index,
            instruction.selector_row
        );
        self.first_render_pending = false;
        self.last_rendered_index = Some(index);
        self.last_instruction = Some(instruction.clone());
        Some(instruction)
    }

    /// Forces the next poll to redraw, e.g. after a message covered the menu.
    pub fn request_redraw(&mut self) {
        self.first_render_pending = true;
    }

    /// Active node.
    #[inline]
    pub fn node(&self) -> MenuNode {
        self.node
    }

    /// Selected index as the encoder currently stands.
    pub fn index(&self) -> i32 {
        self.tree
            .range(self.node)
            .clamp(self.encoder.current_position())
    }

    /// Index shown by the last render, `None` until the node has been drawn.
    #[inline]
    pub fn last_rendered_index(&self) -> Option<i32> {
        self.last_rendered_index
    }

    /// Returns true if the next poll will draw regardless of movement.
    #[inline]
    pub fn is_render_pending(&self) -> bool {
        self.first_render_pending
    }

    /// The menu definition.
    #[inline]
    pub fn tree(&self) -> &MenuTree<'a> {
        &self.tree
    }

    /// The navigation settings.
    #[inline]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// The confirm button.
    #[inline]
    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    use crate::hal::MockButton;
    use crate::menu::DataView;
    use crate::render::Row;

    struct Rig {
        encoder: EncoderCapture,
        t: Cell<u32>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                encoder: EncoderCapture::default(),
                t: Cell::new(0),
            }
        }

        /// Detents spaced well outside the debounce window.
        fn turn(&self, detents: i32) {
            for _ in 0..detents.unsigned_abs() {
                self.t.set(self.t.get() + 10);
                self.encoder.on_edge(detents > 0, self.t.get());
            }
        }
    }

    fn controller(rig: &Rig, config: MenuConfig) -> MenuController<'_, MockButton> {
        MenuController::new(MenuTree::standard(), &rig.encoder, MockButton::new(), config)
    }

    fn confirm(menu: &mut MenuController<'_, MockButton>) -> MenuPoll {
        menu.button_mut().click();
        menu.poll(&Telemetry::default())
    }

    // =========================================================================
    // Initial state
    // =========================================================================

    #[test]
    fn starts_on_main_menu_with_render_pending() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        assert_eq!(menu.node(), MenuNode::MainMenu);
        assert!(menu.is_render_pending());
        assert_eq!(menu.last_rendered_index(), None);

        let out = menu.poll(&Telemetry::default());
        let r = out.render.unwrap();
        assert_eq!(r.line1.as_str(), "VEHICLE DATA");
        assert_eq!(out.command, Command::None);
        assert!(!menu.is_render_pending());
        assert_eq!(menu.last_rendered_index(), Some(0));
    }

    #[test]
    fn new_zeroes_a_used_encoder() {
        let rig = Rig::new();
        rig.turn(7);
        let menu = controller(&rig, MenuConfig::default());
        assert_eq!(menu.index(), 0);
    }

    #[test]
    fn idle_poll_renders_nothing() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        menu.poll(&Telemetry::default());
        assert_eq!(menu.poll(&Telemetry::default()), MenuPoll::default());
    }

    // =========================================================================
    // Index changes
    // =========================================================================

    #[test]
    fn turning_renders_new_page() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        menu.poll(&Telemetry::default());

        rig.turn(1);
        let r = menu.poll(&Telemetry::default()).render.unwrap();
        assert_eq!(r.line1.as_str(), "VEHICLE DATA");
        assert_eq!(r.line2.as_str(), "OPERATION MODE");
        assert_eq!(r.selector_row, Row::Bottom);
    }

    #[test]
    fn overshoot_is_absorbed() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        menu.poll(&Telemetry::default());

        rig.turn(6); // Four items: index saturates at 3
        assert!(menu.poll(&Telemetry::default()).render.is_some());
        assert_eq!(rig.encoder.current_position(), 3);

        // First detent back moves the selection
        rig.turn(-1);
        menu.poll(&Telemetry::default());
        assert_eq!(menu.last_rendered_index(), Some(2));
    }

    #[test]
    fn overshoot_kept_when_absorption_disabled() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default().with_absorb_overshoot(false));
        menu.poll(&Telemetry::default());

        rig.turn(6);
        menu.poll(&Telemetry::default());
        assert_eq!(rig.encoder.current_position(), 6);

        rig.turn(-1);
        assert_eq!(menu.poll(&Telemetry::default()).render, None);
        assert_eq!(menu.last_rendered_index(), Some(3));
    }

    #[test]
    fn turning_below_zero_stays_on_first_item() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        menu.poll(&Telemetry::default());

        rig.turn(-3);
        assert_eq!(menu.poll(&Telemetry::default()).render, None);
        assert_eq!(menu.index(), 0);
    }

    // =========================================================================
    // Confirm
    // =========================================================================

    #[test]
    fn vehicle_data_entered_from_index_zero() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        menu.poll(&Telemetry::default());

        let out = confirm(&mut menu);
        assert_eq!(menu.node(), MenuNode::VehicleDataSubmenu);
        assert_eq!(out.command, Command::None);
        let r = out.render.unwrap();
        assert_eq!(r.line1.as_str(), "DISP TX DATA");
        assert_eq!(r.line2.as_str(), "DISP VEH DATA");
        assert_eq!(r.selector_row, Row::Top);
    }

    #[test]
    fn entry_rebases_to_first_item() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        menu.poll(&Telemetry::default());

        rig.turn(3);
        menu.poll(&Telemetry::default());
        confirm(&mut menu);
        assert_eq!(menu.node(), MenuNode::Commands);
        assert_eq!(rig.encoder.current_position(), 0);
        assert_eq!(menu.last_rendered_index(), Some(0));
    }

    #[test]
    fn emit_stays_and_yields_command() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        menu.poll(&Telemetry::default());

        rig.turn(1); // OPERATION MODE
        menu.poll(&Telemetry::default());
        confirm(&mut menu);
        assert_eq!(menu.node(), MenuNode::OperationMode);

        let out = confirm(&mut menu);
        assert_eq!(out.command, Command::SetOperationManual);
        assert_eq!(menu.node(), MenuNode::OperationMode);
        assert_eq!(out.render, None);
    }

    #[test]
    fn lights_back_returns_to_commands() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        menu.poll(&Telemetry::default());

        rig.turn(3);
        menu.poll(&Telemetry::default());
        confirm(&mut menu); // COMMANDS
        rig.turn(2);
        menu.poll(&Telemetry::default());
        confirm(&mut menu); // LIGHTS
        assert_eq!(menu.node(), MenuNode::Lights);

        rig.turn(3);
        menu.poll(&Telemetry::default());
        let out = confirm(&mut menu);
        assert_eq!(menu.node(), MenuNode::Commands);
        assert_eq!(out.command, Command::None);
        assert_eq!(menu.index(), 0);
        assert!(out.render.is_some());
    }

    #[test]
    fn return_home_cancel_emits_and_goes_back() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        menu.poll(&Telemetry::default());

        rig.turn(2);
        menu.poll(&Telemetry::default());
        confirm(&mut menu);
        assert_eq!(menu.node(), MenuNode::ReturnHome);

        rig.turn(1);
        menu.poll(&Telemetry::default());
        let out = confirm(&mut menu);
        assert_eq!(out.command, Command::Cancel);
        assert_eq!(menu.node(), MenuNode::Commands);
    }

    #[test]
    fn held_button_is_one_event() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default().with_release_timeout_ms(3));
        menu.poll(&Telemetry::default());

        menu.button_mut().hold();
        menu.poll(&Telemetry::default());
        assert_eq!(menu.node(), MenuNode::VehicleDataSubmenu);

        // Still held after the release wait gave up: no second confirm
        menu.poll(&Telemetry::default());
        menu.poll(&Telemetry::default());
        assert_eq!(menu.node(), MenuNode::VehicleDataSubmenu);
        assert_eq!(menu.button_mut().wait_count, 1);

        menu.button_mut().release();
        menu.poll(&Telemetry::default());
        confirm(&mut menu);
        assert_eq!(
            menu.node(),
            MenuNode::VehicleDataDetail(DataView::Transmitter)
        );
    }

    /// Button whose release wait sees the knob turn one detent clockwise.
    struct SlippingButton<'e> {
        encoder: &'e EncoderCapture,
        pressed: bool,
        t: u32,
    }

    impl ConfirmButton for SlippingButton<'_> {
        fn is_pressed(&mut self) -> bool {
            self.pressed
        }

        fn wait_for_release(&mut self, _timeout_ms: u32) -> bool {
            self.t += 10;
            self.encoder.on_edge(true, self.t);
            self.pressed = false;
            true
        }
    }

    #[test]
    fn confirm_uses_index_at_press_not_after_release() {
        let rig = Rig::new();
        let button = SlippingButton {
            encoder: &rig.encoder,
            pressed: false,
            t: 1_000,
        };
        let mut menu =
            MenuController::new(MenuTree::standard(), &rig.encoder, button, MenuConfig::default());
        menu.poll(&Telemetry::default());

        // Pressed on VEHICLE DATA; the knob slips to OPERATION MODE while held
        menu.button_mut().pressed = true;
        let out = menu.poll(&Telemetry::default());
        assert_eq!(menu.node(), MenuNode::VehicleDataSubmenu);
        assert_eq!(out.command, Command::None);

        // The slipped detent carries into the new node
        assert_eq!(menu.index(), 1);
        assert_eq!(out.render.unwrap().selector_row, Row::Bottom);
    }

    // =========================================================================
    // Debounce configuration
    // =========================================================================

    #[test]
    fn config_debounce_reaches_the_encoder() {
        let rig = Rig::new();
        let _menu = controller(&rig, MenuConfig::default().with_debounce_ms(50));
        assert_eq!(rig.encoder.debounce_ms(), 50);

        assert!(rig.encoder.on_edge(true, 1_000));
        assert!(!rig.encoder.on_edge(true, 1_010));
        assert!(!rig.encoder.on_edge(true, 1_049));
        assert!(rig.encoder.on_edge(true, 1_050));
        assert_eq!(rig.encoder.current_position(), 2);
    }

    // =========================================================================
    // Live data views
    // =========================================================================

    #[test]
    fn detail_redraws_when_telemetry_changes() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        menu.poll(&Telemetry::default());
        confirm(&mut menu);
        let out = confirm(&mut menu);
        assert_eq!(
            menu.node(),
            MenuNode::VehicleDataDetail(DataView::Transmitter)
        );
        assert_eq!(out.render.unwrap().line1.as_str(), "TX  --C  --%");

        let mut telemetry = Telemetry::default();
        assert_eq!(menu.poll(&telemetry).render, None);

        telemetry.tx_temperature_c = Some(22);
        let r = menu.poll(&telemetry).render.unwrap();
        assert_eq!(r.line1.as_str(), "TX  22C  --%");
        assert_eq!(menu.poll(&telemetry).render, None);
    }

    #[test]
    fn request_redraw_draws_same_page() {
        let rig = Rig::new();
        let mut menu = controller(&rig, MenuConfig::default());
        let first = menu.poll(&Telemetry::default()).render;
        menu.request_redraw();
        assert_eq!(menu.poll(&Telemetry::default()).render, first);
    }
}
