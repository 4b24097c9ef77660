//! Edge case and boundary condition tests for the transmitter

use explorer_tx::{
    config::{Config, MenuConfig, SensorConfig},
    hal::{MockAccelerometer, MockButton, MockDisplay, MockJoystick, MockRadio},
    normalize, Action, Calibration, Command, DataPackage, EncoderCapture, JoystickReading,
    MenuController, MenuItem, MenuNode, MenuTree, MpuRawData, NodeSpec, Orientation, RawAxes,
    Telemetry, TiltBounds, TiltReading, TreeError, TxUnit, UnitError, VehicleStatus,
};

// ============================================================================
// Normalizer Boundaries
// ============================================================================

#[test]
fn normalize_at_bounds() {
    assert_eq!(normalize(0, 0, 3), 0);
    assert_eq!(normalize(3, 0, 3), 3);
    assert_eq!(normalize(-1, 0, 3), 0);
    assert_eq!(normalize(4, 0, 3), 3);
}

#[test]
fn normalize_extremes() {
    assert_eq!(normalize(i32::MIN, 0, 3), 0);
    assert_eq!(normalize(i32::MAX, 0, 3), 3);
}

#[test]
fn normalize_single_item_range() {
    for raw in [-5, 0, 1, 7] {
        assert_eq!(normalize(raw, 0, 0), 0);
    }
}

// ============================================================================
// Encoder Timing
// ============================================================================

#[test]
fn edge_exactly_at_debounce_window_is_accepted() {
    let encoder = EncoderCapture::new(5);
    assert!(encoder.on_edge(true, 100));
    assert!(!encoder.on_edge(true, 104));
    assert!(encoder.on_edge(true, 105));
    assert_eq!(encoder.current_position(), 2);
}

#[test]
fn dropped_edge_does_not_extend_window() {
    let encoder = EncoderCapture::new(5);
    assert!(encoder.on_edge(false, 100));
    assert!(!encoder.on_edge(false, 103));
    // Measured from the last accepted edge at 100, not the dropped one
    assert!(encoder.on_edge(false, 106));
    assert_eq!(encoder.current_position(), -2);
}

#[test]
fn debounce_survives_clock_wrap() {
    let encoder = EncoderCapture::new(5);
    assert!(encoder.on_edge(true, u32::MAX - 1));
    assert!(!encoder.on_edge(true, 1));
    assert!(encoder.on_edge(true, 4));
    assert_eq!(encoder.current_position(), 2);
}

#[test]
fn bounce_burst_counts_once() {
    let encoder = EncoderCapture::new(5);
    let accepted = (0..5).filter(|t| encoder.on_edge(true, 50 + t)).count();
    assert_eq!(accepted, 1);
    assert_eq!(encoder.current_position(), 1);
}

// ============================================================================
// Button Handling
// ============================================================================

#[test]
fn held_button_confirms_once() {
    let encoder = EncoderCapture::new(5);
    let config = MenuConfig::default().with_release_timeout_ms(3);
    let mut menu = MenuController::new(MenuTree::standard(), &encoder, MockButton::new(), config);
    menu.poll(&Telemetry::default());

    // Stuck on the OPERATION MODE page
    encoder.on_edge(true, 10);
    menu.poll(&Telemetry::default());
    menu.button_mut().hold();
    menu.poll(&Telemetry::default());
    assert_eq!(menu.node(), MenuNode::OperationMode);

    // Still held: MANUAL is not confirmed
    for _ in 0..5 {
        assert_eq!(menu.poll(&Telemetry::default()).command, Command::None);
    }

    menu.button_mut().release();
    menu.poll(&Telemetry::default());
    menu.button_mut().click();
    assert_eq!(
        menu.poll(&Telemetry::default()).command,
        Command::SetOperationManual
    );
}

// ============================================================================
// Custom Trees
// ============================================================================

const ROOT_ITEMS: [MenuItem; 2] = [
    MenuItem::new("LIGHTS ON", Action::Emit(Command::LightsOn)),
    MenuItem::new("LIGHTS OFF", Action::Emit(Command::LightsOff)),
];

#[test]
fn single_node_tree_is_valid() {
    let nodes = [NodeSpec {
        node: MenuNode::MainMenu,
        parent: MenuNode::MainMenu,
        items: &ROOT_ITEMS,
    }];
    let tree = MenuTree::new(&nodes).unwrap();
    assert_eq!(
        tree.transition(MenuNode::MainMenu, 1),
        (MenuNode::MainMenu, Command::LightsOff)
    );
    // Undefined nodes fall back to the root
    assert_eq!(tree.spec(MenuNode::Lights).node, MenuNode::MainMenu);
}

#[test]
fn tree_without_root_first_is_rejected() {
    let nodes = [NodeSpec {
        node: MenuNode::Lights,
        parent: MenuNode::Lights,
        items: &ROOT_ITEMS,
    }];
    assert_eq!(MenuTree::new(&nodes).err(), Some(TreeError::MissingRoot));
    assert_eq!(MenuTree::new(&[]).err(), Some(TreeError::MissingRoot));
}

#[test]
fn tree_with_dangling_enter_is_rejected() {
    let items = [MenuItem::new("LIGHTS", Action::Enter(MenuNode::Lights))];
    let nodes = [NodeSpec {
        node: MenuNode::MainMenu,
        parent: MenuNode::MainMenu,
        items: &items,
    }];
    assert_eq!(
        MenuTree::new(&nodes).err(),
        Some(TreeError::UnknownTarget(MenuNode::Lights))
    );
}

#[test]
fn tree_with_overlong_label_is_rejected() {
    let items = [MenuItem::new("FIFTEEN CHARS!!", Action::Back)];
    let nodes = [NodeSpec {
        node: MenuNode::MainMenu,
        parent: MenuNode::MainMenu,
        items: &items,
    }];
    assert_eq!(
        MenuTree::new(&nodes).err(),
        Some(TreeError::LabelTooLong(MenuNode::MainMenu))
    );
}

#[test]
fn empty_node_is_rejected() {
    let nodes = [NodeSpec {
        node: MenuNode::MainMenu,
        parent: MenuNode::MainMenu,
        items: &[],
    }];
    assert_eq!(
        MenuTree::new(&nodes).err(),
        Some(TreeError::EmptyNode(MenuNode::MainMenu))
    );
}

// ============================================================================
// Sticks and Tilt
// ============================================================================

#[test]
fn dead_zone_edges() {
    for v in 501..=509 {
        let r = JoystickReading::from_raw(RawAxes { x: v, y: v }, Orientation::Standard);
        assert!(r.is_neutral(), "{} should be neutral", v);
    }
    let r = JoystickReading::from_raw(RawAxes { x: 1023, y: 0 }, Orientation::Standard);
    assert_eq!((r.right, r.up), (255, 255));
}

#[test]
fn raw_above_ten_bits_saturates() {
    let r = JoystickReading::from_raw(RawAxes { x: 4095, y: 505 }, Orientation::Standard);
    assert_eq!(r.right, 255);
}

#[test]
fn tilt_saturates_past_bounds() {
    let cal = Calibration::new().finish(0);
    let raw = MpuRawData {
        x_acc: i16::MIN,
        y_acc: i16::MAX,
        ..MpuRawData::default()
    };
    let tilt = TiltReading::from_raw(&raw, &cal, &TiltBounds::default());
    assert_eq!((tilt.left, tilt.right), (255, 0));
    assert_eq!((tilt.down, tilt.up), (0, 255));
}

#[test]
fn empty_calibration_centers_on_zero() {
    let cal = Calibration::new().finish(180);
    assert_eq!(cal.samples(), 0);
    assert_eq!((cal.min_x, cal.max_x), (-180, 180));
}

// ============================================================================
// Frames
// ============================================================================

#[test]
fn unknown_command_code_rejected() {
    let mut bytes = DataPackage::default().to_bytes();
    bytes[13] = 200;
    assert!(DataPackage::from_bytes(&bytes).is_none());
}

#[test]
fn none_never_clears_pending_command() {
    let mut pkg = DataPackage::default();
    pkg.latch(Command::ReturnHome);
    assert_eq!(pkg.latch(Command::None), None);
    assert_eq!(pkg.menu_select, Command::ReturnHome);
}

#[test]
fn vehicle_status_boundaries() {
    assert!(VehicleStatus::from_bytes(&[0, 0]).is_none());
    assert!(VehicleStatus::from_bytes(&[0, 0, 101]).is_none());
    let status = VehicleStatus::from_bytes(&[0xFF, 0xF6, 100, 9]).unwrap();
    assert_eq!(status.temperature_c, -10);
    assert_eq!(status.battery_pct, 100);
}

// ============================================================================
// Unit Failures
// ============================================================================

#[test]
fn display_failure_is_retried_next_tick() {
    let encoder = EncoderCapture::new(5);
    let config = Config::default()
        .with_sensor(SensorConfig::default().with_calibration_samples(1));
    let menu = MenuController::new(
        MenuTree::standard(),
        &encoder,
        MockButton::new(),
        config.menu.clone(),
    );
    let mut tx = TxUnit::new(
        menu,
        MockJoystick::new(),
        MockAccelerometer::new(),
        MockDisplay::new(),
        MockRadio::new(),
        config,
    );
    tx.start().unwrap();

    encoder.on_edge(true, 10);
    tx.display_mut().fail = true;
    assert_eq!(tx.tick(0), Err(UnitError::Display(())));

    tx.display_mut().fail = false;
    let report = tx.tick(10).unwrap();
    assert!(report.rendered);
    assert_eq!(
        tx.display().last_render.as_ref().unwrap().line1.as_str(),
        "VEHICLE DATA"
    );
}

#[test]
fn vehicle_status_reaches_data_view() {
    let encoder = EncoderCapture::new(5);
    let config = Config::default()
        .with_sensor(SensorConfig::default().with_calibration_samples(1));
    let menu = MenuController::new(
        MenuTree::standard(),
        &encoder,
        MockButton::new(),
        config.menu.clone(),
    );
    let mut tx = TxUnit::new(
        menu,
        MockJoystick::new(),
        MockAccelerometer::new(),
        MockDisplay::new(),
        MockRadio::new(),
        config,
    );
    tx.start().unwrap();

    tx.radio_mut().receive(VehicleStatus {
        temperature_c: 31,
        battery_pct: 64,
    });
    tx.tick(0).unwrap();
    assert_eq!(tx.telemetry().vehicle_temperature_c, Some(31));
    assert_eq!(tx.telemetry().vehicle_battery_pct, Some(64));
}
