//! The transmitter unit: menu, inputs, display and radio in one loop.
//!
//! [`TxUnit`] owns the [`MenuController`] and every collaborator. The main
//! loop calls [`start`](TxUnit::start) once and [`tick`](TxUnit::tick) every
//! iteration. A tick:
//!
//! 1. samples both sticks and the tilt sensor,
//! 2. picks up any vehicle status report,
//! 3. polls the menu and draws what it asks for,
//! 4. sends a [`DataPackage`] if the transmit interval has elapsed.
//!
//! Input and radio failures are tolerated: a stick that cannot be read
//! reports neutral, a tilt read failure keeps the previous reading, and a
//! lost frame is simply followed by the next one (a latched command stays
//! latched until a frame carrying it goes out). Display failures are
//! returned to the caller.

use core::fmt;

use log::{debug, info, warn};

use crate::accel::{Calibration, TiltReading};
use crate::commands::Command;
use crate::config::Config;
use crate::controller::MenuController;
use crate::joystick::{JoystickReading, Stick};
use crate::packet::DataPackage;
use crate::render::Telemetry;
use crate::traits::{Accelerometer, ConfirmButton, JoystickInput, MenuDisplay, Transmitter};

/// Error from a collaborator the unit cannot work around.
#[derive(Debug, PartialEq, Eq)]
pub enum UnitError<D, R, S> {
    /// Display init or draw failed.
    Display(D),
    /// Radio init failed.
    Radio(R),
    /// Tilt sensor init or calibration failed.
    Sensor(S),
}

impl<D: fmt::Debug, R: fmt::Debug, S: fmt::Debug> fmt::Display for UnitError<D, R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitError::Display(e) => write!(f, "display error: {e:?}"),
            UnitError::Radio(e) => write!(f, "radio error: {e:?}"),
            UnitError::Sensor(e) => write!(f, "sensor error: {e:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl<D: fmt::Debug, R: fmt::Debug, S: fmt::Debug> std::error::Error for UnitError<D, R, S> {}

/// What one [`TxUnit::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The menu was redrawn.
    pub rendered: bool,
    /// Command confirmed during this tick.
    pub command: Command,
    /// A frame was sent successfully.
    pub transmitted: bool,
}

/// Running totals for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitStats {
    /// Frames sent successfully.
    pub frames_sent: u32,
    /// Frames the radio rejected.
    pub frames_failed: u32,
    /// Commands confirmed through the menu.
    pub commands: u32,
}

/// Rounds to the nearest whole degree without `std` float helpers.
fn whole_degrees(celsius: f32) -> i16 {
    let nudged = if celsius >= 0.0 {
        celsius + 0.5
    } else {
        celsius - 0.5
    };
    nudged as i16
}

/// The complete transmitter.
///
/// # Type Parameters
///
/// - `B`: confirm button, `J`: joysticks, `A`: tilt sensor,
///   `D`: display, `R`: radio
pub struct TxUnit<'a, B, J, A, D, R> {
    menu: MenuController<'a, B>,
    joysticks: J,
    accel: A,
    display: D,
    radio: R,
    config: Config,
    calibration: Calibration,
    package: DataPackage,
    telemetry: Telemetry,
    stats: UnitStats,
    last_transmit_ms: Option<u64>,
    ack_until_ms: Option<u64>,
}

impl<'a, B, J, A, D, R> TxUnit<'a, B, J, A, D, R>
where
    B: ConfirmButton,
    J: JoystickInput,
    J::Error: fmt::Debug,
    A: Accelerometer,
    A::Error: fmt::Debug,
    D: MenuDisplay,
    R: Transmitter,
    R::Error: fmt::Debug,
{
    /// Assembles a unit. Nothing touches the hardware until [`start`](Self::start).
    pub fn new(
        menu: MenuController<'a, B>,
        joysticks: J,
        accel: A,
        display: D,
        radio: R,
        config: Config,
    ) -> Self {
        Self {
            menu,
            joysticks,
            accel,
            display,
            radio,
            config,
            calibration: Calibration::new().finish(0),
            package: DataPackage::default(),
            telemetry: Telemetry::default(),
            stats: UnitStats::default(),
            last_transmit_ms: None,
            ack_until_ms: None,
        }
    }

    /// Brings everything up: splash screen, sensor calibration, radio, and
    /// the first menu page.
    ///
    /// The unit must rest level while this runs.
    pub fn start(&mut self) -> Result<(), UnitError<D::Error, R::Error, A::Error>> {
        self.display.init().map_err(UnitError::Display)?;
        let device = &self.config.device;
        self.display
            .show_message(device.splash_title.as_str(), Some(device.splash_subtitle.as_str()))
            .map_err(UnitError::Display)?;

        self.accel.init().map_err(UnitError::Sensor)?;
        self.calibrate()?;

        if self.config.radio.enabled {
            self.radio.init().map_err(UnitError::Radio)?;
            info!("unit: radio up");
        } else {
            warn!("unit: radio disabled, frames will not be sent");
        }

        self.menu.request_redraw();
        let out = self.menu.poll(&self.telemetry);
        if let Some(instruction) = out.render {
            self.display
                .render(&instruction)
                .map_err(UnitError::Display)?;
        }
        info!("unit: {} ready", self.config.device.name);
        Ok(())
    }

    fn calibrate(&mut self) -> Result<(), UnitError<D::Error, R::Error, A::Error>> {
        let sensor = &self.config.sensor;
        let mut calibration = Calibration::new();
        for _ in 0..sensor.calibration_samples {
            let raw = self.accel.read_raw().map_err(UnitError::Sensor)?;
            calibration.record(&raw);
        }
        self.calibration = calibration.finish(sensor.calibration_margin);
        info!(
            "unit: tilt calibrated over {} samples, x {}..{}, y {}..{}",
            self.calibration.samples(),
            self.calibration.min_x,
            self.calibration.max_x,
            self.calibration.min_y,
            self.calibration.max_y
        );
        Ok(())
    }

    /// Runs one loop iteration at time `now_ms`.
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> Result<TickReport, UnitError<D::Error, R::Error, A::Error>> {
        self.sample_inputs();

        if let Some(status) = self.radio.take_status() {
            debug!("unit: vehicle status {:?}", status);
            self.telemetry.vehicle_temperature_c = Some(status.temperature_c);
            self.telemetry.vehicle_battery_pct = Some(status.battery_pct);
        }

        let mut report = TickReport::default();

        match self.ack_until_ms {
            Some(until) if now_ms < until => {}
            _ => {
                if self.ack_until_ms.take().is_some() {
                    self.menu.request_redraw();
                }
                self.run_menu(now_ms, &mut report)?;
            }
        }

        report.transmitted = self.transmit_if_due(now_ms);
        Ok(report)
    }

    fn sample_inputs(&mut self) {
        let input = &self.config.input;
        self.package.j1 = match self.joysticks.read(Stick::First) {
            Ok(raw) => JoystickReading::from_raw(raw, input.j1_orientation),
            Err(e) => {
                warn!("unit: first stick read failed: {:?}", e);
                JoystickReading::NEUTRAL
            }
        };
        self.package.j2 = match self.joysticks.read(Stick::Second) {
            Ok(raw) => JoystickReading::from_raw(raw, input.j2_orientation),
            Err(e) => {
                warn!("unit: second stick read failed: {:?}", e);
                JoystickReading::NEUTRAL
            }
        };

        match self.accel.read_raw() {
            Ok(raw) => {
                self.package.mpu =
                    TiltReading::from_raw(&raw, &self.calibration, &self.config.sensor.bounds);
                self.telemetry.tx_temperature_c = Some(whole_degrees(raw.temperature_c()));
            }
            Err(e) => warn!("unit: tilt read failed: {:?}", e),
        }
    }

    fn run_menu(
        &mut self,
        now_ms: u64,
        report: &mut TickReport,
    ) -> Result<(), UnitError<D::Error, R::Error, A::Error>> {
        let out = self.menu.poll(&self.telemetry);
        report.command = out.command;

        if out.command.is_some() {
            self.stats.commands += 1;
            if let Some(replaced) = self.package.latch(out.command) {
                warn!("unit: {:?} replaced unsent {:?}", out.command, replaced);
            }
            let ack_ms = self.config.menu.ack_display_ms;
            if let (Some(ack), true) = (out.command.sent_message(), ack_ms > 0) {
                let title = self.config.device.splash_title.as_str();
                if let Err(e) = self.display.show_message(title, Some(ack)) {
                    self.menu.request_redraw();
                    return Err(UnitError::Display(e));
                }
                self.ack_until_ms = Some(now_ms + u64::from(ack_ms));
                return Ok(());
            }
        }

        if let Some(instruction) = out.render {
            if let Err(e) = self.display.render(&instruction) {
                self.menu.request_redraw();
                return Err(UnitError::Display(e));
            }
            report.rendered = true;
        }
        Ok(())
    }

    fn transmit_if_due(&mut self, now_ms: u64) -> bool {
        if !self.config.radio.enabled {
            return false;
        }
        let interval = u64::from(self.config.main_loop.transmit_interval_ms);
        let due = self
            .last_transmit_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= interval);
        if !due {
            return false;
        }
        self.last_transmit_ms = Some(now_ms);

        let frame = self.package.to_bytes();
        match self.radio.transmit(&frame) {
            Ok(()) => {
                if self.package.menu_select.is_some() {
                    debug!("unit: sent {:?}", self.package.menu_select);
                }
                self.package.mark_sent();
                self.stats.frames_sent += 1;
                true
            }
            Err(e) => {
                self.stats.frames_failed += 1;
                warn!("unit: transmit failed, retrying next interval: {:?}", e);
                false
            }
        }
    }

    /// Sets the transmitter's own battery level for the data view.
    pub fn set_tx_battery(&mut self, pct: u8) {
        self.telemetry.tx_battery_pct = Some(pct.min(100));
    }

    /// Current telemetry.
    #[inline]
    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// Frame that the next transmission will send.
    #[inline]
    pub fn package(&self) -> &DataPackage {
        &self.package
    }

    /// Finished tilt calibration.
    #[inline]
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Running totals.
    #[inline]
    pub fn stats(&self) -> UnitStats {
        self.stats
    }

    /// Returns true while a command acknowledgement covers the menu.
    #[inline]
    pub fn is_showing_ack(&self) -> bool {
        self.ack_until_ms.is_some()
    }

    /// The menu state machine.
    #[inline]
    pub fn menu(&self) -> &MenuController<'a, B> {
        &self.menu
    }

    /// Mutable menu access (tests drive the button through this).
    #[inline]
    pub fn menu_mut(&mut self) -> &mut MenuController<'a, B> {
        &mut self.menu
    }

    /// The display.
    #[inline]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable display access.
    #[inline]
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// The joysticks.
    #[inline]
    pub fn joysticks_mut(&mut self) -> &mut J {
        &mut self.joysticks
    }

    /// The tilt sensor.
    #[inline]
    pub fn accel_mut(&mut self) -> &mut A {
        &mut self.accel
    }

    /// The radio.
    #[inline]
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Mutable radio access.
    #[inline]
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }
}
