//! Outbound commands produced by the menu.
//!
//! A [`Command`] is a discrete directive for the vehicle, produced when the
//! operator confirms a menu item. It is handed to the transmitter exactly
//! once and is never stored by the menu itself.
//!
//! # Wire Codes
//!
//! Each command travels in the `menu_select` byte of the outgoing
//! [`DataPackage`](crate::DataPackage):
//!
//! | Code | Command |
//! |------|---------|
//! | 0 | [`None`](Command::None) |
//! | 1 | [`SetOperationManual`](Command::SetOperationManual) |
//! | 2 | [`SetOperationAuto`](Command::SetOperationAuto) |
//! | 3 | [`ReturnHome`](Command::ReturnHome) |
//! | 4 | [`LightsOn`](Command::LightsOn) |
//! | 5 | [`LightsOff`](Command::LightsOff) |
//! | 6 | [`LightsAuto`](Command::LightsAuto) |
//! | 7 | [`Cancel`](Command::Cancel) |
//!
//! # Example
//!
//! ```rust
//! use explorer_tx::Command;
//!
//! let cmd = Command::LightsOn;
//! assert_eq!(cmd.code(), 4);
//! assert_eq!(Command::from_code(4), Some(Command::LightsOn));
//! assert_eq!(cmd.sent_message(), Some("LT ON CMD SENT"));
//! ```

/// A directive for the vehicle, selected through the menu.
///
/// Defaults to [`None`](Self::None), which is what the transmitter sends
/// while the operator is only navigating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Command {
    /// No command; pure navigation.
    #[default]
    None,
    /// Put the vehicle under manual (joystick) control.
    SetOperationManual,
    /// Let the vehicle drive autonomously.
    SetOperationAuto,
    /// Drive back to the home position.
    ReturnHome,
    /// Switch the vehicle lights on.
    LightsOn,
    /// Switch the vehicle lights off.
    LightsOff,
    /// Let the vehicle switch its lights from the light sensor.
    LightsAuto,
    /// Abort a pending return-home.
    Cancel,
}

impl Command {
    /// Every command, in wire-code order.
    pub const ALL: [Command; 8] = [
        Command::None,
        Command::SetOperationManual,
        Command::SetOperationAuto,
        Command::ReturnHome,
        Command::LightsOn,
        Command::LightsOff,
        Command::LightsAuto,
        Command::Cancel,
    ];

    /// Returns the `menu_select` byte for this command.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Command::None => 0,
            Command::SetOperationManual => 1,
            Command::SetOperationAuto => 2,
            Command::ReturnHome => 3,
            Command::LightsOn => 4,
            Command::LightsOff => 5,
            Command::LightsAuto => 6,
            Command::Cancel => 7,
        }
    }

    /// Decodes a `menu_select` byte.
    ///
    /// Returns `None` for codes no command uses.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Command::None),
            1 => Some(Command::SetOperationManual),
            2 => Some(Command::SetOperationAuto),
            3 => Some(Command::ReturnHome),
            4 => Some(Command::LightsOn),
            5 => Some(Command::LightsOff),
            6 => Some(Command::LightsAuto),
            7 => Some(Command::Cancel),
            _ => None,
        }
    }

    /// Returns true for every command except [`None`](Self::None).
    #[inline]
    pub const fn is_some(self) -> bool {
        !matches!(self, Command::None)
    }

    /// Acknowledgement text shown on the display once the command is sent.
    ///
    /// Fits a 16-column row. [`None`](Self::None) has no acknowledgement.
    pub const fn sent_message(self) -> Option<&'static str> {
        match self {
            Command::None => None,
            Command::SetOperationManual => Some("OP MAN CMD SENT"),
            Command::SetOperationAuto => Some("OP AUT CMD SENT"),
            Command::ReturnHome => Some("RET HM CMD SENT"),
            Command::LightsOn => Some("LT ON CMD SENT"),
            Command::LightsOff => Some("LT OFF CMD SENT"),
            Command::LightsAuto => Some("LT AUT CMD SENT"),
            Command::Cancel => Some("CANCEL CMD SENT"),
        }
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        cmd.code()
    }
}
