//! Radio link abstraction.
//!
//! The transmitter pushes fixed-size frames to the vehicle and optionally
//! picks up status reports coming back.

use crate::packet::VehicleStatus;

/// Outbound radio link to the vehicle.
///
/// Sending is fire-and-forget: an `Err` means this frame was lost, and the
/// caller simply sends a fresh frame next interval.
pub trait Transmitter {
    /// Error type for radio operations.
    type Error;

    /// Brings the link up. Called once at startup.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Sends one frame.
    fn transmit(&mut self, payload: &[u8]) -> Result<(), Self::Error>;

    /// Returns the newest status report received since the last call.
    ///
    /// Links without a return channel keep the default, which never
    /// reports anything.
    fn take_status(&mut self) -> Option<VehicleStatus> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SendOnly {
        sent: usize,
    }

    impl Transmitter for SendOnly {
        type Error = ();

        fn transmit(&mut self, _payload: &[u8]) -> Result<(), ()> {
            self.sent += 1;
            Ok(())
        }
    }

    #[test]
    fn defaults_for_send_only_link() {
        let mut radio = SendOnly { sent: 0 };
        assert_eq!(radio.init(), Ok(()));
        assert_eq!(radio.take_status(), None);
        radio.transmit(&[0; 14]).unwrap();
        assert_eq!(radio.sent, 1);
    }
}
