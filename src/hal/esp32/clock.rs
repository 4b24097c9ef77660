//! ESP32 clock implementation using the ESP-IDF timer.

use crate::traits::Clock;

/// Milliseconds since boot from `esp_timer_get_time()`.
///
/// Also safe to read from interrupt context, which is how the encoder
/// interrupt timestamps its edges (see [`isr_now_ms`]).
///
/// # Example
///
/// ```ignore
/// use explorer_tx::hal::esp32::Esp32Clock;
/// use explorer_tx::traits::Clock;
///
/// let clock = Esp32Clock::new();
/// let start = clock.now_ms();
/// // ... do work ...
/// let elapsed = clock.now_ms() - start;
/// ```
pub struct Esp32Clock;

impl Esp32Clock {
    /// Creates a new ESP32 clock instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Esp32Clock {
    #[inline]
    fn now_ms(&self) -> u64 {
        boot_micros() / 1000
    }
}

/// Wrapping 32-bit millisecond timestamp for the encoder interrupt.
#[inline]
pub(crate) fn isr_now_ms() -> u32 {
    (boot_micros() / 1000) as u32
}

#[inline]
fn boot_micros() -> u64 {
    // esp_timer_get_time returns microseconds since boot and never goes negative
    let micros = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
    micros.max(0) as u64
}
