//! Debounced capture of rotary encoder edges.
//!
//! [`EncoderCapture`] is the only state shared between the encoder's
//! clock-edge interrupt and the main loop. The interrupt calls
//! [`on_edge`](EncoderCapture::on_edge); the main loop reads
//! [`current_position`](EncoderCapture::current_position) and re-bases the
//! counter when the menu changes node.
//!
//! All fields are 32-bit atomics accessed with `Relaxed` ordering. The main
//! loop re-polls every iteration, so "eventually visible" is enough, and
//! there is no torn read on targets narrower than the counter.
//!
//! # Example
//!
//! ```rust
//! use explorer_tx::EncoderCapture;
//!
//! static ENCODER: EncoderCapture = EncoderCapture::new(5);
//!
//! // Interrupt context: data line high at the clock transition
//! assert!(ENCODER.on_edge(true, 100));
//! // Contact bounce 2ms later is dropped
//! assert!(!ENCODER.on_edge(true, 102));
//!
//! // Main loop context
//! assert_eq!(ENCODER.current_position(), 1);
//! ```

use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u32 = 5;

/// Free-running, debounced encoder position counter.
///
/// No range clamping happens here; the menu clamps the position into the
/// active node's range when it reads it.
#[derive(Debug)]
pub struct EncoderCapture {
    position: AtomicI32,
    last_accepted_ms: AtomicU32,
    /// False until the first edge is accepted.
    primed: AtomicBool,
    debounce_ms: AtomicU32,
}

impl EncoderCapture {
    /// Creates a capture with the given debounce window.
    ///
    /// `const` so the firmware can place it in a `static` reachable from
    /// the interrupt handler.
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            position: AtomicI32::new(0),
            last_accepted_ms: AtomicU32::new(0),
            primed: AtomicBool::new(false),
            debounce_ms: AtomicU32::new(debounce_ms),
        }
    }

    /// Handles one clock-pin transition.
    ///
    /// `data_high` is the level of the quadrature data line sampled at the
    /// transition; `now_ms` a monotonic millisecond timestamp (wrapping).
    /// Returns whether the edge was accepted.
    ///
    /// Edges closer than the debounce window to the last accepted edge are
    /// dropped without touching the counter.
    pub fn on_edge(&self, data_high: bool, now_ms: u32) -> bool {
        if self.primed.load(Ordering::Relaxed) {
            let last = self.last_accepted_ms.load(Ordering::Relaxed);
            if now_ms.wrapping_sub(last) < self.debounce_ms.load(Ordering::Relaxed) {
                return false;
            }
        }

        if data_high {
            self.position.fetch_add(1, Ordering::Relaxed);
        } else {
            self.position.fetch_sub(1, Ordering::Relaxed);
        }
        self.last_accepted_ms.store(now_ms, Ordering::Relaxed);
        self.primed.store(true, Ordering::Relaxed);
        true
    }

    /// Returns the raw position counter.
    #[inline]
    pub fn current_position(&self) -> i32 {
        self.position.load(Ordering::Relaxed)
    }

    /// Shifts the counter down by `offset`.
    ///
    /// A read-modify-write, so increments the interrupt lands between the
    /// caller's read and this call are kept.
    #[inline]
    pub fn rebase(&self, offset: i32) {
        if offset != 0 {
            self.position.fetch_sub(offset, Ordering::Relaxed);
        }
    }

    /// Zeroes the counter and forgets the last accepted edge.
    pub fn reset(&self) {
        self.position.store(0, Ordering::Relaxed);
        self.primed.store(false, Ordering::Relaxed);
    }

    /// Returns the current debounce window.
    #[inline]
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms.load(Ordering::Relaxed)
    }

    /// Replaces the debounce window. Takes effect from the next edge.
    #[inline]
    pub fn set_debounce_ms(&self, ms: u32) {
        self.debounce_ms.store(ms, Ordering::Relaxed);
    }
}

impl Default for EncoderCapture {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Direction
    // =========================================================================

    #[test]
    fn data_high_increments() {
        let enc = EncoderCapture::default();
        assert!(enc.on_edge(true, 10));
        assert_eq!(enc.current_position(), 1);
    }

    #[test]
    fn data_low_decrements() {
        let enc = EncoderCapture::default();
        assert!(enc.on_edge(false, 10));
        assert!(enc.on_edge(false, 20));
        assert_eq!(enc.current_position(), -2);
    }

    #[test]
    fn first_edge_at_time_zero_accepted() {
        let enc = EncoderCapture::default();
        assert!(enc.on_edge(true, 0));
        assert_eq!(enc.current_position(), 1);
    }

    // =========================================================================
    // Debounce
    // =========================================================================

    #[test]
    fn bounce_inside_window_dropped() {
        let enc = EncoderCapture::default();
        assert!(enc.on_edge(true, 100));
        for t in 101..105 {
            assert!(!enc.on_edge(true, t));
            assert!(!enc.on_edge(false, t));
        }
        assert_eq!(enc.current_position(), 1);
    }

    #[test]
    fn edge_at_window_boundary_accepted() {
        let enc = EncoderCapture::default();
        assert!(enc.on_edge(true, 100));
        assert!(enc.on_edge(true, 105));
        assert_eq!(enc.current_position(), 2);
    }

    #[test]
    fn rejected_edges_do_not_extend_window() {
        let enc = EncoderCapture::default();
        assert!(enc.on_edge(true, 0));
        assert!(!enc.on_edge(true, 3));
        assert!(!enc.on_edge(true, 4));
        // Measured from the accepted edge at t=0, not the bounce at t=4
        assert!(enc.on_edge(true, 5));
        assert_eq!(enc.current_position(), 2);
    }

    #[test]
    fn debounce_window_can_be_changed_on_a_static() {
        static ENC: EncoderCapture = EncoderCapture::new(DEFAULT_DEBOUNCE_MS);
        ENC.set_debounce_ms(20);
        assert_eq!(ENC.debounce_ms(), 20);
        assert!(ENC.on_edge(true, 100));
        assert!(!ENC.on_edge(true, 110));
        assert!(ENC.on_edge(true, 120));
        assert_eq!(ENC.current_position(), 2);
    }

    #[test]
    fn accepted_edges_always_five_ms_apart() {
        let enc = EncoderCapture::default();
        let mut last: Option<u32> = None;
        for t in 0..200u32 {
            // Bouncy signal: an edge every millisecond
            if enc.on_edge(t % 3 != 0, t) {
                if let Some(prev) = last {
                    assert!(t - prev >= DEFAULT_DEBOUNCE_MS);
                }
                last = Some(t);
            }
        }
        assert!(last.is_some());
    }

    #[test]
    fn debounce_survives_clock_wrap() {
        let enc = EncoderCapture::default();
        assert!(enc.on_edge(true, u32::MAX - 1));
        assert!(!enc.on_edge(true, 1)); // 3ms later
        assert!(enc.on_edge(true, 3)); // 5ms later
        assert_eq!(enc.current_position(), 2);
    }

    #[test]
    fn custom_window() {
        let enc = EncoderCapture::new(20);
        assert_eq!(enc.debounce_ms(), 20);
        assert!(enc.on_edge(true, 0));
        assert!(!enc.on_edge(true, 19));
        assert!(enc.on_edge(true, 20));
    }

    // =========================================================================
    // Re-basing
    // =========================================================================

    #[test]
    fn rebase_shifts_counter() {
        let enc = EncoderCapture::default();
        enc.on_edge(true, 0);
        enc.on_edge(true, 10);
        enc.on_edge(true, 20);
        enc.rebase(3);
        assert_eq!(enc.current_position(), 0);
        enc.rebase(-2);
        assert_eq!(enc.current_position(), 2);
    }

    #[test]
    fn rebase_keeps_later_edges() {
        let enc = EncoderCapture::default();
        enc.on_edge(true, 0);
        enc.on_edge(true, 10);
        let observed = enc.current_position();
        // An interrupt lands between the read and the re-base
        enc.on_edge(true, 20);
        enc.rebase(observed);
        assert_eq!(enc.current_position(), 1);
    }

    #[test]
    fn reset_clears_position_and_window() {
        let enc = EncoderCapture::default();
        enc.on_edge(false, 50);
        enc.reset();
        assert_eq!(enc.current_position(), 0);
        // Window forgotten: an edge 1ms later is accepted
        assert!(enc.on_edge(true, 51));
    }
}
