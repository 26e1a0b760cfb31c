//! Input sampling seam.
//!
//! One digital line, read synchronously once per permitted tick. There is
//! deliberately no debounce and no edge latch: each tick re-evaluates the
//! raw level, and a held line re-triggers the same report every tick
//! (host-side key repeat handles the rest).

/// A digital input line the keyboard variant samples each tick.
pub trait InputLine {
    /// Read the line. `true` = active (button held). Cannot fail.
    fn sample(&mut self) -> bool;
}
