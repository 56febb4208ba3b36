//! Per-input debounce logic for buttons and keypads.
//!
//! Each input has a counter that must reach the threshold of consecutive
//! consistent readings before the debounced state changes. This prevents
//! false triggers from contact bounce.

pub struct Debouncer<const N: usize> {
    /// Debounced states: false = released, true = pressed.
    state: [bool; N],
    /// Consecutive raw readings that differ from the debounced state.
    counters: [u8; N],
    threshold: u8,
}

impl<const N: usize> Debouncer<N> {
    /// `threshold` polls must agree before a change is accepted; with a
    /// 2 ms poll, a threshold of 4 gives the 8 ms the piano keys need.
    pub const fn new(threshold: u8) -> Self {
        Self {
            state: [false; N],
            counters: [0; N],
            threshold,
        }
    }

    /// Feed one raw scan where `true` = pressed. Returns the debounced state.
    pub fn update(&mut self, raw: &[bool; N]) -> &[bool; N] {
        for i in 0..N {
            if raw[i] == self.state[i] {
                self.counters[i] = 0;
            } else {
                self.counters[i] += 1;
                if self.counters[i] >= self.threshold {
                    self.state[i] = raw[i];
                    self.counters[i] = 0;
                }
            }
        }

        &self.state
    }

    /// First pressed input in scan order.
    pub fn first_pressed(&self) -> Option<usize> {
        self.state.iter().position(|&p| p)
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.state[index]
    }
}

/// Turns a debounced level into press events (rising edges).
pub struct EdgeDetector<const N: usize> {
    last: [bool; N],
}

impl<const N: usize> EdgeDetector<N> {
    pub const fn new() -> Self {
        Self { last: [false; N] }
    }

    /// Index of the first input that went from released to pressed.
    pub fn pressed(&mut self, state: &[bool; N]) -> Option<usize> {
        let mut hit = None;
        for i in 0..N {
            if state[i] && !self.last[i] && hit.is_none() {
                hit = Some(i);
            }
            self.last[i] = state[i];
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounce_is_filtered() {
        let mut d = Debouncer::<2>::new(3);
        assert_eq!(d.update(&[true, false]), &[false, false]);
        assert_eq!(d.update(&[false, false]), &[false, false]);
        assert_eq!(d.update(&[true, false]), &[false, false]);
        assert_eq!(d.update(&[true, false]), &[false, false]);
        assert_eq!(d.update(&[true, false]), &[true, false]);
        assert_eq!(d.first_pressed(), Some(0));
    }

    #[test]
    fn release_needs_threshold_too() {
        let mut d = Debouncer::<1>::new(2);
        d.update(&[true]);
        d.update(&[true]);
        assert!(d.is_pressed(0));
        d.update(&[false]);
        assert!(d.is_pressed(0));
        d.update(&[false]);
        assert!(!d.is_pressed(0));
    }

    #[test]
    fn edges_fire_once() {
        let mut e = EdgeDetector::<3>::new();
        assert_eq!(e.pressed(&[false, true, false]), Some(1));
        assert_eq!(e.pressed(&[false, true, false]), None);
        assert_eq!(e.pressed(&[true, true, true]), Some(0));
        assert_eq!(e.pressed(&[false, false, false]), None);
    }
}
