/// How many past generations are remembered when looking for repeats.
pub const HISTORY_LEN: usize = 10;

/// Remembers the fingerprints of the last few generations so that still
/// lifes and short period oscillators can be noticed.
#[derive(Debug, Clone, Default)]
pub struct History {
    fingerprints: [u64; HISTORY_LEN],
    count: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    fn recorded(&self) -> &[u64] {
        &self.fingerprints[..self.count.min(HISTORY_LEN)]
    }

    /// Returns `true` if `fingerprint` was seen in the remembered window,
    /// otherwise stores it, evicting the oldest entry once full.
    pub fn record(&mut self, fingerprint: u64) -> bool {
        if self.recorded().contains(&fingerprint) {
            return true;
        }
        self.fingerprints[self.count % HISTORY_LEN] = fingerprint;
        self.count += 1;
        false
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[test]
fn test_record_detects_repeat() {
    let mut history = History::new();
    assert!(!history.record(7));
    assert!(!history.record(8));
    assert!(history.record(7));
}

#[test]
fn test_zero_is_not_preseeded() {
    let mut history = History::new();
    assert!(!history.record(0));
    assert!(history.record(0));
}

#[test]
fn test_window_evicts_oldest() {
    let mut history = History::new();
    for n in 0..HISTORY_LEN as u64 {
        assert!(!history.record(n));
    }
    assert!(!history.record(100));
    assert!(!history.record(0));
    assert!(history.record(100));
}

#[test]
fn test_clear() {
    let mut history = History::new();
    history.record(1);
    history.clear();
    assert!(!history.record(1));
}
