//! Scripted input sources.
//!
//! Each source replays a queue of readings pushed by the test (or by the
//! binary's demo wiring).  When the queue is empty the source reports its idle
//! reading: no touch, no key, no button.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tabvnc_core::TouchSample;

use crate::application::control_input::{ButtonPanel, KeyboardDevice};
use crate::application::orchestrate_session::TouchSource;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replays touch samples in order.
#[derive(Debug, Default)]
pub struct ScriptedTouchSource {
    samples: Mutex<VecDeque<TouchSample>>,
    last_timestamp_ms: AtomicU64,
}

impl ScriptedTouchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, sample: TouchSample) {
        lock(&self.samples).push_back(sample);
    }

    pub fn extend(&self, samples: impl IntoIterator<Item = TouchSample>) {
        lock(&self.samples).extend(samples);
    }

    pub fn remaining(&self) -> usize {
        lock(&self.samples).len()
    }
}

impl TouchSource for ScriptedTouchSource {
    /// Next scripted sample, or a release at the last seen timestamp.
    fn poll(&self) -> TouchSample {
        match lock(&self.samples).pop_front() {
            Some(sample) => {
                self.last_timestamp_ms.store(sample.timestamp_ms, Ordering::Relaxed);
                sample
            }
            None => TouchSample::released(self.last_timestamp_ms.load(Ordering::Relaxed)),
        }
    }
}

/// Replays key bytes; reports `0` when idle.
#[derive(Debug)]
pub struct ScriptedKeyboard {
    present: bool,
    keys: Mutex<VecDeque<u8>>,
}

impl ScriptedKeyboard {
    pub fn new(present: bool) -> Self {
        Self { present, keys: Mutex::new(VecDeque::new()) }
    }

    pub fn type_bytes(&self, bytes: &[u8]) {
        lock(&self.keys).extend(bytes.iter().copied());
    }
}

impl KeyboardDevice for ScriptedKeyboard {
    fn is_present(&self) -> bool {
        self.present
    }

    fn poll_key(&self) -> u8 {
        lock(&self.keys).pop_front().unwrap_or(0)
    }
}

/// A reconnect button that reports one press per [`press`](ScriptedButtons::press).
#[derive(Debug, Default)]
pub struct ScriptedButtons {
    pending: AtomicBool,
}

impl ScriptedButtons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self) {
        self.pending.store(true, Ordering::Release);
    }
}

impl ButtonPanel for ScriptedButtons {
    fn reconnect_pressed(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}
