//! Reselection state machine.
//!
//! # States
//! - Idle: no failover scan running
//! - Reselecting: exactly one caller is scanning candidates
//!
//! # State Transitions
//! ```text
//! Idle → Reselecting: compare-and-swap won by the scanning caller
//! Reselecting → Idle: ReselectGuard dropped (success, failure, panic or cancellation)
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

/// Reselection state enum.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReselectState {
    Idle = 0,
    Reselecting = 1,
}

impl From<u8> for ReselectState {
    fn from(val: u8) -> Self {
        match val {
            1 => ReselectState::Reselecting,
            _ => ReselectState::Idle,
        }
    }
}

/// Atomic holder of the reselection state.
#[derive(Debug)]
pub struct ReselectFlag {
    state: AtomicU8,
}

impl ReselectFlag {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(ReselectState::Idle as u8),
        }
    }

    pub fn load(&self) -> ReselectState {
        ReselectState::from(self.state.load(Ordering::Acquire))
    }

    /// Move Idle → Reselecting. Returns `None` if a scan is already running.
    pub fn try_acquire(&self) -> Option<ReselectGuard<'_>> {
        self.state
            .compare_exchange(
                ReselectState::Idle as u8,
                ReselectState::Reselecting as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()
            .map(|_| ReselectGuard { flag: self })
    }
}

impl Default for ReselectFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// A RAII guard that returns the flag to Idle on drop.
#[derive(Debug)]
pub struct ReselectGuard<'a> {
    flag: &'a ReselectFlag,
}

impl Drop for ReselectGuard<'_> {
    fn drop(&mut self) {
        self.flag
            .state
            .store(ReselectState::Idle as u8, Ordering::Release);
    }
}
