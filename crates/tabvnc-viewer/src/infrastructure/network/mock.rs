//! Mock network link whose state is set by the test.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::orchestrate_session::{LinkError, NetworkLink};

/// A link that is up or down on command and counts reconnect attempts.
#[derive(Debug, Default)]
pub struct MockLink {
    up: AtomicBool,
    reconnects: AtomicUsize,
    /// When set, a reconnect attempt brings the link back up.
    pub heal_on_reconnect: AtomicBool,
}

impl MockLink {
    pub fn up() -> Self {
        let link = Self::default();
        link.set_up(true);
        link
    }

    pub fn down() -> Self {
        Self::default()
    }

    pub fn set_up(&self, up: bool) {
        self.up.store(up, Ordering::Release);
    }

    pub fn reconnect_count(&self) -> usize {
        self.reconnects.load(Ordering::Acquire)
    }
}

#[async_trait]
impl NetworkLink for MockLink {
    async fn is_up(&self) -> bool {
        self.up.load(Ordering::Acquire)
    }

    async fn reconnect(&self) -> Result<(), LinkError> {
        self.reconnects.fetch_add(1, Ordering::AcqRel);
        if self.heal_on_reconnect.load(Ordering::Acquire) {
            self.set_up(true);
        }
        Ok(())
    }
}
