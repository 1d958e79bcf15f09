//! Network link adapters.
//!
//! The wireless association itself is managed by the operating system (or
//! the board support package on embedded targets).  The viewer only needs to
//! know whether the remote server is reachable, and to nudge the link when
//! it is not.
//!
//! [`RouteLink`] answers "is the link up?" by asking the OS for a route to
//! the server: binding a UDP socket and `connect`ing it to the server address
//! performs a routing-table lookup without sending any packet.  No route (no
//! interface up, no default gateway) means the link is down.

pub mod mock;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tracing::{debug, info};

use crate::application::orchestrate_session::{LinkError, NetworkLink};

pub use mock::MockLink;

/// Link probe based on the OS routing table.
#[derive(Debug, Clone)]
pub struct RouteLink {
    host: String,
    port: u16,
}

impl RouteLink {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }

    async fn has_route(&self) -> std::io::Result<()> {
        let socket = UdpSocket::bind(("0.0.0.0", 0)).await?;
        socket.connect((self.host.as_str(), self.port)).await
    }
}

#[async_trait]
impl NetworkLink for RouteLink {
    async fn is_up(&self) -> bool {
        match self.has_route().await {
            Ok(()) => true,
            Err(e) => {
                debug!(host = %self.host, error = %e, "no route to server");
                false
            }
        }
    }

    async fn reconnect(&self) -> Result<(), LinkError> {
        // Association is owned by the OS; re-probe so the log shows progress.
        info!(host = %self.host, "waiting for network link");
        self.has_route().await.map_err(|e| LinkError::Reconnect(e.to_string()))
    }
}
