//! # Peer Address Lookup
//!
//! Text form of the remote IP of a connected socket, for log lines.

use std::io;
use std::net::SocketAddr;

/// Placeholder returned when the peer address cannot be determined
pub const UNKNOWN_PEER: &str = "unknown";

/// A connected socket that can report its remote address
pub trait PeerAddr {
    fn peer_socket_addr(&self) -> io::Result<SocketAddr>;
}

impl PeerAddr for std::net::TcpStream {
    fn peer_socket_addr(&self) -> io::Result<SocketAddr> {
        self.peer_addr()
    }
}

impl PeerAddr for std::net::UdpSocket {
    fn peer_socket_addr(&self) -> io::Result<SocketAddr> {
        self.peer_addr()
    }
}

impl PeerAddr for tokio::net::TcpStream {
    fn peer_socket_addr(&self) -> io::Result<SocketAddr> {
        self.peer_addr()
    }
}

impl PeerAddr for tokio::net::UdpSocket {
    fn peer_socket_addr(&self) -> io::Result<SocketAddr> {
        self.peer_addr()
    }
}

/// IP address of the peer of `sock`, or [`UNKNOWN_PEER`] on error
pub fn peer_ip<S: PeerAddr + ?Sized>(sock: &S) -> String {
    match sock.peer_socket_addr() {
        Ok(addr) => addr.ip().to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "Peer address lookup failed");
            UNKNOWN_PEER.to_string()
        }
    }
}
