//! Shared networking constants and helpers used by both services.

/// Default HTTP port of the billboard service.
pub const BILLBOARD_PORT: u16 = 8080;
/// Default HTTP port of the message service.
pub const MESSAGE_PORT: u16 = 8081;
/// Logical name the billboard uses to reach the message service.
pub const MESSAGE_SERVICE: &str = "message-service";

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}
