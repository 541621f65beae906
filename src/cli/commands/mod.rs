//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod connect;
pub mod read;
pub mod write;

/// Line printed once the controller session is up
fn connected_line(name: &str, commpath: &str) -> String {
    format!("Connected to {name} PLC at {commpath}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_line() {
        assert_eq!(
            connected_line("PLANT1", "10.0.0.5/bp/0"),
            "Connected to PLANT1 PLC at 10.0.0.5/bp/0"
        );
    }
}
