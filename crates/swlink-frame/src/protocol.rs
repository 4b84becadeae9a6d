//! Protocol identifiers carried in the second header byte.
//!
//! Identifiers 1 and 2 are assigned. Everything else is passed through
//! unchanged by the frame codec and is left to the application.

/// The payload is an application packet (CCSDS Space Packet).
pub const PROTOCOL_PACKET: u8 = 1;

/// The payload is raw, uninterpreted data.
pub const PROTOCOL_RAW: u8 = 2;

/// Returns a human-readable name for a protocol id.
pub fn protocol_name(id: u8) -> &'static str {
    match id {
        PROTOCOL_PACKET => "PACKET",
        PROTOCOL_RAW => "RAW",
        _ => "UNASSIGNED",
    }
}

/// Returns true if the protocol id is one of the assigned identifiers.
pub fn is_assigned(id: u8) -> bool {
    matches!(id, PROTOCOL_PACKET | PROTOCOL_RAW)
}
