pub mod tls;

/// The single application byte sent once the handshake completes.
pub const PROBE_BYTE: u8 = 1;

pub fn probe_bytes() -> &'static [u8] {
    const PAYLOAD: &[u8] = &[PROBE_BYTE];
    PAYLOAD
}
