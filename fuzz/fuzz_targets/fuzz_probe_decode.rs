#![no_main]

use handshake_probe::HandshakeProbe;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Body decode: never panics, MTU always tracks input length
    if let Ok(probe) = HandshakeProbe::decode(data) {
        assert_eq!(probe.maximum_transfer_unit as usize, data.len() + 1);
    }

    // Whole datagram, identifier included
    let _ = HandshakeProbe::from_datagram(data);
});
