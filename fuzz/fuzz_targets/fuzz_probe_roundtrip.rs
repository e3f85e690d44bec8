#![no_main]

use handshake_probe::{HandshakeProbe, HEADER_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u16)| {
    let (version, mtu) = input;
    let probe = HandshakeProbe::new(version, u32::from(mtu));

    match probe.encode() {
        Ok(body) => {
            let decoded = HandshakeProbe::decode(&body).expect("encoded probe decodes");
            assert_eq!(decoded, probe);
        }
        Err(_) => assert!((mtu as usize) < HEADER_LEN),
    }
});
