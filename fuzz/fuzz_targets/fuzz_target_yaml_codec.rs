#![no_main]
use ctfcred::core::ports::VaultCodec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoder must not panic on arbitrary inputs
    let codec = ctfcred::vault::codec::YamlCodec;
    if let Ok(document) = codec.decode(data) {
        let _ = codec.encode(&document);
    }
});
