//! Fuzz target: DHT22 frame decoder
//!
//! Feeds arbitrary 5-byte frames to `decode_frame` and verifies:
//! - No panics
//! - A frame decodes only when its checksum byte matches
//! - Decoded readings are finite
//!
//! cargo fuzz run fuzz_dht_frame

#![no_main]

use ecowork::sensors::dht22::decode_frame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|frame: [u8; 5]| {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    match decode_frame(&frame) {
        Ok(r) => {
            assert_eq!(sum, frame[4]);
            assert!(r.temperature_c.is_finite());
            assert!(r.humidity_pct.is_finite());
        }
        Err(_) => assert_ne!(sum, frame[4]),
    }
});
