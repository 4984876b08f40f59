#![no_main]
use libfuzzer_sys::fuzz_target;

use rina_ctrl::message::Message;

fuzz_target!(|data: &[u8]| {
    let mut input = data;
    let _ = Message::decode(&mut input);
});
