#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate lodestar;

use lodestar::Session;

fuzz_target!(|data: &[u8]| {
    let mut session = Session::default();
    for chunk in data.chunks(7) {
        session.feed(&String::from_utf8_lossy(chunk));
    }
});
