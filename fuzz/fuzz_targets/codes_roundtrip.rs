#![no_main]
use huffstream::fuzz::codes::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzCase| { harness(data) });
