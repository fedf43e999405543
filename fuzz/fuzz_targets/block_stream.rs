#![no_main]

use ladderworks_dsp::fuzz::fuzz_render;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    fuzz_render(data);
});
