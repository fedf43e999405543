//! Entry point for the `block_stream` fuzz target.

use crate::filter::{BlockControls, Cutoff, CutoffRate, DiodeLadder, ResonanceRate};

const BLOCK: usize = 64;

/// Decodes `data` into a control header and little-endian `f32` samples,
/// renders them block by block and panics if the output stops being finite.
pub fn fuzz_render(data: &[u8]) {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let cutoff_rate = if flags & 1 == 0 {
        CutoffRate::Block
    } else {
        CutoffRate::Audio
    };
    let resonance_rate = if flags & 2 == 0 {
        ResonanceRate::Block
    } else {
        ResonanceRate::Fixed
    };

    let values: Vec<f32> = rest
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .filter(|value| value.is_finite())
        .collect();

    let mut ladder = DiodeLadder::new(48_000.0, cutoff_rate, resonance_rate, 0.5);
    let mut output = [0.0f32; BLOCK];
    for (index, chunk) in values.chunks(BLOCK).enumerate() {
        // Keep the input inside the range the ladder is specified for.
        let input: Vec<f32> = chunk.iter().map(|x| x.clamp(-10.0, 10.0)).collect();
        let freqs: Vec<f32> = chunk.iter().map(|x| (x.abs() * 1_000.0).min(1.0e6)).collect();
        let resonance = chunk[0].abs().fract();
        let cutoff = if index % 2 == 0 {
            Cutoff::Audio(&freqs)
        } else {
            Cutoff::Block(chunk[chunk.len() - 1])
        };
        let controls = BlockControls::new(cutoff, resonance, chunk[0].abs().min(1_000.0));
        let frames = ladder.process_block(&input, controls, &mut output);
        for sample in &output[..frames] {
            assert!(sample.is_finite(), "ladder produced {sample}");
        }
    }
}
