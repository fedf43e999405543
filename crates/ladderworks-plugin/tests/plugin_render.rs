use std::io::Write;

use ladderworks_plugin::prelude::*;
use ladderworks_plugin::{ConfigError, PluginError};

fn render(plugin: &mut DiodeLadderPlugin, blocks: usize, block: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(blocks * block);
    for b in 0..blocks {
        let mut left: Vec<f32> = (0..block)
            .map(|n| if (b * block + n) % 64 < 32 { 0.8 } else { -0.8 })
            .collect();
        let mut right = left.clone();
        plugin.process(&mut [&mut left[..], &mut right[..]]).unwrap();
        assert_eq!(left, right);
        out.extend_from_slice(&left);
    }
    out
}

#[test]
fn renders_stereo_blocks() {
    let config = LadderConfig {
        sample_rate: 44_100.0,
        max_block_size: 128,
        resonance: 0.6,
        cutoff_hz: 800.0,
        ..LadderConfig::default()
    };
    let buffer = config.buffer_config();
    let mut plugin = DiodeLadderPlugin::new(config).unwrap();
    plugin.prepare(&buffer).unwrap();

    let out = render(&mut plugin, 32, 128);
    assert!(out.iter().all(|s| s.is_finite() && s.abs() < 100.0));
    assert!(out.iter().any(|s| s.abs() > 1.0e-3));
}

#[test]
fn parameter_automation_between_blocks_stays_bounded() {
    let mut plugin = DiodeLadderPlugin::default();
    let buffer = plugin.config().buffer_config();
    plugin.prepare(&buffer).unwrap();

    for step in 0..50 {
        let resonance = (step % 10) as f32 / 10.0;
        plugin
            .set_parameter(ParameterId::Resonance, resonance)
            .unwrap();
        plugin
            .set_parameter(ParameterId::Cutoff, 100.0 + 300.0 * step as f32)
            .unwrap();
        let out = render(&mut plugin, 1, 256);
        assert!(out.iter().all(|s| s.is_finite() && s.abs() < 100.0));
    }
}

#[test]
fn reset_repeats_the_first_render() {
    let mut plugin = DiodeLadderPlugin::default();
    plugin.set_parameter(ParameterId::Resonance, 0.4).unwrap();
    let buffer = plugin.config().buffer_config();
    plugin.prepare(&buffer).unwrap();

    let first = render(&mut plugin, 4, 64);
    plugin.reset();
    let second = render(&mut plugin, 4, 64);
    assert_eq!(first, second);
}

#[test]
fn modulated_cutoff_requires_audio_rate_buffer_length() {
    let config = LadderConfig {
        cutoff_rate: CutoffRate::Audio,
        channels: 1,
        ..LadderConfig::default()
    };
    let buffer = config.buffer_config();
    let mut plugin = DiodeLadderPlugin::new(config).unwrap();
    plugin.prepare(&buffer).unwrap();

    let sweep: Vec<f32> = (0..256).map(|n| 50.0 + 40.0 * n as f32).collect();
    let mut mono = vec![0.5f32; 256];
    plugin.process_modulated(&mut [&mut mono[..]], &sweep).unwrap();
    assert!(mono.iter().all(|s| s.is_finite()));
    assert!(mono[255] > mono[0]);

    let mut short = vec![0.77f32; 64];
    let err = plugin
        .process_modulated(&mut [&mut short[..]], &sweep[..16])
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PluginError>(),
        Some(PluginError::ModulationLengthMismatch {
            expected: 64,
            actual: 16
        })
    ));
    assert!(short.iter().all(|s| *s == 0.77));
}

#[test]
fn loads_config_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "sample_rate": 96000, "channels": 1, "resonance_rate": "fixed", "resonance": 0.3 }}"#
    )
    .unwrap();

    let config = LadderConfig::load(file.path()).unwrap();
    assert_eq!(config.sample_rate, 96_000.0);
    assert_eq!(config.resonance_rate, ResonanceRate::Fixed);

    let missing = LadderConfig::load(file.path().with_extension("missing")).unwrap_err();
    assert!(matches!(missing, ConfigError::Io { .. }));
}
