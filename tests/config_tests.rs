use std::io::Write;
use wavesynth::synth::SynthConfig;
use wavesynth::ConfigError;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_match_reference_setup() {
    let config = SynthConfig::default();
    assert_eq!(config.sample_rate, 44100);
    assert_eq!(config.buffer_frames, 4096);
    assert_eq!(config.table_length, 1024);
    assert_eq!(config.initial_note, 30);
    assert_eq!(config.initial_octave, 2);
    assert_eq!(config.min_note, 12);
    assert_eq!(config.max_note, 131);
    assert_eq!(config.frame_budget().as_millis(), 16);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_file_keeps_defaults() {
    let file = write_config(r#"{ "sample_rate": 48000, "buffer_frames": 512 }"#);
    let config = SynthConfig::from_file(file.path()).unwrap();
    assert_eq!(config.sample_rate, 48000);
    assert_eq!(config.buffer_frames, 512);
    assert_eq!(config.table_length, 1024);
    assert_eq!(config.output_device, None);
}

#[test]
fn round_trips_through_json() {
    let config = SynthConfig {
        output_device: Some("pipewire".to_string()),
        midi_port: Some(1),
        ..SynthConfig::default()
    };
    let file = write_config(&serde_json::to_string(&config).unwrap());
    assert_eq!(SynthConfig::from_file(file.path()).unwrap(), config);
}

#[test]
fn unknown_fields_are_rejected() {
    let file = write_config(r#"{ "waveform": "square" }"#);
    assert!(matches!(
        SynthConfig::from_file(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = SynthConfig::from_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn buffer_must_be_power_of_two() {
    let config = SynthConfig {
        buffer_frames: 1000,
        ..SynthConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        SynthConfig {
            sample_rate: 0,
            ..SynthConfig::default()
        },
        SynthConfig {
            table_length: 0,
            ..SynthConfig::default()
        },
        SynthConfig {
            min_note: 50,
            max_note: 40,
            ..SynthConfig::default()
        },
        SynthConfig {
            initial_octave: 7,
            ..SynthConfig::default()
        },
    ];
    for config in cases {
        assert!(config.validate().is_err(), "{:?} should be invalid", config);
    }
}
