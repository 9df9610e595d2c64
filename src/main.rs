use clap::{crate_version, Parser};
use std::error::Error;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wavesynth::audio::list_output_devices;
use wavesynth::input::list_input_ports;
use wavesynth::runtime::native;
use wavesynth::synth::SynthConfig;

#[derive(Parser)]
#[clap(
    version = crate_version!(),
    about = "A real-time wavetable synthesizer played from the computer keyboard."
)]
struct Cli {
    /// Path to a JSON config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output sample rate in Hz.
    #[arg(long)]
    sample_rate: Option<u32>,
    /// Requested buffer size in frames (power of two).
    #[arg(long)]
    buffer_frames: Option<u32>,
    /// Number of samples in the wavetable.
    #[arg(long)]
    table_length: Option<usize>,
    /// Output device name.
    #[arg(short, long)]
    device: Option<String>,
    /// MIDI input port index.
    #[arg(short, long)]
    midi_port: Option<usize>,
    /// Do not open a MIDI input even if the config names one.
    #[arg(long)]
    no_midi: bool,
    /// List audio output devices and MIDI input ports, then exit.
    #[arg(long)]
    list_devices: bool,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<SynthConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SynthConfig::from_file(path)?,
            None => SynthConfig::default(),
        };
        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        if let Some(buffer_frames) = self.buffer_frames {
            config.buffer_frames = buffer_frames;
        }
        if let Some(table_length) = self.table_length {
            config.table_length = table_length;
        }
        if let Some(device) = &self.device {
            config.output_device = Some(device.clone());
        }
        if let Some(midi_port) = self.midi_port {
            config.midi_port = Some(midi_port);
        }
        if self.no_midi {
            config.midi_port = None;
        }
        config.validate()?;
        Ok(config)
    }
}

fn list_devices() -> Result<(), Box<dyn Error>> {
    println!("Output devices:");
    for name in list_output_devices()? {
        println!("  {}", name);
    }
    println!("MIDI input ports:");
    match list_input_ports() {
        Ok(ports) => {
            for (i, name) in ports.iter().enumerate() {
                println!("  {}: {}", i, name);
            }
        }
        Err(e) => println!("  unavailable ({})", e),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if cli.list_devices {
        return list_devices();
    }

    let config = cli.load_config()?;
    info!(?config, "Starting synthesizer");
    if let Err(e) = native::start(config) {
        error!("Synthesizer failed to start: {}", e);
        return Err(e.into());
    }
    Ok(())
}
