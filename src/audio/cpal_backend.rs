use crate::audio::{AudioBackend, AudioFormat};
use crate::synth::engine::SynthEngine;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, Stream, SupportedBufferSize, SupportedStreamConfigRange};
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no output device available")]
    NoOutputDevice,
    #[error("output device {0:?} not found")]
    DeviceNotFound(String),
    #[error("device does not support the requested format ({requested}); default is {available}")]
    FormatMismatch {
        requested: AudioFormat,
        available: String,
    },
    #[error("audio engine was already handed to a stream")]
    EngineInUse,
    #[error(transparent)]
    Devices(#[from] cpal::DevicesError),
    #[error(transparent)]
    DeviceName(#[from] cpal::DeviceNameError),
    #[error(transparent)]
    SupportedConfigs(#[from] cpal::SupportedStreamConfigsError),
    #[error(transparent)]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[error(transparent)]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error(transparent)]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error(transparent)]
    PauseStream(#[from] cpal::PauseStreamError),
}

/// Names of all output devices on the default host.
pub fn list_output_devices() -> Result<Vec<String>, AudioError> {
    let host = cpal::default_host();
    let mut names = Vec::new();
    for device in host.output_devices()? {
        names.push(device.name()?);
    }
    Ok(names)
}

/// Picks the buffer size to open the stream with. The device may not support
/// the requested size; use the closest size it does.
pub fn negotiate_buffer_frames(requested: u32, supported: &SupportedBufferSize) -> u32 {
    match *supported {
        SupportedBufferSize::Range { min, max } => requested.clamp(min, max.max(min)),
        SupportedBufferSize::Unknown => requested,
    }
}

/// Plays a [`SynthEngine`] through a cpal output stream.
///
/// The engine is moved into the stream's data callback on start, so the
/// audio thread is its only user from then on.
pub struct CpalBackend {
    stream: Option<Stream>,
    engine: Option<SynthEngine>,
    requested: AudioFormat,
    device_name: Option<String>,
}

impl CpalBackend {
    pub fn new(engine: SynthEngine, requested: AudioFormat, device_name: Option<String>) -> Self {
        Self {
            stream: None,
            engine: Some(engine),
            requested,
            device_name,
        }
    }

    fn select_output_device(&self, host: &cpal::Host) -> Result<cpal::Device, AudioError> {
        match &self.device_name {
            Some(wanted) => {
                for device in host.output_devices()? {
                    if device.name().map(|n| n == *wanted).unwrap_or(false) {
                        return Ok(device);
                    }
                }
                Err(AudioError::DeviceNotFound(wanted.clone()))
            }
            None => host
                .default_output_device()
                .ok_or(AudioError::NoOutputDevice),
        }
    }

    /// Finds an i16 stereo configuration at the requested sample rate.
    fn find_config_range(
        &self,
        device: &cpal::Device,
    ) -> Result<SupportedStreamConfigRange, AudioError> {
        let rate = SampleRate(self.requested.sample_rate);
        let found = device.supported_output_configs()?.find(|range| {
            range.sample_format() == SampleFormat::I16
                && range.channels() == self.requested.channels
                && range.min_sample_rate() <= rate
                && rate <= range.max_sample_rate()
        });

        match found {
            Some(range) => Ok(range),
            None => {
                let available = match device.default_output_config() {
                    Ok(default) => format!(
                        "{} Hz, {} ch, {:?}",
                        default.sample_rate().0,
                        default.channels(),
                        default.sample_format()
                    ),
                    Err(e) => format!("unknown ({})", e),
                };
                Err(AudioError::FormatMismatch {
                    requested: self.requested,
                    available,
                })
            }
        }
    }

    fn build_stream(&mut self) -> Result<(Stream, AudioFormat), AudioError> {
        let host = cpal::default_host();
        let device = self.select_output_device(&host)?;
        let name = device.name().unwrap_or_default();
        info!(device = %name, "Selected output device");

        let range = self.find_config_range(&device)?;
        let buffer_frames =
            negotiate_buffer_frames(self.requested.buffer_frames, range.buffer_size());
        if buffer_frames != self.requested.buffer_frames {
            warn!(
                requested = self.requested.buffer_frames,
                adjusted = buffer_frames,
                "Device adjusted the buffer size"
            );
        }

        let mut stream_config: cpal::StreamConfig = range
            .with_sample_rate(SampleRate(self.requested.sample_rate))
            .into();
        stream_config.buffer_size = cpal::BufferSize::Fixed(buffer_frames);

        let negotiated = AudioFormat {
            sample_rate: stream_config.sample_rate.0,
            channels: stream_config.channels,
            buffer_frames,
        };
        debug!(%negotiated, "Building output stream");

        let mut engine = self.engine.take().ok_or(AudioError::EngineInUse)?;
        let stream = device.build_output_stream(
            &stream_config,
            move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                engine.render(data);
            },
            |err| error!("Stream error: {}", err),
            None,
        )?;

        Ok((stream, negotiated))
    }
}

impl AudioBackend for CpalBackend {
    fn start(&mut self) -> Result<AudioFormat, AudioError> {
        let (stream, negotiated) = self.build_stream()?;
        stream.play()?;
        info!(
            requested = %self.requested,
            %negotiated,
            "Audio stream started"
        );
        self.stream = Some(stream);
        Ok(negotiated)
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        if let Some(stream) = self.stream.take() {
            stream.pause()?;
            info!("Audio stream stopped");
        }
        Ok(())
    }
}
