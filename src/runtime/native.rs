use crate::audio::{AudioBackend, AudioFormat, CpalBackend};
use crate::error::SynthError;
use crate::input::{KeyboardHandler, MidiHandler};
use crate::synth::note::{note_name, NoteSource, SynthCommand};
use crate::synth::pitch::pitch;
use crate::synth::voice::{OctaveShift, VoiceState};
use crate::synth::{SynthConfig, SynthEngine};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The input side of the synthesizer.
///
/// Runs on the event-loop thread, applies [`SynthCommand`]s to the shared
/// [`VoiceState`] and raises the shutdown flag. Never touches the audio
/// engine directly.
pub struct NativeSynth {
    voice: Arc<VoiceState>,
    shutdown: Arc<AtomicBool>,
    command_receiver: Receiver<SynthCommand>,
}

impl NativeSynth {
    pub fn new(
        voice: Arc<VoiceState>,
        shutdown: Arc<AtomicBool>,
        command_receiver: Receiver<SynthCommand>,
    ) -> Self {
        Self {
            voice,
            shutdown,
            command_receiver,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.shutdown.load(Ordering::Acquire)
    }

    pub fn voice(&self) -> &Arc<VoiceState> {
        &self.voice
    }

    /// Applies every command received since the last call.
    pub fn process_commands(&mut self) {
        while let Ok(command) = self.command_receiver.try_recv() {
            self.apply(command);
        }
    }

    pub fn apply(&self, command: SynthCommand) {
        match command {
            SynthCommand::Key { base_note, source } => {
                let note = self.voice.play_key(base_note);
                log_note(note, source);
            }
            SynthCommand::Note { note, source } => {
                let note = self.voice.set_note(note);
                log_note(note, source);
            }
            SynthCommand::Release { source } => {
                debug!(?source, "Release ignored");
            }
            SynthCommand::Octave(shift) => {
                let octave = self.voice.shift_octave(shift);
                match shift {
                    OctaveShift::Up => info!(octave, "increased octave"),
                    OctaveShift::Down => info!(octave, "decreased octave"),
                }
            }
            SynthCommand::Quit => {
                info!("Quit requested");
                self.shutdown.store(true, Ordering::Release);
            }
        }
    }
}

fn log_note(note: i32, source: NoteSource) {
    info!(
        ?source,
        note,
        name = %note_name(note),
        pitch_hz = pitch(note),
        "note"
    );
}

/// Runs the synthesizer until Escape or Ctrl-C.
///
/// Bad configuration or a wavetable that cannot be built abort startup. An
/// audio device that cannot be opened only leaves the synth silent.
pub fn start(config: SynthConfig) -> Result<(), SynthError> {
    config.validate()?;

    let voice = Arc::new(VoiceState::new(
        config.initial_note,
        config.initial_octave,
        config.min_note,
        config.max_note,
    ));
    let shutdown = Arc::new(AtomicBool::new(false));
    let engine = SynthEngine::new(&config, voice.clone(), shutdown.clone())?;
    info!(table_length = config.table_length, "Built wavetable");

    let requested = AudioFormat::requested(&config);
    info!(%requested, "Requesting audio format");
    let mut audio_backend = CpalBackend::new(engine, requested, config.output_device.clone());
    match audio_backend.start() {
        Ok(negotiated) => info!(
            latency_ms = negotiated.buffer_duration().as_secs_f64() * 1000.0,
            "Audio ready"
        ),
        Err(e) => error!("Audio unavailable, continuing without sound: {}", e),
    }

    {
        let shutdown = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || shutdown.store(true, Ordering::Release)) {
            warn!("Failed to install Ctrl-C handler: {}", e);
        }
    }

    let (command_tx, command_rx) = channel();
    let mut keyboard_handler = KeyboardHandler::new(command_tx.clone());
    let mut midi_handler = MidiHandler::new(config.midi_port, command_tx);
    if !midi_handler.is_enabled() {
        info!("MIDI input off, keyboard only");
    }
    let mut synth = NativeSynth::new(voice, shutdown, command_rx);

    info!("Play with the two lower keyboard rows, +/- change octave, Escape quits");
    let frame_budget = config.frame_budget();
    while synth.is_running() {
        keyboard_handler.update();
        midi_handler.update();
        synth.process_commands();
        std::thread::sleep(frame_budget);
    }

    if let Err(e) = audio_backend.stop() {
        warn!("Failed to stop audio stream: {}", e);
    }
    info!("Shutdown complete");
    Ok(())
}
