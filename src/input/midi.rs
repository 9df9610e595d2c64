use crate::synth::note::{NoteSource, SynthCommand};
use midir::{MidiInput, MidiInputConnection};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum MidiError {
    #[error(transparent)]
    Init(#[from] midir::InitError),
    #[error(transparent)]
    PortInfo(#[from] midir::PortInfoError),
    #[error("failed to connect to MIDI port: {0}")]
    Connect(String),
    #[error("MIDI input port {requested} does not exist ({available} available)")]
    NoSuchPort { requested: usize, available: usize },
}

/// Translates a raw MIDI channel message. Note-on with velocity zero counts
/// as note-off.
pub fn midi_command(status: u8, data1: u8, data2: u8) -> Option<SynthCommand> {
    match status & 0xF0 {
        0x90 if data2 > 0 => Some(SynthCommand::from_midi_note(data1)),
        0x90 | 0x80 => Some(SynthCommand::Release {
            source: NoteSource::Midi,
        }),
        _ => None,
    }
}

/// Names of the available MIDI input ports, in index order.
pub fn list_input_ports() -> Result<Vec<String>, MidiError> {
    let midi_in = MidiInput::new("wavesynth port list")?;
    let mut names = Vec::new();
    for port in midi_in.ports() {
        names.push(midi_in.port_name(&port)?);
    }
    Ok(names)
}

pub struct MidiHandler {
    /// Holds the connection to keep it alive
    #[allow(dead_code)]
    connection: Option<MidiInputConnection<()>>,
    receiver: Option<Receiver<(u8, u8, u8)>>, // (status, data1, data2)
    command_sender: Sender<SynthCommand>,
}

impl MidiHandler {
    /// Opens input port `port`. Any failure leaves MIDI disabled.
    pub fn new(port: Option<usize>, command_sender: Sender<SynthCommand>) -> Self {
        let Some(port) = port else {
            return Self::disabled(command_sender);
        };
        match Self::connect(port) {
            Ok((connection, receiver)) => Self {
                connection: Some(connection),
                receiver: Some(receiver),
                command_sender,
            },
            Err(e) => {
                warn!("Failed to initialize MIDI: {}. MIDI input will be disabled.", e);
                Self::disabled(command_sender)
            }
        }
    }

    fn disabled(command_sender: Sender<SynthCommand>) -> Self {
        Self {
            connection: None,
            receiver: None,
            command_sender,
        }
    }

    fn connect(
        port_index: usize,
    ) -> Result<(MidiInputConnection<()>, Receiver<(u8, u8, u8)>), MidiError> {
        let midi_in = MidiInput::new("wavesynth input")?;
        let ports = midi_in.ports();
        let port = ports.get(port_index).ok_or(MidiError::NoSuchPort {
            requested: port_index,
            available: ports.len(),
        })?;
        let port_name = midi_in.port_name(port)?;

        let (sender, receiver) = mpsc::channel();
        let connection = midi_in
            .connect(
                port,
                "wavesynth-read-input",
                move |_, message, _| {
                    if message.len() >= 3 {
                        let _ = sender.send((message[0], message[1], message[2]));
                    }
                },
                (),
            )
            .map_err(|e| MidiError::Connect(e.to_string()))?;

        info!(port = %port_name, "Opened MIDI port");
        Ok((connection, receiver))
    }

    pub fn is_enabled(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn update(&mut self) {
        let Some(receiver) = &self.receiver else {
            return;
        };
        while let Ok((status, data1, data2)) = receiver.try_recv() {
            if let Some(command) = midi_command(status, data1, data2) {
                if let Err(e) = self.command_sender.send(command) {
                    warn!("Failed to send MIDI command: {}", e);
                }
            }
        }
    }
}
