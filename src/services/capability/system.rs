use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::{ClipboardCapability, SpeechCapability, SpeechDone, Utterance, VoiceParams};
use crate::error::CapabilityError;

const SPEECH_PROGRAMS: [&str; 3] = ["say", "espeak", "spd-say"];

/// Looks `program` up on PATH.
fn which(program: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

fn program_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

/// Speech through the host's speech command (`say`, `espeak` or `spd-say`).
pub struct CommandSpeech {
    program: Option<PathBuf>,
    // Stop switch of the utterance currently playing
    playing: Mutex<Option<oneshot::Sender<()>>>,
}

impl CommandSpeech {
    pub fn detect() -> Self {
        let program = SPEECH_PROGRAMS.iter().find_map(|p| which(p));
        match &program {
            Some(path) => debug!("Speech capability: {}", path.display()),
            None => debug!("Speech capability: none found"),
        }
        Self::with_program(program)
    }

    pub fn with_program(program: Option<PathBuf>) -> Self {
        Self {
            program,
            playing: Mutex::new(None),
        }
    }

    /// Maps rate/pitch/volume onto the flags each command understands.
    fn voice_args(program: &str, voice: &VoiceParams) -> Vec<String> {
        match program {
            // words per minute, default ~175
            "say" => vec!["-r".into(), format!("{}", (175.0 * voice.rate).round() as u32)],
            // -s wpm, -p 0..99 (50), -a 0..200 (100)
            "espeak" => vec![
                "-s".into(),
                format!("{}", (175.0 * voice.rate).round() as u32),
                "-p".into(),
                format!("{}", (50.0 * voice.pitch).round().clamp(0.0, 99.0) as u32),
                "-a".into(),
                format!("{}", (100.0 * voice.volume).round().clamp(0.0, 200.0) as u32),
            ],
            // all -100..100 around 0
            "spd-say" => vec![
                "-r".into(),
                format!("{}", ((voice.rate - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32),
                "-p".into(),
                format!("{}", ((voice.pitch - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32),
                "-i".into(),
                format!("{}", ((voice.volume - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32),
                "-w".into(),
            ],
            _ => Vec::new(),
        }
    }

    fn stop_current(&self) {
        if let Ok(mut playing) = self.playing.lock() {
            if let Some(stop_tx) = playing.take() {
                let _ = stop_tx.send(());
            }
        }
    }
}

impl SpeechCapability for CommandSpeech {
    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn speak(&self, utterance: Utterance) -> Result<SpeechDone, CapabilityError> {
        let program = self
            .program
            .as_ref()
            .ok_or(CapabilityError::Unavailable("speech"))?;

        self.stop_current();

        let name = program_name(program).to_string();
        let mut child = Command::new(program)
            .args(Self::voice_args(&name, &utterance.voice))
            // Roast lines may start with '-'
            .arg("--")
            .arg(&utterance.text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CapabilityError::Failed {
                capability: "speech",
                reason: e.to_string(),
            })?;

        let (stop_tx, mut stop_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();

        if let Ok(mut playing) = self.playing.lock() {
            *playing = Some(stop_tx);
        }

        tokio::spawn(async move {
            let outcome = tokio::select! {
                status = child.wait() => match status {
                    Ok(status) if status.success() => Ok(()),
                    Ok(status) => {
                        warn!("Speech command {} exited with {}", name, status);
                        Err(CapabilityError::Failed {
                            capability: "speech",
                            reason: format!("{} exited with {}", name, status),
                        })
                    }
                    Err(e) => {
                        warn!("Speech process failed: {}", e);
                        Err(CapabilityError::Failed {
                            capability: "speech",
                            reason: e.to_string(),
                        })
                    }
                },
                // Cut off on purpose: not a failure
                _ = &mut stop_rx => {
                    let _ = child.kill().await;
                    Ok(())
                }
            };
            let _ = done_tx.send(outcome);
        });

        Ok(done_rx)
    }

    fn cancel(&self) {
        self.stop_current();
    }
}

/// Clipboard through `pbcopy`, `wl-copy` or `xclip`.
pub struct CommandClipboard {
    command: Option<(PathBuf, Vec<&'static str>)>,
}

impl CommandClipboard {
    /// Pipes into `program` with `args`, wherever it lives.
    pub fn with_command(program: PathBuf, args: Vec<&'static str>) -> Self {
        Self {
            command: Some((program, args)),
        }
    }

    pub fn detect() -> Self {
        let candidates: [(&str, Vec<&'static str>); 3] = [
            ("pbcopy", vec![]),
            ("wl-copy", vec![]),
            ("xclip", vec!["-selection", "clipboard"]),
        ];

        let command = candidates
            .into_iter()
            .find_map(|(program, args)| which(program).map(|path| (path, args)));

        Self { command }
    }
}

#[async_trait]
impl ClipboardCapability for CommandClipboard {
    fn is_available(&self) -> bool {
        self.command.is_some()
    }

    async fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
        let (program, args) = self
            .command
            .as_ref()
            .ok_or(CapabilityError::Unavailable("clipboard"))?;

        let failed = |reason: String| CapabilityError::Failed {
            capability: "clipboard",
            reason,
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| failed(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| failed(e.to_string()))?;
            // Close the pipe so the command sees EOF
            drop(stdin);
        }

        let status = child.wait().await.map_err(|e| failed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("{} exited with {}", program_name(program), status)))
        }
    }
}
