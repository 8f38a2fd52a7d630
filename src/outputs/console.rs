use std::io::BufRead;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::text::{render, UiUpdate};
use crate::kernel::event::{Event, UserAction};
use crate::kernel::form::{FormDraft, FormField, RoastIntensity};

const HELP: &str = "Commands: speak | copy | share | new | quit";

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    /// Filling in the form. `field == ORDER.len()` is the intensity prompt.
    /// `fixing` is set while going back for missing required fields.
    Form {
        field: usize,
        draft: FormDraft,
        fixing: bool,
    },
    Waiting,
    Result,
}

/// Line-oriented front end: turns typed lines into events, updates into text.
#[derive(Debug)]
pub struct Console {
    mode: Mode,
}

/// What one typed line produced.
#[derive(Debug, Default)]
pub struct ConsoleOutput {
    pub print: Vec<String>,
    pub event: Option<Event>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self { mode: Mode::Waiting }
    }

    pub fn in_form(&self) -> bool {
        matches!(self.mode, Mode::Form { .. })
    }

    fn prompt(field: usize) -> String {
        match FormField::ORDER.get(field) {
            Some(f) if f.is_required() => format!("{} *  ({})", f.label(), f.placeholder()),
            Some(f) => format!("{}  ({}) [optional]", f.label(), f.placeholder()),
            None => format!(
                "Roast intensity [{}] ({})",
                RoastIntensity::ALL.map(|i| i.as_str()).join(" / "),
                RoastIntensity::default()
            ),
        }
    }

    /// Text for a session update, plus the next prompt when the form opens.
    pub fn on_update(&mut self, update: &UiUpdate) -> Vec<String> {
        let mut out: Vec<String> = render(update).into_iter().collect();

        match update {
            UiUpdate::ShowForm => {
                self.mode = Mode::Form {
                    field: 0,
                    draft: FormDraft::new(),
                    fixing: false,
                };
                out.push(Self::prompt(0));
            }
            UiUpdate::Loading => self.mode = Mode::Waiting,
            UiUpdate::ResultHeader { .. } => {
                self.mode = Mode::Result;
                out.push(HELP.to_string());
            }
            _ => {}
        }
        out
    }

    pub fn on_line(&mut self, line: &str) -> ConsoleOutput {
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            return ConsoleOutput {
                print: Vec::new(),
                event: Some(Event::Input(UserAction::Quit)),
            };
        }

        match &mut self.mode {
            Mode::Form {
                field,
                draft,
                fixing,
            } => Self::on_form_line(field, draft, fixing, line),
            Mode::Waiting => ConsoleOutput {
                print: vec!["Hold on, the roast is cooking...".to_string()],
                event: None,
            },
            Mode::Result => {
                let action = match input.to_ascii_lowercase().as_str() {
                    "speak" | "read" | "stop" => Some(UserAction::TogglePlayback),
                    "copy" => Some(UserAction::Copy),
                    "share" => Some(UserAction::Share),
                    "new" | "again" => Some(UserAction::NewRoast),
                    "" => None,
                    _ => {
                        return ConsoleOutput {
                            print: vec![HELP.to_string()],
                            event: None,
                        }
                    }
                };
                ConsoleOutput {
                    print: Vec::new(),
                    event: action.map(Event::Input),
                }
            }
        }
    }

    fn first_missing(draft: &FormDraft) -> Option<usize> {
        FormField::ORDER
            .iter()
            .position(|f| f.is_required() && draft.get(*f).trim().is_empty())
    }

    fn on_form_line(
        field: &mut usize,
        draft: &mut FormDraft,
        fixing: &mut bool,
        line: &str,
    ) -> ConsoleOutput {
        let mut print = Vec::new();

        if let Some(form_field) = FormField::ORDER.get(*field) {
            draft.set(*form_field, line.trim_end_matches(['\r', '\n']));
            *field = if *fixing {
                Self::first_missing(draft).unwrap_or(FormField::ORDER.len())
            } else {
                *field + 1
            };
            print.push(Self::prompt(*field));
            return ConsoleOutput { print, event: None };
        }

        let choice = line.trim();
        if !choice.is_empty() {
            match choice.parse::<RoastIntensity>() {
                Ok(intensity) => draft.roast_intensity = Some(intensity),
                Err(e) => {
                    print.push(e.to_string());
                    print.push(Self::prompt(*field));
                    return ConsoleOutput { print, event: None };
                }
            }
        }

        // Submit stays inert until the required fields are there
        if !draft.is_submittable() {
            let missing = Self::first_missing(draft).unwrap_or(0);
            print.push("Name and age are required before you can get roasted.".to_string());
            *field = missing;
            *fixing = true;
            print.push(Self::prompt(missing));
            return ConsoleOutput { print, event: None };
        }

        ConsoleOutput {
            print,
            event: Some(Event::submit(draft.clone())),
        }
    }
}

/// Stdin on its own thread, so a pending read never holds up shutdown.
fn stdin_lines() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    line_rx
}

/// Reads stdin, prints updates, forwards events until the session closes.
pub async fn run(mut ui_rx: mpsc::UnboundedReceiver<UiUpdate>, tx: mpsc::Sender<Event>) {
    let mut console = Console::new();
    let mut lines = stdin_lines();
    let mut stdout = tokio::io::stdout();
    let mut stdin_open = true;

    loop {
        let printed = tokio::select! {
            update = ui_rx.recv() => match update {
                Some(UiUpdate::Closed) | None => break,
                Some(update) => console.on_update(&update),
            },
            line = lines.recv(), if stdin_open => {
                let line = match line {
                    Some(line) => line,
                    // EOF or broken stdin ends the session
                    None => {
                        stdin_open = false;
                        let _ = tx.send(Event::Input(UserAction::Quit)).await;
                        continue;
                    }
                };
                let output = console.on_line(&line);
                if let Some(event) = output.event {
                    debug!("Console input dispatched");
                    if let Err(e) = tx.send(event).await {
                        error!("Failed to send input: {}", e);
                        break;
                    }
                }
                output.print
            }
        };

        for text in printed {
            if stdout.write_all(format!("{}\n", text).as_bytes()).await.is_err() {
                return;
            }
        }
        let _ = stdout.flush().await;
    }
}
