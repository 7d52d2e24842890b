use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use triage_core::{update, AppState, CategoryClass, EmailFile, Msg};
use triage_engine::{inspect_file, ClassifierSettings};
use triage_logging::{triage_debug, triage_info, triage_warn};

use super::config::OneShot;
use super::effects::{to_email_file, EffectRunner};
use super::ui::constants::HELP_TEXT;
use super::ui::input::{append_line, parse_line, Command};
use super::ui::render::{paint, render, render_result};

/// Everything the main loop reacts to, funnelled through one channel.
pub enum LoopEvent {
    Input(Command),
    InputClosed,
    Engine(Msg),
}

pub fn run_interactive(settings: ClassifierSettings) -> anyhow::Result<()> {
    let (loop_tx, loop_rx) = mpsc::channel();
    let runner = EffectRunner::new(settings, loop_tx.clone()).context("failed to start engine")?;
    spawn_input_reader(loop_tx);

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut app = App::new(runner, stdout, color);
    app.repaint()?;

    let mut input_closed = false;
    while let Ok(first) = loop_rx.recv() {
        // Coalesce bursts (pasted text) into one repaint.
        let mut inbox = vec![first];
        inbox.extend(loop_rx.try_iter());

        let mut needs_paint = false;
        for event in inbox {
            match event {
                LoopEvent::Input(Command::Quit) => {
                    triage_info!("Quit requested");
                    return Ok(());
                }
                LoopEvent::Input(command) => needs_paint |= app.handle_command(command),
                LoopEvent::Engine(msg) => needs_paint |= app.dispatch(msg),
                LoopEvent::InputClosed => input_closed = true,
            }
        }
        if needs_paint {
            app.repaint()?;
        }
        if input_closed && !app.state.is_loading() {
            triage_debug!("Input closed, leaving");
            break;
        }
    }
    Ok(())
}

/// Classifies one text or file without the interactive screen.
pub fn run_once(settings: ClassifierSettings, input: OneShot, json: bool) -> anyhow::Result<()> {
    let (loop_tx, loop_rx) = mpsc::channel();
    let runner = EffectRunner::new(settings, loop_tx).context("failed to start engine")?;

    let (collect, submit) = match input {
        OneShot::Text(text) => (Msg::InputChanged(text), Msg::SubmitTextClicked),
        OneShot::File(path) => {
            let info = inspect_file(&path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            (Msg::FileSelected(to_email_file(info)), Msg::SubmitFileClicked)
        }
    };

    let (state, _) = update(AppState::new(), collect);
    if let Some(notice) = state.view().notice {
        bail!(notice);
    }
    let (mut state, effects) = update(state, submit);
    if effects.is_empty() {
        bail!("nothing to classify: the email text is empty");
    }
    runner.run(effects);

    while state.is_loading() {
        if let LoopEvent::Engine(msg) = loop_rx.recv()? {
            let (next, _) = update(state, msg);
            state = next;
        }
    }

    let view = state.view();
    if let Some(error) = view.error {
        bail!("classification failed: {error}");
    }

    let mut stdout = io::stdout();
    if json {
        let analysis = view.analysis.context("no result received")?;
        let value = serde_json::json!({
            "category": analysis.category,
            "confidence": analysis.confidence,
            "suggested_response": analysis.suggested_response,
            "original_text_preview": analysis.original_text_preview,
            "category_class": view.category_class.map(CategoryClass::as_str),
            "confidence_color": view.confidence_color.hex(),
        });
        writeln!(stdout, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        let color = stdout.is_terminal();
        paint(&mut stdout, &render_result(&view), false, color)?;
    }
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    triage_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            let command = parse_line(&line, Path::is_file);
            if tx.send(LoopEvent::Input(command)).is_err() {
                return;
            }
        }
        let _ = tx.send(LoopEvent::InputClosed);
    });
}

/// Owns the single UI-state record. Only this type mutates it.
struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    color: bool,
    /// Transient line under the result area; cleared by the next command.
    status: Option<String>,
}

impl<W: Write> App<W> {
    fn new(runner: EffectRunner, out: W, color: bool) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
            color,
            status: None,
        }
    }

    /// Applies a message, runs its effects and reports whether a repaint is due.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);
        dirty
    }

    fn handle_command(&mut self, command: Command) -> bool {
        let had_status = self.status.take().is_some();
        let msg = match command {
            Command::AppendText(line) => Some(Msg::InputChanged(append_line(
                self.state.email_text(),
                &line,
            ))),
            Command::SubmitText => Some(Msg::SubmitTextClicked),
            Command::SelectFile(path) => self.inspect(&path).map(Msg::FileSelected),
            Command::DropFile(path) => self.inspect(&path).map(Msg::FileDropped),
            Command::SubmitFile => Some(Msg::SubmitFileClicked),
            Command::ClearResults => Some(Msg::ClearResultsClicked),
            Command::ResetForm => Some(Msg::ResetFormClicked),
            Command::Copy => {
                if self.state.analysis().is_some() {
                    self.status = Some("Suggested response sent to the clipboard.".to_string());
                }
                Some(Msg::CopyResponseClicked)
            }
            Command::Help => {
                self.status = Some(HELP_TEXT.to_string());
                None
            }
            Command::Unknown(text) => {
                self.status = Some(format!("Unknown command {text}. :help lists commands."));
                None
            }
            Command::Quit => None,
        };

        let dirty = msg.is_some_and(|msg| self.dispatch(msg));
        dirty || had_status || self.status.is_some()
    }

    fn inspect(&mut self, path: &Path) -> Option<EmailFile> {
        match inspect_file(path) {
            Ok(info) => Some(to_email_file(info)),
            Err(err) => {
                triage_warn!("Cannot open {}: {}", path.display(), err);
                self.status = Some(format!("Cannot open {}: {err}", path.display()));
                None
            }
        }
    }

    fn repaint(&mut self) -> io::Result<()> {
        let lines = render(&self.state.view(), self.status.as_deref());
        paint(&mut self.out, &lines, true, self.color)
    }
}
