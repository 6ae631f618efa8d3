//! Line-oriented front end over a [`Session`].
//!
//! Reads commands from any async line source and writes results to any
//! writer, so it runs the same on a terminal and in tests. While a load is
//! running the shell keeps reading commands; queries are refused until the
//! data is ready.

use crate::app::render;
use crate::config::Settings;
use crate::core::backing::MapType;
use crate::core::session::{AddOutcome, LoadState, Session};
use crate::loader::SourceOrigin;
use crate::utils::error::{DexError, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

const HELP: &str = "\
Commands:
  load [map-type]   load the data set (map type: 1/hash, 2/sorted, 3/insertion)
  open <path>       load a specific CSV file
  wait              wait for a running load to finish
  show <name>       show one record
  add <name>        add a record to your collection
  mine              your collection, sorted by primary type
  all               every record, sorted by primary type
  list              every record in store order
  ability <text>    records whose abilities contain <text>
  status            show load state
  help              show this help
  quit              exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Follow-up question after automatic resolution failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    ConfirmManual,
    ManualPath,
}

pub struct Shell<R, W> {
    session: Session,
    lines: Lines<R>,
    out: W,
    prompt: String,
    map_type: MapType,
    autoload: bool,
    initial_file: Option<String>,
    pending: Pending,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(session: Session, settings: &Settings, input: R, out: W) -> Self {
        Self {
            session,
            lines: input.lines(),
            out,
            prompt: settings.prompt.clone(),
            map_type: settings.map_type,
            autoload: settings.autoload,
            initial_file: None,
            pending: Pending::None,
        }
    }

    /// Loads `path` on start instead of resolving the data file.
    pub fn with_initial_file(mut self, path: Option<String>) -> Self {
        if path.is_some() {
            self.autoload = true;
        }
        self.initial_file = path;
        self
    }

    /// Runs until `quit` or end of input. A load still running at end of
    /// input is awaited so its outcome is reported.
    pub async fn run(mut self) -> Result<W> {
        writeln!(self.out, "Type 'help' for a list of commands.")?;

        if self.autoload {
            let map_type = self.map_type;
            match self.initial_file.take() {
                Some(path) => self.start_manual_load(&path, map_type)?,
                None => self.start_load(map_type)?,
            }
        }

        loop {
            self.write_prompt()?;

            // 輸入優先，腳本輸入時載入結果只在 wait 或輸入結束時回報
            tokio::select! {
                biased;

                line = self.lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    if self.handle_line(line.trim()).await? == Flow::Quit {
                        break;
                    }
                }
                result = self.session.finish_load(), if self.session.is_loading() => {
                    let outcome = result.map(|_| ());
                    writeln!(self.out)?;
                    self.report_load(outcome)?;
                }
            }
        }

        if self.session.is_loading() {
            let outcome = self.session.finish_load().await.map(|_| ());
            self.report_load(outcome)?;
        }

        self.out.flush()?;
        Ok(self.out)
    }

    fn write_prompt(&mut self) -> Result<()> {
        let prompt = match self.pending {
            Pending::None => self.prompt.as_str(),
            Pending::ConfirmManual => "Select the file manually? [y/N] ",
            Pending::ManualPath => "Path to CSV file (empty to cancel): ",
        };
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match self.pending {
            Pending::ConfirmManual => {
                self.pending = if line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes") {
                    Pending::ManualPath
                } else {
                    writeln!(self.out, "Load cancelled. Use 'load' or 'open <path>' to try again.")?;
                    Pending::None
                };
                return Ok(Flow::Continue);
            }
            Pending::ManualPath => {
                self.pending = Pending::None;
                if line.is_empty() {
                    writeln!(self.out, "No file selected.")?;
                } else {
                    let map_type = self.map_type;
                    self.start_manual_load(line, map_type)?;
                }
                return Ok(Flow::Continue);
            }
            Pending::None => {}
        }

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        tracing::debug!("Command '{}' with argument '{}'", command, argument);

        match command.to_ascii_lowercase().as_str() {
            "" => {}
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => writeln!(self.out, "{}", HELP)?,
            "status" => self.print_status()?,
            "load" => {
                let map_type = if argument.is_empty() {
                    Ok(self.map_type)
                } else {
                    argument.parse::<MapType>()
                };
                match map_type {
                    Ok(map_type) => self.start_load(map_type)?,
                    Err(e) => self.print_error(&e)?,
                }
            }
            "open" => {
                if self.require_argument(argument, "Please enter a file path.")? {
                    let map_type = self.map_type;
                    self.start_manual_load(argument, map_type)?;
                }
            }
            "wait" => {
                if self.session.is_loading() {
                    let outcome = self.session.finish_load().await.map(|_| ());
                    self.report_load(outcome)?;
                } else {
                    self.print_status()?;
                }
            }
            "show" => {
                if self.require_argument(argument, "Please enter a name.")? {
                    self.show(argument)?;
                }
            }
            "add" => {
                if self.require_argument(argument, "Please enter a name.")? {
                    self.add(argument)?;
                }
            }
            "mine" => {
                let text = self.session.collection().map(|records| {
                    if records.is_empty() {
                        "Your collection is empty.\n".to_string()
                    } else {
                        render::grouped_by_type("Your collection sorted by primary type", &records)
                    }
                });
                self.print_text(text)?;
            }
            "all" => {
                let text = self
                    .session
                    .all_sorted()
                    .map(|records| render::grouped_by_type("All records sorted by primary type", &records));
                self.print_text(text)?;
            }
            "list" => {
                let text = self.session.list_all().map(|records| {
                    if records.is_empty() {
                        "No records loaded.\n".to_string()
                    } else {
                        render::numbered_table(&records)
                    }
                });
                self.print_text(text)?;
            }
            "ability" => {
                if self.require_argument(argument, "Please enter an ability.")? {
                    let text = self
                        .session
                        .by_ability(argument)
                        .map(|records| render::ability_matches(argument, &records));
                    self.print_text(text)?;
                }
            }
            other => writeln!(self.out, "Unknown command '{}'. Type 'help' for a list of commands.", other)?,
        }

        Ok(Flow::Continue)
    }

    fn require_argument(&mut self, argument: &str, message: &str) -> Result<bool> {
        if argument.is_empty() {
            writeln!(self.out, "{}", message)?;
            return Ok(false);
        }
        Ok(true)
    }

    fn start_load(&mut self, map_type: MapType) -> Result<()> {
        match self.session.begin_load(map_type) {
            Ok(()) => {
                self.map_type = map_type;
                writeln!(self.out, "Loading data with {}...", map_type)?;
            }
            Err(e) => self.print_error(&e)?,
        }
        Ok(())
    }

    fn start_manual_load(&mut self, path: &str, map_type: MapType) -> Result<()> {
        match self.session.begin_load_from_path(path, map_type) {
            Ok(()) => {
                self.map_type = map_type;
                writeln!(self.out, "Loading data from {} with {}...", path, map_type)?;
            }
            Err(e) => self.print_error(&e)?,
        }
        Ok(())
    }

    fn report_load(&mut self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => {
                let catalog = self.session.catalog()?;
                writeln!(
                    self.out,
                    "Data loaded successfully from {}. {} records available.",
                    catalog.source(),
                    catalog.store().size()
                )?;
                let skipped = catalog.report().skipped();
                if skipped > 0 {
                    writeln!(self.out, "{} malformed rows were skipped.", skipped)?;
                }
            }
            Err(e @ DexError::SourceNotFound { .. }) => {
                writeln!(self.out, "Error loading data: {}", e.user_friendly_message())?;
                self.pending = Pending::ConfirmManual;
            }
            Err(e) => {
                writeln!(self.out, "Error loading data: {}", e.user_friendly_message())?;
                writeln!(self.out, "Use 'load' or 'open <path>' to try again.")?;
            }
        }
        Ok(())
    }

    fn show(&mut self, name: &str) -> Result<()> {
        let found = self
            .session
            .show(name)
            .map(|record| record.map(|record| record.to_string()));
        match found {
            Ok(Some(text)) => writeln!(self.out, "{}", text)?,
            Ok(None) => writeln!(self.out, "'{}' does not exist in the data.", name)?,
            Err(e) => self.print_error(&e)?,
        }
        Ok(())
    }

    fn add(&mut self, name: &str) -> Result<()> {
        match self.session.add(name) {
            Ok(AddOutcome::Added) => writeln!(self.out, "'{}' added to your collection.", name)?,
            Ok(AddOutcome::NotFound) => writeln!(self.out, "'{}' does not exist in the data.", name)?,
            Ok(AddOutcome::AlreadyOwned) => {
                writeln!(self.out, "'{}' is already in your collection.", name)?
            }
            Err(e) => self.print_error(&e)?,
        }
        Ok(())
    }

    fn print_status(&mut self) -> Result<()> {
        let line = match self.session.state() {
            LoadState::Idle => "No data loaded.".to_string(),
            LoadState::Loading { map_type, .. } => format!("Loading with {}...", map_type),
            LoadState::Failed { message } => format!("Last load failed: {}", message),
            LoadState::Ready(catalog) => {
                let origin = match catalog.source().origin() {
                    SourceOrigin::Packaged => "bundled",
                    SourceOrigin::DefaultPath => "default path",
                    SourceOrigin::Discovered => "search",
                    SourceOrigin::Manual => "manual",
                };
                format!(
                    "Loaded {} records from {} ({}) using {}; {} in your collection.",
                    catalog.store().size(),
                    catalog.source(),
                    origin,
                    catalog.store().map_type(),
                    catalog.subset().size()
                )
            }
        };
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn print_text(&mut self, text: Result<String>) -> Result<()> {
        match text {
            Ok(text) => write!(self.out, "{}", text)?,
            Err(e) => self.print_error(&e)?,
        }
        Ok(())
    }

    fn print_error(&mut self, error: &DexError) -> Result<()> {
        tracing::debug!("Command refused: {}", error);
        writeln!(
            self.out,
            "{} ({})",
            error.user_friendly_message(),
            error.recovery_suggestion()
        )?;
        Ok(())
    }
}
