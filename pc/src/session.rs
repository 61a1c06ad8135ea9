//! Interactive fill session
//!
//! Reads `NAME=VALUE` lines and slash commands, applying them to a
//! `RenderState` until the user quits.

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::cli::parse_assignment;
use crate::render::RenderState;

const HELP: &str = "\
NAME=VALUE      set a variable (empty VALUE clears it)
/example        load the prompt's example values
/clear          empty every variable
/show           print the prompt with current values
/status         list variables and whether they are filled
/custom NAME    type a value outside NAME's option list
/save           keep the custom value being typed
/cancel         discard the custom value, keep the old one
/preset [NAME]  discard the custom value and unset NAME
/quit           finish and print the prompt";

/// Response to one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Quit,
}

/// A fill session over one open template
pub struct FillSession<'a> {
    state: RenderState<'a>,
}

impl<'a> FillSession<'a> {
    pub fn new(state: RenderState<'a>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &RenderState<'a> {
        &self.state
    }

    /// Run the line-editing loop until /quit or Ctrl+D
    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let prompt = match self.state.custom() {
                Some(draft) => format!("{} ", format!("{}>", draft.name).bright_yellow()),
                None => format!("{} ", ">".bright_green()),
            };

            match rl.readline(&prompt) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    match self.handle_input(input) {
                        Reply::Message(text) => println!("{}", text),
                        Reply::Quit => break,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let template = self.state.template();
        println!("{}", template.title.bold());
        if let Some(description) = &template.description {
            println!("{}", description.dimmed());
        }
        println!();
        println!("{}", self.status_text());
        println!();
        println!("{}", "Type NAME=VALUE to fill a variable, /help for commands.".dimmed());
    }

    /// Apply one line of input
    pub fn handle_input(&mut self, input: &str) -> Reply {
        debug!(%input, "FillSession::handle_input: called");
        if !input.starts_with('/') {
            if self.state.custom().is_some() {
                return match self.state.edit_custom(input) {
                    Ok(()) => Reply::Message("Custom value updated; /save to keep it, /cancel to discard".to_string()),
                    Err(e) => Reply::Message(e.to_string().red().to_string()),
                };
            }
            return self.handle_assignment(input);
        }

        let (command, arg) = match input.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (input, ""),
        };

        match command {
            "/quit" | "/q" | "/exit" => Reply::Quit,
            "/help" | "/h" | "/?" => Reply::Message(HELP.to_string()),
            "/example" => {
                if self.state.load_example() {
                    Reply::Message(format!("{}\n{}", "Loaded example values".green(), self.state.rendered()))
                } else {
                    Reply::Message("This prompt has no example values".yellow().to_string())
                }
            }
            "/clear" => {
                self.state.clear();
                Reply::Message("Cleared all values".to_string())
            }
            "/show" => Reply::Message(self.state.rendered()),
            "/status" => Reply::Message(self.status_text()),
            "/custom" => match self.state.begin_custom(arg) {
                Ok(()) => Reply::Message(format!("Type a custom value for {}", arg.cyan())),
                Err(e) => Reply::Message(e.to_string().red().to_string()),
            },
            "/save" => match self.state.commit_custom() {
                Ok(name) => Reply::Message(format!("{} {}", "Set".green(), name)),
                Err(e) => Reply::Message(e.to_string().red().to_string()),
            },
            "/cancel" => match self.state.cancel_custom() {
                Ok(()) => Reply::Message("Custom value discarded".to_string()),
                Err(e) => Reply::Message(e.to_string().red().to_string()),
            },
            "/preset" => self.handle_preset(arg),
            _ => Reply::Message(format!("Unknown command: {} (try /help)", command).red().to_string()),
        }
    }

    /// Leave the custom draft; NAME may be omitted but must match the draft when given
    fn handle_preset(&mut self, name: &str) -> Reply {
        if let Some(draft) = self.state.custom() {
            if !name.is_empty() && draft.name != name {
                let text = format!("Custom value is being edited for {}, not {}", draft.name, name);
                return Reply::Message(text.red().to_string());
            }
        }
        match self.state.leave_custom() {
            Ok(()) => Reply::Message("Back to preset options".to_string()),
            Err(e) => Reply::Message(e.to_string().red().to_string()),
        }
    }

    fn handle_assignment(&mut self, input: &str) -> Reply {
        let Some((name, value)) = parse_assignment(input) else {
            return Reply::Message("Expected NAME=VALUE or a /command".yellow().to_string());
        };
        match self.state.set(name, value) {
            Ok(()) => Reply::Message(format!("{} {}", "Set".green(), name)),
            Err(e) => Reply::Message(e.to_string().red().to_string()),
        }
    }

    /// One line per variable with its fill state
    fn status_text(&self) -> String {
        let status = self.state.fill_status();
        let mut lines = Vec::new();
        for variable in &self.state.template().variables {
            let filled = status.get(&variable.name).copied().unwrap_or(false);
            let marker = if filled { "✓".green() } else { "○".dimmed() };
            let required = if variable.required { "*" } else { "" };
            let mut line = format!("{} {}{}", marker, variable.name.cyan(), required);
            if filled {
                line.push_str(&format!(" = {}", self.state.value(&variable.name)));
            } else {
                line.push_str(&format!(" ({})", "pending".dimmed()));
            }
            if !variable.options.is_empty() {
                line.push_str(&format!(" [{}]", variable.options.join(" | ")));
            }
            lines.push(line);
        }
        if lines.is_empty() {
            lines.push("This prompt has no variables".to_string());
        }
        if self.state.using_example() {
            lines.push("(example loaded)".dimmed().to_string());
        }
        lines.join("\n")
    }
}
