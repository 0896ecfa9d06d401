//! Coaching REPL session

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::orchestrator::{Orchestrator, OrchestratorError};
use crate::session::{ThreadKind, TurnRole};

/// Interactive role-play against the simulated security leader
pub struct CoachingRepl {
    orchestrator: Orchestrator,
}

impl CoachingRepl {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            match rl.readline(&format!("{} ", "you>".bright_green())) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    match parse_command(input) {
                        Some(SlashCommand::Quit) => break,
                        Some(SlashCommand::Help) => self.print_help(),
                        Some(SlashCommand::History) => self.print_history().await,
                        Some(SlashCommand::Feedback) => self.feedback().await,
                        Some(SlashCommand::Unknown(cmd)) => {
                            println!("{} Unknown command: {}", "?".yellow(), cmd);
                            println!("Type {} for available commands", "/help".yellow());
                        }
                        None => self.turn(input).await,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        let profile = self.orchestrator.session().profile();
        println!();
        println!("{}", "dealcoach role-play".bright_cyan().bold());
        println!("You are pitching Aviatrix CNSF to the CISO of {}.", profile.company.bold());
        if let Some(competitors) = &profile.competitors_raw {
            println!("Also in the deal: {}", competitors);
        }
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Get coaching feedback on the conversation", "/feedback".yellow());
        println!("  {:14} Show the conversation so far", "/history".yellow());
        println!("  {:14} Exit the REPL", "/quit".yellow());
        println!();
    }

    async fn print_history(&self) {
        let thread = self
            .orchestrator
            .session()
            .thread(ThreadKind::Coaching)
            .snapshot()
            .await;
        if thread.is_empty() {
            println!("{}", "No conversation yet.".dimmed());
            return;
        }

        println!();
        for turn in thread.turns() {
            let speaker = match turn.role {
                TurnRole::User => "you".bright_green(),
                TurnRole::Assistant => "ciso".bright_blue(),
                TurnRole::System => "system".dimmed(),
            };
            println!("{}: {}", speaker, turn.content);
        }
        println!();
    }

    async fn turn(&self, input: &str) {
        println!("{}", "...".dimmed());
        match self.orchestrator.coaching_turn(input).await {
            Ok(reply) => println!("\n{} {}\n", "ciso>".bright_blue(), reply),
            Err(e) => print_error(&e),
        }
    }

    async fn feedback(&self) {
        println!("{}", "Reviewing the conversation...".dimmed());
        match self.orchestrator.coaching_feedback().await {
            Ok(feedback) => {
                println!();
                println!("{}", "Coaching Feedback".bright_cyan().bold());
                println!("{}", feedback);
                println!();
            }
            Err(e) => print_error(&e),
        }
    }
}

fn print_error(err: &OrchestratorError) {
    match err {
        OrchestratorError::PreconditionNotMet { .. } => {
            println!("{} Say something to the CISO before asking for feedback.", "!".yellow())
        }
        _ => println!("{} {}", "Error:".red(), err),
    }
}

/// Slash commands understood by the REPL
#[derive(Debug, PartialEq, Eq)]
enum SlashCommand {
    Help,
    Feedback,
    History,
    Quit,
    Unknown(String),
}

/// `None` means the input is a message for the role-play
fn parse_command(input: &str) -> Option<SlashCommand> {
    if !input.starts_with('/') {
        return None;
    }
    let cmd = input.split_whitespace().next().unwrap_or(input);
    Some(match cmd {
        "/help" | "/h" => SlashCommand::Help,
        "/feedback" | "/f" => SlashCommand::Feedback,
        "/history" => SlashCommand::History,
        "/quit" | "/q" | "/exit" => SlashCommand::Quit,
        other => SlashCommand::Unknown(other.to_string()),
    })
}
