//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::{HELP, ReplCommand, parse_command};
use super::turn::{ProgressMode, run_turn};
use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use cod_application::{
    ConversationLogger, ExecutionParams, LlmGateway, NoConversationLogger, RunChatInput,
    RunChatUseCase,
};
use cod_domain::{Message, SessionConfig};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Interactive chat REPL
pub struct ChatRepl {
    gateway: Arc<dyn LlmGateway>,
    execution: ExecutionParams,
    conversation_logger: Arc<dyn ConversationLogger>,
    config: SessionConfig,
    output: OutputConfig,
    repl: ReplConfig,
    /// Earlier user/assistant messages, oldest first
    thread: Vec<Message>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(gateway: Arc<dyn LlmGateway>, config: SessionConfig) -> Self {
        Self {
            gateway,
            execution: ExecutionParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
            config,
            output: OutputConfig::default(),
            repl: ReplConfig::default(),
            thread: Vec::new(),
        }
    }

    pub fn with_execution_params(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_repl_config(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(path) = &self.repl.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.process_query(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(path) = &self.repl.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│         Chain of Draft - Chat Mode          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        print!("{}", ConsoleFormatter::format_settings(&self.config));
        println!();
        println!("{}", HELP);
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, line: &str) -> bool {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                return false;
            }
        };

        if let Some(config) = command.apply(&self.config) {
            debug!("Settings changed by {}", line);
            self.config = config;
            print!("{}", ConsoleFormatter::format_settings(&self.config));
            return false;
        }

        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                println!("{}", HELP);
                println!();
                false
            }
            ReplCommand::Settings => {
                print!("{}", ConsoleFormatter::format_settings(&self.config));
                false
            }
            ReplCommand::Clear => {
                self.thread.clear();
                println!("Thread cleared.");
                false
            }
            _ => false,
        }
    }

    async fn process_query(&mut self, query: &str) {
        println!();

        // Ctrl-C while a turn is running cancels the turn, not the REPL.
        let token = CancellationToken::new();
        let watcher = {
            let token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            })
        };

        let use_case = RunChatUseCase::new(Arc::clone(&self.gateway))
            .with_execution_params(self.execution.clone())
            .with_conversation_logger(Arc::clone(&self.conversation_logger))
            .with_cancellation(token);
        let input =
            RunChatInput::new(query, self.config.clone()).with_history(self.thread.clone());

        let result = run_turn(&use_case, input, ProgressMode::detect(self.repl.show_progress)).await;
        watcher.abort();

        match result {
            Ok(outcome) => {
                let formatter = ConsoleFormatter::new(&self.output);
                println!("{}", formatter.render(query, &outcome, self.output.format));
                self.thread.push(Message::user(query));
                self.thread.push(outcome.assistant_message());
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}
