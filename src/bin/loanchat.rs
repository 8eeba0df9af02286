//! Interactive terminal client for the loan assistant.
//!
//! This binary drives a [`ChatClient`] from a line-editing REPL: each line is
//! sent to the loan server, and the replies, notifications and open panels
//! are printed as they change.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a server on localhost:5000
//! loanchat
//!
//! # Talk to another server and save letters elsewhere
//! loanchat --server https://loans.example.com --download-dir ~/Documents
//!
//! # Disable colors (useful for piping output)
//! loanchat --no-color
//! ```
//!
//! # Commands
//!
//! - `/upload <path>` - Upload a salary slip or other document
//! - `/download` - Save the sanction letter
//! - `/mode <text|number|phone>` - Switch input mode
//! - `/status` - Show loan status and details
//! - `/help` - Show available commands
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use loanchat::chat::{
    ChatArgs, ChatCommand, ChatConfig, PlainTextRenderer, Presenter, Renderer, help_text,
    parse_command,
};
use loanchat::{ChatClient, LoanServer, Severity, render};

/// Main entry point for the loanchat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("loanchat [OPTIONS]");
    let config = ChatConfig::from(args);

    let server = LoanServer::with_options(Some(config.server.clone()), Some(config.timeout))?;
    let client = ChatClient::new(server).with_download_dir(config.download_dir.clone());
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut presenter = Presenter::new();
    let mut rl = DefaultEditor::new()?;

    println!(
        "Loan assistant at {} (session {})",
        client.api().base_url(),
        client.session_id()
    );
    println!("Type /help for commands, /quit to exit\n");
    let mut rendered = presenter.present(&client.snapshot(), &mut renderer);

    loop {
        let prompt = if rendered.show_input_options {
            format!("[{}] > ", rendered.placeholder)
        } else {
            "You: ".to_string()
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Upload(path) => {
                            client.upload_path(expand_home(&path)).await;
                        }
                        ChatCommand::Download => {
                            if client.download_sanction_letter().await.is_completed() {
                                renderer.print_info(&format!(
                                    "Saved to {}",
                                    client.sanction_letter_path().display()
                                ));
                            }
                        }
                        ChatCommand::Mode(input_type) => {
                            client.set_input_type(input_type);
                        }
                        ChatCommand::Status => {
                            let view = render(&client.snapshot());
                            renderer.print_status(&view);
                            renderer.print_loan_summary(&view);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                } else if rendered.show_input_options && !rendered.input_type.accepts(line) {
                    client.show_toast(
                        format!("Please enter a valid {}", rendered.input_type),
                        Severity::Error,
                    );
                } else {
                    client.set_input(line);
                    client.send_input().await;
                }
                rendered = presenter.present(&client.snapshot(), &mut renderer);
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn expand_home(path: &str) -> std::path::PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => std::path::PathBuf::from(home).join(rest),
        _ => std::path::PathBuf::from(path),
    }
}
