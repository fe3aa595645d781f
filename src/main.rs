//! map-tools command line front end.
//!
//! - `tools`: export tool schemas for a function-calling model
//! - `call`: dispatch one tool call and print the response envelope
//! - `shell`: read `<tool> <json-args>` lines interactively

use clap::{Parser, Subcommand, ValueEnum};
use map_tools::{Config, Dispatcher, ToolResponse};
use serde_json::Value;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// map-tools - geocoding, routing and tile metadata behind one tool interface
#[derive(Parser, Debug)]
#[command(name = "map-tools")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the registered tools
    Tools {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ToolsFormat::Json)]
        format: ToolsFormat,
    },

    /// Invoke one tool and print the response envelope as JSON
    Call {
        /// Tool name, e.g. reverse_geocode
        tool: String,

        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },

    /// Interactive loop: one `<tool> <json-args>` call per line
    Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ToolsFormat {
    /// Function-calling schemas
    Json,
    /// One line per tool
    Prompt,
    /// Tools grouped by backend
    Servers,
}

/// One parsed shell line.
#[derive(Debug, PartialEq)]
enum ShellInput {
    Empty,
    Exit,
    Help,
    Call { tool: String, args: Value },
    Invalid(String),
}

fn parse_shell_line(line: &str) -> ShellInput {
    let line = line.trim();
    match line {
        "" => return ShellInput::Empty,
        "exit" | "quit" => return ShellInput::Exit,
        "?" | "help" => return ShellInput::Help,
        _ => {}
    }

    let (tool, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    if rest.is_empty() {
        return ShellInput::Call {
            tool: tool.to_string(),
            args: Value::Object(serde_json::Map::new()),
        };
    }
    match serde_json::from_str(rest) {
        Ok(args) => ShellInput::Call {
            tool: tool.to_string(),
            args,
        },
        Err(e) => ShellInput::Invalid(format!("arguments are not valid JSON: {}", e)),
    }
}

fn render(response: &ToolResponse) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

async fn run_shell(dispatcher: &Dispatcher) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let help = format!(
        "{}\n\nUsage: <tool> <json-args>, '?' for help, 'exit' to leave\n",
        dispatcher.catalog().generate_prompt()
    );

    stdout.write_all(help.as_bytes()).await?;
    loop {
        stdout.write_all(b"map-tools> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let output = match parse_shell_line(&line) {
            ShellInput::Empty => continue,
            ShellInput::Exit => break,
            ShellInput::Help => help.clone(),
            ShellInput::Invalid(msg) => format!("{}\n", msg),
            ShellInput::Call { tool, args } => {
                format!("{}\n", render(&dispatcher.dispatch(&tool, args).await))
            }
        };
        stdout.write_all(output.as_bytes()).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    map_tools::observability::init_tracing();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let dispatcher = match Dispatcher::new(&config) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Tools { format } => {
            let catalog = dispatcher.catalog();
            let output = match format {
                ToolsFormat::Json => serde_json::to_string_pretty(&catalog.to_function_schemas()),
                ToolsFormat::Prompt => Ok(catalog.generate_prompt()),
                ToolsFormat::Servers => serde_json::to_string_pretty(&catalog.servers(&config)),
            };
            match output {
                Ok(text) => {
                    println!("{}", text);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Call { tool, args } => {
            let args: Value = match serde_json::from_str(&args) {
                Ok(args) => args,
                Err(e) => {
                    eprintln!("arguments are not valid JSON: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let response = dispatcher.dispatch(&tool, args).await;
            println!("{}", render(&response));
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Shell => match run_shell(&dispatcher).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}
