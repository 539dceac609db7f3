use clap::Parser as ClapParser;
use pluck_lang::{Parser, lex, query_json};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "pluck")]
#[command(about = "Pluck - a path query language for extracting values from JSON")]
#[command(version)]
struct Cli {
    /// The query to run, e.g. '$.foo[0]'
    query: String,

    /// JSON input (reads from stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,

    /// Only validate syntax, don't execute
    #[arg(long)]
    syntax_only: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if cli.syntax_only {
        check_syntax(&cli.query)?;
        println!("Syntax is valid");
        return Ok(());
    }

    let input = match cli.input {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("IO error: {}", e))?;
            buffer
        }
        None => {
            return Err("No input provided. Use --input or pipe JSON to stdin.".to_string());
        }
    };

    let json: serde_json::Value =
        serde_json::from_str(&input).map_err(|e| format!("Invalid JSON: {}", e))?;

    let result = query_json(&cli.query, json).map_err(|e| e.to_string())?;

    let out = if cli.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .map_err(|e| format!("IO error: {}", e))?;

    println!("{}", out);
    Ok(())
}

fn check_syntax(query: &str) -> Result<(), String> {
    let tokens = lex(query).map_err(|e| e.to_string())?;
    Parser::new(tokens)
        .parse()
        .map(|_| ())
        .map_err(|e| e.to_string())
}
