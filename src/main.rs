use std::fs;
use std::process;

use clap::Parser as ClapParser;
use colored::Colorize;

use cfs::lexer::Lexer;
use cfs::source::compile_source;

#[derive(ClapParser)]
#[command(name = "cfs", version, about = "Closed-Form Script compiler")]
struct Cli {
    /// CFS source file to compile
    source: String,
    /// Destination file; prints to stdout when omitted
    dest: Option<String>,
    /// Dump the token stream to stderr before compiling
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.source) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{}", format!("cannot read `{}`: {}", cli.source, e).red());
            process::exit(1);
        }
    };

    if cli.debug {
        dump_tokens(&source);
    }

    let expr = match compile_source(&source) {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("{}", e.with_path(&cli.source).red());
            process::exit(1);
        }
    };

    match &cli.dest {
        None => println!("{}", expr),
        Some(path) => {
            if let Err(e) = fs::write(path, format!("{}\n", expr)) {
                eprintln!("{}", format!("cannot write `{}`: {}", path, e).red());
                process::exit(1);
            }
        }
    }
}

fn dump_tokens(source: &str) {
    let mut lexer = Lexer::new(source);
    // Lex errors are reported by the compile proper
    if let Ok(tokens) = lexer.tokenize() {
        for token in &tokens {
            eprintln!("{}:{}\t{:?}", token.pos.line, token.pos.col, token.kind);
        }
    }
}
