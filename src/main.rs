use std::io::Write as _;
use std::process::ExitCode;
use std::{env, fs, io};

use llparse::{Grammar, LlParser, LlTable};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = match env::args().nth(1) {
        Some(path) => path,
        None => prompt("Grammar file: ")?,
    };
    let text = fs::read_to_string(&path)?;

    let grammar = Grammar::parse(&text)?;
    let table = LlTable::build(&grammar)?;
    println!("{table}");

    let input = prompt("Input: ")?;
    let parser = LlParser::new(&grammar, &table);
    let tree = parser.parse_str(&input)?;

    println!("Parse successful!");
    print!("{tree}");
    Ok(())
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
