#[macro_use]
extern crate clap;

use arith_lispy::{
    compile, init_tracing, interpret, tokenize, Error, GreedyTokenizer, RecursiveDescentParser,
    Token,
};
use clap::AppSettings;
use std::fs;
use std::io::{self, Read};
use std::process;

fn main() {
    init_tracing();

    let matches = clap_app!(arith_lispy =>
        (version: crate_version!())
        (author: "ocamlmycaml")
        (about: "Evaluates or translates prefix arithmetic s-expressions")
        (@arg INPUT: +required "Sets the input file to use, or - for stdin")
        (@subcommand tokenize =>
            (about: "Tokenize the file and print out the tokens")
        )
        (@subcommand parse =>
            (about: "Parse every expression and print it back in prefix form")
        )
        (@subcommand interpret =>
            (about: "Evaluate every expression and print its value")
        )
        (@subcommand compile =>
            (about: "Print every expression in infix notation")
        )
    )
    .setting(AppSettings::SubcommandRequiredElseHelp)
    .get_matches();

    let input = matches.value_of("INPUT").unwrap_or("-");
    let source = match read_input(input) {
        Ok(source) => source,
        Err(why) => {
            eprintln!("couldn't read {}: {}", input, why);
            process::exit(1);
        }
    };

    if let Err(err) = run(matches.subcommand_name(), &source) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(subcommand: Option<&str>, source: &str) -> Result<(), Error> {
    if subcommand == Some("tokenize") {
        return print_tokens(source);
    }

    let tokens = tokenize(source)?;
    let mut parser = RecursiveDescentParser::new(&tokens);
    while let Some(expr) = parser.next_expression()? {
        match subcommand {
            Some("parse") => println!("{}", expr),
            Some("interpret") => println!("{}", interpret(&expr)?),
            Some("compile") => println!("{}", compile(&expr)?),
            _ => {}
        }
    }

    Ok(())
}

fn print_tokens(source: &str) -> Result<(), Error> {
    let mut tabs = 0usize;
    for token_and_span in GreedyTokenizer::new(source) {
        let token_and_span = token_and_span?;

        // if we encounter a ), reduce tabs before printing
        if token_and_span.token == Token::CloseParen {
            tabs = tabs.saturating_sub(1);
        }

        println!("{}{}", "\t".repeat(tabs), token_and_span);

        // if we encounter a (, increase tabs
        if token_and_span.token == Token::OpenParen {
            tabs += 1;
        }
    }

    Ok(())
}

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input)
    }
}
