use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::{fs, process};

use tinct_core::{Token, theme};
use tinct_lib::format::{Formatter, HtmlFormatter, NullFormatter, TerminalFormatter};
use tinct_lib::grammar::Grammar;
use tinct_lib::lexer::{Lexer, LexerOptions, PrintTracer};
use tinct_lib::registry::GuessInput;

use crate::cli::OutputFormat;

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn read_source(path: &Path) -> String {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        if let Err(err) = std::io::stdin().read_to_end(&mut buf) {
            fail(&format!("reading stdin: {err}"));
        }
        buf
    } else {
        match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => fail(&format!("{}: {err}", path.display())),
        }
    };
    match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(_) => fail("input is not valid UTF-8"),
    }
}

fn filename_hint(path: &Path) -> Option<&str> {
    if path == Path::new("-") {
        return None;
    }
    path.to_str()
}

fn resolve_grammar(language: &Option<String>, path: &Path, source: &str) -> Arc<Grammar> {
    match language {
        Some(name) => tinct_langs::find(name)
            .unwrap_or_else(|| fail(&format!("unknown grammar: {name}"))),
        None => {
            let mut input = GuessInput::new().source(source);
            if let Some(filename) = filename_hint(path) {
                input = input.filename(filename);
            }
            tinct_langs::registry().guess_or_plaintext(&input)
        }
    }
}

fn lex_or_exit(grammar: Arc<Grammar>, source: &str, trace: bool) -> Vec<Token> {
    let mut lexer = Lexer::new(grammar, LexerOptions::default());
    let result = if trace {
        lexer
            .lex_with(source, PrintTracer::stderr())
            .map(|tokens| tokens.collect::<Result<Vec<_>, _>>())
    } else {
        lexer.lex(source).map(|tokens| tokens.collect())
    };
    match result {
        Ok(Ok(tokens)) => tokens,
        Ok(Err(err)) | Err(err) => fail(&err.to_string()),
    }
}

pub fn list() {
    for grammar in tinct_langs::all() {
        let aliases = grammar.aliases().join(", ");
        let filenames: Vec<&str> = grammar.filenames().iter().map(|p| p.raw()).collect();
        println!(
            "{:<12} {:<24} {}",
            grammar.tag(),
            aliases,
            filenames.join(" ")
        );
    }
}

pub fn guess(file: &Path, mimetype: Option<&str>) {
    let source = read_source(file);
    let mut input = GuessInput::new().source(&source);
    if let Some(mimetype) = mimetype {
        input = input.mimetype(mimetype);
    }
    if let Some(filename) = filename_hint(file) {
        input = input.filename(filename);
    }
    match tinct_langs::registry().guess(&input) {
        Ok(grammar) => println!("{}", grammar.tag()),
        Err(err) => fail(&err.to_string()),
    }
}

pub fn highlight(
    file: &Path,
    language: &Option<String>,
    format: OutputFormat,
    theme_name: &str,
    line_numbers: bool,
) {
    let source = read_source(file);
    let grammar = resolve_grammar(language, file, &source);
    let tokens = lex_or_exit(grammar, &source, false);

    let output = match format {
        OutputFormat::Terminal => {
            let theme = theme::find(theme_name)
                .unwrap_or_else(|| fail(&format!("unknown theme: {theme_name}")));
            TerminalFormatter::new(theme).format(&tokens)
        }
        OutputFormat::Html => HtmlFormatter::new()
            .line_numbers(line_numbers)
            .format(&tokens),
        OutputFormat::Null => NullFormatter.format(&tokens),
    };
    print!("{output}");
}

pub fn tokens(file: &Path, language: &Option<String>, json: bool, trace: bool) {
    let source = read_source(file);
    let grammar = resolve_grammar(language, file, &source);
    let tokens = lex_or_exit(grammar, &source, trace);

    if json {
        match serde_json::to_string_pretty(&tokens) {
            Ok(out) => println!("{out}"),
            Err(err) => fail(&err.to_string()),
        }
    } else {
        for token in &tokens {
            println!("{} {:?}", token.kind, token.value);
        }
    }
}
