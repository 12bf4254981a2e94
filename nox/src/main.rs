use nox::printer::AstPrinter;
use nox_parser::parser::Parser;
use std::env;
use std::fs;

fn main() {
    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: nox <script>");
            return;
        }
    };

    let code = match fs::read_to_string(&path) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("could not read {path}: {err}");
            return;
        }
    };

    let source = code.as_str().into();
    let mut parser = Parser::new(&source);
    let program = parser.parse();

    if parser.had_errors() {
        eprint!("{}", source.errors);
    }
    print!("{}", AstPrinter::new().print(&program));
}
