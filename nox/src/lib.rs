pub mod printer;

use nox_parser::parser::Parser;
use nox_source::Source;
use printer::AstPrinter;

/// Parses `source` and renders every top-level statement.
/// For testing purposes only: panics if the source has errors.
pub fn render(source: &str) -> String {
    let source = Source::new(source);
    let mut parser = Parser::new(&source);
    let program = parser.parse();
    assert!(source.has_no_errors(), "errors: {}", source.errors);
    AstPrinter::new().print(&program)
}
