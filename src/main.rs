//! Leverage command line tool: computes rear suspension leverage curves
//! from digitized bike datasheets.
mod cli;

fn main() {
    cli::Entry::main();
}
