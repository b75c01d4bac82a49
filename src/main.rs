mod app;
mod data;
mod state;

use std::env;
use std::io;
use std::path::Path;
use std::process;

use state::Session;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("Usage: listing-lens <listings.csv[.gz]>");
        process::exit(2);
    };

    let table = data::loader::load_file(Path::new(&path))?;
    let mut session = Session::new(table);

    let stdin = io::stdin();
    let stdout = io::stdout();
    app::run(&mut session, stdin.lock(), stdout.lock())
}
