// Terminal session: banner, then one calculation with line editing

use std::io;

use pascaline_core::repl::{EditlineInput, SessionOutcome, run_session};
use pascaline_core::{Config, JsonFileStore};
use tracing::{debug, info};

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    print_banner(config);

    let mut input = EditlineInput::new();
    let mut store = JsonFileStore::new(&config.history_path);
    let mut stdout = io::stdout();

    match run_session(&mut input, &mut stdout, &mut store, config)? {
        SessionOutcome::Completed(evaluation) => {
            info!(
                expression = %evaluation.expression,
                result = %evaluation.result,
                "calculation complete"
            );
        }
        SessionOutcome::Failed(e) => debug!(error = %e, "calculation failed"),
        SessionOutcome::Cancelled => println!("Goodbye!"),
    }

    Ok(())
}

fn print_banner(config: &Config) {
    println!();
    println!("Pascaline calculator v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Operations: +  -  *  /  ^   | Unary: sqrt, fact   | '=' to finish");
    println!("Commands:   h (last {} calculations), clear (erase history)", config.history_limit);
    println!("History:    {}", config.history_path.display());
    println!("Example:    2 + 3 * 4 =");
    println!();
}
