// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;

#[cfg(feature = "tui")]
use spendwise::Session;

fn main() -> Result<()> {
    run_ui_mode()
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("💰 Spendwise {} — personal expense tracker", spendwise::VERSION);
    println!("Starting UI... (Press 'q' to quit)\n");

    // Fresh in-memory session; data lives only until the process exits.
    let session = Session::new();
    let mut app = ui::App::new(session);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API server: cargo run --bin spendwise-server --features server");
    std::process::exit(1);
}
