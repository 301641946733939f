/// micro3d terminal demo - spinning cube
///
/// Controls:
///   - M / Space: Cycle filled, wireframe and primitives
///   - P: Pause the spin
///   - +/-: Spin faster / slower
///   - Q/ESC: Quit
///
/// Logging goes to stderr; set RUST_LOG and redirect it, e.g. `2>micro3d.log`.
use micro3d_terminal::{AppConfig, TerminalApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut app = TerminalApp::new(AppConfig::default())?;
    app.run()?;

    println!("Thank you for using micro3d!");
    Ok(())
}
