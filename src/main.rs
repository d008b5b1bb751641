use anyhow::{Context, Result};
use printer_tray::config::{Args, Mode, Settings};
use printer_tray::{Printer, Session};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(settings: &Settings) -> Result<()> {
    let filter = settings.env_filter()?;
    // Pages go to stdout; keep logs out of the way.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    let settings = Settings::from_env(args)?;
    init_logging(&settings)?;

    info!(
        name = %settings.name,
        sheets = settings.sheets,
        "starting printer v{}",
        env!("CARGO_PKG_VERSION")
    );

    let printer = Printer::with_sheets(settings.name, settings.sheets);
    let mut session = Session::with_printer(printer);
    let mut stdout = std::io::stdout();

    let code = match settings.mode {
        Mode::Repl => {
            session.repl()?;
            0
        }
        Mode::Script(path) => {
            let script = std::fs::read_to_string(&path)
                .with_context(|| format!("can't read script {}", path.display()))?;
            session.run_script(&script, &mut stdout)?
        }
        Mode::Command(words) => {
            let args: Vec<&str> = words[1..].iter().map(|s| s.as_str()).collect();
            session.run(&words[0], &args, &mut stdout)?
        }
    };

    std::process::exit(code)
}
