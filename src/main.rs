use clap::Parser;
use notecommander::core::config;
use notecommander::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "notecommander", about = "Terminal note keeper with paged output")]
struct Args {
    /// Note store file (overrides NOTECOMMANDER_DB and the config file)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, default_value = "notecommander.log")]
    log_file: PathBuf,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, source) = match config::load_config() {
        Ok((c, source)) => (c, Ok(source)),
        Err(e) => (config::NotesConfig::default(), Err(e)),
    };
    let settings = config::resolve(&file_config, args.db.as_deref());

    // Initialize file logger; the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(settings.log_level, log_config, log_file);
    }

    match &source {
        Ok(source) => log::info!("Config: {}", source),
        Err(e) => log::warn!("Ignoring config file: {}", e),
    }
    log::debug!("Config: {:?}", file_config);
    for warning in &settings.warnings {
        log::warn!("{}", warning);
    }
    log::info!("NoteCommander starting with store {}", settings.db_path.display());

    tui::run(settings)
}
