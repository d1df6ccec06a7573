mod actions;
mod config;
mod input;
mod keycodes;
mod region;
mod sequencer;
mod task;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{Config, delay_from_secs, load_config_or_default};
use input::{EnigoDevice, MouseButton};
use region::Region;
use sequencer::{Sequencer, SequencerConfig};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use task::spawn_task;

#[derive(Parser)]
#[command(
    name = "flseq",
    about = "Drive FL Studio with delay-paced mouse and keyboard input",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./flseq.toml if present)
    #[arg(long, short = 'c', global = true, env = "FLSEQ_CONFIG")]
    config: Option<PathBuf>,

    /// Override the delay between actions, in seconds
    #[arg(long, global = true)]
    delay: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one or more tasks from the config file
    Run {
        /// Task names, run in order, each on its own thread
        #[arg(required = true)]
        tasks: Vec<String>,
    },

    /// List configured tasks
    Tasks,

    /// Move the pointer and click
    Click {
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
        #[arg(long, value_enum, default_value_t = MouseButton::Left)]
        button: MouseButton,
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Click the centre of a region given as x1,y1,x2,y2
    ClickRegion {
        #[arg(allow_hyphen_values = true)]
        region: Region,
        #[arg(long, value_enum, default_value_t = MouseButton::Left)]
        button: MouseButton,
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Type text into the focused window
    Type { text: String },

    /// Press and release a single key
    Key { name: String },

    /// Press a key combination, e.g. `hotkey ctrl s` or `hotkey ctrl+s`
    Hotkey {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Type a track name and confirm it
    NameTrack {
        name: String,
        /// Click the track name field first
        #[arg(long)]
        click: bool,
    },

    /// Print the current pointer position
    Position,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config_or_default(cli.config.as_deref())?;
    let log_path = init_logging(&config)?;

    log::info!("===========================================");
    log::info!("FL Studio sequencer v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Log file: {}", log_path);
    log::info!("===========================================");

    let mut seq_config = config.automation.sequencer_config()?;
    let delay_override = cli
        .delay
        .map(delay_from_secs)
        .transpose()
        .context("Invalid --delay")?;
    log::info!(
        "Target window: {} (delay {:?})",
        config.automation.window_title,
        delay_override.unwrap_or(seq_config.delay)
    );

    match cli.command {
        Commands::Run { tasks } => {
            if let Some(delay) = delay_override {
                seq_config.delay = delay;
            }
            run_tasks(&config, &tasks, seq_config)
        }
        Commands::Tasks => {
            list_tasks(&config);
            Ok(())
        }
        command => {
            let mut seq = Sequencer::new(EnigoDevice::new()?, seq_config);
            if let Some(delay) = delay_override {
                seq.set_delay(delay);
            }
            run_direct(&mut seq, command)
        }
    }
}

/// Start every named task on its own thread, then wait for them in order
fn run_tasks(config: &Config, names: &[String], seq_config: SequencerConfig) -> Result<()> {
    // Resolve all names first so a typo doesn't leave earlier tasks running
    let tasks = names
        .iter()
        .map(|name| {
            config
                .find_task(name)
                .cloned()
                .with_context(|| format!("Unknown task: {}", name))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut failed = 0;
    for task in tasks {
        let handle = spawn_task(task, seq_config)?;
        let name = handle.name().to_string();
        if let Err(e) = handle.join() {
            log::error!("{}: {:#}", name, e);
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} task(s) failed", failed, names.len());
    }
    Ok(())
}

fn list_tasks(config: &Config) {
    if config.task.is_empty() {
        println!("No tasks configured");
        return;
    }
    for task in &config.task {
        println!("{} ({} steps)", task.name, task.steps.len());
        for step in &task.steps {
            println!("  - {}", step.describe());
        }
    }
}

fn run_direct(seq: &mut Sequencer<EnigoDevice>, command: Commands) -> Result<()> {
    match command {
        Commands::Click {
            x,
            y,
            button,
            count,
        } => seq.click(x, y, button, count),
        Commands::ClickRegion {
            region,
            button,
            count,
        } => {
            let (x, y) = region.center();
            seq.click(x, y, button, count)
        }
        Commands::Type { text } => seq.type_text(&text),
        Commands::Key { name } => seq.press_key(keycodes::parse_key(&name)?),
        Commands::Hotkey { keys } => seq.hotkey(&keycodes::parse_keys(&keys)?),
        Commands::NameTrack { name, click } => {
            if click {
                seq.click_track_name_field()?;
            }
            seq.name_track(&name)
        }
        Commands::Position => {
            let (x, y) = seq.cursor_position()?;
            println!("{}, {}", x, y);
            Ok(())
        }
        Commands::Run { .. } | Commands::Tasks => unreachable!("handled before device setup"),
    }
}

/// Writes every log line to both the log file and stderr
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write_all(buf)?;
        std::io::stderr().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()?;
        std::io::stderr().flush()
    }
}

/// Initialize logging system
/// Returns the absolute path to the log file
fn init_logging(config: &Config) -> Result<String> {
    use std::env;

    let log_file_path = &config.logging.file;
    let level = config.logging.level_filter()?;

    let absolute_path = env::current_dir()
        .context("Failed to get current directory")?
        .join(log_file_path)
        .to_string_lossy()
        .to_string();

    let file = OpenOptions::new()
        .create(true)
        .append(true) // Append across multiple runs
        .open(log_file_path)
        .with_context(|| format!("Failed to open log file {} for writing", log_file_path))?;

    // RUST_LOG, if set, overrides the configured level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(Tee { file })))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    Ok(absolute_path)
}
