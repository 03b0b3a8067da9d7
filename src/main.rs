use aligner_tracker::application::tracker::Tracker;
use aligner_tracker::domain::calendar::parse_date;
use aligner_tracker::domain::ports::{ClockBox, KeyValueStoreBox};
use aligner_tracker::infrastructure::clock::{FixedClock, SystemClock};
use aligner_tracker::infrastructure::json_file::JsonFileStore;
use aligner_tracker::infrastructure::kv_schedule::KeyValueScheduleStore;
#[cfg(feature = "storage-rocksdb")]
use aligner_tracker::infrastructure::rocksdb::RocksDBStore;
use aligner_tracker::interfaces::csv::schedule_writer::ScheduleWriter;
use aligner_tracker::interfaces::text::ScheduleView;
use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file the schedule is saved in
    #[arg(long, env = "ALIGNER_TRACKER_STORE", default_value = "aligner-tracker.json")]
    store: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "ALIGNER_TRACKER_DB")]
    db_path: Option<PathBuf>,

    /// Use this date (yyyy-mm-dd) as today instead of the system clock
    #[arg(long, env = "ALIGNER_TRACKER_TODAY")]
    today: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Schedule(ScheduleCommand),
    /// Delete the saved schedule
    Reset,
}

#[derive(Subcommand)]
enum ScheduleCommand {
    /// Start a new schedule ending on the appointment date
    Setup {
        /// Next appointment date (yyyy-mm-dd)
        appointment_date: String,
        /// First aligner number
        start: u32,
        /// Last aligner number
        end: u32,
    },
    /// Record that an aligner was changed today
    Confirm { id: u32 },
    /// Correct the date an aligner was changed on
    Edit {
        id: u32,
        /// Actual change date (yyyy-mm-dd)
        date: String,
    },
    /// Print the schedule
    Show {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let clock: ClockBox = match &cli.today {
        Some(today) => Box::new(FixedClock::new(parse_date(today).into_diagnostic()?)),
        None => Box::new(SystemClock),
    };
    let kv_store = open_store(&cli)?;

    let command = match cli.command {
        Command::Reset => {
            kv_store.clear().await.into_diagnostic()?;
            println!("Schedule cleared.");
            return Ok(());
        }
        Command::Schedule(command) => command,
    };

    let mut tracker = Tracker::load(Box::new(KeyValueScheduleStore::new(kv_store)), clock)
        .await
        .into_diagnostic()?;

    let format = match command {
        ScheduleCommand::Setup {
            appointment_date,
            start,
            end,
        } => {
            tracker
                .setup(&appointment_date, start, end)
                .await
                .into_diagnostic()?;
            Format::Text
        }
        ScheduleCommand::Confirm { id } => {
            tracker.confirm_change(id).await.into_diagnostic()?;
            Format::Text
        }
        ScheduleCommand::Edit { id, date } => {
            tracker.edit_actual_date(id, &date).await.into_diagnostic()?;
            Format::Text
        }
        ScheduleCommand::Show { format } => format,
    };

    let Some(schedule) = tracker.schedule() else {
        println!("No schedule yet. Run `setup <APPOINTMENT_DATE> <START> <END>` first.");
        return Ok(());
    };

    let stdout = io::stdout();
    match format {
        Format::Text => {
            let mut out = stdout.lock();
            write!(out, "{}", ScheduleView::new(schedule, tracker.today())).into_diagnostic()?;
        }
        Format::Csv => {
            let mut writer = ScheduleWriter::new(stdout.lock());
            writer.write_schedule(schedule).into_diagnostic()?;
        }
    }

    Ok(())
}

fn open_store(cli: &Cli) -> Result<KeyValueStoreBox> {
    if let Some(db_path) = &cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        {
            let store = RocksDBStore::open(db_path).into_diagnostic()?;
            return Ok(Box::new(store));
        }

        #[cfg(not(feature = "storage-rocksdb"))]
        eprintln!(
            "WARNING: Persistent storage requested via --db-path ({}), but 'storage-rocksdb' feature is not enabled. Falling back to JSON file storage at {}.",
            db_path.display(),
            cli.store.display()
        );
    }

    Ok(Box::new(JsonFileStore::new(&cli.store)))
}
