use clap::{Parser, Subcommand};

/// Command-line interface definition for workhours
#[derive(Parser)]
#[command(
    name = "workhours",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track clock-in/clock-out entries and see hours and earnings per half-month pay cycle",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use instead of $EDITOR")]
        editor: Option<String>,
    },

    /// Create a local user and log in
    Register {
        username: String,

        #[arg(long, short = 'p')]
        password: String,

        /// Stay logged in across terminal sessions
        #[arg(long)]
        remember: bool,
    },

    /// Log in as an existing user
    Login {
        username: String,

        #[arg(long, short = 'p')]
        password: String,

        /// Stay logged in across terminal sessions
        #[arg(long)]
        remember: bool,
    },

    /// Log out and forget the remembered user
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show or edit pay settings
    Settings {
        /// Hourly rate
        #[arg(long = "rate")]
        rate: Option<f64>,

        /// Daily working hours (recomputes the cycle target)
        #[arg(long = "daily-hours")]
        daily_hours: Option<f64>,

        /// Working days per cycle (recomputes the cycle target)
        #[arg(long = "working-days")]
        working_days: Option<u32>,

        /// Override the target hours per cycle
        #[arg(long = "target")]
        target: Option<f64>,
    },

    /// Add a clock-in/clock-out entry
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Clock-in time (HH:MM)
        #[arg(long = "in")]
        clock_in: Option<String>,

        /// Clock-out time (HH:MM)
        #[arg(long = "out")]
        clock_out: Option<String>,
    },

    /// Delete an entry by id
    Del {
        /// Entry id as shown by `list`
        id: i64,

        /// Delete without asking for confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List entries, newest first
    List,

    /// Show hours, remaining hours and earnings for the current pay cycle
    Cycle {
        /// Compute for another day instead of today (YYYY-MM-DD)
        #[arg(long = "today")]
        today: Option<String>,
    },

    /// Chart hours and earnings for the most recent half-month periods
    Chart,
}
