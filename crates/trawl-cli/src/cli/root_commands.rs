use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up the first log id at or after a date-time (UTC)
    #[command(name = "first-id")]
    FirstId {
        /// yyyy-MM-dd, "yyyy-MM-dd HH:mm" or "yyyy-MM-dd HH:mm:ss"
        datetime: String,
    },

    /// Ingest logs starting at a log id (defaults to the newest stored log)
    Ingest {
        /// Numeric log id to start from
        log_id: Option<String>,
    },
}
