use clap::Parser;
use std::path::PathBuf;

use crate::models::Query;

#[derive(Parser, Debug)]
#[command(name = "enzona-watcher")]
#[command(about = "megacaribehabautopista.enzona.net crawler")]
#[command(version)]
pub struct Cli {
    /// Product name to look for (case-insensitive substring)
    pub product: String,

    /// Catalog path appended to the target base URL
    #[arg(long, default_value = "")]
    pub endpoint: String,

    /// Comma separated keywords that discard a product, e.g. 'entero,parranda,rojo'.
    /// Empty segments (as in 'rojo,') are ignored rather than excluding everything.
    #[arg(long)]
    pub exclude: Option<String>,

    /// Do not send the ntfy notification
    #[arg(long)]
    pub no_notify: bool,

    /// Config file (defaults to config/watcher.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Debug logging on the console
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn query(&self) -> Query {
        Query::new(
            &self.product,
            &self.endpoint,
            self.exclude.as_deref(),
            !self.no_notify,
        )
    }
}
