use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::Parser;

use crate::screen::ScreenKind;

#[derive(Parser, Debug)]
#[command(name = "roomdesk", version, about = "Terminal admin console for hotel bookings")]
pub struct Args {
    /// Screen to open on start
    #[arg(short, long, value_enum)]
    pub screen: Option<ScreenKind>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial number of rows per page
    #[arg(short, long)]
    pub page_size: Option<NonZeroU32>,

    /// Jump back to page 1 whenever the page size changes
    #[arg(long)]
    pub reset_page_on_size_change: Option<bool>,

    /// JSON file used to seed the booking store
    #[arg(short, long)]
    pub fixtures: Option<PathBuf>,

    /// Simulated API latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,
}
