//! Runs a handful of slow tasks behind a progress bar, with the bar's state
//! served on port 19999 while they run. Set `STEPBAR_METRICS_ADDR` to bind
//! elsewhere.

use color_eyre::Result;
use std::thread;
use std::time::Duration;
use stepbar::metrics::ExporterConfig;
use stepbar::progress::{Options, Theme};
use stepbar::{ProgressTask, StepBar};

fn compress(chunk: usize) -> std::io::Result<()> {
    thread::sleep(Duration::from_millis(150 + chunk as u64 * 20));
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    stepbar::logging::init("warn");

    let chunks = 12;
    let options = Options::new()
        .theme(Theme::ascii())
        .show_count()
        .show_rate()
        .rate_unit("chunks")
        .color_codes(true)
        .elapsed_on_finish()
        .on_completion(|| eprintln!("\nall chunks compressed"));

    let mut bar = StepBar::new()
        .total(chunks as i64)
        .options(options)
        .tasks((0..chunks).map(|chunk| {
            ProgressTask::new(move || compress(chunk)).named(format!("chunk-{chunk}"))
        }))
        .create()?;
    bar.describe("compressing")?;

    // The listener lives until the process exits.
    let _exporter = bar
        .exporter(ExporterConfig::from_env())?
        .spawn();

    bar.run()?;
    Ok(())
}
