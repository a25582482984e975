//! Replay host entry point.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(script) = args.next().map(PathBuf::from) else {
        eprintln!("usage: slateboard-replay <script.json> [output-dir]");
        return ExitCode::from(2);
    };
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    log::info!("Starting Slateboard replay");
    match slateboard_app::run(&script, &output_dir) {
        Ok(summary) => {
            log::info!(
                "Replayed {} events: {} elements, {} renders, {} saves",
                summary.events,
                summary.elements,
                summary.renders,
                summary.saves
            );
            if let Some(extent) = summary.extent {
                log::info!(
                    "Drawing extent: ({}, {}) - ({}, {})",
                    extent.x0,
                    extent.y0,
                    extent.x1,
                    extent.y1
                );
            }
            for (tool, count) in &summary.per_tool {
                log::debug!("  {}: {}", tool.name(), count);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
