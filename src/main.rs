mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::NpdbDashboardApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Interactive dashboard over the NPDB public-use malpractice extract.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Dataset to load at startup (.csv, .parquet or .json). A file that
    /// fails to load aborts startup.
    #[arg(long, env = "NPDB_DATA")]
    data: Option<PathBuf>,

    /// Initial start year (defaults to the earliest year in the data).
    #[arg(long, requires = "data")]
    start: Option<i32>,

    /// Initial end year (defaults to the latest year in the data).
    #[arg(long, requires = "data")]
    end: Option<i32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::default();
    if let Some(path) = &cli.data {
        let dataset = npdb_dashboard::data::loader::load_file(path)
            .with_context(|| format!("loading dataset {}", path.display()))?;
        state.set_dataset(dataset);
        state.set_years(cli.start, cli.end);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NPDB – U.S. Medical Malpractice Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(NpdbDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn year_flags_need_a_dataset() {
        let err = Cli::try_parse_from(["npdb-dashboard", "--start", "2004"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(Cli::try_parse_from(["npdb-dashboard", "--end", "2010"]).is_err());
    }

    #[test]
    fn year_flags_apply_with_a_dataset() {
        let cli = Cli::try_parse_from(["npdb-dashboard", "--data", "npdb.csv", "--start", "2004"])
            .expect("parse");
        assert_eq!(cli.data, Some(PathBuf::from("npdb.csv")));
        assert_eq!((cli.start, cli.end), (Some(2004), None));
    }
}
