//! CSV bar files: `timestamp,open,high,low,close,volume`, timestamps as
//! `YYYY-MM-DDTHH:MM:SS`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sessiontrend_core::Bar;
use tracing::debug;

pub fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open bar file {}", path.display()))?;
    let bars = reader
        .deserialize()
        .enumerate()
        .map(|(row, record)| {
            record.with_context(|| format!("{}: bad record at row {}", path.display(), row + 1))
        })
        .collect::<Result<Vec<Bar>>>()?;
    debug!(path = %path.display(), bars = bars.len(), "loaded bar file");
    Ok(bars)
}

pub fn write_bars(path: &Path, bars: &[Bar]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create bar file {}", path.display()))?;
    for bar in bars {
        writer.serialize(bar)?;
    }
    writer.flush()?;
    Ok(())
}

/// `<dir>/<SYMBOL>_slow.csv` and `<dir>/<SYMBOL>_fast.csv`.
pub fn symbol_paths(dir: &Path, symbol: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{symbol}_slow.csv")),
        dir.join(format!("{symbol}_fast.csv")),
    )
}

/// Load both resolutions for a symbol.
pub fn load_symbol(dir: &Path, symbol: &str) -> Result<(Vec<Bar>, Vec<Bar>)> {
    let (slow_path, fast_path) = symbol_paths(dir, symbol);
    Ok((load_bars(&slow_path)?, load_bars(&fast_path)?))
}
