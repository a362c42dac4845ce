use std::{io::Write, slice};

use anyhow::{Context, Result};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cli::{Cli, OutputFormat};
use crate::io::{open_input, read_input, read_points, write_csv, write_geojson, PointReader, Sink};
use crate::jitter::{JitterConfig, JitterEngine};

pub fn run(cli: &Cli) -> Result<()> {
    let source = cli.input.as_deref().map_or("stdin".into(), |p| p.display().to_string());

    let config = JitterConfig {
        warn_after: (cli.warn_after > 0).then_some(cli.warn_after),
        ..JitterConfig::default()
    };
    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };
    let mut engine = JitterEngine::with_config(rng, config);

    // Opened first so an existing output is refused before any input is consumed.
    let mut sink = Sink::open(cli.output.as_deref(), cli.force)?;
    match cli.format {
        OutputFormat::Csv => {
            // One record in, one record out; stdout sees each row as soon as it is placed.
            for point in PointReader::new(open_input(cli.input.as_deref())?, cli.delimiter) {
                let out = engine.jitter(&point?);
                write_csv(slice::from_ref(&out), cli.delimiter, &mut sink)?;
                if sink.is_stdout() { sink.flush().context("[jitter] Failed to flush stdout")? }
            }
        }
        OutputFormat::Geojson => {
            let points = read_points(&read_input(cli.input.as_deref())?, cli.delimiter)?;
            write_geojson(&engine.jitter_all(&points), &mut sink)?;
        }
    }
    sink.finish()?;

    let stats = engine.stats();
    info!(
        "[jitter] {} records from {}, {} moved, {} samples (worst {})",
        stats.records, source, stats.jittered, stats.total_attempts, stats.max_attempts,
    );
    if let Some(out) = &cli.output {
        info!("[jitter] wrote {} records to {}", stats.records, out.display());
    }
    Ok(())
}
