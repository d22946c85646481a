use std::io::BufReader;
use std::path::{Path, PathBuf};

use gxm_txp::*;
use anyhow::{Context, Result as AnyhowResult};
use rayon::prelude::*;
use tap::prelude::*;

use crate::parse_number;


pub fn command_export(matches: &clap::ArgMatches) -> AnyhowResult<()> {
	let raw = matches.is_present("raw");
	let path = matches.value_of("table").expect("TABLE required");
	let offset = parse_number(matches.value_of("offset").unwrap_or("0"))?;
	let count = usize::try_from(parse_number(matches.value_of("count").expect("COUNT required"))?)?;
	let out_dir = PathBuf::from(matches.value_of("outdir").expect("OUTDIR required"));

	let file = std::fs::File::open(path).with_context(|| format!("Could not open file: {path}"))?;
	let table = TxpTable::read_from(&mut BufReader::new(file), offset, count)
		.with_context(|| format!("Could not read {count} entries at 0x{offset:X}: {path}"))?;

	std::fs::create_dir_all(&out_dir)
		.with_context(|| format!("Could not create output directory: {}", out_dir.display()))?;

	let failures = table.entries
		.into_par_iter()
		.enumerate()
		.map(|(index, mut entry)| export_entry(index, &mut entry, &out_dir, raw))
		.filter(Result::is_err)
		.count();

	if failures > 0 {
		anyhow::bail!("{failures} of {count} entries failed to export");
	};

	tracing::info!("Exported {count} entries to {}", out_dir.display());

	Ok(())
}


fn export_entry(index: usize, entry: &mut TxpEntry, out_dir: &Path, raw: bool) -> AnyhowResult<PathBuf> {
	entry.export(out_dir, raw)
		.with_context(|| format!("Could not export entry #{index} {:?}", entry.internal_path))
		.tap_ok(|sidecar| tracing::debug!("Entry #{index}: {}", sidecar.display()))
		.tap_err(|e| tracing::error!("{:?}", e))
}
