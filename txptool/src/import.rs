use std::path::Path;

use gxm_txp::*;
use anyhow::{Context, Result as AnyhowResult};


pub fn command_import(matches: &clap::ArgMatches) -> AnyhowResult<()> {
	let output = matches.value_of("output").expect("OUT required");
	let base = Path::new(matches.value_of("base").unwrap_or("."));

	let entries = matches.values_of("input")
		.expect("XML required")
		.map(|sidecar| {
			TxpEntry::import(Path::new(sidecar), base)
				.with_context(|| format!("Could not import entry from {sidecar}"))
		})
		.collect::<AnyhowResult<Vec<TxpEntry>>>()?;

	let count = entries.len();
	let table = TxpTable { entries };
	let data = table.to_bytes().context("Could not serialize table")?;

	std::fs::write(output, &data).with_context(|| format!("Could not write file: {output}"))?;

	tracing::info!("Wrote {count} entries ({} bytes) to {output}", data.len());

	Ok(())
}
