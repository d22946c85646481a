use std::io::{BufReader, Seek, SeekFrom};

use gxm_txp::*;
use anyhow::{Context, Result as AnyhowResult};

use crate::parse_number;


pub fn command_info(matches: &clap::ArgMatches) -> AnyhowResult<()> {
	let brief = matches.is_present("brief");
	let decode = matches.is_present("decode");
	let path = matches.value_of("table").expect("TABLE required");
	let offset = parse_number(matches.value_of("offset").unwrap_or("0"))?;
	let count = usize::try_from(parse_number(matches.value_of("count").expect("COUNT required"))?)?;

	let brief_prefix = if brief {
		"".to_string()
	}
	else {
		format!("{}: ", path)
	};

	let file = std::fs::File::open(path).with_context(|| format!("Could not open file: {path}"))?;
	let filesize = file.metadata().with_context(|| format!("Could not read metadata to determine size: {path}"))?.len();
	let mut input = BufReader::new(file);

	println!("{brief_prefix}File size: {filesize} (0x{filesize:X})");

	input.seek(SeekFrom::Start(offset)).with_context(|| format!("Could not seek to 0x{offset:X}: {path}"))?;

	let mut failures = 0usize;

	for index in 0..count {
		let mut entry = TxpEntry::read_from(&mut input)
			.with_context(|| format!("Could not read entry #{index}: {path}"))?;

		let format = TextureFormat::from_code(entry.format)
			.map(|f| f.to_string())
			.unwrap_or_else(|_| format!("{:#010X}", entry.format));
		let texture_type = TextureType::from_entry_code(entry.type_code)
			.map(|t| t.to_string())
			.unwrap_or_else(|_| format!("type {}", entry.type_code));
		let palette = if entry.palette_words.is_some() { ", palette" } else { "" };

		println!("{brief_prefix}Entry #{index} {:?}: {format}, {}x{} [{texture_type}], mip={}, data={}@0x{:X}{palette}",
			entry.internal_path,
			entry.width,
			entry.height,
			entry.mip_level,
			entry.texture_size,
			entry.texture_offset);

		if decode {
			let decoded = entry.read_texture_data(&mut input)
				.and_then(|_| entry.decode_image());

			if let Err(e) = decoded {
				failures += 1;
				println!("{brief_prefix}Entry #{index} ERROR {e}");
			};
		};
	};

	if failures > 0 {
		anyhow::bail!("{failures} of {count} entries could not be decoded");
	};

	Ok(())
}
