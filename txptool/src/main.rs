use anyhow::{Context, Result as AnyhowResult};

mod export;
mod formats;
mod import;
mod info;


fn construct_app() -> clap::Command<'static> {
	clap::Command::new("txptool")
		.version(clap::crate_version!())
		.setting(clap::AppSettings::DeriveDisplayOrder)
		.arg(clap::arg!(loglevel: -L "Global log verbosity level")
			.ignore_case(true)
			.possible_values(["Error", "Warn", "Info", "Debug", "Trace"])
			.default_value("Info"))
		.subcommand(clap::Command::new("info")
			.about("List the entries of a TXP table")
			.arg(clap::arg!(brief: -b --brief "Do not prepend file name to output").takes_value(false))
			.arg(clap::arg!(decode: -d --decode "Decode every entry to check that its format is supported").takes_value(false))
			.arg(clap::arg!(offset: --offset <OFFSET> "Offset of the first entry record (decimal or 0x-prefixed hex)")
				.required(false)
				.default_value("0"))
			.arg(clap::arg!(count: --count <COUNT> "Number of entry records"))
			.arg(clap::arg!(table: <TABLE> "File containing the TXP table")))
		.subcommand(clap::Command::new("export")
			.about("Export every entry of a TXP table to PNG (or raw) files and XML sidecars")
			.arg(clap::arg!(raw: --raw "Write texture data as stored instead of decoding to PNG").takes_value(false))
			.arg(clap::arg!(offset: --offset <OFFSET> "Offset of the first entry record (decimal or 0x-prefixed hex)")
				.required(false)
				.default_value("0"))
			.arg(clap::arg!(count: --count <COUNT> "Number of entry records"))
			.arg(clap::arg!(table: <TABLE> "File containing the TXP table"))
			.arg(clap::arg!(outdir: <OUTDIR> "Output directory")))
		.subcommand(clap::Command::new("import")
			.about("Build a TXP table from exported sidecars")
			.arg(clap::arg!(base: --base <DIR> "Directory the sidecars' file paths are relative to")
				.required(false)
				.default_value("."))
			.arg(clap::arg!(output: <OUT> "TXP table output path"))
			.arg(clap::arg!(input: <XML> ... "Sidecar files, in table order")))
		.subcommand(clap::Command::new("formats")
			.about("List supported texture formats"))
}


/// Parse a decimal or `0x`-prefixed hexadecimal number.
pub(crate) fn parse_number(text: &str) -> AnyhowResult<u64> {
	let text = text.trim();

	let result = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
		Some(hex) => u64::from_str_radix(hex, 16),
		None => text.parse::<u64>(),
	};

	result.with_context(|| format!("Not a number: {text}"))
}


fn txptool() -> AnyhowResult<()> {
	let matches = construct_app().get_matches_from(wild::args());
	let loglevel_str = matches.value_of("loglevel")
		.unwrap_or("Info");
	let loglevel = loglevel_str
		.parse::<tracing::Level>()
		.with_context(|| format!("Failed to parse loglevel from -L{}", loglevel_str))?;

	tracing_subscriber::fmt()
		.with_max_level(loglevel)
		.init();

	tracing::trace!("Global loglevel set to {:?}", loglevel);

	match matches.subcommand() {
		Some(("info", matches)) => {
			info::command_info(matches)
		},

		Some(("export", matches)) => {
			export::command_export(matches)
		},

		Some(("import", matches)) => {
			import::command_import(matches)
		},

		Some(("formats", _)) => {
			formats::command_formats();
			Ok(())
		},

		Some((&_, _)) => unreachable!(),

		None => {
			let _ = construct_app().print_help();
			Ok(())
		},
	}
}


fn main() {
	if let Err(e) = txptool() {
		tracing::error!("{:?}", e);
		std::process::exit(1);
	};
}


#[test]
fn numbers() {
	assert_eq!(parse_number("0x1F").unwrap(), 31);
	assert_eq!(parse_number(" 42 ").unwrap(), 42);
	assert!(parse_number("0xZZ").is_err());
}
