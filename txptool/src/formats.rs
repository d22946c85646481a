use gxm_txp::*;


pub fn command_formats() {
	let registry = FormatRegistry::global();

	for format in TextureFormat::ALL {
		if let Ok(entry) = registry.lookup(format.code()) {
			println!("{:#010X} {:<16} {:<9} {:?}", format.code(), format, entry.layout, entry.provider);
		};
	};
}
