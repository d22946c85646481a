#![no_main]
use libfuzzer_sys::fuzz_target;

use std::io::Cursor;

use gxm_txp::TxpEntry;

fuzz_target!(|data: &[u8]| {
	let mut cursor = Cursor::new(data);

	if let Ok(mut entry) = TxpEntry::read_from(&mut cursor) {
		// Keep images small to avoid slow-unit fuzz artifacts.
		let small = entry.width <= 512 && entry.height <= 512;

		if small && entry.read_texture_data(&mut cursor).is_ok() {
			let _ = entry.decode_image();
		};

		let _ = entry.to_record_bytes();
	};
});
