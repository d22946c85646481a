use crate::{TxpResult, TxpError::*};
use crate::entry::{EntryRecord, TxpEntry, encode_shift_jis};
use crate::macros::log;

use std::io::{Read, Seek, SeekFrom, Cursor};

use deku::prelude::*;
use surety::Ensure;


/// Consecutive entry records together with the strings and texture data
/// they point at
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TxpTable {
	#[allow(missing_docs)]
	pub entries: Vec<TxpEntry>,
}


impl TxpTable {
	/// Read `count` records starting at `offset` and load every entry's
	/// texture data.
	///
	/// # Errors
	/// - see [`TxpEntry::read_from`] and [`TxpEntry::read_texture_data`].
	pub fn read_from<R: Read + Seek>(input: &mut R, offset: u64, count: usize) -> TxpResult<Self> {
		input.seek(SeekFrom::Start(offset))?;

		let mut entries = Vec::with_capacity(std::cmp::min(count, 4096));
		for _ in 0..count {
			entries.push(TxpEntry::read_from(input)?);
		};

		for entry in &mut entries {
			entry.read_texture_data(input)?;
		};

		log!(debug, "Read {} entries at offset {:#X}", entries.len(), offset);

		Ok(Self { entries })
	}


	/// Wrap `input` with a [`Cursor`][std::io::Cursor] and
	/// [`read_from`][`Self::read_from`] it.
	///
	/// # Errors
	/// See [`read_from`][Self::read_from].
	pub fn from_bytes(input: &[u8], offset: u64, count: usize) -> TxpResult<Self> {
		let mut cursor = Cursor::new(input);
		Self::read_from(&mut cursor, offset, count)
	}


	/// Lay the table out as `records | path strings | texture data`, with
	/// offsets relative to the start of the returned buffer.  Palettes are
	/// not written.
	///
	/// # Errors
	/// - [`UnencodablePath`]: an entry path cannot be encoded as Shift-JIS.
	/// - [`ArithmeticOverflow`]: an offset overflows its record field.
	/// - [`RecordSerializationError`]: record serialization failed.
	///
	/// # Example
	/// ```
	/// # use gxm_txp::{TxpEntry, TxpTable};
	/// let entry = TxpEntry {
	///     internal_path: "a.png".to_owned(),
	///     width: 1,
	///     height: 1,
	///     texture_size: 4,
	///     raw_bytes: vec![1, 2, 3, 4],
	///     ..Default::default()
	/// };
	/// let table = TxpTable { entries: vec![entry] };
	/// let bytes = table.to_bytes().unwrap();
	/// let read = TxpTable::from_bytes(&bytes, 0, 1).unwrap();
	/// assert_eq!(read.entries[0].internal_path, "a.png");
	/// assert_eq!(read.entries[0].raw_bytes, vec![1, 2, 3, 4]);
	/// ```
	pub fn to_bytes(&self) -> TxpResult<Vec<u8>> {
		let paths = self.entries
			.iter()
			.map(|e| encode_shift_jis(&e.internal_path))
			.collect::<TxpResult<Vec<Vec<u8>>>>()?;

		let records_len = (self.entries.len().checked() * EntryRecord::SIZE).ok_or(ArithmeticOverflow)?;
		let strings_len = paths.iter()
			.fold(0usize.checked(), |acc, p| acc + p.len() + 1)
			.ok_or(ArithmeticOverflow)?;

		let mut records: Vec<u8> = Vec::with_capacity(records_len);
		let mut strings: Vec<u8> = Vec::with_capacity(strings_len);
		let mut data: Vec<u8> = vec![];

		for (entry, path) in self.entries.iter().zip(&paths) {
			let path_offset = (records_len.checked() + strings.len()).ok_or(ArithmeticOverflow)?;
			let texture_offset = (records_len.checked() + strings_len + data.len()).ok_or(ArithmeticOverflow)?;

			let record = EntryRecord {
				path_offset: i32::try_from(path_offset).map_err(|_| ArithmeticOverflow)?,
				texture_offset: u32::try_from(texture_offset).map_err(|_| ArithmeticOverflow)?,
				..entry.to_record()?
			};

			records.extend(record.to_bytes().map_err(|e| RecordSerializationError(e.to_string()))?);
			strings.extend(path);
			strings.push(0);
			data.extend(&entry.raw_bytes);
		};

		let mut result = records;
		result.extend(strings);
		result.extend(data);

		Ok(result)
	}
}


#[test]
fn table_round_trip() {
	let entries = vec![
		TxpEntry {
			internal_path: "キャラ/face.png".to_owned(),
			format: crate::TextureFormat::P4_1BGR.code(),
			type_code: 2,
			width: 4,
			height: 4,
			mip_level: 1,
			unknown: 3,
			unknown2: 0x0102_0304,
			texture_size: 8,
			raw_bytes: (0..8).collect(),
			..Default::default()
		},
		TxpEntry {
			internal_path: "bg.png".to_owned(),
			width: 2,
			height: 2,
			texture_size: 16,
			raw_bytes: vec![0xAB; 16],
			..Default::default()
		},
	];

	let table = TxpTable { entries };
	let bytes = table.to_bytes().unwrap();

	let mut input = Cursor::new(&bytes[..]);
	let read = TxpTable::read_from(&mut input, 0, 2).unwrap();
	assert_eq!(input.position(), 2 * EntryRecord::SIZE as u64);

	for (original, read) in table.entries.iter().zip(&read.entries) {
		assert_eq!(read.internal_path, original.internal_path);
		assert_eq!(read.format, original.format);
		assert_eq!(read.type_code, original.type_code);
		assert_eq!((read.width, read.height), (original.width, original.height));
		assert_eq!(read.mip_level, original.mip_level);
		assert_eq!((read.unknown, read.unknown2), (original.unknown, original.unknown2));
		assert_eq!(read.texture_size, original.texture_size);
		assert_eq!(read.raw_bytes, original.raw_bytes);
		assert_eq!(read.palette_words, None);
	};

	assert_eq!(read.entries[1].texture_offset as usize, bytes.len() - 16);
}

