use crate::{TxpResult, TxpError::*, ReadExt};
use crate::compose::compose;
use crate::descriptor::{TextureDescriptor, TextureType};
use crate::format::{FormatRegistry, TextureFormat};
use crate::macros::log;
use crate::palette::Palette;
use crate::sidecar::EntryMetadata;

use std::io::{Read, Seek, SeekFrom, Write, Cursor};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ByteOrder, ReadBytesExt};
use deku::prelude::*;
use encoding_rs::SHIFT_JIS;
use image::{ImageFormat, RgbaImage};
use static_assertions::const_assert;


/// Fixed on-disk entry record, all fields little-endian
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
#[repr(C)]
#[allow(missing_docs)]
pub struct EntryRecord {
	/// Absolute offset of the NUL-terminated Shift-JIS path.
	pub path_offset: i32,
	/// Texture data length; includes the 1 KiB palette when `palette_offset != 0`.
	pub texture_size: u32,
	pub palette_offset: u32,
	pub texture_offset: u32,
	pub format: u32,
	pub width: u16,
	pub height: u16,
	pub mip_level: u8,
	pub type_code: u8,
	pub unknown: u16,
	pub unknown2: u32,
}


impl EntryRecord {
	/// Serialized size of a record.
	pub const SIZE: usize = 32;
}


const_assert!(std::mem::size_of::<EntryRecord>() == EntryRecord::SIZE);


/// A texture entry of a TXP table, with its path, palette and data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxpEntry {
	/// Path of the texture inside the archive.
	pub internal_path: String,
	/// Path of the exported image or raw file, relative to the export
	/// directory, with `/` separators.
	pub file_path: String,
	/// Length of the texture data (without the palette).
	pub texture_size: u32,
	#[allow(missing_docs)]
	pub palette_offset: u32,
	#[allow(missing_docs)]
	pub texture_offset: u32,
	/// Raw GXM format code, see [`TextureFormat`].
	pub format: u32,
	#[allow(missing_docs)]
	pub width: u16,
	#[allow(missing_docs)]
	pub height: u16,
	#[allow(missing_docs)]
	pub mip_level: u8,
	/// `0` for linear, `2` for swizzled textures.
	pub type_code: u8,
	#[allow(missing_docs)]
	pub unknown: u16,
	#[allow(missing_docs)]
	pub unknown2: u32,
	/// CRC-32 of the Shift-JIS encoded `internal_path`, set on import.
	pub filename_hash: u32,
	/// Texture data as stored.
	pub raw_bytes: Vec<u8>,
	/// Palette words, present for entries with a palette.
	pub palette_words: Option<Vec<u32>>,
	#[allow(missing_docs)]
	pub file_index_a: i32,
	#[allow(missing_docs)]
	pub file_index_b: i32,
	/// The entry was exported as raw bytes rather than an image.
	pub is_raw: bool,
}


impl Default for TxpEntry {
	fn default() -> Self {
		Self {
			internal_path: String::new(),
			file_path: String::new(),
			texture_size: 0,
			palette_offset: 0,
			texture_offset: 0,
			format: TextureFormat::U8U8U8U8_ARGB.code(),
			width: 0,
			height: 0,
			mip_level: 0,
			type_code: 0,
			unknown: 0,
			unknown2: 0,
			filename_hash: 0,
			raw_bytes: vec![],
			palette_words: None,
			file_index_a: -1,
			file_index_b: -1,
			is_raw: false,
		}
	}
}


impl TxpEntry {
	/// Size in bytes of an on-disk palette.
	pub const PALETTE_SIZE: u32 = (Palette::ENTRIES * 4) as u32;


	/// Read an entry record at the current position of `input`, then its
	/// path string and palette.  On success the stream is left right after
	/// the record; texture data is not loaded (see
	/// [`read_texture_data`][Self::read_texture_data]).
	///
	/// # Errors
	/// - [`MalformedContainerRecord`]: the record, path or palette is truncated.
	/// - [`UnexpectedIoError`]: Unexpected read error.
	pub fn read_from<R: Read + Seek>(input: &mut R) -> TxpResult<Self> {
		let mut record_bytes = [0u8; EntryRecord::SIZE];
		input.read_exact(&mut record_bytes)?;
		let (_, record) = EntryRecord::from_bytes((&record_bytes, 0))
			.map_err(|_| MalformedContainerRecord)?;

		let resume = input.stream_position()?;
		let referenced = read_referenced(input, &record);
		input.seek(SeekFrom::Start(resume))?;
		let (internal_path, palette_words) = referenced?;

		let texture_size = match record.palette_offset {
			0 => record.texture_size,
			_ => record.texture_size.saturating_sub(Self::PALETTE_SIZE),
		};

		let entry = Self {
			internal_path,
			texture_size,
			palette_offset: record.palette_offset,
			texture_offset: record.texture_offset,
			format: record.format,
			width: record.width,
			height: record.height,
			mip_level: record.mip_level,
			type_code: record.type_code,
			unknown: record.unknown,
			unknown2: record.unknown2,
			palette_words,
			..Default::default()
		};

		log!(trace, "Read entry {:?}: format {:#010X}, {}x{}", entry.internal_path, entry.format, entry.width, entry.height);

		Ok(entry)
	}


	/// Wrap `input` with a [`Cursor`][std::io::Cursor] and
	/// [`read_from`][`Self::read_from`] it.
	///
	/// # Errors
	/// See [`read_from`][Self::read_from].
	pub fn from_bytes(input: &[u8]) -> TxpResult<Self> {
		let mut cursor = Cursor::new(input);
		Self::read_from(&mut cursor)
	}


	/// Load `texture_size` bytes at `texture_offset` into `raw_bytes`.  The
	/// stream position is restored afterwards.
	///
	/// # Errors
	/// - [`MalformedContainerRecord`]: the data is truncated.
	/// - [`UnexpectedIoError`]: Unexpected read or seek error.
	pub fn read_texture_data<R: Read + Seek>(&mut self, input: &mut R) -> TxpResult<()> {
		let resume = input.stream_position()?;
		input.seek(SeekFrom::Start(self.texture_offset.into()))?;
		let data = input.read_exact_buffered(usize::try_from(self.texture_size)?);
		input.seek(SeekFrom::Start(resume))?;
		self.raw_bytes = data?;
		Ok(())
	}


	/// Record for this entry with `path_offset`, `palette_offset` and
	/// `texture_offset` set to zero and `texture_size` set to the length of
	/// `raw_bytes`.  The table writer patches the offsets.
	///
	/// # Errors
	/// - [`UnexpectedTryFromIntError`]: `raw_bytes` is longer than [`u32::MAX`].
	pub fn to_record(&self) -> TxpResult<EntryRecord> {
		let record = EntryRecord {
			path_offset: 0,
			texture_size: u32::try_from(self.raw_bytes.len())?,
			palette_offset: 0,
			texture_offset: 0,
			format: self.format,
			width: self.width,
			height: self.height,
			mip_level: self.mip_level,
			type_code: self.type_code,
			unknown: self.unknown,
			unknown2: self.unknown2,
		};

		Ok(record)
	}


	/// Serialize [`to_record`][Self::to_record].
	///
	/// # Errors
	/// - [`UnexpectedTryFromIntError`]: `raw_bytes` is longer than [`u32::MAX`].
	/// - [`RecordSerializationError`]: record serialization failed.
	pub fn to_record_bytes(&self) -> TxpResult<Vec<u8>> {
		self.to_record()?
			.to_bytes()
			.map_err(|e| RecordSerializationError(e.to_string()))
	}


	/// Write [`to_record_bytes`][Self::to_record_bytes] to `output`.
	///
	/// # Errors
	/// - see [`to_record_bytes`][Self::to_record_bytes].
	/// - [`UnexpectedIoError`]: Unexpected write error.
	pub fn write<W: Write>(&self, output: &mut W) -> TxpResult<()> {
		output.write_all(&self.to_record_bytes()?)?;
		Ok(())
	}


	/// Describe the texture for the unpack providers and the composer.
	///
	/// # Errors
	/// - [`UnsupportedFormat`]: unknown format code.
	/// - [`UnsupportedTextureType`]: type code is neither 0 nor 2.
	/// - [`DimensionsTooLarge`]: rounded dimensions overflow a [`u16`].
	pub fn descriptor(&self) -> TxpResult<TextureDescriptor> {
		let format = TextureFormat::from_code(self.format)?;
		let texture_type = TextureType::from_entry_code(self.type_code)?;
		let mut descriptor = TextureDescriptor::new(format, texture_type, self.width, self.height, self.texture_size)?;

		if self.palette_words.is_some() {
			descriptor.palette_index = 0;
		};

		Ok(descriptor)
	}


	/// Decode `raw_bytes` into an image of `width x height`.
	///
	/// # Errors
	/// - see [`descriptor`][Self::descriptor].
	/// - [`MalformedContainerRecord`]: `raw_bytes` is shorter than `texture_size`.
	/// - [`BlockDecodeError`]: a block decoder failed.
	pub fn decode_image(&self) -> TxpResult<RgbaImage> {
		let entry = FormatRegistry::global().lookup(self.format)?;
		let descriptor = self.descriptor()?;
		let decoded = entry.provider.unpack(&mut Cursor::new(&self.raw_bytes), &descriptor)?;

		let palette = match &self.palette_words {
			Some(words) if entry.format.is_indexed() => Some(Palette::resolve(words, self.format)?),
			_ => None,
		};

		Ok(compose(&decoded, entry.layout, &descriptor, palette.as_ref()))
	}


	/// Encode an image as the B, G, R, A bytes of a linear
	/// [`U8U8U8U8_ARGB`][TextureFormat::U8U8U8U8_ARGB] texture.
	///
	/// # Example
	/// ```
	/// # use gxm_txp::TxpEntry;
	/// let image = image::RgbaImage::from_raw(1, 1, vec![1, 2, 3, 4]).unwrap();
	/// assert_eq!(TxpEntry::encode_image(&image), vec![3, 2, 1, 4]);
	/// ```
	pub fn encode_image(image: &RgbaImage) -> Vec<u8> {
		image.pixels()
			.flat_map(|p| [p.0[2], p.0[1], p.0[0], p.0[3]])
			.collect()
	}


	/// Export the entry below `output_dir`: an XML sidecar plus either a PNG
	/// or the raw texture bytes, both named after `internal_path`.  Sets
	/// `file_path` and `is_raw`, and returns the sidecar path.
	///
	/// # Errors
	/// - see [`decode_image`][Self::decode_image] (not raw).
	/// - [`ImageError`]: PNG encoding or writing failed.
	/// - [`MetadataError`]: sidecar serialization failed.
	/// - [`UnexpectedIoError`]: a directory or file could not be written.
	pub fn export(&mut self, output_dir: &Path, raw: bool) -> TxpResult<PathBuf> {
		let (dir_components, stem) = split_internal_path(&self.internal_path);
		let extension = if raw { "raw" } else { "png" };

		let image = if raw { None } else { Some(self.decode_image()?) };

		let target_dir = dir_components.iter().fold(output_dir.to_path_buf(), |p, c| p.join(c));
		std::fs::create_dir_all(&target_dir)?;

		let file_name = format!("{}.{}", stem, extension);
		self.file_path = dir_components
			.iter()
			.chain(std::iter::once(&file_name))
			.map(String::as_str)
			.collect::<Vec<&str>>()
			.join("/");
		self.is_raw = raw;

		let data_path = target_dir.join(&file_name);
		match image {
			Some(image) => image.save_with_format(&data_path, ImageFormat::Png)
				.map_err(|e| ImageError(e.to_string()))?,
			None => std::fs::write(&data_path, &self.raw_bytes)?,
		};

		// Sidecar only after the data file is in place.
		let sidecar_path = target_dir.join(format!("{}.xml", stem));
		EntryMetadata::from(&*self).write_to_path(&sidecar_path)?;

		log!(debug, "Exported {:?} to {}", self.internal_path, data_path.display());

		Ok(sidecar_path)
	}


	/// Build an entry from a sidecar written by [`export`][Self::export].
	/// `file_path` is resolved against `base_dir`.  Image files become
	/// linear `U8U8U8U8_ARGB` textures; raw files are loaded unchanged.
	///
	/// # Errors
	/// - [`MetadataError`]: the sidecar could not be parsed.
	/// - [`ImageError`]: the image could not be loaded.
	/// - [`DimensionsTooLarge`]: the image is larger than 65535 pixels in either dimension.
	/// - [`UnencodablePath`]: `internal_path` cannot be encoded as Shift-JIS.
	/// - [`UnexpectedIoError`]: a file could not be read.
	pub fn import(sidecar_path: &Path, base_dir: &Path) -> TxpResult<Self> {
		let mut entry = EntryMetadata::read_from_path(sidecar_path)?.into_entry();

		let data_path = entry.file_path
			.split(['/', '\\'])
			.filter(|c| !c.is_empty() && *c != "." && *c != "..")
			.fold(base_dir.to_path_buf(), |p, c| p.join(c));

		if entry.is_raw {
			entry.raw_bytes = std::fs::read(&data_path)?;
		}
		else {
			let image = image::open(&data_path)
				.map_err(|e| ImageError(e.to_string()))?
				.into_rgba8();

			entry.width = u16::try_from(image.width()).map_err(|_| DimensionsTooLarge)?;
			entry.height = u16::try_from(image.height()).map_err(|_| DimensionsTooLarge)?;
			entry.format = TextureFormat::U8U8U8U8_ARGB.code();
			entry.type_code = 0;
			entry.raw_bytes = Self::encode_image(&image);
		};

		entry.texture_size = u32::try_from(entry.raw_bytes.len())?;
		entry.filename_hash = path_hash(&entry.internal_path)?;

		log!(debug, "Imported {:?} from {}", entry.internal_path, data_path.display());

		Ok(entry)
	}
}


/// CRC-32 of the Shift-JIS encoding of `path`.
///
/// # Errors
/// - [`UnencodablePath`]: `path` contains characters Shift-JIS cannot represent.
///
/// # Example
/// ```
/// # use gxm_txp::path_hash;
/// assert_eq!(path_hash("a").unwrap(), 0xE8B7BE43);
/// ```
pub fn path_hash(path: &str) -> TxpResult<u32> {
	Ok(crc32fast::hash(&encode_shift_jis(path)?))
}


pub(crate) fn encode_shift_jis(text: &str) -> TxpResult<Vec<u8>> {
	let (bytes, _, had_errors) = SHIFT_JIS.encode(text);

	if had_errors {
		return Err(UnencodablePath(text.to_owned()));
	};

	Ok(bytes.into_owned())
}


pub(crate) fn decode_shift_jis(bytes: &[u8]) -> String {
	let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(bytes);

	if had_errors {
		log!(warn, "Entry path {:?} is not valid Shift-JIS", bstr::BStr::new(bytes));
	};

	text.into_owned()
}


fn read_referenced<R: Read + Seek>(input: &mut R, record: &EntryRecord) -> TxpResult<(String, Option<Vec<u32>>)> {
	let path_offset = u64::try_from(record.path_offset).map_err(|_| MalformedContainerRecord)?;
	input.seek(SeekFrom::Start(path_offset))?;

	let mut path_bytes = Vec::with_capacity(64);
	loop {
		match input.read_u8()? {
			0 => break,
			b => path_bytes.push(b),
		};
	};

	let palette_words = match record.palette_offset {
		0 => None,
		offset => {
			input.seek(SeekFrom::Start(offset.into()))?;
			let data = input.read_exact_buffered(TxpEntry::PALETTE_SIZE as usize)?;
			let mut words = vec![0u32; Palette::ENTRIES];
			LittleEndian::read_u32_into(&data, &mut words);
			Some(words)
		},
	};

	Ok((decode_shift_jis(&path_bytes), palette_words))
}


// Directory components and file stem of an internal path.  Only normal
// components are kept so the result stays below the export directory.
fn split_internal_path(internal_path: &str) -> (Vec<String>, String) {
	let mut components: Vec<String> = internal_path
		.split(['/', '\\'])
		.filter(|c| !c.is_empty() && *c != "." && *c != "..")
		.map(String::from)
		.collect();

	let file_name = components.pop().unwrap_or_default();
	let stem = match file_name.rfind('.') {
		Some(i) if i > 0 => &file_name[..i],
		_ => file_name.as_str(),
	};

	let stem = if stem.is_empty() { "unnamed".to_owned() } else { stem.to_owned() };

	(components, stem)
}


#[cfg(test)]
fn sample_table(path: &[u8], palette: Option<&[u32]>, data: &[u8]) -> Vec<u8> {
	let path_offset = EntryRecord::SIZE;
	let palette_offset = path_offset + path.len() + 1;
	let texture_offset = palette_offset + if palette.is_some() { 1024 } else { 0 };

	let record = EntryRecord {
		path_offset: path_offset as i32,
		texture_size: (data.len() + if palette.is_some() { 1024 } else { 0 }) as u32,
		palette_offset: if palette.is_some() { palette_offset as u32 } else { 0 },
		texture_offset: texture_offset as u32,
		format: if palette.is_some() { TextureFormat::P8_ARGB.code() } else { TextureFormat::U8U8U8U8_ARGB.code() },
		width: 2,
		height: 1,
		mip_level: 1,
		type_code: 0,
		unknown: 0x1234,
		unknown2: 0xDEAD_BEEF,
	};

	let mut bytes = record.to_bytes().unwrap();
	bytes.extend(path);
	bytes.push(0);

	if let Some(words) = palette {
		let mut block = vec![0u8; 1024];
		LittleEndian::write_u32_into(words, &mut block[..words.len() * 4]);
		bytes.extend(block);
	};

	bytes.extend(data);
	bytes
}


#[test]
fn read_entry_with_shift_jis_path() {
	let (path, _, _) = SHIFT_JIS.encode("テクスチャ/bg.png");
	let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
	let bytes = sample_table(&path, None, &data);

	let mut input = Cursor::new(&bytes[..]);
	let mut entry = TxpEntry::read_from(&mut input).unwrap();
	assert_eq!(input.position(), EntryRecord::SIZE as u64);
	assert_eq!(entry.internal_path, "テクスチャ/bg.png");
	assert_eq!(entry.texture_size, 8);
	assert_eq!(entry.unknown, 0x1234);
	assert_eq!(entry.unknown2, 0xDEAD_BEEF);
	assert_eq!(entry.palette_words, None);

	entry.read_texture_data(&mut input).unwrap();
	assert_eq!(entry.raw_bytes, data);
	assert_eq!(input.position(), EntryRecord::SIZE as u64);
}


#[test]
fn read_entry_with_palette() {
	let data = [1u8, 0];
	let bytes = sample_table(b"p.png", Some(&[0xFF11_2233, 0xFF44_5566]), &data);

	let mut input = Cursor::new(&bytes[..]);
	let mut entry = TxpEntry::read_from(&mut input).unwrap();
	assert_eq!(entry.texture_size, 2);

	let words = entry.palette_words.as_ref().unwrap();
	assert_eq!(words.len(), 256);
	assert_eq!(&words[..3], &[0xFF11_2233, 0xFF44_5566, 0]);

	entry.read_texture_data(&mut input).unwrap();
	let image = entry.decode_image().unwrap();
	assert_eq!(image.get_pixel(0, 0).0, [0x66, 0x55, 0x44, 0xFF]);
	assert_eq!(image.get_pixel(1, 0).0, [0x33, 0x22, 0x11, 0xFF]);
}


#[test]
fn truncated_record() {
	assert!(matches!(TxpEntry::from_bytes(&[0u8; 20]), Err(MalformedContainerRecord)));

	let mut bytes = sample_table(b"a.png", None, &[0u8; 8]);
	bytes.truncate(EntryRecord::SIZE + 2);
	assert!(matches!(TxpEntry::from_bytes(&bytes), Err(MalformedContainerRecord)));
}


#[test]
fn record_bytes_zero_offsets() {
	let bytes = sample_table(b"a.png", None, &[9u8; 8]);
	let mut input = Cursor::new(&bytes[..]);
	let mut entry = TxpEntry::read_from(&mut input).unwrap();
	entry.read_texture_data(&mut input).unwrap();

	let mut written = vec![];
	entry.write(&mut written).unwrap();
	assert_eq!(written.len(), EntryRecord::SIZE);

	let (_, record) = EntryRecord::from_bytes((&written[..], 0)).unwrap();
	assert_eq!(record.path_offset, 0);
	assert_eq!(record.palette_offset, 0);
	assert_eq!(record.texture_offset, 0);
	assert_eq!(record.texture_size, 8);
	assert_eq!(record.format, entry.format);
	assert_eq!(record.unknown2, 0xDEAD_BEEF);
}


#[test]
fn bgra_round_trip() {
	let image = RgbaImage::from_fn(3, 2, |x, y| image::Rgba([x as u8 * 80, y as u8 * 100, 7, 200 + x as u8]));
	let raw_bytes = TxpEntry::encode_image(&image);

	let entry = TxpEntry {
		texture_size: raw_bytes.len() as u32,
		width: 3,
		height: 2,
		raw_bytes,
		..Default::default()
	};

	assert_eq!(entry.decode_image().unwrap(), image);
}


#[test]
fn unknown_type_code() {
	let entry = TxpEntry { type_code: 1, width: 1, height: 1, texture_size: 4, raw_bytes: vec![0; 4], ..Default::default() };
	assert!(matches!(entry.decode_image(), Err(UnsupportedTextureType(1))));
}


#[test]
fn internal_path_split() {
	assert_eq!(split_internal_path("dir/sub\\tex.png"), (vec!["dir".to_owned(), "sub".to_owned()], "tex".to_owned()));
	assert_eq!(split_internal_path("../../x.tar.gz"), (vec![], "x.tar".to_owned()));
	assert_eq!(split_internal_path(".hidden"), (vec![], ".hidden".to_owned()));
	assert_eq!(split_internal_path(""), (vec![], "unnamed".to_owned()));
}


#[test]
fn export_import_round_trip() {
	let dir = tempfile::tempdir().unwrap();

	let image = RgbaImage::from_fn(2, 2, |x, y| image::Rgba([x as u8, y as u8, 0x80, 0xFF]));
	let raw_bytes = TxpEntry::encode_image(&image);
	let mut entry = TxpEntry {
		internal_path: "ui/icons/star.png".to_owned(),
		texture_size: raw_bytes.len() as u32,
		width: 2,
		height: 2,
		unknown: 5,
		file_index_a: 3,
		raw_bytes,
		..Default::default()
	};

	let sidecar = entry.export(dir.path(), false).unwrap();
	assert_eq!(sidecar, dir.path().join("ui").join("icons").join("star.xml"));
	assert_eq!(entry.file_path, "ui/icons/star.png");
	assert!(dir.path().join("ui/icons/star.png").exists());

	let imported = TxpEntry::import(&sidecar, dir.path()).unwrap();
	assert_eq!(imported.internal_path, entry.internal_path);
	assert_eq!(imported.raw_bytes, entry.raw_bytes);
	assert_eq!(imported.unknown, 5);
	assert_eq!(imported.file_index_a, 3);
	assert_eq!(imported.file_index_b, -1);
	assert_eq!(imported.filename_hash, path_hash("ui/icons/star.png").unwrap());
}


#[test]
fn raw_export_import_round_trip() {
	let dir = tempfile::tempdir().unwrap();

	let mut entry = TxpEntry {
		internal_path: "fonts/font.gxt".to_owned(),
		format: TextureFormat::P4_ABGR.code(),
		type_code: 2,
		width: 4,
		height: 4,
		texture_size: 8,
		raw_bytes: (0..8).collect(),
		..Default::default()
	};

	let sidecar = entry.export(dir.path(), true).unwrap();
	assert_eq!(entry.file_path, "fonts/font.raw");

	let imported = TxpEntry::import(&sidecar, dir.path()).unwrap();
	assert!(imported.is_raw);
	assert_eq!(imported.format, TextureFormat::P4_ABGR.code());
	assert_eq!(imported.type_code, 2);
	assert_eq!(imported.raw_bytes, entry.raw_bytes);
	assert_eq!(imported.texture_size, 8);
}


#[test]
fn failed_data_write_leaves_no_sidecar() {
	let dir = tempfile::tempdir().unwrap();

	// A directory where the raw file should go makes the write fail.
	std::fs::create_dir_all(dir.path().join("fonts").join("font.raw")).unwrap();

	let mut entry = TxpEntry {
		internal_path: "fonts/font.gxt".to_owned(),
		texture_size: 4,
		raw_bytes: vec![1, 2, 3, 4],
		..Default::default()
	};

	assert!(entry.export(dir.path(), true).is_err());
	assert!(!dir.path().join("fonts").join("font.xml").exists());
}


#[test]
fn unencodable_path() {
	assert!(matches!(path_hash("\u{1F600}"), Err(UnencodablePath(_))));
}
