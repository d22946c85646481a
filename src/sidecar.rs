use crate::{TxpResult, TxpError::*};
use crate::entry::TxpEntry;

use std::path::Path;

use serde::{Deserialize, Serialize};


const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";


/// Entry metadata stored next to an exported texture
///
/// Everything needed to rebuild the entry record except the texture data
/// itself, which lives in the file named by `file_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "Entry")]
#[allow(missing_docs)]
pub struct EntryMetadata {
	#[serde(rename = "InternalFilePath", default)]
	pub internal_path: String,
	#[serde(rename = "RealFilePath", default)]
	pub file_path: String,
	#[serde(rename = "Format")]
	pub format: u32,
	#[serde(rename = "Width")]
	pub width: u16,
	#[serde(rename = "Height")]
	pub height: u16,
	#[serde(rename = "MipLevel")]
	pub mip_level: u8,
	#[serde(rename = "Type")]
	pub type_code: u8,
	#[serde(rename = "Unknown")]
	pub unknown: u16,
	#[serde(rename = "Unknown2")]
	pub unknown2: u32,
	#[serde(rename = "FileIndexA", default = "no_file_index")]
	pub file_index_a: i32,
	#[serde(rename = "FileIndexB", default = "no_file_index")]
	pub file_index_b: i32,
	#[serde(rename = "Raw", default)]
	pub raw: bool,
}


fn no_file_index() -> i32 {
	-1
}


impl EntryMetadata {
	/// Serialize to an XML document with an `Entry` root element.
	///
	/// # Errors
	/// - [`MetadataError`]: serialization failed.
	pub fn to_xml(&self) -> TxpResult<String> {
		let body = quick_xml::se::to_string(self)
			.map_err(|e| MetadataError(e.to_string()))?;
		Ok(format!("{}{}\n", XML_DECLARATION, body))
	}


	/// Parse an XML document written by [`to_xml`][Self::to_xml].
	///
	/// # Errors
	/// - [`MetadataError`]: the document is malformed or a field is missing.
	///
	/// # Example
	/// ```
	/// # use gxm_txp::EntryMetadata;
	/// let xml = r#"<?xml version="1.0"?>
	/// <Entry>
	///   <InternalFilePath>chr/face.png</InternalFilePath>
	///   <RealFilePath>chr/face.png</RealFilePath>
	///   <Format>2499805184</Format>
	///   <Width>64</Width>
	///   <Height>32</Height>
	///   <MipLevel>1</MipLevel>
	///   <Type>2</Type>
	///   <Unknown>0</Unknown>
	///   <Unknown2>0</Unknown2>
	/// </Entry>"#;
	/// let metadata = EntryMetadata::from_xml(xml).unwrap();
	/// assert_eq!(metadata.format, 0x9500_0000);
	/// assert_eq!(metadata.file_index_a, -1);
	/// assert!(!metadata.raw);
	/// ```
	pub fn from_xml(xml: &str) -> TxpResult<Self> {
		quick_xml::de::from_str(xml)
			.map_err(|e| MetadataError(e.to_string()))
	}


	/// Write [`to_xml`][Self::to_xml] to `path`.
	///
	/// # Errors
	/// - [`MetadataError`]: serialization failed.
	/// - [`UnexpectedIoError`]: the file could not be written.
	pub fn write_to_path(&self, path: &Path) -> TxpResult<()> {
		std::fs::write(path, self.to_xml()?)?;
		Ok(())
	}


	/// Read and parse the sidecar at `path`.
	///
	/// # Errors
	/// - [`MetadataError`]: the file is not a valid sidecar.
	/// - [`UnexpectedIoError`]: the file could not be read.
	pub fn read_from_path(path: &Path) -> TxpResult<Self> {
		let xml = std::fs::read_to_string(path)?;
		Self::from_xml(&xml)
	}


	/// Entry with these fields and no texture data.
	pub fn into_entry(self) -> TxpEntry {
		TxpEntry {
			internal_path: self.internal_path,
			file_path: self.file_path,
			format: self.format,
			width: self.width,
			height: self.height,
			mip_level: self.mip_level,
			type_code: self.type_code,
			unknown: self.unknown,
			unknown2: self.unknown2,
			file_index_a: self.file_index_a,
			file_index_b: self.file_index_b,
			is_raw: self.raw,
			..Default::default()
		}
	}
}


impl From<&TxpEntry> for EntryMetadata {
	fn from(entry: &TxpEntry) -> Self {
		Self {
			internal_path: entry.internal_path.clone(),
			file_path: entry.file_path.clone(),
			format: entry.format,
			width: entry.width,
			height: entry.height,
			mip_level: entry.mip_level,
			type_code: entry.type_code,
			unknown: entry.unknown,
			unknown2: entry.unknown2,
			file_index_a: entry.file_index_a,
			file_index_b: entry.file_index_b,
			raw: entry.is_raw,
		}
	}
}


#[test]
fn xml_round_trip() {
	let metadata = EntryMetadata {
		internal_path: "イベント/bg_01.png".to_owned(),
		file_path: "イベント/bg_01.png".to_owned(),
		format: 0x9500_1000,
		width: 480,
		height: 272,
		mip_level: 1,
		type_code: 2,
		unknown: 0x0102,
		unknown2: 0xFFFF_FFFF,
		file_index_a: 7,
		file_index_b: -1,
		raw: true,
	};

	let xml = metadata.to_xml().unwrap();
	assert!(xml.starts_with(XML_DECLARATION));
	assert!(xml.contains("<Entry>"));
	assert!(xml.contains("<RealFilePath>イベント/bg_01.png</RealFilePath>"));
	assert!(xml.contains("<Raw>true</Raw>"));
	assert_eq!(EntryMetadata::from_xml(&xml).unwrap(), metadata);
}


#[test]
fn malformed_xml() {
	assert!(matches!(EntryMetadata::from_xml("<Entry><Format>x</Format></Entry>"), Err(MetadataError(_))));
	assert!(matches!(EntryMetadata::from_xml("<Entry></Entry>"), Err(MetadataError(_))));
}
