use crate::{TxpResult, TxpError::*};
use crate::unpack::UnpackProvider;

use std::collections::HashMap;
use std::sync::OnceLock;

#[cfg(feature = "arbitrary")] use arbitrary::Arbitrary;
use deku::prelude::*;
use derive_more::Display;
use enum_utils::FromStr;


/// Mask selecting the base format of a GXM format code.
pub const BASE_FORMAT_MASK: u32 = 0x9F00_0000;

/// Mask selecting the component order (swizzle) nibble of a GXM format code.
pub const COMPONENT_ORDER_MASK: u32 = 0x0000_F000;


/// GXM texture format, as stored in the `format` field of an entry record
///
/// Variant names follow the `SceGxmTextureFormat` naming: bit widths of the
/// stored components, then the order in which they appear in the output.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, FromStr, DekuRead, DekuWrite)]
#[cfg_attr(feature = "arbitrary", derive(Arbitrary))]
#[enumeration(case_insensitive)]
#[deku(type = "u32", endian = "little")]
#[repr(u32)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
	/// 8-bit luminance broadcast to RGB, opaque.
	#[deku(id = "0x0000_5000")]
	U8_1RRR = 0x0000_5000,

	/// 8-bit alpha, black color.
	#[deku(id = "0x0000_6000")]
	U8_R000 = 0x0000_6000,

	/// 8-bit alpha followed by 8-bit luminance.
	#[deku(id = "0x0700_3000")]
	U8U8_RGGG = 0x0700_3000,

	/// Two-channel green and red.
	#[deku(id = "0x0700_1000")]
	U8U8_00GR = 0x0700_1000,

	/// ARGB 1:5:5:5 in a little-endian 2-byte integer.
	#[deku(id = "0x0400_1000")]
	U1U5U5U5_ARGB = 0x0400_1000,

	/// ARGB 4:4:4:4 in a little-endian 2-byte integer.
	#[deku(id = "0x0200_1000")]
	U4U4U4U4_ARGB = 0x0200_1000,

	/// RGB 5:6:5 in a little-endian 2-byte integer.
	#[deku(id = "0x0500_1000")]
	U5U6U5_RGB = 0x0500_1000,

	/// BGRA 8:8:8:8 bytes.
	#[deku(id = "0x0C00_1000")]
	U8U8U8U8_ARGB = 0x0C00_1000,

	/// BGRX 8:8:8:8 bytes, fourth byte ignored.
	#[deku(id = "0x0C00_6000")]
	U8U8U8X8_RGB1 = 0x0C00_6000,

	/// BGR 8:8:8 bytes.
	#[deku(id = "0x9800_1000")]
	U8U8U8_RGB = 0x9800_1000,

	/// BC1 (DXT1).
	#[deku(id = "0x8500_0000")]
	UBC1_ABGR = 0x8500_0000,

	/// BC2 (DXT3).
	#[deku(id = "0x8600_0000")]
	UBC2_ABGR = 0x8600_0000,

	/// BC3 (DXT5).
	#[deku(id = "0x8700_0000")]
	UBC3_ABGR = 0x8700_0000,

	/// PVRTC, 2 bits per pixel.
	#[deku(id = "0x8000_0000")]
	PVRT2BPP_ABGR = 0x8000_0000,

	/// PVRTC, 4 bits per pixel.
	#[deku(id = "0x8100_0000")]
	PVRT4BPP_ABGR = 0x8100_0000,

	#[allow(missing_docs)]
	#[deku(id = "0x9400_0000")]
	P4_ABGR = 0x9400_0000,
	#[allow(missing_docs)]
	#[deku(id = "0x9400_1000")]
	P4_ARGB = 0x9400_1000,
	#[allow(missing_docs)]
	#[deku(id = "0x9400_2000")]
	P4_RGBA = 0x9400_2000,
	#[allow(missing_docs)]
	#[deku(id = "0x9400_3000")]
	P4_BGRA = 0x9400_3000,
	#[allow(missing_docs)]
	#[deku(id = "0x9400_4000")]
	P4_1BGR = 0x9400_4000,
	#[allow(missing_docs)]
	#[deku(id = "0x9400_5000")]
	P4_1RGB = 0x9400_5000,
	#[allow(missing_docs)]
	#[deku(id = "0x9400_6000")]
	P4_RGB1 = 0x9400_6000,
	#[allow(missing_docs)]
	#[deku(id = "0x9400_7000")]
	P4_BGR1 = 0x9400_7000,

	#[allow(missing_docs)]
	#[deku(id = "0x9500_0000")]
	P8_ABGR = 0x9500_0000,
	#[allow(missing_docs)]
	#[deku(id = "0x9500_1000")]
	P8_ARGB = 0x9500_1000,
	#[allow(missing_docs)]
	#[deku(id = "0x9500_2000")]
	P8_RGBA = 0x9500_2000,
	#[allow(missing_docs)]
	#[deku(id = "0x9500_3000")]
	P8_BGRA = 0x9500_3000,
	#[allow(missing_docs)]
	#[deku(id = "0x9500_4000")]
	P8_1BGR = 0x9500_4000,
	#[allow(missing_docs)]
	#[deku(id = "0x9500_5000")]
	P8_1RGB = 0x9500_5000,
	#[allow(missing_docs)]
	#[deku(id = "0x9500_6000")]
	P8_RGB1 = 0x9500_6000,
	#[allow(missing_docs)]
	#[deku(id = "0x9500_7000")]
	P8_BGR1 = 0x9500_7000,
}


impl TextureFormat {
	/// Every supported format, in ascending order of family.
	pub const ALL: [TextureFormat; 31] = {
		use TextureFormat::*;
		[
			U8_1RRR, U8_R000, U8U8_RGGG, U8U8_00GR,
			U1U5U5U5_ARGB, U4U4U4U4_ARGB, U5U6U5_RGB,
			U8U8U8U8_ARGB, U8U8U8X8_RGB1, U8U8U8_RGB,
			UBC1_ABGR, UBC2_ABGR, UBC3_ABGR, PVRT2BPP_ABGR, PVRT4BPP_ABGR,
			P4_ABGR, P4_ARGB, P4_RGBA, P4_BGRA, P4_1BGR, P4_1RGB, P4_RGB1, P4_BGR1,
			P8_ABGR, P8_ARGB, P8_RGBA, P8_BGRA, P8_1BGR, P8_1RGB, P8_RGB1, P8_BGR1,
		]
	};


	/// Parse a raw GXM format code.
	///
	/// # Errors
	/// - [`UnsupportedFormat`]: `code` is not a known format.
	///
	/// # Example
	/// ```
	/// # use gxm_txp::TextureFormat;
	/// assert_eq!(TextureFormat::from_code(0x0C00_1000).unwrap(), TextureFormat::U8U8U8U8_ARGB);
	/// assert!(TextureFormat::from_code(0xFFFF_FFFF).is_err());
	/// ```
	pub fn from_code(code: u32) -> TxpResult<Self> {
		let bytes = code.to_le_bytes();
		let (_, format) = Self::from_bytes((&bytes, 0))
			.map_err(|_| UnsupportedFormat(code))?;
		Ok(format)
	}


	/// Raw GXM format code.
	pub const fn code(self) -> u32 {
		self as u32
	}


	/// Base format bits (`code & 0x9F000000`).
	pub const fn base_format(self) -> u32 {
		self.code() & BASE_FORMAT_MASK
	}


	/// Component order nibble (`code & 0x0000F000`).
	pub const fn component_order(self) -> u32 {
		self.code() & COMPONENT_ORDER_MASK
	}


	/// Return true for BC1, BC2 and BC3.
	pub const fn is_bc(self) -> bool {
		use TextureFormat::*;
		matches!(self, UBC1_ABGR | UBC2_ABGR | UBC3_ABGR)
	}


	/// Return true for PVRTC 2bpp and 4bpp.
	pub const fn is_pvrtc(self) -> bool {
		use TextureFormat::*;
		matches!(self, PVRT2BPP_ABGR | PVRT4BPP_ABGR)
	}


	/// Return true if the format is decoded by a block decoder rather than
	/// per pixel.
	///
	/// # Example
	/// ```
	/// # use gxm_txp::TextureFormat;
	/// assert!(TextureFormat::UBC3_ABGR.is_block_compressed());
	/// assert!(TextureFormat::PVRT4BPP_ABGR.is_block_compressed());
	/// assert!(!TextureFormat::P8_ABGR.is_block_compressed());
	/// ```
	pub const fn is_block_compressed(self) -> bool {
		self.is_bc() || self.is_pvrtc()
	}


	/// Return true for palettized (P4 and P8) formats.
	pub const fn is_indexed(self) -> bool {
		matches!(self.layout(), PixelLayout::Indexed8 | PixelLayout::Indexed4)
	}


	/// Layout of the unpacked pixel buffer the composer reads.
	pub const fn layout(self) -> PixelLayout {
		use TextureFormat::*;
		use PixelLayout::*;

		match self {
			U8_1RRR | U8_R000 | U8U8_RGGG | U8U8_00GR
			| U1U5U5U5_ARGB | U4U4U4U4_ARGB | U5U6U5_RGB
			| U8U8U8U8_ARGB | U8U8U8X8_RGB1 => Direct32,

			U8U8U8_RGB => Direct24,

			UBC1_ABGR | UBC2_ABGR | UBC3_ABGR | PVRT2BPP_ABGR | PVRT4BPP_ABGR => Direct32,

			P4_ABGR | P4_ARGB | P4_RGBA | P4_BGRA | P4_1BGR | P4_1RGB | P4_RGB1 | P4_BGR1 => Indexed4,

			P8_ABGR | P8_ARGB | P8_RGBA | P8_BGRA | P8_1BGR | P8_1RGB | P8_RGB1 | P8_BGR1 => Indexed8,
		}
	}


	/// Provider that turns stored texture bytes into the unpacked buffer.
	pub const fn provider(self) -> UnpackProvider {
		use TextureFormat::*;
		use UnpackProvider::*;

		match self {
			U8_1RRR => Broadcast,
			U8_R000 => AlphaOnly,
			U8U8_RGGG => LuminanceAlpha,
			U8U8_00GR => RedGreen,
			U1U5U5U5_ARGB => Argb1555,
			U4U4U4U4_ARGB => Argb4444,
			U5U6U5_RGB => Rgb565,
			U8U8U8U8_ARGB | U8U8U8_RGB => Direct,
			U8U8U8X8_RGB1 => OpaqueDirect,

			UBC1_ABGR | UBC2_ABGR | UBC3_ABGR | PVRT2BPP_ABGR | PVRT4BPP_ABGR => Block,

			P4_ABGR | P4_ARGB | P4_RGBA | P4_BGRA | P4_1BGR | P4_1RGB | P4_RGB1 | P4_BGR1 => NibbleSwap,

			P8_ABGR | P8_ARGB | P8_RGBA | P8_BGRA | P8_1BGR | P8_1RGB | P8_RGB1 | P8_BGR1 => Direct,
		}
	}
}


/// Arrangement of an unpacked pixel buffer
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(Arbitrary))]
pub enum PixelLayout {
	/// B, G, R, A bytes.
	Direct32,
	/// B, G, R bytes.
	Direct24,
	/// One palette index per byte.
	Indexed8,
	/// Two palette indices per byte, high nibble first.
	Indexed4,
}


impl PixelLayout {
	/// Bits occupied by one pixel.
	pub const fn bits_per_pixel(self) -> usize {
		match self {
			PixelLayout::Direct32 => 32,
			PixelLayout::Direct24 => 24,
			PixelLayout::Indexed8 => 8,
			PixelLayout::Indexed4 => 4,
		}
	}
}


/// Registry record for one format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatEntry {
	#[allow(missing_docs)]
	pub format: TextureFormat,
	#[allow(missing_docs)]
	pub layout: PixelLayout,
	#[allow(missing_docs)]
	pub provider: UnpackProvider,
}


/// Process-wide read-only mapping from format code to [`FormatEntry`]
#[derive(Debug)]
pub struct FormatRegistry {
	entries: HashMap<u32, FormatEntry>,
}


impl FormatRegistry {
	/// Return the registry, building it on first use.
	///
	/// # Panics
	/// - If the format tables are inconsistent (duplicate codes, or a format
	///   missing from the layout or provider table).  This is a build defect
	///   and is caught by the crate's tests.
	pub fn global() -> &'static Self {
		static REGISTRY: OnceLock<FormatRegistry> = OnceLock::new();
		REGISTRY.get_or_init(Self::build)
	}


	fn build() -> Self {
		let layouts: HashMap<u32, PixelLayout> = TextureFormat::ALL
			.iter()
			.map(|f| (f.code(), f.layout()))
			.collect();

		let providers: HashMap<u32, UnpackProvider> = TextureFormat::ALL
			.iter()
			.map(|f| (f.code(), f.provider()))
			.collect();

		assert_eq!(layouts.len(), TextureFormat::ALL.len(), "Duplicate format code in TextureFormat::ALL");
		assert!(layouts.len() == providers.len() && layouts.keys().all(|k| providers.contains_key(k)),
			"Layout and provider tables cover different formats");

		let entries = TextureFormat::ALL
			.iter()
			.map(|&format| {
				let code = format.code();
				assert_eq!(TextureFormat::from_code(code).ok(), Some(format), "Format {} does not round-trip through its code", format);
				(code, FormatEntry { format, layout: layouts[&code], provider: providers[&code] })
			})
			.collect();

		Self { entries }
	}


	/// Resolve a raw format code.
	///
	/// # Errors
	/// - [`UnsupportedFormat`]: `code` is not registered.
	///
	/// # Example
	/// ```
	/// # use gxm_txp::{FormatRegistry, PixelLayout, TxpError};
	/// let registry = FormatRegistry::global();
	/// assert_eq!(registry.lookup(0x9800_1000).unwrap().layout, PixelLayout::Direct24);
	/// assert!(matches!(registry.lookup(0xFFFF_FFFF), Err(TxpError::UnsupportedFormat(0xFFFF_FFFF))));
	/// ```
	pub fn lookup(&self, code: u32) -> TxpResult<FormatEntry> {
		self.entries
			.get(&code)
			.copied()
			.ok_or(UnsupportedFormat(code))
	}


	/// Number of registered formats.
	pub fn len(&self) -> usize {
		self.entries.len()
	}


	/// Always false for a correctly built registry.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}


#[test]
fn registry_is_complete() {
	let registry = FormatRegistry::global();
	assert_eq!(registry.len(), TextureFormat::ALL.len());

	for format in TextureFormat::ALL {
		let entry = registry.lookup(format.code()).unwrap();
		assert_eq!(entry.format, format);
		assert_eq!(entry.layout, format.layout());
		assert_eq!(entry.provider, format.provider());
	};
}


#[test]
fn unknown_format_is_rejected() {
	assert!(matches!(FormatRegistry::global().lookup(0xFFFF_FFFF), Err(UnsupportedFormat(0xFFFF_FFFF))));
	assert!(matches!(FormatRegistry::global().lookup(0x9600_0000), Err(UnsupportedFormat(0x9600_0000))));
}


#[test]
fn format_families() {
	use TextureFormat::*;

	for format in TextureFormat::ALL {
		assert_eq!(format.is_indexed(), matches!(format.base_format(), 0x9400_0000 | 0x9500_0000));
	};

	assert_eq!(P8_1RGB.component_order(), 0x5000);
	assert_eq!(U8U8U8_RGB.layout().bits_per_pixel(), 24);
	assert_eq!(P4_BGRA.layout().bits_per_pixel(), 4);
	assert!(!U8U8U8U8_ARGB.is_block_compressed());
}


#[test]
fn parse_format_name() {
	assert_eq!("u8u8u8u8_argb".parse::<TextureFormat>().unwrap(), TextureFormat::U8U8U8U8_ARGB);
	assert_eq!("P4_1BGR".parse::<TextureFormat>().unwrap(), TextureFormat::P4_1BGR);
	assert_eq!(TextureFormat::UBC1_ABGR.to_string(), "UBC1_ABGR");
}
