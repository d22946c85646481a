use crate::{TxpResult, TxpError::*};
use crate::format::TextureFormat;

#[cfg(feature = "arbitrary")] use arbitrary::Arbitrary;
use derive_more::Display;
use enum_utils::FromStr;


/// Memory arrangement of a texture surface
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, FromStr)]
#[cfg_attr(feature = "arbitrary", derive(Arbitrary))]
#[enumeration(case_insensitive)]
pub enum TextureType {
	/// Row-major pixels.
	Linear,
	/// 32x32 pixel tiles.
	Tiled,
	/// Morton (Z-order) swizzle.
	Swizzled,
	/// Cube map faces; swizzled like [`TextureType::Swizzled`].
	Cube,
	/// Undocumented swizzle variant; treated like [`TextureType::Swizzled`].
	UnknownSwizzleVariant,
}


impl TextureType {
	/// Parse a raw `SceGxmTextureType` word.
	///
	/// # Errors
	/// - [`UnsupportedTextureType`]: `word` is not a known texture type.
	///
	/// # Example
	/// ```
	/// # use gxm_txp::TextureType;
	/// assert_eq!(TextureType::from_gxm(0x6000_0000).unwrap(), TextureType::Linear);
	/// assert_eq!(TextureType::from_gxm(0x4000_0000).unwrap(), TextureType::Cube);
	/// assert!(TextureType::from_gxm(0x2000_0000).is_err());
	/// ```
	pub fn from_gxm(word: u32) -> TxpResult<Self> {
		use TextureType::*;

		match word {
			0x0000_0000 => Ok(Swizzled),
			0x4000_0000 => Ok(Cube),
			0x6000_0000 => Ok(Linear),
			0x8000_0000 => Ok(Tiled),
			0xA000_0000 => Ok(UnknownSwizzleVariant),
			other => Err(UnsupportedTextureType(other)),
		}
	}


	/// Raw `SceGxmTextureType` word.
	pub const fn gxm_word(self) -> u32 {
		use TextureType::*;

		match self {
			Swizzled => 0x0000_0000,
			Cube => 0x4000_0000,
			Linear => 0x6000_0000,
			Tiled => 0x8000_0000,
			UnknownSwizzleVariant => 0xA000_0000,
		}
	}


	/// Interpret the one-byte type code of a TXP entry record: `0` is linear
	/// and `2` is swizzled.
	///
	/// # Errors
	/// - [`UnsupportedTextureType`]: any other code.
	pub fn from_entry_code(code: u8) -> TxpResult<Self> {
		match code {
			0 => Ok(TextureType::Linear),
			2 => Ok(TextureType::Swizzled),
			other => Err(UnsupportedTextureType(other.into())),
		}
	}


	/// Return true if the surface is rearranged with the Morton swizzle.
	pub const fn is_swizzled(self) -> bool {
		matches!(self, TextureType::Swizzled | TextureType::Cube | TextureType::UnknownSwizzleVariant)
	}
}


/// Everything the unpack providers and the composer need to know about a
/// texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct TextureDescriptor {
	pub format: TextureFormat,
	pub width: u16,
	pub height: u16,
	/// Width of the stored surface; never smaller than `width`.
	pub rounded_width: u16,
	/// Height of the stored surface; never smaller than `height`.
	pub rounded_height: u16,
	/// Index of the palette in the owning container, or -1.
	pub palette_index: i32,
	/// Bytes per stored row (`data_size / rounded_height`).
	pub raw_line_size: i32,
	pub texture_type: TextureType,
	/// Number of stored texture bytes.
	pub data_size: u32,
}


impl TextureDescriptor {
	/// Create a descriptor, deriving the stored surface dimensions from the
	/// texture type and format.
	///
	/// - linear surfaces are stored at their actual size;
	/// - tiled surfaces are padded to whole 32x32 tiles;
	/// - swizzled surfaces are padded to powers of two;
	/// - BCn surfaces are additionally padded to whole 4x4 blocks and PVRTC
	///   surfaces to powers of two.
	///
	/// # Errors
	/// - [`DimensionsTooLarge`]: a rounded dimension does not fit in a [`u16`].
	///
	/// # Example
	/// ```
	/// # use gxm_txp::{TextureDescriptor, TextureFormat, TextureType};
	/// let d = TextureDescriptor::new(TextureFormat::P8_ABGR, TextureType::Swizzled, 100, 60, 128 * 64).unwrap();
	/// assert_eq!((d.rounded_width, d.rounded_height), (128, 64));
	/// assert_eq!(d.raw_line_size, 128);
	/// ```
	pub fn new(format: TextureFormat, texture_type: TextureType, width: u16, height: u16, data_size: u32) -> TxpResult<Self> {
		let rounded_width = round_dimension(width, format, texture_type)?;
		let rounded_height = round_dimension(height, format, texture_type)?;

		let raw_line_size = match rounded_height {
			0 => 0,
			h => i32::try_from(data_size / u32::from(h))?,
		};

		let result = Self {
			format,
			width,
			height,
			rounded_width,
			rounded_height,
			palette_index: -1,
			raw_line_size,
			texture_type,
			data_size,
		};

		Ok(result)
	}
}


fn round_dimension(value: u16, format: TextureFormat, texture_type: TextureType) -> TxpResult<u16> {
	let value = u32::from(value);

	let mut rounded = match texture_type {
		TextureType::Linear => value,
		TextureType::Tiled => align_up(value, 32),
		_ => value.next_power_of_two(),
	};

	if format.is_bc() {
		rounded = align_up(rounded, 4);
	}
	else if format.is_pvrtc() {
		rounded = rounded.next_power_of_two();
	};

	u16::try_from(rounded).map_err(|_| DimensionsTooLarge)
}


const fn align_up(value: u32, alignment: u32) -> u32 {
	(value + alignment - 1) / alignment * alignment
}


#[test]
fn rounding_per_type() {
	use TextureFormat::*;

	let linear = TextureDescriptor::new(U8U8U8U8_ARGB, TextureType::Linear, 30, 17, 0).unwrap();
	assert_eq!((linear.rounded_width, linear.rounded_height), (30, 17));

	let tiled = TextureDescriptor::new(U8U8U8U8_ARGB, TextureType::Tiled, 33, 17, 0).unwrap();
	assert_eq!((tiled.rounded_width, tiled.rounded_height), (64, 32));

	let cube = TextureDescriptor::new(P4_ABGR, TextureType::Cube, 33, 17, 0).unwrap();
	assert_eq!((cube.rounded_width, cube.rounded_height), (64, 32));

	let bc = TextureDescriptor::new(UBC1_ABGR, TextureType::Linear, 30, 17, 0).unwrap();
	assert_eq!((bc.rounded_width, bc.rounded_height), (32, 20));

	let pvrtc = TextureDescriptor::new(PVRT4BPP_ABGR, TextureType::Linear, 30, 17, 0).unwrap();
	assert_eq!((pvrtc.rounded_width, pvrtc.rounded_height), (32, 32));
}


#[test]
fn rounding_overflow() {
	let result = TextureDescriptor::new(TextureFormat::P8_ABGR, TextureType::Swizzled, 40000, 16, 0);
	assert!(matches!(result, Err(DimensionsTooLarge)));
}


#[test]
fn entry_type_codes() {
	assert_eq!(TextureType::from_entry_code(0).unwrap(), TextureType::Linear);
	assert_eq!(TextureType::from_entry_code(2).unwrap(), TextureType::Swizzled);
	assert!(matches!(TextureType::from_entry_code(1), Err(UnsupportedTextureType(1))));

	for t in [TextureType::Linear, TextureType::Tiled, TextureType::Swizzled, TextureType::Cube, TextureType::UnknownSwizzleVariant] {
		assert_eq!(TextureType::from_gxm(t.gxm_word()).unwrap(), t);
	};
}
