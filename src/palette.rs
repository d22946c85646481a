use crate::{TxpResult, TxpError::*};
use crate::format::{TextureFormat, COMPONENT_ORDER_MASK};

#[cfg(feature = "arbitrary")] use arbitrary::Arbitrary;
use derive_more::Display;
use image::Rgba;


/// Channel order of the 32-bit words in a texture palette, taken from the
/// component order nibble of a P4/P8 format code
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(Arbitrary))]
#[allow(missing_docs)]
pub enum PaletteArrangement {
	Abgr,
	Argb,
	Rgba,
	Bgra,
	#[display(fmt = "1Bgr")]
	OneBgr,
	#[display(fmt = "1Rgb")]
	OneRgb,
	#[display(fmt = "Rgb1")]
	RgbOne,
	#[display(fmt = "Bgr1")]
	BgrOne,
}


impl PaletteArrangement {
	/// Select the arrangement for an indexed format code.
	///
	/// # Errors
	/// - [`UnsupportedPaletteArrangement`]: `code` is not a P4/P8 format.
	///
	/// # Example
	/// ```
	/// # use gxm_txp::PaletteArrangement;
	/// assert_eq!(PaletteArrangement::from_format_code(0x9500_6000).unwrap(), PaletteArrangement::RgbOne);
	/// assert!(PaletteArrangement::from_format_code(0x0C00_1000).is_err());
	/// ```
	pub fn from_format_code(code: u32) -> TxpResult<Self> {
		use PaletteArrangement::*;

		let format = TextureFormat::from_code(code)
			.map_err(|_| UnsupportedPaletteArrangement(code))?;

		if !format.is_indexed() {
			return Err(UnsupportedPaletteArrangement(code));
		};

		match code & COMPONENT_ORDER_MASK {
			0x0000 => Ok(Abgr),
			0x1000 => Ok(Argb),
			0x2000 => Ok(Rgba),
			0x3000 => Ok(Bgra),
			0x4000 => Ok(OneBgr),
			0x5000 => Ok(OneRgb),
			0x6000 => Ok(RgbOne),
			0x7000 => Ok(BgrOne),
			_ => Err(UnsupportedPaletteArrangement(code)),
		}
	}


	/// Convert one palette word.  The word is always split as
	/// `b = byte 0, g = byte 1, r = byte 2, a = byte 3`; the arrangement then
	/// decides which of those land in which output channel.
	pub fn arrange(self, word: u32) -> Rgba<u8> {
		use PaletteArrangement::*;

		let [b, g, r, a] = word.to_le_bytes();

		let rgba = match self {
			Abgr | Bgra => [r, g, b, a],
			Argb => [b, g, r, a],
			Rgba => [a, b, g, r],
			OneBgr | BgrOne => [r, g, b, 0xFF],
			OneRgb => [b, g, r, 0xFF],
			RgbOne => [a, b, g, 0xFF],
		};

		image::Rgba(rgba)
	}
}


/// Ordered palette colors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
	colors: Vec<Rgba<u8>>,
}


impl Palette {
	/// Number of words in an on-disk palette.
	pub const ENTRIES: usize = 256;


	/// Resolve raw palette words for an indexed format.
	///
	/// # Errors
	/// - [`UnsupportedPaletteArrangement`]: `format_code` is not a P4/P8 format.
	///
	/// # Example
	/// ```
	/// # use gxm_txp::Palette;
	/// # use image::Rgba;
	/// let palette = Palette::resolve(&[0xAABB_CCDD], 0x9500_1000).unwrap();
	/// assert_eq!(palette.get(0), Some(Rgba([0xDD, 0xCC, 0xBB, 0xAA])));
	/// assert_eq!(palette.get(1), None);
	/// ```
	pub fn resolve(words: &[u32], format_code: u32) -> TxpResult<Self> {
		let arrangement = PaletteArrangement::from_format_code(format_code)?;
		let colors = words.iter().map(|&w| arrangement.arrange(w)).collect();
		Ok(Self { colors })
	}


	/// Create a palette from colors that are already resolved.
	pub fn with_colors(colors: Vec<Rgba<u8>>) -> Self {
		Self { colors }
	}


	/// Color at `index`, or `None` if `index` is out of range.
	pub fn get(&self, index: usize) -> Option<Rgba<u8>> {
		self.colors.get(index).copied()
	}


	/// All colors in order.
	pub fn colors(&self) -> &[Rgba<u8>] {
		&self.colors
	}


	#[allow(missing_docs)]
	pub fn len(&self) -> usize {
		self.colors.len()
	}


	#[allow(missing_docs)]
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}
}


#[test]
fn resolve_every_arrangement() {
	let expected: [(u32, [u8; 4]); 8] = [
		(0x0000, [0xBB, 0xCC, 0xDD, 0xAA]),
		(0x1000, [0xDD, 0xCC, 0xBB, 0xAA]),
		(0x2000, [0xAA, 0xDD, 0xCC, 0xBB]),
		(0x3000, [0xBB, 0xCC, 0xDD, 0xAA]),
		(0x4000, [0xBB, 0xCC, 0xDD, 0xFF]),
		(0x5000, [0xDD, 0xCC, 0xBB, 0xFF]),
		(0x6000, [0xAA, 0xDD, 0xCC, 0xFF]),
		(0x7000, [0xBB, 0xCC, 0xDD, 0xFF]),
	];

	for (order, rgba) in expected {
		for base in [0x9400_0000u32, 0x9500_0000] {
			let palette = Palette::resolve(&[0xAABB_CCDD], base | order).unwrap();
			assert_eq!(palette.colors(), &[Rgba(rgba)], "format {:#010X}", base | order);
		};
	};
}


#[test]
fn resolve_rejects_direct_formats() {
	assert!(matches!(Palette::resolve(&[0], 0x0C00_1000), Err(UnsupportedPaletteArrangement(0x0C00_1000))));
	assert!(matches!(Palette::resolve(&[0], 0x9500_8000), Err(UnsupportedPaletteArrangement(0x9500_8000))));
}
