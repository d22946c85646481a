use crate::TxpResult;
use crate::TxpError::*;


use deku::{prelude::*, DekuContainerRead};
use surety::Ensure;
use tap::prelude::*;


/// A pixel packed into a little-endian integer, expanded to B, G, R, A bytes
#[allow(clippy::cast_possible_truncation)]
pub(crate) trait PackedPixel: for<'a> DekuContainerRead<'a> + Sized {
	const ALPHA_WIDTH: u8;
	const RED_WIDTH: u8;
	const GREEN_WIDTH: u8;
	const BLUE_WIDTH: u8;

	fn a(&self) -> u8;
	fn r(&self) -> u8;
	fn g(&self) -> u8;
	fn b(&self) -> u8;


	const PIXEL_WIDTH: usize = (Self::ALPHA_WIDTH + Self::RED_WIDTH + Self::GREEN_WIDTH + Self::BLUE_WIDTH) as usize;
	const PIXEL_WIDTH_BYTES: usize = (Self::PIXEL_WIDTH + 7) / 8;


	fn uint_range(width: u8) -> u16 { (1u16 << width) - 1 }


	fn from_data(data: &[u8]) -> TxpResult<Self> {
		let data = data.get(0..Self::PIXEL_WIDTH_BYTES)
			.ok_or(MalformedContainerRecord)?
			.to_owned()
			.tap_mut(|d| d.reverse());

		let (_, result) = <Self as DekuContainerRead>::from_bytes((&data, 0))
			.map_err(|_| MalformedContainerRecord)?;
		Ok(result)
	}


	fn convert_u8(value: u8, from_width: u8) -> u8 {
		if from_width == 0 {
			return 0xFF;
		};

		let range_from = Self::uint_range(from_width);
		let bias = range_from / 2;
		((u16::from(value) * 0xFF + bias) / range_from) as u8
	}


	fn into_bgra8(self) -> [u8; 4] {
		let b = Self::convert_u8(self.b(), Self::BLUE_WIDTH);
		let g = Self::convert_u8(self.g(), Self::GREEN_WIDTH);
		let r = Self::convert_u8(self.r(), Self::RED_WIDTH);
		let a = Self::convert_u8(self.a(), Self::ALPHA_WIDTH);
		[b, g, r, a]
	}


	/// Expand every whole pixel in `data`; a trailing partial pixel is
	/// ignored.
	fn convert_to_bgra8_slice(data: &[u8]) -> TxpResult<Vec<u8>> {
		let result_len: usize = (data.len().checked() / Self::PIXEL_WIDTH_BYTES * 4)
			.ok_or(ArithmeticOverflow)?;
		let mut result = Vec::with_capacity(result_len);

		for pixdata in data.chunks_exact(Self::PIXEL_WIDTH_BYTES) {
			result.extend(Self::from_data(pixdata)?.into_bgra8());
		};

		Ok(result)
	}
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, DekuRead)]
pub(crate) struct Argb1555Pixel {
	#[deku(bits = "1")]
	a: u8,
	#[deku(bits = "5")]
	r: u8,
	#[deku(bits = "5")]
	g: u8,
	#[deku(bits = "5")]
	b: u8,
}


impl PackedPixel for Argb1555Pixel {
	const ALPHA_WIDTH: u8 = 1;
	const RED_WIDTH: u8 = 5;
	const GREEN_WIDTH: u8 = 5;
	const BLUE_WIDTH: u8 = 5;

	fn a(&self) -> u8 { self.a }
	fn r(&self) -> u8 { self.r }
	fn g(&self) -> u8 { self.g }
	fn b(&self) -> u8 { self.b }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, DekuRead)]
pub(crate) struct Rgb565Pixel {
	#[deku(bits = "5")]
	r: u8,
	#[deku(bits = "6")]
	g: u8,
	#[deku(bits = "5")]
	b: u8,
}


impl PackedPixel for Rgb565Pixel {
	const ALPHA_WIDTH: u8 = 0;
	const RED_WIDTH: u8 = 5;
	const GREEN_WIDTH: u8 = 6;
	const BLUE_WIDTH: u8 = 5;

	fn a(&self) -> u8 { 0 }
	fn r(&self) -> u8 { self.r }
	fn g(&self) -> u8 { self.g }
	fn b(&self) -> u8 { self.b }
}


#[test]
fn argb1555pixel_bytes() {
	let purple_1555 = vec![0x12, 0xB4];
	assert_eq!(Argb1555Pixel::convert_to_bgra8_slice(&purple_1555).unwrap(), vec![0x94, 0x00, 0x6B, 0xFF]);

	let transparent_1555 = vec![0x12, 0x34];
	assert_eq!(Argb1555Pixel::convert_to_bgra8_slice(&transparent_1555).unwrap(), vec![0x94, 0x00, 0x6B, 0x00]);
}


#[test]
fn rgb565pixel_bytes() {
	let pixels = vec![0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0xFF];
	assert_eq!(Rgb565Pixel::convert_to_bgra8_slice(&pixels).unwrap(), vec![
		0x00, 0x00, 0xFF, 0xFF,
		0x00, 0xFF, 0x00, 0xFF,
		0xFF, 0x00, 0x00, 0xFF,
	]);
}
