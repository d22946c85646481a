use crate::{TxpResult, TxpError::*, ReadExt};
use crate::descriptor::TextureDescriptor;
use crate::format::TextureFormat;
use crate::macros::log;

use std::borrow::Cow;
use std::io::Read;

use surety::Ensure;


/// Read `descriptor.data_size` bytes from `input` and decode them with the
/// BCn or PVRTC decoder matching `descriptor.format`.
///
/// The output covers the whole rounded surface as B, G, R, A bytes.  Input
/// shorter than the rounded surface requires is padded with zeros.
///
/// # Errors
/// - [`MalformedContainerRecord`]: `input` ends early.
/// - [`UnsupportedFormat`]: `descriptor.format` is not block-compressed.
/// - [`BlockDecodeError`]: the PVRTC decoder rejected the input.
/// - [`ArithmeticOverflow`]: the surface size overflows a [`usize`].
pub fn decode_block_format<R: Read>(input: &mut R, descriptor: &TextureDescriptor) -> TxpResult<Vec<u8>> {
	let data = input.read_exact_buffered(usize::try_from(descriptor.data_size)?)?;
	decode_block_slice(&data, descriptor)
}


pub(crate) fn decode_block_slice(data: &[u8], descriptor: &TextureDescriptor) -> TxpResult<Vec<u8>> {
	use TextureFormat::*;

	let width = usize::from(descriptor.rounded_width);
	let height = usize::from(descriptor.rounded_height);
	let pixel_count = (width.checked() * height).ok_or(ArithmeticOverflow)?;

	match descriptor.format {
		UBC1_ABGR | UBC2_ABGR | UBC3_ABGR => {
			let format = match descriptor.format {
				UBC1_ABGR => texpresso::Format::Bc1,
				UBC2_ABGR => texpresso::Format::Bc2,
				_ => texpresso::Format::Bc3,
			};

			let data = padded(data, format.compressed_size(width, height));
			let mut output = vec![0u8; (pixel_count.checked() * 4).ok_or(ArithmeticOverflow)?];
			format.decompress(&data, width, height, &mut output);

			// RGBA to BGRA
			for pixel in output.chunks_exact_mut(4) {
				pixel.swap(0, 2);
			};

			Ok(output)
		},

		PVRT2BPP_ABGR | PVRT4BPP_ABGR => {
			let is_2bpp = descriptor.format == PVRT2BPP_ABGR;
			let data = padded(data, pvrtc_size(width, height, is_2bpp));
			let mut pixels = vec![0u32; pixel_count];

			let result = if is_2bpp {
				texture2ddecoder::decode_pvrtc_2bpp(&data, width, height, &mut pixels)
			}
			else {
				texture2ddecoder::decode_pvrtc_4bpp(&data, width, height, &mut pixels)
			};

			result.map_err(|e| BlockDecodeError(format!("{:?}", e)))?;

			// Decoded pixels are 0xAARRGGBB
			Ok(pixels.iter().flat_map(|p| p.to_le_bytes()).collect())
		},

		other => Err(UnsupportedFormat(other.code())),
	}
}


// PVRTC surfaces are stored as at least 2x2 blocks of 8x4 (2bpp) or 4x4 (4bpp) pixels.
fn pvrtc_size(width: usize, height: usize, is_2bpp: bool) -> usize {
	if is_2bpp {
		std::cmp::max(width, 16) * std::cmp::max(height, 8) / 4
	}
	else {
		std::cmp::max(width, 8) * std::cmp::max(height, 8) / 2
	}
}


fn padded(data: &[u8], required: usize) -> Cow<'_, [u8]> {
	if data.len() >= required {
		return Cow::Borrowed(data);
	};

	log!(debug, "Block data is {} bytes, padding to {} bytes", data.len(), required);

	let mut owned = data.to_vec();
	owned.resize(required, 0);
	Cow::Owned(owned)
}


#[cfg(test)]
fn block_descriptor(format: TextureFormat, size: u16, data_size: u32) -> TextureDescriptor {
	TextureDescriptor::new(format, crate::TextureType::Linear, size, size, data_size).unwrap()
}


#[test]
fn bc1_solid_block() {
	// color0 = color1 = pure red (RGB565 0xF800), all indices 0
	let block = [0x00u8, 0xF8, 0x00, 0xF8, 0x00, 0x00, 0x00, 0x00];
	let descriptor = block_descriptor(TextureFormat::UBC1_ABGR, 4, 8);
	let out = decode_block_format(&mut &block[..], &descriptor).unwrap();
	assert_eq!(out.len(), 4 * 4 * 4);

	for pixel in out.chunks_exact(4) {
		assert_eq!(pixel, &[0x00, 0x00, 0xFF, 0xFF]);
	};
}


#[test]
fn bc3_short_input_is_padded() {
	let descriptor = block_descriptor(TextureFormat::UBC3_ABGR, 8, 4);
	let out = decode_block_slice(&[0u8; 4], &descriptor).unwrap();
	assert_eq!(out.len(), 8 * 8 * 4);
}


#[test]
fn pvrtc_output_size() {
	let descriptor = block_descriptor(TextureFormat::PVRT4BPP_ABGR, 8, 32);
	let out = decode_block_slice(&[0u8; 32], &descriptor).unwrap();
	assert_eq!(out.len(), 8 * 8 * 4);
}


#[test]
fn non_block_format_is_rejected() {
	let descriptor = block_descriptor(TextureFormat::P8_ABGR, 4, 16);
	assert!(matches!(decode_block_slice(&[0u8; 16], &descriptor), Err(UnsupportedFormat(0x9500_0000))));
}
