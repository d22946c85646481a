use crate::{TxpResult, ReadExt};
use crate::block::decode_block_slice;
use crate::descriptor::TextureDescriptor;
use crate::format::FormatRegistry;
use crate::pixel::{PackedPixel, Argb1555Pixel, Rgb565Pixel};

use std::io::Read;

#[cfg(feature = "arbitrary")] use arbitrary::Arbitrary;
use byteorder::{LittleEndian, ByteOrder};


/// Per-family conversion from stored texture bytes to the buffer the
/// composer reads
///
/// Direct outputs are B, G, R, A (or B, G, R for 24-bit), indexed outputs
/// are palette indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(Arbitrary))]
pub enum UnpackProvider {
	/// Bytes are copied as they are.
	Direct,
	/// 4-byte pixels copied with the fourth byte forced to `0xFF`.
	OpaqueDirect,
	/// One luminance byte `v` becomes `v, v, v, 0xFF`.
	Broadcast,
	/// One alpha byte `v` becomes `0, 0, 0, v`.
	AlphaOnly,
	/// Bytes `a, l` become `l, l, l, a`.
	LuminanceAlpha,
	/// Bytes `g, r` become `0, g, r, 0`.
	RedGreen,
	/// Little-endian ARGB 4:4:4:4, each channel shifted left by 4.
	Argb4444,
	/// Little-endian ARGB 1:5:5:5, channels scaled to 8 bits.
	Argb1555,
	/// Little-endian RGB 5:6:5, channels scaled to 8 bits, opaque.
	Rgb565,
	/// Nibbles of every byte swapped.
	NibbleSwap,
	/// Handed to a BCn or PVRTC block decoder.
	Block,
}


impl UnpackProvider {
	/// Read exactly `descriptor.data_size` bytes from `input` (which must be
	/// positioned at the texture data) and unpack them.
	///
	/// # Errors
	/// - [`MalformedContainerRecord`][crate::TxpError::MalformedContainerRecord]: `input` ends early.
	/// - [`UnexpectedIoError`][crate::TxpError::UnexpectedIoError]: Unexpected read error.
	/// - [`BlockDecodeError`][crate::TxpError::BlockDecodeError]: the block decoder failed.
	pub fn unpack<R: Read>(self, input: &mut R, descriptor: &TextureDescriptor) -> TxpResult<Vec<u8>> {
		let data = input.read_exact_buffered(usize::try_from(descriptor.data_size)?)?;
		self.unpack_slice(&data, descriptor)
	}


	/// Unpack already loaded texture bytes.  Only whole input units are
	/// converted.
	///
	/// # Errors
	/// - [`BlockDecodeError`][crate::TxpError::BlockDecodeError]: the block decoder failed.
	/// - [`ArithmeticOverflow`][crate::TxpError::ArithmeticOverflow]: the output size overflows a [`usize`].
	///
	/// # Example
	/// ```
	/// # use gxm_txp::*;
	/// let descriptor = TextureDescriptor::new(TextureFormat::U8_1RRR, TextureType::Linear, 1, 1, 1).unwrap();
	/// let out = UnpackProvider::Broadcast.unpack_slice(&[0x7F], &descriptor).unwrap();
	/// assert_eq!(out, vec![0x7F, 0x7F, 0x7F, 0xFF]);
	/// ```
	pub fn unpack_slice(self, data: &[u8], descriptor: &TextureDescriptor) -> TxpResult<Vec<u8>> {
		use UnpackProvider::*;

		let result = match self {
			Direct => data.to_vec(),
			OpaqueDirect => opaque_direct(data),
			Broadcast => broadcast(data),
			AlphaOnly => alpha_only(data),
			LuminanceAlpha => luminance_alpha(data),
			RedGreen => red_green(data),
			Argb4444 => argb4444(data),
			Argb1555 => Argb1555Pixel::convert_to_bgra8_slice(data)?,
			Rgb565 => Rgb565Pixel::convert_to_bgra8_slice(data)?,
			NibbleSwap => nibble_swap(data),
			Block => decode_block_slice(data, descriptor)?,
		};

		Ok(result)
	}
}


/// Resolve the provider for `descriptor.format` and unpack the texture data
/// `input` is positioned at.
///
/// # Errors
/// - [`UnsupportedFormat`][crate::TxpError::UnsupportedFormat]: format is not registered.
/// - see [`UnpackProvider::unpack`].
pub fn unpack<R: Read>(input: &mut R, descriptor: &TextureDescriptor) -> TxpResult<Vec<u8>> {
	let entry = FormatRegistry::global().lookup(descriptor.format.code())?;
	entry.provider.unpack(input, descriptor)
}


fn opaque_direct(data: &[u8]) -> Vec<u8> {
	data.chunks_exact(4)
		.flat_map(|p| [p[0], p[1], p[2], 0xFF])
		.collect()
}


fn broadcast(data: &[u8]) -> Vec<u8> {
	data.iter()
		.flat_map(|&v| [v, v, v, 0xFF])
		.collect()
}


fn alpha_only(data: &[u8]) -> Vec<u8> {
	data.iter()
		.flat_map(|&v| [0, 0, 0, v])
		.collect()
}


fn luminance_alpha(data: &[u8]) -> Vec<u8> {
	data.chunks_exact(2)
		.flat_map(|p| [p[1], p[1], p[1], p[0]])
		.collect()
}


fn red_green(data: &[u8]) -> Vec<u8> {
	data.chunks_exact(2)
		.flat_map(|p| [0, p[0], p[1], 0])
		.collect()
}


// No bit replication: 0xF becomes 0xF0.
#[allow(clippy::cast_possible_truncation)]
fn argb4444(data: &[u8]) -> Vec<u8> {
	data.chunks_exact(2)
		.map(LittleEndian::read_u16)
		.flat_map(|v| [
			(((v >> 4) & 0xF) as u8) << 4,
			(((v >> 8) & 0xF) as u8) << 4,
			(((v >> 12) & 0xF) as u8) << 4,
			((v & 0xF) as u8) << 4,
		])
		.collect()
}


fn nibble_swap(data: &[u8]) -> Vec<u8> {
	data.iter()
		.map(|&v| (v >> 4) | (v << 4))
		.collect()
}


#[cfg(test)]
fn linear(format: crate::TextureFormat, width: u16, height: u16, data_size: u32) -> TextureDescriptor {
	TextureDescriptor::new(format, crate::TextureType::Linear, width, height, data_size).unwrap()
}


#[test]
fn unpack_reads_exactly_data_size() {
	use std::io::Cursor;

	let descriptor = linear(crate::TextureFormat::U8_1RRR, 2, 1, 2);
	let mut input = Cursor::new(vec![0x10u8, 0x20, 0x30]);
	let out = unpack(&mut input, &descriptor).unwrap();
	assert_eq!(out, vec![0x10, 0x10, 0x10, 0xFF, 0x20, 0x20, 0x20, 0xFF]);
	assert_eq!(input.position(), 2);

	let mut short = Cursor::new(vec![0x10u8]);
	assert!(matches!(unpack(&mut short, &descriptor), Err(crate::TxpError::MalformedContainerRecord)));
}


#[test]
fn unpack_byte_families() {
	use crate::TextureFormat::*;

	let d = linear(U8_R000, 1, 1, 1);
	assert_eq!(UnpackProvider::AlphaOnly.unpack_slice(&[0x80], &d).unwrap(), vec![0, 0, 0, 0x80]);

	let d = linear(U8U8_RGGG, 1, 1, 2);
	assert_eq!(UnpackProvider::LuminanceAlpha.unpack_slice(&[0x40, 0xC0], &d).unwrap(), vec![0xC0, 0xC0, 0xC0, 0x40]);

	let d = linear(U8U8_00GR, 1, 1, 3);
	assert_eq!(UnpackProvider::RedGreen.unpack_slice(&[0x11, 0x22, 0x33], &d).unwrap(), vec![0, 0x11, 0x22, 0]);

	let d = linear(U8U8U8X8_RGB1, 1, 1, 4);
	assert_eq!(UnpackProvider::OpaqueDirect.unpack_slice(&[1, 2, 3, 0], &d).unwrap(), vec![1, 2, 3, 0xFF]);

	let d = linear(P4_ABGR, 2, 1, 1);
	assert_eq!(UnpackProvider::NibbleSwap.unpack_slice(&[0x1F], &d).unwrap(), vec![0xF1]);
}


#[test]
fn unpack_argb4444_shifts() {
	let d = linear(crate::TextureFormat::U4U4U4U4_ARGB, 1, 1, 2);
	// v = 0xA321
	let out = UnpackProvider::Argb4444.unpack_slice(&[0x21, 0xA3], &d).unwrap();
	assert_eq!(out, vec![0x20, 0x30, 0xA0, 0x10]);
}
