//! Reorder tiled and swizzled surfaces into row-major order.
//!
//! Both functions take the whole stored surface (`width x height` elements of
//! the given layout) and return a buffer of the same length.  Elements are
//! moved at the layout's granularity: 4-bit layouts move nibbles, with the
//! high nibble holding the even element.  Elements whose source or target
//! lies outside the buffer are left out.

use crate::format::PixelLayout;


const TILE_EDGE: usize = 32;


/// Convert a surface stored as row-major 32x32 tiles into row-major pixels.
///
/// # Example
/// ```
/// # use gxm_txp::{untile, PixelLayout};
/// let tiled: Vec<u8> = (0..64u32 * 32).map(|i| (i / 1024) as u8).collect();
/// let linear = untile(&tiled, 64, 32, PixelLayout::Indexed8);
/// assert_eq!(&linear[30..34], &[0, 0, 1, 1]);
/// ```
pub fn untile(data: &[u8], width: u32, height: u32, layout: PixelLayout) -> Vec<u8> {
	let width = width as usize;
	let height = height as usize;
	let tiles_per_row = (width + TILE_EDGE - 1) / TILE_EDGE;

	rearrange(data, width, height, layout, |index| {
		let tile = index / (TILE_EDGE * TILE_EDGE);
		let within = index % (TILE_EDGE * TILE_EDGE);
		let x = (tile % tiles_per_row) * TILE_EDGE + within % TILE_EDGE;
		let y = (tile / tiles_per_row) * TILE_EDGE + within / TILE_EDGE;
		(x, y)
	})
}


/// Convert a Morton (Z-order) swizzled surface into row-major pixels.
///
/// The surface is split into squares with the edge of its shorter side;
/// each square is Z-ordered and squares follow each other along the longer
/// side.
///
/// # Example
/// ```
/// # use gxm_txp::{unswizzle, PixelLayout};
/// let swizzled: Vec<u8> = (0..16).collect();
/// let linear = unswizzle(&swizzled, 4, 4, PixelLayout::Indexed8);
/// assert_eq!(linear, vec![0, 1, 4, 5, 2, 3, 6, 7, 8, 9, 12, 13, 10, 11, 14, 15]);
/// ```
pub fn unswizzle(data: &[u8], width: u32, height: u32, layout: PixelLayout) -> Vec<u8> {
	let width = width as usize;
	let height = height as usize;

	let shorter = std::cmp::min(width, height);
	if shorter == 0 {
		return data.to_vec();
	};

	// Largest power of two that fits the shorter side.
	let edge = 1usize << (usize::BITS - 1 - shorter.leading_zeros());
	let square = edge * edge;
	let wide = width >= height;

	rearrange(data, width, height, layout, |index| {
		let block = index / square;
		let within = index % square;
		let mx = compact_bits(within);
		let my = compact_bits(within >> 1);

		if wide {
			(block * edge + mx, my)
		}
		else {
			(mx, block * edge + my)
		}
	})
}


fn rearrange<F>(data: &[u8], width: usize, height: usize, layout: PixelLayout, position_of: F) -> Vec<u8>
where
	F: Fn(usize) -> (usize, usize),
{
	let bits = layout.bits_per_pixel();
	let mut result = vec![0u8; data.len()];

	let Some(surface) = width.checked_mul(height) else { return result };
	let count = std::cmp::min(surface, data.len().saturating_mul(8) / bits);

	for source in 0..count {
		let (x, y) = position_of(source);
		if x >= width || y >= height {
			continue;
		};

		copy_element(data, &mut result, source, y * width + x, bits);
	};

	result
}


fn copy_element(source: &[u8], target: &mut [u8], from: usize, to: usize, bits: usize) {
	if bits == 4 {
		let (Some(&byte), Some(slot)) = (source.get(from / 2), target.get_mut(to / 2)) else { return };
		let nibble = if from % 2 == 0 { byte >> 4 } else { byte & 0x0F };

		*slot = if to % 2 == 0 {
			(*slot & 0x0F) | (nibble << 4)
		}
		else {
			(*slot & 0xF0) | nibble
		};

		return;
	};

	let size = bits / 8;
	let from = from * size;
	let to = to * size;

	if let (Some(s), Some(t)) = (source.get(from..from + size), target.get_mut(to..to + size)) {
		t.copy_from_slice(s);
	};
}


// Gather the even bits of `value` into the low half.
fn compact_bits(value: usize) -> usize {
	let mut v = (value as u64) & 0x5555_5555_5555_5555;
	v = (v | (v >> 1)) & 0x3333_3333_3333_3333;
	v = (v | (v >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
	v = (v | (v >> 4)) & 0x00FF_00FF_00FF_00FF;
	v = (v | (v >> 8)) & 0x0000_FFFF_0000_FFFF;
	v = (v | (v >> 16)) & 0x0000_0000_FFFF_FFFF;
	v as usize
}


#[test]
fn unswizzle_wide_and_tall() {
	let data: Vec<u8> = (0..8).collect();
	assert_eq!(unswizzle(&data, 4, 2, PixelLayout::Indexed8), vec![0, 1, 4, 5, 2, 3, 6, 7]);
	assert_eq!(unswizzle(&data, 2, 4, PixelLayout::Indexed8), vec![0, 1, 2, 3, 4, 5, 6, 7]);
}


#[test]
fn unswizzle_direct32_moves_whole_pixels() {
	let data: Vec<u8> = (0..16).collect();
	let out = unswizzle(&data, 2, 2, PixelLayout::Direct32);
	assert_eq!(out, data);

	let data: Vec<u8> = (0..16u8).flat_map(|i| [i, i, i, i]).collect();
	let out = unswizzle(&data, 4, 4, PixelLayout::Direct32);
	assert_eq!(&out[8..16], &[4, 4, 4, 4, 5, 5, 5, 5]);
}


#[test]
fn unswizzle_nibbles() {
	// Elements 0..16 packed two per byte, high nibble first.
	let data: Vec<u8> = (0..8u8).map(|i| (2 * i) << 4 | (2 * i + 1)).collect();
	let out = unswizzle(&data, 4, 4, PixelLayout::Indexed4);
	assert_eq!(out, vec![0x01, 0x45, 0x23, 0x67, 0x89, 0xCD, 0xAB, 0xEF]);
}


#[test]
fn untile_second_tile_row() {
	let data: Vec<u8> = (0..32u32 * 64).map(|i| (i / 1024) as u8).collect();
	let out = untile(&data, 32, 64, PixelLayout::Indexed8);
	assert_eq!(out[31 * 32], 0);
	assert_eq!(out[32 * 32], 1);
}


#[test]
fn short_buffers_are_skipped() {
	let data = vec![1u8, 2, 3];
	assert_eq!(unswizzle(&data, 2, 2, PixelLayout::Indexed8), vec![1, 2, 3]);
	assert_eq!(untile(&[], 32, 32, PixelLayout::Direct32), Vec::<u8>::new());
}


#[test]
fn huge_surface_with_little_data() {
	let out = unswizzle(&[1, 2, 3, 4], 1 << 20, 1 << 20, PixelLayout::Indexed8);
	assert_eq!(out, vec![1, 2, 0, 0]);
}
