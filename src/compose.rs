use crate::descriptor::{TextureDescriptor, TextureType};
use crate::format::PixelLayout;
use crate::palette::Palette;
use crate::rearrange::{untile, unswizzle};

use std::borrow::Cow;

use image::{Rgba, RgbaImage};


/// Build the final `width x height` image from an unpacked buffer.
///
/// Tiled and swizzled surfaces (other than block-compressed ones, whose
/// decoders already produce row-major pixels) are rearranged first.  Pixel
/// `(x, y)` is read at element `y * rounded_width + x`; pixels whose bytes
/// are missing from `decoded`, and palette indices with no palette or outside
/// of it, stay transparent black.
///
/// # Example
/// ```
/// # use gxm_txp::*;
/// let descriptor = TextureDescriptor::new(TextureFormat::U8U8U8U8_ARGB, TextureType::Linear, 2, 1, 8).unwrap();
/// let image = compose(&[1, 2, 3, 4, 5, 6, 7, 8], PixelLayout::Direct32, &descriptor, None);
/// assert_eq!(image.get_pixel(0, 0).0, [3, 2, 1, 4]);
/// assert_eq!(image.get_pixel(1, 0).0, [7, 6, 5, 8]);
/// ```
pub fn compose(decoded: &[u8], layout: PixelLayout, descriptor: &TextureDescriptor, palette: Option<&Palette>) -> RgbaImage {
	let width = u32::from(descriptor.width);
	let height = u32::from(descriptor.height);
	let surface_width = std::cmp::max(u32::from(descriptor.rounded_width), width);
	let surface_height = std::cmp::max(u32::from(descriptor.rounded_height), height);

	let data: Cow<'_, [u8]> = match descriptor.texture_type {
		_ if descriptor.format.is_block_compressed() => Cow::Borrowed(decoded),
		TextureType::Tiled => Cow::Owned(untile(decoded, surface_width, surface_height, layout)),
		t if t.is_swizzled() => Cow::Owned(unswizzle(decoded, surface_width, surface_height, layout)),
		_ => Cow::Borrowed(decoded),
	};

	// Only the visible top-left corner of the surface is sampled.
	let mut image = RgbaImage::new(width, height);
	let stride = surface_width as usize;

	for (x, y, pixel) in image.enumerate_pixels_mut() {
		let index = y as usize * stride + x as usize;

		if let Some(color) = sample(&data, layout, index, x, palette) {
			*pixel = color;
		};
	};

	image
}


fn sample(data: &[u8], layout: PixelLayout, index: usize, x: u32, palette: Option<&Palette>) -> Option<Rgba<u8>> {
	match layout {
		PixelLayout::Direct32 => {
			let offset = index.checked_mul(4)?;
			let p = data.get(offset..offset + 4)?;
			Some(Rgba([p[2], p[1], p[0], p[3]]))
		},

		PixelLayout::Direct24 => {
			let offset = index.checked_mul(3)?;
			let p = data.get(offset..offset + 3)?;
			Some(Rgba([p[2], p[1], p[0], 0xFF]))
		},

		PixelLayout::Indexed8 => {
			let color_index = *data.get(index)?;
			palette?.get(color_index.into())
		},

		PixelLayout::Indexed4 => {
			let byte = *data.get(index / 2)?;
			let color_index = if x % 2 == 0 { byte >> 4 } else { byte & 0x0F };
			palette?.get(color_index.into())
		},
	}
}


#[cfg(test)]
fn linear(format: crate::TextureFormat, width: u16, height: u16, data_size: u32) -> TextureDescriptor {
	TextureDescriptor::new(format, TextureType::Linear, width, height, data_size).unwrap()
}


#[test]
fn output_is_cropped() {
	let mut descriptor = linear(crate::TextureFormat::U8U8U8U8_ARGB, 3, 2, 4 * 4 * 4);
	descriptor.rounded_width = 4;
	descriptor.rounded_height = 4;

	let decoded: Vec<u8> = (0..16u8).flat_map(|i| [i, i, i, 0xFF]).collect();
	let image = compose(&decoded, PixelLayout::Direct32, &descriptor, None);
	assert_eq!(image.dimensions(), (3, 2));
	assert_eq!(image.get_pixel(2, 1).0, [6, 6, 6, 0xFF]);
}


#[test]
fn direct24_is_opaque() {
	let descriptor = linear(crate::TextureFormat::U8U8U8_RGB, 1, 1, 3);
	let image = compose(&[0x10, 0x20, 0x30], PixelLayout::Direct24, &descriptor, None);
	assert_eq!(image.get_pixel(0, 0).0, [0x30, 0x20, 0x10, 0xFF]);
}


#[test]
fn short_buffer_keeps_default() {
	let descriptor = linear(crate::TextureFormat::U8U8U8U8_ARGB, 2, 1, 6);
	let image = compose(&[1, 2, 3, 4, 5, 6], PixelLayout::Direct32, &descriptor, None);
	assert_eq!(image.get_pixel(0, 0).0, [3, 2, 1, 4]);
	assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0, 0]);
}


#[test]
fn indexed8_palette_bounds() {
	let palette = Palette::with_colors(vec![Rgba([1, 2, 3, 4]), Rgba([5, 6, 7, 8])]);
	let descriptor = linear(crate::TextureFormat::P8_ABGR, 3, 1, 3);
	let image = compose(&[1, 2, 0], PixelLayout::Indexed8, &descriptor, Some(&palette));
	assert_eq!(image.get_pixel(0, 0).0, [5, 6, 7, 8]);
	assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0, 0]);
	assert_eq!(image.get_pixel(2, 0).0, [1, 2, 3, 4]);

	let image = compose(&[1, 2, 0], PixelLayout::Indexed8, &descriptor, None);
	assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
}


#[test]
fn indexed4_nibble_order() {
	let colors = (0..16u8).map(|i| Rgba([i, i, i, 0xFF])).collect();
	let palette = Palette::with_colors(colors);
	let descriptor = linear(crate::TextureFormat::P4_ABGR, 2, 1, 1);
	let image = compose(&[0x3A], PixelLayout::Indexed4, &descriptor, Some(&palette));
	assert_eq!(image.get_pixel(0, 0).0, [3, 3, 3, 0xFF]);
	assert_eq!(image.get_pixel(1, 0).0, [10, 10, 10, 0xFF]);
}


#[test]
fn swizzled_surface_is_rearranged() {
	let palette = Palette::with_colors((0..=255u8).map(|i| Rgba([i, 0, 0, 0xFF])).collect());
	let descriptor = TextureDescriptor::new(crate::TextureFormat::P8_ABGR, TextureType::Swizzled, 4, 4, 16).unwrap();
	let decoded: Vec<u8> = (0..16).collect();
	let image = compose(&decoded, PixelLayout::Indexed8, &descriptor, Some(&palette));
	assert_eq!(image.get_pixel(2, 0).0, [4, 0, 0, 0xFF]);
	assert_eq!(image.get_pixel(0, 1).0, [2, 0, 0, 0xFF]);
}


#[test]
fn block_formats_are_never_rearranged() {
	let decoded: Vec<u8> = (0..64u8).flat_map(|i| [i, i, i, 0xFF]).collect();

	let linear = TextureDescriptor::new(crate::TextureFormat::UBC1_ABGR, TextureType::Linear, 8, 8, 32).unwrap();
	let swizzled = TextureDescriptor::new(crate::TextureFormat::UBC1_ABGR, TextureType::Swizzled, 8, 8, 32).unwrap();
	assert_eq!(
		compose(&decoded, PixelLayout::Direct32, &swizzled, None),
		compose(&decoded, PixelLayout::Direct32, &linear, None));

	let direct_linear = TextureDescriptor::new(crate::TextureFormat::U8U8U8U8_ARGB, TextureType::Linear, 8, 8, 256).unwrap();
	let direct_swizzled = TextureDescriptor::new(crate::TextureFormat::U8U8U8U8_ARGB, TextureType::Swizzled, 8, 8, 256).unwrap();
	assert_ne!(
		compose(&decoded, PixelLayout::Direct32, &direct_swizzled, None),
		compose(&decoded, PixelLayout::Direct32, &direct_linear, None));
}


#[test]
fn tiled_surface_crosses_tile_boundary() {
	let palette = Palette::with_colors((0..=255u8).map(|i| Rgba([i, 0, 0, 0xFF])).collect());
	let descriptor = TextureDescriptor::new(crate::TextureFormat::P8_ABGR, TextureType::Tiled, 40, 1, 64 * 32).unwrap();
	assert_eq!((descriptor.rounded_width, descriptor.rounded_height), (64, 32));

	// Row 0 of tile 0 ends at byte 31, row 0 of tile 1 starts at byte 1024.
	let mut decoded = vec![0u8; 64 * 32];
	decoded[31] = 7;
	decoded[1024] = 9;
	decoded[1024 + 7] = 11;

	let image = compose(&decoded, PixelLayout::Indexed8, &descriptor, Some(&palette));
	assert_eq!(image.dimensions(), (40, 1));
	assert_eq!(image.get_pixel(31, 0).0, [7, 0, 0, 0xFF]);
	assert_eq!(image.get_pixel(32, 0).0, [9, 0, 0, 0xFF]);
	assert_eq!(image.get_pixel(39, 0).0, [11, 0, 0, 0xFF]);
}


#[test]
fn swizzle_variants_compose_alike() {
	let palette = Palette::with_colors((0..=255u8).map(|i| Rgba([i, 0, 0, 0xFF])).collect());
	let decoded: Vec<u8> = (0..16).collect();

	let image_for = |texture_type| {
		let descriptor = TextureDescriptor::new(crate::TextureFormat::P8_ABGR, texture_type, 4, 4, 16).unwrap();
		compose(&decoded, PixelLayout::Indexed8, &descriptor, Some(&palette))
	};

	let swizzled = image_for(TextureType::Swizzled);
	assert_eq!(image_for(TextureType::Cube), swizzled);
	assert_eq!(image_for(TextureType::UnknownSwizzleVariant), swizzled);
	assert_ne!(image_for(TextureType::Linear), swizzled);
}


#[test]
fn large_stored_surface_with_small_image() {
	let mut descriptor = linear(crate::TextureFormat::U8U8U8U8_ARGB, 2, 2, 0);
	descriptor.rounded_width = 60000;
	descriptor.rounded_height = 60000;

	let image = compose(&[], PixelLayout::Direct32, &descriptor, None);
	assert_eq!(image.dimensions(), (2, 2));
	assert!(image.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}
