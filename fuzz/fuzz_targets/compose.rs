#![no_main]
use libfuzzer_sys::fuzz_target;
use arbitrary::{
	Arbitrary,
	Unstructured,
	Result as ArbitraryResult,
};
use gxm_txp::{compose, unpack, FormatRegistry, Palette, TextureDescriptor, TextureFormat, TextureType};


#[derive(Debug)]
struct SurfaceFuzzer {
	format: TextureFormat,
	texture_type: TextureType,
	width: u16,
	height: u16,
	palette: Vec<u32>,
	data: Vec<u8>,
}

impl<'a> Arbitrary<'a> for SurfaceFuzzer {
	fn arbitrary(input: &mut Unstructured) -> ArbitraryResult<Self> {
		let format = <TextureFormat as Arbitrary>::arbitrary(input)?;
		let texture_type = <TextureType as Arbitrary>::arbitrary(input)?;

		// Keep surfaces small to avoid slow-unit fuzz artifacts.
		let width: u16 = input.int_in_range(0..=300)?;
		let height: u16 = input.int_in_range(0..=300)?;

		let palette_len: usize = input.int_in_range(0..=256)?;
		let palette = (0..palette_len)
			.map(|_| input.arbitrary())
			.collect::<ArbitraryResult<Vec<u32>>>()?;

		let data = <Vec<u8> as Arbitrary>::arbitrary(input)?;

		Ok(Self { format, texture_type, width, height, palette, data })
	}
}


fuzz_target!(|surface: SurfaceFuzzer| {
	let data_size = surface.data.len() as u32;
	let descriptor = match TextureDescriptor::new(surface.format, surface.texture_type, surface.width, surface.height, data_size) {
		Ok(d) => d,
		Err(_) => return,
	};

	let entry = FormatRegistry::global().lookup(surface.format.code()).unwrap();
	let decoded = match unpack(&mut &surface.data[..], &descriptor) {
		Ok(d) => d,
		Err(_) => return,
	};

	let palette = Palette::resolve(&surface.palette, surface.format.code()).ok();
	let image = compose(&decoded, entry.layout, &descriptor, palette.as_ref());
	assert_eq!(image.dimensions(), (surface.width.into(), surface.height.into()));
});
