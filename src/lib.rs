#![warn(missing_docs, unreachable_pub, clippy::all)]
#![allow(clippy::wildcard_imports, clippy::enum_glob_use)]
#![warn(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]


#![doc = include_str!("../README.md")]


mod macros;
mod format;
mod descriptor;
mod pixel;
mod unpack;
mod palette;
mod rearrange;
mod block;
mod compose;
mod entry;
mod sidecar;
mod table;

pub use format::*;
pub use descriptor::*;
pub use unpack::*;
pub use palette::*;
pub use rearrange::*;
pub use block::*;
pub use compose::*;
pub use entry::*;
pub use sidecar::*;
pub use table::*;


use std::io::Read;
#[cfg(test)] use std::io::Cursor;

use derive_more::{Display, Error};
#[cfg(test)] use static_assertions::assert_impl_all;

use TxpError::*;


/// [`std::result::Result`] parameterized with [`TxpError`]
pub type TxpResult<T> = Result<T, TxpError>;


/// `gxm_txp`'s [`std::error::Error`]
#[derive(Debug, Display, Error, Clone)]
#[non_exhaustive]
pub enum TxpError {
	/// Format code is not present in the [`FormatRegistry`].
	#[display(fmt = "Unsupported texture format: {:#010X}", _0)]
	UnsupportedFormat(#[error(ignore)] u32),

	/// Palette arrangement was requested for a format code that is not an
	/// indexed (P4/P8) format.
	#[display(fmt = "Unsupported palette arrangement for format {:#010X}", _0)]
	UnsupportedPaletteArrangement(#[error(ignore)] u32),

	/// Texture type word or entry type code is unknown.
	#[display(fmt = "Unsupported texture type: {:#X}", _0)]
	UnsupportedTextureType(#[error(ignore)] u32),

	/// An entry record or the data it points at is truncated.
	#[display(fmt = "Malformed or truncated container record")]
	MalformedContainerRecord,

	/// Unexpected I/O error that is not UnexpectedEof.
	#[display(fmt = "Unexpected I/O error: {}", _0)]
	UnexpectedIoError(#[error(ignore)] std::io::ErrorKind),

	/// Unexpected integer conversion error.
	#[display(fmt = "Unexpected integer conversion error: {}", _0)]
	UnexpectedTryFromIntError(std::num::TryFromIntError),

	/// Texture dimensions (actual or rounded) do not fit in a [`u16`].
	#[display(fmt = "Texture dimensions do not fit in 16 bits")]
	DimensionsTooLarge,

	/// A block decoder rejected its input.
	#[display(fmt = "Block decoding failed: {}", _0)]
	BlockDecodeError(#[error(ignore)] String),

	/// Reading or writing an image file failed.
	#[display(fmt = "Image error: {}", _0)]
	ImageError(#[error(ignore)] String),

	/// Reading or writing an entry sidecar failed.
	#[display(fmt = "Sidecar metadata error: {}", _0)]
	MetadataError(#[error(ignore)] String),

	/// Entry path contains characters that Shift-JIS cannot represent.
	#[display(fmt = "Path cannot be encoded as Shift-JIS: {}", _0)]
	UnencodablePath(#[error(ignore)] String),

	/// Serializing an entry record failed.
	#[display(fmt = "Could not serialize entry record: {}", _0)]
	RecordSerializationError(#[error(ignore)] String),

	/// A checked arithmetic operation triggered an unexpected under/overflow.
	#[display(fmt = "A checked arithmetic operation triggered an unexpected under/overflow")]
	ArithmeticOverflow,
}


impl From<std::io::Error> for TxpError {
	fn from(error: std::io::Error) -> Self {
		match error.kind() {
			std::io::ErrorKind::UnexpectedEof => MalformedContainerRecord,
			kind => UnexpectedIoError(kind),
		}
	}
}


impl From<std::num::TryFromIntError> for TxpError {
	fn from(error: std::num::TryFromIntError) -> Self {
		UnexpectedTryFromIntError(error)
	}
}


trait ReadExt: Read {
	const SINGLE_READ_SIZE: usize = 4096;

	fn read_exact_buffered(&mut self, len: usize) -> TxpResult<Vec<u8>> {
		let mut data: Vec<u8> = Vec::with_capacity(std::cmp::min(len, Self::SINGLE_READ_SIZE));
		let mut total = 0usize;

		loop {
			if total == len {
				break;
			};

			let bufsize = std::cmp::min(Self::SINGLE_READ_SIZE, len-total);
			let mut buf = vec![0u8; bufsize];
			self.read_exact(&mut buf)?;
			data.extend(&buf[..]);
			total += bufsize;
		};

		Ok(data)
	}
}


impl<T> ReadExt for T where T: Read { }


#[test]
fn test_read_exact_buffered() {
	let mut input = Cursor::new(vec![0x41u8, 0x42, 0x43, 0x44, 0x45, 0x46]);
	assert_eq!(input.read_exact_buffered(1).unwrap(), vec![0x41u8]);
	assert_eq!(input.read_exact_buffered(2).unwrap(), vec![0x42u8, 0x43]);
	assert!(matches!(input.read_exact_buffered(4), Err(MalformedContainerRecord)));
}


#[test]
fn assert_traits() {
	use std::fmt::{Debug, Display};
	use std::error::Error;
	use std::panic::{UnwindSafe, RefUnwindSafe};

	assert_impl_all!(TxpError: Debug, Display, Error, Send, Sync, UnwindSafe, RefUnwindSafe);
}
