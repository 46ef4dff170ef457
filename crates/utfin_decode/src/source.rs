//! Raw byte sources feeding the decode filter.

use std::io::{self, Read};

/// Outcome of a single raw read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawRead {
    /// This many bytes were written to the front of the buffer.
    Data(usize),
    /// The source is exhausted.
    End,
}

/// A sequential source of raw, undecoded bytes.
///
/// Implemented for every [`io::Read`]: a zero-length read is end of stream
/// and `Interrupted` errors are retried.
pub trait ByteSource {
    fn read_raw(&mut self, buf: &mut [u8]) -> io::Result<RawRead>;
}

impl<R: Read + ?Sized> ByteSource for R {
    fn read_raw(&mut self, buf: &mut [u8]) -> io::Result<RawRead> {
        loop {
            match self.read(buf) {
                Ok(0) => return Ok(RawRead::End),
                Ok(n) => return Ok(RawRead::Data(n)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}
