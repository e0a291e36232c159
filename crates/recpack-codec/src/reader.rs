use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::codec::decode_record;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::person::Person;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads back-to-back records from any `Read` stream.
///
/// Handles partial reads internally — callers always get complete records.
pub struct RecordReader<T> {
    inner: T,
    buf: BytesMut,
    config: CodecConfig,
}

impl<T: Read> RecordReader<T> {
    /// Create a new record reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new record reader with explicit configuration.
    pub fn with_config(inner: T, config: CodecConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete record (blocking).
    ///
    /// Returns `Err(CodecError::ConnectionClosed)` when EOF is reached.
    pub fn read_record(&mut self) -> Result<Person> {
        loop {
            match decode_record(&mut self.buf, &self.config) {
                Ok(Some(person)) => return Ok(person),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        buffered = self.buf.len(),
                        "rejecting record stream"
                    );
                    return Err(err);
                }
            }

            if self.fill()? == 0 {
                return Err(CodecError::ConnectionClosed);
            }
        }
    }

    /// Iterate over records until the stream ends cleanly between records.
    ///
    /// EOF in the middle of a record still yields `ConnectionClosed`.
    pub fn records(&mut self) -> Records<'_, T> {
        Records {
            reader: self,
            done: false,
        }
    }

    /// Bytes read from the stream but not yet decoded.
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current record reader configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn fill(&mut self) -> Result<usize> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            match self.inner.read(&mut chunk) {
                Ok(n) => {
                    self.buf.extend_from_slice(&chunk[..n]);
                    return Ok(n);
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
    }
}

/// Iterator returned by [`RecordReader::records`].
pub struct Records<'a, T> {
    reader: &'a mut RecordReader<T>,
    done: bool,
}

impl<T: Read> Iterator for Records<'_, T> {
    type Item = Result<Person>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_record() {
            Ok(person) => Some(Ok(person)),
            Err(CodecError::ConnectionClosed) if self.reader.buf.is_empty() => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
