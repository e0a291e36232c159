use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::codec::encode_to;
use crate::error::{CodecError, Result};
use crate::person::Person;

const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Writes complete records to any `Write` stream.
pub struct RecordWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> RecordWriter<T> {
    /// Create a new record writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Encode and write a complete record (blocking).
    ///
    /// Nothing is written when the record cannot be encoded.
    pub fn write_record(&mut self, person: &Person) -> Result<()> {
        self.buf.clear();
        encode_to(person, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(CodecError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::codec::decode_prefix;
    use crate::person::MAX_NAME_LEN;

    #[test]
    fn writes_back_to_back_records() {
        let mut writer = RecordWriter::new(Vec::new());
        writer.write_record(&Person::new(20, "tom")).unwrap();
        writer.write_record(&Person::new(21, "Betty")).unwrap();

        let bytes = writer.into_inner();
        assert_eq!(bytes.len(), 12 + 14);

        let (first, rest) = decode_prefix(&bytes).unwrap();
        let (second, rest) = decode_prefix(rest).unwrap();
        assert_eq!(first, Person::new(20, "tom"));
        assert_eq!(second, Person::new(21, "Betty"));
        assert!(rest.is_empty());
    }

    #[test]
    fn oversized_name_writes_nothing() {
        let mut writer = RecordWriter::new(Vec::new());
        let err = writer
            .write_record(&Person::new(1, vec![b'x'; MAX_NAME_LEN + 1]))
            .unwrap_err();

        assert!(matches!(err, CodecError::FieldTooLarge { .. }));
        assert!(writer.get_ref().is_empty());
    }

    #[test]
    fn zero_write_is_connection_closed() {
        let mut writer = RecordWriter::new(ZeroWriter);
        let err = writer.write_record(&Person::new(1, "a")).unwrap_err();
        assert!(matches!(err, CodecError::ConnectionClosed));
    }

    #[test]
    fn short_and_interrupted_writes_complete() {
        let mut writer = RecordWriter::new(ChoppyWriter {
            out: Vec::new(),
            calls: 0,
        });
        writer.write_record(&Person::new(30, "Tom")).unwrap();

        let out = &writer.get_mut().out;
        assert_eq!(out.len(), 12);
        assert_eq!(decode_prefix(out).unwrap().0, Person::new(30, "Tom"));
    }

    #[test]
    fn io_error_propagates() {
        let mut writer = RecordWriter::new(BrokenWriter);
        let err = writer.write_record(&Person::new(1, "a")).unwrap_err();
        assert!(matches!(err, CodecError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct ChoppyWriter {
        out: Vec<u8>,
        calls: usize,
    }

    impl Write for ChoppyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.calls % 2 == 1 {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let n = buf.len().min(5);
            self.out.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
