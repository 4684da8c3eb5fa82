//! Helpers for tests.
use std::io;

use rmp::Marker;

/// A decoded MessagePack value, limited to the value types the encoder writes.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bin(Vec<u8>),
    Array(Vec<Value>),
}

impl Value {
    pub fn as_int(&self) -> i64 {
        match self {
            Self::Int(v) => *v,
            other => panic!("expected integer, got {:?}", other),
        }
    }

    pub fn as_array(&self) -> &[Value] {
        match self {
            Self::Array(values) => values,
            other => panic!("expected array, got {:?}", other),
        }
    }

    pub fn as_bin(&self) -> &[u8] {
        match self {
            Self::Bin(data) => data,
            other => panic!("expected bytes, got {:?}", other),
        }
    }
}

/// Reads a single value from the front of the buffer, advancing it.
///
/// Arrays are read element by element, so an array whose header announces more elements than actually follow will
/// fail to read, and one that announces fewer will leave the extra elements behind in the buffer.
pub fn read_value(rd: &mut &[u8]) -> Value {
    let marker = Marker::from_u8(*rd.first().expect("unexpected end of buffer"));
    match marker {
        Marker::FixPos(_)
        | Marker::FixNeg(_)
        | Marker::U8
        | Marker::U16
        | Marker::U32
        | Marker::U64
        | Marker::I8
        | Marker::I16
        | Marker::I32
        | Marker::I64 => Value::Int(rmp::decode::read_int(rd).expect("should not fail to read integer")),
        Marker::F64 => Value::Float(rmp::decode::read_f64(rd).expect("should not fail to read float")),
        Marker::Bin8 | Marker::Bin16 | Marker::Bin32 => {
            let len = rmp::decode::read_bin_len(rd).expect("should not fail to read bytes length") as usize;
            assert!(rd.len() >= len, "bytes length {} exceeds remaining buffer {}", len, rd.len());
            let (data, rest) = rd.split_at(len);
            *rd = rest;
            Value::Bin(data.to_vec())
        }
        Marker::FixArray(_) | Marker::Array16 | Marker::Array32 => {
            let len = rmp::decode::read_array_len(rd).expect("should not fail to read array length");
            Value::Array((0..len).map(|_| read_value(rd)).collect())
        }
        other => panic!("unexpected marker {:?}", other),
    }
}

/// Reads all values in the buffer.
pub fn read_all(mut buf: &[u8]) -> Vec<Value> {
    let mut values = Vec::new();
    while !buf.is_empty() {
        values.push(read_value(&mut buf));
    }
    values
}

/// A writer that fails a single, specific write call.
///
/// Write calls are counted from zero. All other calls append to an in-memory buffer.
#[derive(Debug, Default)]
pub struct FaultyWriter {
    written: Vec<u8>,
    fail_at: Option<usize>,
    attempts: usize,
}

impl FaultyWriter {
    pub fn fail_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Default::default()
        }
    }

    pub fn never_fail() -> Self {
        Self::default()
    }

    /// Gets the number of write calls made so far, including the failed one.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl io::Write for FaultyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let attempt = self.attempts;
        self.attempts += 1;

        if self.fail_at == Some(attempt) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected failure"));
        }

        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
