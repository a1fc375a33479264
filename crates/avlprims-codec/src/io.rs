//! IO element groups.
//!
//! A record carries four independent groups of IO readings, one per value
//! width. Each group maps an IO id to a value and holds at most 255 entries.
//!
//! Groups keep insertion order (decode inserts in wire order), so re-encoding
//! a decoded group writes its entries back in the order they arrived.
//! Overwriting an existing id keeps its original position. Equality between
//! groups ignores order.

use std::fmt::Debug;

use bytes::{Buf, BufMut};
use tracing::debug;

use crate::error::{CodecError, Result};
use crate::wire::{ensure, read_u8};

/// Maximum number of distinct ids in one IO group.
pub const MAX_GROUP_ELEMENTS: usize = 255;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned IO value of a fixed wire width.
pub trait IoValue: Copy + PartialEq + Debug + Into<u64> + sealed::Sealed {
    /// Width of the value on the wire, in bytes.
    const WIDTH: usize;

    fn put(self, dst: &mut impl BufMut);

    fn get(src: &mut impl Buf) -> Self;
}

macro_rules! impl_io_value {
    ($ty:ty, $width:expr, $put:ident, $get:ident) => {
        impl IoValue for $ty {
            const WIDTH: usize = $width;

            fn put(self, dst: &mut impl BufMut) {
                dst.$put(self);
            }

            fn get(src: &mut impl Buf) -> Self {
                src.$get()
            }
        }
    };
}

impl_io_value!(u8, 1, put_u8, get_u8);
impl_io_value!(u16, 2, put_u16, get_u16);
impl_io_value!(u32, 4, put_u32, get_u32);
impl_io_value!(u64, 8, put_u64, get_u64);

/// IO readings of one value width, keyed by IO id.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "Vec<(u8, V)>",
        into = "Vec<(u8, V)>",
        bound(
            serialize = "V: IoValue + serde::Serialize",
            deserialize = "V: IoValue + serde::Deserialize<'de>"
        )
    )
)]
pub struct IoGroup<V> {
    entries: Vec<(u8, V)>,
}

impl<V> Default for IoGroup<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V: IoValue> IoGroup<V> {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a reading, replacing any existing value for `id`.
    ///
    /// Fails with `TooManyElements` when the group already holds 255 ids and
    /// `id` is not one of them.
    pub fn add(&mut self, id: u8, value: V) -> Result<()> {
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = value;
            return Ok(());
        }
        if self.entries.len() >= MAX_GROUP_ELEMENTS {
            return Err(CodecError::TooManyElements { width: V::WIDTH });
        }
        self.entries.push((id, value));
        Ok(())
    }

    /// Value stored for `id`, if any.
    pub fn get(&self, id: u8) -> Option<V> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, id: u8) -> bool {
        self.get(id).is_some()
    }

    /// Remove the reading for `id`, returning its value.
    pub fn remove(&mut self, id: u8) -> Option<V> {
        let index = self.entries.iter().position(|(existing, _)| *existing == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(id, value)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, V)> + '_ {
        self.entries.iter().copied()
    }

    /// Wire size: count byte plus one id byte and `V::WIDTH` value bytes per entry.
    pub fn encoded_len(&self) -> usize {
        1 + self.entries.len() * (1 + V::WIDTH)
    }

    /// Append the group to `dst`.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        if self.entries.len() > MAX_GROUP_ELEMENTS {
            return Err(CodecError::TooManyElements { width: V::WIDTH });
        }
        dst.put_u8(self.entries.len() as u8);
        for &(id, value) in &self.entries {
            dst.put_u8(id);
            value.put(dst);
        }
        Ok(())
    }

    /// Read a group from the front of `src`. Repeated ids keep the last value.
    pub fn decode(src: &mut impl Buf) -> Result<Self> {
        let count = usize::from(read_u8(src)?);
        ensure(src, count * (1 + V::WIDTH))?;

        let mut group = Self {
            entries: Vec::with_capacity(count),
        };
        for _ in 0..count {
            let id = src.get_u8();
            let value = V::get(src);
            group.add(id, value)?;
        }
        Ok(group)
    }
}

impl<V: IoValue> PartialEq for IoGroup<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(id, value)| other.get(id) == Some(value))
    }
}

impl<V: IoValue> TryFrom<Vec<(u8, V)>> for IoGroup<V> {
    type Error = CodecError;

    fn try_from(entries: Vec<(u8, V)>) -> Result<Self> {
        let mut group = Self::new();
        for (id, value) in entries {
            group.add(id, value)?;
        }
        Ok(group)
    }
}

impl<V> From<IoGroup<V>> for Vec<(u8, V)> {
    fn from(group: IoGroup<V>) -> Self {
        group.entries
    }
}

/// The IO part of a record: the triggering event id plus four width groups.
///
/// The same IO id may appear in several groups; widths are independent.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IoReadings {
    /// IO id that triggered the record, 0 when the record is periodic.
    /// Not required to reference an entry in the groups.
    pub event_io_id: u8,
    pub n1: IoGroup<u8>,
    pub n2: IoGroup<u16>,
    pub n4: IoGroup<u32>,
    pub n8: IoGroup<u64>,
}

impl IoReadings {
    pub fn new(event_io_id: u8) -> Self {
        Self {
            event_io_id,
            ..Self::default()
        }
    }

    pub fn add_n1(&mut self, id: u8, value: u8) -> Result<()> {
        self.n1.add(id, value)
    }

    pub fn add_n2(&mut self, id: u8, value: u16) -> Result<()> {
        self.n2.add(id, value)
    }

    pub fn add_n4(&mut self, id: u8, value: u32) -> Result<()> {
        self.n4.add(id, value)
    }

    pub fn add_n8(&mut self, id: u8, value: u64) -> Result<()> {
        self.n8.add(id, value)
    }

    /// Number of readings across all four groups.
    pub fn total_count(&self) -> usize {
        self.n1.len() + self.n2.len() + self.n4.len() + self.n8.len()
    }

    /// Wire size: event id, total count and the four groups.
    pub fn encoded_len(&self) -> usize {
        2 + self.n1.encoded_len()
            + self.n2.encoded_len()
            + self.n4.encoded_len()
            + self.n8.encoded_len()
    }

    /// Append the IO part of a record to `dst`.
    ///
    /// The total count field is a single byte and saturates at 255.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        dst.put_u8(self.event_io_id);
        dst.put_u8(u8::try_from(self.total_count()).unwrap_or(u8::MAX));
        self.n1.encode(dst)?;
        self.n2.encode(dst)?;
        self.n4.encode(dst)?;
        self.n8.encode(dst)
    }

    /// Read the IO part of a record from the front of `src`.
    pub fn decode(src: &mut impl Buf) -> Result<Self> {
        let event_io_id = read_u8(src)?;
        let declared_total = read_u8(src)?;
        let readings = Self {
            event_io_id,
            n1: IoGroup::decode(src)?,
            n2: IoGroup::decode(src)?,
            n4: IoGroup::decode(src)?,
            n8: IoGroup::decode(src)?,
        };

        if usize::from(declared_total) != readings.total_count() {
            debug!(
                declared = declared_total,
                actual = readings.total_count(),
                "IO total count differs from group sizes"
            );
        }
        Ok(readings)
    }
}
