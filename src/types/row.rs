use serde::{Deserialize, Serialize};

use crate::types::value::DataType;

/// One field slot inside a row buffer: a presence byte followed by a
/// fixed-width payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSlot {
    pub offset: usize,
    pub data_type: DataType,
    pub nullable: bool,
}

/// Byte layout of a materialized row, computed once per schema. Every row
/// of a given table occupies exactly `size()` bytes, which is also the size
/// of the per-worker scratch buffers that rows are read into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    fields: Vec<FieldSlot>,
    size: usize,
}

impl RowLayout {
    pub fn new(fields: &[(DataType, bool)]) -> Self {
        let mut slots = Vec::with_capacity(fields.len());
        let mut offset = 0;
        for &(data_type, nullable) in fields {
            slots.push(FieldSlot {
                offset,
                data_type,
                nullable,
            });
            offset += 1 + data_type.row_width();
        }
        Self {
            fields: slots,
            size: offset,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, index: usize) -> &FieldSlot {
        &self.fields[index]
    }

    pub fn alloc_buffer(&self) -> Vec<u8> {
        vec![0u8; self.size]
    }
}

fn slot_for<'a>(layout: &'a RowLayout, index: usize, expected: DataType) -> &'a FieldSlot {
    debug_assert!(
        index < layout.num_fields(),
        "field index {index} out of bounds (fields: {})",
        layout.num_fields()
    );
    let slot = layout.field(index);
    debug_assert_eq!(
        slot.data_type, expected,
        "field {index} is {:?}, accessed as {:?}",
        slot.data_type, expected
    );
    slot
}

/// Typed write access to a row buffer through its layout. Field indexes and
/// types are checked in debug builds.
pub struct RowWriter<'a> {
    layout: &'a RowLayout,
    buf: &'a mut [u8],
}

impl<'a> RowWriter<'a> {
    pub fn new(layout: &'a RowLayout, buf: &'a mut [u8]) -> Self {
        debug_assert!(
            buf.len() >= layout.size(),
            "row buffer too small for layout"
        );
        Self { layout, buf }
    }

    fn write_fixed(&mut self, index: usize, expected: DataType, payload: &[u8]) {
        let slot = slot_for(self.layout, index, expected);
        self.buf[slot.offset] = 1;
        self.buf[slot.offset + 1..slot.offset + 1 + payload.len()].copy_from_slice(payload);
    }

    pub fn set_tinyint(&mut self, index: usize, value: i8) {
        self.write_fixed(index, DataType::TinyInt, &value.to_le_bytes());
    }

    pub fn set_smallint(&mut self, index: usize, value: i16) {
        self.write_fixed(index, DataType::SmallInt, &value.to_le_bytes());
    }

    pub fn set_integer(&mut self, index: usize, value: i32) {
        self.write_fixed(index, DataType::Integer, &value.to_le_bytes());
    }

    pub fn set_decimal(&mut self, index: usize, value: f64) {
        self.write_fixed(index, DataType::Decimal, &value.to_le_bytes());
    }

    pub fn set_timestamp(&mut self, index: usize, value: i64) {
        self.write_fixed(index, DataType::Timestamp, &value.to_le_bytes());
    }

    pub fn set_varchar(&mut self, index: usize, value: &str) {
        let slot = *slot_for_varchar(self.layout, index);
        let max = slot
            .data_type
            .max_varlen_size()
            .expect("varchar slot has a declared maximum") as usize;
        debug_assert!(
            value.len() <= max,
            "varchar value of {} bytes exceeds declared maximum {max}",
            value.len()
        );
        self.buf[slot.offset] = 1;
        let payload = slot.offset + 1;
        self.buf[payload..payload + 2].copy_from_slice(&(value.len() as u16).to_le_bytes());
        self.buf[payload + 2..payload + 2 + value.len()].copy_from_slice(value.as_bytes());
    }

    pub fn set_null(&mut self, index: usize) {
        let slot = self.layout.field(index);
        debug_assert!(slot.nullable, "field {index} is declared NOT NULL");
        self.buf[slot.offset] = 0;
    }
}

fn slot_for_varchar<'a>(layout: &'a RowLayout, index: usize) -> &'a FieldSlot {
    debug_assert!(index < layout.num_fields());
    let slot = layout.field(index);
    debug_assert!(
        matches!(slot.data_type, DataType::Varchar(_)),
        "field {index} is {:?}, accessed as varchar",
        slot.data_type
    );
    slot
}

/// Typed read access to a row buffer. Getters return `None` for null fields.
pub struct RowReader<'a> {
    layout: &'a RowLayout,
    buf: &'a [u8],
}

impl<'a> RowReader<'a> {
    pub fn new(layout: &'a RowLayout, buf: &'a [u8]) -> Self {
        debug_assert!(
            buf.len() >= layout.size(),
            "row buffer too small for layout"
        );
        Self { layout, buf }
    }

    fn payload(&self, index: usize, expected: DataType) -> Option<&'a [u8]> {
        let slot = slot_for(self.layout, index, expected);
        if self.buf[slot.offset] == 0 {
            return None;
        }
        let payload = slot.offset + 1;
        Some(&self.buf[payload..payload + slot.data_type.row_width()])
    }

    pub fn get_tinyint(&self, index: usize) -> Option<i8> {
        self.payload(index, DataType::TinyInt)
            .map(|b| i8::from_le_bytes([b[0]]))
    }

    pub fn get_smallint(&self, index: usize) -> Option<i16> {
        self.payload(index, DataType::SmallInt)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn get_integer(&self, index: usize) -> Option<i32> {
        self.payload(index, DataType::Integer)
            .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn get_decimal(&self, index: usize) -> Option<f64> {
        self.payload(index, DataType::Decimal)
            .map(|b| f64::from_le_bytes(b.try_into().expect("decimal payload is 8 bytes")))
    }

    pub fn get_timestamp(&self, index: usize) -> Option<i64> {
        self.payload(index, DataType::Timestamp)
            .map(|b| i64::from_le_bytes(b.try_into().expect("timestamp payload is 8 bytes")))
    }

    pub fn get_varchar(&self, index: usize) -> Option<&'a str> {
        let slot = slot_for_varchar(self.layout, index);
        if self.buf[slot.offset] == 0 {
            return None;
        }
        let payload = slot.offset + 1;
        let len = u16::from_le_bytes([self.buf[payload], self.buf[payload + 1]]) as usize;
        let bytes = &self.buf[payload + 2..payload + 2 + len];
        Some(std::str::from_utf8(bytes).expect("varchar payload is valid utf8"))
    }

    pub fn is_null(&self, index: usize) -> bool {
        let slot = self.layout.field(index);
        self.buf[slot.offset] == 0
    }
}
