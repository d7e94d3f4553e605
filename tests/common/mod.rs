//! Hand-assembled datagrams for integration tests
//!
//! Offsets here are written out from the published packet layouts rather than
//! taken from the crate, so the tests catch layout drift.

#![allow(dead_code)]

pub const HEADER_2023: usize = 29;
pub const HEADER_2022: usize = 24;

/// Header-only datagram, 29 bytes.
pub fn header_2023(packet_id: u8, player_car_index: u8) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_2023);
    buf.extend_from_slice(&2023u16.to_le_bytes());
    buf.extend_from_slice(&[23, 1, 18, 1, packet_id]);
    buf.extend_from_slice(&0xCAFE_F00D_u64.to_le_bytes());
    buf.extend_from_slice(&12.5f32.to_le_bytes());
    buf.extend_from_slice(&640u32.to_le_bytes());
    buf.extend_from_slice(&641u32.to_le_bytes());
    buf.extend_from_slice(&[player_car_index, 255]);
    buf
}

/// Header-only datagram, 24 bytes.
pub fn header_2022(packet_id: u8, player_car_index: u8) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_2022);
    buf.extend_from_slice(&2022u16.to_le_bytes());
    buf.extend_from_slice(&[1, 20, 1, packet_id]);
    buf.extend_from_slice(&0xCAFE_F00D_u64.to_le_bytes());
    buf.extend_from_slice(&12.5f32.to_le_bytes());
    buf.extend_from_slice(&640u32.to_le_bytes());
    buf.extend_from_slice(&[player_car_index, 255]);
    buf
}

/// Zero-filled datagram of `len` bytes starting with `header`.
pub fn datagram(header: Vec<u8>, len: usize) -> Vec<u8> {
    let mut buf = header;
    buf.resize(len, 0);
    buf
}

pub fn put_u8(buf: &mut [u8], offset: usize, value: u8) {
    buf[offset] = value;
}

pub fn put_i8(buf: &mut [u8], offset: usize, value: i8) {
    buf[offset] = value as u8;
}

pub fn put_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

pub fn put_f32(buf: &mut [u8], offset: usize, value: f32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
