//! Flattening decoded packets into named records.

mod common;

use common::*;
use pitlane::projection::WHEEL_SUFFIXES;
use pitlane::types::Value;
use pitlane::{Flatten, TelemetryError, decode_packet, project, project_player};

fn damage_datagram(player: u8) -> Vec<u8> {
    let mut buf = datagram(header_2023(10, player), 953);
    let car = HEADER_2023 + player as usize * 42;
    for (wheel, wear) in [1.5f32, 2.5, 3.5, 4.5].into_iter().enumerate() {
        put_f32(&mut buf, car + wheel * 4, wear);
    }
    for wheel in 0..4 {
        put_u8(&mut buf, car + 16 + wheel, 10 + wheel as u8);
        put_u8(&mut buf, car + 20 + wheel, 20 + wheel as u8);
    }
    put_u8(&mut buf, car + 41, 1); // engine seized
    buf
}

#[test]
fn damage_wheel_arrays_in_wire_order() {
    let record = project_player(&decode_packet(&damage_datagram(4)).unwrap()).unwrap();

    for (i, suffix) in WHEEL_SUFFIXES.iter().enumerate() {
        assert_eq!(
            record.get(&format!("m_tyres_wear_{suffix}")),
            Some(&Value::Float32(1.5 + i as f32))
        );
        assert_eq!(
            record.get(&format!("m_tyres_damage_{suffix}")),
            Some(&Value::UInt8(10 + i as u8))
        );
        assert_eq!(
            record.get(&format!("m_brakes_damage_{suffix}")),
            Some(&Value::UInt8(20 + i as u8))
        );
    }
    for array in ["m_tyres_wear", "m_tyres_damage", "m_brakes_damage"] {
        assert!(!record.contains_key(array));
    }
    assert_eq!(record.get("m_engine_seized"), Some(&Value::UInt8(1)));
    assert_eq!(record.get("m_player_car_index"), Some(&Value::UInt8(4)));
}

#[test]
fn other_slots_are_independent() {
    let packet = decode_packet(&damage_datagram(4)).unwrap();
    let other = project(&packet, 3).unwrap();
    assert_eq!(other.get("m_tyres_wear_rl"), Some(&Value::Float32(0.0)));
    assert_eq!(other.get("m_engine_seized"), Some(&Value::UInt8(0)));
}

#[test]
fn car_index_must_be_a_slot() {
    let packet = decode_packet(&damage_datagram(0)).unwrap();
    assert!(project(&packet, 21).is_ok());
    assert!(matches!(
        project(&packet, 22),
        Err(TelemetryError::IndexOutOfRange { index: 22, len: 22 })
    ));

    let spectating = decode_packet(&datagram(header_2023(7, 255), 1239)).unwrap();
    assert!(matches!(
        project_player(&spectating),
        Err(TelemetryError::IndexOutOfRange { index: 255, len: 22 })
    ));
}

#[test]
fn header_flattens_alone() {
    let packet = decode_packet(&damage_datagram(0)).unwrap();
    let header = packet.header().flatten();
    assert_eq!(header.get("m_packet_format"), Some(&Value::UInt16(2023)));
    assert_eq!(header.get("m_game_year"), Some(&Value::UInt8(23)));
    assert_eq!(header.get_f64("m_session_time"), Some(12.5));
    assert!(header.keys().all(|k| k.starts_with("m_")));
    assert!(!header.contains_key("m_speed"));
}

#[test]
fn records_serialize_as_flat_maps() {
    let packet = decode_packet(&damage_datagram(0)).unwrap();
    let record = project_player(&packet).unwrap();
    let yaml = serde_yaml_ng::to_string(&record).unwrap();
    assert!(yaml.contains("m_tyres_wear_fr"));
    assert!(yaml.contains("m_frame_identifier"));
}
