//! Player projection: one car's record flattened into named scalars.
//!
//! Keys are the wire field names in snake case with an `m_` prefix. Header
//! fields and packet-level scalars are merged in. Wheel arrays expand to four
//! keys suffixed `_rl`, `_rr`, `_fl`, `_fr` (wire order) and tyre stint arrays
//! to `_0` .. `_7`; the array key itself never appears.
//!
//! ```rust,no_run
//! # fn example(packet: &pitlane::Packet) -> pitlane::Result<()> {
//! let record = pitlane::project_player(packet)?;
//! if let Some(speed) = record.get_f64("m_speed") {
//!     let brake = record.get("m_brakes_temperature_fl");
//!     println!("speed {speed} km/h, front left brake {:?}", brake);
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

use crate::packets::{
    CarDamageData, CarMotionData, CarSetupData, CarStatusData, CarTelemetryData,
    FinalClassificationData, LapData, NUM_CARS, Packet, PacketHeader, ParticipantData,
    SessionPacket, TyreSetData,
};
use crate::types::Value;
use crate::{Result, TelemetryError};

/// Wheel order of every four-element array on the wire.
pub const WHEEL_SUFFIXES: [&str; 4] = ["rl", "rr", "fl", "fr"];

const KEY_PREFIX: &str = "m_";

/// Flat field-name to scalar mapping for a single car.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlattenedRecord {
    fields: BTreeMap<String, Value>,
}

impl FlattenedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.fields
    }

    fn put(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(format!("{KEY_PREFIX}{name}"), value.into());
    }

    fn put_wheels<T: Into<Value> + Copy>(&mut self, name: &str, values: [T; 4]) {
        for (suffix, value) in WHEEL_SUFFIXES.iter().zip(values) {
            self.put(&format!("{name}_{suffix}"), value);
        }
    }

    fn put_indexed<T: Into<Value> + Copy>(&mut self, name: &str, values: &[T]) {
        for (i, value) in values.iter().enumerate() {
            self.put(&format!("{name}_{i}"), *value);
        }
    }
}

impl IntoIterator for FlattenedRecord {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Types that contribute scalar fields to a [`FlattenedRecord`].
pub trait Flatten {
    fn flatten_into(&self, record: &mut FlattenedRecord);

    fn flatten(&self) -> FlattenedRecord {
        let mut record = FlattenedRecord::new();
        self.flatten_into(&mut record);
        record
    }
}

macro_rules! put_scalars {
    ($record:expr, $src:expr; $($field:ident),+ $(,)?) => {
        $( $record.put(stringify!($field), $src.$field); )+
    };
}

/// Project one car slot of `packet`.
///
/// Per-car packets fail with `IndexOutOfRange` when `car_index` is outside
/// the fixed array. Session and tyre set packets carry no per-car array and
/// ignore `car_index`.
pub fn project(packet: &Packet, car_index: usize) -> Result<FlattenedRecord> {
    let mut record = packet.header().flatten();
    match packet {
        Packet::Motion(p) => slot(&p.car_motion_data, car_index)?.flatten_into(&mut record),
        Packet::Session(p) => p.flatten_into(&mut record),
        Packet::LapData(p) => {
            slot(&p.lap_data, car_index)?.flatten_into(&mut record);
            put_scalars!(record, p; time_trial_pb_car_idx, time_trial_rival_car_idx);
        }
        Packet::Participants(p) => {
            slot(&p.participants, car_index)?.flatten_into(&mut record);
            put_scalars!(record, p; num_active_cars);
        }
        Packet::CarSetup(p) => slot(&p.car_setups, car_index)?.flatten_into(&mut record),
        Packet::CarTelemetry(p) => {
            slot(&p.car_telemetry_data, car_index)?.flatten_into(&mut record);
            put_scalars!(record, p; mfd_panel_index, mfd_panel_index_secondary_player, suggested_gear);
        }
        Packet::CarStatus(p) => slot(&p.car_status_data, car_index)?.flatten_into(&mut record),
        Packet::FinalClassification(p) => {
            slot(&p.classification_data, car_index)?.flatten_into(&mut record);
            put_scalars!(record, p; num_cars);
        }
        Packet::CarDamage(p) => slot(&p.car_damage_data, car_index)?.flatten_into(&mut record),
        Packet::TyreSets(p) => {
            put_scalars!(record, p; car_idx, fitted_idx);
            if let Some(fitted) = p.fitted() {
                fitted.flatten_into(&mut record);
            }
        }
    }
    Ok(record)
}

/// Project the slot named by the header's `player_car_index`.
pub fn project_player(packet: &Packet) -> Result<FlattenedRecord> {
    project(packet, packet.header().player_car_index as usize)
}

fn slot<T>(records: &[T; NUM_CARS], index: usize) -> Result<&T> {
    records.get(index).ok_or(TelemetryError::IndexOutOfRange { index, len: NUM_CARS })
}

impl Flatten for PacketHeader {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        put_scalars!(record, self;
            packet_format, game_major_version, game_minor_version, packet_version, packet_id,
            session_uid, session_time, frame_identifier, player_car_index,
            secondary_player_car_index,
        );
        if let Some(game_year) = self.game_year {
            record.put("game_year", game_year);
        }
        if let Some(overall) = self.overall_frame_identifier {
            record.put("overall_frame_identifier", overall);
        }
    }
}

impl Flatten for CarMotionData {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        put_scalars!(record, self;
            world_position_x, world_position_y, world_position_z,
            world_velocity_x, world_velocity_y, world_velocity_z,
            world_forward_dir_x, world_forward_dir_y, world_forward_dir_z,
            world_right_dir_x, world_right_dir_y, world_right_dir_z,
            g_force_lateral, g_force_longitudinal, g_force_vertical,
            yaw, pitch, roll,
        );
    }
}

/// Session scalars only; marshal zones and forecast samples are not flattened.
impl Flatten for SessionPacket {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        put_scalars!(record, self;
            weather, track_temperature, air_temperature, total_laps, track_length,
            session_type, track_id, formula, session_time_left, session_duration,
            pit_speed_limit, game_paused, is_spectating, spectator_car_index,
            sli_pro_native_support, num_marshal_zones, safety_car_status, network_game,
            num_weather_forecast_samples, forecast_accuracy, ai_difficulty,
            season_link_identifier, weekend_link_identifier, session_link_identifier,
            pit_stop_window_ideal_lap, pit_stop_window_latest_lap, pit_stop_rejoin_position,
            steering_assist, braking_assist, gearbox_assist, pit_assist, pit_release_assist,
            ers_assist, drs_assist, dynamic_racing_line, dynamic_racing_line_type, game_mode,
            rule_set, time_of_day, session_length, speed_units_lead_player,
            temperature_units_lead_player, speed_units_secondary_player,
            temperature_units_secondary_player, num_safety_car_periods,
            num_virtual_safety_car_periods, num_red_flag_periods,
        );
    }
}

impl Flatten for LapData {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        put_scalars!(record, self;
            last_lap_time_in_ms, current_lap_time_in_ms, sector1_time_in_ms,
            sector1_time_minutes, sector2_time_in_ms, sector2_time_minutes,
            delta_to_car_in_front_in_ms, delta_to_race_leader_in_ms, lap_distance,
            total_distance, safety_car_delta, car_position, current_lap_num, pit_status,
            num_pit_stops, sector, current_lap_invalid, penalties, total_warnings,
            corner_cutting_warnings, num_unserved_drive_through_pens,
            num_unserved_stop_go_pens, grid_position, driver_status, result_status,
            pit_lane_timer_active, pit_lane_time_in_lane_in_ms, pit_stop_timer_in_ms,
            pit_stop_should_serve_pen,
        );
    }
}

impl Flatten for ParticipantData {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        put_scalars!(record, self;
            ai_controlled, driver_id, network_id, team_id, my_team, race_number, nationality,
            your_telemetry, show_online_names, platform,
        );
        record.put("name", self.name.as_str());
    }
}

impl Flatten for CarSetupData {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        put_scalars!(record, self;
            front_wing, rear_wing, on_throttle, off_throttle, front_camber, rear_camber,
            front_toe, rear_toe, front_suspension, rear_suspension, front_anti_roll_bar,
            rear_anti_roll_bar, front_suspension_height, rear_suspension_height,
            brake_pressure, brake_bias, rear_left_tyre_pressure, rear_right_tyre_pressure,
            front_left_tyre_pressure, front_right_tyre_pressure, ballast, fuel_load,
        );
    }
}

impl Flatten for CarTelemetryData {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        put_scalars!(record, self;
            speed, throttle, steer, brake, clutch, gear, engine_rpm, drs, rev_lights_percent,
            rev_lights_bit_value, engine_temperature,
        );
        record.put_wheels("brakes_temperature", self.brakes_temperature);
        record.put_wheels("tyres_surface_temperature", self.tyres_surface_temperature);
        record.put_wheels("tyres_inner_temperature", self.tyres_inner_temperature);
        record.put_wheels("tyres_pressure", self.tyres_pressure);
        record.put_wheels("surface_type", self.surface_type);
    }
}

impl Flatten for CarStatusData {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        put_scalars!(record, self;
            traction_control, anti_lock_brakes, fuel_mix, front_brake_bias,
            pit_limiter_status, fuel_in_tank, fuel_capacity, fuel_remaining_laps, max_rpm,
            idle_rpm, max_gears, drs_allowed, drs_activation_distance, actual_tyre_compound,
            visual_tyre_compound, tyres_age_laps, vehicle_fia_flags, engine_power_ice,
            engine_power_mguk, ers_store_energy, ers_deploy_mode, ers_harvested_this_lap_mguk,
            ers_harvested_this_lap_mguh, ers_deployed_this_lap, network_paused,
        );
    }
}

impl Flatten for CarDamageData {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        record.put_wheels("tyres_wear", self.tyres_wear);
        record.put_wheels("tyres_damage", self.tyres_damage);
        record.put_wheels("brakes_damage", self.brakes_damage);
        put_scalars!(record, self;
            front_left_wing_damage, front_right_wing_damage, rear_wing_damage, floor_damage,
            diffuser_damage, sidepod_damage, drs_fault, ers_fault, gear_box_damage,
            engine_damage, engine_mguh_wear, engine_es_wear, engine_ce_wear, engine_ice_wear,
            engine_mguk_wear, engine_tc_wear, engine_blown, engine_seized,
        );
    }
}

impl Flatten for FinalClassificationData {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        put_scalars!(record, self;
            position, num_laps, grid_position, points, num_pit_stops, result_status,
            best_lap_time_in_ms, total_race_time, penalties_time, num_penalties,
            num_tyre_stints,
        );
        record.put_indexed("tyre_stints_actual", &self.tyre_stints_actual);
        record.put_indexed("tyre_stints_visual", &self.tyre_stints_visual);
        record.put_indexed("tyre_stints_end_laps", &self.tyre_stints_end_laps);
    }
}

impl Flatten for TyreSetData {
    fn flatten_into(&self, record: &mut FlattenedRecord) {
        put_scalars!(record, self;
            actual_tyre_compound, visual_tyre_compound, wear, available, recommended_session,
            life_span, usable_life, lap_delta_time, fitted,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_packet;
    use crate::packets::PacketKind;
    use crate::test_utils::{self, HeaderSpec};

    const WHEEL_ARRAYS: [&str; 8] = [
        "m_brakes_temperature",
        "m_tyres_surface_temperature",
        "m_tyres_inner_temperature",
        "m_tyres_pressure",
        "m_surface_type",
        "m_tyres_wear",
        "m_tyres_damage",
        "m_brakes_damage",
    ];

    #[test]
    fn car_telemetry_player_scenario() {
        let mut cars = test_utils::car_telemetry_cars();
        cars[0].speed = 250;
        cars[0].throttle = 1.0;
        cars[0].brakes_temperature = [350, 351, 352, 353];
        let bytes = test_utils::car_telemetry_datagram(&HeaderSpec::default(), &cars, (3, 255, 4));
        let packet = decode_packet(&bytes).unwrap();

        let record = project_player(&packet).unwrap();
        assert_eq!(record.get("m_speed"), Some(&Value::UInt16(250)));
        assert_eq!(record.get("m_throttle"), Some(&Value::Float32(1.0)));
        assert_eq!(record.get("m_brakes_temperature_rl"), Some(&Value::UInt16(350)));
        assert_eq!(record.get("m_brakes_temperature_rr"), Some(&Value::UInt16(351)));
        assert_eq!(record.get("m_brakes_temperature_fl"), Some(&Value::UInt16(352)));
        assert_eq!(record.get("m_brakes_temperature_fr"), Some(&Value::UInt16(353)));
        assert!(!record.contains_key("m_brakes_temperature"));
        assert_eq!(record.get("m_packet_id"), Some(&Value::UInt8(6)));
        assert_eq!(record.get("m_mfd_panel_index"), Some(&Value::UInt8(3)));
        assert_eq!(record.get("m_suggested_gear"), Some(&Value::Int8(4)));
    }

    #[test]
    fn wheel_arrays_expand_to_four_keys() {
        for kind in [PacketKind::CarTelemetry, PacketKind::CarDamage] {
            let bytes = test_utils::datagram_for(kind, &HeaderSpec::default());
            let record = project(&decode_packet(&bytes).unwrap(), 5).unwrap();
            for array in WHEEL_ARRAYS {
                let expanded = record.keys().filter(|k| k.starts_with(array)).count();
                if expanded == 0 {
                    continue;
                }
                assert_eq!(expanded, 4, "{array} in {kind:?}");
                assert!(!record.contains_key(array));
                for suffix in WHEEL_SUFFIXES {
                    assert!(record.contains_key(&format!("{array}_{suffix}")));
                }
            }
        }
    }

    #[test]
    fn index_out_of_range() {
        let bytes = test_utils::datagram_for(PacketKind::LapData, &HeaderSpec::default());
        let packet = decode_packet(&bytes).unwrap();
        assert!(project(&packet, 21).is_ok());
        assert!(matches!(
            project(&packet, 22),
            Err(TelemetryError::IndexOutOfRange { index: 22, len: 22 })
        ));

        let spectator = HeaderSpec { player_car_index: 255, ..HeaderSpec::default() };
        let bytes = test_utils::datagram_for(PacketKind::CarStatus, &spectator);
        let packet = decode_packet(&bytes).unwrap();
        assert!(matches!(
            project_player(&packet),
            Err(TelemetryError::IndexOutOfRange { index: 255, .. })
        ));
    }

    #[test]
    fn header_fields_present_and_optional_ones_omitted() {
        let bytes = test_utils::datagram_for(PacketKind::CarDamage, &HeaderSpec::default());
        let record = project_player(&decode_packet(&bytes).unwrap()).unwrap();
        assert!(record.contains_key("m_session_uid"));
        assert!(record.contains_key("m_game_year"));
        assert!(record.contains_key("m_overall_frame_identifier"));

        let legacy = HeaderSpec { packet_format: 2022, ..HeaderSpec::default() };
        let bytes = test_utils::datagram_for(PacketKind::CarDamage, &legacy);
        let record = project_player(&decode_packet(&bytes).unwrap()).unwrap();
        assert!(record.contains_key("m_session_uid"));
        assert!(!record.contains_key("m_game_year"));
        assert!(!record.contains_key("m_overall_frame_identifier"));
    }

    #[test]
    fn final_classification_stints_are_indexed() {
        let bytes =
            test_utils::datagram_for(PacketKind::FinalClassification, &HeaderSpec::default());
        let record = project(&decode_packet(&bytes).unwrap(), 2).unwrap();
        for i in 0..8 {
            assert!(record.contains_key(&format!("m_tyre_stints_actual_{i}")));
            assert!(record.contains_key(&format!("m_tyre_stints_end_laps_{i}")));
        }
        assert!(!record.contains_key("m_tyre_stints_actual"));
        assert!(!record.contains_key("m_tyre_stints_actual_8"));
        assert!(record.contains_key("m_num_cars"));
        assert!(matches!(record.get("m_total_race_time"), Some(Value::Float64(_))));
    }

    #[test]
    fn session_and_tyre_sets_ignore_car_index() {
        let bytes = test_utils::session_datagram(&HeaderSpec::default());
        let packet = decode_packet(&bytes).unwrap();
        let record = project(&packet, 99).unwrap();
        assert_eq!(record.get("m_track_id"), Some(&Value::Int8(7)));
        assert!(record.contains_key("m_num_red_flag_periods"));
        assert!(!record.keys().any(|k| k.starts_with("m_marshal_zones")));

        let sets = test_utils::tyre_sets();
        let bytes = test_utils::tyre_sets_datagram(&HeaderSpec::default(), 3, &sets, 1);
        let record = project(&decode_packet(&bytes).unwrap(), 99).unwrap();
        assert_eq!(record.get("m_fitted_idx"), Some(&Value::UInt8(1)));
        assert_eq!(record.get("m_wear"), Some(&Value::UInt8(sets[1].wear)));

        let bytes = test_utils::tyre_sets_datagram(&HeaderSpec::default(), 3, &sets, 20);
        let record = project(&decode_packet(&bytes).unwrap(), 0).unwrap();
        assert!(record.contains_key("m_car_idx"));
        assert!(!record.contains_key("m_wear"));
    }

    #[test]
    fn participant_name_is_text() {
        let bytes = test_utils::datagram_for(PacketKind::Participants, &HeaderSpec::default());
        let record = project(&decode_packet(&bytes).unwrap(), 4).unwrap();
        assert_eq!(record.get_str("m_name"), Some("DRIVER 4"));
        assert!(record.contains_key("m_num_active_cars"));
    }

    #[test]
    fn projection_does_not_touch_packet() {
        let bytes = test_utils::datagram_for(PacketKind::Motion, &HeaderSpec::default());
        let packet = decode_packet(&bytes).unwrap();
        let before = packet.clone();
        let first = project(&packet, 3).unwrap();
        let second = project(&packet, 3).unwrap();
        assert_eq!(packet, before);
        assert_eq!(first, second);
    }
}
