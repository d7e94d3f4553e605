//! Boundary values through every record layout
//!
//! Even slots carry the largest value each field can hold, odd slots the
//! smallest (zero, or the most negative for signed and float fields).

use std::array;

use super::*;
use crate::dispatch::decode_packet;
use crate::test_utils::{self, HeaderSpec};
use proptest::prelude::*;

const FORMATS: [u16; 2] = [2023, 2022];

fn alternate<T: Clone>(high: T, low: T) -> [T; NUM_CARS] {
    array::from_fn(|i| if i % 2 == 0 { high.clone() } else { low.clone() })
}

fn extreme_header(packet_format: u16) -> HeaderSpec {
    HeaderSpec {
        packet_format,
        game_year: u8::MAX,
        game_major_version: u8::MAX,
        game_minor_version: 0,
        packet_version: u8::MAX,
        session_uid: u64::MAX,
        session_time: f32::MAX,
        frame_identifier: u32::MAX,
        overall_frame_identifier: u32::MAX,
        player_car_index: 21,
        secondary_player_car_index: u8::MAX,
        ..HeaderSpec::default()
    }
}

fn decode(bytes: &[u8]) -> Packet {
    decode_packet(bytes).unwrap()
}

fn assert_header(header: &PacketHeader, sent: &HeaderSpec) {
    let legacy = sent.packet_format == 2022;
    assert_eq!(header.packet_format, sent.packet_format);
    assert_eq!(header.game_year, (!legacy).then_some(u8::MAX));
    assert_eq!(header.game_major_version, u8::MAX);
    assert_eq!(header.game_minor_version, 0);
    assert_eq!(header.packet_version, u8::MAX);
    assert_eq!(header.session_uid, u64::MAX);
    assert_eq!(header.session_time, f32::MAX);
    assert_eq!(header.frame_identifier, u32::MAX);
    assert_eq!(header.overall_frame_identifier, (!legacy).then_some(u32::MAX));
    assert_eq!(header.player_car_index, 21);
    assert_eq!(header.secondary_player_car_index, u8::MAX);
}

fn lap_high() -> LapData {
    LapData {
        last_lap_time_in_ms: u32::MAX,
        current_lap_time_in_ms: u32::MAX,
        sector1_time_in_ms: u16::MAX,
        sector1_time_minutes: u8::MAX,
        sector2_time_in_ms: u16::MAX,
        sector2_time_minutes: u8::MAX,
        delta_to_car_in_front_in_ms: u16::MAX,
        delta_to_race_leader_in_ms: u16::MAX,
        lap_distance: f32::MAX,
        total_distance: f32::MAX,
        safety_car_delta: f32::MAX,
        car_position: u8::MAX,
        current_lap_num: u8::MAX,
        pit_status: u8::MAX,
        num_pit_stops: u8::MAX,
        sector: u8::MAX,
        current_lap_invalid: u8::MAX,
        penalties: u8::MAX,
        total_warnings: u8::MAX,
        corner_cutting_warnings: u8::MAX,
        num_unserved_drive_through_pens: u8::MAX,
        num_unserved_stop_go_pens: u8::MAX,
        grid_position: u8::MAX,
        driver_status: u8::MAX,
        result_status: u8::MAX,
        pit_lane_timer_active: u8::MAX,
        pit_lane_time_in_lane_in_ms: u16::MAX,
        pit_stop_timer_in_ms: u16::MAX,
        pit_stop_should_serve_pen: u8::MAX,
    }
}

/// Fields format 2022 does not carry decode as zero.
fn without_2023_lap_fields(lap: LapData) -> LapData {
    LapData {
        sector1_time_minutes: 0,
        sector2_time_minutes: 0,
        delta_to_car_in_front_in_ms: 0,
        delta_to_race_leader_in_ms: 0,
        corner_cutting_warnings: 0,
        ..lap
    }
}

#[test]
fn lap_data_extremes() {
    let low = LapData {
        lap_distance: f32::MIN,
        total_distance: f32::MIN,
        safety_car_delta: f32::MIN,
        ..LapData::default()
    };
    let laps = alternate(lap_high(), low);

    for format in FORMATS {
        let header = extreme_header(format);
        let bytes = test_utils::lap_data_datagram(&header, &laps, u8::MAX, 0);
        let Packet::LapData(packet) = decode(&bytes) else {
            panic!("expected lap data for format {format}");
        };
        assert_header(&packet.header, &header);
        assert_eq!(packet.time_trial_pb_car_idx, u8::MAX);
        assert_eq!(packet.time_trial_rival_car_idx, 0);

        let expected = if format == 2022 { laps.clone().map(without_2023_lap_fields) } else { laps.clone() };
        assert_eq!(packet.lap_data, expected, "format {format}");
    }
}

#[test]
fn car_telemetry_extremes() {
    let high = CarTelemetryData {
        speed: u16::MAX,
        throttle: f32::MAX,
        steer: f32::MAX,
        brake: f32::MAX,
        clutch: u8::MAX,
        gear: i8::MAX,
        engine_rpm: u16::MAX,
        drs: u8::MAX,
        rev_lights_percent: u8::MAX,
        rev_lights_bit_value: u16::MAX,
        brakes_temperature: [u16::MAX; 4],
        tyres_surface_temperature: [u8::MAX; 4],
        tyres_inner_temperature: [u8::MAX; 4],
        engine_temperature: u16::MAX,
        tyres_pressure: [f32::MAX; 4],
        surface_type: [u8::MAX; 4],
    };
    let low = CarTelemetryData {
        throttle: f32::MIN,
        steer: f32::MIN,
        brake: f32::MIN,
        gear: i8::MIN,
        tyres_pressure: [f32::MIN; 4],
        ..CarTelemetryData::default()
    };
    let cars = alternate(high, low);

    for format in FORMATS {
        let header = extreme_header(format);
        let bytes = test_utils::car_telemetry_datagram(&header, &cars, (u8::MAX, 0, i8::MIN));
        let Packet::CarTelemetry(packet) = decode(&bytes) else {
            panic!("expected car telemetry for format {format}");
        };
        assert_header(&packet.header, &header);
        assert_eq!(packet.car_telemetry_data, cars);
        assert_eq!(packet.mfd_panel_index, u8::MAX);
        assert_eq!(packet.mfd_panel_index_secondary_player, 0);
        assert_eq!(packet.suggested_gear, i8::MIN);
    }
}

#[test]
fn car_status_extremes() {
    let high = CarStatusData {
        traction_control: u8::MAX,
        anti_lock_brakes: u8::MAX,
        fuel_mix: u8::MAX,
        front_brake_bias: u8::MAX,
        pit_limiter_status: u8::MAX,
        fuel_in_tank: f32::MAX,
        fuel_capacity: f32::MAX,
        fuel_remaining_laps: f32::MAX,
        max_rpm: u16::MAX,
        idle_rpm: u16::MAX,
        max_gears: u8::MAX,
        drs_allowed: u8::MAX,
        drs_activation_distance: u16::MAX,
        actual_tyre_compound: u8::MAX,
        visual_tyre_compound: u8::MAX,
        tyres_age_laps: u8::MAX,
        vehicle_fia_flags: i8::MAX,
        engine_power_ice: f32::MAX,
        engine_power_mguk: f32::MAX,
        ers_store_energy: f32::MAX,
        ers_deploy_mode: u8::MAX,
        ers_harvested_this_lap_mguk: f32::MAX,
        ers_harvested_this_lap_mguh: f32::MAX,
        ers_deployed_this_lap: f32::MAX,
        network_paused: u8::MAX,
    };
    let low = CarStatusData {
        fuel_in_tank: f32::MIN,
        vehicle_fia_flags: i8::MIN,
        engine_power_ice: f32::MIN,
        ers_store_energy: f32::MIN,
        ..CarStatusData::default()
    };
    let cars = alternate(high, low);

    for format in FORMATS {
        let header = extreme_header(format);
        let bytes = test_utils::car_status_datagram(&header, &cars);
        let Packet::CarStatus(packet) = decode(&bytes) else {
            panic!("expected car status for format {format}");
        };
        assert_header(&packet.header, &header);

        let expected = if format == 2022 {
            cars.clone().map(|car| CarStatusData {
                engine_power_ice: 0.0,
                engine_power_mguk: 0.0,
                ..car
            })
        } else {
            cars.clone()
        };
        assert_eq!(packet.car_status_data, expected, "format {format}");
    }
}

#[test]
fn car_damage_extremes() {
    let high = CarDamageData {
        tyres_wear: [f32::MAX; 4],
        tyres_damage: [u8::MAX; 4],
        brakes_damage: [u8::MAX; 4],
        front_left_wing_damage: u8::MAX,
        front_right_wing_damage: u8::MAX,
        rear_wing_damage: u8::MAX,
        floor_damage: u8::MAX,
        diffuser_damage: u8::MAX,
        sidepod_damage: u8::MAX,
        drs_fault: u8::MAX,
        ers_fault: u8::MAX,
        gear_box_damage: u8::MAX,
        engine_damage: u8::MAX,
        engine_mguh_wear: u8::MAX,
        engine_es_wear: u8::MAX,
        engine_ce_wear: u8::MAX,
        engine_ice_wear: u8::MAX,
        engine_mguk_wear: u8::MAX,
        engine_tc_wear: u8::MAX,
        engine_blown: u8::MAX,
        engine_seized: u8::MAX,
    };
    let low = CarDamageData { tyres_wear: [f32::MIN; 4], ..CarDamageData::default() };
    let cars = alternate(high, low);

    for format in FORMATS {
        let header = extreme_header(format);
        let bytes = test_utils::car_damage_datagram(&header, &cars);
        let Packet::CarDamage(packet) = decode(&bytes) else {
            panic!("expected car damage for format {format}");
        };
        assert_header(&packet.header, &header);
        assert_eq!(packet.car_damage_data, cars);
    }
}

#[test]
fn motion_extremes() {
    let high = CarMotionData {
        world_position_x: f32::MAX,
        world_position_y: f32::MAX,
        world_position_z: f32::MAX,
        world_velocity_x: f32::MAX,
        world_velocity_y: f32::MAX,
        world_velocity_z: f32::MAX,
        world_forward_dir_x: i16::MAX,
        world_forward_dir_y: i16::MAX,
        world_forward_dir_z: i16::MAX,
        world_right_dir_x: i16::MAX,
        world_right_dir_y: i16::MAX,
        world_right_dir_z: i16::MAX,
        g_force_lateral: f32::MAX,
        g_force_longitudinal: f32::MAX,
        g_force_vertical: f32::MAX,
        yaw: f32::MAX,
        pitch: f32::MAX,
        roll: f32::MAX,
    };
    let low = CarMotionData {
        world_position_x: f32::MIN,
        world_position_y: f32::MIN,
        world_position_z: f32::MIN,
        world_velocity_x: f32::MIN,
        world_velocity_y: f32::MIN,
        world_velocity_z: f32::MIN,
        world_forward_dir_x: i16::MIN,
        world_forward_dir_y: i16::MIN,
        world_forward_dir_z: i16::MIN,
        world_right_dir_x: i16::MIN,
        world_right_dir_y: i16::MIN,
        world_right_dir_z: i16::MIN,
        g_force_lateral: f32::MIN,
        g_force_longitudinal: f32::MIN,
        g_force_vertical: f32::MIN,
        yaw: f32::MIN,
        pitch: f32::MIN,
        roll: f32::MIN,
    };
    let cars = alternate(high, low);
    let header = extreme_header(2023);

    let Packet::Motion(packet) = decode(&test_utils::motion_datagram(&header, &cars)) else {
        panic!("expected motion");
    };
    assert_header(&packet.header, &header);
    assert_eq!(packet.car_motion_data, cars);
}

#[test]
fn participants_extremes() {
    let high = ParticipantData {
        ai_controlled: u8::MAX,
        driver_id: u8::MAX,
        network_id: u8::MAX,
        team_id: u8::MAX,
        my_team: u8::MAX,
        race_number: u8::MAX,
        nationality: u8::MAX,
        name: "W".repeat(participants::NAME_WIDTH),
        your_telemetry: u8::MAX,
        show_online_names: u8::MAX,
        platform: u8::MAX,
    };
    let cars = alternate(high, ParticipantData::default());
    let header = extreme_header(2023);

    let bytes = test_utils::participants_datagram(&header, u8::MAX, &cars);
    let Packet::Participants(packet) = decode(&bytes) else {
        panic!("expected participants");
    };
    assert_header(&packet.header, &header);
    assert_eq!(packet.num_active_cars, u8::MAX);
    assert_eq!(packet.participants, cars);
}

#[test]
fn car_setup_extremes() {
    let high = CarSetupData {
        front_wing: u8::MAX,
        rear_wing: u8::MAX,
        on_throttle: u8::MAX,
        off_throttle: u8::MAX,
        front_camber: f32::MAX,
        rear_camber: f32::MAX,
        front_toe: f32::MAX,
        rear_toe: f32::MAX,
        front_suspension: u8::MAX,
        rear_suspension: u8::MAX,
        front_anti_roll_bar: u8::MAX,
        rear_anti_roll_bar: u8::MAX,
        front_suspension_height: u8::MAX,
        rear_suspension_height: u8::MAX,
        brake_pressure: u8::MAX,
        brake_bias: u8::MAX,
        rear_left_tyre_pressure: f32::MAX,
        rear_right_tyre_pressure: f32::MAX,
        front_left_tyre_pressure: f32::MAX,
        front_right_tyre_pressure: f32::MAX,
        ballast: u8::MAX,
        fuel_load: f32::MAX,
    };
    let low = CarSetupData {
        front_camber: f32::MIN,
        rear_camber: f32::MIN,
        fuel_load: f32::MIN,
        ..CarSetupData::default()
    };
    let setups = alternate(high, low);
    let header = extreme_header(2023);

    let Packet::CarSetup(packet) = decode(&test_utils::car_setup_datagram(&header, &setups)) else {
        panic!("expected car setups");
    };
    assert_header(&packet.header, &header);
    assert_eq!(packet.car_setups, setups);
}

#[test]
fn final_classification_extremes() {
    let high = FinalClassificationData {
        position: u8::MAX,
        num_laps: u8::MAX,
        grid_position: u8::MAX,
        points: u8::MAX,
        num_pit_stops: u8::MAX,
        result_status: u8::MAX,
        best_lap_time_in_ms: u32::MAX,
        total_race_time: f64::MAX,
        penalties_time: u8::MAX,
        num_penalties: u8::MAX,
        num_tyre_stints: u8::MAX,
        tyre_stints_actual: [u8::MAX; 8],
        tyre_stints_visual: [u8::MAX; 8],
        tyre_stints_end_laps: [u8::MAX; 8],
    };
    let low = FinalClassificationData { total_race_time: f64::MIN, ..Default::default() };
    let cars = alternate(high, low);
    let header = extreme_header(2023);

    let bytes = test_utils::final_classification_datagram(&header, u8::MAX, &cars);
    let Packet::FinalClassification(packet) = decode(&bytes) else {
        panic!("expected final classification");
    };
    assert_header(&packet.header, &header);
    assert_eq!(packet.num_cars, u8::MAX);
    assert_eq!(packet.classification_data, cars);
}

#[test]
fn tyre_sets_extremes() {
    let high = TyreSetData {
        actual_tyre_compound: u8::MAX,
        visual_tyre_compound: u8::MAX,
        wear: u8::MAX,
        available: u8::MAX,
        recommended_session: u8::MAX,
        life_span: u8::MAX,
        usable_life: u8::MAX,
        lap_delta_time: i16::MAX,
        fitted: u8::MAX,
    };
    let low = TyreSetData { lap_delta_time: i16::MIN, ..TyreSetData::default() };
    let sets: [TyreSetData; tyre_sets::NUM_TYRE_SETS] =
        array::from_fn(|i| if i % 2 == 0 { high } else { low });
    let header = extreme_header(2023);

    let bytes = test_utils::tyre_sets_datagram(&header, u8::MAX, &sets, u8::MAX);
    let Packet::TyreSets(packet) = decode(&bytes) else {
        panic!("expected tyre sets");
    };
    assert_header(&packet.header, &header);
    assert_eq!(packet.car_idx, u8::MAX);
    assert_eq!(packet.tyre_set_data, sets);
    assert_eq!(packet.fitted_idx, u8::MAX);
    assert!(packet.fitted().is_none());
}

#[test]
fn session_extremes() {
    let header = extreme_header(2023);
    let mut bytes = test_utils::session_datagram(&header);
    bytes[30] = i8::MIN as u8; // track temperature
    bytes[31] = i8::MIN as u8; // air temperature
    bytes[33..35].copy_from_slice(&u16::MAX.to_le_bytes());
    bytes[36] = i8::MIN as u8; // track id
    bytes[38..40].copy_from_slice(&u16::MAX.to_le_bytes());
    bytes[40..42].copy_from_slice(&u16::MAX.to_le_bytes());
    bytes[606..610].copy_from_slice(&u32::MAX.to_le_bytes());
    bytes[632..636].copy_from_slice(&u32::MAX.to_le_bytes());
    bytes[643] = u8::MAX;

    let Packet::Session(session) = decode(&bytes) else {
        panic!("expected session");
    };
    assert_header(&session.header, &header);
    assert_eq!(session.track_temperature, i8::MIN);
    assert_eq!(session.air_temperature, i8::MIN);
    assert_eq!(session.track_length, u16::MAX);
    assert_eq!(session.track_id, i8::MIN);
    assert_eq!(session.session_time_left, u16::MAX);
    assert_eq!(session.session_duration, u16::MAX);
    assert_eq!(session.season_link_identifier, u32::MAX);
    assert_eq!(session.time_of_day, u32::MAX);
    assert_eq!(session.num_red_flag_periods, u8::MAX);
}

proptest! {
    #[test]
    fn lap_times_round_trip_in_both_formats(
        last in any::<u32>(),
        current in any::<u32>(),
        sector1 in any::<u16>(),
        sector2 in any::<u16>(),
        distance in prop::num::f32::NORMAL,
        pit_timer in any::<u16>(),
        legacy in any::<bool>(),
    ) {
        let lap = LapData {
            last_lap_time_in_ms: last,
            current_lap_time_in_ms: current,
            sector1_time_in_ms: sector1,
            sector2_time_in_ms: sector2,
            lap_distance: distance,
            total_distance: -distance,
            pit_stop_timer_in_ms: pit_timer,
            ..LapData::default()
        };
        let laps: [LapData; NUM_CARS] = array::from_fn(|_| lap.clone());
        let format = if legacy { 2022 } else { 2023 };
        let header = HeaderSpec { packet_format: format, ..HeaderSpec::default() };

        let bytes = test_utils::lap_data_datagram(&header, &laps, 0, 0);
        prop_assert_eq!(bytes.len(), lap_data::packet_size(header.version()));
        let Packet::LapData(packet) = decode(&bytes) else {
            panic!("expected lap data");
        };
        prop_assert_eq!(packet.lap_data, laps);
    }

    #[test]
    fn telemetry_scalars_round_trip(
        speed in any::<u16>(),
        rpm in any::<u16>(),
        gear in any::<i8>(),
        brakes in any::<[u16; 4]>(),
        legacy in any::<bool>(),
    ) {
        let car = CarTelemetryData {
            speed,
            engine_rpm: rpm,
            gear,
            brakes_temperature: brakes,
            ..CarTelemetryData::default()
        };
        let cars: [CarTelemetryData; NUM_CARS] = array::from_fn(|_| car.clone());
        let format = if legacy { 2022 } else { 2023 };
        let header = HeaderSpec { packet_format: format, ..HeaderSpec::default() };

        let bytes = test_utils::car_telemetry_datagram(&header, &cars, (0, 0, gear));
        let Packet::CarTelemetry(packet) = decode(&bytes) else {
            panic!("expected car telemetry");
        };
        prop_assert_eq!(packet.car_telemetry_data, cars);
        prop_assert_eq!(packet.suggested_gear, gear);
    }
}
