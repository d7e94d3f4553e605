//! Datagram builders for tests and benchmarks
//!
//! Builders write the same little-endian layouts the decoders read, with
//! values that are distinct per car slot and exactly representable, so a
//! decoded packet can be compared field for field with what was sent.

#![cfg(any(test, feature = "benchmark"))]

use std::array;

use crate::packets::{
    CarDamageData, CarMotionData, CarSetupData, CarStatusData, CarTelemetryData,
    FinalClassificationData, LapData, NUM_CARS, PacketKind, ParticipantData, ProtocolVersion,
    TyreSetData,
    participants::NAME_WIDTH,
    session::{NUM_MARSHAL_ZONES, NUM_WEATHER_FORECAST_SAMPLES},
    tyre_sets::NUM_TYRE_SETS,
};

/// Little-endian byte writer, the inverse of [`WireReader`](crate::types::WireReader).
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

macro_rules! write_le {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(&mut self, value: $ty) -> &mut Self {
                self.buf.extend_from_slice(&value.to_le_bytes());
                self
            }
        )*
    };
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    write_le!(u8: u8, i8: i8, u16: u16, i16: i16, u32: u32, u64: u64, f32: f32, f64: f64);

    pub fn u8s(&mut self, values: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(values);
        self
    }

    pub fn u16s(&mut self, values: &[u16]) -> &mut Self {
        for &value in values {
            self.u16(value);
        }
        self
    }

    pub fn f32s(&mut self, values: &[f32]) -> &mut Self {
        for &value in values {
            self.f32(value);
        }
        self
    }

    /// Fixed-width text: truncated to `width` bytes, NUL-padded when shorter.
    pub fn text(&mut self, value: &str, width: usize) -> &mut Self {
        let bytes = value.as_bytes();
        let used = bytes.len().min(width);
        self.buf.extend_from_slice(&bytes[..used]);
        self.buf.resize(self.buf.len() + (width - used), 0);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Header values for a synthetic datagram.
///
/// `packet_format` 2022 writes the 24-byte header without `game_year` and
/// `overall_frame_identifier`; any other format writes the 29-byte layout.
#[derive(Debug, Clone, Copy)]
pub struct HeaderSpec {
    pub packet_format: u16,
    pub game_year: u8,
    pub game_major_version: u8,
    pub game_minor_version: u8,
    pub packet_version: u8,
    pub packet_id: u8,
    pub session_uid: u64,
    pub session_time: f32,
    pub frame_identifier: u32,
    pub overall_frame_identifier: u32,
    pub player_car_index: u8,
    pub secondary_player_car_index: u8,
}

impl Default for HeaderSpec {
    fn default() -> Self {
        Self {
            packet_format: 2023,
            game_year: 23,
            game_major_version: 1,
            game_minor_version: 18,
            packet_version: 1,
            packet_id: 0,
            session_uid: 0x1234_5678_9ABC_DEF0,
            session_time: 321.5,
            frame_identifier: 1000,
            overall_frame_identifier: 1000,
            player_car_index: 0,
            secondary_player_car_index: 255,
        }
    }
}

impl HeaderSpec {
    pub fn version(&self) -> ProtocolVersion {
        match self.packet_format {
            2022 => ProtocolVersion::Format2022,
            _ => ProtocolVersion::Format2023,
        }
    }

    /// Header bytes alone, with `packet_id` as given.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = WireWriter::new();
        self.write(&mut w);
        w.into_bytes()
    }

    fn write(&self, w: &mut WireWriter) {
        let legacy = self.version() == ProtocolVersion::Format2022;
        w.u16(self.packet_format);
        if !legacy {
            w.u8(self.game_year);
        }
        w.u8(self.game_major_version)
            .u8(self.game_minor_version)
            .u8(self.packet_version)
            .u8(self.packet_id)
            .u64(self.session_uid)
            .f32(self.session_time)
            .u32(self.frame_identifier);
        if !legacy {
            w.u32(self.overall_frame_identifier);
        }
        w.u8(self.player_car_index).u8(self.secondary_player_car_index);
    }

    /// Start a datagram for `kind`, overriding `packet_id`.
    fn start(&self, kind: PacketKind) -> WireWriter {
        let mut w = WireWriter::new();
        HeaderSpec { packet_id: kind.id(), ..*self }.write(&mut w);
        w
    }
}

/// A complete datagram of `kind` built from the default record sets.
pub fn datagram_for(kind: PacketKind, header: &HeaderSpec) -> Vec<u8> {
    match kind {
        PacketKind::Motion => motion_datagram(header, &motion_cars()),
        PacketKind::Session => session_datagram(header),
        PacketKind::LapData => lap_data_datagram(header, &lap_data_cars(), 255, 255),
        PacketKind::Participants => participants_datagram(header, 22, &participant_cars()),
        PacketKind::CarSetup => car_setup_datagram(header, &car_setup_cars()),
        PacketKind::CarTelemetry => {
            car_telemetry_datagram(header, &car_telemetry_cars(), (255, 255, 0))
        }
        PacketKind::CarStatus => car_status_datagram(header, &car_status_cars()),
        PacketKind::FinalClassification => {
            final_classification_datagram(header, 22, &final_classification_cars())
        }
        PacketKind::CarDamage => car_damage_datagram(header, &car_damage_cars()),
        PacketKind::TyreSets => tyre_sets_datagram(header, 0, &tyre_sets(), 0),
    }
}

// Motion

pub fn motion_cars() -> [CarMotionData; NUM_CARS] {
    array::from_fn(|i| {
        let f = i as f32;
        let n = i as i16;
        CarMotionData {
            world_position_x: 100.0 + f,
            world_position_y: -2.5 + f * 0.25,
            world_position_z: -300.0 - f,
            world_velocity_x: 50.5 + f,
            world_velocity_y: 0.125,
            world_velocity_z: -12.0 + f,
            world_forward_dir_x: if i == NUM_CARS - 1 { -32767 } else { 1000 * n },
            world_forward_dir_y: -n,
            world_forward_dir_z: 32767 - n,
            world_right_dir_x: n * 3,
            world_right_dir_y: i16::MIN + n,
            world_right_dir_z: -7,
            g_force_lateral: 1.5 + f * 0.5,
            g_force_longitudinal: -0.75,
            g_force_vertical: 1.0,
            yaw: 3.0 - f * 0.125,
            pitch: 0.0625,
            roll: -0.03125,
        }
    })
}

pub fn motion_datagram(header: &HeaderSpec, cars: &[CarMotionData; NUM_CARS]) -> Vec<u8> {
    let mut w = header.start(PacketKind::Motion);
    for car in cars {
        w.f32(car.world_position_x)
            .f32(car.world_position_y)
            .f32(car.world_position_z)
            .f32(car.world_velocity_x)
            .f32(car.world_velocity_y)
            .f32(car.world_velocity_z)
            .i16(car.world_forward_dir_x)
            .i16(car.world_forward_dir_y)
            .i16(car.world_forward_dir_z)
            .i16(car.world_right_dir_x)
            .i16(car.world_right_dir_y)
            .i16(car.world_right_dir_z)
            .f32(car.g_force_lateral)
            .f32(car.g_force_longitudinal)
            .f32(car.g_force_vertical)
            .f32(car.yaw)
            .f32(car.pitch)
            .f32(car.roll);
    }
    w.into_bytes()
}

// Session

/// Session at Silverstone in light rain, 17 marshal zones, 56 forecast samples.
pub fn session_datagram(header: &HeaderSpec) -> Vec<u8> {
    let mut w = header.start(PacketKind::Session);
    w.u8(3) // weather
        .i8(-5) // track temperature
        .i8(18)
        .u8(52)
        .u16(5891)
        .u8(10) // race
        .i8(7) // Silverstone
        .u8(0)
        .u16(5400)
        .u16(7200)
        .u8(80)
        .u8(0)
        .u8(0)
        .u8(255)
        .u8(0)
        .u8(17);
    for zone in 0..NUM_MARSHAL_ZONES {
        let flag = if zone == NUM_MARSHAL_ZONES - 1 { -1 } else { (zone % 4) as i8 };
        w.f32(zone as f32 / 32.0).i8(flag);
    }
    w.u8(2) // safety car status
        .u8(1)
        .u8(NUM_WEATHER_FORECAST_SAMPLES as u8);
    for sample in 0..NUM_WEATHER_FORECAST_SAMPLES {
        w.u8(10)
            .u8((sample * 5) as u8)
            .u8(3)
            .i8(-5)
            .i8(1)
            .i8(17)
            .i8(-1)
            .u8(sample as u8);
    }
    w.u8(1) // forecast accuracy
        .u8(90)
        .u32(0x0102_0304)
        .u32(0x0A0B_0C0D)
        .u32(0x1112_1314)
        .u8(20)
        .u8(26)
        .u8(12);
    // Nine assists, then game mode and rule set
    w.u8s(&[0, 1, 2, 0, 1, 0, 1, 2, 1]).u8(19).u8(1);
    w.u32(840) // time of day
        .u8(7)
        .u8(0)
        .u8(0)
        .u8(1)
        .u8(1)
        .u8(2)
        .u8(1)
        .u8(1); // red flag periods
    w.into_bytes()
}

// Lap data

pub fn lap_data_cars() -> [LapData; NUM_CARS] {
    array::from_fn(|i| {
        let n = i as u8;
        LapData {
            last_lap_time_in_ms: 88_000 + i as u32 * 137,
            current_lap_time_in_ms: 41_250 + i as u32,
            sector1_time_in_ms: 28_500 + i as u16,
            sector1_time_minutes: n % 2,
            sector2_time_in_ms: 31_000 + i as u16 * 3,
            sector2_time_minutes: 0,
            delta_to_car_in_front_in_ms: 400 + i as u16,
            delta_to_race_leader_in_ms: 1_000 * i as u16,
            lap_distance: 1024.5 + i as f32,
            total_distance: 20_480.25 + i as f32,
            safety_car_delta: -0.5,
            car_position: n + 1,
            current_lap_num: 12,
            pit_status: n % 3,
            num_pit_stops: n % 2,
            sector: n % 3,
            current_lap_invalid: u8::from(i == 5),
            penalties: n % 4,
            total_warnings: n % 5,
            corner_cutting_warnings: n % 3,
            num_unserved_drive_through_pens: 0,
            num_unserved_stop_go_pens: u8::from(i == 9),
            grid_position: NUM_CARS as u8 - n,
            driver_status: 4,
            result_status: 2,
            pit_lane_timer_active: 0,
            pit_lane_time_in_lane_in_ms: 0,
            pit_stop_timer_in_ms: 2_300 + i as u16,
            pit_stop_should_serve_pen: u8::from(i == 13),
        }
    })
}

pub fn lap_data_datagram(
    header: &HeaderSpec,
    laps: &[LapData; NUM_CARS],
    time_trial_pb_car_idx: u8,
    time_trial_rival_car_idx: u8,
) -> Vec<u8> {
    let legacy = header.version() == ProtocolVersion::Format2022;
    let mut w = header.start(PacketKind::LapData);
    for lap in laps {
        w.u32(lap.last_lap_time_in_ms)
            .u32(lap.current_lap_time_in_ms)
            .u16(lap.sector1_time_in_ms);
        if !legacy {
            w.u8(lap.sector1_time_minutes);
        }
        w.u16(lap.sector2_time_in_ms);
        if !legacy {
            w.u8(lap.sector2_time_minutes)
                .u16(lap.delta_to_car_in_front_in_ms)
                .u16(lap.delta_to_race_leader_in_ms);
        }
        w.f32(lap.lap_distance)
            .f32(lap.total_distance)
            .f32(lap.safety_car_delta)
            .u8(lap.car_position)
            .u8(lap.current_lap_num)
            .u8(lap.pit_status)
            .u8(lap.num_pit_stops)
            .u8(lap.sector)
            .u8(lap.current_lap_invalid)
            .u8(lap.penalties)
            .u8(lap.total_warnings);
        if !legacy {
            w.u8(lap.corner_cutting_warnings);
        }
        w.u8(lap.num_unserved_drive_through_pens)
            .u8(lap.num_unserved_stop_go_pens)
            .u8(lap.grid_position)
            .u8(lap.driver_status)
            .u8(lap.result_status)
            .u8(lap.pit_lane_timer_active)
            .u16(lap.pit_lane_time_in_lane_in_ms)
            .u16(lap.pit_stop_timer_in_ms)
            .u8(lap.pit_stop_should_serve_pen);
    }
    w.u8(time_trial_pb_car_idx).u8(time_trial_rival_car_idx);
    w.into_bytes()
}

// Participants

pub fn participant_cars() -> [ParticipantData; NUM_CARS] {
    array::from_fn(|i| {
        let n = i as u8;
        ParticipantData {
            ai_controlled: u8::from(i != 0),
            driver_id: n + 10,
            network_id: n,
            team_id: n / 2,
            my_team: 0,
            race_number: n + 1,
            nationality: n + 3,
            name: format!("DRIVER {}", i),
            your_telemetry: n % 2,
            show_online_names: 1,
            platform: 6,
        }
    })
}

pub fn participants_datagram(
    header: &HeaderSpec,
    num_active_cars: u8,
    cars: &[ParticipantData; NUM_CARS],
) -> Vec<u8> {
    let mut w = header.start(PacketKind::Participants);
    w.u8(num_active_cars);
    for car in cars {
        w.u8(car.ai_controlled)
            .u8(car.driver_id)
            .u8(car.network_id)
            .u8(car.team_id)
            .u8(car.my_team)
            .u8(car.race_number)
            .u8(car.nationality)
            .text(&car.name, NAME_WIDTH)
            .u8(car.your_telemetry)
            .u8(car.show_online_names)
            .u8(car.platform);
    }
    w.into_bytes()
}

// Car setups

pub fn car_setup_cars() -> [CarSetupData; NUM_CARS] {
    array::from_fn(|i| {
        let n = i as u8;
        let f = i as f32;
        CarSetupData {
            front_wing: 20 + n % 30,
            rear_wing: 15 + n % 30,
            on_throttle: 50 + n,
            off_throttle: 60,
            front_camber: -3.5 + f * 0.0625,
            rear_camber: -2.0,
            front_toe: 0.0625,
            rear_toe: 0.25,
            front_suspension: 25,
            rear_suspension: 10,
            front_anti_roll_bar: 8,
            rear_anti_roll_bar: 5,
            front_suspension_height: 30,
            rear_suspension_height: 60,
            brake_pressure: 100,
            brake_bias: 56,
            rear_left_tyre_pressure: 21.5,
            rear_right_tyre_pressure: 21.5,
            front_left_tyre_pressure: 24.5 + f * 0.125,
            front_right_tyre_pressure: 24.5,
            ballast: n % 12,
            fuel_load: 100.0 - f,
        }
    })
}

pub fn car_setup_datagram(header: &HeaderSpec, setups: &[CarSetupData; NUM_CARS]) -> Vec<u8> {
    let mut w = header.start(PacketKind::CarSetup);
    for s in setups {
        w.u8(s.front_wing)
            .u8(s.rear_wing)
            .u8(s.on_throttle)
            .u8(s.off_throttle)
            .f32(s.front_camber)
            .f32(s.rear_camber)
            .f32(s.front_toe)
            .f32(s.rear_toe)
            .u8(s.front_suspension)
            .u8(s.rear_suspension)
            .u8(s.front_anti_roll_bar)
            .u8(s.rear_anti_roll_bar)
            .u8(s.front_suspension_height)
            .u8(s.rear_suspension_height)
            .u8(s.brake_pressure)
            .u8(s.brake_bias)
            .f32(s.rear_left_tyre_pressure)
            .f32(s.rear_right_tyre_pressure)
            .f32(s.front_left_tyre_pressure)
            .f32(s.front_right_tyre_pressure)
            .u8(s.ballast)
            .f32(s.fuel_load);
    }
    w.into_bytes()
}

// Car telemetry

pub fn car_telemetry_cars() -> [CarTelemetryData; NUM_CARS] {
    array::from_fn(|i| {
        let n = i as u8;
        let f = i as f32;
        CarTelemetryData {
            speed: 180 + i as u16 * 4,
            throttle: 0.75,
            steer: -0.5 + f / 32.0,
            brake: if i % 3 == 0 { 0.25 } else { 0.0 },
            clutch: 0,
            gear: if i == 7 { -1 } else { (i % 8) as i8 + 1 },
            engine_rpm: 10_500 + i as u16 * 20,
            drs: n % 2,
            rev_lights_percent: 60 + n,
            rev_lights_bit_value: 0x3FF >> (i % 10),
            brakes_temperature: [400 + i as u16, 410, 520, 530 - i as u16],
            tyres_surface_temperature: [90, 91, 95 + n, 96],
            tyres_inner_temperature: [100, 101, 102, 103 + n],
            engine_temperature: 105,
            tyres_pressure: [21.5, 21.5, 23.25 + f * 0.25, 23.25],
            surface_type: [0, 0, n % 12, 1],
        }
    })
}

/// `trailing` is `(mfd_panel_index, mfd_panel_index_secondary_player, suggested_gear)`.
pub fn car_telemetry_datagram(
    header: &HeaderSpec,
    cars: &[CarTelemetryData; NUM_CARS],
    trailing: (u8, u8, i8),
) -> Vec<u8> {
    let mut w = header.start(PacketKind::CarTelemetry);
    for car in cars {
        w.u16(car.speed)
            .f32(car.throttle)
            .f32(car.steer)
            .f32(car.brake)
            .u8(car.clutch)
            .i8(car.gear)
            .u16(car.engine_rpm)
            .u8(car.drs)
            .u8(car.rev_lights_percent)
            .u16(car.rev_lights_bit_value)
            .u16s(&car.brakes_temperature)
            .u8s(&car.tyres_surface_temperature)
            .u8s(&car.tyres_inner_temperature)
            .u16(car.engine_temperature)
            .f32s(&car.tyres_pressure)
            .u8s(&car.surface_type);
    }
    let (mfd_panel_index, mfd_panel_index_secondary_player, suggested_gear) = trailing;
    w.u8(mfd_panel_index).u8(mfd_panel_index_secondary_player).i8(suggested_gear);
    w.into_bytes()
}

// Car status

pub fn car_status_cars() -> [CarStatusData; NUM_CARS] {
    array::from_fn(|i| {
        let n = i as u8;
        let f = i as f32;
        CarStatusData {
            traction_control: n % 3,
            anti_lock_brakes: 0,
            fuel_mix: 1 + n % 3,
            front_brake_bias: 55 + n % 5,
            pit_limiter_status: 0,
            fuel_in_tank: 42.5 - f * 0.5,
            fuel_capacity: 110.0,
            fuel_remaining_laps: 3.25 + f * 0.25,
            max_rpm: 13_000,
            idle_rpm: 4_000,
            max_gears: 8,
            drs_allowed: n % 2,
            drs_activation_distance: if i % 2 == 0 { 0 } else { 250 },
            actual_tyre_compound: 16 + n % 3,
            visual_tyre_compound: 16 + n % 3,
            tyres_age_laps: n,
            vehicle_fia_flags: if i == 4 { -1 } else { (i % 4) as i8 },
            engine_power_ice: 596_000.0 + f * 128.0,
            engine_power_mguk: 120_000.0,
            ers_store_energy: 4_000_000.0 - f * 1024.0,
            ers_deploy_mode: n % 4,
            ers_harvested_this_lap_mguk: 250_000.5,
            ers_harvested_this_lap_mguh: 0.0,
            ers_deployed_this_lap: 1_000_000.0 + f,
            network_paused: 0,
        }
    })
}

/// Format 2022 omits the engine power fields.
pub fn car_status_datagram(header: &HeaderSpec, cars: &[CarStatusData; NUM_CARS]) -> Vec<u8> {
    let legacy = header.version() == ProtocolVersion::Format2022;
    let mut w = header.start(PacketKind::CarStatus);
    for car in cars {
        w.u8(car.traction_control)
            .u8(car.anti_lock_brakes)
            .u8(car.fuel_mix)
            .u8(car.front_brake_bias)
            .u8(car.pit_limiter_status)
            .f32(car.fuel_in_tank)
            .f32(car.fuel_capacity)
            .f32(car.fuel_remaining_laps)
            .u16(car.max_rpm)
            .u16(car.idle_rpm)
            .u8(car.max_gears)
            .u8(car.drs_allowed)
            .u16(car.drs_activation_distance)
            .u8(car.actual_tyre_compound)
            .u8(car.visual_tyre_compound)
            .u8(car.tyres_age_laps)
            .i8(car.vehicle_fia_flags);
        if !legacy {
            w.f32(car.engine_power_ice).f32(car.engine_power_mguk);
        }
        w.f32(car.ers_store_energy)
            .u8(car.ers_deploy_mode)
            .f32(car.ers_harvested_this_lap_mguk)
            .f32(car.ers_harvested_this_lap_mguh)
            .f32(car.ers_deployed_this_lap)
            .u8(car.network_paused);
    }
    w.into_bytes()
}

// Car damage

pub fn car_damage_cars() -> [CarDamageData; NUM_CARS] {
    array::from_fn(|i| {
        let n = i as u8;
        let f = i as f32;
        CarDamageData {
            tyres_wear: [12.5 + f, 12.75, 10.25, 10.0 + f * 0.5],
            tyres_damage: [n, n + 1, 2, 3],
            brakes_damage: [0, 1, n % 7, 4],
            front_left_wing_damage: n,
            front_right_wing_damage: 0,
            rear_wing_damage: n % 10,
            floor_damage: 5,
            diffuser_damage: 0,
            sidepod_damage: 1,
            drs_fault: u8::from(i == 3),
            ers_fault: 0,
            gear_box_damage: 7,
            engine_damage: 9,
            engine_mguh_wear: 20,
            engine_es_wear: 21,
            engine_ce_wear: 22,
            engine_ice_wear: 23 + n,
            engine_mguk_wear: 24,
            engine_tc_wear: 25,
            engine_blown: 0,
            engine_seized: u8::from(i == 21),
        }
    })
}

pub fn car_damage_datagram(header: &HeaderSpec, cars: &[CarDamageData; NUM_CARS]) -> Vec<u8> {
    let mut w = header.start(PacketKind::CarDamage);
    for car in cars {
        w.f32s(&car.tyres_wear)
            .u8s(&car.tyres_damage)
            .u8s(&car.brakes_damage)
            .u8(car.front_left_wing_damage)
            .u8(car.front_right_wing_damage)
            .u8(car.rear_wing_damage)
            .u8(car.floor_damage)
            .u8(car.diffuser_damage)
            .u8(car.sidepod_damage)
            .u8(car.drs_fault)
            .u8(car.ers_fault)
            .u8(car.gear_box_damage)
            .u8(car.engine_damage)
            .u8(car.engine_mguh_wear)
            .u8(car.engine_es_wear)
            .u8(car.engine_ce_wear)
            .u8(car.engine_ice_wear)
            .u8(car.engine_mguk_wear)
            .u8(car.engine_tc_wear)
            .u8(car.engine_blown)
            .u8(car.engine_seized);
    }
    w.into_bytes()
}

// Final classification

pub fn final_classification_cars() -> [FinalClassificationData; NUM_CARS] {
    array::from_fn(|i| {
        let n = i as u8;
        FinalClassificationData {
            position: n + 1,
            num_laps: 52,
            grid_position: NUM_CARS as u8 - n,
            points: [25, 18, 15, 12, 10, 8, 6, 4, 2, 1].get(i).copied().unwrap_or(0),
            num_pit_stops: 1 + n % 2,
            result_status: 3,
            best_lap_time_in_ms: 87_654 + i as u32 * 11,
            total_race_time: 5_123.5 + i as f64 * 2.25,
            penalties_time: if i == 6 { 5 } else { 0 },
            num_penalties: u8::from(i == 6),
            num_tyre_stints: 2,
            tyre_stints_actual: [16, 17, 0, 0, 0, 0, 0, n],
            tyre_stints_visual: [16, 17, 0, 0, 0, 0, 0, 0],
            tyre_stints_end_laps: [20 + n % 5, 52, 0, 0, 0, 0, 0, 0],
        }
    })
}

pub fn final_classification_datagram(
    header: &HeaderSpec,
    num_cars: u8,
    cars: &[FinalClassificationData; NUM_CARS],
) -> Vec<u8> {
    let mut w = header.start(PacketKind::FinalClassification);
    w.u8(num_cars);
    for car in cars {
        w.u8(car.position)
            .u8(car.num_laps)
            .u8(car.grid_position)
            .u8(car.points)
            .u8(car.num_pit_stops)
            .u8(car.result_status)
            .u32(car.best_lap_time_in_ms)
            .f64(car.total_race_time)
            .u8(car.penalties_time)
            .u8(car.num_penalties)
            .u8(car.num_tyre_stints)
            .u8s(&car.tyre_stints_actual)
            .u8s(&car.tyre_stints_visual)
            .u8s(&car.tyre_stints_end_laps);
    }
    w.into_bytes()
}

// Tyre sets

pub fn tyre_sets() -> [TyreSetData; NUM_TYRE_SETS] {
    array::from_fn(|i| {
        let n = i as u8;
        TyreSetData {
            actual_tyre_compound: 16 + n % 3,
            visual_tyre_compound: 16 + n % 3,
            wear: n * 4,
            available: u8::from(i % 5 != 0),
            recommended_session: n % 4,
            life_span: 30 - n,
            usable_life: 25 - n,
            lap_delta_time: i as i16 * 150 - 1000,
            fitted: u8::from(i == 0),
        }
    })
}

pub fn tyre_sets_datagram(
    header: &HeaderSpec,
    car_idx: u8,
    sets: &[TyreSetData; NUM_TYRE_SETS],
    fitted_idx: u8,
) -> Vec<u8> {
    let mut w = header.start(PacketKind::TyreSets);
    w.u8(car_idx);
    for set in sets {
        w.u8(set.actual_tyre_compound)
            .u8(set.visual_tyre_compound)
            .u8(set.wear)
            .u8(set.available)
            .u8(set.recommended_session)
            .u8(set.life_span)
            .u8(set.usable_life)
            .i16(set.lap_delta_time)
            .u8(set.fitted);
    }
    w.u8(fitted_idx);
    w.into_bytes()
}
