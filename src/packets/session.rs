//! Session packet (id 1): track, weather, rules and assist settings.

use serde::{Deserialize, Serialize};

use super::{PacketHeader, ProtocolVersion, serialize_array};
use crate::Result;
use crate::types::{
    SessionType, Track, Weather, WireReader, decode_session_type, decode_track, decode_weather,
    ensure_len,
};

pub const NUM_MARSHAL_ZONES: usize = 21;
pub const NUM_WEATHER_FORECAST_SAMPLES: usize = 56;
pub const MARSHAL_ZONE_SIZE: usize = 5;
pub const WEATHER_FORECAST_SAMPLE_SIZE: usize = 8;
pub const SESSION_PACKET_SIZE: usize = 644;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarshalZone {
    /// Fraction (0..1) of the way round the lap the zone starts
    pub zone_start: f32,
    /// -1 invalid/unknown, 0 none, 1 green, 2 blue, 3 yellow
    pub zone_flag: i8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecastSample {
    pub session_type: u8,
    /// Minutes ahead
    pub time_offset: u8,
    pub weather: u8,
    pub track_temperature: i8,
    pub track_temperature_change: i8,
    pub air_temperature: i8,
    pub air_temperature_change: i8,
    pub rain_percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionPacket {
    pub header: PacketHeader,
    pub weather: u8,
    pub track_temperature: i8,
    pub air_temperature: i8,
    pub total_laps: u8,
    /// Metres
    pub track_length: u16,
    pub session_type: u8,
    pub track_id: i8,
    pub formula: u8,
    /// Seconds
    pub session_time_left: u16,
    pub session_duration: u16,
    /// km/h
    pub pit_speed_limit: u8,
    pub game_paused: u8,
    pub is_spectating: u8,
    pub spectator_car_index: u8,
    pub sli_pro_native_support: u8,
    pub num_marshal_zones: u8,
    pub marshal_zones: [MarshalZone; NUM_MARSHAL_ZONES],
    pub safety_car_status: u8,
    pub network_game: u8,
    pub num_weather_forecast_samples: u8,
    #[serde(serialize_with = "serialize_array")]
    pub weather_forecast_samples: [WeatherForecastSample; NUM_WEATHER_FORECAST_SAMPLES],
    pub forecast_accuracy: u8,
    pub ai_difficulty: u8,
    pub season_link_identifier: u32,
    pub weekend_link_identifier: u32,
    pub session_link_identifier: u32,
    pub pit_stop_window_ideal_lap: u8,
    pub pit_stop_window_latest_lap: u8,
    pub pit_stop_rejoin_position: u8,
    pub steering_assist: u8,
    pub braking_assist: u8,
    pub gearbox_assist: u8,
    pub pit_assist: u8,
    pub pit_release_assist: u8,
    pub ers_assist: u8,
    pub drs_assist: u8,
    pub dynamic_racing_line: u8,
    pub dynamic_racing_line_type: u8,
    pub game_mode: u8,
    pub rule_set: u8,
    /// Minutes since midnight
    pub time_of_day: u32,
    pub session_length: u8,
    pub speed_units_lead_player: u8,
    pub temperature_units_lead_player: u8,
    pub speed_units_secondary_player: u8,
    pub temperature_units_secondary_player: u8,
    pub num_safety_car_periods: u8,
    pub num_virtual_safety_car_periods: u8,
    pub num_red_flag_periods: u8,
}

impl SessionPacket {
    pub fn track(&self) -> Track {
        decode_track(self.track_id)
    }

    pub fn session_kind(&self) -> SessionType {
        decode_session_type(self.session_type)
    }

    pub fn weather_kind(&self) -> Weather {
        decode_weather(self.weather)
    }

    /// Marshal zones the game reports as populated.
    pub fn active_marshal_zones(&self) -> &[MarshalZone] {
        let count = (self.num_marshal_zones as usize).min(NUM_MARSHAL_ZONES);
        &self.marshal_zones[..count]
    }

    /// Forecast samples the game reports as populated.
    pub fn active_weather_forecast_samples(&self) -> &[WeatherForecastSample] {
        let count = (self.num_weather_forecast_samples as usize).min(NUM_WEATHER_FORECAST_SAMPLES);
        &self.weather_forecast_samples[..count]
    }
}

impl MarshalZone {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self { zone_start: r.f32()?, zone_flag: r.i8()? })
    }
}

impl WeatherForecastSample {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            session_type: r.u8()?,
            time_offset: r.u8()?,
            weather: r.u8()?,
            track_temperature: r.i8()?,
            track_temperature_change: r.i8()?,
            air_temperature: r.i8()?,
            air_temperature_change: r.i8()?,
            rain_percentage: r.u8()?,
        })
    }
}

pub(crate) fn decode(
    data: &[u8],
    header: PacketHeader,
    version: ProtocolVersion,
) -> Result<SessionPacket> {
    ensure_len(data, SESSION_PACKET_SIZE, "session")?;
    let mut r = WireReader::at(data, version.header_size(), "session");

    let weather = r.u8()?;
    let track_temperature = r.i8()?;
    let air_temperature = r.i8()?;
    let total_laps = r.u8()?;
    let track_length = r.u16()?;
    let session_type = r.u8()?;
    let track_id = r.i8()?;
    let formula = r.u8()?;
    let session_time_left = r.u16()?;
    let session_duration = r.u16()?;
    let pit_speed_limit = r.u8()?;
    let game_paused = r.u8()?;
    let is_spectating = r.u8()?;
    let spectator_car_index = r.u8()?;
    let sli_pro_native_support = r.u8()?;
    let num_marshal_zones = r.u8()?;
    let marshal_zones: [MarshalZone; NUM_MARSHAL_ZONES] =
        r.records(MARSHAL_ZONE_SIZE, MarshalZone::read)?;
    let safety_car_status = r.u8()?;
    let network_game = r.u8()?;
    let num_weather_forecast_samples = r.u8()?;
    let weather_forecast_samples: [WeatherForecastSample; NUM_WEATHER_FORECAST_SAMPLES] =
        r.records(WEATHER_FORECAST_SAMPLE_SIZE, WeatherForecastSample::read)?;

    Ok(SessionPacket {
        header,
        weather,
        track_temperature,
        air_temperature,
        total_laps,
        track_length,
        session_type,
        track_id,
        formula,
        session_time_left,
        session_duration,
        pit_speed_limit,
        game_paused,
        is_spectating,
        spectator_car_index,
        sli_pro_native_support,
        num_marshal_zones,
        marshal_zones,
        safety_car_status,
        network_game,
        num_weather_forecast_samples,
        weather_forecast_samples,
        forecast_accuracy: r.u8()?,
        ai_difficulty: r.u8()?,
        season_link_identifier: r.u32()?,
        weekend_link_identifier: r.u32()?,
        session_link_identifier: r.u32()?,
        pit_stop_window_ideal_lap: r.u8()?,
        pit_stop_window_latest_lap: r.u8()?,
        pit_stop_rejoin_position: r.u8()?,
        steering_assist: r.u8()?,
        braking_assist: r.u8()?,
        gearbox_assist: r.u8()?,
        pit_assist: r.u8()?,
        pit_release_assist: r.u8()?,
        ers_assist: r.u8()?,
        drs_assist: r.u8()?,
        dynamic_racing_line: r.u8()?,
        dynamic_racing_line_type: r.u8()?,
        game_mode: r.u8()?,
        rule_set: r.u8()?,
        time_of_day: r.u32()?,
        session_length: r.u8()?,
        speed_units_lead_player: r.u8()?,
        temperature_units_lead_player: r.u8()?,
        speed_units_secondary_player: r.u8()?,
        temperature_units_secondary_player: r.u8()?,
        num_safety_car_periods: r.u8()?,
        num_virtual_safety_car_periods: r.u8()?,
        num_red_flag_periods: r.u8()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, HeaderSpec};
    use crate::{Packet, TelemetryError, decode_packet};

    fn decode_sample() -> SessionPacket {
        let bytes = test_utils::session_datagram(&HeaderSpec::default());
        assert_eq!(bytes.len(), SESSION_PACKET_SIZE);
        match decode_packet(&bytes).unwrap() {
            Packet::Session(session) => session,
            other => panic!("expected session, got {:?}", other.kind()),
        }
    }

    #[test]
    fn decodes_fixed_offsets() {
        let session = decode_sample();
        assert_eq!(session.weather, 3);
        assert_eq!(session.track_temperature, -5);
        assert_eq!(session.track_length, 5891);
        assert_eq!(session.track_id, 7);
        assert_eq!(session.num_marshal_zones, 17);
        assert_eq!(session.marshal_zones[20].zone_flag, -1);
        assert_eq!(session.safety_car_status, 2);
        assert_eq!(session.weather_forecast_samples[55].rain_percentage, 55);
        assert_eq!(session.weekend_link_identifier, 0x0A0B_0C0D);
        assert_eq!(session.time_of_day, 840);
        assert_eq!(session.num_red_flag_periods, 1);
    }

    #[test]
    fn typed_accessors() {
        let session = decode_sample();
        assert_eq!(session.track(), Track::Silverstone);
        assert_eq!(session.weather_kind(), Weather::LightRain);
        assert_eq!(session.session_kind(), SessionType::Race);
        assert_eq!(session.active_marshal_zones().len(), 17);
        assert_eq!(session.active_weather_forecast_samples().len(), 56);
    }

    #[test]
    fn cut_in_trailing_region_is_truncated() {
        let bytes = test_utils::session_datagram(&HeaderSpec::default());
        let result = decode_packet(&bytes[..620]);
        assert!(matches!(result, Err(TelemetryError::TruncatedBuffer { needed: 644, .. })));
    }
}
