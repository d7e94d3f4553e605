//! Identifier enumerations carried in session and telemetry packets

use serde::{Deserialize, Serialize};

/// Circuit identifier from the session packet's `track_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Track {
    Melbourne,
    PaulRicard,
    Shanghai,
    Sakhir,
    Catalunya,
    Monaco,
    Montreal,
    Silverstone,
    Hockenheim,
    Hungaroring,
    Spa,
    Monza,
    Singapore,
    Suzuka,
    AbuDhabi,
    Texas,
    Brazil,
    Austria,
    Sochi,
    Mexico,
    Baku,
    SakhirShort,
    SilverstoneShort,
    TexasShort,
    SuzukaShort,
    Hanoi,
    Zandvoort,
    Imola,
    Portimao,
    Jeddah,
    Miami,
    LasVegas,
    Losail,
    /// -1 on the wire, or any id newer than this table
    Unknown(i8),
}

/// Decode a raw `track_id`.
pub fn decode_track(raw: i8) -> Track {
    match raw {
        0 => Track::Melbourne,
        1 => Track::PaulRicard,
        2 => Track::Shanghai,
        3 => Track::Sakhir,
        4 => Track::Catalunya,
        5 => Track::Monaco,
        6 => Track::Montreal,
        7 => Track::Silverstone,
        8 => Track::Hockenheim,
        9 => Track::Hungaroring,
        10 => Track::Spa,
        11 => Track::Monza,
        12 => Track::Singapore,
        13 => Track::Suzuka,
        14 => Track::AbuDhabi,
        15 => Track::Texas,
        16 => Track::Brazil,
        17 => Track::Austria,
        18 => Track::Sochi,
        19 => Track::Mexico,
        20 => Track::Baku,
        21 => Track::SakhirShort,
        22 => Track::SilverstoneShort,
        23 => Track::TexasShort,
        24 => Track::SuzukaShort,
        25 => Track::Hanoi,
        26 => Track::Zandvoort,
        27 => Track::Imola,
        28 => Track::Portimao,
        29 => Track::Jeddah,
        30 => Track::Miami,
        31 => Track::LasVegas,
        32 => Track::Losail,
        other => Track::Unknown(other),
    }
}

/// Session type from the session packet and weather forecast samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SessionType {
    Practice1,
    Practice2,
    Practice3,
    ShortPractice,
    Qualifying1,
    Qualifying2,
    Qualifying3,
    ShortQualifying,
    OneShotQualifying,
    Race,
    Race2,
    Race3,
    TimeTrial,
    /// 0 on the wire, or an id newer than this table
    Unknown(u8),
}

impl SessionType {
    pub fn is_race(self) -> bool {
        matches!(self, SessionType::Race | SessionType::Race2 | SessionType::Race3)
    }

    pub fn is_qualifying(self) -> bool {
        matches!(
            self,
            SessionType::Qualifying1
                | SessionType::Qualifying2
                | SessionType::Qualifying3
                | SessionType::ShortQualifying
                | SessionType::OneShotQualifying
        )
    }
}

pub fn decode_session_type(raw: u8) -> SessionType {
    match raw {
        1 => SessionType::Practice1,
        2 => SessionType::Practice2,
        3 => SessionType::Practice3,
        4 => SessionType::ShortPractice,
        5 => SessionType::Qualifying1,
        6 => SessionType::Qualifying2,
        7 => SessionType::Qualifying3,
        8 => SessionType::ShortQualifying,
        9 => SessionType::OneShotQualifying,
        10 => SessionType::Race,
        11 => SessionType::Race2,
        12 => SessionType::Race3,
        13 => SessionType::TimeTrial,
        other => SessionType::Unknown(other),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Weather {
    Clear,
    LightCloud,
    Overcast,
    LightRain,
    HeavyRain,
    Storm,
    Unknown(u8),
}

impl Weather {
    pub fn is_wet(self) -> bool {
        matches!(self, Weather::LightRain | Weather::HeavyRain | Weather::Storm)
    }
}

pub fn decode_weather(raw: u8) -> Weather {
    match raw {
        0 => Weather::Clear,
        1 => Weather::LightCloud,
        2 => Weather::Overcast,
        3 => Weather::LightRain,
        4 => Weather::HeavyRain,
        5 => Weather::Storm,
        other => Weather::Unknown(other),
    }
}

/// Surface under a wheel, from the car telemetry `surface_type` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SurfaceType {
    Tarmac,
    RumbleStrip,
    Concrete,
    Rock,
    Gravel,
    Mud,
    Sand,
    Grass,
    Water,
    Cobblestone,
    Metal,
    Ridged,
    Unknown(u8),
}

pub fn decode_surface_type(raw: u8) -> SurfaceType {
    match raw {
        0 => SurfaceType::Tarmac,
        1 => SurfaceType::RumbleStrip,
        2 => SurfaceType::Concrete,
        3 => SurfaceType::Rock,
        4 => SurfaceType::Gravel,
        5 => SurfaceType::Mud,
        6 => SurfaceType::Sand,
        7 => SurfaceType::Grass,
        8 => SurfaceType::Water,
        9 => SurfaceType::Cobblestone,
        10 => SurfaceType::Metal,
        11 => SurfaceType::Ridged,
        other => SurfaceType::Unknown(other),
    }
}
