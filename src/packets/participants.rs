//! Participants packet (id 4): driver and team identity per car slot.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{NUM_CARS, PacketHeader, ProtocolVersion};
use crate::types::{WireReader, ensure_len};
use crate::{Result, TelemetryError};

pub const PARTICIPANT_DATA_SIZE: usize = 58;
pub const NAME_WIDTH: usize = 48;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantData {
    pub ai_controlled: u8,
    pub driver_id: u8,
    pub network_id: u8,
    pub team_id: u8,
    pub my_team: u8,
    pub race_number: u8,
    pub nationality: u8,
    /// Empty when the game sent invalid UTF-8
    pub name: String,
    /// 0 restricted, 1 public
    pub your_telemetry: u8,
    pub show_online_names: u8,
    pub platform: u8,
}

impl ParticipantData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let ai_controlled = r.u8()?;
        let driver_id = r.u8()?;
        let network_id = r.u8()?;
        let team_id = r.u8()?;
        let my_team = r.u8()?;
        let race_number = r.u8()?;
        let nationality = r.u8()?;
        let name = match r.text(NAME_WIDTH, "name") {
            Ok(name) => name.chars().take(NAME_WIDTH).collect(),
            Err(TelemetryError::InvalidText { field, source }) => {
                warn!(
                    field = %field,
                    race_number,
                    error = %source,
                    "Participant name is not valid UTF-8"
                );
                String::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            ai_controlled,
            driver_id,
            network_id,
            team_id,
            my_team,
            race_number,
            nationality,
            name,
            your_telemetry: r.u8()?,
            show_online_names: r.u8()?,
            platform: r.u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantsPacket {
    pub header: PacketHeader,
    pub num_active_cars: u8,
    pub participants: [ParticipantData; NUM_CARS],
}

impl ParticipantsPacket {
    /// Participants in the slots the game reports as active.
    pub fn active(&self) -> &[ParticipantData] {
        let count = (self.num_active_cars as usize).min(NUM_CARS);
        &self.participants[..count]
    }
}

pub const fn packet_size(version: ProtocolVersion) -> usize {
    version.header_size() + 1 + NUM_CARS * PARTICIPANT_DATA_SIZE
}

pub(crate) fn decode(
    data: &[u8],
    header: PacketHeader,
    version: ProtocolVersion,
) -> Result<ParticipantsPacket> {
    ensure_len(data, packet_size(version), "participants")?;
    let mut r = WireReader::at(data, version.header_size(), "participants");
    let num_active_cars = r.u8()?;
    let participants: [ParticipantData; NUM_CARS] =
        r.records(PARTICIPANT_DATA_SIZE, ParticipantData::read)?;
    Ok(ParticipantsPacket { header, num_active_cars, participants })
}
