//! Tyre sets packet (id 12): the tyre allocation of a single car.

use serde::{Deserialize, Serialize};

use super::{PacketHeader, ProtocolVersion};
use crate::Result;
use crate::types::{WireReader, ensure_len};

pub const NUM_TYRE_SETS: usize = 20;
pub const TYRE_SET_DATA_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TyreSetData {
    pub actual_tyre_compound: u8,
    pub visual_tyre_compound: u8,
    /// Percent
    pub wear: u8,
    pub available: u8,
    pub recommended_session: u8,
    pub life_span: u8,
    pub usable_life: u8,
    /// Milliseconds relative to the fitted set
    pub lap_delta_time: i16,
    pub fitted: u8,
}

impl TyreSetData {
    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            actual_tyre_compound: r.u8()?,
            visual_tyre_compound: r.u8()?,
            wear: r.u8()?,
            available: r.u8()?,
            recommended_session: r.u8()?,
            life_span: r.u8()?,
            usable_life: r.u8()?,
            lap_delta_time: r.i16()?,
            fitted: r.u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TyreSetsPacket {
    pub header: PacketHeader,
    pub car_idx: u8,
    pub tyre_set_data: [TyreSetData; NUM_TYRE_SETS],
    pub fitted_idx: u8,
}

impl TyreSetsPacket {
    /// The set currently on the car, if `fitted_idx` names one.
    pub fn fitted(&self) -> Option<&TyreSetData> {
        self.tyre_set_data.get(self.fitted_idx as usize)
    }
}

pub const fn packet_size(version: ProtocolVersion) -> usize {
    version.header_size() + 1 + NUM_TYRE_SETS * TYRE_SET_DATA_SIZE + 1
}

pub(crate) fn decode(
    data: &[u8],
    header: PacketHeader,
    version: ProtocolVersion,
) -> Result<TyreSetsPacket> {
    ensure_len(data, packet_size(version), "tyre sets")?;
    let mut r = WireReader::at(data, version.header_size(), "tyre sets");
    let car_idx = r.u8()?;
    let tyre_set_data: [TyreSetData; NUM_TYRE_SETS] =
        r.records(TYRE_SET_DATA_SIZE, TyreSetData::read)?;
    Ok(TyreSetsPacket { header, car_idx, tyre_set_data, fitted_idx: r.u8()? })
}
