//! Domain checks for every primitive parameter.
//!
//! The `is_valid_*` predicates are pure. The `check_*` functions run every
//! predicate that applies to a compound parameter and report the first
//! violation; builders and registry mutators call them before touching any
//! other state.

use crate::error::{CodecError, CodecResult, ParamKind};
use crate::types::{
    Location2D, Location3D, PsrEntry, RoutingAdvertisement, WsaChannelInfo, WsaHeader,
    WsaServiceInfo, WsmTxParams,
};

/// Data rates (500 kb/s units) of 10 MHz and 20 MHz OFDM channels.
pub const VALID_DATA_RATES: [u8; 11] = [6, 9, 12, 18, 24, 36, 48, 54, 72, 96, 108];

pub const MAX_PRIORITY: u8 = 7;
pub const MIN_CHANNEL_NUMBER: u8 = 1;
pub const MAX_CHANNEL_NUMBER: u8 = 200;
pub const MIN_TX_POWER: i8 = -20;
pub const MAX_TX_POWER: i8 = 44;
pub const MIN_LATITUDE: i32 = -900_000_000;
/// Latitude "unavailable" marker.
pub const MAX_LATITUDE: i32 = 900_000_001;
pub const MIN_LONGITUDE: i32 = -1_799_999_999;
/// Longitude "unavailable" marker.
pub const MAX_LONGITUDE: i32 = 1_800_000_001;
pub const MIN_ELEVATION: i32 = -4096;
pub const MAX_ELEVATION: i32 = 61_439;
pub const MAX_PSC_LEN: usize = 31;
pub const MAX_WSA_ID: u8 = 15;
pub const MAX_CONTENT_COUNT: u8 = 15;
pub const MAX_ADVERTISER_ID_LEN: usize = 32;
pub const MAX_PREFIX_LEN: u8 = 128;
pub const MAX_CHANNEL_INDEX: u8 = 31;

#[must_use]
pub const fn is_valid_psid(psid: u32) -> bool {
    psid <= crate::Psid::MAX
}

#[must_use]
pub const fn is_valid_priority(priority: u8) -> bool {
    priority <= MAX_PRIORITY
}

#[must_use]
pub const fn is_valid_channel_number(channel: u8) -> bool {
    channel >= MIN_CHANNEL_NUMBER && channel <= MAX_CHANNEL_NUMBER
}

#[must_use]
pub fn is_valid_data_rate(rate: u8) -> bool {
    VALID_DATA_RATES.contains(&rate)
}

#[must_use]
pub const fn is_valid_tx_power(power: i8) -> bool {
    power >= MIN_TX_POWER && power <= MAX_TX_POWER
}

#[must_use]
pub const fn is_valid_latitude(latitude: i32) -> bool {
    latitude >= MIN_LATITUDE && latitude <= MAX_LATITUDE
}

#[must_use]
pub const fn is_valid_longitude(longitude: i32) -> bool {
    longitude >= MIN_LONGITUDE && longitude <= MAX_LONGITUDE
}

#[must_use]
pub const fn is_valid_elevation(elevation: i32) -> bool {
    elevation >= MIN_ELEVATION && elevation <= MAX_ELEVATION
}

#[must_use]
pub const fn is_valid_psc_len(len: usize) -> bool {
    len <= MAX_PSC_LEN
}

#[must_use]
pub const fn is_valid_wsa_id(id: u8) -> bool {
    id <= MAX_WSA_ID
}

#[must_use]
pub const fn is_valid_content_count(count: u8) -> bool {
    count <= MAX_CONTENT_COUNT
}

#[must_use]
pub const fn is_valid_advertiser_id_len(len: usize) -> bool {
    len >= 1 && len <= MAX_ADVERTISER_ID_LEN
}

#[must_use]
pub const fn is_valid_prefix_len(len: u8) -> bool {
    len <= MAX_PREFIX_LEN
}

#[must_use]
pub const fn is_valid_wsa_count_threshold_interval(interval: u8) -> bool {
    interval >= 1
}

#[must_use]
pub const fn is_valid_channel_index(index: u8) -> bool {
    index >= 1 && index <= MAX_CHANNEL_INDEX
}

fn ensure(valid: bool, kind: ParamKind, value: impl Into<i64>) -> CodecResult<()> {
    if valid {
        Ok(())
    } else {
        Err(CodecError::InvalidParam {
            kind,
            value: value.into(),
        })
    }
}

fn check_len(valid: bool, kind: ParamKind, len: usize) -> CodecResult<()> {
    ensure(valid, kind, i64::try_from(len).unwrap_or(i64::MAX))
}

pub fn check_psid(psid: crate::Psid) -> CodecResult<()> {
    ensure(is_valid_psid(psid.raw()), ParamKind::Psid, psid.raw())
}

/// Checks WSM transmit parameters. A channel-load request is refused.
pub fn check_tx_params(params: &WsmTxParams) -> CodecResult<()> {
    ensure(
        is_valid_priority(params.priority),
        ParamKind::Priority,
        params.priority,
    )?;
    check_psid(params.psid)?;
    if let Some(channel) = params.channel_number {
        ensure(
            is_valid_channel_number(channel),
            ParamKind::ChannelNumber,
            channel,
        )?;
    }
    if let Some(rate) = params.data_rate {
        ensure(is_valid_data_rate(rate), ParamKind::DataRate, rate)?;
    }
    if let Some(power) = params.tx_power {
        ensure(is_valid_tx_power(power), ParamKind::TxPower, power)?;
    }
    if params.channel_load.is_some() {
        return Err(CodecError::NotSupported {
            operation: "channel load extension",
        });
    }
    Ok(())
}

fn check_psc(psc: Option<&[u8]>) -> CodecResult<()> {
    match psc {
        Some(psc) => check_len(is_valid_psc_len(psc.len()), ParamKind::PscLength, psc.len()),
        None => Ok(()),
    }
}

fn check_interval(interval: Option<u8>) -> CodecResult<()> {
    match interval {
        Some(interval) => ensure(
            is_valid_wsa_count_threshold_interval(interval),
            ParamKind::WsaCountThresholdInterval,
            interval,
        ),
        None => Ok(()),
    }
}

/// Checks a provider service request before registration.
pub fn check_psr(psr: &PsrEntry) -> CodecResult<()> {
    ensure(is_valid_wsa_id(psr.wsa_id), ParamKind::WsaId, psr.wsa_id)?;
    check_psid(psr.psid)?;
    ensure(
        is_valid_channel_number(psr.service_channel),
        ParamKind::ChannelNumber,
        psr.service_channel,
    )?;
    check_psc(psr.options.psc.as_deref())?;
    check_interval(psr.options.wsa_count_threshold_interval)
}

fn check_location_2d(location: &Location2D) -> CodecResult<()> {
    ensure(
        is_valid_latitude(location.latitude),
        ParamKind::Latitude,
        location.latitude,
    )?;
    ensure(
        is_valid_longitude(location.longitude),
        ParamKind::Longitude,
        location.longitude,
    )
}

fn check_location_3d(location: &Location3D) -> CodecResult<()> {
    check_location_2d(&Location2D {
        latitude: location.latitude,
        longitude: location.longitude,
    })?;
    ensure(
        is_valid_elevation(location.elevation),
        ParamKind::Elevation,
        location.elevation,
    )
}

pub fn check_wsa_header(header: &WsaHeader) -> CodecResult<()> {
    ensure(is_valid_wsa_id(header.wsa_id), ParamKind::WsaId, header.wsa_id)?;
    ensure(
        is_valid_content_count(header.content_count),
        ParamKind::ContentCount,
        header.content_count,
    )?;
    if let Some(location) = &header.location_2d {
        check_location_2d(location)?;
    }
    if let Some(location) = &header.location_3d {
        check_location_3d(location)?;
    }
    if let Some(id) = &header.advertiser_id {
        check_len(
            is_valid_advertiser_id_len(id.len()),
            ParamKind::AdvertiserIdLength,
            id.len(),
        )?;
    }
    Ok(())
}

pub fn check_service_info(info: &WsaServiceInfo) -> CodecResult<()> {
    check_psid(info.psid)?;
    ensure(
        is_valid_channel_index(info.channel_index),
        ParamKind::ChannelIndex,
        info.channel_index,
    )?;
    check_psc(info.psc.as_deref())?;
    check_interval(info.wsa_count_threshold_interval)
}

pub fn check_channel_info(info: &WsaChannelInfo) -> CodecResult<()> {
    ensure(
        is_valid_channel_number(info.channel),
        ParamKind::ChannelNumber,
        info.channel,
    )?;
    ensure(
        is_valid_tx_power(info.power_level),
        ParamKind::TxPower,
        info.power_level,
    )?;
    ensure(
        is_valid_data_rate(info.data_rate),
        ParamKind::DataRate,
        info.data_rate,
    )
}

pub fn check_routing(routing: &RoutingAdvertisement) -> CodecResult<()> {
    ensure(
        is_valid_prefix_len(routing.prefix_len),
        ParamKind::PrefixLength,
        routing.prefix_len,
    )
}
