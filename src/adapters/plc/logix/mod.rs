//! Logix EtherNet/IP driver
//!
//! Talks to ControlLogix/CompactLogix controllers through the `rseip`
//! client, with unconnected messages routed to the CPU slot.
//!
//! On `open()` the driver uploads the symbol table (controller scope and every
//! program scope) and resolves structure templates to their type names, so the
//! tag database carries AOI names the same way the controller's own tools show
//! them.

pub mod client;
pub mod endpoint;

use self::client::LogixClient;
use self::endpoint::ConnectionPath;
use super::traits::{PlcDriver, TagDatabase, TagDefinition, TagReading};
use crate::domain::{ControllerError, PaxError, Result, TagPath, TagValue};
use async_trait::async_trait;
use bytes::{Buf, Bytes};
use rseip::client::ab_eip::{TagType, TagValue as CipValue};
use rseip::precludes::AbEipClient;
use rseip::ClientError;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Software control bit set on base (non-alias) tags
const BASE_TAG_BIT: u32 = 1 << 26;

/// Structure handle of the built-in STRING type
const STRING_HANDLE: u16 = 0x0FCE;

/// Name of an atomic type code
fn atomic_name(code: u8) -> Option<&'static str> {
    Some(match code {
        0xC1 => "BOOL",
        0xC2 => "SINT",
        0xC3 => "INT",
        0xC4 => "DINT",
        0xC5 => "LINT",
        0xC6 => "USINT",
        0xC7 => "UINT",
        0xC8 => "UDINT",
        0xC9 => "ULINT",
        0xCA => "REAL",
        0xCB => "LREAL",
        0xD1 => "BYTE",
        0xD2 => "WORD",
        0xD3 => "DWORD",
        0xD4 => "LWORD",
        _ => return None,
    })
}

/// One entry of the Symbol object instance list
#[derive(Debug, Clone, PartialEq, Eq)]
struct SymbolEntry {
    instance: u32,
    name: String,
    type_word: u16,
    software_control: u32,
    dimensions: [u32; 3],
}

impl SymbolEntry {
    fn is_struct(&self) -> bool {
        self.type_word & 0x8000 != 0
    }

    fn is_system(&self) -> bool {
        self.type_word & 0x1000 != 0
    }

    fn dims(&self) -> u8 {
        ((self.type_word & 0x6000) >> 13) as u8
    }

    fn template_id(&self) -> u16 {
        self.type_word & 0x0FFF
    }

    fn atomic_code(&self) -> u8 {
        (self.type_word & 0x00FF) as u8
    }

    fn is_program(&self) -> bool {
        self.name.starts_with("Program:")
    }

    fn is_user_tag(&self) -> bool {
        !self.name.starts_with("__") && !self.name.contains(':') && !self.is_system()
    }

    fn is_alias(&self) -> bool {
        self.software_control & BASE_TAG_BIT == 0
    }
}

fn ensure_len(data: &Bytes, len: usize) -> Result<()> {
    if data.remaining() < len {
        return Err(ControllerError::InvalidResponse(format!(
            "reply truncated: {} of {len} bytes",
            data.remaining()
        ))
        .into());
    }
    Ok(())
}

fn parse_symbol_entries(mut data: Bytes) -> Result<Vec<SymbolEntry>> {
    let mut entries = Vec::new();
    while data.has_remaining() {
        ensure_len(&data, 6)?;
        let instance = data.get_u32_le();
        let name_len = data.get_u16_le() as usize;
        ensure_len(&data, name_len + 2 + 4 + 12)?;
        let name = String::from_utf8_lossy(&data.split_to(name_len)).into_owned();
        let type_word = data.get_u16_le();
        let software_control = data.get_u32_le();
        let dimensions = [data.get_u32_le(), data.get_u32_le(), data.get_u32_le()];
        entries.push(SymbolEntry {
            instance,
            name,
            type_word,
            software_control,
            dimensions,
        });
    }
    Ok(entries)
}

/// Length-prefixed name from the Program Name object
fn parse_controller_name(mut data: Bytes) -> Result<String> {
    ensure_len(&data, 2)?;
    let len = data.get_u16_le() as usize;
    ensure_len(&data, len)?;
    Ok(String::from_utf8_lossy(&data[..len]).into_owned())
}

/// Read Tag address of a tag path
///
/// `[i][j]` indices are written `[i,j]`, and a trailing numeric member
/// (`Sts.5`) is split off as the bit to extract from the parent integer.
fn read_address(path: &str) -> (String, Option<u8>) {
    let address = path.replace("][", ",");
    if let Some((parent, member)) = address.rsplit_once('.') {
        let numeric = !member.is_empty() && member.bytes().all(|b| b.is_ascii_digit());
        if numeric && !parent.is_empty() {
            if let Some(bit) = member.parse::<u8>().ok().filter(|bit| *bit < 64) {
                return (parent.to_string(), Some(bit));
            }
        }
    }
    (address, None)
}

fn short_payload(tag_type: TagType, data: &Bytes, len: usize) -> std::result::Result<(), String> {
    if data.remaining() < len {
        return Err(format!(
            "Short {tag_type:?} payload: {} of {len} bytes",
            data.remaining()
        ));
    }
    Ok(())
}

/// Converts a Read Tag reply into a value and its type name
fn decode_value(reply: CipValue<Bytes>) -> std::result::Result<(TagValue, String), String> {
    let CipValue {
        tag_type,
        value: mut data,
    } = reply;
    let width = match tag_type {
        TagType::Bool | TagType::Sint => 1,
        TagType::Int => 2,
        TagType::Dint | TagType::Real | TagType::Dword => 4,
        TagType::Lint => 8,
        TagType::Structure(STRING_HANDLE) => 4,
        TagType::Structure(_) => 0,
    };
    short_payload(tag_type, &data, width)?;

    let (value, name) = match tag_type {
        TagType::Bool => (TagValue::Bool(data.get_u8() != 0), "BOOL"),
        TagType::Sint => (TagValue::Int(data.get_i8() as i64), "SINT"),
        TagType::Int => (TagValue::Int(data.get_i16_le() as i64), "INT"),
        TagType::Dint => (TagValue::Int(data.get_i32_le() as i64), "DINT"),
        TagType::Lint => (TagValue::Int(data.get_i64_le()), "LINT"),
        TagType::Real => (TagValue::Float(data.get_f32_le() as f64), "REAL"),
        TagType::Dword => (TagValue::UInt(data.get_u32_le() as u64), "DWORD"),
        TagType::Structure(STRING_HANDLE) => {
            let len = (data.get_u32_le() as usize).min(data.remaining());
            let text = String::from_utf8_lossy(&data[..len]).into_owned();
            (TagValue::Text(text), "STRING")
        }
        TagType::Structure(handle) => {
            return Ok((TagValue::Bytes(data.to_vec()), format!("STRUCT_{handle:04X}")));
        }
    };
    Ok((value, name.to_string()))
}

/// Extracts one bit of an integer value as a BOOL
fn extract_bit(value: &TagValue, bit: u8) -> Option<TagValue> {
    let raw = match value {
        TagValue::Int(v) => *v as u64,
        TagValue::UInt(v) => *v,
        TagValue::Bool(v) if bit == 0 => *v as u64,
        _ => return None,
    };
    (bit < 64).then(|| TagValue::Bool((raw >> bit) & 1 == 1))
}

fn reading_from_reply(path: &TagPath, reply: CipValue<Bytes>, bit: Option<u8>) -> TagReading {
    let (value, data_type) = match decode_value(reply) {
        Ok(decoded) => decoded,
        Err(reason) => return TagReading::failed(path.clone(), reason),
    };
    match bit {
        None => TagReading::ok(path.clone(), value, data_type),
        Some(bit) => match extract_bit(&value, bit) {
            Some(value) => TagReading::ok(path.clone(), value, "BOOL"),
            None => TagReading::failed(
                path.clone(),
                format!("Bit access on non-integer {data_type}"),
            ),
        },
    }
}

/// Runs one request under the timeout
///
/// Timeouts and socket errors are returned as transport errors. Anything the
/// controller answered, including refusals, stays in the inner result.
async fn exchange<T>(
    limit: Duration,
    target: &ConnectionPath,
    request: impl Future<Output = rseip::Result<T>>,
) -> Result<rseip::Result<T>> {
    match timeout(limit, request).await {
        Err(_) => Err(ControllerError::Timeout(format!("no reply from {target}")).into()),
        Ok(Err(e @ ClientError::Io { .. })) => {
            Err(ControllerError::ConnectionFailed(format!("{target}: {e}")).into())
        }
        Ok(reply) => Ok(reply),
    }
}

fn refused(service: &'static str, e: ClientError) -> PaxError {
    ControllerError::ServiceFailed {
        service,
        message: e.to_string(),
    }
    .into()
}

/// Driver for Logix controllers over EtherNet/IP
pub struct LogixDriver<C = AbEipClient> {
    path: ConnectionPath,
    timeout: Duration,
    client: Option<C>,
    tags: TagDatabase,
    template_names: HashMap<u16, String>,
}

impl LogixDriver {
    pub fn new(path: ConnectionPath, timeout: Duration) -> Self {
        Self {
            path,
            timeout,
            client: None,
            tags: TagDatabase::new(),
            template_names: HashMap::new(),
        }
    }
}

impl<C: LogixClient> LogixDriver<C> {
    /// Driver over a client that is already set up; `open()` only uploads
    /// the tag database
    pub fn with_client(path: ConnectionPath, timeout: Duration, client: C) -> Self {
        Self {
            path,
            timeout,
            client: Some(client),
            tags: TagDatabase::new(),
            template_names: HashMap::new(),
        }
    }

    async fn read_plc_name(&mut self) -> Result<String> {
        let client = self.client.as_mut().ok_or(ControllerError::NotConnected)?;
        let data = exchange(self.timeout, &self.path, client.controller_name())
            .await?
            .map_err(|e| refused("Controller name", e))?;
        parse_controller_name(data)
    }

    /// Pages through the Symbol object of the controller or of one program
    async fn list_symbols(&mut self, program: Option<&str>) -> Result<Vec<SymbolEntry>> {
        let mut symbols = Vec::new();
        let mut start = 0u16;
        loop {
            let client = self.client.as_mut().ok_or(ControllerError::NotConnected)?;
            let page = exchange(self.timeout, &self.path, client.symbol_page(program, start))
                .await?
                .map_err(|e| refused("Symbol list", e))?;
            let entries = parse_symbol_entries(page.data)?;
            let last = entries.last().map(|entry| entry.instance);
            symbols.extend(entries);

            match last {
                Some(last) if page.more => {
                    start = u16::try_from(last.saturating_add(1)).map_err(|_| {
                        ControllerError::InvalidResponse(format!(
                            "symbol instance {last} out of range"
                        ))
                    })?;
                }
                _ => break,
            }
        }
        tracing::debug!(
            scope = program.unwrap_or("controller"),
            symbols = symbols.len(),
            "Symbol list uploaded"
        );
        Ok(symbols)
    }

    /// Resolves a structure template id to its type name, cached per session
    async fn template_name(&mut self, id: u16) -> Result<String> {
        if let Some(name) = self.template_names.get(&id) {
            return Ok(name.clone());
        }

        let client = self.client.as_mut().ok_or(ControllerError::NotConnected)?;
        let name = match exchange(self.timeout, &self.path, client.template_name(id)).await? {
            Ok(name) if !name.is_empty() => name,
            // Some built-in templates are not readable
            Ok(_) => format!("STRUCT_{id:03X}"),
            Err(e) => {
                tracing::debug!(template = id, error = %e, "Template not readable");
                format!("STRUCT_{id:03X}")
            }
        };
        self.template_names.insert(id, name.clone());
        Ok(name)
    }

    /// Uploads the tag database of the controller and all programs
    async fn load_tags(&mut self) -> Result<()> {
        let mut entries = Vec::new();
        let mut programs = Vec::new();
        for symbol in self.list_symbols(None).await? {
            if symbol.is_program() {
                programs.push(symbol.name);
            } else if symbol.is_user_tag() {
                entries.push((symbol.name.clone(), symbol));
            }
        }
        for program in programs {
            for symbol in self.list_symbols(Some(&program)).await? {
                if symbol.is_user_tag() {
                    entries.push((format!("{program}.{}", symbol.name), symbol));
                }
            }
        }

        let mut tags = TagDatabase::with_capacity(entries.len());
        for (name, symbol) in entries {
            let data_type_name = if symbol.is_struct() {
                self.template_name(symbol.template_id()).await?
            } else {
                atomic_name(symbol.atomic_code())
                    .unwrap_or("UNKNOWN")
                    .to_string()
            };
            let dim = symbol.dims();
            tags.insert(
                name,
                TagDefinition {
                    data_type_name,
                    alias: symbol.is_alias(),
                    dim,
                    dimensions: symbol.dimensions[..dim.min(3) as usize]
                        .iter()
                        .map(|d| *d as usize)
                        .collect(),
                },
            );
        }
        tracing::info!(tags = tags.len(), "Tag database loaded");
        self.tags = tags;
        Ok(())
    }
}

#[async_trait]
impl<C: LogixClient> PlcDriver for LogixDriver<C> {
    async fn open(&mut self) -> Result<()> {
        if self.client.is_none() {
            let client = exchange(self.timeout, &self.path, C::connect(&self.path))
                .await?
                .map_err(|e| ControllerError::ConnectionFailed(format!("{}: {e}", self.path)))?;
            self.client = Some(client);
            tracing::debug!(controller = %self.path, "Client prepared");
        }
        self.load_tags().await
    }

    async fn plc_name(&mut self) -> Result<String> {
        self.read_plc_name().await
    }

    fn tags(&self) -> &TagDatabase {
        &self.tags
    }

    async fn read(&mut self, paths: &[TagPath]) -> Result<Vec<TagReading>> {
        let client = self.client.as_mut().ok_or(ControllerError::NotConnected)?;

        let mut readings = Vec::with_capacity(paths.len());
        for path in paths {
            let (address, bit) = read_address(path.as_str());
            let reading = match exchange(self.timeout, &self.path, client.read_value(&address))
                .await?
            {
                Ok(reply) => reading_from_reply(path, reply, bit),
                Err(e) => TagReading::failed(path.clone(), e.to_string()),
            };
            readings.push(reading);
        }
        Ok(readings)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut client) = self.client.take() {
            let _ = timeout(self.timeout, client.disconnect()).await;
            tracing::debug!(controller = %self.path, "Session closed");
        }
        Ok(())
    }
}
