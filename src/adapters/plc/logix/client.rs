//! Controller services on top of the `rseip` client
//!
//! [`LogixClient`] is the set of requests the driver issues. The production
//! implementation is [`AbEipClient`]; reply bodies that `rseip` does not model
//! (symbol pages, the controller name) are handed back raw for the driver to
//! parse.

use super::endpoint::ConnectionPath;
use async_trait::async_trait;
use bytes::Bytes;
use rseip::cip::codec::decode::message_reply::decode_service_and_status;
use rseip::cip::error::cip_error_status;
use rseip::cip::{MessageReply, MessageReplyInterface, MessageRequest, Status};
use rseip::client::ab_eip::{PathParser, TagValue as CipValue};
use rseip::precludes::{
    AbEipClient, AbService, AbTemplateService, BytesHolder, CommonServices, Decode, EPath,
    MessageService,
};
use rseip::ClientError;
use rseip_core::codec::Decoder;

const CLASS_PROGRAM_NAME: u16 = 0x64;
const CLASS_SYMBOL: u16 = 0x6B;

const GET_INSTANCE_ATTRIBUTE_LIST: u8 = 0x55;
const REPLY_MASK: u8 = 0x80;

/// General status sent with a full page when more instances follow
const PARTIAL_TRANSFER: u8 = 0x06;

/// Symbol attributes in reply order: name, type word, software control,
/// array dimensions
pub const SYMBOL_ATTRIBUTES: [u16; 4] = [1, 2, 6, 8];

/// One Get Instance Attribute List reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPage {
    /// The controller holds more instances past the last one returned
    pub more: bool,
    pub data: Bytes,
}

/// Requests the Logix driver sends to a controller
#[async_trait]
pub trait LogixClient: Send {
    /// Resolves the host and prepares a client routed to the CPU slot;
    /// the TCP session is opened by the first request
    async fn connect(path: &ConnectionPath) -> rseip::Result<Self>
    where
        Self: Sized;

    /// Raw Get Attributes All reply of the Program Name object
    async fn controller_name(&mut self) -> rseip::Result<Bytes>;

    /// Symbol instances from `start` on, in controller scope or inside
    /// `program`
    async fn symbol_page(
        &mut self,
        program: Option<&str>,
        start: u16,
    ) -> rseip::Result<SymbolPage>;

    /// Type name stored in a structure template
    async fn template_name(&mut self, instance: u16) -> rseip::Result<String>;

    /// Read Tag of one symbolic address
    async fn read_value(&mut self, address: &str) -> rseip::Result<CipValue<Bytes>>;

    async fn disconnect(&mut self) -> rseip::Result<()>;
}

#[async_trait]
impl LogixClient for AbEipClient {
    async fn connect(path: &ConnectionPath) -> rseip::Result<Self> {
        let client = AbEipClient::new_host_lookup(path.socket_addr()).await?;
        Ok(client.with_connection_path(path.route()))
    }

    async fn controller_name(&mut self) -> rseip::Result<Bytes> {
        let path = EPath::default()
            .with_class(CLASS_PROGRAM_NAME)
            .with_instance(1);
        let reply: BytesHolder = self.get_attribute_all(path).await?;
        Ok(reply.into())
    }

    async fn symbol_page(
        &mut self,
        program: Option<&str>,
        start: u16,
    ) -> rseip::Result<SymbolPage> {
        let scope = match program {
            Some(program) => EPath::from_symbol(program),
            None => EPath::default(),
        };
        let path = scope.with_class(CLASS_SYMBOL).with_instance(start);
        let request = MessageRequest::new(
            GET_INSTANCE_ATTRIBUTE_LIST,
            path,
            (SYMBOL_ATTRIBUTES.len() as u16, SYMBOL_ATTRIBUTES),
        );
        let reply: PagedReply = self.send(request).await?;
        reply.expect_service::<ClientError>(GET_INSTANCE_ATTRIBUTE_LIST + REPLY_MASK)?;
        Ok(SymbolPage {
            more: reply.status().general == PARTIAL_TRANSFER,
            data: reply.into_value().into(),
        })
    }

    async fn template_name(&mut self, instance: u16) -> rseip::Result<String> {
        let template = self.find_template(instance).await?;
        let mut read = self.read_template(&template);
        let definition = read.call().await?;
        Ok(definition.name().to_string())
    }

    async fn read_value(&mut self, address: &str) -> rseip::Result<CipValue<Bytes>> {
        let path = EPath::parse_tag(address)?;
        AbService::read_tag(self, path).await
    }

    async fn disconnect(&mut self) -> rseip::Result<()> {
        MessageService::close(self).await
    }
}

/// Message reply that keeps its data when the status is partial transfer
#[derive(Debug)]
struct PagedReply(MessageReply<BytesHolder>);

impl MessageReplyInterface for PagedReply {
    type Value = BytesHolder;

    fn reply_service(&self) -> u8 {
        self.0.reply_service
    }

    fn status(&self) -> &Status {
        &self.0.status
    }

    fn value(&self) -> &Self::Value {
        &self.0.data
    }

    fn into_value(self) -> Self::Value {
        self.0.data
    }
}

impl<'de> Decode<'de> for PagedReply {
    fn decode<D>(mut decoder: D) -> Result<Self, D::Error>
    where
        D: Decoder<'de>,
    {
        let (reply_service, status) = decode_service_and_status(&mut decoder)?;
        if status.is_err() && status.general != PARTIAL_TRANSFER {
            return Err(cip_error_status(status));
        }
        let data = decoder.decode_any()?;
        Ok(Self(MessageReply::new(reply_service, status, data)))
    }
}
