//! LND REST client.
//!
//! Every request carries the macaroon hex in `Grpc-Metadata-macaroon`.
//! Mutating commands POST a JSON parameter object with an explicit
//! Content-Length; everything else is a bare GET. Responses are normalized
//! into [`RpcError`]: 401 means bad credentials, 404 an unknown command,
//! any other non-2xx a status failure, and a 2xx body must parse as a JSON
//! object.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::error::RpcError;
use crate::transport::{origin, HttpRequest, HttpTransport};

/// Header carrying the macaroon credential on every request.
pub const MACAROON_HEADER: &str = "Grpc-Metadata-macaroon";

/// An LND REST operation plus its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum LndCommand {
    GetInfo,
    /// Creates an invoice; the only body-carrying command.
    AddInvoice(Map<String, Value>),
    /// Decodes a payment request, passed as an extra path segment.
    PayReq(String),
    ListPayments,
    WalletBalance,
    ChannelBalance,
}

impl LndCommand {
    /// URL path segment for the operation.
    pub fn path(&self) -> &'static str {
        match self {
            LndCommand::GetInfo => "getinfo",
            LndCommand::AddInvoice(_) => "addinvoice",
            LndCommand::PayReq(_) => "payreq",
            LndCommand::ListPayments => "listpayments",
            LndCommand::WalletBalance => "walletbalance",
            LndCommand::ChannelBalance => "channelbalance",
        }
    }

    /// Mutating commands POST a JSON body; everything else GETs.
    pub fn is_mutating(&self) -> bool {
        matches!(self, LndCommand::AddInvoice(_))
    }

    fn extra_segment(&self) -> Option<&str> {
        match self {
            LndCommand::PayReq(request) => Some(request.as_str()),
            _ => None,
        }
    }

    fn params(&self) -> Option<&Map<String, Value>> {
        match self {
            LndCommand::AddInvoice(params) => Some(params),
            _ => None,
        }
    }
}

/// Client for one LND node: base address, macaroon, injected transport.
#[derive(Clone, Debug)]
pub struct LndRest<T: HttpTransport> {
    origin: String,
    macaroon_hex: String,
    transport: T,
}

impl<T: HttpTransport> LndRest<T> {
    /// `address` is `host[:port]`, typically an onion host. A scheme may be
    /// given explicitly, otherwise https is assumed. An empty address or
    /// credential means there is nothing to talk to.
    pub fn new(address: &str, macaroon_hex: &str, transport: T) -> Result<Self, RpcError> {
        if address.trim().is_empty() {
            return Err(RpcError::Configuration("node address is empty".into()));
        }
        if macaroon_hex.trim().is_empty() {
            return Err(RpcError::Configuration("node macaroon is empty".into()));
        }
        Ok(Self {
            origin: origin(address, "https"),
            macaroon_hex: macaroon_hex.to_string(),
            transport,
        })
    }

    fn endpoint(&self, command: &LndCommand) -> Result<Url, RpcError> {
        let mut raw = format!("{}/{}", self.origin, command.path());
        if let Some(extra) = command.extra_segment() {
            raw.push('/');
            raw.push_str(extra);
        }
        Ok(Url::parse(&raw)?)
    }

    /// Executes one command and returns the response document verbatim.
    /// Exactly one of Ok/Err per call; nothing is retried or cached.
    pub fn execute(&self, command: &LndCommand) -> Result<Map<String, Value>, RpcError> {
        let url = self.endpoint(command)?;
        debug!(%url, command = command.path(), "lnd request");

        let request = if command.is_mutating() {
            let params = command.params().cloned().unwrap_or_default();
            let body = serde_json::to_vec(&Value::Object(params))
                .map_err(|e| RpcError::Decode(format!("encode request body: {e}")))?;
            HttpRequest::post_json(url, body)
        } else {
            HttpRequest::get(url)
        };
        let request = request.header(MACAROON_HEADER, &self.macaroon_hex);

        let response = self.transport.send(request).map_err(RpcError::from)?;
        if !(200..300).contains(&response.status) {
            return Err(RpcError::from_status(response.status));
        }
        match serde_json::from_slice::<Value>(&response.body) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(RpcError::Decode(format!(
                "{}: response body is not a JSON object",
                command.path()
            ))),
            Err(e) => Err(RpcError::Decode(format!("{}: {e}", command.path()))),
        }
    }

    fn typed<R: for<'de> Deserialize<'de>>(&self, command: &LndCommand) -> Result<R, RpcError> {
        let document = self.execute(command)?;
        serde_json::from_value(Value::Object(document))
            .map_err(|e| RpcError::Decode(format!("{} decode: {e}", command.path())))
    }

    pub fn get_info(&self) -> Result<GetInfoResponse, RpcError> {
        self.typed(&LndCommand::GetInfo)
    }

    /// Creates an invoice for `value` satoshis with an optional memo.
    pub fn add_invoice(
        &self,
        value: u64,
        memo: Option<&str>,
    ) -> Result<AddInvoiceResponse, RpcError> {
        let mut params = Map::new();
        params.insert("value".into(), Value::from(value));
        if let Some(memo) = memo {
            params.insert("memo".into(), Value::from(memo));
        }
        self.typed(&LndCommand::AddInvoice(params))
    }

    pub fn decode_pay_req(&self, payment_request: &str) -> Result<PayReqResponse, RpcError> {
        self.typed(&LndCommand::PayReq(payment_request.to_string()))
    }

    pub fn list_payments(&self) -> Result<ListPaymentsResponse, RpcError> {
        self.typed(&LndCommand::ListPayments)
    }

    pub fn wallet_balance(&self) -> Result<WalletBalanceResponse, RpcError> {
        self.typed(&LndCommand::WalletBalance)
    }

    pub fn channel_balance(&self) -> Result<ChannelBalanceResponse, RpcError> {
        self.typed(&LndCommand::ChannelBalance)
    }
}

/// Fields we commonly read from `getinfo`; everything else is ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetInfoResponse {
    pub alias: String,
    pub version: String,
    pub identity_pubkey: String,
    pub block_height: u64,
    pub num_active_channels: u64,
    pub num_peers: u64,
    pub synced_to_chain: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddInvoiceResponse {
    pub r_hash: String,
    pub payment_request: String,
    pub add_index: String,
}

/// Decoded payment request. LND's REST gateway serializes int64 fields as
/// strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PayReqResponse {
    pub destination: String,
    pub payment_hash: String,
    pub num_satoshis: String,
    pub description: String,
    pub expiry: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LndPayment {
    pub payment_hash: String,
    pub value_sat: String,
    pub creation_date: String,
    pub status: String,
    pub payment_request: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListPaymentsResponse {
    pub payments: Vec<LndPayment>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WalletBalanceResponse {
    pub total_balance: String,
    pub confirmed_balance: String,
    pub unconfirmed_balance: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChannelBalanceResponse {
    pub balance: String,
    pub pending_open_balance: String,
}

impl ChannelBalanceResponse {
    /// Local channel balance in satoshis; malformed values read as zero.
    pub fn balance_sat(&self) -> u64 {
        self.balance.parse().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpResponse, Method, TransportError};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Debug)]
    struct CaptureTransport {
        last: Arc<Mutex<Option<HttpRequest>>>,
        status: u16,
        body: Vec<u8>,
    }

    impl CaptureTransport {
        fn ok(body: Value) -> Self {
            Self {
                last: Arc::default(),
                status: 200,
                body: body.to_string().into_bytes(),
            }
        }

        fn last_request(&self) -> HttpRequest {
            self.last.lock().unwrap().clone().expect("request captured")
        }
    }

    impl HttpTransport for CaptureTransport {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            *self.last.lock().unwrap() = Some(request);
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn add_invoice_posts_json_with_explicit_length() {
        let transport = CaptureTransport::ok(json!({"payment_request": "lnbc1"}));
        let lnd = LndRest::new("abc.onion", "deadbeef", transport.clone()).unwrap();
        let mut params = Map::new();
        params.insert("amount".into(), Value::from(1000));
        lnd.execute(&LndCommand::AddInvoice(params)).unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.as_str(), "https://abc.onion/addinvoice");
        assert_eq!(header(&request, MACAROON_HEADER), Some("deadbeef"));
        assert_eq!(header(&request, "Content-Type"), Some("application/json"));
        let body = request.body.clone().expect("post carries a body");
        assert_eq!(body, br#"{"amount":1000}"#);
        assert_eq!(
            header(&request, "Content-Length").expect("length header"),
            body.len().to_string()
        );
    }

    #[test]
    fn get_commands_carry_no_body() {
        let transport = CaptureTransport::ok(json!({}));
        let lnd = LndRest::new("abc.onion", "deadbeef", transport.clone()).unwrap();
        lnd.execute(&LndCommand::GetInfo).unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url.as_str(), "https://abc.onion/getinfo");
        assert!(request.body.is_none());
        assert!(header(&request, "Content-Length").is_none());
        assert_eq!(header(&request, MACAROON_HEADER), Some("deadbeef"));
    }

    #[test]
    fn payreq_appends_the_request_as_a_path_segment() {
        let transport = CaptureTransport::ok(json!({"description": "coffee"}));
        let lnd = LndRest::new("abc.onion", "deadbeef", transport.clone()).unwrap();
        lnd.execute(&LndCommand::PayReq("lnbc1xyz".into())).unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url.as_str(), "https://abc.onion/payreq/lnbc1xyz");
    }

    #[test]
    fn success_payload_round_trips_verbatim() {
        let body = json!({"alias": "node", "features": {"0": {"name": "x"}}});
        let transport = CaptureTransport::ok(body.clone());
        let lnd = LndRest::new("abc.onion", "deadbeef", transport).unwrap();
        let document = lnd.execute(&LndCommand::GetInfo).unwrap();
        assert_eq!(Value::Object(document), body);
    }

    #[test]
    fn empty_profile_fields_are_rejected() {
        let err = LndRest::new("", "deadbeef", CaptureTransport::ok(json!({}))).unwrap_err();
        assert!(matches!(err, RpcError::Configuration(_)));
        assert!(err.to_string().contains("no eligible node"));

        let err = LndRest::new("abc.onion", "  ", CaptureTransport::ok(json!({}))).unwrap_err();
        assert!(matches!(err, RpcError::Configuration(_)));
    }

    #[test]
    fn explicit_scheme_in_address_wins() {
        let transport = CaptureTransport::ok(json!({}));
        let lnd = LndRest::new("http://127.0.0.1:8080", "deadbeef", transport.clone()).unwrap();
        lnd.execute(&LndCommand::GetInfo).unwrap();
        assert_eq!(
            transport.last_request().url.as_str(),
            "http://127.0.0.1:8080/getinfo"
        );
    }
}
