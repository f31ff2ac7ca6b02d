//! SOAP/XML codec for the HePws order and inventory service.
//!
//! The remote service takes its request as XML *text* inside a SOAP
//! envelope and answers the same way, so both directions are two-layer:
//!
//! - **Encode**: domain value → inner XML fragment (values escaped) →
//!   fragment escaped again into `<xmlRequest>` of a fixed envelope.
//! - **Decode**: outer envelope → `<...Result>` element in the
//!   `http://tempuri.org/` namespace → its text parsed as a second XML
//!   document → named leaves.
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk_soap::{encode, envelope, decode, SoapOperation};
//!
//! let fragment = encode::stock_check(&credentials, &sku);
//! let body = envelope::request(SoapOperation::StockCheck, &fragment);
//! // POST body with SOAPAction: SoapOperation::StockCheck.soap_action()
//! let level = decode::stock_level(&response_text)?;
//! ```

pub mod decode;
pub mod encode;
pub mod envelope;
mod error;
mod escape;

pub use envelope::SoapOperation;
pub use error::CodecError;
pub use escape::escape;
