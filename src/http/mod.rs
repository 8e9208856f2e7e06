//! HTTP plumbing shared by every route: body decoding, the response
//! envelope, and cross-origin handling.

pub mod body;
pub mod cors;
pub mod envelope;

pub use body::JsonBody;
pub use envelope::Envelope;
