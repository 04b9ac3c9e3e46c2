//! Imports for syntax extensions.

pub use crate::IntoEndpointUrl as _;
pub use crate::codec::JsonCodec as _;
pub use crate::grant::ClaimSupplier as _;
pub use crate::http::{HttpClient as _, HttpResponse as _};
