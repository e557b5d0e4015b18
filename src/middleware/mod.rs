pub mod method;
pub mod security;

pub use method::restrict_method;
pub use security::add_security_headers;
