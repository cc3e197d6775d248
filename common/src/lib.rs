//! Network configuration and address selection shared by the Neon deploy scripts

pub mod constants;
pub mod networks;
pub mod resolver;
