//! Infrastructure concerns that sit outside the domain: configuration
//! loading and anything else the host environment provides.

pub mod config;
