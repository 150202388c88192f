mod client;
pub mod elpris;
mod error;
mod provider;

#[cfg(test)]
pub use self::provider::tests;
pub use self::{
    error::{FetchError, ParseError},
    provider::PriceProvider,
};
