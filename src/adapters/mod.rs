// Adapters layer: concrete implementations of the domain ports (relay http, local storage, clock).

pub mod clock;
pub mod http;
pub mod storage;
