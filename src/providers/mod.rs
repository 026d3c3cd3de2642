pub mod mimer_provider;
pub mod util;

pub use mimer_provider::MimerProvider;
