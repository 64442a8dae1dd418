mod cache;
mod generator;

pub use generator::generate_digits;

pub(crate) use cache::ChallengeCache;
