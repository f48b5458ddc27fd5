// Re-export types from the protocol crate so they are accessible via scamsmart_core::*
pub use scamsmart_protocol::config;
pub use scamsmart_protocol::round;
pub use scamsmart_protocol::scores;

// Internal Modules
pub mod consts;
pub mod error;
pub mod games;
pub mod generation;
pub mod leaderboard;
pub mod scenario;
pub mod scoring;
pub mod tags;
pub mod verifier;
