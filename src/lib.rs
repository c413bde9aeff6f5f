pub mod cluster;
pub mod containers;
pub mod context;
pub mod credentials;
pub mod customize;
pub mod forge;
pub mod git;
pub mod pipeline;
pub mod preflight;
pub mod prompt;
pub mod resolve;
pub mod scaffold;
pub mod stack;
pub mod template;
pub mod ui;
pub mod validate;

// Re-export commonly used types
pub use context::BootstrapConfig;
pub use stack::Stack;
