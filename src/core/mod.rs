// Core modules implementing the decode chain, document access, and error modeling.
pub mod codec;
pub mod error;
pub mod export;
