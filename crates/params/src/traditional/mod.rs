//! Constants for traditional (pre-quantum) public key algorithms

pub mod ecc;
pub mod rsa;
