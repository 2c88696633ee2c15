pub mod cli;
pub mod compare;
pub mod hash;
pub mod random;
