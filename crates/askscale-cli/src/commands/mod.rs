pub mod dimensions;
pub mod init;
pub mod score;
pub mod validate;
