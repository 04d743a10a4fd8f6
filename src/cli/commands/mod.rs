pub mod check;
mod helper;
pub mod init;
pub mod rewrite;
pub mod search;
