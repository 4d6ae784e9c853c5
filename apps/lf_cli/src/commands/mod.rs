// apps/lf_cli/src/commands/mod.rs

//! 子命令实现

pub mod convert;
pub mod info;
pub mod run;
