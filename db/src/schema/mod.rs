pub use self::auto::*;

/// DDL for a version 4 eSword module. The tables mirror the ones in `auto`.
pub const BBLX_V4: &str = include_str!("bblx_v4.sql");

mod auto;
