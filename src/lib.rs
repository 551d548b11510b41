pub mod astro_math;
pub mod config;
pub mod consts;
pub mod control;
pub mod motor;
pub mod mount;
pub mod store;
pub mod util;
