#![allow(dead_code)]

pub mod canned_server;
pub mod nutriscan_env;
