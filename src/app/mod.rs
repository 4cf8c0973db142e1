pub mod ports;
pub mod refresh_use_case;
