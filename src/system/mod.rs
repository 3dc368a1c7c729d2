pub(crate) mod bluetooth;
pub(crate) mod config;
pub(crate) mod flash;
pub(crate) mod host;
pub(crate) mod time;
