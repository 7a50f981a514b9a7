pub mod categories;
pub mod credentials;
pub mod events;
pub mod init;
pub mod misc;
pub mod profile;
pub mod storage;
