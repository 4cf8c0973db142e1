pub mod http_client;
pub mod metadata_writer;
