pub mod health;
pub mod ingest;
