//! Cache module for the Redis-backed revocation ledger

pub mod redis_client;


pub use redis_client::RedisClient;
