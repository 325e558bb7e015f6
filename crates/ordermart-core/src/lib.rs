pub mod error;
pub mod record;
pub mod extract;
pub mod flatten;
pub mod lookup;
pub mod tables;
pub mod transform;
pub mod db;
pub mod sink;
pub mod pipeline;
