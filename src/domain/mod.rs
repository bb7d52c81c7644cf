//! Domain layer: the transaction record and its status pipeline, money,
//! id allocation, the decline switch, search criteria and the storage ports.

pub mod amount;
pub mod decline;
pub mod ids;
pub mod payment_method;
pub mod ports;
pub mod search;
pub mod transaction;
