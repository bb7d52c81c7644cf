//! Application layer: the gateway facade that every boundary call goes
//! through, and the projection of its results into response shapes.

pub mod gateway;
pub mod projector;
