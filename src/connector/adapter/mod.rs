mod reqwest_transport;
mod scripted_transport;

pub use reqwest_transport::*;
pub use scripted_transport::*;
