pub mod client;
pub mod forwarding;
pub mod load_balancer;
pub mod records;
pub mod transport;

pub use client::DnsClient;
pub use load_balancer::ResolverPool;
pub use transport::{DnsExchanger, NetworkExchanger};
