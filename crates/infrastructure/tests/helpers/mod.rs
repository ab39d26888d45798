#![allow(dead_code)]
pub mod builders;
pub mod dns_server_mock;
pub mod mock_exchanger;

pub use builders::{a_record, addresses, mx_record, response_for, ResponseBuilder};
pub use dns_server_mock::{MockDnsServer, MockReply};
pub use mock_exchanger::{MockExchanger, Scripted};
