//! Email adapters - outbound confirmation delivery.

mod resend_sender;

pub use resend_sender::{ResendConfig, ResendSender};
