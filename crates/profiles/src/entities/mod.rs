//! Domain entities for profile preferences

pub mod notification;

pub use notification::MailNotification;
