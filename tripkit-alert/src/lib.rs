pub mod body;
pub mod dispatcher;
pub mod locate;
pub mod twilio;

pub use body::compose_body;
pub use dispatcher::{AlertDispatcher, AlertError, ChannelStatus, DispatchOutcome, QUEUED_NOTICE};
pub use locate::IpInfoLookup;
pub use twilio::{TwilioChannel, TwilioCredentials, TwilioMode};
