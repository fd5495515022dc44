pub mod channel;
pub mod replay;
pub mod settings;
pub mod util;
