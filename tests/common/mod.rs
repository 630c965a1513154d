//! Integration test common infrastructure.
//!
//! Provides a fake IRC server, a fake device-control service and a handle
//! on the spawned relay process.

pub mod device;
pub mod irc;
pub mod relay;

#[allow(unused_imports)]
pub use device::FakeDevice;
#[allow(unused_imports)]
pub use irc::{FakeIrcServer, IrcPeer};
#[allow(unused_imports)]
pub use relay::{RelayProcess, config};
