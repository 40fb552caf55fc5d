pub mod embed;

pub mod health;
pub use self::health::health;

pub mod neynar_me;
pub use self::neynar_me::me;
