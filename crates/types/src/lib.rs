pub mod auction;
pub mod board;
pub mod call;
pub mod card;
pub mod contract;
pub mod hand;
pub mod io;
pub mod rank;
pub mod strain;
pub mod suit;

pub use auction::{Auction, AuctionError};
pub use board::{Partnership, Position};
pub use call::{Call, ParseCallError};
pub use card::Card;
pub use contract::{Contract, DoubleStatus};
pub use hand::{Distribution, Hand, Shape};
pub use io::hand_parser::HandParseError;
pub use rank::Rank;
pub use strain::Strain;
pub use suit::Suit;
