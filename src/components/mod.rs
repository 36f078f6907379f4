mod feed_screen;

pub use feed_screen::{FeedScreen, FeedServices};
