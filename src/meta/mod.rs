pub mod reply;

pub use reply::ReplyPoster;
