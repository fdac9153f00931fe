pub mod refresh_trending;
