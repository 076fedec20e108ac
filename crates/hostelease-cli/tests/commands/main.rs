mod helpers;
mod listings;
