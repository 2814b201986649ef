pub mod backlinks;
pub mod cards;
pub mod due;
pub mod export;
pub mod graph;
pub mod link;
pub mod links;
pub mod preview;
pub mod review;
pub mod stats;
